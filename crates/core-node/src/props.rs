//! Per-kind widget descriptor records.
//!
//! Every widget kind in the closed set gets its own record type, reached
//! through the `Props` sum. Children are not stored here — ordered child
//! ids live on the `VNode` — so these records stay plain data that the
//! measure and paint dispatchers can match on.

use core_theme::{ControlSize, TextStyle, Tone, Variant};

use crate::kind::NodeKind;
use crate::layout_props::{Justify, Overflow};

// ---------------------------------------------------------------------------
// Shared chrome / data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSides {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for BorderSides {
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TitleAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Drop shadow configuration for boxes and overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadow {
    pub dx: i32,
    pub dy: i32,
    pub glyph: char,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            dx: 1,
            dy: 1,
            glyph: '░',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backdrop {
    #[default]
    None,
    Dim,
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DropdownPlacement {
    #[default]
    BelowStart,
    BelowEnd,
    AboveStart,
    AboveEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastPosition {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpinnerStyle {
    #[default]
    Braille,
    Line,
    Dots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiffMode {
    #[default]
    Unified,
    SideBySide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SplitDir {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableColumn {
    pub title: String,
    pub width: Option<i32>,
}

/// One visible row of a tree widget (pre-flattened by the application).
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub label: String,
    pub depth: i32,
    /// `None` for leaves; `Some(open)` for expandable rows.
    pub expanded: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub name: String,
    pub is_dir: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub col_start: i32,
    pub col_end: i32,
    pub severity: Severity,
}

/// Editor selection in (line, column) cell coordinates, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start_line: usize,
    pub start_col: i32,
    pub end_line: usize,
    pub end_col: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiffLineKind {
    #[default]
    Context,
    Add,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    pub content: String,
    /// Intra-line highlight column ranges, half-open.
    pub highlights: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiffHunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub header: String,
    pub lines: Vec<DiffLine>,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogEntry {
    pub level: LogLevel,
    pub source: String,
    pub message: String,
    pub details: Option<String>,
    pub duration_ms: Option<u64>,
    pub tokens: Option<u64>,
    pub cost_usd: Option<f64>,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Toast {
    pub tone: Tone,
    pub message: String,
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DropdownItem {
    pub label: String,
    pub shortcut: Option<String>,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaletteItem {
    pub label: String,
    pub shortcut: Option<String>,
}

// ---------------------------------------------------------------------------
// Per-kind records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextProps {
    pub content: String,
    pub wrap: bool,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ButtonProps {
    pub label: String,
    pub variant: Variant,
    pub tone: Tone,
    pub size: ControlSize,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputProps {
    pub value: String,
    pub placeholder: String,
    pub masked: bool,
    pub readonly: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpacerProps {
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividerProps {
    pub vertical: bool,
    pub glyph: char,
}

impl Default for DividerProps {
    fn default() -> Self {
        Self {
            vertical: false,
            glyph: '─',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconProps {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpinnerProps {
    pub style: SpinnerStyle,
    pub frame: usize,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressProps {
    pub value: f64,
    pub max: f64,
    pub width: Option<i32>,
    pub show_percent: bool,
}

impl Default for ProgressProps {
    fn default() -> Self {
        Self {
            value: 0.0,
            max: 1.0,
            width: None,
            show_percent: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkeletonProps {
    pub w: i32,
    pub h: i32,
}

impl Default for SkeletonProps {
    fn default() -> Self {
        Self { w: 8, h: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BadgeProps {
    pub label: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusProps {
    pub label: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagProps {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeProps {
    pub value: f64,
    pub max: f64,
    pub label: Option<String>,
    pub width: Option<i32>,
}

impl Default for GaugeProps {
    fn default() -> Self {
        Self {
            value: 0.0,
            max: 1.0,
            label: None,
            width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmptyProps {
    pub title: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorDisplayProps {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalloutProps {
    pub tone: Tone,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparklineProps {
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarChartProps {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
    /// Scale maximum; computed from data when absent.
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MiniChartProps {
    pub values: Vec<f64>,
    pub width: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KbdProps {
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichTextProps {
    pub spans: Vec<(String, TextStyle)>,
    pub wrap: bool,
}

/// Pre-rasterized cell art: one string per row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageProps {
    pub rows: Vec<String>,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasProps {
    pub rows: Vec<(String, TextStyle)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkProps {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineChartProps {
    pub series: Vec<Vec<f64>>,
    pub height: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterProps {
    pub points: Vec<(f64, f64)>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeatmapProps {
    pub rows: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectProps {
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub placeholder: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckboxProps {
    pub label: String,
    pub checked: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadioGroupProps {
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub vertical: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderProps {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub width: Option<i32>,
    pub disabled: bool,
}

impl Default for SliderProps {
    fn default() -> Self {
        Self {
            value: 0.0,
            min: 0.0,
            max: 1.0,
            width: None,
            disabled: false,
        }
    }
}

/// Accessibility live-region hook; zero-size, paints nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FocusAnnouncerProps {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackProps {
    pub gap: i32,
    pub justify: Justify,
    pub align: crate::layout_props::Align,
    pub overflow: Overflow,
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub bg: Option<TextStyle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxProps {
    pub border: core_theme::BorderKind,
    pub sides: BorderSides,
    pub title: Option<String>,
    pub title_align: TitleAlign,
    pub padding: i32,
    pub gap: i32,
    pub shadow: Option<Shadow>,
    pub overflow: Overflow,
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub bg: Option<TextStyle>,
}

impl Default for BoxProps {
    fn default() -> Self {
        Self {
            border: core_theme::BorderKind::Single,
            sides: BorderSides::default(),
            title: None,
            title_align: TitleAlign::Left,
            padding: 0,
            gap: 0,
            shadow: None,
            overflow: Overflow::Visible,
            scroll_x: 0,
            scroll_y: 0,
            bg: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridTracks {
    Count(i32),
    /// Whitespace/comma separated track list; only the token count is
    /// interpreted.
    Spec(String),
}

impl Default for GridTracks {
    fn default() -> Self {
        GridTracks::Count(1)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridProps {
    pub columns: GridTracks,
    pub rows: Option<i32>,
    pub gap: i32,
    pub row_gap: Option<i32>,
    pub column_gap: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableProps {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeProps {
    pub rows: Vec<TreeRow>,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VirtualListProps {
    pub item_count: usize,
    pub item_height: i32,
    pub scroll_top: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilePickerProps {
    pub path: String,
    pub entries: Vec<FileEntry>,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileTreeExplorerProps {
    pub rows: Vec<TreeRow>,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeEditorProps {
    pub lines: Vec<String>,
    pub language: Option<String>,
    pub scroll_top: usize,
    pub scroll_left: i32,
    pub cursor: Option<(usize, i32)>,
    pub selection: Option<Selection>,
    pub diagnostics: Vec<Diagnostic>,
    pub show_line_numbers: bool,
    pub highlight_cursor_cell: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiffViewerProps {
    pub hunks: Vec<DiffHunk>,
    pub mode: DiffMode,
    pub focused_hunk: Option<usize>,
    pub scroll_top: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogsConsoleProps {
    pub entries: Vec<LogEntry>,
    pub level_filter: Option<LogLevel>,
    pub source_filter: Option<String>,
    pub search: Option<String>,
    pub scroll_top: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalProps {
    pub title: Option<String>,
    pub backdrop: Backdrop,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DropdownProps {
    pub anchor_id: String,
    pub items: Vec<DropdownItem>,
    pub selected: Option<usize>,
    pub placement: DropdownPlacement,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandPaletteProps {
    pub query: String,
    pub items: Vec<PaletteItem>,
    pub selected: usize,
    pub max_visible: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolApprovalDialogProps {
    pub title: String,
    pub body: String,
    pub actions: Vec<String>,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastContainerProps {
    pub toasts: Vec<Toast>,
    pub position: ToastPosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitPaneProps {
    pub dir: SplitDir,
    /// First pane's share of the main axis in `0.0..=1.0`.
    pub ratio: f32,
}

impl Default for SplitPaneProps {
    fn default() -> Self {
        Self {
            dir: SplitDir::Horizontal,
            ratio: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelGroupProps {
    pub dir: SplitDir,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResizablePanelProps {
    pub size: Option<i32>,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThemedProps {
    /// Style merged over the inherited style for the subtree.
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldProps {
    pub label: String,
    pub help: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabsProps {
    pub labels: Vec<String>,
    pub active: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccordionProps {
    pub titles: Vec<String>,
    pub expanded: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BreadcrumbProps {
    pub segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaginationProps {
    pub page: usize,
    pub page_count: usize,
}

// ---------------------------------------------------------------------------
// The sum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Props {
    Text(TextProps),
    Button(ButtonProps),
    Input(InputProps),
    Spacer(SpacerProps),
    Divider(DividerProps),
    Icon(IconProps),
    Spinner(SpinnerProps),
    Progress(ProgressProps),
    Skeleton(SkeletonProps),
    Badge(BadgeProps),
    Status(StatusProps),
    Tag(TagProps),
    Gauge(GaugeProps),
    Empty(EmptyProps),
    ErrorDisplay(ErrorDisplayProps),
    Callout(CalloutProps),
    Sparkline(SparklineProps),
    BarChart(BarChartProps),
    MiniChart(MiniChartProps),
    Kbd(KbdProps),
    RichText(RichTextProps),
    Image(ImageProps),
    Canvas(CanvasProps),
    Link(LinkProps),
    LineChart(LineChartProps),
    Scatter(ScatterProps),
    Heatmap(HeatmapProps),
    Select(SelectProps),
    Checkbox(CheckboxProps),
    RadioGroup(RadioGroupProps),
    Slider(SliderProps),
    FocusAnnouncer(FocusAnnouncerProps),
    Row(StackProps),
    Column(StackProps),
    Box(BoxProps),
    Grid(GridProps),
    Table(TableProps),
    Tree(TreeProps),
    VirtualList(VirtualListProps),
    FilePicker(FilePickerProps),
    FileTreeExplorer(FileTreeExplorerProps),
    CodeEditor(CodeEditorProps),
    DiffViewer(DiffViewerProps),
    LogsConsole(LogsConsoleProps),
    Layers,
    Modal(ModalProps),
    Dropdown(DropdownProps),
    Layer,
    CommandPalette(CommandPaletteProps),
    ToolApprovalDialog(ToolApprovalDialogProps),
    ToastContainer(ToastContainerProps),
    SplitPane(SplitPaneProps),
    PanelGroup(PanelGroupProps),
    ResizablePanel(ResizablePanelProps),
    FocusZone,
    FocusTrap,
    Themed(ThemedProps),
    Field(FieldProps),
    Tabs(TabsProps),
    Accordion(AccordionProps),
    Breadcrumb(BreadcrumbProps),
    Pagination(PaginationProps),
}

impl Props {
    pub fn kind(&self) -> NodeKind {
        match self {
            Props::Text(_) => NodeKind::Text,
            Props::Button(_) => NodeKind::Button,
            Props::Input(_) => NodeKind::Input,
            Props::Spacer(_) => NodeKind::Spacer,
            Props::Divider(_) => NodeKind::Divider,
            Props::Icon(_) => NodeKind::Icon,
            Props::Spinner(_) => NodeKind::Spinner,
            Props::Progress(_) => NodeKind::Progress,
            Props::Skeleton(_) => NodeKind::Skeleton,
            Props::Badge(_) => NodeKind::Badge,
            Props::Status(_) => NodeKind::Status,
            Props::Tag(_) => NodeKind::Tag,
            Props::Gauge(_) => NodeKind::Gauge,
            Props::Empty(_) => NodeKind::Empty,
            Props::ErrorDisplay(_) => NodeKind::ErrorDisplay,
            Props::Callout(_) => NodeKind::Callout,
            Props::Sparkline(_) => NodeKind::Sparkline,
            Props::BarChart(_) => NodeKind::BarChart,
            Props::MiniChart(_) => NodeKind::MiniChart,
            Props::Kbd(_) => NodeKind::Kbd,
            Props::RichText(_) => NodeKind::RichText,
            Props::Image(_) => NodeKind::Image,
            Props::Canvas(_) => NodeKind::Canvas,
            Props::Link(_) => NodeKind::Link,
            Props::LineChart(_) => NodeKind::LineChart,
            Props::Scatter(_) => NodeKind::Scatter,
            Props::Heatmap(_) => NodeKind::Heatmap,
            Props::Select(_) => NodeKind::Select,
            Props::Checkbox(_) => NodeKind::Checkbox,
            Props::RadioGroup(_) => NodeKind::RadioGroup,
            Props::Slider(_) => NodeKind::Slider,
            Props::FocusAnnouncer(_) => NodeKind::FocusAnnouncer,
            Props::Row(_) => NodeKind::Row,
            Props::Column(_) => NodeKind::Column,
            Props::Box(_) => NodeKind::Box,
            Props::Grid(_) => NodeKind::Grid,
            Props::Table(_) => NodeKind::Table,
            Props::Tree(_) => NodeKind::Tree,
            Props::VirtualList(_) => NodeKind::VirtualList,
            Props::FilePicker(_) => NodeKind::FilePicker,
            Props::FileTreeExplorer(_) => NodeKind::FileTreeExplorer,
            Props::CodeEditor(_) => NodeKind::CodeEditor,
            Props::DiffViewer(_) => NodeKind::DiffViewer,
            Props::LogsConsole(_) => NodeKind::LogsConsole,
            Props::Layers => NodeKind::Layers,
            Props::Modal(_) => NodeKind::Modal,
            Props::Dropdown(_) => NodeKind::Dropdown,
            Props::Layer => NodeKind::Layer,
            Props::CommandPalette(_) => NodeKind::CommandPalette,
            Props::ToolApprovalDialog(_) => NodeKind::ToolApprovalDialog,
            Props::ToastContainer(_) => NodeKind::ToastContainer,
            Props::SplitPane(_) => NodeKind::SplitPane,
            Props::PanelGroup(_) => NodeKind::PanelGroup,
            Props::ResizablePanel(_) => NodeKind::ResizablePanel,
            Props::FocusZone => NodeKind::FocusZone,
            Props::FocusTrap => NodeKind::FocusTrap,
            Props::Themed(_) => NodeKind::Themed,
            Props::Field(_) => NodeKind::Field,
            Props::Tabs(_) => NodeKind::Tabs,
            Props::Accordion(_) => NodeKind::Accordion,
            Props::Breadcrumb(_) => NodeKind::Breadcrumb,
            Props::Pagination(_) => NodeKind::Pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Family;

    #[test]
    fn kind_round_trip_samples() {
        assert_eq!(Props::Text(TextProps::default()).kind(), NodeKind::Text);
        assert_eq!(Props::Layers.kind(), NodeKind::Layers);
        assert_eq!(
            Props::Grid(GridProps::default()).kind().family(),
            Family::Grid
        );
    }

    #[test]
    fn border_sides_default_all_on() {
        let s = BorderSides::default();
        assert!(s.top && s.right && s.bottom && s.left);
    }
}
