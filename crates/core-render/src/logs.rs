//! Logs console painter: filtered, searchable, scrollable entries.
//!
//! Filtering is stable: level filter (at-or-above), exact source match,
//! then a search query compiled to a case-insensitive regex — a query that
//! fails to compile is matched as an escaped literal instead. Expanded
//! entries add detail rows and an aggregated metrics row to the display
//! list before windowing.

use core_geometry::Rect;
use core_node::{LogEntry, LogLevel, LogsConsoleProps, Props, VNode};
use core_text::truncate_to_width;
use core_theme::{Color, StyleAttrs, TextStyle, Theme};
use regex::{Regex, RegexBuilder};

use crate::walk::PaintCtx;

fn level_tag(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "TRC",
        LogLevel::Debug => "DBG",
        LogLevel::Info => "INF",
        LogLevel::Warn => "WRN",
        LogLevel::Error => "ERR",
    }
}

fn level_color(theme: &Theme, level: LogLevel) -> Color {
    match level {
        LogLevel::Trace => theme.colors.muted,
        LogLevel::Debug => theme.colors.secondary,
        LogLevel::Info => theme.colors.info,
        LogLevel::Warn => theme.colors.warning,
        LogLevel::Error => theme.colors.danger,
    }
}

fn search_regex(query: &str) -> Option<Regex> {
    let build = |pattern: &str| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .ok()
    };
    build(query).or_else(|| build(&regex::escape(query)))
}

/// Apply the `(level, source, search)` filters; row order is entry order.
pub fn filter_entries<'a>(props: &'a LogsConsoleProps) -> Vec<&'a LogEntry> {
    let search = props.search.as_deref().filter(|q| !q.is_empty()).and_then(search_regex);
    props
        .entries
        .iter()
        .filter(|e| props.level_filter.is_none_or(|min| e.level >= min))
        .filter(|e| {
            props
                .source_filter
                .as_deref()
                .is_none_or(|src| e.source == src)
        })
        .filter(|e| {
            search
                .as_ref()
                .is_none_or(|re| re.is_match(&e.message) || re.is_match(&e.source))
        })
        .collect()
}

enum Row<'a> {
    Entry(&'a LogEntry),
    Detail(&'a str),
    Metrics(&'a LogEntry),
}

fn display_rows<'a>(entries: &[&'a LogEntry]) -> Vec<Row<'a>> {
    let mut rows = Vec::new();
    for entry in entries {
        rows.push(Row::Entry(entry));
        if entry.expanded {
            if let Some(details) = &entry.details {
                rows.extend(details.lines().map(Row::Detail));
            }
            if entry.duration_ms.is_some() || entry.tokens.is_some() || entry.cost_usd.is_some() {
                rows.push(Row::Metrics(entry));
            }
        }
    }
    rows
}

fn metrics_line(entry: &LogEntry) -> String {
    let mut parts = Vec::new();
    if let Some(ms) = entry.duration_ms {
        parts.push(format!("{ms}ms"));
    }
    if let Some(tokens) = entry.tokens {
        parts.push(format!("{tokens} tok"));
    }
    if let Some(cost) = entry.cost_usd {
        parts.push(format!("${cost:.4}"));
    }
    parts.join(" · ")
}

pub(crate) fn paint_logs(ctx: &mut PaintCtx<'_, '_>, vnode: &VNode, rect: Rect, style: TextStyle) {
    let Props::LogsConsole(p) = &vnode.props else {
        return;
    };
    let theme = ctx.params.theme;
    let filtered = filter_entries(p);
    let rows = display_rows(&filtered);
    let scroll = p.scroll_top.max(0) as usize;

    ctx.builder.push_clip(rect);
    for (screen_row, row) in rows.iter().skip(scroll).take(rect.h.max(0) as usize).enumerate() {
        let y = rect.y + screen_row as i32;
        match row {
            Row::Entry(entry) => {
                let tag_style =
                    TextStyle::fg(level_color(theme, entry.level)).with_attrs(StyleAttrs::BOLD);
                ctx.builder
                    .draw_text(rect.x, y, level_tag(entry.level), tag_style.merged_over(style));
                let head = format!("{}: {}", entry.source, entry.message);
                ctx.builder.draw_text(
                    rect.x + 4,
                    y,
                    &truncate_to_width(&head, (rect.w - 4).max(0)),
                    style,
                );
            }
            Row::Detail(line) => {
                ctx.builder.draw_text(
                    rect.x + 4,
                    y,
                    &truncate_to_width(line, (rect.w - 4).max(0)),
                    TextStyle::fg(theme.colors.muted)
                        .with_attrs(StyleAttrs::DIM)
                        .merged_over(style),
                );
            }
            Row::Metrics(entry) => {
                ctx.builder.draw_text(
                    rect.x + 4,
                    y,
                    &truncate_to_width(&metrics_line(entry), (rect.w - 4).max(0)),
                    TextStyle::fg(theme.colors.secondary).merged_over(style),
                );
            }
        }
    }
    ctx.builder.pop_clip();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: LogLevel, source: &str, message: &str) -> LogEntry {
        LogEntry {
            level,
            source: source.into(),
            message: message.into(),
            ..LogEntry::default()
        }
    }

    #[test]
    fn level_filter_is_at_or_above() {
        let props = LogsConsoleProps {
            entries: vec![
                entry(LogLevel::Debug, "a", "one"),
                entry(LogLevel::Warn, "a", "two"),
                entry(LogLevel::Error, "a", "three"),
            ],
            level_filter: Some(LogLevel::Warn),
            ..LogsConsoleProps::default()
        };
        let out = filter_entries(&props);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].message, "two");
    }

    #[test]
    fn source_filter_is_exact() {
        let props = LogsConsoleProps {
            entries: vec![
                entry(LogLevel::Info, "net", "req"),
                entry(LogLevel::Info, "network", "req"),
            ],
            source_filter: Some("net".into()),
            ..LogsConsoleProps::default()
        };
        assert_eq!(filter_entries(&props).len(), 1);
    }

    #[test]
    fn search_is_case_insensitive() {
        let props = LogsConsoleProps {
            entries: vec![
                entry(LogLevel::Info, "a", "Connection Reset"),
                entry(LogLevel::Info, "a", "ok"),
            ],
            search: Some("connection".into()),
            ..LogsConsoleProps::default()
        };
        assert_eq!(filter_entries(&props).len(), 1);
    }

    #[test]
    fn invalid_regex_degrades_to_literal() {
        let props = LogsConsoleProps {
            entries: vec![
                entry(LogLevel::Info, "a", "value [1] here"),
                entry(LogLevel::Info, "a", "other"),
            ],
            search: Some("[1".into()),
            ..LogsConsoleProps::default()
        };
        assert_eq!(filter_entries(&props).len(), 1);
    }

    #[test]
    fn expanded_entries_add_detail_and_metric_rows() {
        let mut e = entry(LogLevel::Info, "tool", "ran");
        e.expanded = true;
        e.details = Some("line one\nline two".into());
        e.duration_ms = Some(12);
        e.tokens = Some(345);
        let entries = [&e];
        let rows = display_rows(&entries);
        assert_eq!(rows.len(), 4);
        assert_eq!(metrics_line(&e), "12ms · 345 tok");
    }
}
