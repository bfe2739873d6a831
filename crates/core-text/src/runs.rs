//! Memoized glyph-run construction.
//!
//! Border lines, scrollbar tracks, shade fills and shadow rows all repeat a
//! single glyph `n` times every frame. Rebuilding those strings per frame is
//! pure allocator churn, so runs are interned in a bounded thread-local
//! cache and handed out as shared slices.
//!
//! Invariants:
//! * The cache never exceeds `RUN_CACHE_CAP` entries; on overflow it is
//!   dropped wholesale and rebuilt (entries are cheap to regenerate).
//! * `n <= 0` returns the shared empty run without touching the cache.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;

const RUN_CACHE_CAP: usize = 256;

thread_local! {
    static RUN_CACHE: RefCell<AHashMap<(char, i32), Rc<str>>> =
        RefCell::new(AHashMap::new());
}

/// `glyph` repeated `n` times, interned.
pub fn glyph_run(glyph: char, n: i32) -> Rc<str> {
    if n <= 0 {
        return Rc::from("");
    }
    RUN_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(run) = cache.get(&(glyph, n)) {
            return Rc::clone(run);
        }
        if cache.len() >= RUN_CACHE_CAP {
            cache.clear();
        }
        let mut s = String::with_capacity(glyph.len_utf8() * n as usize);
        for _ in 0..n {
            s.push(glyph);
        }
        let run: Rc<str> = Rc::from(s);
        cache.insert((glyph, n), Rc::clone(&run));
        run
    })
}

/// A run of spaces, the most common fill.
#[inline]
pub fn spaces(n: i32) -> Rc<str> {
    glyph_run(' ', n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_repeats_glyph() {
        assert_eq!(&*glyph_run('─', 4), "────");
        assert_eq!(&*spaces(3), "   ");
    }

    #[test]
    fn zero_and_negative_are_empty() {
        assert_eq!(&*glyph_run('█', 0), "");
        assert_eq!(&*glyph_run('█', -3), "");
    }

    #[test]
    fn repeated_lookups_share_allocation() {
        let a = glyph_run('━', 10);
        let b = glyph_run('━', 10);
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn cache_stays_bounded() {
        for i in 1..=(RUN_CACHE_CAP as i32 + 50) {
            let run = glyph_run('.', i);
            assert_eq!(run.len(), i as usize);
        }
        RUN_CACHE.with(|c| assert!(c.borrow().len() <= RUN_CACHE_CAP));
    }
}
