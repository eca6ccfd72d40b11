//! Range scanner.
//!
//! Walks the effective scan window (the configured window clipped to the
//! underlying type) one candidate at a time and asks the probe about each.
//! Every walk is bounded by the window width.
//!
//! Boundary behavior: when the minimum scan reaches the top of the window
//! without a hit it reports the top itself, and the maximum scan symmetrically
//! reports the bottom. A window with no valid value therefore yields inverted
//! bounds (`min > max`) and a count of zero. A window that shares no value
//! with the underlying type reports the type's own range inverted, so both
//! bounds stay representable.

use enum_traits_common::ScanWindow;

use crate::declaration::Declaration;
use crate::probe::{first_enumerator, is_valid};

/// Discovered bounds; inverted when nothing valid was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min: i128,
    pub max: i128,
}

impl Bounds {
    pub const fn is_empty(self) -> bool {
        self.min > self.max
    }
}

pub const fn scan_min(decl: &Declaration<'_>, window: ScanWindow) -> i128 {
    let window = decl.effective_window(window);
    if window.is_inverted() {
        return decl.repr.max;
    }
    let mut candidate = window.min;
    while candidate < window.max {
        if is_valid(decl, candidate) {
            return candidate;
        }
        candidate += 1;
    }
    window.max
}

pub const fn scan_max(decl: &Declaration<'_>, window: ScanWindow) -> i128 {
    let window = decl.effective_window(window);
    if window.is_inverted() {
        return decl.repr.min;
    }
    let mut candidate = window.max;
    while candidate > window.min {
        if is_valid(decl, candidate) {
            return candidate;
        }
        candidate -= 1;
    }
    window.min
}

pub const fn bounds(decl: &Declaration<'_>, window: ScanWindow) -> Bounds {
    Bounds {
        min: scan_min(decl, window),
        max: scan_max(decl, window),
    }
}

/// First valid value in `[from, to]`.
pub const fn next_valid(decl: &Declaration<'_>, from: i128, to: i128) -> Option<i128> {
    let mut candidate = from;
    while candidate <= to {
        if is_valid(decl, candidate) {
            return Some(candidate);
        }
        if candidate == to {
            break;
        }
        candidate += 1;
    }
    None
}

/// Number of valid values in `[min, max]`; gaps are not counted.
pub const fn count(decl: &Declaration<'_>, window: ScanWindow) -> usize {
    let bounds = bounds(decl, window);
    if bounds.is_empty() {
        return 0;
    }
    let mut total = 0;
    let mut cursor = bounds.min;
    while let Some(value) = next_valid(decl, cursor, bounds.max) {
        total += 1;
        if value == bounds.max {
            break;
        }
        cursor = value + 1;
    }
    total
}

/// Valid values in ascending numeric order. `N` must equal [`count`].
pub const fn values<const N: usize>(decl: &Declaration<'_>, window: ScanWindow) -> [i128; N] {
    let mut out = [0i128; N];
    let bounds = bounds(decl, window);
    let mut filled = 0;
    if !bounds.is_empty() {
        let mut cursor = bounds.min;
        while let Some(value) = next_valid(decl, cursor, bounds.max) {
            assert!(filled < N, "value table is shorter than the scanned count");
            out[filled] = value;
            filled += 1;
            if value == bounds.max {
                break;
            }
            cursor = value + 1;
        }
    }
    assert!(filled == N, "value table is longer than the scanned count");
    out
}

/// Declaration indices of the enumerators behind [`values`], index-aligned.
pub const fn indices<const N: usize>(decl: &Declaration<'_>, window: ScanWindow) -> [usize; N] {
    let values = values::<N>(decl, window);
    let mut out = [0usize; N];
    let mut i = 0;
    while i < N {
        out[i] = match first_enumerator(decl, values[i]) {
            Some(index) => index,
            None => panic!("scanned value has no enumerator"),
        };
        i += 1;
    }
    out
}

/// Pick `items[indices[i]]` for every `i`. `items` must not be empty.
pub const fn select<T: Copy, const N: usize>(items: &[T], indices: &[usize; N]) -> [T; N] {
    let mut out = [items[0]; N];
    let mut i = 0;
    while i < N {
        out[i] = items[indices[i]];
        i += 1;
    }
    out
}

/// Owned ascending walk over the valid values, for build-time callers.
#[derive(Clone, Debug)]
pub struct ValidValues<'d, 'a> {
    decl: &'d Declaration<'a>,
    cursor: i128,
    end: i128,
    done: bool,
}

impl<'d, 'a> ValidValues<'d, 'a> {
    pub fn new(decl: &'d Declaration<'a>, window: ScanWindow) -> Self {
        let bounds = bounds(decl, window);
        Self {
            decl,
            cursor: bounds.min,
            end: bounds.max,
            done: bounds.is_empty(),
        }
    }
}

impl Iterator for ValidValues<'_, '_> {
    type Item = i128;

    fn next(&mut self) -> Option<i128> {
        if self.done {
            return None;
        }
        match next_valid(self.decl, self.cursor, self.end) {
            Some(value) => {
                if value == self.end {
                    self.done = true;
                } else {
                    self.cursor = value + 1;
                }
                Some(value)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::Enumerator;
    use enum_traits_common::ReprType;

    const FRUITS: &[Enumerator<'static>] = &[
        Enumerator::new("Apples", 2),
        Enumerator::new("Oranges", 5),
        Enumerator::new("Pears", 8),
        Enumerator::new("Bananas", 11),
    ];
    const FRUITS_DECL: Declaration<'static> =
        Declaration::new("Fruits", ReprType::I32.range(), FRUITS);

    #[test]
    fn test_bounds_skip_gaps() {
        let bounds = bounds(&FRUITS_DECL, ScanWindow::DEFAULT);
        assert_eq!(bounds, Bounds { min: 2, max: 11 });
        assert_eq!(count(&FRUITS_DECL, ScanWindow::DEFAULT), 4);
    }

    #[test]
    fn test_values_in_const_context() {
        const N: usize = count(&FRUITS_DECL, ScanWindow::DEFAULT);
        const VALUES: [i128; N] = values::<N>(&FRUITS_DECL, ScanWindow::DEFAULT);
        const INDICES: [usize; N] = indices::<N>(&FRUITS_DECL, ScanWindow::DEFAULT);
        assert_eq!(VALUES, [2, 5, 8, 11]);
        assert_eq!(INDICES, [0, 1, 2, 3]);
    }

    #[test]
    fn test_next_valid_stops_at_end() {
        assert_eq!(next_valid(&FRUITS_DECL, 3, 7), Some(5));
        assert_eq!(next_valid(&FRUITS_DECL, 9, 10), None);
        assert_eq!(next_valid(&FRUITS_DECL, 11, 11), Some(11));
    }

    #[test]
    fn test_next_valid_at_type_maximum() {
        const TOP: &[Enumerator<'static>] = &[Enumerator::new("Top", i64::MAX as i128)];
        let decl = Declaration::new("Top", ReprType::I64.range(), TOP);
        let max = i64::MAX as i128;
        assert_eq!(next_valid(&decl, max, max), Some(max));
    }

    #[test]
    fn test_narrow_window_clips_bounds() {
        let window = ScanWindow::new(3, 9);
        assert_eq!(bounds(&FRUITS_DECL, window), Bounds { min: 5, max: 8 });
        assert_eq!(ValidValues::new(&FRUITS_DECL, window).collect::<Vec<_>>(), vec![5, 8]);
    }

    #[test]
    fn test_empty_window_reports_inverted_bounds() {
        let window = ScanWindow::new(12, 20);
        let bounds = bounds(&FRUITS_DECL, window);
        assert_eq!(bounds, Bounds { min: 20, max: 12 });
        assert!(bounds.is_empty());
        assert_eq!(count(&FRUITS_DECL, window), 0);
        assert_eq!(ValidValues::new(&FRUITS_DECL, window).count(), 0);
    }

    #[test]
    fn test_window_disjoint_from_type_is_empty() {
        const ZERO: &[Enumerator<'static>] = &[Enumerator::new("Zero", 0)];
        let decl = Declaration::new("Unsigned", ReprType::U8.range(), ZERO);
        let window = ScanWindow::new(-100, -1);
        let below = bounds(&decl, window);
        assert_eq!(below, Bounds { min: 255, max: 0 });
        assert!(below.is_empty());
        assert_eq!(count(&decl, window), 0);
        assert_eq!(values::<0>(&decl, window), []);
        assert_eq!(ValidValues::new(&decl, window).count(), 0);

        let above = ScanWindow::new(300, 400);
        assert_eq!(bounds(&decl, above), Bounds { min: 255, max: 0 });
        assert_eq!(count(&decl, above), 0);
    }

    #[test]
    fn test_select_reorders() {
        let picked = select(&['a', 'b', 'c'], &[2, 0]);
        assert_eq!(picked, ['c', 'a']);
    }

    #[test]
    #[should_panic(expected = "value table")]
    fn test_values_length_mismatch_panics() {
        let _ = values::<3>(&FRUITS_DECL, ScanWindow::DEFAULT);
    }
}
