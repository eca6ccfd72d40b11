//! Const text scanning.
//!
//! Plain forward/backward searches over byte slices, usable in constant
//! expressions. Inputs are short (identifiers, compiler signature lines), so
//! every search is a simple linear walk with no skip tables.

/// First index at or after `start` holding `needle`.
pub const fn find_byte(haystack: &[u8], needle: u8, start: usize) -> Option<usize> {
    let mut pos = start;
    while pos < haystack.len() {
        if haystack[pos] == needle {
            return Some(pos);
        }
        pos += 1;
    }
    None
}

/// Last index at or before `start` holding `needle`.
///
/// `start` is clamped to the final index, so `usize::MAX` searches the whole
/// slice from the end.
pub const fn rfind_byte(haystack: &[u8], needle: u8, start: usize) -> Option<usize> {
    if haystack.is_empty() {
        return None;
    }
    let mut pos = if start < haystack.len() {
        start
    } else {
        haystack.len() - 1
    };
    loop {
        if haystack[pos] == needle {
            return Some(pos);
        }
        if pos == 0 {
            return None;
        }
        pos -= 1;
    }
}

/// Last index holding `needle`.
pub const fn rfind_last(haystack: &[u8], needle: u8) -> Option<usize> {
    rfind_byte(haystack, needle, usize::MAX)
}

/// First index at or after `start` where `needle` occurs contiguously.
///
/// A needle longer than the haystack is never found. An empty needle matches
/// at `start` when `start` is inside the haystack.
pub const fn find_bytes(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    let mut pos = start;
    while pos < haystack.len() {
        if matches_at(haystack, pos, needle) {
            return Some(pos);
        }
        pos += 1;
    }
    None
}

/// Whether `needle` occurs in `haystack` starting exactly at `pos`.
pub const fn matches_at(haystack: &[u8], pos: usize, needle: &[u8]) -> bool {
    if pos + needle.len() > haystack.len() {
        return false;
    }
    let mut i = 0;
    while i < needle.len() {
        if haystack[pos + i] != needle[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Byte-wise equality, usable in const context.
pub const fn bytes_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && matches_at(a, 0, b)
}
