//! Identifier character classification.
//!
//! Generated names must be valid C++ identifiers, including the extended
//! character set allowed by the standard (Annex E). The classification is
//! driven by two fixed range tables rather than Unicode categories, because
//! table data routinely contains CJK text and full-width punctuation.

use once_cell::sync::Lazy;

/// Code points allowed anywhere in an identifier, including its first character
const LEADING_RANGES: &str = "0041-005A,005F,0061-007A,00A8,00AA,00AD,00AF,00B2-00B5,00B7-00BA,\
00BC-00BE,00C0-00D6,00D8-00F6,00F8-00FF,0100-02FF,0370-167F,1681-180D,180F-1DBF,1E00-1FFF,\
200B-200D,202A-202E,203F-2040,2054,2060-206F,2070-20CF,2100-218F,2460-24FF,2776-2793,\
2C00-2DFF,2E80-2FFF,3004-3007,3021-302F,3031-303F,3040-D7FF,F900-FD3D,FD40-FDCF,FDF0-FE1F,\
FE30-FE44,FE47-FFFD,10000-1FFFD,20000-2FFFD,30000-3FFFD,40000-4FFFD,50000-5FFFD,60000-6FFFD,\
70000-7FFFD,80000-8FFFD,90000-9FFFD,A0000-AFFFD,B0000-BFFFD,C0000-CFFFD,D0000-DFFFD,\
E0000-EFFFD";

/// Code points allowed in an identifier except as its first character
const CONTINUATION_ONLY_RANGES: &str = "0030-0039,0300-036F,1DC0-1DFF,20D0-20FF,FE20-FE2F";

/// Inclusive code point range
type Range = (u32, u32);

static LEADING: Lazy<Vec<Range>> = Lazy::new(|| {
    parse_ranges(LEADING_RANGES).expect("built-in leading range table is well-formed")
});

static CONTINUATION_ONLY: Lazy<Vec<Range>> = Lazy::new(|| {
    parse_ranges(CONTINUATION_ONLY_RANGES)
        .expect("built-in continuation range table is well-formed")
});

/// Parse a comma-separated list of hex code points or `START-END` ranges.
///
/// Returns `None` on a malformed entry.
fn parse_ranges(table: &str) -> Option<Vec<Range>> {
    table
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            match entry.split_once('-') {
                Some((start, end)) => Some((
                    u32::from_str_radix(start, 16).ok()?,
                    u32::from_str_radix(end, 16).ok()?,
                )),
                None => {
                    let single = u32::from_str_radix(entry, 16).ok()?;
                    Some((single, single))
                }
            }
        })
        .collect()
}

/// Ranges are sorted and disjoint, so a partition point finds the candidate.
fn contains(ranges: &[Range], code_point: u32) -> bool {
    let idx = ranges.partition_point(|&(_, end)| end < code_point);
    ranges
        .get(idx)
        .is_some_and(|&(start, end)| start <= code_point && code_point <= end)
}

/// Whether `code_point` may start an identifier
pub fn is_leading_code_point(code_point: u32) -> bool {
    contains(&LEADING, code_point)
}

/// Whether `code_point` may appear after the first character of an identifier
pub fn is_continuation_code_point(code_point: u32) -> bool {
    is_leading_code_point(code_point) || contains(&CONTINUATION_ONLY, code_point)
}

pub fn is_leading_char(c: char) -> bool {
    is_leading_code_point(c as u32)
}

pub fn is_continuation_char(c: char) -> bool {
    is_continuation_code_point(c as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted_disjoint(ranges: &[Range]) {
        for pair in ranges.windows(2) {
            assert!(pair[0].0 <= pair[0].1, "inverted range {:X?}", pair[0]);
            assert!(pair[0].1 < pair[1].0, "overlap between {:X?} and {:X?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_range_tables_parse_sorted() {
        assert_sorted_disjoint(&LEADING);
        assert_sorted_disjoint(&CONTINUATION_ONLY);
        assert_eq!(LEADING.first(), Some(&(0x41, 0x5A)));
        assert_eq!(LEADING.last(), Some(&(0xE0000, 0xEFFFD)));
        assert_eq!(CONTINUATION_ONLY.len(), 5);
    }

    #[test]
    fn test_tables_are_disjoint() {
        for &(start, end) in CONTINUATION_ONLY.iter() {
            for cp in [start, end] {
                assert!(!is_leading_code_point(cp), "{:X} is in both tables", cp);
            }
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_ranges("0041-zz").is_none());
        assert_eq!(parse_ranges("0041, 005F"), Some(vec![(0x41, 0x41), (0x5F, 0x5F)]));
    }

    #[test]
    fn test_ascii_classification() {
        assert!(is_leading_char('a'));
        assert!(is_leading_char('Z'));
        assert!(is_leading_char('_'));
        assert!(!is_leading_char('0'));
        assert!(is_continuation_char('0'));
        assert!(is_continuation_char('9'));
        assert!(!is_continuation_char('-'));
        assert!(!is_continuation_char(' '));
        assert!(!is_continuation_char('$'));
    }

    #[test]
    fn test_cjk_and_fullwidth() {
        assert!(is_leading_char('剑'));
        assert!(is_leading_char('あ'));
        // Ideographic full stop and comma sit in the excluded 3000-3003 gap
        assert!(!is_continuation_char('。'));
        assert!(!is_continuation_char('、'));
        // Full-width forms fall inside FE47-FFFD
        assert!(is_leading_char('Ａ'));
        assert!(is_leading_char('！'));
    }

    #[test]
    fn test_combining_marks_continue_only() {
        assert!(!is_leading_char('\u{0301}'));
        assert!(is_continuation_char('\u{0301}'));
        assert!(!is_leading_char('\u{20D0}'));
        assert!(is_continuation_char('\u{FE20}'));
    }

    #[test]
    fn test_range_edges() {
        assert!(is_leading_code_point(0x1681));
        assert!(!is_leading_code_point(0x1680));
        assert!(!is_leading_code_point(0x180E));
        assert!(is_leading_code_point(0x1FFFD));
        assert!(!is_leading_code_point(0x1FFFE));
        assert!(!is_continuation_code_point(0x10FFFF));
        assert!(!is_continuation_code_point(u32::MAX));
    }
}
