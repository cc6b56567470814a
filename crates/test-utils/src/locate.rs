// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Occurrence locators for test sources
//!
//! Tests address identifiers by text ("the 2nd `count`"), and these helpers
//! convert that into the `(file, line, column)` points the engine queries
//! with. Matching is whole-identifier: `count` does not match inside
//! `counter`.

use javalens_core::Occurrence;

/// The occurrence of the first whole-identifier match of `needle`
///
/// # Panics
///
/// Panics when the needle does not occur; tests should fail loudly on a
/// stale fixture.
pub fn occurrence_of(path: &str, source: &str, needle: &str) -> Occurrence {
    occurrence_of_nth(path, source, needle, 1)
}

/// The occurrence of the nth (1-based) whole-identifier match of `needle`
///
/// # Panics
///
/// Panics when there are fewer than `nth` matches.
pub fn occurrence_of_nth(path: &str, source: &str, needle: &str, nth: usize) -> Occurrence {
    assert!(nth >= 1, "occurrences are 1-based");
    let mut seen = 0usize;

    for (line_no, line) in source.lines().enumerate() {
        let mut search_from = 0usize;
        while let Some(found) = line[search_from..].find(needle) {
            let column = search_from + found;
            if is_whole_identifier(line, column, needle.len()) {
                seen += 1;
                if seen == nth {
                    return Occurrence::new(path, line_no as u32, column as u32);
                }
            }
            search_from = column + needle.len().max(1);
        }
    }

    panic!("needle '{needle}' (#{nth}) not found in {path}; saw {seen} matches");
}

/// Whether `line[column..column+len]` is bounded by non-identifier chars
fn is_whole_identifier(line: &str, column: usize, len: usize) -> bool {
    let before = line[..column].chars().next_back();
    let after = line[column + len..].chars().next();
    !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence() {
        let source = "class A {\n    int count;\n}\n";
        let occ = occurrence_of("A.java", source, "count");
        assert_eq!((occ.line, occ.column), (1, 8));
    }

    #[test]
    fn test_nth_occurrence_skips_earlier_ones() {
        let source = "int a = 0;\nint b = a + a;\n";
        let occ = occurrence_of_nth("A.java", source, "a", 3);
        assert_eq!((occ.line, occ.column), (1, 12));
    }

    #[test]
    fn test_whole_identifier_matching() {
        let source = "int counter = 0;\nint count = counter;\n";
        let occ = occurrence_of("A.java", source, "count");
        assert_eq!((occ.line, occ.column), (1, 4));
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn test_missing_needle_panics() {
        occurrence_of("A.java", "class A {}", "missing");
    }
}
