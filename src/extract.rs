//! Slicing a resolved extent out of a file and rendering it.

use std::fmt::Write as _;

use crate::types::Extent;

/// The rendered text of an extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Trimmed non-blank lines, in file order.
    pub non_blank_lines: Vec<String>,
    /// `<line>: <text>` per line, right-trimmed, newline-joined.
    pub numbered_source: String,
}

/// Render lines `extent.start..=extent.end` (one-based) of `lines`.
///
/// # Panics
///
/// Panics if the extent is empty or falls outside `lines`; resolvers only
/// produce extents inside the file they were given.
pub fn extract(lines: &[String], extent: Extent) -> Snippet {
    assert!(
        extent.fits(lines.len()),
        "extent {}..={} outside file of {} lines",
        extent.start,
        extent.end,
        lines.len()
    );

    let slice = lines
        .get(extent.start.saturating_sub(1)..extent.end)
        .unwrap_or_default();

    let mut numbered_source = String::new();
    for (line_number, line) in (extent.start..).zip(slice) {
        if !numbered_source.is_empty() {
            numbered_source.push('\n');
        }
        let _ = write!(numbered_source, "{line_number}: {}", line.trim_end());
    }

    let non_blank_lines = slice
        .iter()
        .map(|line| return line.trim())
        .filter(|line| return !line.is_empty())
        .map(String::from)
        .collect();

    return Snippet { non_blank_lines, numbered_source };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        return text.lines().map(String::from).collect();
    }

    #[test]
    fn numbers_from_true_start_line() {
        let mut text = "\n".repeat(9);
        text.push_str("int add(int a, int b) { return a + b; }\n");
        let snippet = extract(&lines(&text), Extent::new(10, 10));

        assert_eq!(snippet.numbered_source, "10: int add(int a, int b) { return a + b; }");
        assert_eq!(snippet.non_blank_lines, ["int add(int a, int b) { return a + b; }"]);
    }

    #[test]
    fn keeps_blank_lines_in_numbered_source_only() {
        let text = "int f(void)\n{\n\n    return 0;   \n}\n";
        let snippet = extract(&lines(text), Extent::new(1, 5));

        assert_eq!(
            snippet.numbered_source,
            "1: int f(void)\n2: {\n3: \n4:     return 0;\n5: }"
        );
        assert_eq!(snippet.non_blank_lines, ["int f(void)", "{", "return 0;", "}"]);
    }

    #[test]
    fn one_numbered_line_per_extent_line() {
        let text = "a\nb\nc\nd\n";
        let snippet = extract(&lines(text), Extent::new(2, 3));
        assert_eq!(snippet.numbered_source.lines().count(), 2);
        assert_eq!(snippet.numbered_source, "2: b\n3: c");
    }

    #[test]
    #[should_panic(expected = "outside file")]
    fn extent_past_end_is_a_contract_violation() {
        let _ = extract(&lines("a\nb\n"), Extent::new(2, 3));
    }
}
