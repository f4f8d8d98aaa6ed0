use crate::units::Pt;

const TABSIZE: usize = 4;

/// Horizontal alignment of each line inside a text cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Replace tabs with spaces and all line ending styles with `\n`
pub fn normalize_text(text: &str) -> String {
    text.replace('\t', &" ".repeat(TABSIZE))
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Breaks `text` into lines no wider than `max_width`.
///
/// Explicit line breaks always start a new line, and an empty line in the
/// input stays an empty line in the output. Within a line, words are kept
/// whole and separated by single spaces; runs of spaces collapse. A word that
/// is wider than `max_width` on its own is broken between characters, but a
/// line always holds at least one character so layout always makes progress.
///
/// `measure` returns the rendered width of a string, which lets the same
/// wrapping drive real font metrics and fixed-width test fonts alike.
pub fn wrap_lines<F>(text: &str, max_width: Pt, measure: F) -> Vec<String>
where
    F: Fn(&str) -> Pt,
{
    let text = normalize_text(text);
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            if !line.is_empty() {
                let candidate = format!("{line} {word}");
                if measure(&candidate) <= max_width {
                    line = candidate;
                    continue;
                }
                lines.push(std::mem::take(&mut line));
            }

            if measure(word) <= max_width {
                line.push_str(word);
                continue;
            }

            // no whitespace to break at, so split the word itself
            for ch in word.chars() {
                line.push(ch);
                if line.chars().count() > 1 && measure(&line) > max_width {
                    line.pop();
                    lines.push(std::mem::take(&mut line));
                    line.push(ch);
                }
            }
        }

        lines.push(line);
    }

    lines
}

/// How far from the left edge of a cell a line of `line_width` starts,
/// given `padding` on both sides of the cell
pub fn align_offset(align: Align, line_width: Pt, cell_width: Pt, padding: Pt) -> Pt {
    match align {
        Align::Left => padding,
        Align::Center => (cell_width - line_width) / 2.0,
        Align::Right => cell_width - padding - line_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// every character is one point wide
    fn mono(s: &str) -> Pt {
        Pt(s.chars().count() as f32)
    }

    #[test]
    fn keeps_explicit_breaks() {
        let lines = wrap_lines("Jane Doe\n\n123 Main St", Pt(20.0), mono);
        assert_eq!(lines, vec!["Jane Doe", "", "123 Main St"]);
    }

    #[test]
    fn normalizes_line_endings() {
        let lines = wrap_lines("a\r\nb\rc", Pt(20.0), mono);
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn wraps_at_whitespace() {
        let lines = wrap_lines("the quick brown fox", Pt(10.0), mono);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn collapses_runs_of_spaces() {
        let lines = wrap_lines("a    b", Pt(10.0), mono);
        assert_eq!(lines, vec!["a b"]);
    }

    #[test]
    fn splits_words_wider_than_the_cell() {
        let lines = wrap_lines("abcdefgh ij", Pt(3.0), mono);
        assert_eq!(lines, vec!["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn always_places_one_character() {
        let lines = wrap_lines("ab", Pt(0.5), mono);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn wraps_generated_prose_within_width() {
        let text = lipsum::lipsum(40);
        for line in wrap_lines(&text, Pt(30.0), mono) {
            assert!(mono(&line) <= Pt(30.0) || !line.contains(' '), "{line}");
        }
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(align_offset(Align::Left, Pt(4.0), Pt(10.0), Pt(1.0)), Pt(1.0));
        assert_eq!(align_offset(Align::Center, Pt(4.0), Pt(10.0), Pt(1.0)), Pt(3.0));
        assert_eq!(align_offset(Align::Right, Pt(4.0), Pt(10.0), Pt(1.0)), Pt(5.0));
    }
}
