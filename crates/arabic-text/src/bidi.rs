//! Bidirectional run splitting
//!
//! A reduced form of the Unicode bidi algorithm that covers document strings:
//! one paragraph level, strong RTL/LTR characters, digits rendered left to
//! right, and neutrals resolved from their neighbours.

use crate::script::{is_rtl_char, is_strong_ltr};

/// Writing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        self == Direction::Rtl
    }
}

/// A maximal substring with one resolved direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidiRun {
    pub text: String,
    pub direction: Direction,
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || matches!(c as u32, 0x0660..=0x0669 | 0x06F0..=0x06F9)
}

/// Direction a character asserts on its own; None for neutrals
fn strong_direction(c: char) -> Option<Direction> {
    if is_digit(c) || is_strong_ltr(c) {
        Some(Direction::Ltr)
    } else if is_rtl_char(c) && !c.is_whitespace() && !c.is_ascii_punctuation() {
        Some(Direction::Rtl)
    } else {
        None
    }
}

/// Split text into runs in logical order
///
/// A neutral character takes the direction of the surrounding strong
/// characters when both sides agree, otherwise the paragraph direction.
/// The start and end of the text count as the paragraph direction.
pub fn split_runs(text: &str, paragraph: Direction) -> Vec<BidiRun> {
    let chars: Vec<char> = text.chars().collect();
    let classes: Vec<Option<Direction>> = chars.iter().map(|&c| strong_direction(c)).collect();

    let mut resolved = Vec::with_capacity(chars.len());
    for (i, class) in classes.iter().enumerate() {
        let direction = match class {
            Some(direction) => *direction,
            None => {
                let before = classes[..i]
                    .iter()
                    .rev()
                    .find_map(|c| *c)
                    .unwrap_or(paragraph);
                let after = classes[i + 1..]
                    .iter()
                    .find_map(|c| *c)
                    .unwrap_or(paragraph);
                if before == after {
                    before
                } else {
                    paragraph
                }
            }
        };
        resolved.push(direction);
    }

    let mut runs: Vec<BidiRun> = Vec::new();
    for (c, direction) in chars.into_iter().zip(resolved) {
        match runs.last_mut() {
            Some(run) if run.direction == direction => run.text.push(c),
            _ => runs.push(BidiRun {
                text: c.to_string(),
                direction,
            }),
        }
    }

    runs
}

/// Split text into runs in visual (left-to-right drawing) order
///
/// Runs of an RTL paragraph are drawn from the right edge leftwards, so their
/// order is reversed; the characters inside each run stay in logical order for
/// the shaper to reorder.
pub fn visual_runs(text: &str, paragraph: Direction) -> Vec<BidiRun> {
    let mut runs = split_runs(text, paragraph);
    if paragraph.is_rtl() {
        runs.reverse();
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(text: &str, direction: Direction) -> BidiRun {
        BidiRun {
            text: text.to_string(),
            direction,
        }
    }

    #[test]
    fn test_pure_latin() {
        assert_eq!(
            split_runs("Invoice 42", Direction::Ltr),
            vec![run("Invoice 42", Direction::Ltr)]
        );
    }

    #[test]
    fn test_pure_arabic() {
        assert_eq!(
            split_runs("فاتورة ضريبية", Direction::Rtl),
            vec![run("فاتورة ضريبية", Direction::Rtl)]
        );
    }

    #[test]
    fn test_mixed_in_rtl_paragraph() {
        let runs = split_runs("فاتورة INV-7", Direction::Rtl);
        assert_eq!(
            runs,
            vec![run("فاتورة ", Direction::Rtl), run("INV-7", Direction::Ltr)]
        );

        let visual = visual_runs("فاتورة INV-7", Direction::Rtl);
        assert_eq!(visual[0].text, "INV-7");
        assert_eq!(visual[1].text, "فاتورة ");
    }

    #[test]
    fn test_number_separators_stay_in_number() {
        let runs = split_runs("المجموع 1,234.50", Direction::Rtl);
        assert_eq!(runs.last().unwrap(), &run("1,234.50", Direction::Ltr));
    }

    #[test]
    fn test_arabic_name_in_ltr_paragraph() {
        let runs = visual_runs("Customer: شركة النور", Direction::Ltr);
        assert_eq!(
            runs,
            vec![
                run("Customer: ", Direction::Ltr),
                run("شركة النور", Direction::Rtl)
            ]
        );
    }

    #[test]
    fn test_trailing_neutral_takes_paragraph() {
        let runs = split_runs("abc.", Direction::Rtl);
        assert_eq!(
            runs,
            vec![run("abc", Direction::Ltr), run(".", Direction::Rtl)]
        );
    }

    #[test]
    fn test_empty() {
        assert!(split_runs("", Direction::Rtl).is_empty());
    }
}
