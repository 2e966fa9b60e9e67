//! Script detection

/// Whether a character belongs to a right-to-left script block
///
/// Covers Hebrew, Arabic, Syriac, Thaana, NKo, Samaritan, Mandaic, the Arabic
/// presentation forms and the Arabic mathematical symbols block.
pub fn is_rtl_char(c: char) -> bool {
    matches!(
        c as u32,
        0x0590..=0x08FF | 0xFB1D..=0xFDFF | 0xFE70..=0xFEFF | 0x1EE00..=0x1EEFF
    )
}

/// Whether any character of the text is right-to-left
pub fn contains_rtl(text: &str) -> bool {
    text.chars().any(is_rtl_char)
}

/// Latin letters and other strong left-to-right characters
pub(crate) fn is_strong_ltr(c: char) -> bool {
    c.is_alphabetic() && !is_rtl_char(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_rtl_char() {
        assert!(is_rtl_char('ب'));
        assert!(is_rtl_char('א'));
        assert!(is_rtl_char('\u{FEFB}')); // lam-alef ligature form
        assert!(!is_rtl_char('a'));
        assert!(!is_rtl_char('1'));
        assert!(!is_rtl_char(' '));
    }

    #[test]
    fn test_arabic_indic_digits_are_rtl_block() {
        assert!(is_rtl_char('٣'));
    }

    #[test]
    fn test_is_strong_ltr() {
        assert!(is_strong_ltr('Z'));
        assert!(is_strong_ltr('é'));
        assert!(!is_strong_ltr('7'));
        assert!(!is_strong_ltr('م'));
        assert!(!is_strong_ltr('-'));
    }
}
