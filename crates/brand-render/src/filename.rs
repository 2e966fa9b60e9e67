//! Artifact file naming

const FORBIDDEN: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// `identifier` made safe for a file system, with a `.pdf` suffix
///
/// Forbidden characters are removed, whitespace runs become a single `_`;
/// nothing usable left yields `document.pdf`.
pub fn artifact_filename(identifier: &str) -> String {
    let cleaned: String = identifier.chars().filter(|c| !FORBIDDEN.contains(c)).collect();
    let stem = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        "document.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitizes_identifier() {
        assert_eq!(artifact_filename("INV/2025:001"), "INV2025001.pdf");
        assert_eq!(artifact_filename("  Tower  B \t phase 2 "), "Tower_B_phase_2.pdf");
        assert_eq!(artifact_filename(r#"a*b?c"d<e>f|g\h"#), "abcdefgh.pdf");
    }

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(artifact_filename(""), "document.pdf");
        assert_eq!(artifact_filename(" / : "), "document.pdf");
    }

    #[test]
    fn test_keeps_arabic() {
        assert_eq!(artifact_filename("فاتورة 12"), "فاتورة_12.pdf");
    }
}
