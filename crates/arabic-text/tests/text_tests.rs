//! Integration tests for arabic-text

use arabic_text::{
    contains_rtl, format_currency, format_date, visual_runs, Direction, Language, Shaper,
};
use pretty_assertions::assert_eq;

#[test]
fn test_invoice_title_visual_order() {
    // "Invoice INV-2025-001" in Arabic: the number is drawn left of the word
    let runs = visual_runs("فاتورة INV-2025-001", Direction::Rtl);
    let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["INV-2025-001", "فاتورة "]);
    assert_eq!(runs[0].direction, Direction::Ltr);
    assert_eq!(runs[1].direction, Direction::Rtl);
}

#[test]
fn test_ltr_paragraph_keeps_logical_order() {
    let runs = visual_runs("Seller شركة 42", Direction::Ltr);
    let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Seller ", "شركة", " 42"]);
}

#[test]
fn test_amounts_for_both_languages() {
    assert_eq!(format_currency(115.0, Language::En, "SAR"), "SAR 115.00");
    assert_eq!(format_currency(115.0, Language::Ar, "SAR"), "115.00 ر.س");
    assert!(contains_rtl(&format_currency(1.0, Language::Ar, "SAR")));
}

#[test]
fn test_dates_for_both_languages() {
    assert_eq!(format_date("2025-06-30", Language::En), "30 Jun 2025");
    assert_eq!(format_date("2025-06-30", Language::Ar), "30 يونيو 2025");
}

#[test]
fn test_shaper_needs_a_real_font() {
    assert!(Shaper::new(b"not a font").is_err());
}
