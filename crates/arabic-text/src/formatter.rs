//! Number, currency, and date formatting for English and Arabic documents
//!
//! Arabic output keeps western digits; the PDF text path shapes Arabic letters
//! but numbers stay left-to-right runs either way.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Document language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// Parse a language code; anything starting with `ar` is Arabic, the rest English
    pub fn from_code(code: &str) -> Self {
        if code.trim().to_ascii_lowercase().starts_with("ar") {
            Language::Ar
        } else {
            Language::En
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Language::Ar
    }
}

/// English month names (short)
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Arabic month names (Gregorian, as used in the Gulf)
const MONTHS_AR: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// Arabic currency symbols for the common Gulf/Levant codes
fn arabic_currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "SAR" => Some("ر.س"),
        "AED" => Some("د.إ"),
        "KWD" => Some("د.ك"),
        "QAR" => Some("ر.ق"),
        "BHD" => Some("د.ب"),
        "OMR" => Some("ر.ع"),
        "EGP" => Some("ج.م"),
        "JOD" => Some("د.أ"),
        _ => None,
    }
}

/// Format a number with thousands separators and a fixed number of decimals
pub fn format_number(n: f64, decimals: u8) -> String {
    let pattern = if decimals == 0 {
        "#,###".to_string()
    } else {
        format!("#,###.{}", "0".repeat(decimals as usize))
    };
    render_float(&pattern, n)
}

/// Format a money amount
///
/// English puts the ISO code first (`SAR 1,234.50`); Arabic puts the local
/// symbol after the amount (`1,234.50 ر.س`). An empty code yields the bare amount.
pub fn format_currency(amount: f64, language: Language, currency: &str) -> String {
    let value = format_number(amount, 2);
    let code = currency.trim().to_ascii_uppercase();
    if code.is_empty() {
        return value;
    }
    match language {
        Language::En => format!("{code} {value}"),
        Language::Ar => {
            let symbol = arabic_currency_symbol(&code).unwrap_or(code.as_str());
            format!("{value} {symbol}")
        }
    }
}

/// Parse the date part of an ISO-8601 date or timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    value
        .get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Format a date for display (`15 Jan 2025` / `15 يناير 2025`)
///
/// Unparsable input is returned trimmed so that the document still shows
/// whatever the record carried.
pub fn format_date(value: &str, language: Language) -> String {
    use chrono::Datelike;

    let Some(date) = parse_date(value) else {
        return value.trim().to_string();
    };
    let month_idx = date.month0() as usize;
    let month = match language {
        Language::En => MONTHS_EN[month_idx],
        Language::Ar => MONTHS_AR[month_idx],
    };
    format!("{} {} {}", date.day(), month, date.year())
}

/// Format a timestamp with its time of day (`15 Jan 2025 14:05`)
pub fn format_date_time(value: &NaiveDateTime, language: Language) -> String {
    let date = format_date(&value.date().format("%Y-%m-%d").to_string(), language);
    format!("{date} {}", value.format("%H:%M"))
}

/// Render a float according to a pattern like `#,###.00`
///
/// The number of `0`/`#` after the last separator sets the precision; a `,`
/// before it turns on thousands grouping. An empty pattern means `#,###.00`.
pub fn render_float(format: &str, n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let (precision, thousand_sep) = parse_format(format);
    let width = precision as usize;

    let multiplier = 10_f64.powi(precision as i32);
    let raw = (n.abs() * multiplier).round();
    if raw >= i64::MAX as f64 || multiplier >= i64::MAX as f64 {
        // beyond integer range: let the float formatter produce the digits
        let text = format!("{:.width$}", n.abs());
        let (int_digits, frac_digits) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let int_str = format_with_thousands(int_digits, thousand_sep);
        let sign = if n < 0.0 { "-" } else { "" };
        return if precision > 0 {
            format!("{sign}{int_str}.{frac_digits}")
        } else {
            format!("{sign}{int_str}")
        };
    }

    let scaled = raw as i64;
    let int_part = scaled / multiplier as i64;
    let frac_part = scaled % multiplier as i64;

    let int_str = format_with_thousands(&int_part.to_string(), thousand_sep);
    let sign = if n < 0.0 && scaled != 0 { "-" } else { "" };

    if precision > 0 {
        format!("{sign}{int_str}.{frac_part:0>width$}")
    } else {
        format!("{sign}{int_str}")
    }
}

/// Parse format pattern into (precision, thousands separator)
fn parse_format(format: &str) -> (u8, Option<char>) {
    if format.is_empty() {
        return (2, Some(','));
    }

    let decimal_pos = format.rfind('.');
    let precision = decimal_pos
        .map(|pos| {
            format[pos + 1..]
                .chars()
                .filter(|c| *c == '#' || *c == '0')
                .count() as u8
        })
        .unwrap_or(0);

    let int_pattern = decimal_pos.map(|pos| &format[..pos]).unwrap_or(format);
    let thousand_sep = int_pattern.contains(',').then_some(',');

    (precision, thousand_sep)
}

/// Group a run of integer digits with thousand separators
fn format_with_thousands(s: &str, sep: Option<char>) -> String {
    let Some(sep) = sep else {
        return s.to_string();
    };

    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::from_code("ar"), Language::Ar);
        assert_eq!(Language::from_code("ar-SA"), Language::Ar);
        assert_eq!(Language::from_code("en"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
        assert_eq!(Language::from_code("fr"), Language::En);
        assert!(Language::Ar.is_rtl());
    }

    #[test]
    fn test_render_float() {
        assert_eq!(render_float("#,###.00", 1234567.891), "1,234,567.89");
        assert_eq!(render_float("#,###", 1234567.891), "1,234,568");
        assert_eq!(render_float("###.0", 1234.56), "1234.6");
        assert_eq!(render_float("", 0.5), "0.50");
        assert_eq!(render_float("#,###.00", -12.346), "-12.35");
        assert_eq!(render_float("#,###.00", -0.001), "0.00");
        assert_eq!(render_float("#,###.00", 999.999), "1,000.00");
    }

    #[test]
    fn test_render_float_special_values() {
        assert_eq!(render_float("", f64::NAN), "NaN");
        assert_eq!(render_float("", f64::INFINITY), "Infinity");
        assert_eq!(render_float("", f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_render_float_beyond_integer_range() {
        assert_eq!(
            render_float("#,###", 1e20),
            "100,000,000,000,000,000,000"
        );
        assert_eq!(
            format_number(-1e20, 2),
            "-100,000,000,000,000,000,000.00"
        );
        assert_eq!(render_float("###", 1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0, 2), "100.00");
        assert_eq!(format_number(1500.0, 0), "1,500");
        assert_eq!(format_number(15.0, 1), "15.0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(115.0, Language::En, "SAR"), "SAR 115.00");
        assert_eq!(format_currency(115.0, Language::Ar, "sar"), "115.00 ر.س");
        assert_eq!(format_currency(115.0, Language::Ar, "USD"), "115.00 USD");
        assert_eq!(format_currency(115.0, Language::En, ""), "115.00");
    }

    #[test]
    fn test_parse_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15);
        assert_eq!(parse_date("2025-01-15"), expected);
        assert_eq!(parse_date("2025-01-15T10:30:00Z"), expected);
        assert_eq!(parse_date("2025-01-15T10:30:00.123"), expected);
        assert_eq!(parse_date("2025-01-15 extra"), expected);
        assert_eq!(parse_date("15/01/2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-01-15", Language::En), "15 Jan 2025");
        assert_eq!(format_date("2025-03-01", Language::Ar), "1 مارس 2025");
        assert_eq!(format_date(" soon ", Language::En), "soon");
        assert_eq!(format_date("", Language::Ar), "");
    }

    #[test]
    fn test_format_date_time() {
        let dt = NaiveDate::from_ymd_opt(2025, 12, 31)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(format_date_time(&dt, Language::En), "31 Dec 2025 09:05");
    }
}
