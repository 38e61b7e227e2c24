//! Display formatting for amounts, percentages and ratios.

use finsight_common::Locale;

/// Headers of the derived table, in column order.
pub fn column_headers(locale: Locale) -> [&'static str; 6] {
    match locale {
        Locale::En => [
            "Item",
            "Prior period",
            "Current period",
            "Growth (%)",
            "Prior period share (%)",
            "Current period share (%)",
        ],
        Locale::Vi => [
            "Chỉ tiêu",
            "Năm trước",
            "Năm sau",
            "Tốc độ tăng trưởng (%)",
            "Tỷ trọng Năm trước (%)",
            "Tỷ trọng Năm sau (%)",
        ],
    }
}

/// `1234567.4` → `"1,234,567"`.
pub fn amount(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let digits = format!("{:.0}", v.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if v < 0.0 && digits != "0" {
        out.insert(0, '-');
    }
    out
}

/// `12.3456` → `"12.35%"`.
pub fn percent(v: f64) -> String {
    format!("{v:.2}%")
}

pub fn ratio(v: f64) -> String {
    format!("{v:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_groups_thousands() {
        assert_eq!(amount(0.0), "0");
        assert_eq!(amount(999.0), "999");
        assert_eq!(amount(1000.0), "1,000");
        assert_eq!(amount(1234567.4), "1,234,567");
        assert_eq!(amount(-98765.0), "-98,765");
        assert_eq!(amount(-0.2), "0");
    }

    #[test]
    fn test_percent_two_decimals() {
        assert_eq!(percent(200.0), "200.00%");
        assert_eq!(percent(-3.14159), "-3.14%");
    }
}
