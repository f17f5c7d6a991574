//! Currency catalog and display formatting.

use serde::{Deserialize, Serialize};

/// A display currency. `code` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub name: String,
    pub country: String,
    pub flag: String,
}

/// Compiled-in catalog row. Converted to an owned [`Currency`] on demand.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub flag: &'static str,
}

impl CatalogEntry {
    pub fn to_currency(&self) -> Currency {
        Currency {
            code: self.code.to_string(),
            symbol: self.symbol.to_string(),
            name: self.name.to_string(),
            country: self.country.to_string(),
            flag: self.flag.to_string(),
        }
    }
}

const fn entry(
    code: &'static str,
    symbol: &'static str,
    name: &'static str,
    country: &'static str,
    flag: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        code,
        symbol,
        name,
        country,
        flag,
    }
}

/// The fixed catalog. The first entry is the default selection.
pub static CATALOG: [CatalogEntry; 20] = [
    entry("USD", "$", "US Dollar", "United States", "🇺🇸"),
    entry("ZAR", "R", "South African Rand", "South Africa", "🇿🇦"),
    entry("EUR", "€", "Euro", "European Union", "🇪🇺"),
    entry("GBP", "£", "British Pound", "United Kingdom", "🇬🇧"),
    entry("JPY", "¥", "Japanese Yen", "Japan", "🇯🇵"),
    entry("CNY", "¥", "Chinese Yuan", "China", "🇨🇳"),
    entry("INR", "₹", "Indian Rupee", "India", "🇮🇳"),
    entry("AUD", "A$", "Australian Dollar", "Australia", "🇦🇺"),
    entry("CAD", "C$", "Canadian Dollar", "Canada", "🇨🇦"),
    entry("CHF", "Fr", "Swiss Franc", "Switzerland", "🇨🇭"),
    entry("BRL", "R$", "Brazilian Real", "Brazil", "🇧🇷"),
    entry("MXN", "$", "Mexican Peso", "Mexico", "🇲🇽"),
    entry("NGN", "₦", "Nigerian Naira", "Nigeria", "🇳🇬"),
    entry("KES", "KSh", "Kenyan Shilling", "Kenya", "🇰🇪"),
    entry("EGP", "E£", "Egyptian Pound", "Egypt", "🇪🇬"),
    entry("AED", "د.إ", "UAE Dirham", "United Arab Emirates", "🇦🇪"),
    entry("SAR", "﷼", "Saudi Riyal", "Saudi Arabia", "🇸🇦"),
    entry("SGD", "S$", "Singapore Dollar", "Singapore", "🇸🇬"),
    entry("HKD", "HK$", "Hong Kong Dollar", "Hong Kong", "🇭🇰"),
    entry("NZD", "NZ$", "New Zealand Dollar", "New Zealand", "🇳🇿"),
];

pub fn default_currency() -> Currency {
    CATALOG[0].to_currency()
}

/// Case-insensitive catalog lookup by code.
pub fn find_by_code(code: &str) -> Option<Currency> {
    CATALOG
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
        .map(CatalogEntry::to_currency)
}

/// Renders `amount` with exactly two decimals and comma thousands grouping.
///
/// The grouping convention is the same for every currency. Non-finite input
/// renders as `NaN`, `∞` or `-∞`.
pub fn format_grouped(amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.2}", round_half_away(amount.abs()));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // never render "-0.00"
    let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Rounds an exact tie at the third decimal upward, so `{:.2}` does not
/// round it to even. Only odd multiples of 1/8 are exact ties in binary.
fn round_half_away(abs: f64) -> f64 {
    let eighths = abs * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        (abs * 100.0 + 0.5).floor() / 100.0
    } else {
        abs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_codes_are_unique() {
        let codes: HashSet<_> = CATALOG.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), CATALOG.len());
    }

    #[test]
    fn test_default_currency_is_usd() {
        let usd = default_currency();
        assert_eq!(usd.code, "USD");
        assert_eq!(usd.symbol, "$");
    }

    #[test]
    fn test_find_by_code() {
        let zar = find_by_code("zar").expect("ZAR should be in the catalog");
        assert_eq!(zar.symbol, "R");
        assert_eq!(zar.country, "South Africa");
        assert!(find_by_code("XYZ").is_none());
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(1234.5), "1,234.50");
        assert_eq!(format_grouped(0.0), "0.00");
        assert_eq!(format_grouped(999.999), "1,000.00");
        assert_eq!(format_grouped(1_234_567.891), "1,234,567.89");
        assert_eq!(format_grouped(100.0), "100.00");
        assert_eq!(format_grouped(-9876.5), "-9,876.50");
        assert_eq!(format_grouped(-0.001), "0.00");
    }

    #[test]
    fn test_format_grouped_ties_round_away_from_zero() {
        assert_eq!(format_grouped(0.125), "0.13");
        assert_eq!(format_grouped(0.375), "0.38");
        assert_eq!(format_grouped(2.625), "2.63");
        assert_eq!(format_grouped(-1_000.125), "-1,000.13");
        // not an exact tie in binary
        assert_eq!(format_grouped(1.005), "1.00");
        assert_eq!(format_grouped(0.5), "0.50");
    }

    #[test]
    fn test_format_grouped_non_finite() {
        assert_eq!(format_grouped(f64::NAN), "NaN");
        assert_eq!(format_grouped(f64::INFINITY), "∞");
        assert_eq!(format_grouped(f64::NEG_INFINITY), "-∞");
    }
}
