//! Progressive income tax over per-country bracket tables.
//!
//! Tables are simplified single-filer schedules. Each bracket carries the
//! tax already owed on all income below its lower bound, so the tax for an
//! income is found from the one bracket containing it.

use super::CalcError;
use crate::core::input::{InputPolicy, parse_non_negative};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    pub min: f64,
    /// `None` marks the unbounded top bracket.
    pub max: Option<f64>,
    pub rate: f64,
    /// Cumulative tax on income below `min`.
    pub fixed: f64,
}

impl TaxBracket {
    pub fn contains(&self, taxable: f64) -> bool {
        self.max.is_none_or(|max| taxable <= max)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Jurisdiction {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub currency: &'static str,
    pub standard_deduction: Option<f64>,
    pub brackets: &'static [TaxBracket],
}

const fn bracket(min: f64, max: Option<f64>, rate: f64, fixed: f64) -> TaxBracket {
    TaxBracket {
        min,
        max,
        rate,
        fixed,
    }
}

pub static JURISDICTIONS: [Jurisdiction; 6] = [
    Jurisdiction {
        code: "ZA",
        name: "South Africa",
        flag: "🇿🇦",
        currency: "ZAR",
        standard_deduction: None,
        brackets: &[
            bracket(0.0, Some(237_100.0), 0.18, 0.0),
            bracket(237_101.0, Some(370_500.0), 0.26, 42_678.0),
            bracket(370_501.0, Some(512_800.0), 0.31, 77_362.0),
            bracket(512_801.0, Some(673_000.0), 0.36, 121_475.0),
            bracket(673_001.0, Some(857_900.0), 0.39, 179_147.0),
            bracket(857_901.0, Some(1_817_000.0), 0.41, 251_258.0),
            bracket(1_817_001.0, None, 0.45, 644_489.0),
        ],
    },
    Jurisdiction {
        code: "US",
        name: "United States",
        flag: "🇺🇸",
        currency: "USD",
        standard_deduction: Some(13_850.0),
        brackets: &[
            bracket(0.0, Some(11_000.0), 0.10, 0.0),
            bracket(11_001.0, Some(44_725.0), 0.12, 1_100.0),
            bracket(44_726.0, Some(95_375.0), 0.22, 5_147.0),
            bracket(95_376.0, Some(182_100.0), 0.24, 16_290.0),
            bracket(182_101.0, Some(231_250.0), 0.32, 37_104.0),
            bracket(231_251.0, Some(578_125.0), 0.35, 52_832.0),
            bracket(578_126.0, None, 0.37, 174_238.0),
        ],
    },
    Jurisdiction {
        code: "GB",
        name: "United Kingdom",
        flag: "🇬🇧",
        currency: "GBP",
        standard_deduction: Some(12_570.0),
        brackets: &[
            bracket(0.0, Some(12_570.0), 0.0, 0.0),
            bracket(12_571.0, Some(50_270.0), 0.20, 0.0),
            bracket(50_271.0, Some(125_140.0), 0.40, 7_540.0),
            bracket(125_141.0, None, 0.45, 37_488.0),
        ],
    },
    Jurisdiction {
        code: "CA",
        name: "Canada",
        flag: "🇨🇦",
        currency: "CAD",
        standard_deduction: Some(15_000.0),
        brackets: &[
            bracket(0.0, Some(53_359.0), 0.15, 0.0),
            bracket(53_360.0, Some(106_717.0), 0.205, 8_004.0),
            bracket(106_718.0, Some(165_430.0), 0.26, 18_942.0),
            bracket(165_431.0, Some(235_675.0), 0.29, 34_207.0),
            bracket(235_676.0, None, 0.33, 54_578.0),
        ],
    },
    Jurisdiction {
        code: "AU",
        name: "Australia",
        flag: "🇦🇺",
        currency: "AUD",
        standard_deduction: None,
        brackets: &[
            bracket(0.0, Some(18_200.0), 0.0, 0.0),
            bracket(18_201.0, Some(45_000.0), 0.19, 0.0),
            bracket(45_001.0, Some(120_000.0), 0.325, 5_092.0),
            bracket(120_001.0, Some(180_000.0), 0.37, 29_467.0),
            bracket(180_001.0, None, 0.45, 51_667.0),
        ],
    },
    Jurisdiction {
        code: "IN",
        name: "India",
        flag: "🇮🇳",
        currency: "INR",
        standard_deduction: Some(50_000.0),
        brackets: &[
            bracket(0.0, Some(250_000.0), 0.0, 0.0),
            bracket(250_001.0, Some(500_000.0), 0.05, 0.0),
            bracket(500_001.0, Some(1_000_000.0), 0.20, 12_500.0),
            bracket(1_000_001.0, None, 0.30, 112_500.0),
        ],
    },
];

/// Case-insensitive lookup by country code.
pub fn jurisdiction(code: &str) -> Result<&'static Jurisdiction, CalcError> {
    JURISDICTIONS
        .iter()
        .find(|j| j.code.eq_ignore_ascii_case(code.trim()))
        .ok_or_else(|| CalcError::UnknownJurisdiction(code.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxAssessment {
    pub income: f64,
    pub taxable_income: f64,
    pub tax_owed: f64,
    /// Percent of gross income.
    pub effective_rate: f64,
    pub after_tax_income: f64,
    /// Bracket the taxable income fell in; `None` when nothing is taxable.
    pub marginal: Option<TaxBracket>,
}

pub fn income_tax(income: f64, jurisdiction: &Jurisdiction) -> TaxAssessment {
    let taxable = income - jurisdiction.standard_deduction.unwrap_or(0.0);

    if taxable <= 0.0 {
        return TaxAssessment {
            income,
            taxable_income: taxable.max(0.0),
            tax_owed: 0.0,
            effective_rate: 0.0,
            after_tax_income: income,
            marginal: None,
        };
    }

    let marginal = jurisdiction
        .brackets
        .iter()
        .find(|b| b.contains(taxable))
        .copied();
    // Incomes between one bracket's max and the next min owe the next bracket's fixed part.
    let tax_owed = marginal.map_or(0.0, |b| b.fixed + (taxable - b.min).max(0.0) * b.rate);
    debug!(
        country = jurisdiction.code,
        taxable,
        tax_owed,
        "assessed income tax"
    );

    TaxAssessment {
        income,
        taxable_income: taxable,
        tax_owed,
        effective_rate: tax_owed / income * 100.0,
        after_tax_income: income - tax_owed,
        marginal,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxInputs {
    pub country: String,
    pub income: String,
}

impl Default for TaxInputs {
    fn default() -> Self {
        Self {
            country: "ZA".to_string(),
            income: "500000".to_string(),
        }
    }
}

impl TaxInputs {
    pub fn evaluate(&self, policy: InputPolicy) -> Result<TaxAssessment, CalcError> {
        let jurisdiction = jurisdiction(&self.country)?;
        let income = parse_non_negative("annual income", &self.income, policy)?;
        Ok(income_tax(income, jurisdiction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-2,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_south_africa_third_bracket() {
        let za = jurisdiction("ZA").unwrap();
        let result = income_tax(500_000.0, za);

        let marginal = result.marginal.unwrap();
        assert_eq!(marginal.min, 370_501.0);
        assert_eq!(marginal.max, Some(512_800.0));
        assert_eq!(marginal.rate, 0.31);
        assert_eq!(marginal.fixed, 77_362.0);

        assert_close(result.tax_owed, 77_362.0 + (500_000.0 - 370_501.0) * 0.31);
        assert_close(result.tax_owed, 117_506.69);
        assert_close(result.effective_rate, 117_506.69 / 500_000.0 * 100.0);
        assert_close(result.after_tax_income, 500_000.0 - 117_506.69);
    }

    #[test]
    fn test_top_bracket_is_unbounded() {
        let za = jurisdiction("za").unwrap();
        let result = income_tax(2_000_000.0, za);
        let marginal = result.marginal.unwrap();
        assert_eq!(marginal.max, None);
        assert_close(result.tax_owed, 644_489.0 + (2_000_000.0 - 1_817_001.0) * 0.45);
    }

    #[test]
    fn test_deduction_applies_before_brackets() {
        let us = jurisdiction("US").unwrap();
        let result = income_tax(60_000.0, us);
        assert_eq!(result.taxable_income, 46_150.0);
        assert_close(result.tax_owed, 5_147.0 + (46_150.0 - 44_726.0) * 0.22);
        // effective rate is against gross income
        assert_close(result.effective_rate, result.tax_owed / 60_000.0 * 100.0);
    }

    #[test]
    fn test_income_below_deduction_owes_nothing() {
        let gb = jurisdiction("GB").unwrap();
        let result = income_tax(10_000.0, gb);
        assert_eq!(result.tax_owed, 0.0);
        assert_eq!(result.effective_rate, 0.0);
        assert_eq!(result.after_tax_income, 10_000.0);
        assert!(result.marginal.is_none());

        let zero = income_tax(0.0, jurisdiction("ZA").unwrap());
        assert_eq!(zero.tax_owed, 0.0);
        assert_eq!(zero.effective_rate, 0.0);
    }

    #[test]
    fn test_brackets_are_contiguous_and_ordered() {
        for j in JURISDICTIONS {
            let brackets = j.brackets;
            assert_eq!(brackets[0].min, 0.0, "{} must start at 0", j.code);
            for pair in brackets.windows(2) {
                let upper = pair[0].max.expect("only the last bracket is unbounded");
                assert_eq!(pair[1].min, upper + 1.0, "gap in {} table", j.code);
                assert!(pair[1].min > pair[0].min);
            }
            assert!(brackets.last().unwrap().max.is_none(), "{} top bracket", j.code);
        }
    }

    #[test]
    fn test_income_between_brackets() {
        let gb = jurisdiction("GB").unwrap();
        // taxable 12,570.50 sits between the 0% and 20% bands
        let result = income_tax(25_140.5, gb);
        assert_eq!(result.tax_owed, 0.0);
        assert_eq!(result.marginal.unwrap().min, 12_571.0);

        let za = jurisdiction("ZA").unwrap();
        let below = income_tax(237_100.0, za).tax_owed;
        let gap = income_tax(237_100.5, za).tax_owed;
        let above = income_tax(237_101.5, za).tax_owed;
        assert_close(below, 42_678.0);
        assert_close(gap, 42_678.0);
        assert!(below <= gap && gap <= above, "{below} {gap} {above}");
    }

    #[test]
    fn test_tax_never_decreases_with_income() {
        for j in JURISDICTIONS.iter() {
            let mut previous = 0.0;
            let mut income = 0.0;
            while income < 2_000_000.0 {
                let tax = income_tax(income, j).tax_owed;
                assert!(tax >= 0.0, "{} owes {tax} at {income}", j.code);
                assert!(tax >= previous, "{} drops at {income}", j.code);
                previous = tax;
                income += 250.5;
            }
        }
    }

    #[test]
    fn test_pure() {
        let za = jurisdiction("ZA").unwrap();
        let a = income_tax(612_345.67, za);
        let b = income_tax(612_345.67, za);
        assert_eq!(a.tax_owed.to_bits(), b.tax_owed.to_bits());
        assert_eq!(a.effective_rate.to_bits(), b.effective_rate.to_bits());
        assert_eq!(a.after_tax_income.to_bits(), b.after_tax_income.to_bits());
    }

    #[test]
    fn test_unknown_country() {
        let inputs = TaxInputs {
            country: "FR".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            inputs.evaluate(InputPolicy::Zero),
            Err(CalcError::UnknownJurisdiction(ref c)) if c == "FR"
        ));
    }

    #[test]
    fn test_negative_income_is_rejected() {
        let inputs = TaxInputs {
            income: "-5".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            inputs.evaluate(InputPolicy::Zero),
            Err(CalcError::Input(_))
        ));
    }

    #[test]
    fn test_default_inputs() {
        let result = TaxInputs::default().evaluate(InputPolicy::Reject).unwrap();
        assert_close(result.tax_owed, 117_506.69);
    }
}
