use crate::core::input::{InputError, InputPolicy, finite_or_zero, parse_field};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often interest is credited within a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    #[default]
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    pub const ALL: [CompoundingFrequency; 5] = [
        CompoundingFrequency::Annually,
        CompoundingFrequency::SemiAnnually,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Daily,
    ];

    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompoundingFrequency::Annually => "Annually",
            CompoundingFrequency::SemiAnnually => "Semi-Annually",
            CompoundingFrequency::Quarterly => "Quarterly",
            CompoundingFrequency::Monthly => "Monthly",
            CompoundingFrequency::Daily => "Daily",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundInterestInputs {
    pub principal: String,
    pub annual_rate: String,
    pub years: String,
    pub frequency: CompoundingFrequency,
}

impl Default for CompoundInterestInputs {
    fn default() -> Self {
        Self {
            principal: "5000".to_string(),
            annual_rate: "5".to_string(),
            years: "5".to_string(),
            frequency: CompoundingFrequency::Monthly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundInterest {
    pub final_amount: f64,
    pub total_interest: f64,
}

/// `A = P(1 + r/n)^(nt)` with `r` given in percent.
pub fn compound_interest(
    principal: f64,
    annual_rate_pct: f64,
    years: f64,
    frequency: CompoundingFrequency,
) -> CompoundInterest {
    let n = f64::from(frequency.periods_per_year());
    let rate = annual_rate_pct / 100.0;
    let amount = principal * (1.0 + rate / n).powf(n * years);

    CompoundInterest {
        final_amount: finite_or_zero(amount),
        total_interest: finite_or_zero(amount - principal),
    }
}

impl CompoundInterestInputs {
    pub fn evaluate(&self, policy: InputPolicy) -> Result<CompoundInterest, InputError> {
        let principal = parse_field("principal", &self.principal, policy)?;
        let rate = parse_field("annual rate", &self.annual_rate, policy)?;
        let years = parse_field("years", &self.years, policy)?;
        Ok(compound_interest(principal, rate, years, self.frequency))
    }
}
