use crate::core::input::{InputError, InputPolicy, finite_or_zero, parse_field};

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentInputs {
    pub principal: String,
    pub monthly_contribution: String,
    pub annual_rate: String,
    pub years: String,
}

impl Default for InvestmentInputs {
    fn default() -> Self {
        Self {
            principal: "10000".to_string(),
            monthly_contribution: "500".to_string(),
            annual_rate: "8".to_string(),
            years: "10".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentGrowth {
    pub future_value: f64,
    pub total_contributed: f64,
    pub total_earnings: f64,
}

/// Future value of a lump sum compounded yearly plus a monthly annuity.
///
/// The lump sum grows at `(1 + r)^t` while contributions compound monthly at
/// `r / 12`. At a zero monthly rate contributions accumulate linearly.
pub fn investment_growth(
    principal: f64,
    monthly_contribution: f64,
    annual_rate_pct: f64,
    years: f64,
) -> InvestmentGrowth {
    let rate = annual_rate_pct / 100.0;
    let monthly_rate = rate / 12.0;
    let months = years * 12.0;

    let fv_principal = principal * (1.0 + rate).powf(years);
    let fv_contributions = if monthly_rate == 0.0 {
        monthly_contribution * months
    } else {
        monthly_contribution * ((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate
    };

    let future_value = fv_principal + fv_contributions;
    let total_contributed = principal + monthly_contribution * months;

    InvestmentGrowth {
        future_value: finite_or_zero(future_value),
        total_contributed: finite_or_zero(total_contributed),
        total_earnings: finite_or_zero(future_value - total_contributed),
    }
}

impl InvestmentInputs {
    pub fn evaluate(&self, policy: InputPolicy) -> Result<InvestmentGrowth, InputError> {
        let principal = parse_field("initial investment", &self.principal, policy)?;
        let monthly = parse_field("monthly contribution", &self.monthly_contribution, policy)?;
        let rate = parse_field("annual rate", &self.annual_rate, policy)?;
        let years = parse_field("years", &self.years, policy)?;
        Ok(investment_growth(principal, monthly, rate, years))
    }
}
