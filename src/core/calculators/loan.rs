use crate::core::input::{InputError, InputPolicy, finite_or_zero, parse_field};

#[derive(Debug, Clone, PartialEq)]
pub struct LoanInputs {
    pub amount: String,
    pub annual_rate: String,
    pub term_years: String,
}

impl Default for LoanInputs {
    fn default() -> Self {
        Self {
            amount: "200000".to_string(),
            annual_rate: "6.5".to_string(),
            term_years: "30".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanPayment {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// Amortized monthly payment `P·r(1+r)^N / ((1+r)^N − 1)`.
///
/// A zero rate or zero term yields non-finite intermediates which are
/// reported as 0.
pub fn loan_payment(principal: f64, annual_rate_pct: f64, term_years: f64) -> LoanPayment {
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let payments = term_years * 12.0;
    let growth = (1.0 + monthly_rate).powf(payments);

    let monthly_payment = principal * (monthly_rate * growth) / (growth - 1.0);
    let total_payment = monthly_payment * payments;
    let total_interest = total_payment - principal;

    LoanPayment {
        monthly_payment: finite_or_zero(monthly_payment),
        total_payment: finite_or_zero(total_payment),
        total_interest: finite_or_zero(total_interest),
    }
}

impl LoanInputs {
    pub fn evaluate(&self, policy: InputPolicy) -> Result<LoanPayment, InputError> {
        let amount = parse_field("loan amount", &self.amount, policy)?;
        let rate = parse_field("interest rate", &self.annual_rate, policy)?;
        let term = parse_field("loan term", &self.term_years, policy)?;
        Ok(loan_payment(amount, rate, term))
    }
}
