use crate::core::input::{InputError, InputPolicy, finite_or_zero, parse_field};

#[derive(Debug, Clone, PartialEq)]
pub struct RetirementInputs {
    pub current_age: String,
    pub retirement_age: String,
    pub current_savings: String,
    pub goal: String,
    pub expected_return: String,
}

impl Default for RetirementInputs {
    fn default() -> Self {
        Self {
            current_age: "30".to_string(),
            retirement_age: "65".to_string(),
            current_savings: "50000".to_string(),
            goal: "1000000".to_string(),
            expected_return: "7".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RetirementPlan {
    pub years_to_retirement: f64,
    pub monthly_required: f64,
    pub total_contributions: f64,
    /// Value of today's savings at retirement.
    pub growth_from_savings: f64,
}

/// Monthly saving needed to reach `goal` by `retirement_age`.
///
/// Returns an all-zero plan when `retirement_age <= current_age`. The
/// required contribution is clamped to 0 when current savings already cover
/// the goal or the computation is degenerate.
pub fn retirement_plan(
    current_age: f64,
    retirement_age: f64,
    current_savings: f64,
    goal: f64,
    annual_return_pct: f64,
) -> RetirementPlan {
    let years = retirement_age - current_age;
    if years <= 0.0 || years.is_nan() {
        return RetirementPlan::default();
    }

    let rate = annual_return_pct / 100.0;
    let fv_savings = current_savings * (1.0 + rate).powf(years);
    let needed = goal - fv_savings;

    let monthly_rate = rate / 12.0;
    let months = years * 12.0;
    let monthly_required = needed * monthly_rate / ((1.0 + monthly_rate).powf(months) - 1.0);
    let monthly_required = if monthly_required.is_finite() && monthly_required > 0.0 {
        monthly_required
    } else {
        0.0
    };

    RetirementPlan {
        years_to_retirement: years,
        monthly_required,
        total_contributions: finite_or_zero(monthly_required * months),
        growth_from_savings: finite_or_zero(fv_savings),
    }
}

impl RetirementInputs {
    pub fn evaluate(&self, policy: InputPolicy) -> Result<RetirementPlan, InputError> {
        let current_age = parse_field("current age", &self.current_age, policy)?;
        let retirement_age = parse_field("retirement age", &self.retirement_age, policy)?;
        let savings = parse_field("current savings", &self.current_savings, policy)?;
        let goal = parse_field("retirement goal", &self.goal, policy)?;
        let expected_return = parse_field("expected return", &self.expected_return, policy)?;
        Ok(retirement_plan(
            current_age,
            retirement_age,
            savings,
            goal,
            expected_return,
        ))
    }
}
