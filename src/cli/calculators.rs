//! Rendering of calculator results.
//!
//! Each `render_*` builds the output table for one calculator so it can be
//! checked without a terminal; `print_table` prints it.

use super::ui;
use crate::core::calculators::{
    CompoundInterestInputs, InvestmentInputs, LoanInputs, RetirementInputs, TaxInputs,
    jurisdiction, tax::JURISDICTIONS,
};
use crate::core::currency::format_grouped;
use crate::core::{CurrencyContext, InputPolicy};
use crate::store::Store;
use anyhow::Result;
use comfy_table::{Cell, Table};

pub fn render_compound<S: Store>(
    inputs: &CompoundInterestInputs,
    policy: InputPolicy,
    ctx: &CurrencyContext<S>,
) -> Result<Table> {
    let result = inputs.evaluate(policy)?;
    Ok(ui::result_table(
        &[
            ("Principal", inputs.principal.clone()),
            ("Annual rate (%)", inputs.annual_rate.clone()),
            ("Years", inputs.years.clone()),
            ("Compounding", inputs.frequency.to_string()),
        ],
        &[
            ("Final amount", ctx.format(result.final_amount)),
            ("Total interest", ctx.format(result.total_interest)),
        ],
    ))
}

pub fn render_investment<S: Store>(
    inputs: &InvestmentInputs,
    policy: InputPolicy,
    ctx: &CurrencyContext<S>,
) -> Result<Table> {
    let result = inputs.evaluate(policy)?;
    Ok(ui::result_table(
        &[
            ("Initial investment", inputs.principal.clone()),
            ("Monthly contribution", inputs.monthly_contribution.clone()),
            ("Annual return (%)", inputs.annual_rate.clone()),
            ("Years", inputs.years.clone()),
        ],
        &[
            ("Future value", ctx.format(result.future_value)),
            ("Total contributed", ctx.format(result.total_contributed)),
            ("Total earnings", ctx.format(result.total_earnings)),
        ],
    ))
}

pub fn render_loan<S: Store>(
    inputs: &LoanInputs,
    policy: InputPolicy,
    ctx: &CurrencyContext<S>,
) -> Result<Table> {
    let result = inputs.evaluate(policy)?;
    Ok(ui::result_table(
        &[
            ("Loan amount", inputs.amount.clone()),
            ("Interest rate (%)", inputs.annual_rate.clone()),
            ("Term (years)", inputs.term_years.clone()),
        ],
        &[
            ("Monthly payment", ctx.format(result.monthly_payment)),
            ("Total payment", ctx.format(result.total_payment)),
            ("Total interest", ctx.format(result.total_interest)),
        ],
    ))
}

pub fn render_retirement<S: Store>(
    inputs: &RetirementInputs,
    policy: InputPolicy,
    ctx: &CurrencyContext<S>,
) -> Result<Table> {
    let plan = inputs.evaluate(policy)?;
    Ok(ui::result_table(
        &[
            ("Current age", inputs.current_age.clone()),
            ("Retirement age", inputs.retirement_age.clone()),
            ("Current savings", inputs.current_savings.clone()),
            ("Retirement goal", inputs.goal.clone()),
            ("Expected return (%)", inputs.expected_return.clone()),
        ],
        &[
            ("Monthly saving required", ctx.format(plan.monthly_required)),
            ("Years to retirement", format!("{}", plan.years_to_retirement)),
            ("Total contributions", ctx.format(plan.total_contributions)),
            ("Savings at retirement", ctx.format(plan.growth_from_savings)),
        ],
    ))
}

/// Tax figures are shown in the jurisdiction's own currency code, not the
/// selected display currency.
pub fn render_tax(inputs: &TaxInputs, policy: InputPolicy) -> Result<Table> {
    let j = jurisdiction(&inputs.country)?;
    let result = inputs.evaluate(policy)?;
    let money = |v: f64| format!("{} {}", j.currency, format_grouped(v));

    let marginal = result
        .marginal
        .map_or("-".to_string(), |b| format!("{:.1}%", b.rate * 100.0));
    let deduction = j.standard_deduction.map_or("-".to_string(), money);

    Ok(ui::result_table(
        &[
            ("Country", format!("{} {}", j.flag, j.name)),
            ("Annual income", money(result.income)),
            ("Standard deduction", deduction),
            ("Taxable income", money(result.taxable_income)),
        ],
        &[
            ("Tax owed", money(result.tax_owed)),
            ("Effective rate", format!("{:.2}%", result.effective_rate)),
            ("Marginal rate", marginal),
            ("After-tax income", money(result.after_tax_income)),
        ],
    ))
}

pub fn render_tax_brackets(country: Option<&str>) -> Result<Vec<(String, Table)>> {
    let selected = match country {
        Some(code) => vec![jurisdiction(code)?],
        None => JURISDICTIONS.iter().collect(),
    };

    Ok(selected
        .into_iter()
        .map(|j| {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell(&format!("Income ({})", j.currency)),
                ui::header_cell("Rate"),
                ui::header_cell("Tax below bracket"),
            ]);
            for b in j.brackets {
                let range = match b.max {
                    Some(max) => format!("{} - {}", group_whole(b.min), group_whole(max)),
                    None => format!("{} - ∞", group_whole(b.min)),
                };
                table.add_row(vec![
                    Cell::new(range),
                    ui::value_cell(format!("{:.1}%", b.rate * 100.0)),
                    ui::value_cell(group_whole(b.fixed)),
                ]);
            }
            (format!("{} {} ({})", j.flag, j.name, j.code), table)
        })
        .collect())
}

fn group_whole(value: f64) -> String {
    let grouped = format_grouped(value);
    grouped
        .strip_suffix(".00")
        .map(str::to_string)
        .unwrap_or(grouped)
}

pub fn print_table(title: &str, table: &Table) {
    println!("\n{}", ui::style_text(title, ui::StyleType::Title));
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::find_by_code;
    use crate::store::MemoryStore;

    fn usd_context() -> CurrencyContext<MemoryStore> {
        CurrencyContext::load(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_compound_table_uses_selected_symbol() {
        let mut ctx = usd_context();
        let table = render_compound(&Default::default(), InputPolicy::Zero, &ctx).unwrap();
        assert!(table.to_string().contains("$6,416.79"));

        ctx.select(find_by_code("GBP").unwrap()).unwrap();
        let table = render_compound(&Default::default(), InputPolicy::Zero, &ctx).unwrap();
        assert!(table.to_string().contains("£6,416.79"));
    }

    #[test]
    fn test_loan_table() {
        let table = render_loan(&Default::default(), InputPolicy::Zero, &usd_context()).unwrap();
        assert!(table.to_string().contains("$1,264.14"));
    }

    #[test]
    fn test_reject_policy_surfaces_field() {
        let inputs = LoanInputs {
            amount: "a lot".to_string(),
            ..Default::default()
        };
        let err = render_loan(&inputs, InputPolicy::Reject, &usd_context()).unwrap_err();
        assert!(err.to_string().contains("loan amount"));
    }

    #[test]
    fn test_tax_table_uses_jurisdiction_currency() {
        let table = render_tax(&TaxInputs::default(), InputPolicy::Zero)
            .unwrap()
            .to_string();
        assert!(table.contains("ZAR 117,506.69"));
        assert!(table.contains("31.0%"));
    }

    #[test]
    fn test_tax_brackets_listing() {
        let all = render_tax_brackets(None).unwrap();
        assert_eq!(all.len(), JURISDICTIONS.len());

        let gb = render_tax_brackets(Some("gb")).unwrap();
        assert_eq!(gb.len(), 1);
        assert!(gb[0].1.to_string().contains("125,141 - ∞"));
        assert!(render_tax_brackets(Some("XX")).is_err());
    }

    #[test]
    fn test_group_whole() {
        assert_eq!(group_whole(1_817_001.0), "1,817,001");
        assert_eq!(group_whole(0.5), "0.50");
    }
}
