pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::rates::RateSource;
use crate::core::calculators::{
    CompoundInterestInputs, ConversionInputs, InvestmentInputs, LoanInputs, RetirementInputs,
    TaxInputs,
};
use crate::core::config::AppConfig;
use crate::core::{CurrencyContext, StaticRates};
use crate::providers::YahooRateProvider;
use crate::store::Store;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    CurrencyList,
    CurrencyShow,
    CurrencySelect(String),
    Compound(CompoundInterestInputs),
    Invest(InvestmentInputs),
    Loan(LoanInputs),
    Retire(RetirementInputs),
    Convert { inputs: ConversionInputs, live: bool },
    Rates { base: String, live: bool },
    Tax(TaxInputs),
    TaxBrackets { country: Option<String> },
}

impl AppCommand {
    /// Commands during which the first-visit prompt would be redundant.
    fn suppresses_welcome(&self) -> bool {
        matches!(
            self,
            AppCommand::CurrencyList | AppCommand::CurrencySelect(_)
        )
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("WealthWise starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = store::open_default(&config)?;
    run_with_store(command, &config, store).await
}

/// Runs `command` against an already opened store.
pub async fn run_with_store<S: Store>(
    command: AppCommand,
    config: &AppConfig,
    store: S,
) -> Result<()> {
    let mut ctx = CurrencyContext::load(store)?;
    if !command.suppresses_welcome() {
        cli::currency::welcome(&mut ctx);
    }

    let policy = config.input_policy;
    let rate_source = |live: bool| -> Result<RateSource> {
        Ok(if live {
            RateSource::Live(YahooRateProvider::new(config.yahoo_base_url())?)
        } else {
            RateSource::Static(StaticRates)
        })
    };

    match command {
        AppCommand::CurrencyList => cli::currency::list(&ctx),
        AppCommand::CurrencyShow => cli::currency::show(&ctx),
        AppCommand::CurrencySelect(code) => cli::currency::select(&mut ctx, &code)?,
        AppCommand::Compound(inputs) => {
            let table = cli::calculators::render_compound(&inputs, policy, &ctx)?;
            cli::calculators::print_table("Compound Interest", &table);
        }
        AppCommand::Invest(inputs) => {
            let table = cli::calculators::render_investment(&inputs, policy, &ctx)?;
            cli::calculators::print_table("Investment Growth", &table);
        }
        AppCommand::Loan(inputs) => {
            let table = cli::calculators::render_loan(&inputs, policy, &ctx)?;
            cli::calculators::print_table("Loan / EMI", &table);
        }
        AppCommand::Retire(inputs) => {
            let table = cli::calculators::render_retirement(&inputs, policy, &ctx)?;
            cli::calculators::print_table("Retirement Savings", &table);
        }
        AppCommand::Convert { inputs, live } => {
            cli::rates::run_convert(&inputs, policy, &rate_source(live)?).await?
        }
        AppCommand::Rates { base, live } => {
            cli::rates::run_rates(&base, &rate_source(live)?).await?
        }
        AppCommand::Tax(inputs) => {
            let table = cli::calculators::render_tax(&inputs, policy)?;
            cli::calculators::print_table("Income Tax", &table);
            println!(
                "{}",
                cli::ui::style_text(
                    "* Tax calculations are simplified and for educational purposes only.",
                    cli::ui::StyleType::Subtle
                )
            );
        }
        AppCommand::TaxBrackets { country } => {
            for (title, table) in cli::calculators::render_tax_brackets(country.as_deref())? {
                cli::calculators::print_table(&title, &table);
            }
        }
    }

    Ok(())
}
