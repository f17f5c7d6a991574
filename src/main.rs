use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use wealthwise::core::calculators::{
    CompoundInterestInputs, CompoundingFrequency, ConversionInputs, InvestmentInputs, LoanInputs,
    RetirementInputs, TaxInputs,
};
use wealthwise::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show or change the display currency
    #[command(subcommand)]
    Currency(CurrencyCommand),
    /// Grow a lump sum with compound interest
    Compound(CompoundArgs),
    /// Project an investment with monthly contributions
    Invest(InvestArgs),
    /// Monthly payment and total interest of a loan
    Loan(LoanArgs),
    /// Monthly saving needed to reach a retirement goal
    Retire(RetireArgs),
    /// Convert an amount between currencies
    Convert(ConvertArgs),
    /// Show exchange rates against a base currency
    Rates {
        /// Base currency code
        #[arg(short, long, default_value = "USD")]
        base: String,
        /// Fetch live rates instead of the built-in table
        #[arg(long)]
        live: bool,
    },
    /// Estimate income tax for a country
    Tax(TaxArgs),
    /// Show tax bracket tables
    TaxBrackets {
        /// Country code (ZA, US, GB, CA, AU, IN); all when omitted
        #[arg(short = 'C', long)]
        country: Option<String>,
    },
}

#[derive(Subcommand)]
enum CurrencyCommand {
    /// List supported currencies
    List,
    /// Show the selected currency
    Show,
    /// Select the display currency by code
    Select { code: String },
}

#[derive(Args)]
struct CompoundArgs {
    #[arg(short, long, default_value = "5000")]
    principal: String,
    /// Annual interest rate in percent
    #[arg(short, long, default_value = "5")]
    rate: String,
    #[arg(short, long, default_value = "5")]
    years: String,
    #[arg(short, long, value_enum, default_value_t = CompoundingFrequency::Monthly)]
    frequency: CompoundingFrequency,
}

#[derive(Args)]
struct InvestArgs {
    #[arg(short, long, default_value = "10000")]
    principal: String,
    #[arg(short, long, default_value = "500")]
    monthly: String,
    /// Expected annual return in percent
    #[arg(short, long, default_value = "8")]
    rate: String,
    #[arg(short, long, default_value = "10")]
    years: String,
}

#[derive(Args)]
struct LoanArgs {
    #[arg(short, long, default_value = "200000")]
    amount: String,
    /// Annual interest rate in percent
    #[arg(short, long, default_value = "6.5")]
    rate: String,
    /// Term in years
    #[arg(short, long, default_value = "30")]
    term: String,
}

#[derive(Args)]
struct RetireArgs {
    #[arg(long, default_value = "30")]
    age: String,
    #[arg(long, default_value = "65")]
    retire_at: String,
    #[arg(long, default_value = "50000")]
    savings: String,
    #[arg(long, default_value = "1000000")]
    goal: String,
    /// Expected annual return in percent
    #[arg(long = "return", default_value = "7")]
    expected_return: String,
}

#[derive(Args)]
struct ConvertArgs {
    #[arg(default_value = "1000")]
    amount: String,
    #[arg(default_value = "USD")]
    from: String,
    #[arg(default_value = "ZAR")]
    to: String,
    /// Fetch a live rate instead of the built-in table
    #[arg(long)]
    live: bool,
    /// Exchange source and target currencies
    #[arg(short, long)]
    swap: bool,
}

#[derive(Args)]
struct TaxArgs {
    /// Country code (ZA, US, GB, CA, AU, IN)
    #[arg(short = 'C', long, default_value = "ZA")]
    country: String,
    /// Annual gross income
    #[arg(short, long, default_value = "500000")]
    income: String,
}

impl From<Commands> for wealthwise::AppCommand {
    fn from(cmd: Commands) -> wealthwise::AppCommand {
        use wealthwise::AppCommand;
        match cmd {
            Commands::Currency(CurrencyCommand::List) => AppCommand::CurrencyList,
            Commands::Currency(CurrencyCommand::Show) => AppCommand::CurrencyShow,
            Commands::Currency(CurrencyCommand::Select { code }) => {
                AppCommand::CurrencySelect(code)
            }
            Commands::Compound(a) => AppCommand::Compound(CompoundInterestInputs {
                principal: a.principal,
                annual_rate: a.rate,
                years: a.years,
                frequency: a.frequency,
            }),
            Commands::Invest(a) => AppCommand::Invest(InvestmentInputs {
                principal: a.principal,
                monthly_contribution: a.monthly,
                annual_rate: a.rate,
                years: a.years,
            }),
            Commands::Loan(a) => AppCommand::Loan(LoanInputs {
                amount: a.amount,
                annual_rate: a.rate,
                term_years: a.term,
            }),
            Commands::Retire(a) => AppCommand::Retire(RetirementInputs {
                current_age: a.age,
                retirement_age: a.retire_at,
                current_savings: a.savings,
                goal: a.goal,
                expected_return: a.expected_return,
            }),
            Commands::Convert(a) => {
                let mut inputs = ConversionInputs {
                    amount: a.amount,
                    from: a.from,
                    to: a.to,
                };
                if a.swap {
                    inputs.swap();
                }
                AppCommand::Convert {
                    inputs,
                    live: a.live,
                }
            }
            Commands::Rates { base, live } => AppCommand::Rates { base, live },
            Commands::Tax(a) => AppCommand::Tax(TaxInputs {
                country: a.country,
                income: a.income,
            }),
            Commands::TaxBrackets { country } => AppCommand::TaxBrackets { country },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => wealthwise::cli::setup::setup(),
        Some(cmd) => wealthwise::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
