//! The financial formulas behind each calculator.
//!
//! Every formula is a pure function of a few scalars. The `*Inputs` types hold
//! the raw text a user typed, with the stock defaults, and parse it through
//! [`crate::core::input::parse_field`].

pub mod compound;
pub mod conversion;
pub mod investment;
pub mod loan;
pub mod retirement;
pub mod tax;

use crate::core::input::InputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),
    #[error("unknown tax jurisdiction: {0}")]
    UnknownJurisdiction(String),
}

pub use compound::{
    CompoundInterest, CompoundInterestInputs, CompoundingFrequency, compound_interest,
};
pub use conversion::{Conversion, ConversionInputs, convert};
pub use investment::{InvestmentGrowth, InvestmentInputs, investment_growth};
pub use loan::{LoanInputs, LoanPayment, loan_payment};
pub use retirement::{RetirementInputs, RetirementPlan, retirement_plan};
pub use tax::{Jurisdiction, TaxAssessment, TaxBracket, TaxInputs, income_tax, jurisdiction};
