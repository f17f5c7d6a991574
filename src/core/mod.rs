//! Core business logic abstractions

pub mod calculators;
pub mod config;
pub mod context;
pub mod currency;
pub mod input;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use context::CurrencyContext;
pub use currency::Currency;
pub use input::InputPolicy;
pub use rates::{RateProvider, StaticRates};
