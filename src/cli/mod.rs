pub mod calculators;
pub mod currency;
pub mod rates;
pub mod setup;
pub mod ui;
