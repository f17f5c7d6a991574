//! The user's display currency, persisted across runs.

use crate::core::currency::{Currency, default_currency, format_grouped};
use crate::store::Store;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Storage key holding the JSON-encoded [`Currency`] record.
pub const SELECTED_CURRENCY_KEY: &str = "selectedCurrency";

/// Holds the selected currency and owns its persistence.
///
/// Built once with [`CurrencyContext::load`] and handed to whatever needs to
/// format money. The only mutation is [`CurrencyContext::select`], which
/// writes through to the store.
pub struct CurrencyContext<S: Store> {
    store: S,
    currency: Currency,
    show_welcome: bool,
}

impl<S: Store> CurrencyContext<S> {
    /// Reads the persisted selection.
    ///
    /// With nothing stored, or a record that does not decode, the selection is
    /// the first catalog entry and the welcome prompt is raised. Storage read
    /// failures propagate.
    pub fn load(store: S) -> Result<Self> {
        let saved = store
            .get(SELECTED_CURRENCY_KEY)
            .context("Failed to read saved currency")?;

        let (currency, show_welcome) = match saved {
            Some(bytes) => match serde_json::from_slice::<Currency>(&bytes) {
                Ok(currency) => {
                    debug!(code = %currency.code, "restored saved currency");
                    (currency, false)
                }
                Err(e) => {
                    warn!("Ignoring malformed saved currency: {e}");
                    (default_currency(), true)
                }
            },
            None => {
                debug!("no saved currency, first visit");
                (default_currency(), true)
            }
        };

        Ok(Self {
            store,
            currency,
            show_welcome,
        })
    }

    pub fn selection(&self) -> &Currency {
        &self.currency
    }

    /// Whether the first-visit country prompt should be shown.
    pub fn show_welcome(&self) -> bool {
        self.show_welcome
    }

    /// Changes the prompt flag for this session only; nothing is persisted.
    pub fn set_show_welcome(&mut self, show: bool) {
        self.show_welcome = show;
    }

    /// Persists `currency` and makes it the selection.
    ///
    /// Any well-formed record is accepted, catalog member or not. The store is
    /// written first; on failure the in-memory selection is left untouched.
    pub fn select(&mut self, currency: Currency) -> Result<()> {
        let encoded = serde_json::to_vec(&currency).context("Failed to encode currency")?;
        self.store
            .put(SELECTED_CURRENCY_KEY, &encoded)
            .context("Failed to save selected currency")?;

        info!(code = %currency.code, "selected currency");
        self.currency = currency;
        self.show_welcome = false;
        Ok(())
    }

    /// `{symbol}{amount}` with two decimals and comma grouping, whatever the
    /// selected currency's own conventions.
    pub fn format(&self, amount: f64) -> String {
        format!("{}{}", self.currency.symbol, format_grouped(amount))
    }
}
