use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use super::util::with_retry;
use crate::core::rates::RateProvider;

const RETRIES: usize = 2;
const RETRY_DELAY_MS: u64 = 250;

/// A pair rate as quoted by the chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveQuote {
    pub rate: f64,
    pub as_of: Option<DateTime<Utc>>,
}

/// Live exchange rates from the Yahoo Finance chart API.
///
/// Quotes are kept for the lifetime of the provider, so a pair is requested
/// at most once per run.
pub struct YahooRateProvider {
    base_url: String,
    client: reqwest::Client,
    quotes: Mutex<HashMap<String, LiveQuote>>,
}

impl YahooRateProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("wealthwise/1.0")
            .build()?;
        Ok(YahooRateProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            quotes: Mutex::new(HashMap::new()),
        })
    }

    #[instrument(name = "YahooRateFetch", skip(self))]
    pub async fn quote(&self, from: &str, to: &str) -> Result<LiveQuote> {
        let symbol = format!("{}{}=X", from.to_ascii_uppercase(), to.to_ascii_uppercase());
        if let Some(cached) = self.quotes.lock().await.get(&symbol) {
            debug!("Quote cache HIT for {symbol}");
            return Ok(*cached);
        }

        let url = format!("{}/v8/finance/chart/{symbol}", self.base_url);
        debug!("Requesting currency rate from {}", url);

        let response = with_retry(|| self.client.get(&url).send(), RETRIES, RETRY_DELAY_MS)
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}", e, symbol))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}",
                response.status(),
                symbol
            ));
        }

        let text = response.text().await?;
        let data: YahooCurrencyResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", symbol, e))?;

        let meta = data
            .chart
            .result
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No rate data found for currency pair: {}", symbol))?
            .meta;

        if !meta.regular_market_price.is_finite() || meta.regular_market_price <= 0.0 {
            return Err(anyhow!(
                "Invalid rate {} for currency pair: {}",
                meta.regular_market_price,
                symbol
            ));
        }

        let quote = LiveQuote {
            rate: meta.regular_market_price,
            as_of: meta
                .regular_market_time
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        };
        self.quotes.lock().await.insert(symbol, quote);
        Ok(quote)
    }

    /// Market time of the most recent quote fetched so far.
    pub async fn latest_as_of(&self) -> Option<DateTime<Utc>> {
        self.quotes.lock().await.values().filter_map(|q| q.as_of).max()
    }
}

#[derive(Debug, Deserialize)]
struct YahooCurrencyResponse {
    chart: CurrencyChartResult,
}

#[derive(Debug, Deserialize)]
struct CurrencyChartResult {
    result: Vec<CurrencyChartItem>,
}

#[derive(Debug, Deserialize)]
struct CurrencyChartItem {
    meta: CurrencyChartMeta,
}

#[derive(Debug, Deserialize)]
struct CurrencyChartMeta {
    #[serde(alias = "regularMarketPrice")]
    regular_market_price: f64,
    #[serde(alias = "regularMarketTime", default)]
    regular_market_time: Option<i64>,
}

#[async_trait]
impl RateProvider for YahooRateProvider {
    async fn rate(&self, from: &str, to: &str) -> Result<f64> {
        if from.eq_ignore_ascii_case(to) {
            return Ok(1.0);
        }
        Ok(self.quote(from, to).await?.rate)
    }
}
