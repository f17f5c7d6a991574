use super::ui;
use crate::core::calculators::conversion::{Conversion, ConversionInputs, convert_with};
use crate::core::currency::{CATALOG, find_by_code, format_grouped};
use crate::core::{InputPolicy, RateProvider, StaticRates};
use crate::providers::YahooRateProvider;
use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table};
use futures::future::join_all;
use tracing::{debug, info};

/// Where conversion rates come from for this run.
pub enum RateSource {
    Static(StaticRates),
    Live(YahooRateProvider),
}

impl RateSource {
    pub fn provider(&self) -> &dyn RateProvider {
        match self {
            RateSource::Static(rates) => rates,
            RateSource::Live(yahoo) => yahoo,
        }
    }

    async fn note(&self) -> String {
        match self {
            RateSource::Static(_) => {
                "* Exchange rates are fixed approximations for educational purposes only."
                    .to_string()
            }
            RateSource::Live(yahoo) => live_note(yahoo.latest_as_of().await),
        }
    }
}

fn live_note(as_of: Option<DateTime<Utc>>) -> String {
    match as_of {
        Some(ts) => format!(
            "* Exchange rates fetched live from Yahoo Finance, as of {}.",
            ts.format("%Y-%m-%d %H:%M UTC")
        ),
        None => "* Exchange rates fetched live from Yahoo Finance.".to_string(),
    }
}

pub async fn run_convert(
    inputs: &ConversionInputs,
    policy: InputPolicy,
    source: &RateSource,
) -> Result<()> {
    let conversion = match source {
        RateSource::Static(rates) => inputs.evaluate(policy, rates)?,
        RateSource::Live(yahoo) => {
            let amount = inputs.amount(policy)?;
            let pb = ui::new_spinner("Fetching exchange rate...");
            let result = convert_with(amount, &inputs.from, &inputs.to, yahoo).await;
            pb.finish_and_clear();
            result?
        }
    };

    info!(
        from = %conversion.from,
        to = %conversion.to,
        converted = conversion.converted,
        "converted"
    );
    println!("{}", render_conversion(&conversion));
    println!("{}", ui::style_text(&source.note().await, ui::StyleType::Subtle));
    Ok(())
}

pub fn render_conversion(conversion: &Conversion) -> String {
    let symbol = |code: &str| find_by_code(code).map_or(String::new(), |c| c.symbol);
    format!(
        "{} {} {}\n{} {} {}\n{}",
        format_grouped(conversion.amount),
        symbol(&conversion.from),
        conversion.from,
        ui::style_text(&format_grouped(conversion.converted), ui::StyleType::TotalValue),
        symbol(&conversion.to),
        conversion.to,
        ui::style_text(
            &format!(
                "1 {} = {:.4} {}",
                conversion.from, conversion.unit_rate, conversion.to
            ),
            ui::StyleType::Subtle
        ),
    )
}

/// Rates from `base` to every catalog currency, fetched concurrently.
pub async fn collect_rates(base: &str, provider: &dyn RateProvider) -> Vec<(String, Result<f64>)> {
    let pb = ui::new_progress_bar(CATALOG.len() as u64, true);
    pb.set_message("Fetching rates...");

    let futures = CATALOG.iter().map(|entry| {
        let pb = pb.clone();
        async move {
            let rate = provider.rate(base, entry.code).await;
            pb.inc(1);
            (entry.code.to_string(), rate)
        }
    });

    let results = join_all(futures).await;
    pb.finish_and_clear();
    debug!("Collected {} rates for {base}", results.len());
    results
}

pub fn render_rates(base: &str, rates: &[(String, Result<f64>)]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell(&format!("Per 1 {base}")),
    ]);

    for (code, rate) in rates {
        let name = find_by_code(code).map_or(String::new(), |c| format!("{} {}", c.flag, c.name));
        let rate_cell = match rate {
            Ok(rate) => ui::value_cell(format!("{rate:.4}")),
            Err(e) => Cell::new(format!("Error: {e}")).fg(comfy_table::Color::Red),
        };
        table.add_row(vec![Cell::new(code), Cell::new(name), rate_cell]);
    }
    table
}

pub async fn run_rates(base: &str, source: &RateSource) -> Result<()> {
    let base = find_by_code(base)
        .ok_or_else(|| anyhow::anyhow!("Unknown currency: {base}"))?
        .code;

    let rates = collect_rates(&base, source.provider()).await;
    println!("{}", render_rates(&base, &rates));
    println!("{}", ui::style_text(&source.note().await, ui::StyleType::Subtle));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_collect_static_rates() {
        let rates = collect_rates("USD", &StaticRates).await;
        assert_eq!(rates.len(), CATALOG.len());

        let (code, zar) = &rates[1];
        assert_eq!(code, "ZAR");
        assert_eq!(*zar.as_ref().unwrap(), 18.5);
    }

    #[tokio::test]
    async fn test_render_rates_table() {
        let rates = collect_rates("EUR", &StaticRates).await;
        let table = render_rates("EUR", &rates).to_string();
        assert!(table.contains("Per 1 EUR"));
        assert!(table.contains("1.0000"));
    }

    #[test]
    fn test_live_note_shows_market_time() {
        let ts = Utc.timestamp_opt(1_700_000_000, 0).single();
        assert_eq!(
            live_note(ts),
            "* Exchange rates fetched live from Yahoo Finance, as of 2023-11-14 22:13 UTC."
        );
        assert_eq!(
            live_note(None),
            "* Exchange rates fetched live from Yahoo Finance."
        );
    }

    #[tokio::test]
    async fn test_static_note() {
        let note = RateSource::Static(StaticRates).note().await;
        assert!(note.contains("fixed approximations"));
    }

    #[test]
    fn test_render_conversion() {
        let conversion = crate::core::calculators::convert(1000.0, "USD", "ZAR", &StaticRates)
            .unwrap();
        let text = render_conversion(&conversion);
        assert!(text.contains("1,000.00 $ USD"));
        assert!(text.contains("18,500.00"));
        assert!(text.contains("1 USD = 18.5000 ZAR"));
    }
}
