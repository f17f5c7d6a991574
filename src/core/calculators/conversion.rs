use super::CalcError;
use crate::core::input::{InputPolicy, parse_non_negative};
use crate::core::rates::{RateProvider, StaticRates};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionInputs {
    pub amount: String,
    pub from: String,
    pub to: String,
}

impl Default for ConversionInputs {
    fn default() -> Self {
        Self {
            amount: "1000".to_string(),
            from: "USD".to_string(),
            to: "ZAR".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub converted: f64,
    /// Units of `to` per one unit of `from`.
    pub unit_rate: f64,
}

/// `amount / rate[from] * rate[to]` over the static table.
pub fn convert(
    amount: f64,
    from: &str,
    to: &str,
    rates: &StaticRates,
) -> Result<Conversion, CalcError> {
    let from_rate = rates
        .multiplier(from)
        .ok_or_else(|| CalcError::UnknownCurrency(from.to_string()))?;
    let to_rate = rates
        .multiplier(to)
        .ok_or_else(|| CalcError::UnknownCurrency(to.to_string()))?;

    let in_base = amount / from_rate;
    Ok(Conversion {
        amount,
        from: from.to_ascii_uppercase(),
        to: to.to_ascii_uppercase(),
        converted: in_base * to_rate,
        unit_rate: to_rate / from_rate,
    })
}

/// Converts through any [`RateProvider`] using its direct pair rate.
pub async fn convert_with(
    amount: f64,
    from: &str,
    to: &str,
    provider: &dyn RateProvider,
) -> anyhow::Result<Conversion> {
    let unit_rate = provider.rate(from, to).await?;
    debug!(from, to, unit_rate, "pair rate resolved");
    Ok(Conversion {
        amount,
        from: from.to_ascii_uppercase(),
        to: to.to_ascii_uppercase(),
        converted: amount * unit_rate,
        unit_rate,
    })
}

impl ConversionInputs {
    pub fn amount(&self, policy: InputPolicy) -> Result<f64, CalcError> {
        Ok(parse_non_negative("amount", &self.amount, policy)?)
    }

    pub fn evaluate(
        &self,
        policy: InputPolicy,
        rates: &StaticRates,
    ) -> Result<Conversion, CalcError> {
        convert(self.amount(policy)?, &self.from, &self.to, rates)
    }

    /// Exchanges source and target.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_to_zar() {
        let result = convert(1000.0, "USD", "ZAR", &StaticRates).unwrap();
        assert_eq!(result.converted, 18_500.0);
        assert_eq!(result.unit_rate, 18.5);
    }

    #[test]
    fn test_cross_rate_goes_through_base() {
        let result = convert(100.0, "EUR", "GBP", &StaticRates).unwrap();
        assert_eq!(result.converted, 100.0 / 0.92 * 0.79);
    }

    #[test]
    fn test_same_currency_is_identity() {
        let result = convert(123.45, "jpy", "JPY", &StaticRates).unwrap();
        assert!((result.converted - 123.45).abs() < 1e-9);
        assert_eq!(result.from, "JPY");
    }

    #[test]
    fn test_pure() {
        let a = convert(777.77, "NGN", "CHF", &StaticRates).unwrap();
        let b = convert(777.77, "NGN", "CHF", &StaticRates).unwrap();
        assert_eq!(a.converted.to_bits(), b.converted.to_bits());
        assert_eq!(a.unit_rate.to_bits(), b.unit_rate.to_bits());
    }

    #[test]
    fn test_unknown_currency() {
        let err = convert(1.0, "USD", "XXX", &StaticRates).unwrap_err();
        assert!(matches!(err, CalcError::UnknownCurrency(ref c) if c == "XXX"));
    }

    #[test]
    fn test_default_inputs_and_swap() {
        let mut inputs = ConversionInputs::default();
        let forward = inputs.evaluate(InputPolicy::Zero, &StaticRates).unwrap();
        assert_eq!(forward.converted, 18_500.0);

        inputs.swap();
        assert_eq!(inputs.from, "ZAR");
        let back = inputs.evaluate(InputPolicy::Zero, &StaticRates).unwrap();
        assert!((back.converted - 1000.0 / 18.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_amount_under_policies() {
        let inputs = ConversionInputs {
            amount: "lots".to_string(),
            ..Default::default()
        };
        assert_eq!(
            inputs.evaluate(InputPolicy::Zero, &StaticRates).unwrap().converted,
            0.0
        );
        assert!(matches!(
            inputs.evaluate(InputPolicy::Reject, &StaticRates),
            Err(CalcError::Input(_))
        ));
    }

    #[tokio::test]
    async fn test_convert_with_provider() {
        let result = convert_with(10.0, "usd", "eur", &StaticRates).await.unwrap();
        assert!((result.converted - 9.2).abs() < 1e-9);
        assert_eq!(result.to, "EUR");
    }
}
