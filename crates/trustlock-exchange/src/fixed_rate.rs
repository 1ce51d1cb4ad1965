//! Deterministic fixed-rate exchange for tests and demos.

use std::collections::HashMap;

use rust_decimal::Decimal;
use trustlock_types::{Asset, Result, TrustlockError};

use crate::adapter::ExchangeAdapter;

/// Converts at a fixed per-asset rate against an optional finite liquidity
/// pool.
///
/// Assets without a configured rate have no conversion path. Assets with a
/// configured pool fail once the pool cannot cover the full output;
/// successful conversions deplete it. A failed conversion leaves the pool
/// untouched.
#[derive(Debug, Default)]
pub struct FixedRateExchange {
    /// Output units of asset per unit of native currency.
    rates: HashMap<Asset, Decimal>,
    /// Remaining output liquidity per asset. Absent = unbounded.
    liquidity: HashMap<Asset, Decimal>,
}

impl FixedRateExchange {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the conversion rate for `asset`.
    #[must_use]
    pub fn with_rate(mut self, asset: &str, rate: Decimal) -> Self {
        self.rates.insert(asset.to_string(), rate);
        self
    }

    /// Cap the total output liquidity for `asset`.
    #[must_use]
    pub fn with_liquidity(mut self, asset: &str, pool: Decimal) -> Self {
        self.liquidity.insert(asset.to_string(), pool);
        self
    }

    /// Remaining liquidity for `asset`, if capped.
    #[must_use]
    pub fn remaining_liquidity(&self, asset: &str) -> Option<Decimal> {
        self.liquidity.get(asset).copied()
    }
}

impl ExchangeAdapter for FixedRateExchange {
    fn convert(&mut self, native_amount: Decimal, target_asset: &str) -> Result<Decimal> {
        let rate = self.rates.get(target_asset).copied().ok_or_else(|| {
            TrustlockError::ConversionFailed {
                reason: format!("no conversion path for asset {target_asset}"),
            }
        })?;

        let output = native_amount * rate;

        if let Some(pool) = self.liquidity.get_mut(target_asset) {
            if *pool < output {
                return Err(TrustlockError::ConversionFailed {
                    reason: format!(
                        "insufficient liquidity for {target_asset}: need {output}, pool holds {pool}"
                    ),
                });
            }
            *pool -= output;
        }

        tracing::debug!(asset = target_asset, %native_amount, %output, "conversion executed");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_at_fixed_rate() {
        let mut exchange = FixedRateExchange::new().with_rate("DAI", Decimal::new(5, 1));
        let output = exchange.convert(Decimal::new(1000, 0), "DAI").unwrap();
        assert_eq!(output, Decimal::new(500, 0));
    }

    #[test]
    fn unknown_asset_has_no_path() {
        let mut exchange = FixedRateExchange::new().with_rate("DAI", Decimal::ONE);
        let err = exchange.convert(Decimal::new(100, 0), "XYZ").unwrap_err();
        assert!(matches!(err, TrustlockError::ConversionFailed { .. }));
    }

    #[test]
    fn liquidity_depletes_across_conversions() {
        let mut exchange = FixedRateExchange::new()
            .with_rate("DAI", Decimal::ONE)
            .with_liquidity("DAI", Decimal::new(300, 0));

        exchange.convert(Decimal::new(200, 0), "DAI").unwrap();
        assert_eq!(
            exchange.remaining_liquidity("DAI"),
            Some(Decimal::new(100, 0))
        );

        let err = exchange.convert(Decimal::new(200, 0), "DAI").unwrap_err();
        assert!(matches!(err, TrustlockError::ConversionFailed { .. }));
        // Failed conversion leaves the pool untouched.
        assert_eq!(
            exchange.remaining_liquidity("DAI"),
            Some(Decimal::new(100, 0))
        );
    }

    #[test]
    fn uncapped_asset_is_unbounded() {
        let mut exchange = FixedRateExchange::new().with_rate("USDT", Decimal::new(2, 0));
        assert_eq!(exchange.remaining_liquidity("USDT"), None);
        let output = exchange
            .convert(Decimal::new(1_000_000, 0), "USDT")
            .unwrap();
        assert_eq!(output, Decimal::new(2_000_000, 0));
    }
}
