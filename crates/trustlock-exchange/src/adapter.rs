//! The exchange adapter interface.

use rust_decimal::Decimal;
use trustlock_types::Result;

/// External exchange service converting native currency into a target asset.
///
/// Implementations must be all-or-nothing: on error no value may be
/// retained anywhere. The ledger treats any error as a total deposit
/// failure and records nothing.
pub trait ExchangeAdapter {
    /// Convert `native_amount` into `target_asset`.
    ///
    /// Returns the exact output quantity credited to the ledger's custody.
    ///
    /// # Errors
    /// Returns [`trustlock_types::TrustlockError::ConversionFailed`] when no
    /// conversion path exists or liquidity cannot cover the output.
    fn convert(&mut self, native_amount: Decimal, target_asset: &str) -> Result<Decimal>;
}
