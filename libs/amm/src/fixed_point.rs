//! Wide-integer fixed-point scaling for pool exchange math
//!
//! Every intermediate product, sum and quotient of the exchange formulas is
//! carried in a 256-bit unsigned integer and upscaled by [`CENTIBIPS`] so the
//! fee fraction survives until the final integer division. Values are only
//! narrowed back to the ledger's signed 64-bit amounts once, at the end.
//!
//! ## Design Principles
//!
//! - **No Silent Wraparound**: all wide operations are checked and surface as
//!   [`CalculationError`]
//! - **Single Narrowing Point**: [`narrow`] is the only way back to `i64`
//! - **No Panics**: division by zero is reported, never trapped

use crate::error::CalculationError;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for intermediate exchange math.
    pub struct U256(4);
}

/// Upscale factor carrying 4 extra decimal places (1 centibip = 1/100 bip)
pub const CENTIBIPS: U256 = U256([10_000, 0, 0, 0]);

/// Downscale factor from centibips to basis points
pub const BIPS: U256 = U256([100, 0, 0, 0]);

/// Largest amount representable on the ledger, as a wide integer
const MAX_AMOUNT: U256 = U256([i64::MAX as u64, 0, 0, 0]);

/// Widen a non-negative ledger amount.
///
/// Callers guarantee `value >= 0`; reserves and amounts on the ledger are
/// never negative.
#[inline]
pub fn widen(value: i64) -> U256 {
    debug_assert!(value >= 0, "ledger amounts are non-negative");
    U256::from(value as u64)
}

/// Upscaled `1 - F` for a fee in basis points, i.e. `CENTIBIPS - fee_bips`.
///
/// Fees outside `[0, 10000]` have no representable complement.
#[inline]
pub fn fee_complement(fee_bips: i32) -> Result<U256, CalculationError> {
    if fee_bips < 0 {
        return Err(CalculationError::FeeOutOfRange { fee_bips });
    }
    CENTIBIPS
        .checked_sub(U256::from(fee_bips as u64))
        .ok_or(CalculationError::FeeOutOfRange { fee_bips })
}

/// Narrow a wide result back to a ledger amount.
///
/// Fails rather than truncating when the value does not fit in `i64`.
#[inline]
pub fn narrow(value: U256) -> Result<i64, CalculationError> {
    if value > MAX_AMOUNT {
        return Err(CalculationError::NarrowingOverflow);
    }
    Ok(value.low_u64() as i64)
}

#[inline]
pub(crate) fn mul(a: U256, b: U256) -> Result<U256, CalculationError> {
    a.checked_mul(b).ok_or(CalculationError::WideOverflow)
}

#[inline]
pub(crate) fn add(a: U256, b: U256) -> Result<U256, CalculationError> {
    a.checked_add(b).ok_or(CalculationError::WideOverflow)
}

#[inline]
pub(crate) fn sub(a: U256, b: U256) -> Result<U256, CalculationError> {
    a.checked_sub(b).ok_or(CalculationError::WideOverflow)
}

/// Quotient and remainder in one step; a zero divisor is reported.
#[inline]
pub(crate) fn div_rem(numer: U256, denom: U256) -> Result<(U256, U256), CalculationError> {
    if denom.is_zero() {
        return Err(CalculationError::ZeroDenominator);
    }
    Ok(numer.div_mod(denom))
}
