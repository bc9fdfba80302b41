//! Constant-product payout for a known deposit
//!
//! Answers "if I deposit `x` of one asset, how much of the other do I get?"
//! From the fee-on-input constant-product rule:
//!
//! ```text
//! y = floor[ (1 - F) Y x / (X + (1 - F) x) ]
//! ```
//!
//! Both halves of the fraction are upscaled by [`CENTIBIPS`] so the fee
//! fraction is exact; the upscale cancels in the final division.

use crate::error::CalculationError;
use crate::fixed_point::{
    add, div_rem, fee_complement, mul, narrow, sub, widen, U256, CENTIBIPS,
};
use serde::{Deserialize, Serialize};

/// Slippage reported when the whole exact payout is truncated away
pub const FULL_SLIPPAGE_BIPS: i64 = 10_000;

/// Result of a deposit simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Amount disbursed from the output reserve (floor of the exact payout)
    pub amount_out: i64,
    /// Relative error of the floor in bips; 0 unless requested
    pub rounding_slippage_bips: i64,
}

/// Calculate the amount of `reserve_out` disbursed for depositing
/// `amount_in` into `reserve_in`.
///
/// # Arguments
/// * `reserve_in` - Pool balance of the deposited asset
/// * `reserve_out` - Pool balance of the disbursed asset
/// * `amount_in` - Deposit, strictly positive
/// * `fee_bips` - Fee in basis points (30 = 0.3%)
/// * `want_slippage` - Also measure the rounding slippage of the floor
///
/// # Errors
/// Any overflow, including a deposit that would push `reserve_in` past
/// `i64::MAX`, and a zero denominator.
pub fn pool_payout(
    reserve_in: i64,
    reserve_out: i64,
    amount_in: i64,
    fee_bips: i32,
    want_slippage: bool,
) -> Result<Payout, CalculationError> {
    if amount_in <= 0 {
        return Err(CalculationError::NonPositiveAmount { amount: amount_in });
    }

    // would this deposit overflow the reserve?
    if reserve_in.checked_add(amount_in).is_none() {
        return Err(CalculationError::DepositOverflow {
            reserve: reserve_in,
            amount: amount_in,
        });
    }

    let x = widen(amount_in);
    let f = fee_complement(fee_bips)?;

    // X + (1 - F) x, upscaled
    let denom = add(mul(widen(reserve_in), CENTIBIPS)?, mul(x, f)?)?;
    // (1 - F) Y x, upscaled
    let numer = mul(mul(widen(reserve_out), x)?, f)?;

    let (result, rem) = div_rem(numer, denom)?;
    let amount_out = narrow(result)?;

    let rounding_slippage_bips = if want_slippage && !rem.is_zero() {
        rounding_slippage(numer, denom, result)?
    } else {
        0
    };

    Ok(Payout {
        amount_out,
        rounding_slippage_bips,
    })
}

/// `|exact - floor(exact)| / exact` in bips.
///
/// The exact payout is recomputed at centibip precision, so the ratio of
/// the truncated amount to it, scaled by [`CENTIBIPS`], is already in bips.
fn rounding_slippage(numer: U256, denom: U256, rounded: U256) -> Result<i64, CalculationError> {
    let (unrounded, _) = div_rem(mul(numer, CENTIBIPS)?, denom)?;
    if unrounded.is_zero() {
        return Ok(FULL_SLIPPAGE_BIPS);
    }

    let lost = sub(unrounded, mul(rounded, CENTIBIPS)?)?;
    let (slippage_bips, _) = div_rem(mul(lost, CENTIBIPS)?, unrounded)?;
    narrow(slippage_bips)
}
