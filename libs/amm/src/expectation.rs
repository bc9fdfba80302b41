//! Required deposit for a desired constant-product payout
//!
//! The inverse of [`crate::payout`]:
//!
//! ```text
//! x = ceil[ X y / ((Y - y)(1 - F)) ]
//! ```
//!
//! The deposit is rounded up, since depositing less would not produce `y`.
//! The deposit and its rounding slippage share one wide division through
//! [`ExpectationCentibips`].

use crate::error::CalculationError;
use crate::fixed_point::{
    add, div_rem, fee_complement, mul, narrow, sub, widen, U256, CENTIBIPS,
};

/// Deposit needed for a payout, upscaled by [`CENTIBIPS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExpectationCentibips {
    /// `floor(exact * CENTIBIPS)`
    unrounded: U256,
    /// Exact deposit rounded up to a whole amount, still upscaled
    rounded: U256,
    /// The exact deposit is already a whole amount
    integral: bool,
}

impl ExpectationCentibips {
    /// Determine how much of `reserve_in` must go into the pool to get
    /// `desired_out` of `reserve_out`, keeping 4 extra decimals.
    pub(crate) fn compute(
        reserve_in: i64,
        reserve_out: i64,
        desired_out: i64,
        fee_bips: i32,
    ) -> Result<Self, CalculationError> {
        if desired_out <= 0 {
            return Err(CalculationError::NonPositiveAmount {
                amount: desired_out,
            });
        }

        // disbursing must not exhaust the reserve
        if desired_out >= reserve_out {
            return Err(CalculationError::ReserveExhausted {
                reserve: reserve_out,
                desired: desired_out,
            });
        }

        let y = widen(desired_out);
        let f = fee_complement(fee_bips)?;

        // (Y - y)(1 - F), upscaled once by the fee complement
        let denom = mul(sub(widen(reserve_out), y)?, f)?;
        // X y, upscaled once to match the denominator and once more for precision
        let numer = mul(mul(widen(reserve_in), y)?, mul(CENTIBIPS, CENTIBIPS)?)?;

        let (unrounded, rem) = div_rem(numer, denom)?;
        let (_, fraction) = div_rem(unrounded, CENTIBIPS)?;

        let integral = rem.is_zero() && fraction.is_zero();
        let rounded = if integral {
            unrounded
        } else {
            // anything past the last whole unit, even below a centibip, rounds up
            add(sub(unrounded, fraction)?, CENTIBIPS)?
        };

        Ok(Self {
            unrounded,
            rounded,
            integral,
        })
    }

    /// Required deposit, downscaled back to ledger units
    pub(crate) fn deposit(&self) -> Result<i64, CalculationError> {
        let (whole, _) = div_rem(self.rounded, CENTIBIPS)?;
        narrow(whole)
    }

    /// `(ceil(exact) - exact) / exact` in bips
    pub(crate) fn rounding_slippage_bips(&self) -> Result<i64, CalculationError> {
        if self.integral {
            return Ok(0);
        }
        if self.unrounded.is_zero() {
            return Err(CalculationError::SlippageUnbounded);
        }

        let excess = sub(self.rounded, self.unrounded)?;
        let (slippage_bips, _) = div_rem(mul(excess, CENTIBIPS)?, self.unrounded)?;
        narrow(slippage_bips)
    }
}

/// Calculate how much of `reserve_in` must be deposited to receive
/// `desired_out` of `reserve_out`.
///
/// # Errors
/// `desired_out` must be positive and strictly below `reserve_out`; any
/// overflow or zero denominator (e.g. a 100% fee) also fails.
pub fn pool_expectation(
    reserve_in: i64,
    reserve_out: i64,
    desired_out: i64,
    fee_bips: i32,
) -> Result<i64, CalculationError> {
    ExpectationCentibips::compute(reserve_in, reserve_out, desired_out, fee_bips)?.deposit()
}

/// Calculate the rounding slippage (in bips) of [`pool_expectation`].
///
/// Slippage is how far the rounded-up deposit deviates from the exact
/// deposit, relative to the exact deposit:
///
/// ```text
/// unrounded = X y / ((Y - y)(1 - F))
/// S = (ceil(unrounded) - unrounded) / unrounded
/// ```
///
/// For X = 200, Y = 300, y = 3 and F = 0.3%, the exact deposit is about
/// 2.0263, so depositing 3 carries about 48% slippage.
pub fn pool_expectation_rounding_slippage(
    reserve_in: i64,
    reserve_out: i64,
    desired_out: i64,
    fee_bips: i32,
) -> Result<i64, CalculationError> {
    ExpectationCentibips::compute(reserve_in, reserve_out, desired_out, fee_bips)?
        .rounding_slippage_bips()
}
