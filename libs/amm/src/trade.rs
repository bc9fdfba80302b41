//! Trade dispatch against a liquidity pool
//!
//! Entry point for the path finder. Two exchanges can be simulated:
//!
//! 1. A **deposit**: you know how much you will *give* the pool and want the
//!    resulting payout, in terms of the *other* asset.
//! 2. An **expectation**: you know how much of the other asset you want to
//!    *receive* and want the deposit needed to get it.
//!
//! Validation failures are reported precisely; every arithmetic failure is
//! collapsed into [`ExchangeError::ExchangeOverflow`], since the path finder
//! only needs to know the hop is infeasible at this amount.

use crate::config::ExchangeConfig;
use crate::error::{CalculationError, ExchangeError};
use crate::expectation::ExpectationCentibips;
use crate::payout::pool_payout;
use crate::pool::AssetIndex;
use crate::pool_traits::{PoolType, PoolView};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Which side of the exchange the amount refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    /// Deposit into pool, what's the payout?
    Deposit,
    /// Expect payout, what to deposit?
    Expectation,
}

impl TryFrom<i32> for TradeDirection {
    type Error = ExchangeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Deposit),
            1 => Ok(Self::Expectation),
            _ => Err(ExchangeError::InvalidTradeDirection { code }),
        }
    }
}

impl From<TradeDirection> for i32 {
    fn from(direction: TradeDirection) -> Self {
        match direction {
            TradeDirection::Deposit => 0,
            TradeDirection::Expectation => 1,
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Expectation => write!(f, "expectation"),
        }
    }
}

/// Slippage reported for an expectation whose exact deposit is below one
/// centibip, where the relative error cannot be measured.
pub const UNBOUNDED_SLIPPAGE_BIPS: i64 = i64::MAX;

/// Simulated trade with its execution-quality metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeQuote {
    pub direction: TradeDirection,
    /// Payout for a deposit, required deposit for an expectation
    pub amount: i64,
    /// Rounding slippage in bips, when it was measured
    pub rounding_slippage_bips: Option<i64>,
}

impl TradeQuote {
    /// Rounding slippage as a percentage, for reporting
    pub fn rounding_slippage_pct(&self) -> Option<Decimal> {
        self.rounding_slippage_bips.map(|bips| Decimal::new(bips, 2))
    }

    /// Whether the hop's rounding slippage is within the configured ceiling.
    ///
    /// Quotes without a measured slippage are accepted.
    pub fn is_acceptable(&self, config: &ExchangeConfig) -> bool {
        match self.rounding_slippage_bips {
            Some(bips) if bips > config.max_rounding_slippage_bips => {
                debug!(
                    direction = %self.direction,
                    amount = self.amount,
                    slippage_bips = bips,
                    max_bips = config.max_rounding_slippage_bips,
                    "Rounding slippage exceeds ceiling"
                );
                false
            }
            _ => true,
        }
    }
}

/// Simulate an exchange with a liquidity pool.
///
/// For [`TradeDirection::Deposit`] this returns the amount paid out by the
/// pool (in the *other* asset) for depositing `amount` of `deposited`.
///
/// For [`TradeDirection::Expectation`] this returns the amount of
/// `deposited` needed to receive `amount` of the *other* asset.
///
/// `deposited` must be one of the pool's assets; any asset other than the
/// pool's first one is treated as its second.
pub fn simulate_trade<P: PoolView + ?Sized>(
    pool: &P,
    deposited: AssetIndex,
    direction: TradeDirection,
    amount: i64,
) -> Result<i64, ExchangeError> {
    dispatch(pool, deposited, direction, amount, false).map(|quote| quote.amount)
}

/// Simulate an exchange and, when configured, measure its rounding slippage.
///
/// The slippage is that of the payout's floor for a deposit, or of the
/// deposit's ceiling for an expectation.
pub fn quote_trade<P: PoolView + ?Sized>(
    pool: &P,
    deposited: AssetIndex,
    direction: TradeDirection,
    amount: i64,
    config: &ExchangeConfig,
) -> Result<TradeQuote, ExchangeError> {
    dispatch(pool, deposited, direction, amount, config.compute_rounding_slippage)
}

/// Returns the pool asset that is not `asset`.
///
/// Does not check that `asset` belongs to the pool; if it doesn't, the
/// pool's first asset is returned.
pub fn other_asset<P: PoolView + ?Sized>(pool: &P, asset: AssetIndex) -> AssetIndex {
    let (asset_a, asset_b) = pool.assets();
    if asset_a == asset {
        asset_b
    } else {
        asset_a
    }
}

fn dispatch<P: PoolView + ?Sized>(
    pool: &P,
    deposited: AssetIndex,
    direction: TradeDirection,
    amount: i64,
    want_slippage: bool,
) -> Result<TradeQuote, ExchangeError> {
    let reserves = match pool.pool_type() {
        PoolType::ConstantProduct => pool.constant_product(),
        PoolType::Unsupported(_) => None,
    }
    .ok_or(ExchangeError::InvalidPoolType)?;

    if amount <= 0 {
        return Err(ExchangeError::InvalidAmount { amount });
    }

    let (asset_a, _) = pool.assets();
    let (reserve_in, reserve_out) = reserves.oriented(asset_a == deposited);
    let fee_bips = reserves.fee_bips;

    trace!(
        %direction,
        %deposited,
        reserve_in,
        reserve_out,
        fee_bips,
        amount,
        "Simulating pool exchange"
    );

    let result = match direction {
        TradeDirection::Deposit => {
            pool_payout(reserve_in, reserve_out, amount, fee_bips, want_slippage).map(|payout| {
                (
                    payout.amount_out,
                    want_slippage.then_some(payout.rounding_slippage_bips),
                )
            })
        }
        TradeDirection::Expectation => {
            // the pool cannot disburse its entire reserve, or more
            if amount >= reserve_out {
                return Err(ExchangeError::InvalidAmount { amount });
            }
            expectation_with_slippage(reserve_in, reserve_out, amount, fee_bips, want_slippage)
        }
    };

    match result {
        Ok((amount, rounding_slippage_bips)) => Ok(TradeQuote {
            direction,
            amount,
            rounding_slippage_bips,
        }),
        Err(err) => {
            // not strictly accurate (e.g. div-by-0), but true enough for the caller
            debug!(
                %direction,
                reserve_in,
                reserve_out,
                fee_bips,
                amount,
                error = %err,
                "Pool exchange infeasible"
            );
            Err(ExchangeError::ExchangeOverflow)
        }
    }
}

fn expectation_with_slippage(
    reserve_in: i64,
    reserve_out: i64,
    desired_out: i64,
    fee_bips: i32,
    want_slippage: bool,
) -> Result<(i64, Option<i64>), CalculationError> {
    let expectation =
        ExpectationCentibips::compute(reserve_in, reserve_out, desired_out, fee_bips)?;
    let deposit = expectation.deposit()?;
    if !want_slippage {
        return Ok((deposit, None));
    }
    // a sub-centibip deposit is still a feasible trade; the ceiling rejects it
    let slippage = match expectation.rounding_slippage_bips() {
        Err(CalculationError::SlippageUnbounded) => UNBOUNDED_SLIPPAGE_BIPS,
        other => other?,
    };
    Ok((deposit, Some(slippage)))
}
