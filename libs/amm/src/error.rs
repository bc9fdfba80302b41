//! Error types for pool exchange simulation
//!
//! [`CalculationError`] carries the precise arithmetic cause from the payout
//! and expectation calculators. [`ExchangeError`] is what the path finder
//! sees: validation failures stay distinguishable, while every arithmetic
//! failure collapses into [`ExchangeError::ExchangeOverflow`].

use thiserror::Error;

/// Failures raised inside the payout and expectation calculators
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CalculationError {
    /// Trade amounts must be strictly positive
    #[error("Amount must be positive: {amount}")]
    NonPositiveAmount { amount: i64 },

    /// Depositing the amount would push the input reserve past `i64::MAX`
    #[error("Deposit of {amount} overflows reserve of {reserve}")]
    DepositOverflow { reserve: i64, amount: i64 },

    /// The pool cannot disburse its entire reserve (or more)
    #[error("Payout of {desired} would exhaust reserve of {reserve}")]
    ReserveExhausted { reserve: i64, desired: i64 },

    /// Fee has no representable complement `1 - F`
    #[error("Fee of {fee_bips} bips is outside [0, 10000]")]
    FeeOutOfRange { fee_bips: i32 },

    /// Denominator of the exchange formula collapsed to zero
    #[error("Division by zero in pool exchange formula")]
    ZeroDenominator,

    /// Intermediate product or sum exceeded 256 bits
    #[error("Intermediate value overflows 256 bits")]
    WideOverflow,

    /// Result does not fit in a non-negative 64-bit amount
    #[error("Result exceeds maximum ledger amount")]
    NarrowingOverflow,

    /// Exact deposit is below one centibip, relative error is unbounded
    #[error("Rounding slippage is unbounded for sub-centibip deposit")]
    SlippageUnbounded,
}

/// Errors reported by the trade dispatcher
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Unsupported liquidity pool: must be ConstantProduct")]
    InvalidPoolType,

    #[error("Unknown pool exchange type requested: {code}")]
    InvalidTradeDirection { code: i32 },

    #[error("Exchange amount must be positive and below the disbursing reserve: {amount}")]
    InvalidAmount { amount: i64 },

    #[error("Liquidity pool overflows from this exchange")]
    ExchangeOverflow,
}
