//! # Orderbook AMM - Liquidity Pool Exchange Simulation
//!
//! ## Purpose
//!
//! Exact-integer simulation of trades against constant-product liquidity pools for the
//! path-finding order book. Answers two dual questions for a pool hop: how much is paid
//! out for a known deposit, and how much must be deposited for a desired payout. Also
//! measures the rounding slippage introduced by truncating the exact rational result.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool reserves and fee from the path finder's [`PoolView`]
//! - **Output Destinations**: Path search, which discards infeasible or low-quality hops
//! - **Precision**: Ledger amounts are `i64`; intermediate math is 256-bit, upscaled by
//!   [`CENTIBIPS`] so the fee fraction is never truncated early
//! - **Validation**: Every overflow is reported, never wrapped
//!
//! ## Architecture Role
//!
//! ```text
//! Path Search → [Trade Dispatch] → Payout / Expectation → Fixed-Point Layer
//!                     ↓                     ↓
//!             Pool/Amount Validation   Rounding Slippage
//! ```
//!
//! All entry points are pure functions over value inputs: no shared state, no I/O,
//! safe to call from any number of threads.
//!
//! See [`architecture_diagram()`] for visual representation of the data flow.

pub mod config;
pub mod error;
pub mod expectation;
pub mod fixed_point;
pub mod payout;
pub mod pool;
pub mod pool_traits;
pub mod trade;

pub use config::ExchangeConfig;
pub use error::{CalculationError, ExchangeError};
pub use expectation::{pool_expectation, pool_expectation_rounding_slippage};
pub use fixed_point::{BIPS, CENTIBIPS, U256};
pub use payout::{pool_payout, Payout};
pub use pool::{AssetIndex, ConstantProductReserves, LiquidityPool, PoolBody};
pub use pool_traits::{PoolType, PoolView};
pub use trade::{
    other_asset, quote_trade, simulate_trade, TradeDirection, TradeQuote, UNBOUNDED_SLIPPAGE_BIPS,
};

/// Architecture diagram showing pool exchange data flow and component relationships
#[cfg_attr(doc, aquamarine::aquamarine)]
/// ```mermaid
/// graph LR
///     subgraph Input["📊 Path Finder"]
///         PV[Pool View]
///         DA[Deposited Asset]
///         TD[Trade Direction]
///         AM[Amount]
///     end
///
///     subgraph Dispatch["🔀 Trade Dispatch"]
///         VA[Validation]
///         OR[Reserve Orientation]
///     end
///
///     subgraph Math["🧮 Exchange Math"]
///         PO[Payout]
///         EX[Expectation]
///         RS[Rounding Slippage]
///     end
///
///     subgraph Wide["📐 Fixed-Point Layer"]
///         U2[U256 Checked Ops]
///         NA[Narrow to i64]
///     end
///
///     PV --> VA
///     DA --> OR
///     TD --> VA
///     AM --> VA
///
///     VA --> OR
///     OR --> PO
///     OR --> EX
///     PO --> RS
///     EX --> RS
///
///     PO --> U2
///     EX --> U2
///     U2 --> NA
///
///     style Input fill:#e1f5fe
///     style Dispatch fill:#fff3e0
///     style Math fill:#f3e5f5
///     style Wide fill:#e8f5e9
/// ```
pub fn architecture_diagram() {
    // This function exists solely for documentation purposes
    // The diagram is rendered by aquamarine in rustdoc
}
