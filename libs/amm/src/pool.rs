//! Liquidity pool state consumed by the exchange simulation

use crate::pool_traits::{PoolType, PoolView};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an asset in the path finder's asset table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetIndex(pub i32);

impl fmt::Display for AssetIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset#{}", self.0)
    }
}

impl From<i32> for AssetIndex {
    fn from(index: i32) -> Self {
        Self(index)
    }
}

/// Reserves and fee of a constant-product pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantProductReserves {
    /// Balance of the pool's first asset
    pub reserve_a: i64,
    /// Balance of the pool's second asset
    pub reserve_b: i64,
    /// Fee in basis points (30 = 0.3%)
    pub fee_bips: i32,
}

impl ConstantProductReserves {
    /// `(reserve_in, reserve_out)` for a deposit of the first asset
    /// (`deposits_a`) or of the second.
    #[inline]
    pub fn oriented(&self, deposits_a: bool) -> (i64, i64) {
        if deposits_a {
            (self.reserve_a, self.reserve_b)
        } else {
            (self.reserve_b, self.reserve_a)
        }
    }
}

/// Topology-specific pool state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolBody {
    ConstantProduct(ConstantProductReserves),
    /// A pool type newer than this engine, carried by its discriminant
    Unsupported { pool_type: i32 },
}

/// A liquidity pool as seen by the path finder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPool {
    pub asset_a: AssetIndex,
    pub asset_b: AssetIndex,
    pub body: PoolBody,
}

impl LiquidityPool {
    pub fn constant_product(
        asset_a: AssetIndex,
        asset_b: AssetIndex,
        reserve_a: i64,
        reserve_b: i64,
        fee_bips: i32,
    ) -> Self {
        Self {
            asset_a,
            asset_b,
            body: PoolBody::ConstantProduct(ConstantProductReserves {
                reserve_a,
                reserve_b,
                fee_bips,
            }),
        }
    }
}

impl PoolView for LiquidityPool {
    fn pool_type(&self) -> PoolType {
        match self.body {
            PoolBody::ConstantProduct(_) => PoolType::ConstantProduct,
            PoolBody::Unsupported { pool_type } => PoolType::Unsupported(pool_type),
        }
    }

    fn assets(&self) -> (AssetIndex, AssetIndex) {
        (self.asset_a, self.asset_b)
    }

    fn constant_product(&self) -> Option<ConstantProductReserves> {
        match self.body {
            PoolBody::ConstantProduct(reserves) => Some(reserves),
            PoolBody::Unsupported { .. } => None,
        }
    }
}
