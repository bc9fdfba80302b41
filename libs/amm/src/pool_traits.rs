//! Pool trait definitions for the path finder's pool representation

use crate::pool::{AssetIndex, ConstantProductReserves};

/// Pool topology identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolType {
    ConstantProduct,
    /// Discriminant of a topology this engine cannot price
    Unsupported(i32),
}

/// Read-only view of a liquidity pool, as held by the path finder
///
/// The exchange math never asks where this state came from (ledger
/// snapshot, cache, ...) and never mutates it.
pub trait PoolView {
    /// Topology of the pool
    fn pool_type(&self) -> PoolType;

    /// The pool's two assets, in the pool's stored order
    fn assets(&self) -> (AssetIndex, AssetIndex);

    /// Reserves and fee, for constant-product pools only
    fn constant_product(&self) -> Option<ConstantProductReserves>;
}

impl<P: PoolView + ?Sized> PoolView for &P {
    fn pool_type(&self) -> PoolType {
        (**self).pool_type()
    }

    fn assets(&self) -> (AssetIndex, AssetIndex) {
        (**self).assets()
    }

    fn constant_product(&self) -> Option<ConstantProductReserves> {
        (**self).constant_product()
    }
}
