//! Vaults hold the lock state of named resources.

mod discard_vault;
mod options;
mod resource_vault;

use crate::context::CancelToken;
use crate::tx::Transaction;
use crate::Result;

pub use discard_vault::DiscardVault;
pub use options::VaultOptions;
pub use resource_vault::ResourceVault;

/// Locks and unlocks all resources of a [Transaction] as one unit.
pub trait Vault {
    /// Block until every resource of `tx` is held, or until `token` fires.
    ///
    /// On error nothing is held.
    fn lock(&self, token: &CancelToken, tx: &impl Transaction) -> Result<()>;

    /// Release the resources of `tx`.
    ///
    /// `tx` must be the one passed to a successful [Vault::lock]. This is not
    /// checked: releasing anything else corrupts the lock state of the
    /// resources it names.
    fn unlock(&self, tx: &impl Transaction);
}

/// Lock state of one held resource.
///
/// `exclusive` implies `readers == 0`. Free resources have no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub readers: usize,
    pub exclusive: bool,
}

impl Occupancy {
    pub(crate) const EXCLUSIVE: Occupancy = Occupancy {
        readers: 0,
        exclusive: true,
    };

    pub(crate) const ONE_READER: Occupancy = Occupancy {
        readers: 1,
        exclusive: false,
    };
}
