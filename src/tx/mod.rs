//! Transaction descriptors: the named resources a caller wants to hold together.

mod builder;
pub mod combine;
pub mod id;
mod stacked;

use crate::locker::Locker;
use crate::vault::Vault;

pub use builder::Tx;
pub use stacked::StackedTx;

/// Names of shared and exclusive resources to be locked atomically.
///
/// A name may appear in both lists. A [Vault] then holds it exclusively.
pub trait Transaction {
    fn tx_id(&self) -> &str;
    fn list_shared(&self) -> &[String];
    fn list_exclusive(&self) -> &[String];

    #[inline]
    fn is_empty(&self) -> bool {
        self.list_shared().is_empty() && self.list_exclusive().is_empty()
    }
}

impl<T: Transaction + ?Sized> Transaction for &T {
    fn tx_id(&self) -> &str {
        (**self).tx_id()
    }

    fn list_shared(&self) -> &[String] {
        (**self).list_shared()
    }

    fn list_exclusive(&self) -> &[String] {
        (**self).list_exclusive()
    }
}

/// Fluent construction of a [Transaction].
///
/// # Panics
///
/// `shared` and `exclusive` panic on an empty resource name.
pub trait Builder: Transaction + Sized {
    fn shared(self, name: impl Into<String>) -> Self;
    fn exclusive(self, name: impl Into<String>) -> Self;

    /// Bind the built transaction to `vault`.
    fn to_locker<V: Vault>(self, vault: &V) -> Locker<'_, V, Self> {
        Locker::new(vault, self)
    }
}

pub(crate) fn check_name(name: &str) {
    assert!(!name.is_empty(), "resource name must not be empty");
}
