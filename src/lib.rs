//! Software transactional locks.
//!
//! Any number of named resources can be locked atomically and without
//! deadlocks. Each resource is locked either `exclusive` (one holder at a
//! time) or `shared` (any number of shared holders, no exclusive one). All
//! resources of a transaction are taken in one step or not at all, so callers
//! need no lock ordering.
//!
//! ```
//! use stlock::{Builder, ResourceVault, Tx};
//!
//! // A vault holds the state of all locked resources.
//! let vault = ResourceVault::new();
//!
//! let locker = Tx::new().exclusive("terminal").shared("network").to_locker(&vault);
//! locker.lock();
//! // ...
//! locker.unlock();
//! ```
//!
//! Waiting can be cancelled or bounded with a [CancelToken]:
//!
//! ```
//! use std::time::Duration;
//! use stlock::{Builder, CancelToken, ResourceVault, StlError, Tx};
//!
//! let vault = ResourceVault::new();
//! let holder = Tx::new().exclusive("printer").to_locker(&vault);
//! holder.lock();
//!
//! let locker = Tx::new().shared("printer").to_locker(&vault);
//! let token = CancelToken::with_timeout(Duration::from_millis(10));
//! assert_eq!(locker.lock_with_token(&token), Err(StlError::DeadlineExceeded));
//! ```

#[macro_use]
extern crate log;

pub use context::CancelToken;
pub use error::StlError;
pub use locker::{Locker, LockerGuard};
pub use tx::combine::{join, merge};
pub use tx::{Builder, StackedTx, Transaction, Tx};
pub use vault::{DiscardVault, Occupancy, ResourceVault, Vault, VaultOptions};

mod context;
pub mod error;
mod locker;
pub mod tx;
pub mod vault;

pub type Result<T> = std::result::Result<T, error::StlError>;
