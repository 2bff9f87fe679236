use crate::context::CancelToken;
use crate::error::StlError;
use crate::tx::Transaction;
use crate::vault::{Occupancy, Vault, VaultOptions};
use crate::Result;
use crossbeam_channel::{select, Receiver, Sender};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The lock table: one [Occupancy] per held resource, behind a single mutex.
///
/// A transaction is tested against the whole table and committed in the same
/// critical section, so no caller ever holds part of what it asked for. That
/// rules out deadlocks whatever order resources are requested in.
///
/// Waiters are woken all at once on every release and race to retry. There is
/// no fairness: a waiter can be overtaken by newcomers indefinitely.
pub struct ResourceVault {
    inner: Mutex<VaultInner>,
}

struct VaultInner {
    resources: HashMap<String, Occupancy>,
    // Dropping the sender wakes every clone of the receiver.
    wait: Option<(Sender<()>, Receiver<()>)>,
}

impl VaultInner {
    fn expose_wait(&mut self) -> Receiver<()> {
        let (_, receiver) = self.wait.get_or_insert_with(|| crossbeam_channel::bounded(0));
        receiver.clone()
    }

    fn notify_wait(&mut self) {
        self.wait.take();
    }
}

impl ResourceVault {
    pub fn new() -> ResourceVault {
        ResourceVault::with_options(VaultOptions::default())
    }

    pub fn with_options(options: VaultOptions) -> ResourceVault {
        ResourceVault {
            inner: Mutex::new(VaultInner {
                resources: HashMap::with_capacity(options.initial_capacity),
                wait: None,
            }),
        }
    }

    /// One test-and-commit attempt. Returns `false` without touching the table
    /// if any resource of `tx` conflicts.
    pub fn try_lock(&self, tx: &impl Transaction) -> bool {
        self.try_lock_or_wait(tx).is_none()
    }

    pub fn occupancy(&self, name: &str) -> Option<Occupancy> {
        self.lock_inner().resources.get(name).copied()
    }

    /// Number of held resources.
    pub fn len(&self) -> usize {
        self.lock_inner().resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> HashMap<String, Occupancy> {
        self.lock_inner().resources.clone()
    }

    fn lock_inner(&self) -> MutexGuard<VaultInner> {
        // Critical sections never panic midway, so the table is consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Commit `tx` and return `None`, or return the wait signal to block on.
    fn try_lock_or_wait(&self, tx: &impl Transaction) -> Option<Receiver<()>> {
        let mut guard = self.lock_inner();
        let inner = &mut *guard;

        let exclusive = tx.list_exclusive();
        let conflict = exclusive
            .iter()
            .any(|name| inner.resources.contains_key(name))
            || shared_only(tx).any(|name| {
                matches!(inner.resources.get(name), Some(occupancy) if occupancy.exclusive)
            });
        if conflict {
            return Some(inner.expose_wait());
        }

        for name in exclusive {
            inner.resources.insert(name.clone(), Occupancy::EXCLUSIVE);
        }
        for name in shared_only(tx) {
            match inner.resources.get_mut(name) {
                Some(occupancy) => occupancy.readers += 1,
                None => {
                    inner.resources.insert(name.clone(), Occupancy::ONE_READER);
                }
            }
        }
        None
    }
}

impl Default for ResourceVault {
    fn default() -> Self {
        ResourceVault::new()
    }
}

impl Vault for ResourceVault {
    fn lock(&self, token: &CancelToken, tx: &impl Transaction) -> Result<()> {
        let done = token.done();
        let deadline = token.deadline_channel();
        loop {
            let wait = match self.try_lock_or_wait(tx) {
                None => {
                    trace!("tx {} locked", tx.tx_id());
                    return Ok(());
                }
                Some(wait) => wait,
            };

            debug!("tx {} waits for a release", tx.tx_id());
            select! {
                recv(wait) -> _ => debug!("tx {} woken, retrying", tx.tx_id()),
                recv(done) -> _ => {
                    let err = token.err().unwrap_or(StlError::Cancelled);
                    info!("tx {} gave up waiting: {}", tx.tx_id(), err);
                    return Err(err);
                }
                recv(deadline) -> _ => {
                    let err = token.err().unwrap_or(StlError::DeadlineExceeded);
                    info!("tx {} gave up waiting: {}", tx.tx_id(), err);
                    return Err(err);
                }
            }
        }
    }

    fn unlock(&self, tx: &impl Transaction) {
        let mut guard = self.lock_inner();
        let inner = &mut *guard;

        for name in tx.list_exclusive() {
            inner.resources.remove(name);
        }
        for name in shared_only(tx) {
            let drained = match inner.resources.get_mut(name) {
                Some(occupancy) if occupancy.readers > 1 => {
                    occupancy.readers -= 1;
                    false
                }
                Some(_) => true,
                None => {
                    warn!("tx {} unlocks `{}` which is not held", tx.tx_id(), name);
                    false
                }
            };
            if drained {
                inner.resources.remove(name);
            }
        }

        trace!("tx {} unlocked", tx.tx_id());
        inner.notify_wait();
    }
}

/// Shared names of `tx` that it does not also request exclusively.
fn shared_only<T: Transaction + ?Sized>(tx: &T) -> impl Iterator<Item = &String> + '_ {
    let exclusive = tx.list_exclusive();
    tx.list_shared()
        .iter()
        .filter(move |name| !exclusive.contains(*name))
}
