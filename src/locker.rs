use crate::context::CancelToken;
use crate::tx::Transaction;
use crate::vault::Vault;
use crate::Result;

/// A transaction bound to a vault.
///
/// The locker does not track whether it holds its resources: every
/// [Locker::unlock] must follow a successful lock.
pub struct Locker<'a, V: Vault, T: Transaction> {
    vault: &'a V,
    tx: T,
}

impl<'a, V: Vault, T: Transaction> Locker<'a, V, T> {
    pub fn new(vault: &'a V, tx: T) -> Locker<'a, V, T> {
        Locker { vault, tx }
    }

    /// Block until all resources are held.
    pub fn lock(&self) {
        // a background token never fires, so this cannot fail
        let _ = self.vault.lock(&CancelToken::background(), &self.tx);
    }

    pub fn unlock(&self) {
        self.vault.unlock(&self.tx);
    }

    /// Block until all resources are held or `token` fires.
    pub fn lock_with_token(&self, token: &CancelToken) -> Result<()> {
        self.vault.lock(token, &self.tx)
    }

    /// [Locker::lock], returning a guard that unlocks on drop.
    pub fn guard(&self) -> LockerGuard<'_, 'a, V, T> {
        self.lock();
        LockerGuard { locker: self }
    }

    pub fn guard_with_token(&self, token: &CancelToken) -> Result<LockerGuard<'_, 'a, V, T>> {
        self.lock_with_token(token)?;
        Ok(LockerGuard { locker: self })
    }

    pub fn tx(&self) -> &T {
        &self.tx
    }

    pub fn into_tx(self) -> T {
        self.tx
    }
}

pub struct LockerGuard<'l, 'a, V: Vault, T: Transaction> {
    locker: &'l Locker<'a, V, T>,
}

impl<V: Vault, T: Transaction> Drop for LockerGuard<'_, '_, V, T> {
    fn drop(&mut self) {
        self.locker.unlock();
    }
}
