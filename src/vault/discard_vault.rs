use crate::context::CancelToken;
use crate::tx::Transaction;
use crate::vault::Vault;
use crate::Result;

/// A [Vault] that never blocks and holds nothing.
///
/// Lets call sites keep their lock calls while locking is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardVault;

impl DiscardVault {
    pub fn new() -> DiscardVault {
        DiscardVault
    }
}

impl Vault for DiscardVault {
    #[inline]
    fn lock(&self, _token: &CancelToken, _tx: &impl Transaction) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn unlock(&self, _tx: &impl Transaction) {}
}

#[cfg(test)]
mod tests {
    use crate::context::CancelToken;
    use crate::tx::{Builder, Tx};
    use crate::vault::{DiscardVault, Vault};

    #[test]
    fn test_never_blocks() {
        let vault = DiscardVault::new();
        let token = CancelToken::new();
        token.cancel();
        let tx = Tx::new().exclusive("r");
        for _ in 0..3 {
            assert_eq!(vault.lock(&token, &tx), Ok(()));
        }
        vault.unlock(&tx);
        vault.unlock(&tx);
    }
}
