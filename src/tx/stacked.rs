use crate::tx::id::next_tx_id;
use crate::tx::{check_name, Builder, Transaction};

/// A descriptor for nested resources.
///
/// Every added name is appended to a running prefix, and the whole prefix is
/// what gets locked. `shared("db/").shared("users/").exclusive("42")` locks
/// `db/` and `db/users/` shared and `db/users/42` exclusive, so two stacks
/// that share a parent do not block each other on it.
#[derive(Debug, Clone)]
pub struct StackedTx {
    id: String,
    prefix: String,
    shared: Vec<String>,
    exclusive: Vec<String>,
}

impl StackedTx {
    pub fn new() -> StackedTx {
        StackedTx {
            id: next_tx_id(),
            prefix: String::new(),
            shared: Vec::new(),
            exclusive: Vec::new(),
        }
    }

    fn push(&mut self, name: &str) -> String {
        check_name(name);
        self.prefix.push_str(name);
        self.prefix.clone()
    }
}

impl Default for StackedTx {
    fn default() -> Self {
        StackedTx::new()
    }
}

impl Transaction for StackedTx {
    fn tx_id(&self) -> &str {
        &self.id
    }

    fn list_shared(&self) -> &[String] {
        &self.shared
    }

    fn list_exclusive(&self) -> &[String] {
        &self.exclusive
    }
}

impl Builder for StackedTx {
    fn shared(mut self, name: impl Into<String>) -> Self {
        let full = self.push(&name.into());
        self.shared.push(full);
        self
    }

    fn exclusive(mut self, name: impl Into<String>) -> Self {
        let full = self.push(&name.into());
        self.exclusive.push(full);
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::tx::{Builder, StackedTx, Transaction};

    #[test]
    fn test_stacked_names() {
        let tx = StackedTx::new()
            .shared("db/")
            .shared("users/")
            .exclusive("42");
        assert_eq!(tx.list_shared(), ["db/", "db/users/"]);
        assert_eq!(tx.list_exclusive(), ["db/users/42"]);
    }

    #[test]
    fn test_exclusive_parent() {
        let tx = StackedTx::new().exclusive("a1").shared("s1");
        assert_eq!(tx.list_exclusive(), ["a1"]);
        assert_eq!(tx.list_shared(), ["a1s1"]);
    }

    #[test]
    #[should_panic]
    fn test_empty_name() {
        let _ = StackedTx::new().shared("a").exclusive("");
    }
}
