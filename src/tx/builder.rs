use crate::tx::id::next_tx_id;
use crate::tx::{check_name, Builder, Transaction};

/// The default transaction descriptor.
///
/// ```
/// use stlock::{Builder, Transaction, Tx};
///
/// let tx = Tx::new().exclusive("terminal").shared("network");
/// assert_eq!(tx.list_exclusive(), ["terminal"]);
/// assert_eq!(tx.list_shared(), ["network"]);
/// ```
#[derive(Debug, Clone)]
pub struct Tx {
    id: String,
    shared: Vec<String>,
    exclusive: Vec<String>,
}

impl Tx {
    pub fn new() -> Tx {
        Tx::from_parts(Vec::new(), Vec::new())
    }

    pub(crate) fn from_parts(shared: Vec<String>, exclusive: Vec<String>) -> Tx {
        Tx {
            id: next_tx_id(),
            shared,
            exclusive,
        }
    }

    /// Append `name` to the shared list.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn add_shared(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        check_name(&name);
        self.shared.push(name);
        self
    }

    /// Append `name` to the exclusive list.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn add_exclusive(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        check_name(&name);
        self.exclusive.push(name);
        self
    }
}

impl Default for Tx {
    fn default() -> Self {
        Tx::new()
    }
}

impl Transaction for Tx {
    #[inline]
    fn tx_id(&self) -> &str {
        &self.id
    }

    #[inline]
    fn list_shared(&self) -> &[String] {
        &self.shared
    }

    #[inline]
    fn list_exclusive(&self) -> &[String] {
        &self.exclusive
    }
}

impl Builder for Tx {
    fn shared(mut self, name: impl Into<String>) -> Self {
        self.add_shared(name);
        self
    }

    fn exclusive(mut self, name: impl Into<String>) -> Self {
        self.add_exclusive(name);
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::tx::{Builder, Transaction, Tx};

    #[test]
    fn test_build() {
        let tx = Tx::new()
            .shared("a")
            .exclusive("b")
            .shared("c")
            .shared("a")
            .exclusive("a");
        assert_eq!(tx.list_shared(), ["a", "c", "a"]);
        assert_eq!(tx.list_exclusive(), ["b", "a"]);
        assert!(!tx.is_empty());
        assert!(Tx::new().is_empty());
    }

    #[test]
    fn test_add_in_place() {
        let mut tx = Tx::default();
        for i in 0..3 {
            tx.add_exclusive(format!("row{}", i));
        }
        tx.add_shared("table").add_shared("db");
        assert_eq!(tx.list_exclusive(), ["row0", "row1", "row2"]);
        assert_eq!(tx.list_shared(), ["table", "db"]);
    }

    #[test]
    fn test_unique_id() {
        let tx1 = Tx::new();
        let tx2 = Tx::new();
        assert_ne!(tx1.tx_id(), tx2.tx_id());
    }

    #[test]
    #[should_panic(expected = "resource name must not be empty")]
    fn test_empty_shared_name() {
        let _ = Tx::new().shared("");
    }

    #[test]
    #[should_panic(expected = "resource name must not be empty")]
    fn test_empty_exclusive_name() {
        Tx::new().add_exclusive(String::new());
    }
}
