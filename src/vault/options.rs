pub struct VaultOptions {
    /// Number of held resources the table has room for before it reallocates.
    pub initial_capacity: usize,
}

impl Default for VaultOptions {
    fn default() -> Self {
        VaultOptions {
            initial_capacity: 16,
        }
    }
}
