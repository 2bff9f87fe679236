//! Process-unique transaction ids, used only in log lines.

use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static PREFIX: OnceLock<String> = OnceLock::new();

/// Returns `<prefix>-<n>`, where `prefix` is 8 random hex digits chosen once
/// per process and `n` increases on every call.
pub fn next_tx_id() -> String {
    let prefix = PREFIX.get_or_init(|| format!("{:08x}", rand::thread_rng().gen::<u32>()));
    let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", prefix, n)
}
