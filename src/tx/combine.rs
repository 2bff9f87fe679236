//! Fold several transactions into one that is locked as a single unit.
//!
//! Every name requested exclusively by any input comes out exclusive, even if
//! other inputs (earlier or later) ask for it shared. Names only ever requested
//! shared come out shared. Each name appears once, in exactly one list.

use crate::tx::{Transaction, Tx};
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Shared,
    Exclusive,
}

/// Merge `txs` into a fresh [Tx].
///
/// Names keep the order in which they are first seen, scanning every shared
/// list before any exclusive list.
pub fn merge<'a, I, T>(txs: I) -> Tx
where
    I: IntoIterator<Item = &'a T>,
    T: Transaction + ?Sized + 'a,
{
    let txs: Vec<&T> = txs.into_iter().collect();
    let mut order: Vec<&str> = Vec::new();
    let mut modes: HashMap<&str, Mode> = HashMap::new();

    for tx in &txs {
        for name in tx.list_shared() {
            modes.entry(name.as_str()).or_insert_with(|| {
                order.push(name.as_str());
                Mode::Shared
            });
        }
    }
    // Runs over all inputs after the shared pass so input order cannot matter.
    for tx in &txs {
        for name in tx.list_exclusive() {
            if modes.insert(name.as_str(), Mode::Exclusive).is_none() {
                order.push(name.as_str());
            }
        }
    }

    let (exclusive, shared): (Vec<&str>, Vec<&str>) = order
        .into_iter()
        .partition(|name| modes[name] == Mode::Exclusive);

    Tx::from_parts(to_owned(shared), to_owned(exclusive))
}

/// Same as [merge], with both lists sorted by name.
pub fn join<'a, I, T>(txs: I) -> Tx
where
    I: IntoIterator<Item = &'a T>,
    T: Transaction + ?Sized + 'a,
{
    let merged = merge(txs);
    let mut shared = merged.list_shared().to_vec();
    let mut exclusive = merged.list_exclusive().to_vec();
    shared.sort_unstable();
    exclusive.sort_unstable();
    Tx::from_parts(shared, exclusive)
}

fn to_owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(String::from).collect()
}
