//! Key-value network tables.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Numeric entries grouped under named tables.
///
/// Writes take `&self`: a table is shared between the robot program and the
/// network peer, and implementations handle their own synchronization.
pub trait NetworkTable: Send + Sync {
    /// Current value of `key` in `table`, or `None` if it was never published.
    fn get_number(&self, table: &str, key: &str) -> Option<f64>;

    /// Publish `value` under `key` in `table`, replacing any previous value.
    fn set_number(&self, table: &str, key: &str, value: f64);
}

impl<T: NetworkTable + ?Sized> NetworkTable for Arc<T> {
    fn get_number(&self, table: &str, key: &str) -> Option<f64> {
        (**self).get_number(table, key)
    }

    fn set_number(&self, table: &str, key: &str, value: f64) {
        (**self).set_number(table, key, value);
    }
}

/// Process-local table store.
///
/// Used in tests and on the bench, where no network peer is attached.
#[derive(Debug, Default)]
pub struct InMemoryTable {
    tables: RwLock<HashMap<String, HashMap<String, f64>>>,
}

impl InMemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys published in `table`, sorted.
    pub fn keys(&self, table: &str) -> Vec<String> {
        let tables = self.tables.read();
        let mut keys: Vec<String> = tables
            .get(table)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Drop every entry of `table`.
    pub fn clear(&self, table: &str) {
        self.tables.write().remove(table);
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().values().all(HashMap::is_empty)
    }
}

impl NetworkTable for InMemoryTable {
    fn get_number(&self, table: &str, key: &str) -> Option<f64> {
        self.tables
            .read()
            .get(table)
            .and_then(|entries| entries.get(key))
            .copied()
    }

    fn set_number(&self, table: &str, key: &str, value: f64) {
        self.tables
            .write()
            .entry(table.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
    }
}
