//! In-process tables backing the memory stores.
//!
//! Used when no database is configured and by the test suite. Ids are
//! assigned sequentially from 1 and never reused, like a `SERIAL` column.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;

pub struct Table<T> {
    rows: Mutex<Rows<T>>,
    unavailable: AtomicBool,
}

pub struct Rows<T> {
    next_id: i32,
    by_id: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Rows {
                next_id: 1,
                by_id: BTreeMap::new(),
            }),
            unavailable: AtomicBool::new(false),
        }
    }
}

impl<T> Table<T> {
    /// Makes every following operation fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Rows<T>>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        self.rows
            .lock()
            .map_err(|_| StoreError::Unavailable("table lock poisoned".to_string()))
    }
}

impl<T: Clone> Rows<T> {
    /// Stores the row built for the next id and returns a copy of it.
    pub fn insert(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.by_id.insert(id, row.clone());
        row
    }

    pub fn all(&self) -> Vec<T> {
        self.by_id.values().cloned().collect()
    }

    pub fn get(&self, id: i32) -> Option<T> {
        self.by_id.get(&id).cloned()
    }

    pub fn get_mut(&mut self, id: i32) -> Option<&mut T> {
        self.by_id.get_mut(&id)
    }

    pub fn remove(&mut self, id: i32) -> u64 {
        u64::from(self.by_id.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let table = Table::<(i32, &str)>::default();
        let mut rows = table.lock().unwrap();

        assert_eq!(rows.insert(|id| (id, "a")).0, 1);
        assert_eq!(rows.insert(|id| (id, "b")).0, 2);
        assert_eq!(rows.remove(2), 1);
        assert_eq!(rows.remove(2), 0);
        assert_eq!(rows.insert(|id| (id, "c")).0, 3);
        assert_eq!(rows.all(), vec![(1, "a"), (3, "c")]);
    }

    #[test]
    fn unavailable_table_refuses_access() {
        let table = Table::<i32>::default();
        table.set_unavailable(true);
        assert!(matches!(table.lock(), Err(StoreError::Unavailable(_))));

        table.set_unavailable(false);
        assert!(table.lock().is_ok());
    }
}
