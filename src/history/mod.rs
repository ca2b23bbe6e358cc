// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bounded, newest-first history lists scoped to a session category

use serde_json::Value;
use thiserror::Error;

/// Default capacity of a history list.
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Session-scoped key/value state the history component is given.
///
/// The owning session store decides how the lists are persisted; the
/// history component only signals that a mutation occurred via
/// [`SessionState::mark_dirty`].
pub trait SessionState {
    fn get(&self, key: &str) -> Option<&Vec<Value>>;
    fn set(&mut self, key: &str, items: Vec<Value>);
    fn mark_dirty(&mut self);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Item not found")]
    IndexOutOfRange,
}

/// Fixed-capacity, newest-first history list for one (session, category) pair.
pub struct HistoryManager<'a> {
    session: &'a mut dyn SessionState,
    key: &'a str,
    max_items: usize,
}

impl<'a> HistoryManager<'a> {
    pub fn new(session: &'a mut dyn SessionState, key: &'a str) -> Self {
        Self::with_capacity(session, key, DEFAULT_MAX_ITEMS)
    }

    pub fn with_capacity(session: &'a mut dyn SessionState, key: &'a str, max_items: usize) -> Self {
        Self {
            session,
            key,
            max_items,
        }
    }

    /// Prepend `item`, evicting the oldest entry when at capacity.
    pub fn add(&mut self, item: Value) {
        let mut items = self.session.get(self.key).cloned().unwrap_or_default();
        items.insert(0, item);
        items.truncate(self.max_items);
        self.session.set(self.key, items);
        self.session.mark_dirty();
    }

    /// Current entries, newest first; empty when nothing was stored yet.
    pub fn list(&self) -> Vec<Value> {
        self.session.get(self.key).cloned().unwrap_or_default()
    }

    /// Remove the entry at `index`, shifting later entries forward.
    ///
    /// Fails without mutating when no list exists for this category or the
    /// index is out of range.
    pub fn delete(&mut self, index: usize) -> Result<(), HistoryError> {
        let mut items = self
            .session
            .get(self.key)
            .cloned()
            .ok_or(HistoryError::IndexOutOfRange)?;
        if index >= items.len() {
            return Err(HistoryError::IndexOutOfRange);
        }
        items.remove(index);
        self.session.set(self.key, items);
        self.session.mark_dirty();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockSession {
        lists: HashMap<String, Vec<Value>>,
        dirty_count: usize,
    }

    impl SessionState for MockSession {
        fn get(&self, key: &str) -> Option<&Vec<Value>> {
            self.lists.get(key)
        }

        fn set(&mut self, key: &str, items: Vec<Value>) {
            self.lists.insert(key.to_string(), items);
        }

        fn mark_dirty(&mut self) {
            self.dirty_count += 1;
        }
    }

    #[test]
    fn test_add_keeps_ten_most_recent_newest_first() {
        let mut session = MockSession::default();
        let mut manager = HistoryManager::new(&mut session, "article_history");

        for i in 0..11 {
            manager.add(json!({ "n": i }));
        }

        let items = manager.list();
        assert_eq!(items.len(), 10);
        assert_eq!(items[0]["n"], 10);
        assert_eq!(items[9]["n"], 1);
    }

    #[test]
    fn test_delete_zero_removes_newest() {
        let mut session = MockSession::default();
        let mut manager = HistoryManager::new(&mut session, "article_history");
        manager.add(json!({ "n": 0 }));
        manager.add(json!({ "n": 1 }));

        manager.delete(0).unwrap();

        let items = manager.list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["n"], 0);
    }

    #[test]
    fn test_delete_out_of_range_fails_without_mutating() {
        let mut session = MockSession::default();
        let mut manager = HistoryManager::new(&mut session, "article_history");
        manager.add(json!({ "n": 0 }));
        let dirty_before = session.dirty_count;

        let mut manager = HistoryManager::new(&mut session, "article_history");
        assert_eq!(manager.delete(1), Err(HistoryError::IndexOutOfRange));
        assert_eq!(manager.list().len(), 1);
        assert_eq!(session.dirty_count, dirty_before);
    }

    #[test]
    fn test_delete_on_missing_category_fails() {
        let mut session = MockSession::default();
        let mut manager = HistoryManager::new(&mut session, "instagram_history");
        assert_eq!(manager.delete(0), Err(HistoryError::IndexOutOfRange));
    }

    #[test]
    fn test_list_on_missing_category_is_empty() {
        let mut session = MockSession::default();
        let manager = HistoryManager::new(&mut session, "article_history");
        assert!(manager.list().is_empty());
    }

    #[test]
    fn test_mutations_mark_session_dirty() {
        let mut session = MockSession::default();
        let mut manager = HistoryManager::new(&mut session, "article_history");
        manager.add(json!({ "n": 0 }));
        manager.delete(0).unwrap();
        assert_eq!(session.dirty_count, 2);
    }

    #[test]
    fn test_categories_are_isolated() {
        let mut session = MockSession::default();
        HistoryManager::new(&mut session, "article_history").add(json!({ "kind": "article" }));
        HistoryManager::new(&mut session, "instagram_history").add(json!({ "kind": "social" }));

        assert_eq!(
            HistoryManager::new(&mut session, "article_history").list()[0]["kind"],
            "article"
        );
        assert_eq!(
            HistoryManager::new(&mut session, "instagram_history").list()[0]["kind"],
            "social"
        );
    }
}
