//! Immutable item pools.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};
use crate::types::{Item, ItemId};

/// An ordered, immutable collection of practice items.
///
/// Constructed once from static reference data and shared read-only by
/// every session; identities are unique within a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    items: Vec<Item>,
}

impl Pool {
    /// Build a pool, validating the data-provider contract: at least
    /// one item, unique identities, non-empty answer lists.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        if items.is_empty() {
            return Err(DataError::EmptyPool);
        }

        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.clone()) {
                return Err(DataError::DuplicateIdentity {
                    id: item.id.clone(),
                });
            }
            if item.answers.is_empty() {
                return Err(DataError::NoAnswers {
                    id: item.id.clone(),
                });
            }
            if item.answers.iter().any(|a| a.trim().is_empty()) {
                return Err(DataError::EmptyAnswer {
                    id: item.id.clone(),
                });
            }
        }

        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// All identities, in pool order.
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Union of two pools, for mixed practice. Identities must not
    /// collide across the inputs.
    pub fn union(self, other: Pool) -> Result<Self> {
        let mut items = self.items;
        items.extend(other.items);
        Self::new(items)
    }

    /// Sub-pool containing only the given identities, in pool order.
    /// Used for curated practice over a learner's selection.
    pub fn restricted_to(&self, ids: &HashSet<ItemId>) -> Result<Self> {
        let items: Vec<Item> = self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect();
        Self::new(items)
    }
}
