//! Budget maps
//!
//! A `BudgetMap` maps category names to dollar amounts. It is the shape both
//! forecasts and reconciliations come back in, and what the presentation
//! layer serializes.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Category name to dollar amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetMap(BTreeMap<String, f64>);

impl BudgetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a category's amount, replacing any previous value
    pub fn insert(&mut self, category: impl Into<String>, amount: f64) -> Option<f64> {
        self.0.insert(category.into(), amount)
    }

    /// Add to a category's amount, creating it if absent
    pub fn add(&mut self, category: impl Into<String>, amount: f64) {
        *self.0.entry(category.into()).or_insert(0.0) += amount;
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.0.get(category).copied()
    }

    pub fn get_mut(&mut self, category: &str) -> Option<&mut f64> {
        self.0.get_mut(category)
    }

    pub fn remove(&mut self, category: &str) -> Option<f64> {
        self.0.remove(category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all amounts
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Category names in sorted order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries sorted by amount, largest first
    pub fn sorted_by_amount(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Apply a function to every amount
    pub fn map_values(&mut self, f: impl Fn(f64) -> f64) {
        for value in self.0.values_mut() {
            *value = f(*value);
        }
    }
}

impl FromIterator<(String, f64)> for BudgetMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, f64)> for BudgetMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

impl IntoIterator for BudgetMap {
    type Item = (String, f64);
    type IntoIter = btree_map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
