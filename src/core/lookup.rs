//! Priority and category lookup table

use super::options::Fingerprint;
use super::priority::{Priority, PriorityMask};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Normalized set of categories a logger applies to
///
/// An empty set is the wildcard: the logger receives every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryInput", into = "Vec<String>")]
pub struct CategorySet(BTreeSet<String>);

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_wildcard(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CategorySet(
            names
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }
}

impl From<&str> for CategorySet {
    fn from(category: &str) -> Self {
        Self::from_names([category])
    }
}

impl From<String> for CategorySet {
    fn from(category: String) -> Self {
        Self::from_names([category])
    }
}

impl From<&String> for CategorySet {
    fn from(category: &String) -> Self {
        Self::from_names([category])
    }
}

impl<S: AsRef<str>> From<Vec<S>> for CategorySet {
    fn from(categories: Vec<S>) -> Self {
        Self::from_names(categories)
    }
}

impl<S: AsRef<str>> From<&[S]> for CategorySet {
    fn from(categories: &[S]) -> Self {
        Self::from_names(categories)
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for CategorySet {
    fn from(categories: [S; N]) -> Self {
        Self::from_names(categories)
    }
}

impl<S: AsRef<str>> From<Option<S>> for CategorySet {
    fn from(category: Option<S>) -> Self {
        Self::from_names(category)
    }
}

impl<S: AsRef<str>> FromIterator<S> for CategorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.0.into_iter().collect()
    }
}

/// Serialized form: a single category string or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryInput {
    One(String),
    Many(Vec<String>),
}

impl From<CategoryInput> for CategorySet {
    fn from(input: CategoryInput) -> Self {
        match input {
            CategoryInput::One(name) => CategorySet::from(name),
            CategoryInput::Many(names) => CategorySet::from(names),
        }
    }
}

/// Filter attached to one registered logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub priorities: PriorityMask,
    pub categories: CategorySet,
}

impl LookupRecord {
    pub fn new(priorities: PriorityMask, categories: CategorySet) -> Self {
        Self {
            priorities,
            categories,
        }
    }

    /// Apply the routing rule to one entry's priority and category
    ///
    /// `category` must already be normalized. `None` matches any category set.
    pub fn matches(&self, priority: Priority, category: Option<&str>) -> bool {
        if !self.priorities.matches(priority) {
            return false;
        }
        match category {
            None => true,
            Some(_) if self.categories.is_wildcard() => true,
            Some(category) => self.categories.contains(category),
        }
    }
}

impl Default for LookupRecord {
    fn default() -> Self {
        Self::new(PriorityMask::ALL, CategorySet::new())
    }
}

/// Lookup records in registration order
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    records: IndexMap<Fingerprint, LookupRecord>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the record for `fingerprint`
    ///
    /// Re-registering a known fingerprint replaces its record but keeps its
    /// original position in the table.
    pub fn insert(&mut self, fingerprint: Fingerprint, record: LookupRecord) {
        self.records.insert(fingerprint, record);
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&LookupRecord> {
        self.records.get(fingerprint)
    }

    /// Fingerprints whose record accepts `priority` and `category`, in
    /// registration order
    ///
    /// A blank category is treated the same as no category.
    pub fn find(&self, priority: Priority, category: Option<&str>) -> Vec<Fingerprint> {
        let category = category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());
        self.records
            .iter()
            .filter(|(_, record)| record.matches(priority, category.as_deref()))
            .map(|(fingerprint, _)| fingerprint.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &LookupRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
