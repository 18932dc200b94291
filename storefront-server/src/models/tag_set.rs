//! Product tag associations
//!
//! `TagIds` is the validated, duplicate-free tag list from a request body.
//! `reconcile` diffs it against the join records already stored for a
//! product, producing the inserts and deletes that make the stored set equal
//! to the requested one.

use std::collections::HashSet;

use super::{ProductTag, ValidationError};

/// Requested tag ids, in first-seen order with duplicates collapsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIds(Vec<i32>);

impl TagIds {
    /// Validate a raw `tagIds` array.
    ///
    /// # Example
    /// ```
    /// use storefront_server::models::TagIds;
    ///
    /// let ids = TagIds::new(&[3, 1, 3]).unwrap();
    /// assert_eq!(ids.as_slice(), &[3, 1]);
    /// assert!(TagIds::new(&[0]).is_err());
    /// ```
    pub fn new(ids: &[i32]) -> Result<Self, ValidationError> {
        if ids.iter().any(|id| *id <= 0) {
            return Err(ValidationError::InvalidFormat {
                field: "tagIds",
                reason: "tag ids must be positive integers",
            });
        }

        let mut seen = HashSet::with_capacity(ids.len());
        let unique = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        Ok(Self(unique))
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag_id: i32) -> bool {
        self.0.contains(&tag_id)
    }
}

/// Writes needed to bring a product's join records in line with `TagIds`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    /// Tag ids that need a new join record
    pub to_add: Vec<i32>,
    /// Join record ids to delete
    pub to_remove: Vec<i32>,
}

impl TagDiff {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Diff existing join records against the desired tag set.
///
/// Records whose tag stays in the set are left alone. If the stored rows
/// already hold the same tag twice, only the first is kept.
pub fn reconcile(existing: &[ProductTag], desired: &TagIds) -> TagDiff {
    let mut kept = HashSet::with_capacity(existing.len());
    let mut to_remove = Vec::new();

    for record in existing {
        if desired.contains(record.tag_id) && kept.insert(record.tag_id) {
            continue;
        }
        to_remove.push(record.id);
    }

    let to_add = desired
        .as_slice()
        .iter()
        .copied()
        .filter(|tag_id| !kept.contains(tag_id))
        .collect();

    TagDiff { to_add, to_remove }
}
