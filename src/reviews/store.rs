//! In-process review storage.
//!
//! # Design Decisions
//! - DashMap keyed by id: per-record atomicity, no cross-record ordering,
//!   last write wins under concurrent updates to the same record
//! - Ids come from an atomic counter and are never reused within a process
//! - No-op updates are rejected so PUT/PATCH always means a real change

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::reviews::model::{Review, ReviewDraft, UpdateReview};

/// Failures from the review store.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("review {0} does not exist")]
    NotFound(u64),
    #[error("at least one value must change")]
    NoChange,
}

/// In-memory review records, shared across request handlers.
#[derive(Debug)]
pub struct ReviewStore {
    records: DashMap<u64, Review>,
    next_id: AtomicU64,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// All reviews, ordered by id.
    pub fn list(&self) -> Vec<Review> {
        let mut reviews: Vec<Review> = self.records.iter().map(|r| r.value().clone()).collect();
        reviews.sort_by_key(|r| r.id);
        reviews
    }

    /// Persist a validated draft under a fresh id.
    pub fn create(&self, draft: ReviewDraft) -> Review {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let review = Review {
            id,
            comment: draft.comment,
            rating: draft.rating,
            book_id: draft.book_id,
        };
        self.records.insert(id, review.clone());
        review
    }

    pub fn find(&self, id: u64) -> Result<Review, StoreError> {
        self.records
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or(StoreError::NotFound(id))
    }

    /// Merge `patch` into the stored record.
    ///
    /// The record's shard lock is held across the compare-and-write, so the
    /// mutation is atomic per record.
    pub fn update(&self, id: u64, patch: &UpdateReview) -> Result<Review, StoreError> {
        let mut entry = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let merged = entry.merged(patch);
        if merged == *entry {
            return Err(StoreError::NoChange);
        }
        *entry = merged.clone();
        Ok(merged)
    }

    /// Remove and return the record.
    pub fn delete(&self, id: u64) -> Result<Review, StoreError> {
        self.records
            .remove(&id)
            .map(|(_, review)| review)
            .ok_or(StoreError::NotFound(id))
    }
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(comment: &str, rating: i64, book_id: u64) -> ReviewDraft {
        ReviewDraft {
            comment: comment.into(),
            rating,
            book_id,
        }
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let store = ReviewStore::new();
        let first = store.create(draft("a", 1, 1));
        let second = store.create(draft("b", 2, 1));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn find_returns_the_created_record() {
        let store = ReviewStore::new();
        let created = store.create(draft("Great book", 5, 1));
        assert_eq!(store.find(created.id).unwrap(), created);
    }

    #[test]
    fn find_missing_id_is_not_found() {
        let store = ReviewStore::new();
        assert_eq!(store.find(42), Err(StoreError::NotFound(42)));
    }

    #[test]
    fn list_is_ordered_by_id() {
        let store = ReviewStore::new();
        store.create(draft("a", 1, 1));
        store.create(draft("b", 2, 1));
        store.create(draft("c", 3, 1));

        let ids: Vec<_> = store.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn update_merges_present_fields() {
        let store = ReviewStore::new();
        let created = store.create(draft("fine", 3, 7));

        let updated = store
            .update(
                created.id,
                &UpdateReview {
                    rating: Some(5),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.rating, 5);
        assert_eq!(updated.comment, "fine");
        assert_eq!(store.find(created.id).unwrap(), updated);
    }

    #[test]
    fn update_without_an_effective_change_is_rejected() {
        let store = ReviewStore::new();
        let created = store.create(draft("fine", 3, 7));

        let result = store.update(
            created.id,
            &UpdateReview {
                comment: Some("fine".into()),
                rating: Some(3),
                book_id: Some(7),
            },
        );

        assert_eq!(result, Err(StoreError::NoChange));
        assert_eq!(store.find(created.id).unwrap(), created);
    }

    #[test]
    fn empty_patch_is_rejected_as_no_change() {
        let store = ReviewStore::new();
        let created = store.create(draft("fine", 3, 7));
        let result = store.update(created.id, &UpdateReview::default());
        assert_eq!(result, Err(StoreError::NoChange));
    }

    #[test]
    fn delete_returns_the_removed_record() {
        let store = ReviewStore::new();
        let created = store.create(draft("gone soon", 2, 1));

        let deleted = store.delete(created.id).unwrap();
        assert_eq!(deleted, created);
        assert_eq!(store.find(created.id), Err(StoreError::NotFound(created.id)));
        assert_eq!(store.delete(created.id), Err(StoreError::NotFound(created.id)));
    }
}
