//! Review entity and boundary validation.

use serde::{Deserialize, Serialize};

pub const MAX_COMMENT_LEN: usize = 255;

/// A persisted review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u64,
    pub comment: String,
    pub rating: i64,
    pub book_id: u64,
}

impl Review {
    /// Apply a patch, keeping stored values for absent fields. The patch must
    /// already have passed [`UpdateReview::validate`].
    pub fn merged(&self, patch: &UpdateReview) -> Review {
        Review {
            id: self.id,
            comment: patch.comment.clone().unwrap_or_else(|| self.comment.clone()),
            rating: patch.rating.unwrap_or(self.rating),
            book_id: patch.book_id.map(|id| id as u64).unwrap_or(self.book_id),
        }
    }
}

/// One violated input rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Body of `POST /reviews`. Every field is optional at the boundary so a
/// missing value surfaces as a field violation rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub comment: Option<String>,
    pub rating: Option<i64>,
    pub book_id: Option<i64>,
}

/// A create request that passed field validation.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub comment: String,
    pub rating: i64,
    pub book_id: u64,
}

impl CreateReview {
    /// Check every field rule, reporting the complete violation list.
    pub fn validate(self) -> Result<ReviewDraft, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let comment = match self.comment {
            Some(c) if c.is_empty() => {
                violations.push(FieldViolation::new("comment", "comment is required"));
                None
            }
            Some(c) if c.chars().count() > MAX_COMMENT_LEN => {
                violations.push(FieldViolation::new(
                    "comment",
                    "comment must be at most 255 characters",
                ));
                None
            }
            Some(c) => Some(c),
            None => {
                violations.push(FieldViolation::new("comment", "comment is required"));
                None
            }
        };

        let rating = match self.rating {
            Some(r) if (1..=5).contains(&r) => Some(r),
            Some(_) => {
                violations.push(FieldViolation::new(
                    "rating",
                    "rating must be an integer between 1 and 5",
                ));
                None
            }
            None => {
                violations.push(FieldViolation::new("rating", "rating is required"));
                None
            }
        };

        let book_id = match self.book_id {
            Some(id) if id >= 1 => Some(id as u64),
            Some(_) => {
                violations.push(FieldViolation::new(
                    "bookId",
                    "bookId must be a positive integer",
                ));
                None
            }
            None => {
                violations.push(FieldViolation::new("bookId", "bookId is required"));
                None
            }
        };

        match (comment, rating, book_id) {
            (Some(comment), Some(rating), Some(book_id)) => Ok(ReviewDraft {
                comment,
                rating,
                book_id,
            }),
            _ => Err(violations),
        }
    }
}

/// Body of `PUT/PATCH /reviews/{id}`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReview {
    pub comment: Option<String>,
    pub rating: Option<i64>,
    pub book_id: Option<i64>,
}

impl UpdateReview {
    /// Check the rules for whichever fields the patch carries. The stored
    /// entity keeps its invariants after every merge.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if let Some(comment) = &self.comment {
            if comment.is_empty() {
                violations.push(FieldViolation::new("comment", "comment must not be empty"));
            } else if comment.chars().count() > MAX_COMMENT_LEN {
                violations.push(FieldViolation::new(
                    "comment",
                    "comment must be at most 255 characters",
                ));
            }
        }
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                violations.push(FieldViolation::new(
                    "rating",
                    "rating must be an integer between 1 and 5",
                ));
            }
        }
        if let Some(book_id) = self.book_id {
            if book_id < 1 {
                violations.push(FieldViolation::new(
                    "bookId",
                    "bookId must be a positive integer",
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// The new book id, when the (validated) patch re-points the review.
    pub fn book_id(&self) -> Option<u64> {
        self.book_id.map(|id| id as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_create_reports_every_violation() {
        let violations = CreateReview::default().validate().unwrap_err();
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["comment", "rating", "bookId"]);
    }

    #[test]
    fn valid_create_produces_a_draft() {
        let draft = CreateReview {
            comment: Some("Great book".into()),
            rating: Some(5),
            book_id: Some(1),
        }
        .validate()
        .unwrap();

        assert_eq!(draft.comment, "Great book");
        assert_eq!(draft.rating, 5);
        assert_eq!(draft.book_id, 1);
    }

    #[test]
    fn create_rejects_out_of_range_values() {
        let violations = CreateReview {
            comment: Some("x".repeat(256)),
            rating: Some(6),
            book_id: Some(0),
        }
        .validate()
        .unwrap_err();

        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn comment_boundary_is_255_characters() {
        let ok = CreateReview {
            comment: Some("x".repeat(255)),
            rating: Some(3),
            book_id: Some(1),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn update_validates_only_present_fields() {
        let patch = UpdateReview {
            rating: Some(4),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let patch = UpdateReview {
            rating: Some(0),
            ..Default::default()
        };
        assert_eq!(patch.validate().unwrap_err()[0].field, "rating");
    }

    #[test]
    fn merge_keeps_stored_values_for_absent_fields() {
        let review = Review {
            id: 1,
            comment: "fine".into(),
            rating: 3,
            book_id: 7,
        };
        let merged = review.merged(&UpdateReview {
            rating: Some(5),
            ..Default::default()
        });

        assert_eq!(merged.comment, "fine");
        assert_eq!(merged.rating, 5);
        assert_eq!(merged.book_id, 7);
        assert_eq!(merged.id, 1);
    }

    #[test]
    fn merge_of_identical_values_is_equal_to_the_original() {
        let review = Review {
            id: 1,
            comment: "fine".into(),
            rating: 3,
            book_id: 7,
        };
        let merged = review.merged(&UpdateReview {
            comment: Some("fine".into()),
            rating: Some(3),
            book_id: Some(7),
        });
        assert_eq!(merged, review);
    }
}
