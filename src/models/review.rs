// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// A star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Option<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Some(Rating(value as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Filled and empty stars, e.g. "★★★☆☆" for 3.
    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored review. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub name: String,
    pub rating: Rating,
    pub comment: String,
    pub date: DateTime<Utc>,
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Review {} - {}>", self.id, self.name)
    }
}

/// A review that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub name: String,
    pub rating: Rating,
    pub comment: String,
}

/// Raw fields as submitted by the review form.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReviewInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_only_one_through_five() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert!(Rating::new(-3).is_none());
        assert_eq!(Rating::new(1).map(Rating::get), Some(1));
        assert_eq!(Rating::new(5).map(Rating::get), Some(5));
    }

    #[test]
    fn rating_renders_stars() {
        assert_eq!(Rating::new(3).unwrap().stars(), "★★★☆☆");
        assert_eq!(Rating::new(5).unwrap().stars(), "★★★★★");
    }

    #[test]
    fn review_display_names_id_and_author() {
        let review = Review {
            id: 7,
            name: "Al".into(),
            rating: Rating::new(5).unwrap(),
            comment: "Great service overall!".into(),
            date: Utc::now(),
        };
        assert_eq!(review.to_string(), "<Review 7 - Al>");
    }
}
