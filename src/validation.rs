//! Validation of the review form.
//!
//! All fields are checked on every call so the form can show every problem at
//! once. Nothing here touches storage or HTTP.
use crate::models::review::{NewReview, Rating, ReviewInput};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

pub const NAME_LENGTH: RangeInclusive<usize> = 2..=50;
pub const COMMENT_LENGTH: RangeInclusive<usize> = 10..=500;

/// Accepted rating values and their labels, as offered by the form.
pub const RATING_CHOICES: [(&str, &str); 5] = [
    ("1", "1 Star"),
    ("2", "2 Stars"),
    ("3", "3 Stars"),
    ("4", "4 Stars"),
    ("5", "5 Stars"),
];

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Rating,
    Comment,
}

/// Field-level error messages for a rejected submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    fields: BTreeMap<Field, Vec<String>>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn messages(&self, field: Field) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }
}

pub fn length_message(range: &RangeInclusive<usize>) -> String {
    format!(
        "Field must be between {} and {} characters long.",
        range.start(),
        range.end()
    )
}

fn check_text<'a>(
    errors: &mut ValidationErrors,
    field: Field,
    raw: &'a str,
    range: &RangeInclusive<usize>,
) -> Option<&'a str> {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(field, REQUIRED);
        return None;
    }
    if !range.contains(&value.chars().count()) {
        errors.push(field, length_message(range));
        return None;
    }
    Some(value)
}

fn check_rating(errors: &mut ValidationErrors, raw: &str) -> Option<Rating> {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(Field::Rating, REQUIRED);
        return None;
    }
    // Only the exact option values are valid, so "05" or "+5" are rejected
    let rating = RATING_CHOICES
        .iter()
        .position(|&(choice, _)| choice == value)
        .and_then(|index| Rating::new(index as i64 + 1));
    if rating.is_none() {
        errors.push(Field::Rating, INVALID_CHOICE);
    }
    rating
}

/// Checks every field of `input` and returns a typed review or all errors.
pub fn validate(input: &ReviewInput) -> Result<NewReview, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = check_text(&mut errors, Field::Name, &input.name, &NAME_LENGTH);
    let rating = check_rating(&mut errors, &input.rating);
    let comment = check_text(&mut errors, Field::Comment, &input.comment, &COMMENT_LENGTH);

    match (name, rating, comment) {
        (Some(name), Some(rating), Some(comment)) if errors.is_empty() => Ok(NewReview {
            name: name.to_string(),
            rating,
            comment: comment.to_string(),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, rating: &str, comment: &str) -> ReviewInput {
        ReviewInput {
            name: name.into(),
            rating: rating.into(),
            comment: comment.into(),
        }
    }

    #[test]
    fn accepts_a_valid_submission() {
        let review = validate(&input("Al", "5", "Great service overall!")).unwrap();
        assert_eq!(review.name, "Al");
        assert_eq!(review.rating.get(), 5);
        assert_eq!(review.comment, "Great service overall!");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let review = validate(&input("  Bea  ", " 3 ", "\n Friendly staff here \n")).unwrap();
        assert_eq!(review.name, "Bea");
        assert_eq!(review.rating.get(), 3);
        assert_eq!(review.comment, "Friendly staff here");
    }

    #[test]
    fn rejects_short_name() {
        let errors = validate(&input("A", "5", "Great service overall!")).unwrap_err();
        assert_eq!(errors.messages(Field::Name), [length_message(&NAME_LENGTH)]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn rejects_long_name() {
        let errors = validate(&input(&"n".repeat(51), "5", "Great service overall!")).unwrap_err();
        assert_eq!(errors.messages(Field::Name), [length_message(&NAME_LENGTH)]);
    }

    #[test]
    fn name_bounds_are_inclusive() {
        assert!(validate(&input(&"n".repeat(50), "1", "Long enough comment")).is_ok());
        assert!(validate(&input("Jo", "1", "Long enough comment")).is_ok());
    }

    #[test]
    fn whitespace_only_name_is_missing() {
        let errors = validate(&input("   ", "4", "Long enough comment")).unwrap_err();
        assert_eq!(errors.messages(Field::Name), [REQUIRED]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Two characters, four bytes.
        assert!(validate(&input("Zé", "4", "Très bon service!")).is_ok());
        let errors = validate(&input("é", "4", "Très bon service!")).unwrap_err();
        assert!(!errors.messages(Field::Name).is_empty());
    }

    #[test]
    fn rejects_comment_outside_bounds() {
        let short = validate(&input("Al", "5", "Too short")).unwrap_err();
        assert_eq!(short.messages(Field::Comment), [length_message(&COMMENT_LENGTH)]);

        let long = validate(&input("Al", "5", &"c".repeat(501))).unwrap_err();
        assert_eq!(long.messages(Field::Comment), [length_message(&COMMENT_LENGTH)]);

        assert!(validate(&input("Al", "5", &"c".repeat(500))).is_ok());
        assert!(validate(&input("Al", "5", &"c".repeat(10))).is_ok());
    }

    #[test]
    fn rejects_bad_ratings() {
        for raw in ["0", "6", "-1", "abc", "4.5", "+5", "05", "5 stars", "99999999999999999999"] {
            let errors = validate(&input("Al", raw, "Great service overall!")).unwrap_err();
            assert_eq!(errors.messages(Field::Rating), [INVALID_CHOICE], "rating {raw:?}");
        }
        let errors = validate(&input("Al", "", "Great service overall!")).unwrap_err();
        assert_eq!(errors.messages(Field::Rating), [REQUIRED]);
    }

    #[test]
    fn every_offered_choice_is_accepted() {
        for (value, _) in RATING_CHOICES {
            let review = validate(&input("Al", value, "Great service overall!")).unwrap();
            assert_eq!(review.rating.to_string(), value);
        }
    }

    #[test]
    fn reports_every_invalid_field_together() {
        let errors = validate(&ReviewInput::default()).unwrap_err();
        assert_eq!(errors.messages(Field::Name), [REQUIRED]);
        assert_eq!(errors.messages(Field::Rating), [REQUIRED]);
        assert_eq!(errors.messages(Field::Comment), [REQUIRED]);
        assert_eq!(errors.len(), 3);
    }
}
