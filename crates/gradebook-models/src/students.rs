//! Student domain models and DTOs.
//!
//! A student's `average_score` is never set directly. It lives next to
//! `subjects` inside a [`ScoreCard`], and the only way to build a
//! `ScoreCard` is from a subjects map, so the two can never disagree.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gradebook_core::Normalize;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Subject name to score (1..=5).
pub type Subjects = BTreeMap<String, i32>;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

/// Mean of all scores rounded to two decimal places (ties to even), or
/// `None` when there are no scores.
pub fn average_score(subjects: Option<&Subjects>) -> Option<f64> {
    let subjects = subjects.filter(|s| !s.is_empty())?;
    let total: i64 = subjects.values().map(|&score| i64::from(score)).sum();
    let mean = total as f64 / subjects.len() as f64;
    Some((mean * 100.0).round_ties_even() / 100.0)
}

/// Subject scores together with their derived average.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ScoreCard {
    #[schema(example = json!({"math": 4, "art": 2}))]
    subjects: Option<Subjects>,
    /// Mean of `subjects`, rounded to 2 decimals; null when there are none
    #[schema(example = 3.0)]
    average_score: Option<f64>,
}

impl ScoreCard {
    pub fn new(subjects: Option<Subjects>) -> Self {
        let average_score = average_score(subjects.as_ref());
        Self {
            subjects,
            average_score,
        }
    }

    pub fn subjects(&self) -> Option<&Subjects> {
        self.subjects.as_ref()
    }

    pub fn average_score(&self) -> Option<f64> {
        self.average_score
    }
}

impl<'r> FromRow<'r, PgRow> for ScoreCard {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let subjects: Option<Json<Subjects>> = row.try_get("subjects")?;
        let average_score: Option<f64> = row.try_get("average_score")?;
        Ok(Self {
            subjects: subjects.map(|Json(subjects)| subjects),
            average_score,
        })
    }
}

/// A student record as stored in the database.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Student {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ivan")]
    pub first_name: String,
    #[schema(example = "Petrov")]
    pub last_name: String,
    #[schema(example = 8)]
    pub grade: i32,
    #[schema(example = "B")]
    pub class_code: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    scores: ScoreCard,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn subjects(&self) -> Option<&Subjects> {
        self.scores.subjects()
    }

    pub fn average_score(&self) -> Option<f64> {
        self.scores.average_score()
    }

    /// Replaces the subject scores and recomputes the average.
    pub fn set_subjects(&mut self, subjects: Option<Subjects>) {
        self.scores = ScoreCard::new(subjects);
    }

    /// Overwrites every caller-settable field from `payload`.
    pub fn apply(&mut self, payload: StudentPayload) {
        let StudentPayload {
            first_name,
            last_name,
            grade,
            class_code,
            subjects,
        } = payload;

        self.first_name = first_name;
        self.last_name = last_name;
        self.grade = grade;
        self.class_code = class_code;
        self.set_subjects(subjects);
    }
}

/// A student that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub grade: i32,
    pub class_code: String,
    scores: ScoreCard,
}

impl NewStudent {
    pub fn subjects(&self) -> Option<&Subjects> {
        self.scores.subjects()
    }

    pub fn average_score(&self) -> Option<f64> {
        self.scores.average_score()
    }

    pub fn set_subjects(&mut self, subjects: Option<Subjects>) {
        self.scores = ScoreCard::new(subjects);
    }
}

impl From<StudentPayload> for NewStudent {
    fn from(payload: StudentPayload) -> Self {
        let mut student = Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            grade: payload.grade,
            class_code: payload.class_code,
            scores: ScoreCard::default(),
        };
        student.set_subjects(payload.subjects);
        student
    }
}

/// Request body for creating a student or fully replacing one.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, ToSchema, Validate)]
pub struct StudentPayload {
    #[validate(length(max = 50, message = "String should have at most 50 characters"))]
    #[schema(example = "Ivan", max_length = 50)]
    pub first_name: String,
    #[validate(length(max = 50, message = "String should have at most 50 characters"))]
    #[schema(example = "Petrov", max_length = 50)]
    pub last_name: String,
    #[validate(range(min = 1, max = 12, message = "Grade must be between 1 and 12"))]
    #[schema(example = 8, minimum = 1, maximum = 12)]
    pub grade: i32,
    /// Single letter; lowercase input is upper-cased
    #[validate(length(equal = 1, message = "Class code must be exactly 1 character"))]
    #[schema(example = "b")]
    pub class_code: String,
    /// Subject name to score, each score between 1 and 5
    #[validate(custom(function = "validate_subject_scores"))]
    #[schema(example = json!({"math": 4, "art": 2}))]
    pub subjects: Option<Subjects>,
}

impl Normalize for StudentPayload {
    fn normalize(mut self) -> Self {
        self.class_code = self.class_code.to_uppercase();
        self
    }
}

fn validate_subject_scores(subjects: &Subjects) -> Result<(), ValidationError> {
    let offending: Vec<&str> = subjects
        .iter()
        .filter(|(_, score)| !(MIN_SCORE..=MAX_SCORE).contains(*score))
        .map(|(subject, _)| subject.as_str())
        .collect();

    let message = match offending.as_slice() {
        [] => return Ok(()),
        [subject] => format!(
            "Score for subject '{}' must be between {} and {}",
            subject, MIN_SCORE, MAX_SCORE
        ),
        subjects => format!(
            "Scores for subjects '{}' must be between {} and {}",
            subjects.join("', '"),
            MIN_SCORE,
            MAX_SCORE
        ),
    };

    Err(ValidationError::new("score_range").with_message(message.into()))
}
