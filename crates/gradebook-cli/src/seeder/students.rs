//! Student seeding functionality.
//!
//! Payloads are generated in parallel, converted through `NewStudent` so the
//! stored average matches the scores, and inserted in a single transaction.

use fake::faker::name::en::{FirstName, LastName};
use fake::{Fake, Faker};
use gradebook_models::students::{MAX_SCORE, MIN_SCORE, NewStudent, StudentPayload, Subjects};
use rayon::prelude::*;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::SeedResult;

const SUBJECTS: [&str; 8] = [
    "math",
    "physics",
    "chemistry",
    "biology",
    "history",
    "literature",
    "art",
    "music",
];

const CLASS_CODES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

// Postgres caps a statement at 65535 bind parameters; 6 per row
const BATCH_SIZE: usize = 500;

/// Roughly one student in ten is generated without any subjects.
fn generate_subjects() -> Option<Subjects> {
    if (0..10).fake::<u8>() == 0 {
        return None;
    }

    let subjects: Subjects = SUBJECTS
        .iter()
        .filter(|_| Faker.fake::<bool>())
        .map(|subject| (subject.to_string(), (MIN_SCORE..MAX_SCORE + 1).fake::<i32>()))
        .collect();

    Some(subjects)
}

fn generate_student() -> StudentPayload {
    StudentPayload {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        grade: (1..13).fake::<i32>(),
        class_code: CLASS_CODES[(0..CLASS_CODES.len()).fake::<usize>()].to_string(),
        subjects: generate_subjects(),
    }
}

/// Generates `count` student payloads that pass request validation.
pub fn generate_students(count: usize) -> Vec<StudentPayload> {
    (0..count)
        .into_par_iter()
        .map(|_| generate_student())
        .collect()
}

/// Seeds `count` fake students. Returns how many rows were actually inserted;
/// generated identities that already exist are skipped.
pub async fn seed_students(db: &PgPool, count: usize) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let students: Vec<NewStudent> = generate_students(count)
        .into_iter()
        .map(NewStudent::from)
        .collect();
    let inserted = insert_students_batch(db, &students).await?;

    println!(
        "   ✓ Inserted {} students in {:?} ({} skipped as duplicates)",
        inserted,
        start_time.elapsed(),
        count as u64 - inserted
    );

    Ok(inserted)
}

pub async fn insert_students_batch(db: &PgPool, students: &[NewStudent]) -> SeedResult<u64> {
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in students.chunks(BATCH_SIZE) {
        inserted += insert_students_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[NewStudent],
) -> SeedResult<u64> {
    if students.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO students (first_name, last_name, grade, class_code, subjects, average_score) VALUES ",
    );

    for i in 0..students.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 6;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6
        ));
    }

    query.push_str(" ON CONFLICT (first_name, last_name, class_code) DO NOTHING");

    let mut q = sqlx::query(&query);
    for student in students {
        q = q
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(student.grade)
            .bind(&student.class_code)
            .bind(student.subjects().map(Json))
            .bind(student.average_score());
    }

    let result = q.execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

/// Deletes every student row.
pub async fn clear_students(db: &PgPool) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing students...");

    let deleted = sqlx::query("DELETE FROM students")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} students in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}
