//! Storage access for students.
//!
//! Every write runs in its own transaction. On any failure the transaction
//! is rolled back before the error is returned; nothing is retried.

use anyhow::anyhow;
use gradebook_core::{AppError, ErrorKind};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, instrument, warn};

use crate::metrics::track_db_query;
use crate::modules::students::model::{NewStudent, Student, StudentPayload};

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: i64) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"SELECT id, first_name, last_name, grade, class_code, subjects, average_score,
                      created_at, updated_at
               FROM students
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await;

        track_db_query("get_student", student.is_ok());
        student.map_err(AppError::storage)
    }

    /// Looks up a student by the identity tuple that must stay unique.
    #[instrument(skip(db))]
    pub async fn find_by_identity(
        db: &PgPool,
        first_name: &str,
        last_name: &str,
        class_code: &str,
    ) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"SELECT id, first_name, last_name, grade, class_code, subjects, average_score,
                      created_at, updated_at
               FROM students
               WHERE first_name = $1 AND last_name = $2 AND class_code = $3"#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(class_code)
        .fetch_optional(db)
        .await;

        track_db_query("find_by_identity", student.is_ok());
        student.map_err(AppError::storage)
    }

    /// Students in insertion order, `skip` rows dropped, at most `limit` returned.
    #[instrument(skip(db))]
    pub async fn list_students(
        db: &PgPool,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(
            r#"SELECT id, first_name, last_name, grade, class_code, subjects, average_score,
                      created_at, updated_at
               FROM students
               ORDER BY id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(db)
        .await;

        track_db_query("list_students", students.is_ok());
        students.map_err(AppError::storage)
    }

    #[instrument(skip(db))]
    pub async fn count_students(db: &PgPool) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(db)
            .await;

        track_db_query("count_students", total.is_ok());
        total.map_err(AppError::storage)
    }

    #[instrument(skip(db, payload))]
    pub async fn create_student(
        db: &PgPool,
        payload: StudentPayload,
    ) -> Result<Student, AppError> {
        let student = NewStudent::from(payload);

        let mut tx = db.begin().await.map_err(AppError::storage)?;

        let result = sqlx::query_as::<_, Student>(
            r#"INSERT INTO students (first_name, last_name, grade, class_code, subjects, average_score)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, first_name, last_name, grade, class_code, subjects, average_score,
                         created_at, updated_at"#,
        )
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.grade)
        .bind(&student.class_code)
        .bind(student.subjects().map(Json))
        .bind(student.average_score())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error);

        let created = commit_or_rollback(tx, "create_student", result).await?;
        info!(student_id = created.id, "Student created");
        Ok(created)
    }

    /// Replaces every field of the student at `id`.
    #[instrument(skip(db, payload))]
    pub async fn update_student(
        db: &PgPool,
        id: i64,
        payload: StudentPayload,
    ) -> Result<Student, AppError> {
        let mut tx = db.begin().await.map_err(AppError::storage)?;
        let result = update_in_tx(&mut tx, id, payload).await;

        let updated = commit_or_rollback(tx, "update_student", result).await?;
        info!(student_id = updated.id, "Student updated");
        Ok(updated)
    }

    /// Removes the student at `id` and returns the row as it was.
    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: i64) -> Result<Student, AppError> {
        let mut tx = db.begin().await.map_err(AppError::storage)?;

        let result = sqlx::query_as::<_, Student>(
            r#"DELETE FROM students
               WHERE id = $1
               RETURNING id, first_name, last_name, grade, class_code, subjects, average_score,
                         created_at, updated_at"#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::storage)
        .and_then(|deleted| {
            deleted.ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
        });

        let deleted = commit_or_rollback(tx, "delete_student", result).await?;
        info!(student_id = deleted.id, "Student deleted");
        Ok(deleted)
    }
}

async fn update_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
    payload: StudentPayload,
) -> Result<Student, AppError> {
    let mut student = sqlx::query_as::<_, Student>(
        r#"SELECT id, first_name, last_name, grade, class_code, subjects, average_score,
                  created_at, updated_at
           FROM students
           WHERE id = $1
           FOR UPDATE"#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::storage)?
    .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

    student.apply(payload);

    sqlx::query_as::<_, Student>(
        r#"UPDATE students
           SET first_name = $1, last_name = $2, grade = $3, class_code = $4,
               subjects = $5, average_score = $6, updated_at = NOW()
           WHERE id = $7
           RETURNING id, first_name, last_name, grade, class_code, subjects, average_score,
                     created_at, updated_at"#,
    )
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(student.grade)
    .bind(&student.class_code)
    .bind(student.subjects().map(Json))
    .bind(student.average_score())
    .bind(student.id)
    .fetch_one(&mut **tx)
    .await
    .map_err(map_write_error)
}

/// Commits on success. On failure rolls back and returns the operation error;
/// a failed rollback is logged but does not replace it.
async fn commit_or_rollback<T>(
    tx: Transaction<'_, Postgres>,
    operation: &'static str,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            let committed = tx.commit().await;
            track_db_query(operation, committed.is_ok());
            committed.map_err(map_write_error)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(operation, error = %rollback_err, "Rollback failed");
            }
            track_db_query(operation, err.kind != ErrorKind::Storage);
            Err(err)
        }
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::conflict(anyhow!("Student with this data already exists"));
    }
    AppError::storage(e)
}
