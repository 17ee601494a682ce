use crate::error::{Error, Result};
use crate::models::course::Course;
use crate::models::question::{
    is_valid_option_letter, Question, STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED,
};
use crate::services::parser::ParsedQuestion;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct UploadStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Clone)]
pub struct QuestionService {
    pool: PgPool,
}

impl QuestionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(r#"SELECT * FROM courses ORDER BY name"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(courses)
    }

    pub async fn create_course(&self, name: &str) -> Result<Course> {
        if name.trim().is_empty() {
            return Err(Error::BadRequest("Course name is required".to_string()));
        }
        let course =
            sqlx::query_as::<_, Course>(r#"INSERT INTO courses (name) VALUES ($1) RETURNING *"#)
                .bind(name.trim())
                .fetch_one(&self.pool)
                .await?;
        Ok(course)
    }

    /// Admin-entered questions go straight into circulation.
    pub async fn add_question(
        &self,
        course_id: Uuid,
        question_text: &str,
        options: [&str; 4],
        correct_option: &str,
    ) -> Result<Question> {
        if !is_valid_option_letter(correct_option) {
            return Err(Error::BadRequest(
                "correct_option must be one of A, B, C, D".to_string(),
            ));
        }
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions
                (course_id, question_text, option_a, option_b, option_c, option_d,
                 correct_option, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(course_id)
        .bind(question_text)
        .bind(options[0])
        .bind(options[1])
        .bind(options[2])
        .bind(options[3])
        .bind(correct_option.to_uppercase())
        .bind(STATUS_APPROVED)
        .fetch_one(&self.pool)
        .await?;
        Ok(question)
    }

    /// Persists a batch of parsed uploads as pending questions, all or
    /// nothing. Returns the created count.
    pub async fn create_pending_batch(
        &self,
        course_id: Uuid,
        parsed: &[ParsedQuestion],
        uploaded_by: Uuid,
        source_file: &str,
    ) -> Result<usize> {
        let mut tx = self.pool.begin().await?;
        for item in parsed {
            sqlx::query(
                r#"
                INSERT INTO questions
                    (course_id, question_text, option_a, option_b, option_c, option_d,
                     correct_option, status, uploaded_by, source_file)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(course_id)
            .bind(&item.text)
            .bind(&item.option_a)
            .bind(&item.option_b)
            .bind(&item.option_c)
            .bind(&item.option_d)
            .bind(&item.answer)
            .bind(STATUS_PENDING)
            .bind(uploaded_by)
            .bind(source_file)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(parsed.len())
    }

    pub async fn pending_questions(&self) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"SELECT * FROM questions WHERE status = $1 ORDER BY created_at"#,
        )
        .bind(STATUS_PENDING)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    /// The approval gate. `pending` → `approved`/`rejected` is the only legal
    /// transition and it is terminal.
    pub async fn set_status(&self, question_id: Uuid, new_status: &str) -> Result<Question> {
        if new_status != STATUS_APPROVED && new_status != STATUS_REJECTED {
            return Err(Error::BadRequest(format!(
                "Invalid status '{}'; expected '{}' or '{}'",
                new_status, STATUS_APPROVED, STATUS_REJECTED
            )));
        }

        let question = sqlx::query_as::<_, Question>(
            r#"SELECT * FROM questions WHERE id = $1"#,
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Question not found".to_string()))?;

        if question.status != STATUS_PENDING {
            return Err(Error::BadRequest(format!(
                "Question has already been {}",
                question.status
            )));
        }

        let updated = sqlx::query_as::<_, Question>(
            r#"UPDATE questions SET status = $1 WHERE id = $2 RETURNING *"#,
        )
        .bind(new_status)
        .bind(question_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Per-status counts of the questions a user has bulk-uploaded.
    pub async fn upload_stats(&self, user_id: Uuid) -> Result<UploadStats> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status, COUNT(*) FROM questions
            WHERE uploaded_by = $1
            GROUP BY status
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut stats = UploadStats {
            total: 0,
            pending: 0,
            approved: 0,
            rejected: 0,
        };
        for (status, count) in rows {
            stats.total += count;
            match status.as_str() {
                STATUS_PENDING => stats.pending = count,
                STATUS_APPROVED => stats.approved = count,
                STATUS_REJECTED => stats.rejected = count,
                _ => {}
            }
        }
        Ok(stats)
    }
}
