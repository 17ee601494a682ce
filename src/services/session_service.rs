use crate::error::{Error, Result};
use crate::models::course::Course;
use crate::models::question::{Question, STATUS_APPROVED};
use crate::models::test_session::TestSession;
use crate::services::{sampling, scoring};
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct SessionService {
    pool: PgPool,
}

impl SessionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_course(&self, course_id: Uuid) -> Result<Course> {
        let course = sqlx::query_as::<_, Course>(r#"SELECT * FROM courses WHERE id = $1"#)
            .bind(course_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Course not found".to_string()))?;
        Ok(course)
    }

    /// The pool a learner-facing session may draw from. Only approved items
    /// are selectable; pending and rejected uploads stay out of circulation.
    pub async fn approved_pool(&self, course_id: Uuid) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"SELECT * FROM questions WHERE course_id = $1 AND status = $2"#,
        )
        .bind(course_id)
        .bind(STATUS_APPROVED)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    /// Samples the course pool and persists the session together with its
    /// immutable question set in one transaction. `question_count` is the
    /// sampled count, not the caller's raw input.
    pub async fn start_session(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        requested_count: usize,
        duration_seconds: i32,
        group_test_id: Option<Uuid>,
    ) -> Result<(TestSession, Vec<Question>)> {
        let course = self.get_course(course_id).await?;
        let pool = self.approved_pool(course.id).await?;
        let chosen = sampling::sample_questions(&pool, requested_count)?;

        let mut tx = self.pool.begin().await?;
        let session = sqlx::query_as::<_, TestSession>(
            r#"
            INSERT INTO test_sessions (user_id, course_id, group_test_id, duration, question_count)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(course.id)
        .bind(group_test_id)
        .bind(duration_seconds)
        .bind(chosen.len() as i32)
        .fetch_one(&mut *tx)
        .await?;

        for question in &chosen {
            sqlx::query(
                r#"INSERT INTO test_session_questions (session_id, question_id) VALUES ($1, $2)"#,
            )
            .bind(session.id)
            .bind(question.id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok((session, chosen))
    }

    /// Looks up a session owned by `user_id`. A foreign session id resolves
    /// to NotFound, never to someone else's data.
    pub async fn get_owned_session(&self, session_id: Uuid, user_id: Uuid) -> Result<TestSession> {
        let session = sqlx::query_as::<_, TestSession>(
            r#"SELECT * FROM test_sessions WHERE id = $1 AND user_id = $2"#,
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Test session not found".to_string()))?;
        Ok(session)
    }

    pub async fn session_questions(&self, session_id: Uuid) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT q.* FROM questions q
            JOIN test_session_questions tsq ON tsq.question_id = q.id
            WHERE tsq.session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    /// Scores and finalizes a session. Submission is terminal: once
    /// `end_time` is set the session can no longer be resubmitted.
    pub async fn submit_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        answers: &HashMap<String, String>,
    ) -> Result<TestSession> {
        let session = self.get_owned_session(session_id, user_id).await?;
        if session.is_submitted() {
            return Err(Error::BadRequest(
                "Test session has already been submitted".to_string(),
            ));
        }

        let questions = self.session_questions(session.id).await?;
        let score = scoring::score_answers(&questions, answers);

        let updated = sqlx::query_as::<_, TestSession>(
            r#"
            UPDATE test_sessions
            SET score = $1, end_time = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(score)
        .bind(Utc::now())
        .bind(session.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn history(&self, user_id: Uuid) -> Result<Vec<TestSession>> {
        let sessions = sqlx::query_as::<_, TestSession>(
            r#"SELECT * FROM test_sessions WHERE user_id = $1 ORDER BY start_time DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    /// The session a participant already materialized for a group test, if any.
    pub async fn find_group_session(
        &self,
        group_test_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TestSession>> {
        let session = sqlx::query_as::<_, TestSession>(
            r#"SELECT * FROM test_sessions WHERE group_test_id = $1 AND user_id = $2"#,
        )
        .bind(group_test_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }
}
