use crate::error::{Error, Result};
use crate::models::course::Course;
use crate::models::group_test::GroupTest;
use crate::models::question::Question;
use crate::models::test_session::TestSession;
use crate::services::mailer_service::MailerService;
use crate::services::session_service::SessionService;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct NewGroupTest {
    pub name: String,
    pub course_id: Uuid,
    pub question_count: i32,
    pub duration_minutes: i32,
    pub invitees: Vec<String>,
    pub scheduled_start: DateTime<Utc>,
}

#[derive(Clone)]
pub struct GroupTestService {
    pool: PgPool,
    sessions: SessionService,
    mailer: MailerService,
}

impl GroupTestService {
    pub fn new(pool: PgPool, sessions: SessionService, mailer: MailerService) -> Self {
        Self {
            pool,
            sessions,
            mailer,
        }
    }

    pub async fn get_group_test(&self, group_test_id: Uuid) -> Result<GroupTest> {
        let group_test =
            sqlx::query_as::<_, GroupTest>(r#"SELECT * FROM group_tests WHERE id = $1"#)
                .bind(group_test_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| Error::NotFound("Group test not found".to_string()))?;
        Ok(group_test)
    }

    /// Persists the template and dispatches one invitation per invitee.
    /// Mail delivery is best-effort: a dead gateway never fails creation.
    pub async fn create_group_test(
        &self,
        payload: NewGroupTest,
        creator_id: Uuid,
        creator_name: &str,
    ) -> Result<GroupTest> {
        if payload.question_count <= 0 {
            return Err(Error::BadRequest(
                "question_count must be positive".to_string(),
            ));
        }
        if payload.duration_minutes <= 0 {
            return Err(Error::BadRequest(
                "duration_minutes must be positive".to_string(),
            ));
        }
        let course = self.sessions.get_course(payload.course_id).await?;

        let group_test = sqlx::query_as::<_, GroupTest>(
            r#"
            INSERT INTO group_tests
                (name, course_id, question_count, duration_minutes, created_by, invitees, scheduled_start)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(course.id)
        .bind(payload.question_count)
        .bind(payload.duration_minutes)
        .bind(creator_id)
        .bind(payload.invitees.join(","))
        .bind(payload.scheduled_start)
        .fetch_one(&self.pool)
        .await?;

        self.mailer.send_detached(
            payload.invitees,
            format!("Invitation to Group Test: {}", group_test.name),
            invitation_body(&group_test, &course.name, creator_name),
        );

        Ok(group_test)
    }

    /// Returns the template's descriptive fields and, once `now` has reached
    /// `scheduled_start`, the requesting participant's materialized session.
    /// Each participant gets exactly one session per group test: repeated
    /// requests after activation reuse it, and a race between two concurrent
    /// first requests is settled by the unique index.
    pub async fn view_or_activate(
        &self,
        group_test_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(GroupTest, Course, Option<(TestSession, Vec<Question>)>)> {
        let group_test = self.get_group_test(group_test_id).await?;
        let course = self.sessions.get_course(group_test.course_id).await?;

        if now < group_test.scheduled_start {
            return Ok((group_test, course, None));
        }

        if let Some(existing) = self
            .sessions
            .find_group_session(group_test.id, user_id)
            .await?
        {
            let questions = self.sessions.session_questions(existing.id).await?;
            return Ok((group_test, course, Some((existing, questions))));
        }

        let materialized = self
            .sessions
            .start_session(
                user_id,
                group_test.course_id,
                group_test.question_count as usize,
                group_test.duration_minutes * 60,
                Some(group_test.id),
            )
            .await;

        match materialized {
            Ok(pair) => Ok((group_test, course, Some(pair))),
            Err(ref e) if is_participant_conflict(e) => {
                // Lost the insert race; the winner's session is ours to reuse.
                let existing = self
                    .sessions
                    .find_group_session(group_test.id, user_id)
                    .await?
                    .ok_or_else(|| {
                        Error::Internal("group session vanished after conflict".to_string())
                    })?;
                let questions = self.sessions.session_questions(existing.id).await?;
                Ok((group_test, course, Some((existing, questions))))
            }
            Err(e) => Err(e),
        }
    }
}

fn is_participant_conflict(err: &Error) -> bool {
    match err {
        Error::Database(sqlx::Error::Database(db_err)) => {
            db_err.constraint() == Some("idx_test_sessions_group_participant")
        }
        _ => false,
    }
}

fn invitation_body(group_test: &GroupTest, course_name: &str, inviter: &str) -> String {
    let config = crate::config::get_config();
    format!(
        "<h2>You are invited to a group test</h2>\
         <p><b>{name}</b> ({course}), scheduled by {inviter}.</p>\
         <ul>\
         <li>Questions: {count}</li>\
         <li>Duration: {duration} minutes</li>\
         <li>Starts at: {start}</li>\
         </ul>\
         <p><a href=\"{domain}/group-test/{id}\">Open the test in the portal</a></p>",
        name = group_test.name,
        course = course_name,
        inviter = inviter,
        count = group_test.question_count,
        duration = group_test.duration_minutes,
        start = group_test.scheduled_start.to_rfc3339(),
        domain = config.frontend_domain,
        id = group_test.id,
    )
}
