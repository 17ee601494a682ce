use crate::error::Result;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// One submitted session joined with its user and course. Only sessions with
/// a non-null score and a positive question count are fetched, so the
/// percentage math below can never divide by zero.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionScoreRow {
    pub session_id: Uuid,
    pub username: String,
    pub course_name: String,
    pub score: i32,
    pub question_count: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub session_id: Uuid,
    pub username: String,
    pub course_name: String,
    pub score: i32,
    pub question_count: i32,
    pub score_percentage: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserTotals {
    pub user_id: Uuid,
    pub total_score: i64,
    pub total_questions: i64,
}

#[derive(Clone)]
pub struct LeaderboardService {
    pool: PgPool,
}

impl LeaderboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn top_sessions(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let rows = sqlx::query_as::<_, SessionScoreRow>(
            r#"
            SELECT ts.id AS session_id, u.username, c.name AS course_name,
                   ts.score, ts.question_count
            FROM test_sessions ts
            JOIN users u ON u.id = ts.user_id
            JOIN courses c ON c.id = ts.course_id
            WHERE ts.score IS NOT NULL AND ts.question_count > 0
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(top_by_percentage(rows, limit))
    }

    pub async fn rank_of(&self, user_id: Uuid) -> Result<Option<usize>> {
        let totals = sqlx::query_as::<_, UserTotals>(
            r#"
            SELECT user_id,
                   COALESCE(SUM(score), 0)::BIGINT AS total_score,
                   COALESCE(SUM(question_count), 0)::BIGINT AS total_questions
            FROM test_sessions
            WHERE score IS NOT NULL
            GROUP BY user_id
            HAVING SUM(question_count) > 0
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rank_in_totals(user_id, totals))
    }
}

/// Sorts submitted sessions by percentage, best first, and keeps the top
/// `limit`. Input rows are assumed pre-filtered to `question_count > 0`.
pub fn top_by_percentage(rows: Vec<SessionScoreRow>, limit: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = rows
        .into_iter()
        .map(|r| {
            let score_percentage = f64::from(r.score) * 100.0 / f64::from(r.question_count);
            LeaderboardEntry {
                session_id: r.session_id,
                username: r.username,
                course_name: r.course_name,
                score: r.score,
                question_count: r.question_count,
                score_percentage,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.score_percentage
            .partial_cmp(&a.score_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(limit);
    entries
}

/// 1-based position of `user_id` after ordering users by average score
/// descending, ties broken ascending by user id for determinism. `None` when
/// the user has no qualifying sessions.
pub fn rank_in_totals(user_id: Uuid, totals: Vec<UserTotals>) -> Option<usize> {
    let mut ranked: Vec<(Uuid, f64)> = totals
        .into_iter()
        .filter(|t| t.total_questions > 0)
        .map(|t| {
            let avg = t.total_score as f64 * 100.0 / t.total_questions as f64;
            (t.user_id, avg)
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    ranked
        .iter()
        .position(|(id, _)| *id == user_id)
        .map(|pos| pos + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(score: i32, count: i32, username: &str) -> SessionScoreRow {
        SessionScoreRow {
            session_id: Uuid::new_v4(),
            username: username.to_string(),
            course_name: "Physics".to_string(),
            score,
            question_count: count,
        }
    }

    #[test]
    fn top_is_sorted_by_percentage_descending() {
        let rows = vec![row(1, 2, "half"), row(9, 10, "ninety"), row(3, 3, "full")];
        let top = top_by_percentage(rows, 10);
        assert_eq!(top[0].username, "full");
        assert_eq!(top[1].username, "ninety");
        assert_eq!(top[2].username, "half");
        assert!((top[0].score_percentage - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn top_respects_limit() {
        let rows = (0..15).map(|i| row(i, 20, "u")).collect();
        assert_eq!(top_by_percentage(rows, 10).len(), 10);
    }

    fn totals(user_id: Uuid, score: i64, questions: i64) -> UserTotals {
        UserTotals {
            user_id,
            total_score: score,
            total_questions: questions,
        }
    }

    #[test]
    fn strict_unique_best_is_rank_one() {
        let best = Uuid::new_v4();
        let other = Uuid::new_v4();
        let rank = rank_in_totals(best, vec![totals(other, 5, 10), totals(best, 9, 10)]);
        assert_eq!(rank, Some(1));
    }

    #[test]
    fn unknown_user_has_no_rank() {
        let rank = rank_in_totals(Uuid::new_v4(), vec![totals(Uuid::new_v4(), 5, 10)]);
        assert_eq!(rank, None);
    }

    #[test]
    fn users_without_questions_are_excluded() {
        let idle = Uuid::new_v4();
        let active = Uuid::new_v4();
        let rank = rank_in_totals(idle, vec![totals(idle, 0, 0), totals(active, 1, 2)]);
        assert_eq!(rank, None);
    }

    #[test]
    fn ties_break_ascending_by_user_id() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let rows = vec![totals(b, 5, 10), totals(a, 5, 10)];
        assert_eq!(rank_in_totals(a, rows.clone()), Some(1));
        assert_eq!(rank_in_totals(b, rows), Some(2));
    }

    #[test]
    fn averages_span_sessions() {
        // 3/10 + 7/10 averages to 50%, beating a single 40% session.
        let steady = Uuid::from_u128(7);
        let lucky = Uuid::from_u128(9);
        let rows = vec![totals(steady, 10, 20), totals(lucky, 4, 10)];
        assert_eq!(rank_in_totals(steady, rows), Some(1));
    }
}
