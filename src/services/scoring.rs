use crate::models::question::Question;
use std::collections::HashMap;

/// Counts correct answers for a session's assigned questions.
///
/// `answers` maps question id (string form) to the submitted option letter.
/// Comparison is case-insensitive; a missing answer counts as wrong and keys
/// for questions outside the assigned set are ignored. One point per match,
/// no partial credit.
pub fn score_answers(questions: &[Question], answers: &HashMap<String, String>) -> i32 {
    let mut score = 0;
    for q in questions {
        let submitted = answers
            .get(&q.id.to_string())
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_default();
        if !submitted.is_empty() && submitted == q.correct_option.to_uppercase() {
            score += 1;
        }
    }
    score
}
