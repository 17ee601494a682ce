use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// One question block lifted out of a semi-structured document:
/// a numbered question, four options labelled a-d, and an answer line
/// introduced by "answer"/"ans"/"correct"/"corr". Labels tolerate optional
/// punctuation, casing is ignored and every field may span lines, captured
/// non-greedily up to the next recognized label.
static QUESTION_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ims)^\s*\d+\s*[\).:-]?\s*(?P<text>.+?)\s*^\s*a\s*[\).:-]\s*(?P<a>.+?)\s*^\s*b\s*[\).:-]\s*(?P<b>.+?)\s*^\s*c\s*[\).:-]\s*(?P<c>.+?)\s*^\s*d\s*[\).:-]\s*(?P<d>.+?)\s*^\s*(?:answer|ans|correct|corr)\s*[:\).=-]?\s*(?P<answer>[a-d])\b",
    )
    .expect("question block pattern is invalid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuestion {
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    /// Correct option letter, normalized to uppercase A-D.
    pub answer: String,
}

/// Extracts every recognizable multiple-choice block from free-form text.
/// Pure text-in, records-out; file handling lives in `extract`.
pub fn parse_multichoice(text: &str) -> Result<Vec<ParsedQuestion>> {
    let questions: Vec<ParsedQuestion> = QUESTION_BLOCK
        .captures_iter(text)
        .map(|caps| ParsedQuestion {
            text: caps["text"].trim().to_string(),
            option_a: caps["a"].trim().to_string(),
            option_b: caps["b"].trim().to_string(),
            option_c: caps["c"].trim().to_string(),
            option_d: caps["d"].trim().to_string(),
            answer: caps["answer"].to_uppercase(),
        })
        .collect();

    if questions.is_empty() {
        return Err(Error::NoQuestionsFound);
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_block() {
        let text = "1. What is 2+2?\na) 3\nb) 4\nc) 5\nd) 6\nAnswer: B";
        let parsed = parse_multichoice(text).unwrap();
        assert_eq!(parsed.len(), 1);
        let q = &parsed[0];
        assert_eq!(q.text, "What is 2+2?");
        assert_eq!(q.option_a, "3");
        assert_eq!(q.option_b, "4");
        assert_eq!(q.option_c, "5");
        assert_eq!(q.option_d, "6");
        assert_eq!(q.answer, "B");
    }

    #[test]
    fn lowercase_answer_is_normalized() {
        let text = "1) Capital of France?\na. London\nb. Berlin\nc. Paris\nd. Rome\nans c";
        let parsed = parse_multichoice(text).unwrap();
        assert_eq!(parsed[0].answer, "C");
    }

    #[test]
    fn parses_multiple_blocks_with_mixed_labels() {
        let text = "\
1. First question text\n\
A) alpha\n\
B) beta\n\
C) gamma\n\
D) delta\n\
Correct: a\n\
\n\
2: Second question\n\
spanning two lines\n\
a: one\n\
b: two\n\
c: three\n\
d: four\n\
CORR - d\n";
        let parsed = parse_multichoice(text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].answer, "A");
        assert_eq!(parsed[1].text, "Second question\nspanning two lines");
        assert_eq!(parsed[1].answer, "D");
    }

    #[test]
    fn zero_matches_is_an_error() {
        let err = parse_multichoice("lecture notes without any question blocks").unwrap_err();
        assert!(matches!(err, Error::NoQuestionsFound));
    }

    #[test]
    fn incomplete_block_is_skipped() {
        // Missing options c/d and answer line: nothing parseable.
        let text = "1. Half a question\na) yes\nb) no";
        assert!(parse_multichoice(text).is_err());
    }
}
