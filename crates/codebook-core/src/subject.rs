//! Subject text built from structured survey answers.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ROLE: &str = "5th Grade Teacher";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAnswer {
    pub question: String,
    pub answer: String,
}

impl SurveyAnswer {
    /// Parse `"<question>=<answer>"`. Splits on the first `=`.
    pub fn parse(pair: &str) -> Option<Self> {
        let (question, answer) = pair.split_once('=')?;
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        Some(Self {
            question: question.to_string(),
            answer: answer.trim().to_string(),
        })
    }
}

/// One respondent's answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentResponse {
    pub student: String,
    pub answers: Vec<SurveyAnswer>,
}

impl StudentResponse {
    /// Header line, then each question label followed by its answer.
    pub fn subject_text(&self, role: &str) -> String {
        let mut out = format!("{}, {}\n\nResponses:", self.student, role);
        for a in &self.answers {
            out.push('\n');
            out.push_str(&a.question);
            out.push('\n');
            out.push_str(&a.answer);
        }
        out
    }
}

/// All respondents in one block, separated by blank lines.
pub fn cohort_subject_text(responses: &[StudentResponse]) -> String {
    responses
        .iter()
        .map(|r| {
            let answers = r
                .answers
                .iter()
                .map(|a| a.answer.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            format!("Student: {}\nResponse:\n{}", r.student, answers)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTION: &str = "What student information do you need to plan the lesson?";

    fn maria() -> StudentResponse {
        StudentResponse {
            student: "Maria".into(),
            answers: vec![SurveyAnswer {
                question: QUESTION.into(),
                answer: "I need to know her reading level.".into(),
            }],
        }
    }

    #[test]
    fn single_student_layout() {
        assert_eq!(
            maria().subject_text(DEFAULT_ROLE),
            format!(
                "Maria, 5th Grade Teacher\n\nResponses:\n{QUESTION}\nI need to know her reading level."
            )
        );
    }

    #[test]
    fn cohort_joins_with_blank_lines() {
        let mut leo = maria();
        leo.student = "Leo".into();
        leo.answers[0].answer = "His IEP goals.".into();
        let text = cohort_subject_text(&[maria(), leo]);
        assert_eq!(
            text,
            "Student: Maria\nResponse:\nI need to know her reading level.\n\n\
             Student: Leo\nResponse:\nHis IEP goals."
        );
    }

    #[test]
    fn parse_answer_pair() {
        let a = SurveyAnswer::parse("Goals = reading = fluency").unwrap();
        assert_eq!(a.question, "Goals");
        assert_eq!(a.answer, "reading = fluency");
        assert!(SurveyAnswer::parse("no separator").is_none());
        assert!(SurveyAnswer::parse("=answer only").is_none());
    }
}
