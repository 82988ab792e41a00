//! Plan recommendation quiz.
//!
//! Four multiple-choice questions, each option weighted 0, 1, or 2. The sum
//! of the chosen weights maps onto a [`PlanTier`]:
//!
//! | Score | Plan    |
//! |-------|---------|
//! | 0-2   | Starter |
//! | 3-5   | Growth  |
//! | 6-8   | Pro     |

use std::collections::HashMap;

use crate::plans::PlanTier;

/// Errors from scoring a set of quiz answers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// A question was left unanswered.
    #[error("please answer: {0}")]
    Unanswered(&'static str),
    /// The answer is not one of the question's options.
    #[error("'{answer}' is not an option for {question}")]
    UnknownOption {
        /// Question id.
        question: &'static str,
        /// Submitted value.
        answer: String,
    },
}

/// One selectable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOption {
    /// Form value.
    pub value: &'static str,
    /// Short label.
    pub label: &'static str,
    /// Supporting text.
    pub description: &'static str,
    /// Points contributed to the score.
    pub weight: u8,
}

/// One quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Form field name.
    pub id: &'static str,
    /// Question text.
    pub prompt: &'static str,
    /// Supporting text.
    pub description: &'static str,
    /// Options, lowest weight first.
    pub options: [QuizOption; 3],
}

impl Question {
    fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

const fn option(
    value: &'static str,
    label: &'static str,
    description: &'static str,
    weight: u8,
) -> QuizOption {
    QuizOption {
        value,
        label,
        description,
        weight,
    }
}

/// The quiz, in presentation order.
pub static QUESTIONS: [Question; 4] = [
    Question {
        id: "business-size",
        prompt: "What's the size of your business?",
        description: "Help us understand your current operation scale",
        options: [
            option("small", "Small Family Business", "1-2 locations, family-operated", 0),
            option("medium", "Growing Business", "3-5 locations, some employees", 1),
            option("large", "Established Chain", "6+ locations, multiple staff", 2),
        ],
    },
    Question {
        id: "order-volume",
        prompt: "How many orders do you process weekly?",
        description: "This helps us recommend the right capacity",
        options: [
            option("low", "Under 100 orders", "Starting or very small volume", 0),
            option("medium", "100-500 orders", "Steady local customer base", 1),
            option("high", "500+ orders", "High volume, multiple channels", 2),
        ],
    },
    Question {
        id: "team-size",
        prompt: "How many team members work with orders?",
        description: "Including family members who help with the business",
        options: [
            option("solo", "Just me or my family", "1-2 people handling everything", 0),
            option("small-team", "Small team", "3-10 people", 1),
            option("large-team", "Large team", "10+ people across locations", 2),
        ],
    },
    Question {
        id: "preferred-channel",
        prompt: "How do your customers prefer to order?",
        description: "Understanding your customer communication preferences",
        options: [
            option("whatsapp", "WhatsApp mainly", "Most customers use WhatsApp", 0),
            option("mixed", "Multiple channels", "WhatsApp, Instagram, phone calls", 1),
            option("digital", "Online platforms", "Website, apps, social media", 2),
        ],
    },
];

/// Sum the weights of the chosen options.
///
/// `answers` maps question id to option value; extra keys are ignored.
///
/// # Errors
///
/// Returns [`QuizError::Unanswered`] for the first question with no answer
/// and [`QuizError::UnknownOption`] for a value the question does not offer.
pub fn score(answers: &HashMap<String, String>) -> Result<u8, QuizError> {
    QUESTIONS.iter().try_fold(0u8, |total, question| {
        let answer = answers
            .get(question.id)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .ok_or(QuizError::Unanswered(question.prompt))?;
        let chosen = question
            .option(answer)
            .ok_or_else(|| QuizError::UnknownOption {
                question: question.id,
                answer: answer.to_owned(),
            })?;
        Ok(total + chosen.weight)
    })
}

/// Map a score onto a plan.
#[must_use]
pub const fn tier_for_score(score: u8) -> PlanTier {
    match score {
        0..=2 => PlanTier::Starter,
        3..=5 => PlanTier::Growth,
        _ => PlanTier::Pro,
    }
}

/// Score the answers and recommend a plan.
///
/// # Errors
///
/// Propagates the errors of [`score`].
pub fn recommend(answers: &HashMap<String, String>) -> Result<PlanTier, QuizError> {
    score(answers).map(tier_for_score)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn answers(values: [&str; 4]) -> HashMap<String, String> {
        QUESTIONS
            .iter()
            .zip(values)
            .map(|(question, value)| (question.id.to_owned(), value.to_owned()))
            .collect()
    }

    #[test]
    fn test_lowest_answers_recommend_starter() {
        let lowest = answers(["small", "low", "solo", "whatsapp"]);
        assert_eq!(score(&lowest).unwrap(), 0);
        assert_eq!(recommend(&lowest).unwrap(), PlanTier::Starter);
    }

    #[test]
    fn test_highest_answers_recommend_pro() {
        let highest = answers(["large", "high", "large-team", "digital"]);
        assert_eq!(score(&highest).unwrap(), 8);
        assert_eq!(recommend(&highest).unwrap(), PlanTier::Pro);
    }

    #[test]
    fn test_score_boundaries() {
        assert_eq!(tier_for_score(2), PlanTier::Starter);
        assert_eq!(tier_for_score(3), PlanTier::Growth);
        assert_eq!(tier_for_score(5), PlanTier::Growth);
        assert_eq!(tier_for_score(6), PlanTier::Pro);
    }

    #[test]
    fn test_mixed_answers() {
        let mixed = answers(["medium", "medium", "small-team", "whatsapp"]);
        assert_eq!(score(&mixed).unwrap(), 3);
        assert_eq!(recommend(&mixed).unwrap(), PlanTier::Growth);
    }

    #[test]
    fn test_unanswered_question_is_rejected() {
        let mut partial = answers(["small", "low", "solo", "whatsapp"]);
        partial.remove("team-size");
        assert_eq!(
            score(&partial),
            Err(QuizError::Unanswered(
                "How many team members work with orders?"
            ))
        );

        partial.insert("team-size".to_owned(), "  ".to_owned());
        assert!(matches!(score(&partial), Err(QuizError::Unanswered(_))));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let bad = answers(["huge", "low", "solo", "whatsapp"]);
        assert!(matches!(
            score(&bad),
            Err(QuizError::UnknownOption {
                question: "business-size",
                ..
            })
        ));
    }

    #[test]
    fn test_every_question_weights_zero_one_two() {
        for question in &QUESTIONS {
            let weights: Vec<u8> = question.options.iter().map(|o| o.weight).collect();
            assert_eq!(weights, vec![0, 1, 2], "{}", question.id);
        }
    }
}
