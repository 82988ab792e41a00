//! Plan recommendation quiz.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse, response::Response};
use tracing::instrument;

use foodia_core::quiz::{self, QUESTIONS, Question};

use super::home::PlanView;
use crate::state::AppState;

/// One answer choice as rendered in the form.
#[derive(Clone)]
pub struct AnswerView {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub checked: bool,
}

/// One question as rendered in the form.
#[derive(Clone)]
pub struct QuestionView {
    pub id: &'static str,
    pub number: usize,
    pub prompt: &'static str,
    pub description: &'static str,
    pub answers: Vec<AnswerView>,
}

impl QuestionView {
    fn new(number: usize, question: &Question, answers: &HashMap<String, String>) -> Self {
        let selected = answers.get(question.id).map(String::as_str);
        Self {
            id: question.id,
            number,
            prompt: question.prompt,
            description: question.description,
            answers: question
                .options
                .iter()
                .map(|option| AnswerView {
                    value: option.value,
                    label: option.label,
                    description: option.description,
                    checked: selected == Some(option.value),
                })
                .collect(),
        }
    }
}

fn question_views(answers: &HashMap<String, String>) -> Vec<QuestionView> {
    QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, question)| QuestionView::new(i + 1, question, answers))
        .collect()
}

/// Questionnaire template.
#[derive(Template, WebTemplate)]
#[template(path = "quiz.html")]
pub struct QuizTemplate {
    pub questions: Vec<QuestionView>,
    pub error: Option<String>,
}

/// Recommendation template.
#[derive(Template, WebTemplate)]
#[template(path = "quiz_result.html")]
pub struct QuizResultTemplate {
    pub plan: PlanView,
    pub pitch: [&'static str; 3],
    pub score: u8,
}

/// Display the questionnaire.
#[instrument]
pub async fn show() -> impl IntoResponse {
    QuizTemplate {
        questions: question_views(&HashMap::new()),
        error: None,
    }
}

/// Score the answers and show the recommended plan.
///
/// Incomplete or tampered answers re-render the form with the error and the
/// answers already given.
#[instrument(skip(state))]
pub async fn submit(
    State(state): State<AppState>,
    Form(answers): Form<HashMap<String, String>>,
) -> Response {
    match quiz::score(&answers) {
        Ok(score) => {
            let tier = quiz::tier_for_score(score);
            tracing::info!(score, plan = tier.as_str(), "Quiz completed");
            QuizResultTemplate {
                plan: PlanView::new(tier, &state.config().admin_base_url),
                pitch: tier.pitch(),
                score,
            }
            .into_response()
        }
        Err(e) => QuizTemplate {
            questions: question_views(&answers),
            error: Some(e.to_string()),
        }
        .into_response(),
    }
}
