use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One question/answer pair of the exit interview form.
///
/// Wire format uses camelCase to match the client payload; the full list is
/// persisted verbatim as a JSON array in `exit_responses.responses`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "questionText": "What is your primary reason for leaving?",
        "response": "Relocating to another city."
    })
)]
pub struct QuestionnaireAnswer {
    #[schema(example = "What is your primary reason for leaving?")]
    pub question_text: String,

    #[schema(example = "Relocating to another city.")]
    pub response: String,
}
