use sqlx::MySqlPool;

use crate::error::WorkflowError;
use crate::model::exit_questionnaire::QuestionnaireAnswer;
use crate::model::resignation::ResignationStatus;
use crate::workflow::lifecycle;

/// Surface-level shape check: at least one answer, no blank questions or
/// responses. The answer list itself is persisted verbatim.
pub fn validate_responses(responses: &[QuestionnaireAnswer]) -> Result<(), WorkflowError> {
    if responses.is_empty() {
        return Err(WorkflowError::Validation(
            "At least one response is required".to_string(),
        ));
    }

    if responses
        .iter()
        .any(|r| r.question_text.trim().is_empty() || r.response.trim().is_empty())
    {
        return Err(WorkflowError::Validation(
            "Every question must have a non-empty answer".to_string(),
        ));
    }

    Ok(())
}

/// Record an employee's exit questionnaire.
///
/// Gated on the employee's latest resignation being approved; the exit form
/// has no meaning for a pending or rejected offboarding.
pub async fn submit(
    pool: &MySqlPool,
    employee_id: u64,
    responses: &[QuestionnaireAnswer],
) -> Result<(), WorkflowError> {
    validate_responses(responses)?;

    let latest = lifecycle::latest_for_employee(pool, employee_id).await?;
    match latest {
        Some(r) if r.status == ResignationStatus::Approved => {}
        _ => {
            return Err(WorkflowError::InvalidState(
                "Exit questionnaire is only available once your resignation has been approved",
            ));
        }
    }

    let body = serde_json::to_string(responses)
        .map_err(|e| WorkflowError::Validation(format!("Invalid responses payload: {e}")))?;

    sqlx::query("INSERT INTO exit_responses (employee_id, responses) VALUES (?, ?)")
        .bind(employee_id)
        .bind(body)
        .execute(pool)
        .await?;

    tracing::info!(employee_id, answers = responses.len(), "Exit questionnaire submitted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_QUESTIONS: [&str; 8] = [
        "What is your primary reason for leaving?",
        "How would you describe your relationship with your manager?",
        "What did you like most about working here?",
        "What did you like least about working here?",
        "Would you recommend this company to others? Why or why not?",
        "What suggestions do you have for improving the work environment?",
        "Did you have the resources and support needed to perform your job effectively?",
        "How would you describe the company culture?",
    ];

    fn answered_form() -> Vec<QuestionnaireAnswer> {
        DEFAULT_QUESTIONS
            .iter()
            .map(|q| QuestionnaireAnswer {
                question_text: q.to_string(),
                response: "A considered answer.".to_string(),
            })
            .collect()
    }

    #[test]
    fn full_form_passes_validation() {
        assert!(validate_responses(&answered_form()).is_ok());
    }

    #[test]
    fn empty_list_is_rejected() {
        let verdict = validate_responses(&[]);
        assert!(matches!(verdict, Err(WorkflowError::Validation(_))));
    }

    #[test]
    fn blank_answer_is_rejected() {
        let mut form = answered_form();
        form[3].response = "   ".to_string();

        let verdict = validate_responses(&form);
        assert!(matches!(verdict, Err(WorkflowError::Validation(_))));
    }

    #[test]
    fn blank_question_is_rejected() {
        let mut form = answered_form();
        form[0].question_text = String::new();

        let verdict = validate_responses(&form);
        assert!(matches!(verdict, Err(WorkflowError::Validation(_))));
    }

    #[test]
    fn answers_round_trip_through_wire_format() {
        let form = answered_form();
        let encoded = serde_json::to_string(&form).unwrap();

        assert!(encoded.contains("questionText"));

        let decoded: Vec<QuestionnaireAnswer> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.len(), form.len());
        assert_eq!(decoded[0].question_text, form[0].question_text);
    }
}
