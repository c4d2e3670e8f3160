pub mod exit_questionnaire;
pub mod notification;
pub mod resignation;
pub mod role;
