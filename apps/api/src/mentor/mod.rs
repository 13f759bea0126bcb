//! Mentor chat: one conversational turn grounded in the student's profile.

use async_trait::async_trait;

use crate::llm_client::prompts::STUDENT_CONTEXT;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::chat::ChatMessage;
use crate::models::profile::UserProfile;

const MENTOR_SYSTEM_TEMPLATE: &str = "You are a friendly senior mentor chatting with {name}, \
    a {year} {branch} student aiming for {goal}. They are strong in {strong_subjects} and \
    weak in {weak_subjects}. Keep answers short and practical, and suggest one next action \
    when it helps.";

#[async_trait]
pub trait MentorService: Send + Sync {
    /// `history` ends with the user's newest message.
    async fn reply(&self, profile: &UserProfile, history: &[ChatMessage])
        -> Result<String, LlmError>;
}

pub struct GeminiMentorService {
    llm: LlmClient,
}

impl GeminiMentorService {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl MentorService for GeminiMentorService {
    async fn reply(
        &self,
        profile: &UserProfile,
        history: &[ChatMessage],
    ) -> Result<String, LlmError> {
        let system = format!("{} {STUDENT_CONTEXT}", mentor_system(profile));
        self.llm.chat(&system, history).await
    }
}

fn mentor_system(profile: &UserProfile) -> String {
    MENTOR_SYSTEM_TEMPLATE
        .replace("{name}", &profile.name)
        .replace("{year}", profile.year.label())
        .replace("{branch}", &profile.branch)
        .replace("{goal}", profile.goal.label())
        .replace("{strong_subjects}", &profile.strong_subjects)
        .replace("{weak_subjects}", &profile.weak_subjects)
}
