//! Fake AI services for tests. No network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::config::Config;
use crate::llm_client::LlmError;
use crate::mentor::MentorService;
use crate::models::chat::ChatMessage;
use crate::models::profile::UserProfile;
use crate::models::roadmap::{sample_roadmap, AIRoadmapResponse};
use crate::roadmap::RoadmapService;
use crate::session::store::SessionStore;
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Roadmap,
    MissingKey,
    Unauthorized,
    Empty,
}

/// Returns a fixed outcome, optionally waiting on `gate` first.
pub struct FakeRoadmapService {
    outcome: Outcome,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl FakeRoadmapService {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn gated(outcome: Outcome, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(outcome)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoadmapService for FakeRoadmapService {
    async fn fetch_roadmap(&self, _profile: &UserProfile) -> Result<AIRoadmapResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.outcome {
            Outcome::Roadmap => Ok(sample_roadmap()),
            Outcome::MissingKey => Err(LlmError::MissingApiKey),
            Outcome::Unauthorized => Err(LlmError::Api {
                status: 401,
                message: "Unauthorized".to_string(),
            }),
            Outcome::Empty => Err(LlmError::EmptyContent),
        }
    }
}

/// Echoes the last user message, or fails when `fail` is set.
pub struct EchoMentor {
    pub fail: bool,
}

#[async_trait]
impl MentorService for EchoMentor {
    async fn reply(
        &self,
        profile: &UserProfile,
        history: &[ChatMessage],
    ) -> Result<String, LlmError> {
        if self.fail {
            return Err(LlmError::EmptyContent);
        }
        let last = history.last().map(|m| m.text.as_str()).unwrap_or_default();
        Ok(format!("{}, about '{last}': keep going", profile.name))
    }
}

/// Answers "ok" once `gate` is notified.
pub struct GatedMentor {
    pub gate: Arc<Notify>,
}

#[async_trait]
impl MentorService for GatedMentor {
    async fn reply(
        &self,
        _profile: &UserProfile,
        _history: &[ChatMessage],
    ) -> Result<String, LlmError> {
        self.gate.notified().await;
        Ok("ok".to_string())
    }
}

pub fn test_config() -> Config {
    Config {
        api_key: None,
        gemini_model: "gemini-test".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        session_idle_ttl: std::time::Duration::from_secs(60),
    }
}

pub fn test_state(roadmap: Arc<dyn RoadmapService>, mentor_fails: bool) -> AppState {
    AppState {
        sessions: SessionStore::new(),
        roadmap_service: roadmap,
        mentor_service: Arc::new(EchoMentor { fail: mentor_fails }),
        config: test_config(),
    }
}
