//! Application State Controller — one per session.
//!
//! Phases: Onboarding → Loading → (Ready | Error), and Error → Loading on
//! resubmission. All mutation goes through the named transitions below; the
//! caller performs the AI call between `begin_retrieval` and
//! `complete_retrieval` without holding any lock.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::LlmError;
use crate::models::chat::{ChatMessage, ChatRole};
use crate::models::profile::UserProfile;
use crate::models::roadmap::AIRoadmapResponse;
use crate::session::failure::classify_failure;
use crate::views::{mount_view, nav_items, MountedView, NavItem, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Onboarding,
    Loading,
    Error,
    Ready,
}

/// Handed out by `begin_retrieval`. Carries the submitted profile to the
/// retrieval task and the generation used to detect stale completions.
#[derive(Debug, Clone)]
pub struct RetrievalTicket {
    pub generation: u64,
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied(Phase),
    /// The result belonged to an attempt that is no longer current.
    Stale,
}

/// Read-only view of a session, as returned to the front end.
/// `view` and `nav` are only present in `Ready`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot<'a> {
    pub id: Uuid,
    pub phase: Phase,
    pub is_loading: bool,
    pub error: Option<&'a str>,
    pub active_tab: Tab,
    pub view: Option<MountedView<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nav: Vec<NavItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionController {
    id: Uuid,
    phase: Phase,
    profile: Option<UserProfile>,
    roadmap: Option<AIRoadmapResponse>,
    error: Option<String>,
    active_tab: Tab,
    messages: Vec<ChatMessage>,
    mentor_in_flight: bool,
    generation: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionController {
    pub fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            phase: Phase::Onboarding,
            profile: None,
            roadmap: None,
            error: None,
            active_tab: Tab::default(),
            messages: Vec::new(),
            mentor_in_flight: false,
            generation: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The flag the onboarding form uses to disable resubmission.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    #[cfg(test)]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    #[cfg(test)]
    pub fn roadmap(&self) -> Option<&AIRoadmapResponse> {
        self.roadmap.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Onboarding/Error → Loading. Stores the profile tentatively. Any error
    /// banner stays visible until this attempt resolves.
    pub fn begin_retrieval(&mut self, profile: UserProfile) -> Result<RetrievalTicket, AppError> {
        match self.phase {
            Phase::Loading => {
                return Err(AppError::Conflict(
                    "A roadmap request is already in progress".to_string(),
                ))
            }
            Phase::Ready => {
                return Err(AppError::Conflict(
                    "This session already has a roadmap".to_string(),
                ))
            }
            Phase::Onboarding | Phase::Error => {}
        }

        profile.validate()?;

        self.generation += 1;
        self.profile = Some(profile.clone());
        self.phase = Phase::Loading;
        self.touch();

        info!(
            "Session {} retrieval #{} started for {} ({}, {})",
            self.id, self.generation, profile.name, profile.year, profile.goal
        );

        Ok(RetrievalTicket {
            generation: self.generation,
            profile,
        })
    }

    /// Loading → Ready on success, Loading → Error on failure. Results for
    /// any attempt other than the current one are discarded.
    pub fn complete_retrieval(
        &mut self,
        generation: u64,
        result: Result<AIRoadmapResponse, LlmError>,
    ) -> Completion {
        if self.phase != Phase::Loading || generation != self.generation {
            warn!(
                "Session {} discarding stale retrieval #{} (current #{}, phase {:?})",
                self.id, generation, self.generation, self.phase
            );
            return Completion::Stale;
        }

        match result {
            Ok(roadmap) => {
                self.roadmap = Some(roadmap);
                self.error = None;
                self.phase = Phase::Ready;
                info!("Session {} is ready", self.id);
            }
            Err(e) => {
                let classified = classify_failure(&e.to_string());
                error!(
                    "Roadmap generation error for session {} ({:?}): {e}",
                    self.id, classified.kind
                );
                self.error = Some(classified.message);
                self.profile = None;
                self.roadmap = None;
                self.phase = Phase::Error;
            }
        }

        self.touch();
        Completion::Applied(self.phase)
    }

    /// Ready → Ready. Changes only which view is mounted.
    pub fn select_tab(&mut self, tab: Tab) -> Result<(), AppError> {
        if self.phase != Phase::Ready {
            return Err(AppError::Conflict(
                "Tabs are available once the roadmap is ready".to_string(),
            ));
        }
        if self.active_tab != tab {
            self.active_tab = tab;
            self.touch();
        }
        Ok(())
    }

    /// Appends the user's message and returns what the mentor call needs.
    /// Only one turn may be open at a time, so replies cannot interleave.
    pub fn begin_mentor_turn(
        &mut self,
        text: &str,
    ) -> Result<(UserProfile, Vec<ChatMessage>), AppError> {
        let profile = match (self.phase, &self.profile) {
            (Phase::Ready, Some(profile)) => profile.clone(),
            _ => {
                return Err(AppError::Conflict(
                    "The mentor is available once the roadmap is ready".to_string(),
                ))
            }
        };

        if self.mentor_in_flight {
            return Err(AppError::Conflict(
                "The mentor is still answering the previous message".to_string(),
            ));
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("text cannot be empty".to_string()));
        }

        self.messages.push(ChatMessage::user(text));
        self.mentor_in_flight = true;
        self.touch();
        Ok((profile, self.messages.clone()))
    }

    pub fn record_mentor_reply(&mut self, text: String) {
        self.messages.push(ChatMessage::model(text));
        self.mentor_in_flight = false;
        self.touch();
    }

    /// Closes a failed turn by dropping its unanswered question, so the
    /// transcript keeps alternating user/model.
    pub fn abandon_mentor_turn(&mut self) {
        if !self.mentor_in_flight {
            return;
        }
        if matches!(self.messages.last(), Some(m) if m.role == ChatRole::User) {
            self.messages.pop();
        }
        self.mentor_in_flight = false;
        self.touch();
    }

    /// The mounted view, present only when both profile and roadmap exist.
    pub fn mounted_view(&self) -> Option<MountedView<'_>> {
        match (&self.roadmap, &self.profile) {
            (Some(roadmap), Some(profile)) if self.phase == Phase::Ready => Some(mount_view(
                self.active_tab,
                roadmap,
                profile,
                &self.messages,
            )),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        let view = self.mounted_view();
        let nav = view
            .as_ref()
            .map(|v| nav_items(v.tab()))
            .unwrap_or_default();

        SessionSnapshot {
            id: self.id,
            phase: self.phase,
            is_loading: self.is_loading(),
            error: self.error(),
            active_tab: self.active_tab,
            view,
            nav,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
