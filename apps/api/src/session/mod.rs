//! Sessions: per-browser controllers plus the async flows that drive them.
//!
//! Flow for a profile submission:
//!   lock → begin_retrieval → unlock → fetch_roadmap → lock → complete_retrieval
//!
//! The session lock is never held across an AI call.

pub mod controller;
pub mod failure;
pub mod handlers;
pub mod store;

use std::sync::Arc;

use anyhow::anyhow;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::mentor::MentorService;
use crate::models::profile::UserProfile;
use crate::roadmap::RoadmapService;
use crate::session::controller::{Completion, Phase};
use crate::session::store::SharedSession;

/// Runs one retrieval attempt for `profile` and returns the resulting phase.
///
/// The AI call runs on its own task, so dropping this future (for instance
/// when the HTTP client disconnects) does not cancel the retrieval or strand
/// the session in `Loading`.
pub async fn submit_profile(
    session: SharedSession,
    service: Arc<dyn RoadmapService>,
    profile: UserProfile,
) -> Result<Phase, AppError> {
    let ticket = session.lock().await.begin_retrieval(profile)?;

    let task_session = session.clone();
    let handle = tokio::spawn(async move {
        let result = service.fetch_roadmap(&ticket.profile).await;
        let mut guard = task_session.lock().await;
        guard.complete_retrieval(ticket.generation, result)
    });

    let completion = handle
        .await
        .map_err(|e| AppError::Internal(anyhow!("Roadmap task failed: {e}")))?;

    let phase = match completion {
        Completion::Applied(phase) => phase,
        Completion::Stale => session.lock().await.phase(),
    };
    Ok(phase)
}

/// One mentor turn: append the question, ask the mentor, append the answer.
/// On failure the unanswered question is dropped and the error returned.
///
/// Like retrieval, the call runs on its own task so the turn is always
/// closed even if the requester goes away.
pub async fn send_mentor_message(
    session: SharedSession,
    mentor: Arc<dyn MentorService>,
    text: &str,
) -> Result<String, AppError> {
    let (profile, history) = session.lock().await.begin_mentor_turn(text)?;

    let task_session = session.clone();
    let handle = tokio::spawn(async move {
        let result = mentor.reply(&profile, &history).await;
        let mut guard = task_session.lock().await;
        match &result {
            Ok(reply) => {
                info!("Mentor replied ({} chars)", reply.len());
                guard.record_mentor_reply(reply.clone());
            }
            Err(e) => {
                warn!("Mentor turn for session {} failed: {e}", guard.id());
                guard.abandon_mentor_turn();
            }
        }
        result
    });

    let reply = handle
        .await
        .map_err(|e| AppError::Internal(anyhow!("Mentor task failed: {e}")))??;
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::sync::{Mutex, Notify};
    use uuid::Uuid;

    use crate::models::profile::sample_profile;
    use crate::session::controller::SessionController;
    use crate::session::failure::MISSING_CREDENTIAL_MESSAGE;
    use crate::test_support::{EchoMentor, FakeRoadmapService, GatedMentor, Outcome};
    use crate::views::{MountedView, Tab};

    fn new_session() -> SharedSession {
        Arc::new(Mutex::new(SessionController::new(Uuid::new_v4())))
    }

    async fn wait_until_loading(session: &SharedSession) {
        for _ in 0..1000 {
            if session.lock().await.is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("session never entered Loading");
    }

    #[tokio::test]
    async fn test_asha_scenario_reaches_ready_on_dashboard() {
        let session = new_session();
        let service = Arc::new(FakeRoadmapService::new(Outcome::Roadmap));

        let phase = submit_profile(session.clone(), service.clone(), sample_profile())
            .await
            .unwrap();

        assert_eq!(phase, Phase::Ready);
        assert_eq!(service.calls(), 1);

        let guard = session.lock().await;
        let roadmap = guard.roadmap().unwrap();
        assert_eq!(roadmap.milestones.len(), 2);
        assert_eq!(roadmap.next_week_plan.len(), 7);
        assert_eq!(roadmap.missing_skills, vec!["System Design"]);
        assert_eq!(guard.active_tab(), Tab::Dashboard);
        match guard.mounted_view() {
            Some(MountedView::Dashboard(view)) => assert_eq!(view.readiness_score, 72.0),
            other => panic!("expected dashboard, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_scenario_allows_resubmission() {
        let session = new_session();
        let failing = Arc::new(FakeRoadmapService::new(Outcome::MissingKey));

        let phase = submit_profile(session.clone(), failing, sample_profile())
            .await
            .unwrap();
        assert_eq!(phase, Phase::Error);
        {
            let guard = session.lock().await;
            assert_eq!(guard.error(), Some(MISSING_CREDENTIAL_MESSAGE));
            assert!(guard.profile().is_none());
        }

        let working = Arc::new(FakeRoadmapService::new(Outcome::Roadmap));
        let phase = submit_profile(session.clone(), working, sample_profile())
            .await
            .unwrap();
        assert_eq!(phase, Phase::Ready);
        assert!(session.lock().await.error().is_none());
    }

    #[tokio::test]
    async fn test_only_one_retrieval_in_flight() {
        let session = new_session();
        let gate = Arc::new(Notify::new());
        let service = Arc::new(FakeRoadmapService::gated(Outcome::Roadmap, gate.clone()));

        let first = tokio::spawn(submit_profile(
            session.clone(),
            service.clone(),
            sample_profile(),
        ));
        wait_until_loading(&session).await;

        let second = submit_profile(session.clone(), service.clone(), sample_profile()).await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        gate.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), Phase::Ready);
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_dropped_submitter_does_not_cancel_retrieval() {
        let session = new_session();
        let gate = Arc::new(Notify::new());
        let service = Arc::new(FakeRoadmapService::gated(Outcome::Roadmap, gate.clone()));

        let submitter = tokio::spawn(submit_profile(
            session.clone(),
            service.clone(),
            sample_profile(),
        ));
        wait_until_loading(&session).await;
        submitter.abort();

        gate.notify_one();
        for _ in 0..1000 {
            if session.lock().await.phase() == Phase::Ready {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("retrieval did not complete after submitter was dropped");
    }

    #[tokio::test]
    async fn test_mentor_round_trip_appends_both_messages() {
        let session = new_session();
        let service = Arc::new(FakeRoadmapService::new(Outcome::Roadmap));
        submit_profile(session.clone(), service, sample_profile())
            .await
            .unwrap();

        let mentor = Arc::new(EchoMentor { fail: false });
        let reply = send_mentor_message(session.clone(), mentor, "DBMS tips?")
            .await
            .unwrap();

        assert_eq!(reply, "Asha, about 'DBMS tips?': keep going");
        assert_eq!(session.lock().await.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_mentor_failure_drops_question_and_keeps_roadmap() {
        let session = new_session();
        let service = Arc::new(FakeRoadmapService::new(Outcome::Roadmap));
        submit_profile(session.clone(), service, sample_profile())
            .await
            .unwrap();

        let failing = Arc::new(EchoMentor { fail: true });
        let result = send_mentor_message(session.clone(), failing, "hello").await;
        assert!(matches!(result, Err(AppError::Llm(_))));

        {
            let guard = session.lock().await;
            assert!(guard.messages().is_empty());
            assert_eq!(guard.phase(), Phase::Ready);
            assert!(guard.roadmap().is_some());
        }

        let working = Arc::new(EchoMentor { fail: false });
        send_mentor_message(session.clone(), working, "hello again")
            .await
            .unwrap();
        assert_eq!(session.lock().await.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_mentor_messages_do_not_interleave() {
        let session = new_session();
        let service = Arc::new(FakeRoadmapService::new(Outcome::Roadmap));
        submit_profile(session.clone(), service, sample_profile())
            .await
            .unwrap();

        let gate = Arc::new(Notify::new());
        let slow = Arc::new(GatedMentor { gate: gate.clone() });
        let first = tokio::spawn(send_mentor_message(session.clone(), slow.clone(), "first"));

        for _ in 0..1000 {
            if !session.lock().await.messages().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        let second = send_mentor_message(session.clone(), slow, "second").await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        gate.notify_one();
        first.await.unwrap().unwrap();

        let guard = session.lock().await;
        let texts: Vec<_> = guard.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "ok"]);
    }
}
