//! Axum route handlers for the Session API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::chat::ChatMessage;
use crate::models::profile::UserProfile;
use crate::session::controller::SessionController;
use crate::session::store::SharedSession;
use crate::session::{send_mentor_message, submit_profile};
use crate::state::AppState;
use crate::views::Tab;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: Tab,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub messages: Vec<ChatMessage>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let session = state.sessions.create().await;
    let guard = session.lock().await;
    tracing::info!("Created session {}", guard.id());
    Ok((StatusCode::CREATED, Json(snapshot_json(&guard)?)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = find_session(&state, id).await?;
    let guard = session.lock().await;
    Ok(Json(snapshot_json(&guard)?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// POST /api/v1/sessions/:id/profile
///
/// The onboarding form's `onComplete`. Resolves once the retrieval attempt
/// does; a failed attempt is still a 200 carrying the error banner.
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(profile): AppJson<UserProfile>,
) -> Result<Json<Value>, AppError> {
    let session = find_session(&state, id).await?;

    submit_profile(session.clone(), state.roadmap_service.clone(), profile).await?;

    let guard = session.lock().await;
    Ok(Json(snapshot_json(&guard)?))
}

/// PUT /api/v1/sessions/:id/tab
pub async fn handle_select_tab(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<SelectTabRequest>,
) -> Result<Json<Value>, AppError> {
    let session = find_session(&state, id).await?;
    let mut guard = session.lock().await;
    guard.select_tab(request.tab)?;
    tracing::debug!("Session {} showing {:?}", guard.id(), guard.active_tab());
    Ok(Json(snapshot_json(&guard)?))
}

/// POST /api/v1/sessions/:id/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session = find_session(&state, id).await?;

    let reply =
        send_mentor_message(session.clone(), state.mentor_service.clone(), &request.text).await?;

    let messages = session.lock().await.messages().to_vec();
    Ok(Json(ChatResponse { reply, messages }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

fn snapshot_json(controller: &SessionController) -> Result<Value, AppError> {
    serde_json::to_value(controller.snapshot())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize session: {e}")))
}
