//! Roadmap Retrieval — profile in, roadmap out or failure.
//!
//! `AppState` holds an `Arc<dyn RoadmapService>` so handlers and the session
//! controller never depend on Gemini directly.

pub mod prompts;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, STUDENT_CONTEXT};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::profile::UserProfile;
use crate::models::roadmap::AIRoadmapResponse;
use crate::roadmap::prompts::{ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM};

/// The retrieval boundary. Implementations perform no validation beyond
/// producing a complete `AIRoadmapResponse`, and never retry.
#[async_trait]
pub trait RoadmapService: Send + Sync {
    async fn fetch_roadmap(&self, profile: &UserProfile) -> Result<AIRoadmapResponse, LlmError>;
}

/// Gemini-backed retrieval in JSON mode.
pub struct GeminiRoadmapService {
    llm: LlmClient,
    schema: Value,
}

impl GeminiRoadmapService {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            schema: roadmap_schema(),
        }
    }
}

#[async_trait]
impl RoadmapService for GeminiRoadmapService {
    async fn fetch_roadmap(&self, profile: &UserProfile) -> Result<AIRoadmapResponse, LlmError> {
        let prompt = build_roadmap_prompt(profile);
        let system = format!("{ROADMAP_SYSTEM} {STUDENT_CONTEXT} {JSON_ONLY_SYSTEM}");

        let roadmap: AIRoadmapResponse = self.llm.call_json(&prompt, &system, &self.schema).await?;

        info!(
            "Roadmap generated: readiness={}, milestones={}, tasks={}",
            roadmap.readiness_score,
            roadmap.milestones.len(),
            roadmap.next_week_plan.len()
        );

        Ok(roadmap)
    }
}

fn build_roadmap_prompt(profile: &UserProfile) -> String {
    ROADMAP_PROMPT_TEMPLATE
        .replace("{name}", &profile.name)
        .replace("{branch}", &profile.branch)
        .replace("{year}", profile.year.label())
        .replace("{goal}", profile.goal.label())
        .replace("{strong_subjects}", &profile.strong_subjects)
        .replace("{weak_subjects}", &profile.weak_subjects)
}

/// Gemini `responseSchema` mirroring `AIRoadmapResponse`. Every field is
/// listed as required so the model cannot drop one.
fn roadmap_schema() -> Value {
    let string_array = json!({ "type": "ARRAY", "items": { "type": "STRING" } });

    json!({
        "type": "OBJECT",
        "properties": {
            "readinessScore": { "type": "NUMBER" },
            "realityCheck": { "type": "STRING" },
            "timeBalance": {
                "type": "OBJECT",
                "properties": {
                    "academics": { "type": "NUMBER" },
                    "skills": { "type": "NUMBER" },
                    "leisure": { "type": "NUMBER" },
                    "projects": { "type": "NUMBER" }
                },
                "required": ["academics", "skills", "leisure", "projects"]
            },
            "milestones": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "semester": { "type": "STRING" },
                        "academicFocus": { "type": "STRING" },
                        "skillsToLearn": string_array,
                        "projectIdea": { "type": "STRING" },
                        "resources": string_array
                    },
                    "required": ["semester", "academicFocus", "skillsToLearn", "projectIdea", "resources"]
                }
            },
            "nextWeekPlan": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "STRING" },
                        "task": { "type": "STRING" },
                        "category": {
                            "type": "STRING",
                            "enum": ["Study", "Skill", "Project", "Chill"]
                        }
                    },
                    "required": ["day", "task", "category"]
                }
            },
            "missingSkills": string_array
        },
        "required": [
            "readinessScore",
            "realityCheck",
            "timeBalance",
            "milestones",
            "nextWeekPlan",
            "missingSkills"
        ]
    })
}
