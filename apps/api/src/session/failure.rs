//! Turns a retrieval failure into the banner text the onboarding screen shows.

use serde::Serialize;

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "Error: API Key is missing. Please create a .env file with API_KEY=your_key";
pub const INVALID_CREDENTIAL_MESSAGE: &str = "Error: Invalid API Key. Please check your .env file.";

const MISSING_CREDENTIAL_MARKER: &str = "API Key is missing";
const INVALID_CREDENTIAL_MARKERS: &[&str] = &["401", "key"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    MissingCredential,
    InvalidCredential,
    GenericFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Single classification pass. Markers are checked in precedence order:
/// missing credential, then invalid credential, then the generic fallback.
pub fn classify_failure(failure_text: &str) -> ClassifiedFailure {
    let failure_text = if failure_text.trim().is_empty() {
        "Unknown error occurred"
    } else {
        failure_text
    };

    if failure_text.contains(MISSING_CREDENTIAL_MARKER) {
        return ClassifiedFailure {
            kind: FailureKind::MissingCredential,
            message: MISSING_CREDENTIAL_MESSAGE.to_string(),
        };
    }

    if INVALID_CREDENTIAL_MARKERS
        .iter()
        .any(|marker| failure_text.contains(marker))
    {
        return ClassifiedFailure {
            kind: FailureKind::InvalidCredential,
            message: INVALID_CREDENTIAL_MESSAGE.to_string(),
        };
    }

    ClassifiedFailure {
        kind: FailureKind::GenericFailure,
        message: format!("Failed to generate: {failure_text}"),
    }
}
