use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Academic year. Serialized with the labels the onboarding form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentYear {
    #[serde(rename = "1st Year")]
    First,
    #[serde(rename = "2nd Year")]
    Second,
    #[serde(rename = "3rd Year")]
    Third,
    #[serde(rename = "Final Year")]
    Final,
}

impl StudentYear {
    pub fn label(self) -> &'static str {
        match self {
            StudentYear::First => "1st Year",
            StudentYear::Second => "2nd Year",
            StudentYear::Third => "3rd Year",
            StudentYear::Final => "Final Year",
        }
    }
}

impl fmt::Display for StudentYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Career track the student is aiming for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareerGoal {
    #[serde(rename = "Product / FAANG")]
    Faang,
    #[serde(rename = "Startup / Development")]
    Startup,
    #[serde(rename = "Core Engineering")]
    Core,
    #[serde(rename = "Higher Studies (GATE/GRE/CAT)")]
    HigherStudies,
}

impl CareerGoal {
    pub fn label(self) -> &'static str {
        match self {
            CareerGoal::Faang => "Product / FAANG",
            CareerGoal::Startup => "Startup / Development",
            CareerGoal::Core => "Core Engineering",
            CareerGoal::HigherStudies => "Higher Studies (GATE/GRE/CAT)",
        }
    }
}

impl fmt::Display for CareerGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the onboarding form collects. Immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub branch: String,
    pub year: StudentYear,
    pub goal: CareerGoal,
    pub strong_subjects: String,
    pub weak_subjects: String,
}

impl UserProfile {
    /// Presence check on the free-text fields. Enum fields are already
    /// guaranteed valid by deserialization.
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("name", &self.name),
            ("branch", &self.branch),
            ("strongSubjects", &self.strong_subjects),
            ("weakSubjects", &self.weak_subjects),
        ];

        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_profile() -> UserProfile {
    UserProfile {
        name: "Asha".to_string(),
        branch: "CSE".to_string(),
        year: StudentYear::Second,
        goal: CareerGoal::Faang,
        strong_subjects: "DSA".to_string(),
        weak_subjects: "DBMS".to_string(),
    }
}
