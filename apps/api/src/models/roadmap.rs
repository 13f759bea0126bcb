use serde::{Deserialize, Serialize};

/// One semester-scoped chunk of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapMilestone {
    pub semester: String,
    pub academic_focus: String,
    pub skills_to_learn: Vec<String>,
    pub project_idea: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    Study,
    Skill,
    Project,
    Chill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTask {
    pub day: String,
    pub task: String,
    pub category: TaskCategory,
}

/// Suggested split of the student's week. The model is asked for
/// percentages but nothing here enforces that they sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBalance {
    pub academics: f64,
    pub skills: f64,
    pub leisure: f64,
    pub projects: f64,
}

/// The whole roadmap as produced by the AI service.
///
/// Every field is required: a payload missing any of them fails
/// deserialization and is treated as a retrieval failure. Views consume this
/// read-only; a new retrieval replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIRoadmapResponse {
    pub readiness_score: f64,
    pub reality_check: String,
    pub time_balance: TimeBalance,
    pub milestones: Vec<RoadmapMilestone>,
    pub next_week_plan: Vec<WeeklyTask>,
    pub missing_skills: Vec<String>,
}

#[cfg(test)]
pub(crate) fn sample_roadmap() -> AIRoadmapResponse {
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    let categories = [
        TaskCategory::Study,
        TaskCategory::Skill,
        TaskCategory::Project,
        TaskCategory::Study,
        TaskCategory::Skill,
        TaskCategory::Project,
        TaskCategory::Chill,
    ];

    AIRoadmapResponse {
        readiness_score: 72.0,
        reality_check: "Solid DSA base; DBMS needs work before placements.".to_string(),
        time_balance: TimeBalance {
            academics: 40.0,
            skills: 30.0,
            leisure: 10.0,
            projects: 20.0,
        },
        milestones: vec![
            RoadmapMilestone {
                semester: "Semester 3".to_string(),
                academic_focus: "DBMS fundamentals".to_string(),
                skills_to_learn: vec!["SQL".to_string(), "Normalization".to_string()],
                project_idea: "Library management system".to_string(),
                resources: vec!["CMU 15-445 lectures".to_string()],
            },
            RoadmapMilestone {
                semester: "Semester 4".to_string(),
                academic_focus: "Operating systems".to_string(),
                skills_to_learn: vec!["Concurrency".to_string()],
                project_idea: "Toy shell".to_string(),
                resources: vec!["OSTEP".to_string(), "xv6 book".to_string()],
            },
        ],
        next_week_plan: days
            .iter()
            .zip(categories)
            .map(|(day, category)| WeeklyTask {
                day: day.to_string(),
                task: format!("{day} task"),
                category,
            })
            .collect(),
        missing_skills: vec!["System Design".to_string()],
    }
}
