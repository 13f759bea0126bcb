// All LLM prompt constants for roadmap retrieval.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for roadmap generation.
pub const ROADMAP_SYSTEM: &str = "You are EngiPath, a blunt but supportive career \
    strategist for engineering students. You turn a student's profile into a \
    semester-by-semester plan, a week of concrete tasks and an honest readiness score.";

/// Roadmap prompt template.
/// Replace: {name}, {branch}, {year}, {goal}, {strong_subjects}, {weak_subjects}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Build a career roadmap for this student.

STUDENT PROFILE:
- Name: {name}
- Branch: {branch}
- Year: {year}
- Career goal: {goal}
- Strong subjects: {strong_subjects}
- Weak subjects: {weak_subjects}

Return a JSON object with this EXACT shape:
{
  "readinessScore": 0-100 integer, how ready they are for the goal today,
  "realityCheck": "2-3 sentences of honest assessment",
  "timeBalance": {"academics": %, "skills": %, "leisure": %, "projects": %},
  "milestones": [
    {
      "semester": "Semester 3",
      "academicFocus": "what to prioritise in coursework",
      "skillsToLearn": ["skill"],
      "projectIdea": "one concrete project",
      "resources": ["book, course or site name"]
    }
  ],
  "nextWeekPlan": [
    {"day": "Mon", "task": "specific task", "category": "Study | Skill | Project | Chill"}
  ],
  "missingSkills": ["skill the goal needs that the student lacks"]
}

RULES:
1. One milestone per remaining semester, starting from the student's current year
2. nextWeekPlan has exactly 7 entries, Monday to Sunday, with at least one Chill day
3. timeBalance values are percentages that sum to 100
4. Use the weak subjects to shape academicFocus; use strong subjects to pick projects
5. Resources must be real, freely findable names"#;
