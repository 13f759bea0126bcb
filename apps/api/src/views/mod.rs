//! View Router: picks the one presentation view a tab mounts.
//!
//! Views borrow the roadmap, profile and transcript read-only; nothing here
//! mutates state. Only the session controller calls `mount_view`, and only
//! once a roadmap exists.

use serde::{Deserialize, Serialize};

use crate::models::chat::ChatMessage;
use crate::models::profile::UserProfile;
use crate::models::roadmap::{AIRoadmapResponse, RoadmapMilestone, TimeBalance, WeeklyTask};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Dashboard,
    Roadmap,
    Mentor,
    Readiness,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Roadmap, Tab::Mentor, Tab::Readiness];

    /// Short label shown in the bottom navigation.
    pub fn nav_label(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dash",
            Tab::Roadmap => "Path",
            Tab::Mentor => "Mentor",
            Tab::Readiness => "Stats",
        }
    }
}

/// One entry of the bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub tab: Tab,
    pub label: &'static str,
    pub active: bool,
}

pub fn nav_items(active: Tab) -> Vec<NavItem> {
    Tab::ALL
        .iter()
        .map(|&tab| NavItem {
            tab,
            label: tab.nav_label(),
            active: tab == active,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    pub readiness_score: f64,
    pub reality_check: &'a str,
    pub time_balance: &'a TimeBalance,
    pub next_week_plan: &'a [WeeklyTask],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapView<'a> {
    pub milestones: &'a [RoadmapMilestone],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorView<'a> {
    pub profile: &'a UserProfile,
    pub messages: &'a [ChatMessage],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessView<'a> {
    pub readiness_score: f64,
    pub missing_skills: &'a [String],
    pub time_balance: &'a TimeBalance,
}

/// Exactly one mounted view. Serialized as `{"view": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data")]
pub enum MountedView<'a> {
    Dashboard(DashboardView<'a>),
    Roadmap(RoadmapView<'a>),
    Mentor(MentorView<'a>),
    Readiness(ReadinessView<'a>),
}

impl MountedView<'_> {
    pub fn tab(&self) -> Tab {
        match self {
            MountedView::Dashboard(_) => Tab::Dashboard,
            MountedView::Roadmap(_) => Tab::Roadmap,
            MountedView::Mentor(_) => Tab::Mentor,
            MountedView::Readiness(_) => Tab::Readiness,
        }
    }
}

pub fn mount_view<'a>(
    tab: Tab,
    roadmap: &'a AIRoadmapResponse,
    profile: &'a UserProfile,
    messages: &'a [ChatMessage],
) -> MountedView<'a> {
    match tab {
        Tab::Dashboard => MountedView::Dashboard(DashboardView {
            readiness_score: roadmap.readiness_score,
            reality_check: &roadmap.reality_check,
            time_balance: &roadmap.time_balance,
            next_week_plan: &roadmap.next_week_plan,
        }),
        Tab::Roadmap => MountedView::Roadmap(RoadmapView {
            milestones: &roadmap.milestones,
        }),
        Tab::Mentor => MountedView::Mentor(MentorView { profile, messages }),
        Tab::Readiness => MountedView::Readiness(ReadinessView {
            readiness_score: roadmap.readiness_score,
            missing_skills: &roadmap.missing_skills,
            time_balance: &roadmap.time_balance,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::sample_profile;
    use crate::models::roadmap::sample_roadmap;

    #[test]
    fn test_default_tab_is_dashboard() {
        assert_eq!(Tab::default(), Tab::Dashboard);
    }

    #[test]
    fn test_every_tab_mounts_its_own_view() {
        let roadmap = sample_roadmap();
        let profile = sample_profile();
        for tab in Tab::ALL {
            assert_eq!(mount_view(tab, &roadmap, &profile, &[]).tab(), tab);
        }
    }

    #[test]
    fn test_same_tab_mounts_same_view() {
        let roadmap = sample_roadmap();
        let profile = sample_profile();
        assert_eq!(
            mount_view(Tab::Readiness, &roadmap, &profile, &[]),
            mount_view(Tab::Readiness, &roadmap, &profile, &[])
        );
    }

    #[test]
    fn test_dashboard_shows_readiness_score() {
        let roadmap = sample_roadmap();
        let profile = sample_profile();
        match mount_view(Tab::Dashboard, &roadmap, &profile, &[]) {
            MountedView::Dashboard(view) => {
                assert_eq!(view.readiness_score, 72.0);
                assert_eq!(view.next_week_plan.len(), 7);
            }
            other => panic!("expected dashboard, got {other:?}"),
        }
    }

    #[test]
    fn test_mentor_view_carries_profile_and_transcript() {
        let roadmap = sample_roadmap();
        let profile = sample_profile();
        let messages = vec![ChatMessage::user("hi"), ChatMessage::model("hello")];
        match mount_view(Tab::Mentor, &roadmap, &profile, &messages) {
            MountedView::Mentor(view) => {
                assert_eq!(view.profile.name, "Asha");
                assert_eq!(view.messages.len(), 2);
            }
            other => panic!("expected mentor, got {other:?}"),
        }
    }

    #[test]
    fn test_mounted_view_serializes_tagged() {
        let roadmap = sample_roadmap();
        let profile = sample_profile();
        let value =
            serde_json::to_value(mount_view(Tab::Roadmap, &roadmap, &profile, &[])).unwrap();
        assert_eq!(value["view"], "Roadmap");
        assert_eq!(value["data"]["milestones"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_nav_items_mark_exactly_one_active() {
        let items = nav_items(Tab::Mentor);
        let labels: Vec<_> = items.iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["Dash", "Path", "Mentor", "Stats"]);

        let active: Vec<_> = items.iter().filter(|i| i.active).map(|i| i.tab).collect();
        assert_eq!(active, vec![Tab::Mentor]);
    }
}
