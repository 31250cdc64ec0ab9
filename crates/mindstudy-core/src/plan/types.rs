use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Student profile collected by the wizard's form step.
///
/// Text fields are free-form; the only validation is a non-empty check
/// when the form is submitted. Hour fields are clamped to their ranges at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub grade: String,
    pub strengths: String,
    pub weaknesses: String,
    pub challenges: String,
    pub goals: String,
    /// Daily focus stamina in hours, 1..=14.
    pub focus_hours: u8,
    /// Nightly sleep in hours, 3..=12.
    pub sleep_hours: u8,
}

impl Profile {
    pub const FOCUS_HOURS_MIN: u8 = 1;
    pub const FOCUS_HOURS_MAX: u8 = 14;
    pub const SLEEP_HOURS_MIN: u8 = 3;
    pub const SLEEP_HOURS_MAX: u8 = 12;

    pub fn new(
        grade: impl Into<String>,
        strengths: impl Into<String>,
        weaknesses: impl Into<String>,
        challenges: impl Into<String>,
        goals: impl Into<String>,
        focus_hours: u8,
        sleep_hours: u8,
    ) -> Self {
        Self {
            grade: grade.into(),
            strengths: strengths.into(),
            weaknesses: weaknesses.into(),
            challenges: challenges.into(),
            goals: goals.into(),
            focus_hours: focus_hours.clamp(Self::FOCUS_HOURS_MIN, Self::FOCUS_HOURS_MAX),
            sleep_hours: sleep_hours.clamp(Self::SLEEP_HOURS_MIN, Self::SLEEP_HOURS_MAX),
        }
    }

    /// Non-empty checks applied before the form step completes.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let fields: [(&'static str, &str); 5] = [
            ("grade", &self.grade),
            ("strengths", &self.strengths),
            ("weaknesses", &self.weaknesses),
            ("challenges", &self.challenges),
            ("goals", &self.goals),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(WorkflowError::EmptyProfileField(name));
            }
        }
        Ok(())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            grade: String::new(),
            strengths: String::new(),
            weaknesses: String::new(),
            challenges: String::new(),
            goals: String::new(),
            focus_hours: 4,
            sleep_hours: 7,
        }
    }
}

/// One step of the generated roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapNode {
    pub title: String,
    pub content: String,
}

/// A generated study plan. Produced atomically by the generation call:
/// either fully present or absent, never partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    /// Exactly four roadmap nodes.
    pub roadmap: Vec<RoadmapNode>,
    pub summary: String,
    pub advice: String,
    pub motivational_quote: String,
}

/// Number of nodes every valid roadmap carries.
pub(crate) const ROADMAP_NODES: usize = 4;
