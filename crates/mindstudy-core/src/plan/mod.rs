//! Quiz-to-plan workflow: profile form, eight-question quiz, AI-generated
//! study plan.

pub mod quiz;
mod types;
mod wizard;

pub use types::{Profile, RoadmapNode, StudyPlan};
pub(crate) use types::ROADMAP_NODES;
pub use wizard::{run_generation, AnswerOutcome, PlanRequest, PlanWizard, WizardStep};
