//! Plan wizard state machine.
//!
//! ```text
//! Form -> Quiz(0..=7) -> Generating -> Result
//!                ^            |
//!                +------------+  (failure: back to the last question)
//! ```
//!
//! Progression is forward-only except for the explicit `reset()` from the
//! result step, which discards the plan and answers but keeps the profile.
//! At most one generation request is in flight per wizard; the flag is set
//! by `begin_generation` and released by both `complete_generation` and
//! `fail_generation`.

use tokio::sync::Mutex;

use super::quiz::QUESTION_COUNT;
use super::types::{Profile, StudyPlan};
use crate::ai::PlanGenerator;
use crate::error::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Form,
    /// Zero-based index of the question currently shown.
    Quiz(usize),
    Generating,
    Result,
}

/// What `answer` did with the submitted choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// More questions remain; `next` is the next question index.
    Advanced { next: usize },
    /// All eight answers collected; call `begin_generation`.
    ReadyToGenerate,
}

/// Snapshot handed to the generation client. Taken when the request is
/// admitted so later wizard mutations cannot race the network call.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub profile: Profile,
    pub answers: Vec<String>,
}

#[derive(Debug)]
pub struct PlanWizard {
    step: WizardStep,
    profile: Profile,
    answers: Vec<String>,
    plan: Option<StudyPlan>,
    generating: bool,
}

impl PlanWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Form,
            profile: Profile::default(),
            answers: Vec::new(),
            plan: None,
            generating: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn plan(&self) -> Option<&StudyPlan> {
        self.plan.as_ref()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Leave the form step with a validated profile.
    pub fn submit_profile(&mut self, profile: Profile) -> Result<(), WorkflowError> {
        if self.step != WizardStep::Form {
            return Err(WorkflowError::InvalidStep);
        }
        profile.validate()?;
        self.profile = profile;
        self.step = WizardStep::Quiz(0);
        Ok(())
    }

    /// Record the selected option for the current question.
    ///
    /// The eighth answer keeps the wizard on the last question so a failed
    /// generation can land back there for retry; a ninth answer is
    /// rejected.
    pub fn answer(&mut self, choice: impl Into<String>) -> Result<AnswerOutcome, WorkflowError> {
        let WizardStep::Quiz(index) = self.step else {
            return Err(WorkflowError::NotInQuiz);
        };
        if self.answers.len() >= QUESTION_COUNT {
            return Err(WorkflowError::QuizComplete {
                expected: QUESTION_COUNT,
            });
        }
        self.answers.push(choice.into());
        if self.answers.len() < QUESTION_COUNT {
            self.step = WizardStep::Quiz(index + 1);
            Ok(AnswerOutcome::Advanced { next: index + 1 })
        } else {
            Ok(AnswerOutcome::ReadyToGenerate)
        }
    }

    /// Check-and-set the single-in-flight guard and enter `Generating`.
    ///
    /// Returns the request snapshot the client call should use. A second
    /// call while a request is pending is rejected, not queued.
    pub fn begin_generation(&mut self) -> Result<PlanRequest, WorkflowError> {
        if self.generating {
            return Err(WorkflowError::RequestInFlight);
        }
        match self.step {
            WizardStep::Quiz(_) if self.answers.len() == QUESTION_COUNT => {
                self.generating = true;
                self.step = WizardStep::Generating;
                Ok(PlanRequest {
                    profile: self.profile.clone(),
                    answers: self.answers.clone(),
                })
            }
            WizardStep::Quiz(_) | WizardStep::Form => Err(WorkflowError::QuizIncomplete {
                answered: self.answers.len(),
                expected: QUESTION_COUNT,
            }),
            WizardStep::Generating | WizardStep::Result => Err(WorkflowError::InvalidStep),
        }
    }

    /// Store the generated plan and move to the result step.
    pub fn complete_generation(&mut self, plan: StudyPlan) {
        if self.step != WizardStep::Generating {
            return;
        }
        self.generating = false;
        self.plan = Some(plan);
        self.step = WizardStep::Result;
    }

    /// Release the in-flight guard and land back on the last question.
    /// Answers and profile are untouched; the user may retry.
    pub fn fail_generation(&mut self) {
        if self.step != WizardStep::Generating {
            return;
        }
        self.generating = false;
        self.step = WizardStep::Quiz(QUESTION_COUNT - 1);
    }

    /// Explicit user-triggered reset from the result step: the plan and
    /// answers are discarded, the profile survives for the next run.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.plan = None;
        self.generating = false;
        self.step = WizardStep::Form;
    }
}

impl Default for PlanWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive one generation request against a shared wizard.
///
/// The wizard lock is released while the request is in flight; the flag
/// set by `begin_generation` keeps a concurrent caller from issuing a
/// duplicate request in the meantime. The flag is released on both
/// outcomes before this returns.
pub async fn run_generation<G>(
    wizard: &Mutex<PlanWizard>,
    client: &G,
    thinking: bool,
) -> Result<StudyPlan, WorkflowError>
where
    G: PlanGenerator + ?Sized,
{
    let request = wizard.lock().await.begin_generation()?;
    match client
        .generate_plan(&request.profile, &request.answers, thinking)
        .await
    {
        Ok(plan) => {
            wizard.lock().await.complete_generation(plan.clone());
            Ok(plan)
        }
        Err(err) => {
            wizard.lock().await.fail_generation();
            Err(WorkflowError::Generation(err))
        }
    }
}
