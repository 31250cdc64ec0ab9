//! # MindStudy Core Library
//!
//! This library provides the core business logic for the MindStudy study
//! companion. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any GUI shell is a thin layer over
//! the same core library.
//!
//! ## Architecture
//!
//! - **Session Timer**: a caller-driven study/break countdown state machine --
//!   the embedding loop invokes `tick()` once per second and owns the tick
//!   source
//! - **Plan Workflow**: a linear wizard (profile form, quiz, AI-generated
//!   study plan) with a single in-flight generation request
//! - **AI Client**: hosted generative-AI calls (plan generation, audio
//!   narration, grounded chat) behind injected capability traits
//! - **Storage**: SQLite key-value store for the onboarding user record and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core timer state machine
//! - [`PlanWizard`]: quiz-to-plan workflow state machine
//! - [`GeminiClient`]: client for the hosted generation service
//! - [`Database`]: user-record persistence
//! - [`Config`]: application configuration management

pub mod ai;
pub mod audio;
pub mod chat;
pub mod error;
pub mod events;
pub mod flashcards;
pub mod plan;
pub mod progress;
pub mod relax;
pub mod reminders;
pub mod storage;
pub mod timer;

pub use ai::{AiError, ChatProvider, ChatReply, GeminiClient, GroundingSource, PlanGenerator, SpeechGenerator};
pub use audio::{decode_pcm, AudioSink, NarrationOutcome, Narrator, SpeechSynth, SAMPLE_RATE_HZ};
pub use chat::{ChatMessage, ChatSession, Role, SendOutcome};
pub use error::{ConfigError, CoreError, DatabaseError, WorkflowError};
pub use events::Event;
pub use flashcards::{CardDeck, Flashcard};
pub use plan::{run_generation, AnswerOutcome, PlanRequest, PlanWizard, Profile, RoadmapNode, StudyPlan, WizardStep};
pub use progress::{ProgressEntry, ProgressLog};
pub use relax::{RelaxActivity, RELAX_ACTIVITIES};
pub use reminders::{Recurrence, Reminder, ReminderBoard};
pub use storage::{Config, Database, UserRecord};
pub use timer::{Mode, Phase, Preset, TimerEngine};
