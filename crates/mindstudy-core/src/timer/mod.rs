mod engine;
mod preset;

pub use engine::{Mode, Phase, TimerEngine};
pub use preset::Preset;
