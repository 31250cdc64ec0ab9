use std::io::Write as _;
use std::time::Duration;

use clap::Subcommand;
use mindstudy_core::{Config, Event, Preset, TimerEngine};

use super::read_line;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown in the foreground
    Run {
        /// Named preset (see `timer presets`)
        #[arg(long)]
        preset: Option<String>,
        /// Study minutes (overrides config)
        #[arg(long)]
        study: Option<u64>,
        /// Break minutes (overrides config)
        #[arg(long = "break")]
        break_minutes: Option<u64>,
        /// Stop after the first phase ends instead of prompting
        #[arg(long)]
        once: bool,
    },
    /// List built-in presets
    Presets,
}

pub async fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Presets => {
            for preset in Preset::builtin() {
                println!(
                    "{:<10} {}m study / {}m break",
                    preset.name, preset.study_minutes, preset.break_minutes
                );
            }
            Ok(())
        }
        TimerAction::Run {
            preset,
            study,
            break_minutes,
            once,
        } => run_loop(preset, study, break_minutes, once).await,
    }
}

enum DriveOutcome {
    PhaseEnded(Event),
    Interrupted,
}

async fn run_loop(
    preset: Option<String>,
    study: Option<u64>,
    break_minutes: Option<u64>,
    once: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = match preset.as_deref().or(config.timer.preset.as_deref()) {
        Some(name) if study.is_none() && break_minutes.is_none() => {
            let preset = Preset::find(name).ok_or_else(|| format!("unknown preset: {name}"))?;
            TimerEngine::from_preset(&preset)
        }
        _ => TimerEngine::new(
            study.unwrap_or(config.timer.study_minutes),
            break_minutes.unwrap_or(config.timer.break_minutes),
        ),
    };

    loop {
        engine.start();
        println!("{} phase -- {} (Ctrl-C to pause and quit)", engine.mode().label(), engine.display());
        match drive(&mut engine).await? {
            DriveOutcome::Interrupted => {
                println!("\npaused at {} -- goodbye", engine.display());
                return Ok(());
            }
            DriveOutcome::PhaseEnded(event) => {
                if let Event::PhaseEnded { ended, next, .. } = event {
                    println!(
                        "\n{} phase finished! next up: {} ({})",
                        ended.label(),
                        next.label(),
                        engine.display()
                    );
                }
                if once {
                    return Ok(());
                }
                let answer = read_line("press Enter to start the next phase, or q to quit: ")?;
                if answer.eq_ignore_ascii_case("q") {
                    return Ok(());
                }
            }
        }
    }
}

/// Drive ticks while the engine runs. The interval lives only inside this
/// scope, so every exit path drops the tick source.
async fn drive(engine: &mut TimerEngine) -> Result<DriveOutcome, Box<dyn std::error::Error>> {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    // The first tick of a fresh interval fires immediately; consume it so
    // the countdown starts a full second later.
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(event @ Event::PhaseEnded { .. }) = engine.tick() {
                    return Ok(DriveOutcome::PhaseEnded(event));
                }
                print!("\r{}   ", engine.display());
                std::io::stdout().flush()?;
            }
            _ = tokio::signal::ctrl_c() => {
                engine.pause();
                return Ok(DriveOutcome::Interrupted);
            }
        }
    }
}
