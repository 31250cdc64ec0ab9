use std::path::PathBuf;

use clap::Args;
use mindstudy_core::plan::{quiz, run_generation, AnswerOutcome, PlanWizard};
use mindstudy_core::storage::data_dir;
use mindstudy_core::{
    AudioSink, Config, Database, GeminiClient, NarrationOutcome, Narrator, Profile, SpeechSynth,
    StudyPlan, WorkflowError,
};
use tokio::sync::Mutex;

use super::{read_line, read_nonempty};

#[derive(Args)]
pub struct PlanArgs {
    /// Request deeper reasoning (slower, costlier)
    #[arg(long)]
    pub thinking: bool,
    /// Narrate the finished plan
    #[arg(long)]
    pub narrate: bool,
}

pub async fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let client = GeminiClient::from_env(&config.ai)?;
    let user_name = match Database::open()?.load_user()? {
        Some(user) => user.name,
        None => {
            println!("tip: run `mindstudy profile set <name> <email>` to personalize this.\n");
            "there".to_string()
        }
    };

    let wizard = Mutex::new(PlanWizard::new());

    println!("Let's build your study plan. First, a few questions about you.\n");
    let profile = prompt_profile()?;
    wizard.lock().await.submit_profile(profile)?;

    run_quiz(&wizard).await?;

    println!("\nanalyzing your answers...");
    let plan = loop {
        match run_generation(&wizard, &client, args.thinking).await {
            Ok(plan) => break plan,
            Err(WorkflowError::Generation(err)) => {
                eprintln!("{}", err.user_message());
                let answer = read_line("try again? [y/N]: ")?;
                if !answer.eq_ignore_ascii_case("y") {
                    return Ok(());
                }
            }
            Err(other) => return Err(other.into()),
        }
    };

    render_plan(&plan);

    if args.narrate && config.narration.enabled {
        let narrator = Narrator::new();
        let mut sink = WavFileSink::new(data_dir()?.join("narration.wav"));
        let mut fallback = ConsoleSpeech;
        match narrator
            .narrate(&client, &mut sink, &mut fallback, &plan, &user_name)
            .await
        {
            NarrationOutcome::Played => println!("\nnarration saved to {}", sink.path.display()),
            // The fallback already printed, and a dropped narration stays
            // silent by contract.
            NarrationOutcome::SpokeFallback
            | NarrationOutcome::Dropped
            | NarrationOutcome::AlreadyPending => {}
        }
    }
    Ok(())
}

fn prompt_profile() -> Result<Profile, Box<dyn std::error::Error>> {
    let grade = read_nonempty("your grade/class: ")?;
    let strengths = read_nonempty("subject you're best at: ")?;
    let weaknesses = read_nonempty("subject you want to improve: ")?;
    let challenges = read_nonempty("your biggest difficulty: ")?;
    let goals = read_nonempty("what do you want to achieve? ")?;
    let focus_hours = read_hours(
        "focus stamina in hours per day",
        Profile::FOCUS_HOURS_MIN,
        Profile::FOCUS_HOURS_MAX,
    )?;
    let sleep_hours = read_hours(
        "sleep in hours per night",
        Profile::SLEEP_HOURS_MIN,
        Profile::SLEEP_HOURS_MAX,
    )?;
    Ok(Profile::new(
        grade, strengths, weaknesses, challenges, goals, focus_hours, sleep_hours,
    ))
}

fn read_hours(label: &str, min: u8, max: u8) -> Result<u8, Box<dyn std::error::Error>> {
    loop {
        let line = read_line(&format!("{label} ({min}-{max}): "))?;
        match line.parse::<u8>() {
            Ok(hours) if (min..=max).contains(&hours) => return Ok(hours),
            _ => println!("please enter a number between {min} and {max}"),
        }
    }
}

async fn run_quiz(wizard: &Mutex<PlanWizard>) -> Result<(), Box<dyn std::error::Error>> {
    let questions = quiz::questions();
    let mut index = 0;
    loop {
        let question = &questions[index];
        println!("\nquestion {}/{}: {}", index + 1, questions.len(), question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
        let choice = loop {
            let line = read_line("your choice (1-4): ")?;
            match line.parse::<usize>() {
                Ok(n) if (1..=4).contains(&n) => break question.options[n - 1],
                _ => println!("please enter a number between 1 and 4"),
            }
        };
        match wizard.lock().await.answer(choice)? {
            AnswerOutcome::Advanced { next } => index = next,
            AnswerOutcome::ReadyToGenerate => return Ok(()),
        }
    }
}

fn render_plan(plan: &StudyPlan) {
    println!("\n\"{}\"\n", plan.motivational_quote);
    println!("summary: {}\n", plan.summary);
    for (i, node) in plan.roadmap.iter().enumerate() {
        println!("  {}. {}", i + 1, node.title);
        println!("     {}", node.content);
    }
    println!("\nadvice: {}", plan.advice);
}

/// Writes narration audio to a 16-bit PCM WAV file.
struct WavFileSink {
    path: PathBuf,
}

impl WavFileSink {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl AudioSink for WavFileSink {
    fn play(&mut self, samples: &[f32], sample_rate_hz: u32) -> Result<(), Box<dyn std::error::Error>> {
        let data_len = (samples.len() * 2) as u32;
        let byte_rate = sample_rate_hz * 2;
        let mut wav = Vec::with_capacity(44 + samples.len() * 2);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // mono
        wav.extend_from_slice(&sample_rate_hz.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes()); // block align
        wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        for sample in samples {
            let quantized = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
            wav.extend_from_slice(&quantized.to_le_bytes());
        }
        std::fs::write(&self.path, wav)?;
        Ok(())
    }
}

/// On-device "speech": prints the narration text.
struct ConsoleSpeech;

impl SpeechSynth for ConsoleSpeech {
    fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        println!("\n(narration) {text}");
        Ok(())
    }
}
