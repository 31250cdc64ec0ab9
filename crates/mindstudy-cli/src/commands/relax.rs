use clap::Args;
use mindstudy_core::{Config, GeminiClient, RELAX_ACTIVITIES};

#[derive(Args)]
pub struct RelaxArgs {
    /// What is stressing you out; asks the assistant for tailored advice
    #[arg(long)]
    pub stressed_by: Option<String>,
}

pub async fn run(args: RelaxArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("break-time ideas:");
    for activity in RELAX_ACTIVITIES {
        println!("  {:<24} {}", activity.title, activity.description);
    }

    if let Some(stress_source) = args.stressed_by {
        let config = Config::load_or_default();
        let client = GeminiClient::from_env(&config.ai)?;
        match client.relax_suggestion(&stress_source).await {
            Ok(advice) => println!("\n{advice}"),
            Err(err) => eprintln!("\n{}", err.user_message()),
        }
    }
    Ok(())
}
