use clap::Args;
use mindstudy_core::{ChatSession, Config, GeminiClient, Role};

use super::read_line;

#[derive(Args)]
pub struct ChatArgs {
    /// The message; omit to start an interactive session
    pub message: Vec<String>,
    /// Ground the answer in web search
    #[arg(long)]
    pub search: bool,
}

pub async fn run(args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let client = GeminiClient::from_env(&config.ai)?;
    let mut session = ChatSession::new();

    if args.message.is_empty() {
        interactive(&mut session, &client, args.search).await
    } else {
        let message = args.message.join(" ");
        session.send(&client, &message, args.search).await;
        print_last(&session);
        Ok(())
    }
}

async fn interactive(
    session: &mut ChatSession,
    client: &GeminiClient,
    use_search: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    print_last(session); // greeting
    loop {
        let line = read_line("> ")?;
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            return Ok(());
        }
        session.send(client, &line, use_search).await;
        print_last(session);
    }
}

fn print_last(session: &ChatSession) {
    let Some(message) = session.last() else {
        return;
    };
    if message.role != Role::Assistant {
        return;
    }
    println!("{}", message.text);
    if !message.sources.is_empty() {
        println!("sources:");
        for (i, source) in message.sources.iter().enumerate() {
            let title = source.title.as_deref().unwrap_or("(untitled)");
            let uri = source.uri.as_deref().unwrap_or("");
            println!("  {}. {title} {uri}", i + 1);
        }
    }
}
