use chrono::NaiveDate;
use mindstudy_core::ProgressLog;

use super::cards::split_command;
use super::read_line;

const HELP: &str = "\
commands:
  add <YYYY-MM-DD> <score> <subject>   record a result
  list                                 list results, newest first
  del <n>                              delete entry n from the last listing
  help                                 show this help
  quit                                 leave (entries are discarded)";

/// Interactive in-memory achievement log session.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut log = ProgressLog::new();
    let mut listing = Vec::new();
    println!("achievement log -- in-memory only\n{HELP}");

    loop {
        let line = read_line("progress> ")?;
        let (command, rest) = split_command(&line);
        match command {
            "" => {}
            "quit" | "exit" => return Ok(()),
            "help" => println!("{HELP}"),
            "add" => {
                let mut parts = rest.splitn(3, ' ');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(date), Some(score), Some(subject)) if !subject.trim().is_empty() => {
                        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                            Ok(date) => {
                                log.add(subject.trim(), date, score);
                                println!("recorded");
                            }
                            Err(_) => println!("date must be YYYY-MM-DD"),
                        }
                    }
                    _ => println!("usage: add <YYYY-MM-DD> <score> <subject>"),
                }
            }
            "list" => {
                let entries = log.recent();
                listing = entries.iter().map(|e| e.id).collect();
                if entries.is_empty() {
                    println!("no entries");
                }
                for (i, entry) in entries.iter().enumerate() {
                    println!("  {}. {} {} -- {}", i + 1, entry.date, entry.subject, entry.score);
                }
            }
            "del" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 && n <= listing.len() => {
                    if log.remove(listing[n - 1]) {
                        println!("deleted");
                    } else {
                        println!("already gone -- `list` again");
                    }
                }
                _ => println!("usage: del <n> (run `list` first)"),
            },
            other => println!("unknown command: {other} (try `help`)"),
        }
    }
}
