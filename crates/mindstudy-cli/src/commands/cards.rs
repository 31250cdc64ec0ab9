use mindstudy_core::CardDeck;

use super::read_line;

const HELP: &str = "\
commands:
  add <front> | <back> [| <set>]   add a card
  list [set]                       list cards, optionally one set
  sets                             list set names
  del <n>                          delete card n from the last listing
  help                             show this help
  quit                             leave (cards are discarded)";

/// Interactive in-memory flashcard session. Nothing survives `quit`.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut deck = CardDeck::new();
    let mut listing = Vec::new();
    println!("flashcard session -- in-memory only\n{HELP}");

    loop {
        let line = read_line("cards> ")?;
        let (command, rest) = split_command(&line);
        match command {
            "" => {}
            "quit" | "exit" => return Ok(()),
            "help" => println!("{HELP}"),
            "add" => {
                let mut parts = rest.splitn(3, '|').map(str::trim);
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(front), Some(back), set) if !front.is_empty() && !back.is_empty() => {
                        let card = deck.add(front, back, set.filter(|s| !s.is_empty()));
                        println!("added to set '{}'", card.set_name);
                    }
                    _ => println!("usage: add <front> | <back> [| <set>]"),
                }
            }
            "list" => {
                let set = (!rest.is_empty()).then_some(rest);
                let cards = deck.filtered(set);
                listing = cards.iter().map(|c| c.id).collect();
                if cards.is_empty() {
                    println!("no cards");
                }
                for (i, card) in cards.iter().enumerate() {
                    println!("  {}. [{}] {} -> {}", i + 1, card.set_name, card.front, card.back);
                }
            }
            "sets" => {
                let names = deck.set_names();
                if names.is_empty() {
                    println!("no sets yet");
                } else {
                    println!("{}", names.join(", "));
                }
            }
            "del" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 && n <= listing.len() => {
                    if deck.remove(listing[n - 1]) {
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

pub fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}
