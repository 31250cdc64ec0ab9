use chrono::NaiveTime;
use mindstudy_core::ReminderBoard;

use super::cards::split_command;
use super::read_line;

const HELP: &str = "\
commands:
  add <HH:MM> <task>   add a daily reminder
  list                 list reminders
  toggle <n>           pause/resume reminder n
  del <n>              delete reminder n
  help                 show this help
  quit                 leave (reminders are discarded)";

/// Interactive in-memory reminder session. Display-only: nothing fires.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut board = ReminderBoard::new();
    println!("reminder session -- in-memory only\n{HELP}");

    loop {
        let line = read_line("remind> ")?;
        let (command, rest) = split_command(&line);
        match command {
            "" => {}
            "quit" | "exit" => return Ok(()),
            "help" => println!("{HELP}"),
            "add" => match rest.split_once(' ') {
                Some((time, task)) if !task.trim().is_empty() => {
                    match NaiveTime::parse_from_str(time, "%H:%M") {
                        Ok(time) => {
                            board.add(task.trim(), time);
                            println!("added");
                        }
                        Err(_) => println!("time must be HH:MM, e.g. 19:30"),
                    }
                }
                _ => println!("usage: add <HH:MM> <task>"),
            },
            "list" => {
                if board.is_empty() {
                    println!("no reminders");
                }
                for (i, reminder) in board.iter().enumerate() {
                    let state = if reminder.active { "on " } else { "off" };
                    println!(
                        "  {}. [{state}] {} daily at {}",
                        i + 1,
                        reminder.task,
                        reminder.time.format("%H:%M")
                    );
                }
            }
            "toggle" => match nth_id(&board, rest) {
                Some(id) => match board.toggle(id) {
                    Some(true) => println!("resumed"),
                    Some(false) => println!("paused"),
                    None => println!("not found"),
                },
                None => println!("usage: toggle <n>"),
            },
            "del" => match nth_id(&board, rest) {
                Some(id) => {
                    board.remove(id);
                    println!("deleted");
                }
                None => println!("usage: del <n>"),
            },
            other => println!("unknown command: {other} (try `help`)"),
        }
    }
}

fn nth_id(board: &ReminderBoard, raw: &str) -> Option<uuid::Uuid> {
    let n = raw.parse::<usize>().ok()?;
    board.iter().nth(n.checked_sub(1)?).map(|r| r.id)
}
