//! Daily study reminders.
//!
//! The board is display-only: nothing here schedules or fires anything.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a reminder repeats. Only daily recurrence exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    Daily,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub task: String,
    pub time: NaiveTime,
    pub recurrence: Recurrence,
    pub active: bool,
}

/// Session-owned reminder list.
#[derive(Debug, Default)]
pub struct ReminderBoard {
    reminders: Vec<Reminder>,
}

impl ReminderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reminder; it starts active.
    pub fn add(&mut self, task: impl Into<String>, time: NaiveTime) -> &Reminder {
        self.reminders.push(Reminder {
            id: Uuid::new_v4(),
            task: task.into(),
            time,
            recurrence: Recurrence::Daily,
            active: true,
        });
        self.reminders
            .last()
            .unwrap_or_else(|| unreachable!("just pushed"))
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);
        self.reminders.len() != before
    }

    /// Flip a reminder's active flag. Returns the new value.
    pub fn toggle(&mut self, id: Uuid) -> Option<bool> {
        let reminder = self.reminders.iter_mut().find(|r| r.id == id)?;
        reminder.active = !reminder.active;
        Some(reminder.active)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.iter()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn added_reminders_are_active_and_daily() {
        let mut board = ReminderBoard::new();
        let reminder = board.add("review physics", at(19, 30));
        assert!(reminder.active);
        assert_eq!(reminder.recurrence, Recurrence::Daily);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn remove_and_toggle_by_id() {
        let mut board = ReminderBoard::new();
        let id = board.add("vocab", at(7, 0)).id;
        board.add("essay", at(20, 0));

        assert_eq!(board.toggle(id), Some(false));
        assert_eq!(board.toggle(id), Some(true));

        assert!(board.remove(id));
        assert!(!board.remove(id));
        assert_eq!(board.len(), 1);
    }
}
