use serde::{Deserialize, Serialize};

/// A named study/break duration bundle, selectable as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub study_minutes: u64,
    pub break_minutes: u64,
}

impl Preset {
    pub fn new(name: &str, study_minutes: u64, break_minutes: u64) -> Self {
        Self {
            name: name.to_string(),
            study_minutes,
            break_minutes,
        }
    }

    /// An unnamed configuration entered by hand.
    pub fn custom(study_minutes: u64, break_minutes: u64) -> Self {
        Self::new("Custom", study_minutes, break_minutes)
    }

    /// The built-in presets, in menu order.
    pub fn builtin() -> Vec<Preset> {
        vec![
            Preset::new("Pomodoro", 25, 5),
            Preset::new("Deep Work", 45, 10),
            Preset::new("Sprint", 15, 3),
            Preset::new("Flow", 90, 15),
        ]
    }

    /// Look up a built-in preset by name. Matching ignores case and treats
    /// hyphens as spaces, so `deep-work` finds "Deep Work".
    pub fn find(name: &str) -> Option<Preset> {
        let wanted = name.trim().to_lowercase().replace('-', " ");
        Preset::builtin()
            .into_iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_presets() {
        let presets = Preset::builtin();
        assert_eq!(presets.len(), 4);
        assert_eq!(presets[0], Preset::new("Pomodoro", 25, 5));
        assert_eq!(presets[3], Preset::new("Flow", 90, 15));
    }

    #[test]
    fn find_is_case_and_hyphen_insensitive() {
        assert_eq!(Preset::find("pomodoro").unwrap().study_minutes, 25);
        assert_eq!(Preset::find("deep-work").unwrap().break_minutes, 10);
        assert_eq!(Preset::find("Deep Work").unwrap().study_minutes, 45);
        assert!(Preset::find("marathon").is_none());
    }
}
