//! Built-in break-time activities.

use serde::Serialize;

/// A leisure activity suggested for breaks.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RelaxActivity {
    pub title: &'static str,
    pub description: &'static str,
}

pub const RELAX_ACTIVITIES: [RelaxActivity; 6] = [
    RelaxActivity {
        title: "Basketball",
        description: "Builds height, stamina and team coordination.",
    },
    RelaxActivity {
        title: "Swimming",
        description: "Relieves stress and is great for lungs and heart.",
    },
    RelaxActivity {
        title: "Listening to music",
        description: "Relaxes the brain and boosts calming alpha waves.",
    },
    RelaxActivity {
        title: "Singing",
        description: "Releases endorphins, builds confidence and breath control.",
    },
    RelaxActivity {
        title: "Dancing",
        description: "Burns calories, lifts mood and improves flexibility.",
    },
    RelaxActivity {
        title: "Playing an instrument",
        description: "Strengthens focus and creative thinking.",
    },
];

/// Canned advice used when the suggestion service returns nothing.
pub const DEFAULT_RELAX_ADVICE: &str =
    "Take a moment to breathe deeply and give your eyes a rest.";
