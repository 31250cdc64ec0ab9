//! The fixed eight-question study-habits quiz.
//!
//! Question order never changes and every question offers four options.
//! Answers are the selected option *strings*, not indices; downstream
//! consumers match by value.

/// A quiz question with its four fixed options.
#[derive(Debug, Clone, Copy)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub options: [&'static str; 4],
}

/// Number of questions in the quiz.
pub const QUESTION_COUNT: usize = 8;

static QUESTIONS: [QuizQuestion; QUESTION_COUNT] = [
    QuizQuestion {
        prompt: "Which subject leaves you feeling most energized?",
        options: [
            "Math and natural sciences",
            "Literature and languages",
            "Arts and physical education",
            "History and geography",
        ],
    },
    QuizQuestion {
        prompt: "What is the biggest challenge you face when studying on your own?",
        options: [
            "Trouble staying focused",
            "No reliable materials",
            "Grade pressure",
            "Not knowing where to start",
        ],
    },
    QuizQuestion {
        prompt: "What does your ideal study environment look like?",
        options: [
            "A cafe with soft music",
            "A perfectly quiet library",
            "My own desk at home",
            "A study group with friends",
        ],
    },
    QuizQuestion {
        prompt: "When do you feel most alert and absorb material best?",
        options: [
            "Early in the morning",
            "In the afternoon after a nap",
            "Late at night",
            "Whenever inspiration strikes",
        ],
    },
    QuizQuestion {
        prompt: "How do you usually take notes?",
        options: [
            "Longhand in a notebook",
            "Mind maps and diagrams",
            "Typed notes in an app",
            "Listening and memorizing key words",
        ],
    },
    QuizQuestion {
        prompt: "What result are you aiming for?",
        options: [
            "Top of the class",
            "Steady improvement",
            "Passing a major exam",
            "Deep understanding",
        ],
    },
    QuizQuestion {
        prompt: "What distracts you most easily?",
        options: [
            "Phone and social media",
            "Surrounding noise",
            "Wandering thoughts",
            "Tiredness and drowsiness",
        ],
    },
    QuizQuestion {
        prompt: "What role should your study companion play?",
        options: [
            "A strict tutor",
            "A supportive friend",
            "A data-driven strategist",
            "A source of inspiration",
        ],
    },
];

pub fn questions() -> &'static [QuizQuestion; QUESTION_COUNT] {
    &QUESTIONS
}

/// Fields the generation prompt derives from fixed answer positions:
/// the self-study challenge (question 2) and note-taking style (question 5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizInsights {
    pub focus_challenge: String,
    pub note_style: String,
}

/// Extract the derived fields from a complete answer sheet.
/// Returns `None` unless all eight answers are present.
pub fn insights(answers: &[String]) -> Option<QuizInsights> {
    if answers.len() != QUESTION_COUNT {
        return None;
    }
    Some(QuizInsights {
        focus_challenge: answers[1].clone(),
        note_style: answers[4].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_questions_four_options_each() {
        assert_eq!(questions().len(), QUESTION_COUNT);
        for question in questions() {
            assert!(!question.prompt.is_empty());
            assert_eq!(question.options.len(), 4);
        }
    }

    #[test]
    fn insights_use_fixed_positions() {
        let answers: Vec<String> = (1..=8).map(|i| format!("answer {i}")).collect();
        let insights = insights(&answers).unwrap();
        assert_eq!(insights.focus_challenge, "answer 2");
        assert_eq!(insights.note_style, "answer 5");
    }

    #[test]
    fn insights_require_a_complete_sheet() {
        let answers: Vec<String> = vec!["a".into(); 7];
        assert!(insights(&answers).is_none());
    }
}
