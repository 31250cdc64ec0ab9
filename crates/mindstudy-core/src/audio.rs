//! Narration audio: PCM decoding and playback orchestration.
//!
//! The audio service returns base64-encoded 16-bit little-endian mono PCM
//! at a fixed 24 kHz. Playback and on-device text-to-speech are injected
//! capabilities so the fallback chain can run without an audio stack.

use std::sync::atomic::{AtomicBool, Ordering};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::ai::{AiError, SpeechGenerator};
use crate::plan::StudyPlan;

/// Sample rate of every narration payload.
pub const SAMPLE_RATE_HZ: u32 = 24_000;

/// Decode a base64 payload of 16-bit little-endian mono PCM into f32
/// samples in [-1, 1).
pub fn decode_pcm(payload: &str) -> Result<Vec<f32>, AiError> {
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| AiError::InvalidResponse(format!("bad audio payload: {e}")))?;
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect())
}

/// Plays decoded narration audio.
pub trait AudioSink {
    fn play(&mut self, samples: &[f32], sample_rate_hz: u32) -> Result<(), Box<dyn std::error::Error>>;
}

/// On-device text-to-speech, used when audio synthesis fails.
pub trait SpeechSynth {
    fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>>;
}

/// How a narration request concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationOutcome {
    /// Synthesized audio was decoded and handed to the sink.
    Played,
    /// Synthesis or playback failed; the summary was spoken on-device.
    SpokeFallback,
    /// Both paths failed; the failure was absorbed.
    Dropped,
    /// A narration request was already pending; this one was ignored.
    AlreadyPending,
}

/// Narration orchestrator with the single-in-flight audio guard.
///
/// Requests issued while one is pending are ignored, not queued. Failures
/// never propagate: the fallback chain ends in silence.
#[derive(Debug, Default)]
pub struct Narrator {
    in_flight: AtomicBool,
}

struct ReleaseOnDrop<'a>(&'a AtomicBool);

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Narrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The script read over a finished plan: greeting, summary, advice and
    /// the motivational quote.
    pub fn script(plan: &StudyPlan, user_name: &str) -> String {
        format!(
            "Hello {user_name}. Your study plan is ready. {summary} {advice} \
             Finally, keep this quote in mind: {quote}. Good luck with your studies!",
            summary = plan.summary,
            advice = plan.advice,
            quote = plan.motivational_quote,
        )
    }

    /// Request, decode and play a narration of the plan.
    pub async fn narrate<S>(
        &self,
        speech: &S,
        sink: &mut dyn AudioSink,
        fallback: &mut dyn SpeechSynth,
        plan: &StudyPlan,
        user_name: &str,
    ) -> NarrationOutcome
    where
        S: SpeechGenerator + ?Sized,
    {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return NarrationOutcome::AlreadyPending;
        }
        let _guard = ReleaseOnDrop(&self.in_flight);

        match Self::request(speech, sink, plan, user_name).await {
            Ok(()) => NarrationOutcome::Played,
            Err(_) => match fallback.speak(&plan.summary) {
                Ok(()) => NarrationOutcome::SpokeFallback,
                Err(_) => NarrationOutcome::Dropped,
            },
        }
    }

    async fn request<S>(
        speech: &S,
        sink: &mut dyn AudioSink,
        plan: &StudyPlan,
        user_name: &str,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        S: SpeechGenerator + ?Sized,
    {
        let payload = speech.synthesize(&Self::script(plan, user_name)).await?;
        let samples = decode_pcm(&payload)?;
        sink.play(&samples, SAMPLE_RATE_HZ)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;

    use super::*;
    use crate::plan::RoadmapNode;

    fn plan() -> StudyPlan {
        StudyPlan {
            roadmap: vec![
                RoadmapNode { title: "1".into(), content: "a".into() };
                4
            ],
            summary: "Focus on fundamentals.".into(),
            advice: "Short sessions.".into(),
            motivational_quote: "Keep going.".into(),
        }
    }

    struct StubSpeech {
        calls: AtomicUsize,
        payload: Result<String, ()>,
    }

    #[async_trait]
    impl SpeechGenerator for StubSpeech {
        async fn synthesize(&self, _text: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            match &self.payload {
                Ok(payload) => Ok(payload.clone()),
                Err(()) => Err(AiError::EmptyAudio),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        samples: Vec<f32>,
        rate: u32,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, samples: &[f32], rate: u32) -> Result<(), Box<dyn std::error::Error>> {
            self.samples = samples.to_vec();
            self.rate = rate;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSpeech {
        spoken: Vec<String>,
        fail: bool,
    }

    impl SpeechSynth for RecordingSpeech {
        fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail {
                return Err("speech unavailable".into());
            }
            self.spoken.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn decodes_little_endian_samples() {
        // i16 values: 0, 16384, -16384, -32768
        let bytes: &[u8] = &[0x00, 0x00, 0x00, 0x40, 0x00, 0xC0, 0x00, 0x80];
        let payload = BASE64.encode(bytes);
        let samples = decode_pcm(&payload).unwrap();
        assert_eq!(samples, vec![0.0, 0.5, -0.5, -1.0]);
    }

    #[test]
    fn rejects_bad_base64() {
        assert!(decode_pcm("not base64 !!!").is_err());
    }

    #[test]
    fn script_contains_all_three_parts() {
        let script = Narrator::script(&plan(), "Linh");
        assert!(script.contains("Hello Linh"));
        assert!(script.contains("Focus on fundamentals."));
        assert!(script.contains("Short sessions."));
        assert!(script.contains("Keep going."));
    }

    #[tokio::test]
    async fn narrate_plays_decoded_audio() {
        let speech = StubSpeech {
            calls: AtomicUsize::new(0),
            payload: Ok(BASE64.encode([0x00u8, 0x40])),
        };
        let narrator = Narrator::new();
        let mut sink = RecordingSink::default();
        let mut fallback = RecordingSpeech::default();

        let outcome = narrator
            .narrate(&speech, &mut sink, &mut fallback, &plan(), "Linh")
            .await;
        assert_eq!(outcome, NarrationOutcome::Played);
        assert_eq!(sink.samples, vec![0.5]);
        assert_eq!(sink.rate, SAMPLE_RATE_HZ);
        assert!(fallback.spoken.is_empty());
    }

    #[tokio::test]
    async fn synthesis_failure_falls_back_to_local_speech() {
        let speech = StubSpeech {
            calls: AtomicUsize::new(0),
            payload: Err(()),
        };
        let narrator = Narrator::new();
        let mut sink = RecordingSink::default();
        let mut fallback = RecordingSpeech::default();

        let outcome = narrator
            .narrate(&speech, &mut sink, &mut fallback, &plan(), "Linh")
            .await;
        assert_eq!(outcome, NarrationOutcome::SpokeFallback);
        // Fallback speaks the summary only.
        assert_eq!(fallback.spoken, vec!["Focus on fundamentals.".to_string()]);
    }

    #[tokio::test]
    async fn double_failure_is_silently_absorbed() {
        let speech = StubSpeech {
            calls: AtomicUsize::new(0),
            payload: Err(()),
        };
        let narrator = Narrator::new();
        let mut sink = RecordingSink::default();
        let mut fallback = RecordingSpeech {
            fail: true,
            ..Default::default()
        };

        let outcome = narrator
            .narrate(&speech, &mut sink, &mut fallback, &plan(), "Linh")
            .await;
        assert_eq!(outcome, NarrationOutcome::Dropped);
    }

    #[tokio::test]
    async fn concurrent_request_is_ignored_while_pending() {
        let speech = StubSpeech {
            calls: AtomicUsize::new(0),
            payload: Ok(BASE64.encode([0x00u8, 0x40])),
        };
        let narrator = Narrator::new();
        let mut sink_a = RecordingSink::default();
        let mut sink_b = RecordingSink::default();
        let mut fallback_a = RecordingSpeech::default();
        let mut fallback_b = RecordingSpeech::default();

        let plan = plan();
        let (first, second) = tokio::join!(
            narrator.narrate(&speech, &mut sink_a, &mut fallback_a, &plan, "Linh"),
            narrator.narrate(&speech, &mut sink_b, &mut fallback_b, &plan, "Linh"),
        );
        assert_eq!(first, NarrationOutcome::Played);
        assert_eq!(second, NarrationOutcome::AlreadyPending);
        assert_eq!(speech.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn guard_released_after_completion() {
        let speech = StubSpeech {
            calls: AtomicUsize::new(0),
            payload: Ok(BASE64.encode([0x00u8, 0x40])),
        };
        let narrator = Narrator::new();
        let mut sink = RecordingSink::default();
        let mut fallback = RecordingSpeech::default();

        let first = narrator
            .narrate(&speech, &mut sink, &mut fallback, &plan(), "Linh")
            .await;
        let second = narrator
            .narrate(&speech, &mut sink, &mut fallback, &plan(), "Linh")
            .await;
        assert_eq!(first, NarrationOutcome::Played);
        assert_eq!(second, NarrationOutcome::Played);
        assert_eq!(speech.calls.load(Ordering::SeqCst), 2);
    }
}
