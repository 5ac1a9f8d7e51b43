//! Template-based feedback
//!
//! Picks a supportive message for the mood category, fills in a small
//! "micro-action" and sometimes ties it to a keyword the user mentioned.
//! All random choices come from the caller's `Rng`, so a seeded generator
//! reproduces the same message.

use crate::templates::TemplateEngine;
use crate::types::{FaceSignal, Feedback, FusionResult, MoodCategory, TextSignal};
use crate::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Message templates for low moods
pub const LOW_TEMPLATES: [&str; 2] = [
    "I'm sorry you're having a tough time. Small steps can help, try {{micro_action}}.",
    "That sounds rough. Consider taking a brief break and doing {{micro_action}} to reset a little.",
];

/// Message templates for medium moods
pub const MEDIUM_TEMPLATES: [&str; 2] = [
    "You're doing okay. Keep building momentum with {{micro_action}}.",
    "Nice awareness. Try {{micro_action}} today to stay consistent.",
];

/// Message templates for high moods
pub const HIGH_TEMPLATES: [&str; 2] = [
    "Great energy! Keep it up, maybe {{micro_action}} as a small challenge.",
    "You seem in a good mood. Consider {{micro_action}} to stretch your progress a little.",
];

/// Small, easy actions to suggest
pub const MICRO_ACTIONS: [&str; 5] = [
    "a 10-minute walk",
    "a short breathing exercise",
    "writing one thing you're grateful for",
    "a focused 20-minute session on a small task",
    "listening to a favorite song",
];

/// Chance of tying the micro-action to the user's first keyword
pub const KEYWORD_PROBABILITY: f64 = 0.4;

const GREETING_TEMPLATE: &str = "greeting";

/// Templates for a mood category
pub fn templates_for(category: MoodCategory) -> &'static [&'static str] {
    match category {
        MoodCategory::Low => &LOW_TEMPLATES,
        MoodCategory::Medium => &MEDIUM_TEMPLATES,
        MoodCategory::High => &HIGH_TEMPLATES,
    }
}

fn template_name(category: MoodCategory, index: usize) -> String {
    format!("{}_{}", category.as_str(), index)
}

/// Transparent, deterministic explanation of a mood score
pub fn rationale(fusion: &FusionResult, face: Option<&FaceSignal>) -> String {
    let percent = (fusion.mood_score * 100.0) as i64;
    let mut out = format!("({}% mood score based on your words", percent);
    if let Some(face) = face.filter(|f| f.is_detected()) {
        out.push_str(&format!(
            " and detected face emotion '{}'",
            face.dominant_emotion
        ));
    }
    out.push(')');
    out
}

/// Generates supportive messages from fusion results
pub struct FeedbackGenerator {
    engine: TemplateEngine,
}

impl FeedbackGenerator {
    /// Create a generator with all message templates registered
    pub fn new() -> Result<Self> {
        let mut engine = TemplateEngine::new();
        for category in [MoodCategory::Low, MoodCategory::Medium, MoodCategory::High] {
            for (index, template) in templates_for(category).iter().enumerate() {
                engine.register_template(&template_name(category, index), template)?;
            }
        }
        engine.register_template(GREETING_TEMPLATE, "Hey {{name}}! {{message}}")?;

        Ok(Self { engine })
    }

    /// Produce a message and rationale for one submission
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        fusion: &FusionResult,
        text: &TextSignal,
        face: Option<&FaceSignal>,
        name: Option<&str>,
    ) -> Result<Feedback> {
        let templates = templates_for(fusion.category);
        let index = rng.gen_range(0..templates.len());

        let mut micro = MICRO_ACTIONS
            .choose(rng)
            .copied()
            .unwrap_or(MICRO_ACTIONS[0])
            .to_string();

        if let Some(keyword) = text.first_keyword() {
            if rng.gen_bool(KEYWORD_PROBABILITY) {
                micro = format!("{} related to {}", micro, keyword);
            }
        }

        let mut data = HashMap::new();
        data.insert("micro_action".to_string(), serde_json::Value::String(micro));
        let mut message = self
            .engine
            .render_named(&template_name(fusion.category, index), &data)?;

        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            let mut data = HashMap::new();
            data.insert("name".to_string(), serde_json::Value::String(name.to_string()));
            data.insert("message".to_string(), serde_json::Value::String(message));
            message = self.engine.render_named(GREETING_TEMPLATE, &data)?;
        }

        tracing::debug!(
            category = %fusion.category,
            template = index,
            "Generated feedback"
        );

        Ok(Feedback {
            message,
            rationale: rationale(fusion, face),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fusion::fuse;
    use crate::types::{FusionWeights, SentimentLabel, TextFeatures};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn text_signal(keywords: &[&str]) -> TextSignal {
        TextSignal {
            label: SentimentLabel::Positive,
            confidence: 0.9,
            valence: 0.9,
            motivation_score: 0.5,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn fusion_for(valence: f64) -> FusionResult {
        fuse(&TextFeatures::new(valence, 0.0), None, FusionWeights::default())
    }

    fn matches_family(message: &str, category: MoodCategory) -> bool {
        templates_for(category).iter().any(|t| {
            let prefix = t.split("{{").next().unwrap_or_default();
            message.starts_with(prefix)
        })
    }

    #[test]
    fn test_message_uses_category_family() {
        let generator = FeedbackGenerator::new().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for valence in [0.0, 0.5, 1.0] {
            let fusion = fusion_for(valence);
            for _ in 0..20 {
                let fb = generator
                    .generate(&mut rng, &fusion, &text_signal(&[]), None, None)
                    .unwrap();
                assert!(matches_family(&fb.message, fusion.category), "{}", fb.message);
                assert!(MICRO_ACTIONS.iter().any(|m| fb.message.contains(m)));
                assert!(!fb.message.contains("{{"));
            }
        }
    }

    #[test]
    fn test_same_seed_same_feedback() {
        let generator = FeedbackGenerator::new().unwrap();
        let fusion = fusion_for(0.5);
        let text = text_signal(&["study"]);

        let a = generator
            .generate(&mut StdRng::seed_from_u64(42), &fusion, &text, None, None)
            .unwrap();
        let b = generator
            .generate(&mut StdRng::seed_from_u64(42), &fusion, &text, None, None)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_keyword_reference_is_occasional() {
        let generator = FeedbackGenerator::new().unwrap();
        let fusion = fusion_for(0.5);
        let text = text_signal(&["study", "plan"]);
        let mut rng = StdRng::seed_from_u64(1);

        let mut with_keyword = 0;
        for _ in 0..200 {
            let fb = generator
                .generate(&mut rng, &fusion, &text, None, None)
                .unwrap();
            if fb.message.contains("related to study") {
                with_keyword += 1;
            }
            assert!(!fb.message.contains("related to plan"));
        }
        assert!(with_keyword > 0 && with_keyword < 200);
    }

    #[test]
    fn test_no_keywords_no_reference() {
        let generator = FeedbackGenerator::new().unwrap();
        let fusion = fusion_for(0.9);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let fb = generator
                .generate(&mut rng, &fusion, &text_signal(&[]), None, None)
                .unwrap();
            assert!(!fb.message.contains("related to"));
        }
    }

    #[test]
    fn test_name_greeting() {
        let generator = FeedbackGenerator::new().unwrap();
        let fusion = fusion_for(0.9);
        let mut rng = StdRng::seed_from_u64(9);

        let fb = generator
            .generate(&mut rng, &fusion, &text_signal(&[]), None, Some("Sam"))
            .unwrap();
        assert!(fb.message.starts_with("Hey Sam! "));

        let fb = generator
            .generate(&mut rng, &fusion, &text_signal(&[]), None, Some("   "))
            .unwrap();
        assert!(!fb.message.starts_with("Hey"));
    }

    #[test]
    fn test_rationale() {
        let text = TextFeatures::new(0.8, 0.3);
        let face = FaceSignal::new("happy", 0.8);
        let fusion = fuse(&text, Some(&face), FusionWeights::default());

        assert_eq!(
            rationale(&fusion, Some(&face)),
            "(74% mood score based on your words and detected face emotion 'happy')"
        );
        assert_eq!(
            rationale(&fusion, Some(&FaceSignal::no_face())),
            "(74% mood score based on your words)"
        );
        assert_eq!(rationale(&fusion, None), "(74% mood score based on your words)");
    }
}
