//! Multimodal mood fusion
//!
//! Blends a text signal and an optional face signal into one mood score:
//! - text component = 0.8 * valence + 0.2 * motivation
//! - face component = emotion base score pulled towards neutral by low confidence
//! - unreliable faces (confidence < 0.1) get the (0.9, 0.1) weighting
//!
//! `fuse` is pure: the same inputs always produce the same result.

use crate::types::{
    clamp_unit, FaceEmotion, FaceSignal, FusionComponents, FusionResult, FusionWeights,
    MoodCategory, TextFeatures,
};

/// Neutral score used for absent or unknown faces
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Face confidence below which the face barely counts
pub const MIN_FACE_CONFIDENCE: f64 = 0.1;

const VALENCE_WEIGHT: f64 = 0.8;
const MOTIVATION_WEIGHT: f64 = 0.2;

/// Base mood score of a facial emotion
pub fn emotion_base_score(emotion: &FaceEmotion) -> f64 {
    match emotion {
        FaceEmotion::Happy => 0.9,
        FaceEmotion::Neutral => 0.5,
        FaceEmotion::Surprise => 0.6,
        FaceEmotion::Sad => 0.2,
        FaceEmotion::Fear => 0.15,
        FaceEmotion::Angry | FaceEmotion::Disgust => 0.1,
        FaceEmotion::Other(_) | FaceEmotion::NoFace => NEUTRAL_SCORE,
    }
}

/// Text half of the blend
pub fn text_component(features: &TextFeatures) -> f64 {
    let valence = clamp_unit(features.valence, NEUTRAL_SCORE);
    let motivation = clamp_unit(features.motivation_score, 0.0);
    clamp_unit(VALENCE_WEIGHT * valence + MOTIVATION_WEIGHT * motivation, NEUTRAL_SCORE)
}

/// Face half of the blend, as (component, confidence)
pub fn face_component(face: Option<&FaceSignal>) -> (f64, f64) {
    match face {
        Some(face) if face.is_detected() => {
            let confidence = clamp_unit(face.confidence, 0.0);
            let base = emotion_base_score(&face.dominant_emotion);
            let component = base * confidence + NEUTRAL_SCORE * (1.0 - confidence);
            (clamp_unit(component, NEUTRAL_SCORE), confidence)
        }
        _ => (NEUTRAL_SCORE, 0.0),
    }
}

/// Weights to apply given the face confidence
pub fn effective_weights(requested: FusionWeights, face_confidence: f64) -> FusionWeights {
    if face_confidence < MIN_FACE_CONFIDENCE {
        FusionWeights::UNRELIABLE_FACE
    } else {
        requested
    }
}

/// Fuse text features and an optional face signal into a mood result
pub fn fuse(
    text: &TextFeatures,
    face: Option<&FaceSignal>,
    weights: FusionWeights,
) -> FusionResult {
    let text_comp = text_component(text);
    let (face_comp, face_confidence) = face_component(face);
    let weights = effective_weights(weights, face_confidence);

    let mood_score = clamp_unit(
        weights.text * text_comp + weights.face * face_comp,
        NEUTRAL_SCORE,
    );

    FusionResult {
        mood_score,
        category: MoodCategory::from_score(mood_score),
        components: FusionComponents {
            text_component: text_comp,
            face_component: face_comp,
            face_confidence,
            valence: clamp_unit(text.valence, NEUTRAL_SCORE),
            motivation_score: clamp_unit(text.motivation_score, 0.0),
        },
        weights,
    }
}
