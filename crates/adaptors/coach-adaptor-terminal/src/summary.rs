//! Submission summary

use crate::percent;
use coach_core::{FaceOutcome, StorageOutcome, SubmissionReport};
use std::fmt::Write;

/// Render the outcome of one journal submission
pub fn render_summary(report: &SubmissionReport) -> String {
    let mut out = String::new();
    let text = &report.text_signal;

    let keywords = if text.keywords.is_empty() {
        "-".to_string()
    } else {
        text.keywords.join(", ")
    };

    let _ = writeln!(out, "Summary");
    let _ = writeln!(
        out,
        "  Mood score:        {:.1}% - {}",
        report.fusion.percent(),
        report.fusion.category.as_str().to_uppercase()
    );
    let _ = writeln!(
        out,
        "  Text sentiment:    {} ({})",
        text.label,
        percent(text.confidence)
    );
    let _ = writeln!(out, "  Detected keywords: {}", keywords);

    if let Some(face) = report.face_signal.as_ref().filter(|f| f.is_detected()) {
        let _ = writeln!(
            out,
            "  Face emotion:      {} ({})",
            face.dominant_emotion,
            percent(face.confidence)
        );
    }

    match &report.face_outcome {
        FaceOutcome::Failed { reason } => {
            let _ = writeln!(out, "  Face analysis failed: {}", reason);
        }
        FaceOutcome::Unavailable => {
            let _ = writeln!(out, "  Face analysis is not enabled; the image was ignored.");
        }
        FaceOutcome::NotProvided | FaceOutcome::Analyzed => {}
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", report.feedback.message);
    let _ = writeln!(out, "  {}", report.feedback.rationale);

    if let StorageOutcome::Failed { reason } = &report.storage {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Entry could not be saved: {}", reason);
    }

    out
}
