use crate::domain::{Prescription, PrescriptionBatch};

pub const FALLBACK_NOTICE: &str = "Please try again with proper prescription content.";

/// The safe batch returned whenever the model output cannot be trusted.
pub fn default_response() -> PrescriptionBatch {
    PrescriptionBatch::new(vec![Prescription {
        description: Some(FALLBACK_NOTICE.to_string()),
        ..Prescription::default()
    }])
}
