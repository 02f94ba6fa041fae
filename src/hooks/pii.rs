//! Screening of clinical case presentations for identifying details
//!
//! This is a substring heuristic, not a PII detector. It catches label-style
//! fields ("nome:", "phone:") and anything with an `@`. Bare numbers, names
//! without a label and similar slip through, and unrelated `@` signs are
//! rejected. The indicator list is part of the API contract; keep it as is.

use crate::core::{ApiError, Collection, HookContext, Record, RecordHook, ValidationError};
use async_trait::async_trait;

pub const PRESENTATION_FIELD: &str = "presentation";

/// Lowercase indicators, checked in order
pub const PII_INDICATORS: [&str; 10] = [
    "cpf:",
    "rg:",
    "nome:",
    "endereço:",
    "telefone:",
    "name:",
    "address:",
    "phone:",
    "email:",
    "@",
];

/// Return the first indicator found in `text`, ignoring case
pub fn find_indicator(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    PII_INDICATORS
        .into_iter()
        .find(|indicator| text.contains(indicator))
}

/// Before-create hook on `clinical_cases`
pub struct PiiScreen;

#[async_trait]
impl RecordHook for PiiScreen {
    fn name(&self) -> &str {
        "pii_screen"
    }

    fn collection(&self) -> Option<Collection> {
        Some(Collection::ClinicalCases)
    }

    async fn before_create(&self, _ctx: &HookContext, record: &mut Record) -> Result<(), ApiError> {
        let presentation = record.get_string(PRESENTATION_FIELD);
        if let Some(indicator) = find_indicator(&presentation) {
            tracing::warn!(
                collection = %record.collection,
                indicator,
                "rejected clinical case with potential PII"
            );
            return Err(ValidationError::PiiDetected.into());
        }
        Ok(())
    }
}
