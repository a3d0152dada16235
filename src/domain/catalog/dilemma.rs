//! Dilemma entity and its two options.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChoiceCode, DilemmaId, ValidationError};

/// One of exactly two resolutions a dilemma offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DilemmaOption {
    /// Stable two-valued code (A or B).
    code: ChoiceCode,

    /// Full display label.
    label: String,

    /// Short label used in compact summaries.
    short_text: String,

    /// Consequence description shown after choosing.
    description: String,
}

impl DilemmaOption {
    /// Creates a new option.
    pub fn new(
        code: ChoiceCode,
        label: impl Into<String>,
        short_text: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code,
            label: label.into(),
            short_text: short_text.into(),
            description: description.into(),
        }
    }

    /// Returns the option code.
    pub fn code(&self) -> ChoiceCode {
        self.code
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the short label.
    pub fn short_text(&self) -> &str {
        &self.short_text
    }

    /// Returns the consequence description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One decision point: a narrative setup with two mutually exclusive options.
///
/// # Invariants
///
/// - `options` holds exactly two entries
/// - the option codes are distinct, so both A and B are always present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dilemma {
    /// Unique, stable identifier (e.g. "copyright-claim").
    id: DilemmaId,

    /// Display title.
    title: String,

    /// Narrative context presented before the choice.
    context: String,

    /// The two options, in catalog order.
    options: Vec<DilemmaOption>,
}

impl Dilemma {
    /// Creates a new dilemma.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the options are not exactly {A, B}
    pub fn new(
        id: DilemmaId,
        title: impl Into<String>,
        context: impl Into<String>,
        options: Vec<DilemmaOption>,
    ) -> Result<Self, ValidationError> {
        let dilemma = Self {
            id,
            title: title.into(),
            context: context.into(),
            options,
        };
        dilemma.validate()?;
        Ok(dilemma)
    }

    /// Checks the two-option invariant. Called on construction and after
    /// deserializing catalog documents.
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.options.len() != 2 {
            return Err(ValidationError::invalid_format(
                "options",
                format!(
                    "dilemma '{}' must offer exactly 2 options, got {}",
                    self.id,
                    self.options.len()
                ),
            ));
        }
        if self.options[0].code() == self.options[1].code() {
            return Err(ValidationError::invalid_format(
                "options",
                format!("dilemma '{}' has duplicate option code", self.id),
            ));
        }
        Ok(())
    }

    /// Returns the dilemma identifier.
    pub fn id(&self) -> &DilemmaId {
        &self.id
    }

    /// Returns the display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the narrative context.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns both options in catalog order.
    pub fn options(&self) -> &[DilemmaOption] {
        &self.options
    }

    /// Returns the option carrying the given code, if offered.
    pub fn option(&self, code: ChoiceCode) -> Option<&DilemmaOption> {
        self.options.iter().find(|o| o.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(code: ChoiceCode) -> DilemmaOption {
        DilemmaOption::new(code, "Label", "Short", "Description")
    }

    fn test_id() -> DilemmaId {
        DilemmaId::new("test-dilemma").unwrap()
    }

    #[test]
    fn new_dilemma_with_both_codes_is_valid() {
        let dilemma = Dilemma::new(
            test_id(),
            "Title",
            "Context",
            vec![option(ChoiceCode::A), option(ChoiceCode::B)],
        );
        assert!(dilemma.is_ok());
    }

    #[test]
    fn new_dilemma_rejects_single_option() {
        let result = Dilemma::new(test_id(), "Title", "Context", vec![option(ChoiceCode::A)]);
        assert!(result.is_err());
    }

    #[test]
    fn new_dilemma_rejects_duplicate_codes() {
        let result = Dilemma::new(
            test_id(),
            "Title",
            "Context",
            vec![option(ChoiceCode::A), option(ChoiceCode::A)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_dilemma_rejects_three_options() {
        let result = Dilemma::new(
            test_id(),
            "Title",
            "Context",
            vec![
                option(ChoiceCode::A),
                option(ChoiceCode::B),
                option(ChoiceCode::A),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn option_lookup_finds_both_codes() {
        let dilemma = Dilemma::new(
            test_id(),
            "Title",
            "Context",
            vec![option(ChoiceCode::A), option(ChoiceCode::B)],
        )
        .unwrap();

        assert_eq!(dilemma.option(ChoiceCode::A).unwrap().code(), ChoiceCode::A);
        assert_eq!(dilemma.option(ChoiceCode::B).unwrap().code(), ChoiceCode::B);
    }

    #[test]
    fn deserializes_from_catalog_json() {
        let json = r#"{
            "id": "copyright-claim",
            "title": "The Copyright Claim Dilemma",
            "context": "A disputed corpus.",
            "options": [
                {"code": "A", "label": "Ship", "short_text": "Ship now", "description": "Keep the data."},
                {"code": "B", "label": "Pull", "short_text": "Retrain clean", "description": "Drop the data."}
            ]
        }"#;
        let dilemma: Dilemma = serde_json::from_str(json).unwrap();
        assert!(dilemma.validate().is_ok());
        assert_eq!(dilemma.id().as_str(), "copyright-claim");
        assert_eq!(dilemma.option(ChoiceCode::B).unwrap().label(), "Pull");
    }
}
