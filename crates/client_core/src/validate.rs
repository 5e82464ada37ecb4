use crate::draft::{Draft, ExampleId, InputMode};

pub const PROMPT_REQUIRED: &str = "Field is required.";
pub const FILE_NOT_SELECTED: &str = "A file has not been selected.";
pub const TEXT_NOT_ENTERED: &str = "No document text has been entered.";
pub const EXAMPLE_INCOMPLETE: &str = "Both sides of every example are required.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleValidity {
    pub id: ExampleId,
    pub original_missing: bool,
    pub simplified_missing: bool,
}

impl ExampleValidity {
    pub fn is_incomplete(&self) -> bool {
        self.original_missing || self.simplified_missing
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub mode: InputMode,
    pub prompt_missing: bool,
    pub source_missing: bool,
    pub examples: Vec<ExampleValidity>,
}

impl ValidationResult {
    pub fn can_submit(&self) -> bool {
        !self.prompt_missing && !self.source_missing && !self.any_example_incomplete()
    }

    pub fn any_example_incomplete(&self) -> bool {
        self.examples.iter().any(ExampleValidity::is_incomplete)
    }

    pub fn example(&self, id: &ExampleId) -> Option<&ExampleValidity> {
        self.examples.iter().find(|e| &e.id == id)
    }

    /// Inline texts for every failing field, in display order.
    pub fn messages(&self) -> Vec<&'static str> {
        let mut messages = Vec::new();
        if self.source_missing {
            messages.push(match self.mode {
                InputMode::Document => FILE_NOT_SELECTED,
                InputMode::PastedText => TEXT_NOT_ENTERED,
            });
        }
        if self.prompt_missing {
            messages.push(PROMPT_REQUIRED);
        }
        if self.any_example_incomplete() {
            messages.push(EXAMPLE_INCOMPLETE);
        }
        messages
    }
}

/// Evaluates every check independently so all failing fields are reported
/// in one pass.
pub fn validate_for_submit(draft: &Draft) -> ValidationResult {
    let source_missing = match draft.mode() {
        InputMode::Document => draft.source_file().is_none(),
        InputMode::PastedText => draft.pasted_text().is_empty(),
    };
    let examples = draft
        .example_pairs()
        .iter()
        .map(|pair| ExampleValidity {
            id: pair.id.clone(),
            original_missing: pair.original.is_empty(),
            simplified_missing: pair.simplified.is_empty(),
        })
        .collect();

    ValidationResult {
        mode: draft.mode(),
        prompt_missing: draft.prompt().is_empty(),
        source_missing,
        examples,
    }
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
