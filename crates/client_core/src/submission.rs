use shared::{
    domain::ArtifactName,
    protocol::{PromptFields, SimplificationResponse, TextSimplificationRequest},
};

use crate::{
    draft::{Draft, InputMode, SourceFile},
    error::WorkflowError,
    readability::ReadabilityReport,
    validate::validate_for_submit,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpload {
    pub file: SourceFile,
    pub fields: PromptFields,
}

/// Wire-level projection of a draft snapshot, one shape per input mode.
#[derive(Debug, Clone, PartialEq)]
pub enum SimplificationRequest {
    Document(DocumentUpload),
    Text(TextSimplificationRequest),
}

impl SimplificationRequest {
    /// Builds the request for the draft's active mode. In document mode the
    /// file's declared media type is checked before anything else is built.
    pub fn from_draft(draft: &Draft) -> Result<Self, WorkflowError> {
        match draft.mode() {
            InputMode::Document => {
                let file = draft
                    .source_file()
                    .ok_or_else(|| WorkflowError::Validation(validate_for_submit(draft)))?;
                if !file.is_docx() {
                    return Err(WorkflowError::UnsupportedFileType {
                        media_type: file.media_type.clone(),
                    });
                }
                Ok(Self::Document(DocumentUpload {
                    file: file.clone(),
                    fields: draft.prompt_fields(),
                }))
            }
            InputMode::PastedText => Ok(Self::Text(TextSimplificationRequest {
                text: draft.pasted_text().to_string(),
                fields: draft.prompt_fields(),
            })),
        }
    }

    pub fn mode(&self) -> InputMode {
        match self {
            Self::Document(_) => InputMode::Document,
            Self::Text(_) => InputMode::PastedText,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimplificationResult {
    pub simplified_text: String,
    pub readability_score: f64,
    pub artifact_name: Option<ArtifactName>,
}

impl SimplificationResult {
    pub fn report(&self) -> ReadabilityReport {
        ReadabilityReport::from_score(self.readability_score)
    }
}

impl From<SimplificationResponse> for SimplificationResult {
    fn from(value: SimplificationResponse) -> Self {
        Self {
            simplified_text: value.simplified_text,
            readability_score: value.readability_score,
            artifact_name: value.filename,
        }
    }
}
