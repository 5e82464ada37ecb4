use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{ArtifactName, ReplacePair, SamplePair};

pub mod routes {
    pub const HEALTH: &str = "/health";
    pub const DEFAULT_CONFIG: &str = "/default-config";
    pub const DOCUMENT_SIMPLIFICATION: &str = "/docs/simplification";
    pub const TEXT_SIMPLIFICATION: &str = "/text/simplification";
    pub const PDF_DOWNLOAD: &str = "/get-pdf";
}

/// Multipart field names of a document simplification upload.
pub mod form_fields {
    pub const FILE: &str = "file";
    pub const BASE_PROMPT: &str = "base_prompt";
    pub const KEYWORDS_TO_KEEP: &str = "keywords_to_keep";
    pub const KEYWORDS_TO_REPLACE: &str = "keywords_to_replace";
    pub const SAMPLES: &str = "samples";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: u16,
    pub health: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultConfigResponse {
    pub base_prompt: String,
    #[serde(default)]
    pub keywords_to_keep: Vec<String>,
    #[serde(default)]
    pub keywords_to_replace: Vec<ReplacePair>,
    #[serde(default)]
    pub samples: Vec<SamplePair>,
}

/// The prompt configuration shared by both submission variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptFields {
    pub base_prompt: String,
    pub keywords_to_keep: Vec<String>,
    pub keywords_to_replace: Vec<ReplacePair>,
    pub samples: Vec<SamplePair>,
}

impl PromptFields {
    /// Text parts of the multipart upload. The three collections are carried
    /// as compact JSON strings.
    pub fn to_form_parts(&self) -> serde_json::Result<Vec<(&'static str, String)>> {
        Ok(vec![
            (form_fields::BASE_PROMPT, self.base_prompt.clone()),
            (
                form_fields::KEYWORDS_TO_KEEP,
                serde_json::to_string(&self.keywords_to_keep)?,
            ),
            (
                form_fields::KEYWORDS_TO_REPLACE,
                serde_json::to_string(&self.keywords_to_replace)?,
            ),
            (form_fields::SAMPLES, serde_json::to_string(&self.samples)?),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSimplificationRequest {
    pub text: String,
    #[serde(flatten)]
    pub fields: PromptFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplificationResponse {
    #[serde(default)]
    pub simplified_text: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub readability_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<ArtifactName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The service may send `null` for a score it could not compute.
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadQuery {
    pub filename: String,
}
