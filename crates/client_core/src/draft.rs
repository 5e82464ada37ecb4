//! Draft store: the in-progress simplification request as an immutable
//! snapshot. Every user action is a method that returns the next snapshot.

use std::path::Path;

use shared::{
    domain::{ReplacePair, SamplePair, DOCX_MEDIA_TYPE},
    protocol::{DefaultConfigResponse, PromptFields},
};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::validate::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Document,
    PastedText,
}

/// Opaque identifier of an example pair. Combines a clock reading with a
/// random component so back-to-back calls never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExampleId(String);

impl ExampleId {
    pub fn generate() -> Self {
        let micros = chrono::Utc::now().timestamp_micros();
        Self(format!("{micros:x}-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleField {
    Original,
    Simplified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamplePair {
    pub id: ExampleId,
    pub original: String,
    pub simplified: String,
    pub original_error: bool,
    pub simplified_error: bool,
}

impl ExamplePair {
    fn new(id: ExampleId, original: impl Into<String>, simplified: impl Into<String>) -> Self {
        Self {
            id,
            original: original.into(),
            simplified: simplified.into(),
            original_error: false,
            simplified_error: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.original.is_empty() && !self.simplified.is_empty()
    }

    pub fn to_sample(&self) -> SamplePair {
        SamplePair {
            original: self.original.clone(),
            simplified: self.simplified.clone(),
        }
    }
}

/// A document chosen for upload, with the media type it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, media_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type,
            bytes,
        }
    }

    /// Reads a file from disk; the media type is guessed from its extension.
    pub async fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let media_type = mime_guess::from_path(path)
            .first_raw()
            .map(str::to_string);
        Ok(Self::new(name, media_type, bytes))
    }

    pub fn is_docx(&self) -> bool {
        self.media_type.as_deref() == Some(DOCX_MEDIA_TYPE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeepKeywordRejection {
    #[error("Keyword cannot be empty.")]
    Empty,
    #[error("Keyword has already been entered.")]
    Duplicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceField {
    Original,
    Replacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReplacePairRejection {
    #[error("Keyword has already been entered.")]
    DuplicateOriginal,
    #[error("Keyword to replace cannot be empty.")]
    EmptyOriginal,
    #[error("Replacement keyword cannot be empty.")]
    EmptyReplacement,
}

impl ReplacePairRejection {
    /// The input field the rejection is reported against.
    pub fn field(self) -> ReplaceField {
        match self {
            Self::DuplicateOriginal | Self::EmptyOriginal => ReplaceField::Original,
            Self::EmptyReplacement => ReplaceField::Replacement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    mode: InputMode,
    prompt: String,
    keep_keywords: Vec<String>,
    replace_pairs: Vec<ReplacePair>,
    example_pairs: Vec<ExamplePair>,
    source_file: Option<SourceFile>,
    pasted_text: String,
}

impl Draft {
    /// Initial draft populated from the service's default configuration.
    pub fn from_defaults(config: &DefaultConfigResponse) -> Self {
        let mut draft = Draft {
            prompt: config.base_prompt.clone(),
            ..Draft::default()
        };

        for keyword in &config.keywords_to_keep {
            let keyword = keyword.trim();
            if !keyword.is_empty() && !draft.has_keep_keyword(keyword) {
                draft.keep_keywords.push(keyword.to_string());
            }
        }
        for pair in &config.keywords_to_replace {
            let original = pair.original.trim();
            let replacement = pair.replacement.trim();
            if !original.is_empty()
                && !replacement.is_empty()
                && !draft.has_replace_original(original)
            {
                draft.replace_pairs.push(ReplacePair::new(original, replacement));
            }
        }
        draft.example_pairs = config
            .samples
            .iter()
            .map(|s| ExamplePair::new(ExampleId::generate(), &s.original, &s.simplified))
            .collect();
        draft
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn keep_keywords(&self) -> &[String] {
        &self.keep_keywords
    }

    pub fn replace_pairs(&self) -> &[ReplacePair] {
        &self.replace_pairs
    }

    pub fn example_pairs(&self) -> &[ExamplePair] {
        &self.example_pairs
    }

    pub fn example_pair(&self, id: &ExampleId) -> Option<&ExamplePair> {
        self.example_pairs.iter().find(|p| &p.id == id)
    }

    pub fn source_file(&self) -> Option<&SourceFile> {
        self.source_file.as_ref()
    }

    pub fn pasted_text(&self) -> &str {
        &self.pasted_text
    }

    fn has_keep_keyword(&self, keyword: &str) -> bool {
        self.keep_keywords.iter().any(|k| k == keyword)
    }

    fn has_replace_original(&self, original: &str) -> bool {
        self.replace_pairs.iter().any(|p| p.original == original)
    }

    pub fn set_mode(&self, mode: InputMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..self.clone()
        }
    }

    pub fn set_pasted_text(&self, text: impl Into<String>) -> Self {
        Self {
            pasted_text: text.into(),
            ..self.clone()
        }
    }

    pub fn select_source_file(&self, file: SourceFile) -> Self {
        Self {
            source_file: Some(file),
            ..self.clone()
        }
    }

    pub fn clear_source_file(&self) -> Self {
        Self {
            source_file: None,
            ..self.clone()
        }
    }

    pub fn add_keep_keyword(&self, text: &str) -> Result<Self, KeepKeywordRejection> {
        let keyword = text.trim();
        if keyword.is_empty() {
            return Err(KeepKeywordRejection::Empty);
        }
        if self.has_keep_keyword(keyword) {
            debug!(keyword, "keep keyword already present");
            return Err(KeepKeywordRejection::Duplicate);
        }
        let mut next = self.clone();
        next.keep_keywords.push(keyword.to_string());
        Ok(next)
    }

    pub fn remove_keep_keyword(&self, text: &str) -> Self {
        let mut next = self.clone();
        next.keep_keywords.retain(|k| k != text);
        next
    }

    /// Checks run in a fixed order: duplicate original, empty original,
    /// empty replacement. The stored pair is trimmed.
    pub fn add_replace_pair(
        &self,
        original: &str,
        replacement: &str,
    ) -> Result<Self, ReplacePairRejection> {
        let original = original.trim();
        let replacement = replacement.trim();
        if self.has_replace_original(original) {
            debug!(original, "replace keyword already present");
            return Err(ReplacePairRejection::DuplicateOriginal);
        }
        if original.is_empty() {
            return Err(ReplacePairRejection::EmptyOriginal);
        }
        if replacement.is_empty() {
            return Err(ReplacePairRejection::EmptyReplacement);
        }
        let mut next = self.clone();
        next.replace_pairs.push(ReplacePair::new(original, replacement));
        Ok(next)
    }

    pub fn remove_replace_pair(&self, pair: &ReplacePair) -> Self {
        let mut next = self.clone();
        next.replace_pairs.retain(|p| p != pair);
        next
    }

    pub fn add_example_pair(&self) -> Self {
        self.add_example_pair_with_id(ExampleId::generate())
    }

    pub fn add_example_pair_with_id(&self, id: ExampleId) -> Self {
        let mut next = self.clone();
        next.example_pairs.push(ExamplePair::new(id, "", ""));
        next
    }

    pub fn update_example_pair(&self, id: &ExampleId, field: ExampleField, value: &str) -> Self {
        let mut next = self.clone();
        if let Some(pair) = next.example_pairs.iter_mut().find(|p| &p.id == id) {
            let missing = value.is_empty();
            match field {
                ExampleField::Original => {
                    pair.original = value.to_string();
                    pair.original_error = missing;
                }
                ExampleField::Simplified => {
                    pair.simplified = value.to_string();
                    pair.simplified_error = missing;
                }
            }
        }
        next
    }

    /// The last remaining pair cannot be removed; the draft is returned as-is.
    pub fn remove_example_pair(&self, id: &ExampleId) -> Self {
        if self.example_pairs.len() <= 1 {
            debug!(id = id.as_str(), "refusing to remove the last example pair");
            return self.clone();
        }
        let mut next = self.clone();
        next.example_pairs.retain(|p| &p.id != id);
        next
    }

    /// Copies the per-pair validation flags onto the example pairs so the
    /// inline markers show up after a blocked submit.
    pub fn mark_validation(&self, result: &ValidationResult) -> Self {
        let mut next = self.clone();
        for pair in &mut next.example_pairs {
            if let Some(flags) = result.example(&pair.id) {
                pair.original_error = flags.original_missing;
                pair.simplified_error = flags.simplified_missing;
            }
        }
        next
    }

    pub fn prompt_fields(&self) -> PromptFields {
        PromptFields {
            base_prompt: self.prompt.clone(),
            keywords_to_keep: self.keep_keywords.clone(),
            keywords_to_replace: self.replace_pairs.clone(),
            samples: self.example_pairs.iter().map(ExamplePair::to_sample).collect(),
        }
    }
}

/// Input buffers of the "replace keyword" editor together with their
/// per-field error flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacePairInput {
    pub original: String,
    pub replacement: String,
    pub original_error: bool,
    pub replacement_error: bool,
}

impl ReplacePairInput {
    pub fn set_original(&mut self, text: impl Into<String>) {
        self.original = text.into();
        if !self.original.trim().is_empty() {
            self.original_error = false;
        }
    }

    pub fn set_replacement(&mut self, text: impl Into<String>) {
        self.replacement = text.into();
        if !self.replacement.trim().is_empty() {
            self.replacement_error = false;
        }
    }

    /// Adds the buffered pair to `draft`. Buffers are cleared only on success.
    pub fn commit(&mut self, draft: &Draft) -> Result<Draft, ReplacePairRejection> {
        match draft.add_replace_pair(&self.original, &self.replacement) {
            Ok(next) => {
                *self = Self::default();
                Ok(next)
            }
            Err(rejection) => {
                match rejection {
                    ReplacePairRejection::DuplicateOriginal
                    | ReplacePairRejection::EmptyOriginal => self.original_error = true,
                    ReplacePairRejection::EmptyReplacement => {
                        self.original_error = false;
                        self.replacement_error = true;
                    }
                }
                Err(rejection)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/draft_tests.rs"]
mod tests;
