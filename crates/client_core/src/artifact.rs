//! Reference to the document the service produced, and its retrieval.

use std::path::{Path, PathBuf};

use shared::domain::{ArtifactName, DownloadFormat};
use tracing::info;

use crate::{
    error::{TransportError, WorkflowError},
    SimplificationService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOrigin {
    /// Name of the locally chosen file, recorded before any submission.
    Speculative,
    /// Name returned by the service for a finished document submission.
    ServerConfirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReference {
    pub name: ArtifactName,
    pub origin: ArtifactOrigin,
}

impl ArtifactReference {
    pub fn speculative(name: impl Into<String>) -> Self {
        Self {
            name: ArtifactName::new(name),
            origin: ArtifactOrigin::Speculative,
        }
    }

    pub fn confirmed(name: ArtifactName) -> Self {
        Self {
            name,
            origin: ArtifactOrigin::ServerConfirmed,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.origin == ArtifactOrigin::ServerConfirmed
    }

    /// Only a server-confirmed name can be used to fetch the document.
    pub fn download_name(&self) -> Result<&ArtifactName, WorkflowError> {
        if self.is_confirmed() {
            Ok(&self.name)
        } else {
            Err(WorkflowError::ArtifactUnavailable)
        }
    }

    /// Local file name for a download in `format`.
    pub fn file_name(&self, format: DownloadFormat) -> ArtifactName {
        match format {
            DownloadFormat::Docx => self.name.clone(),
            DownloadFormat::Pdf => self.name.pdf_counterpart(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: ArtifactName,
    pub format: DownloadFormat,
    pub bytes: Vec<u8>,
}

pub async fn fetch<S>(
    service: &S,
    reference: &ArtifactReference,
    format: DownloadFormat,
) -> Result<Download, WorkflowError>
where
    S: SimplificationService + ?Sized,
{
    let name = reference.download_name()?;
    let bytes = service.download(name, format).await?;
    info!(artifact = %name, ?format, size = bytes.len(), "downloaded artifact");
    Ok(Download {
        file_name: reference.file_name(format),
        format,
        bytes,
    })
}

/// Writes a download into `dir`, keeping only the final path component of
/// the server-provided name.
pub async fn save(download: &Download, dir: &Path) -> Result<PathBuf, TransportError> {
    let file_name = Path::new(download.file_name.as_str())
        .file_name()
        .ok_or_else(|| TransportError::Io(format!("invalid file name {}", download.file_name)))?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, &download.bytes).await?;
    Ok(path)
}
