use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use serde::de::DeserializeOwned;
use shared::{
    domain::{ArtifactName, DownloadFormat},
    error::ApiError,
    protocol::{
        form_fields, routes, DefaultConfigResponse, DownloadQuery, HealthResponse,
        SimplificationResponse, TextSimplificationRequest,
    },
};
use tracing::{debug, info};

pub mod artifact;
pub mod config;
pub mod draft;
pub mod error;
pub mod navigation;
pub mod readability;
pub mod submission;
pub mod validate;

pub use artifact::{ArtifactOrigin, ArtifactReference, Download};
pub use config::Settings;
pub use draft::{
    Draft, ExampleField, ExampleId, ExamplePair, InputMode, KeepKeywordRejection,
    ReplacePairInput, ReplacePairRejection, SourceFile,
};
pub use error::{TransportError, WorkflowError};
pub use navigation::{
    Completion, PendingSubmission, SubmissionTicket, WorkflowController, WorkflowViewState,
};
pub use readability::{GradeLevel, ReadabilityReport, Zone};
pub use submission::{DocumentUpload, SimplificationRequest, SimplificationResult};
pub use validate::{validate_for_submit, ValidationResult};

/// The external simplification service as the workflow sees it.
#[async_trait]
pub trait SimplificationService: Send + Sync {
    async fn health(&self) -> Result<HealthResponse, TransportError>;
    async fn fetch_default_config(&self) -> Result<DefaultConfigResponse, TransportError>;
    async fn simplify(
        &self,
        request: SimplificationRequest,
    ) -> Result<SimplificationResult, TransportError>;
    async fn download(
        &self,
        name: &ArtifactName,
        format: DownloadFormat,
    ) -> Result<Vec<u8>, TransportError>;
}

pub struct HttpSimplificationService {
    http: Client,
    service_url: String,
}

impl HttpSimplificationService {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            service_url: service_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.service_url.clone())
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.service_url)
    }

    async fn simplify_document(
        &self,
        upload: DocumentUpload,
    ) -> Result<SimplificationResponse, TransportError> {
        let file_name = upload.file.name.clone();
        let mut part = Part::bytes(upload.file.bytes).file_name(file_name.clone());
        if let Some(media_type) = &upload.file.media_type {
            part = part
                .mime_str(media_type)
                .map_err(|err| TransportError::Encode(err.to_string()))?;
        }

        let mut form = Form::new().part(form_fields::FILE, part);
        for (name, value) in upload.fields.to_form_parts()? {
            form = form.text(name, value);
        }

        debug!(file = %file_name, "uploading document for simplification");
        let res = self
            .http
            .post(self.url(routes::DOCUMENT_SIMPLIFICATION))
            .multipart(form)
            .send()
            .await?;
        read_json(res).await
    }

    async fn simplify_text(
        &self,
        request: TextSimplificationRequest,
    ) -> Result<SimplificationResponse, TransportError> {
        debug!(chars = request.text.len(), "sending text for simplification");
        let res = self
            .http
            .post(self.url(routes::TEXT_SIMPLIFICATION))
            .json(&request)
            .send()
            .await?;
        read_json(res).await
    }
}

#[async_trait]
impl SimplificationService for HttpSimplificationService {
    async fn health(&self) -> Result<HealthResponse, TransportError> {
        let res = self.http.get(self.url(routes::HEALTH)).send().await?;
        read_json(res).await
    }

    async fn fetch_default_config(&self) -> Result<DefaultConfigResponse, TransportError> {
        let res = self.http.get(self.url(routes::DEFAULT_CONFIG)).send().await?;
        read_json(res).await
    }

    async fn simplify(
        &self,
        request: SimplificationRequest,
    ) -> Result<SimplificationResult, TransportError> {
        let response = match request {
            SimplificationRequest::Document(upload) => self.simplify_document(upload).await?,
            SimplificationRequest::Text(text) => self.simplify_text(text).await?,
        };
        if let Some(message) = &response.message {
            info!(message = %message, "service accepted simplification");
        }
        Ok(response.into())
    }

    async fn download(
        &self,
        name: &ArtifactName,
        format: DownloadFormat,
    ) -> Result<Vec<u8>, TransportError> {
        let path = match format {
            DownloadFormat::Docx => routes::DOCUMENT_SIMPLIFICATION,
            DownloadFormat::Pdf => routes::PDF_DOWNLOAD,
        };
        let res = self
            .http
            .get(self.url(path))
            .query(&DownloadQuery {
                filename: name.as_str().to_string(),
            })
            .send()
            .await?;
        let res = ensure_success(res).await?;
        Ok(res.bytes().await?.to_vec())
    }
}

async fn ensure_success(res: Response) -> Result<Response, TransportError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(TransportError::Status(ApiError::from_response(
        status.as_u16(),
        &body,
    )))
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, TransportError> {
    let res = ensure_success(res).await?;
    Ok(res.json().await?)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
