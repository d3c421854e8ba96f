use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle state of a server-side job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Generating,
    Failed,
    Succeeded,
}

impl JobStatus {
    /// True once the job can no longer change state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Succeeded)
    }
}

/// Handle returned when a generation job is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub job: String,
    pub status: JobStatus,
}

/// A job as reported by `/job/{id}`.
///
/// `image_url` is only populated once the job has succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub job: String,
    pub status: JobStatus,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Parameters echoed back by the server, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl From<Job> for JobResult {
    fn from(job: Job) -> Self {
        Self {
            job: job.job,
            status: job.status,
            image_url: None,
            params: None,
        }
    }
}

/// Standard and XL model families, each with a parallel endpoint set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Sd,
    Sdxl,
}

impl ModelFamily {
    /// Path prefix for this family's endpoints.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Sd => "/sd",
            Self::Sdxl => "/sdxl",
        }
    }

    pub(crate) fn path(self, resource: &str) -> String {
        format!("{}/{}", self.prefix(), resource)
    }
}

/// One HTTP call to the API, built per request.
#[derive(Debug, Clone)]
pub struct Request {
    pub endpoint: String,
    pub method: Method,
    pub body: Option<Value>,
}

impl Request {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::GET,
            body: None,
        }
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::POST,
            body: Some(body),
        }
    }
}
