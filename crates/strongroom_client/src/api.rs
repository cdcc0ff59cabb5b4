use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use serde::Deserialize;
use url::Url;

use crate::types::{ApiError, BucketHealth, FailureKind, FileEntry, StorageCopy, VerifyEntry};

/// The deployed service this client talks to when no config overrides it.
pub const DEFAULT_BASE_URL: &str = "https://filesystembk-1.onrender.com";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Cap on a streamed download body.
    pub max_download_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_download_bytes: 512 * 1024 * 1024,
        }
    }
}

/// Seam over the storage service; the engine and tests both talk through it.
#[async_trait::async_trait]
pub trait StorageApi: Send + Sync {
    /// Root probe; any 2xx counts as healthy.
    async fn probe(&self) -> Result<(), ApiError>;
    /// Full current file set, ordered as the backend returns it.
    async fn list(&self) -> Result<Vec<FileEntry>, ApiError>;
    /// Multipart upload of one file under the single field `file`.
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError>;
    /// Raw body of one file from one copy, streamed under a size cap.
    async fn download(&self, id: &str, copy: StorageCopy) -> Result<Bytes, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
    async fn bucket_health(&self) -> Result<BucketHealth, ApiError>;
    async fn verify_all(&self) -> Result<Vec<VerifyEntry>, ApiError>;
    /// Test-only backend hook: corrupts the primary copy of a file.
    async fn corrupt_primary(&self, id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestStorageApi {
    base: Url,
    client: reqwest::Client,
    max_download_bytes: u64,
}

/// JSON `{error}` body the service sends on refusals.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct BucketStatus {
    status: String,
}

#[derive(Debug, Deserialize)]
struct BucketPair {
    primary: BucketStatus,
    backup: BucketStatus,
}

#[derive(Debug, Deserialize)]
struct BucketHealthBody {
    buckets: BucketPair,
}

#[derive(Debug, Deserialize)]
struct VerifyEntryBody {
    filename: String,
    primary: String,
    backup: String,
}

const STATUS_ACCESSIBLE: &str = "accessible";
const STATUS_OK: &str = "ok";

impl ReqwestStorageApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            base,
            client,
            max_download_bytes: settings.max_download_bytes,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn copy_path(id: &str, copy: StorageCopy) -> String {
        match copy {
            StorageCopy::Primary => format!("files/{id}"),
            StorageCopy::Backup => format!("files-backup/{id}"),
        }
    }
}

#[async_trait::async_trait]
impl StorageApi for ReqwestStorageApi {
    async fn probe(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.base.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<FileEntry>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("list")?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response
            .json::<Vec<FileEntry>>()
            .await
            .map_err(map_reqwest_error)
    }

    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|err| ApiError::new(FailureKind::Io, err.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload")?)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).await?;
        Ok(())
    }

    async fn download(&self, id: &str, copy: StorageCopy) -> Result<Bytes, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&Self::copy_path(id, copy))?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_download_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_download_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut collected = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = collected.len() as u64 + chunk.len() as u64;
            if next_len > self.max_download_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_download_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            collected.extend_from_slice(&chunk);
        }

        Ok(Bytes::from(collected))
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("files/{id}"))?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).await?;
        Ok(())
    }

    async fn bucket_health(&self) -> Result<BucketHealth, ApiError> {
        let response = self
            .client
            .get(self.endpoint("health/buckets")?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        let body = response
            .json::<BucketHealthBody>()
            .await
            .map_err(map_reqwest_error)?;
        Ok(BucketHealth {
            primary_ok: body.buckets.primary.status == STATUS_ACCESSIBLE,
            backup_ok: body.buckets.backup.status == STATUS_ACCESSIBLE,
        })
    }

    async fn verify_all(&self) -> Result<Vec<VerifyEntry>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("verify/both")?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        let body = response
            .json::<Vec<VerifyEntryBody>>()
            .await
            .map_err(map_reqwest_error)?;
        Ok(body
            .into_iter()
            .map(|entry| VerifyEntry {
                filename: entry.filename,
                primary_ok: entry.primary == STATUS_OK,
                backup_ok: entry.backup == STATUS_OK,
            })
            .collect())
    }

    async fn corrupt_primary(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint(&format!("debug/corrupt/{id}"))?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).await?;
        Ok(())
    }
}

/// Passes 2xx responses through; anything else becomes a rejection (when the
/// body carries the service's JSON `{error}`) or a bare status failure.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => Err(ApiError::new(FailureKind::Rejected, parsed.error)),
        Err(_) => Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        )),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
