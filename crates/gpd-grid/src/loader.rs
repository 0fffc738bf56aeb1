//! Binary array loading from files or HTTP.
//!
//! Each resource is a raw run of little-endian IEEE-754 doubles with no
//! header. A resource is read exactly once; there is no retry and no cache.

use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use gpd_common::{GpdError, GpdResult, SampleArray};

use crate::config::is_http;

/// Byte width of one sample.
const SAMPLE_WIDTH: usize = std::mem::size_of::<f64>();

/// Upper bound on the buffer reserved from a `Content-Length` header. Larger
/// bodies still load; the buffer grows as chunks arrive.
const MAX_PREALLOC: usize = 64 * 1024 * 1024;

/// Where a single array is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArraySource {
    File(PathBuf),
    Http(String),
}

impl ArraySource {
    /// Interpret a locator string as a URL or a filesystem path.
    pub fn parse(locator: &str) -> Self {
        if is_http(locator) {
            ArraySource::Http(locator.to_string())
        } else {
            ArraySource::File(PathBuf::from(locator))
        }
    }
}

impl fmt::Display for ArraySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArraySource::File(path) => write!(f, "{}", path.display()),
            ArraySource::Http(url) => write!(f, "{}", url),
        }
    }
}

/// Reinterpret a byte buffer as little-endian `f64` samples.
pub fn decode_f64_le(source_name: &str, bytes: &[u8]) -> GpdResult<Vec<f64>> {
    if bytes.len() % SAMPLE_WIDTH != 0 {
        return Err(GpdError::MisalignedBuffer {
            source_name: source_name.to_string(),
            len: bytes.len(),
        });
    }

    let mut samples = Vec::with_capacity(bytes.len() / SAMPLE_WIDTH);
    for chunk in bytes.chunks_exact(SAMPLE_WIDTH) {
        let mut raw = [0u8; SAMPLE_WIDTH];
        raw.copy_from_slice(chunk);
        samples.push(f64::from_le_bytes(raw));
    }
    Ok(samples)
}

/// Loads sample arrays from local files or over HTTP.
#[derive(Debug, Clone)]
pub struct ArrayLoader {
    client: Client,
}

impl ArrayLoader {
    /// Create a loader with a default HTTP client.
    pub fn new() -> GpdResult<Self> {
        let client = Client::builder()
            .tcp_nodelay(true)
            .build()
            .map_err(|e| GpdError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Load one array.
    #[instrument(skip(self), fields(source = %source))]
    pub async fn load(&self, source: &ArraySource) -> GpdResult<SampleArray> {
        debug!("Loading sample array");

        let name = source.to_string();
        let bytes = match self.fetch_bytes(source).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Sample array load failed");
                return Err(e);
            }
        };

        metrics::counter!("gpd_array_bytes_loaded_total").increment(bytes.len() as u64);

        let samples = decode_f64_le(&name, &bytes)?;
        info!(samples = samples.len(), "Loaded sample array");

        Ok(SampleArray::new(name, samples))
    }

    async fn fetch_bytes(&self, source: &ArraySource) -> GpdResult<Vec<u8>> {
        match source {
            ArraySource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| GpdError::load(source.to_string(), e)),
            ArraySource::Http(url) => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| GpdError::load(url, e))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(GpdError::load(url, format!("HTTP {}", status)));
                }

                let reserve = response
                    .content_length()
                    .map_or(0, |len| usize::try_from(len).unwrap_or(usize::MAX))
                    .min(MAX_PREALLOC);
                let mut body = Vec::with_capacity(reserve);
                let mut stream = response.bytes_stream();
                while let Some(chunk) = stream.next().await {
                    let chunk: Bytes = chunk.map_err(|e| GpdError::load(url, e))?;
                    body.extend_from_slice(&chunk);
                }
                Ok(body)
            }
        }
    }
}
