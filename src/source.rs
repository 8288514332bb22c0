//! Loading the raw export text from a URL or a local file.

use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to fetch remote export ({url}): {error}")]
    FetchRemote { error: reqwest::Error, url: url::Url },
    #[error("remote export responded with {status} ({url})")]
    Status {
        status: reqwest::StatusCode,
        url: url::Url,
    },
    #[error("failed to read local export ({path}): {error}")]
    ReadLocal { error: std::io::Error, path: String },
    #[error("export is not valid UTF-8 ({origin})")]
    InvalidUtf8 { origin: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Remote(url::Url),
    Local(String),
}

impl Origin {
    pub fn parse(src: &str) -> Self {
        match url::Url::parse(src) {
            Ok(url) if matches!(url.scheme(), "https" | "http") => Origin::Remote(url),
            _ => Origin::Local(src.to_owned()),
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Remote(url) => write!(f, "{url}"),
            Origin::Local(path) => f.write_str(path),
        }
    }
}

async fn load_remote(url: &url::Url) -> Result<Vec<u8>, Error> {
    let fetch_error = |error| Error::FetchRemote {
        error,
        url: url.clone(),
    };
    let response = reqwest::get(url.clone()).await.map_err(fetch_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            status,
            url: url.clone(),
        });
    }
    let body = response.bytes().await.map_err(fetch_error)?;
    Ok(body.to_vec())
}

/// Load the whole export into memory.
pub async fn load(src: &str) -> Result<String, Error> {
    let origin = Origin::parse(src);
    let body = match &origin {
        Origin::Remote(url) => load_remote(url).await?,
        Origin::Local(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|error| Error::ReadLocal {
                    error,
                    path: path.clone(),
                })?
        }
    };
    debug!(%origin, bytes = body.len(), "loaded export");
    String::from_utf8(body).map_err(|_| Error::InvalidUtf8 {
        origin: origin.to_string(),
    })
}
