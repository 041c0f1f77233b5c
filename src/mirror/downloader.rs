use crate::config::MirrorConfig;
use crate::core::{MirrorError, MirrorResult};
use crate::di::traits::AssetTransfer;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{header, Client as HttpClient};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Streams release assets to disk with a progress bar per file
pub struct HttpDownloader {
    http_client: HttpClient,
    show_progress: bool,
}

impl HttpDownloader {
    /// Create a new downloader
    ///
    /// Only the connection is bounded by the configured timeout; a large
    /// asset may take as long as it needs once the transfer has started.
    pub fn new(config: &MirrorConfig) -> MirrorResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(concat!("ghmirror/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.request_timeout)
            .build()
            .map_err(|e| MirrorError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            show_progress: config.show_progress,
        })
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Download `url` to `destination` through a `.part` file
    ///
    /// The file appears under its final name only once every byte has been
    /// written; on failure the partial file is removed.
    pub async fn download(&self, url: &str, destination: &Path) -> MirrorResult<u64> {
        let partial = partial_path(destination);

        let result = match self.stream_to(url, destination, &partial).await {
            Ok(written) => tokio::fs::rename(&partial, destination)
                .await
                .map(|_| written)
                .map_err(MirrorError::from),
            Err(e) => Err(e),
        };

        if result.is_err() {
            discard_partial(&partial).await;
        }
        result
    }

    async fn stream_to(&self, url: &str, destination: &Path, partial: &Path) -> MirrorResult<u64> {
        let mut response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| MirrorError::Transfer(format!("Failed to download {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(MirrorError::Transfer(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let total = response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let label = destination
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| url.to_string());
        let pb = self.progress_bar(total, &label);

        let mut file = tokio::fs::File::create(partial).await?;
        let mut written: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| MirrorError::Transfer(format!("Download of {} interrupted: {}", url, e)))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            pb.set_position(written);
        }
        file.flush().await?;

        if let Some(expected) = total {
            if written != expected {
                pb.abandon();
                return Err(MirrorError::Transfer(format!(
                    "Download of {} ended after {} of {} bytes",
                    url, written, expected
                )));
            }
        }

        pb.finish_and_clear();
        Ok(written)
    }

    /// Bounded bar when the size is known, byte-counting spinner otherwise
    fn progress_bar(&self, total: Option<u64>, label: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::with_template(
                        "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::with_template("{msg} {spinner} {bytes} ({bytes_per_sec})")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb.enable_steady_tick(Duration::from_millis(120));
                pb
            }
        };
        pb.set_message(label.to_string());
        pb
    }
}

/// `<name>.part` next to the destination
fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

async fn discard_partial(partial: &Path) {
    if let Err(e) = tokio::fs::remove_file(partial).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove partial download {}: {}", partial.display(), e);
        }
    }
}

#[async_trait]
impl AssetTransfer for HttpDownloader {
    async fn download(&self, url: &str, destination: &Path) -> MirrorResult<u64> {
        Self::download(self, url, destination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn downloader() -> HttpDownloader {
        HttpDownloader::new(&MirrorConfig::with_base_folder("/tmp/unused"))
            .unwrap()
            .without_progress()
    }

    /// Serve one connection with a canned raw HTTP response, then hang up
    async fn serve_raw(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/asset.bin", addr)
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/a/b/tool.tar.gz")),
            PathBuf::from("/a/b/tool.tar.gz.part")
        );
    }

    #[tokio::test]
    async fn test_download_writes_file() {
        let mock_server = MockServer::start().await;
        let body = vec![7u8; 4096];

        Mock::given(method("GET"))
            .and(path("/assets/tool.bin"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("tool.bin");

        let written = downloader()
            .download(&format!("{}/assets/tool.bin", mock_server.uri()), &dest)
            .await
            .unwrap();

        assert_eq!(written, 4096);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
        assert!(!temp.path().join("tool.bin.part").exists());
    }

    #[tokio::test]
    async fn test_download_http_error_leaves_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/assets/gone.bin"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("gone.bin");

        let err = downloader()
            .download(&format!("{}/assets/gone.bin", mock_server.uri()), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, MirrorError::Transfer(_)));
        assert!(!dest.exists());
        assert!(!temp.path().join("gone.bin.part").exists());
    }

    #[tokio::test]
    async fn test_download_unreachable_host() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("x.bin");

        let result = downloader()
            .download("http://127.0.0.1:9/x.bin", &dest)
            .await;
        assert!(matches!(result, Err(MirrorError::Transfer(_))));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_download_without_content_length() {
        let url = serve_raw("HTTP/1.1 200 OK\r\nConnection: close\r\n\r\nhello-world").await;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("asset.bin");

        let written = downloader().download(&url, &dest).await.unwrap();

        assert_eq!(written, 11);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "hello-world");
        assert!(!temp.path().join("asset.bin.part").exists());
    }

    #[tokio::test]
    async fn test_truncated_body_removes_partial_file() {
        let url = serve_raw(
            "HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort",
        )
        .await;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("asset.bin");

        let err = downloader().download(&url, &dest).await.unwrap_err();

        assert!(matches!(err, MirrorError::Transfer(_)));
        assert!(!dest.exists());
        assert!(!temp.path().join("asset.bin.part").exists());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_partial_file() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/assets/blocked.bin"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".to_vec()))
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        // A non-empty directory occupies the destination name
        let dest = temp.path().join("blocked.bin");
        std::fs::create_dir_all(dest.join("inner")).unwrap();

        let err = downloader()
            .download(&format!("{}/assets/blocked.bin", mock_server.uri()), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, MirrorError::Io(_)));
        assert!(dest.is_dir());
        assert!(!temp.path().join("blocked.bin.part").exists());
    }
}
