//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_upstream;

use image::{ImageBuffer, ImageFormat, Rgb};
use scanreport::analysis::{GeminiClient, ModelSettings, TimeoutConfig};
use scanreport::config::{CredentialStatus, SecureString};
use std::io::Cursor;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

pub const BOUNDARY: &str = "scanreport-test-boundary";

/// Encode a small solid-color image.
pub fn image_bytes(format: ImageFormat) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(8, 6, Rgb([200u8, 200, 200]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("Failed to encode test image");
    out.into_inner()
}

pub fn png_bytes() -> Vec<u8> {
    image_bytes(ImageFormat::Png)
}

/// Build a `multipart/form-data` body with an optional image and notes field.
pub fn multipart_body(image: Option<(&str, Vec<u8>)>, notes: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(&bytes);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(notes) = notes {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"notes\"\r\n\r\n{notes}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Settings pointing at `base_url` with a test key.
pub fn test_settings(base_url: &str) -> ModelSettings {
    ModelSettings {
        base_url: base_url.to_string(),
        model: "test-model".to_string(),
        credential: CredentialStatus::Configured(SecureString::new("test-key".to_string())),
        temperature: None,
        max_output_tokens: None,
        timeouts: TimeoutConfig {
            request: Duration::from_secs(5),
            connect: Duration::from_secs(2),
        },
    }
}

pub fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::new(test_settings(base_url)).expect("Failed to build client")
}

/// Write `content` to a temporary config file.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Wait for a server to become available.
pub async fn wait_for_server(addr: SocketAddr, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
