pub mod ask;
pub mod doctor;
pub mod facts;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tokio::io::AsyncWriteExt;

use lore::config::LoreConfig;

/// Download the configured GGUF model into the model cache directory.
pub async fn model_download(config: &LoreConfig) -> Result<()> {
    let model_path = config.resolved_model_path();
    if let Some(dir) = model_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create cache dir: {}", dir.display()))?;
    }

    if model_path.exists() {
        println!("Model already exists at {}", model_path.display());
        return Ok(());
    }

    println!("Downloading {}...", config.model.name);
    download_file(&config.model.url, &model_path).await?;
    println!("Model saved to {}", model_path.display());
    println!("Start your completion server with this model, e.g.:");
    println!("  llama-server -m {} --port 8080", model_path.display());
    Ok(())
}

/// Download a file from a URL with progress bar. Uses atomic write (tmp + rename).
async fn download_file(url: &str, dest: &Path) -> Result<()> {
    let mut response = reqwest::get(url)
        .await
        .with_context(|| format!("HTTP request failed for {url}"))?;

    anyhow::ensure!(
        response.status().is_success(),
        "download failed with HTTP {}",
        response.status()
    );

    let pb = match response.content_length() {
        Some(size) => {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  {bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")
                    .context("invalid progress template")?
                    .progress_chars("##-"),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };

    let tmp_path = dest.with_extension("tmp");
    let result = write_and_rename(&mut response, &tmp_path, dest, &pb).await;
    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(&tmp_path).await {
            tracing::warn!(path = %tmp_path.display(), error = %e, "failed to remove partial download");
        }
    }

    pb.finish_and_clear();
    result
}

/// Stream the body into `tmp_path`, then move it over `dest`.
async fn write_and_rename(
    response: &mut reqwest::Response,
    tmp_path: &Path,
    dest: &Path,
    pb: &ProgressBar,
) -> Result<()> {
    let mut file = tokio::fs::File::create(tmp_path)
        .await
        .with_context(|| format!("failed to create temp file: {}", tmp_path.display()))?;

    // Models are gigabytes; write chunk by chunk instead of buffering the body.
    while let Some(chunk) = response.chunk().await.context("error reading response")? {
        file.write_all(&chunk)
            .await
            .context("error writing to file")?;
        pb.inc(chunk.len() as u64);
    }

    file.flush().await?;
    drop(file);

    tokio::fs::rename(tmp_path, dest)
        .await
        .context("failed to rename temp file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};

    async fn serve_bytes() -> String {
        let app = Router::new().route("/model.gguf", get(|| async { "GGUF-bytes" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/model.gguf")
    }

    #[tokio::test]
    async fn download_writes_destination_and_no_temp_file() {
        let url = serve_bytes().await;
        let tmp = tempfile::TempDir::new().unwrap();
        let dest = tmp.path().join("model.gguf");

        download_file(&url, &dest).await.unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "GGUF-bytes");
        assert!(!dest.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn failed_download_removes_temp_file() {
        let url = serve_bytes().await;
        let tmp = tempfile::TempDir::new().unwrap();
        // A directory at the destination makes the final rename fail.
        let dest = tmp.path().join("model.gguf");
        std::fs::create_dir(&dest).unwrap();
        std::fs::write(dest.join("keep"), "x").unwrap();

        assert!(download_file(&url, &dest).await.is_err());
        assert!(!dest.with_extension("tmp").exists());
    }
}
