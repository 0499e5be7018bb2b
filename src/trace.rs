use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// UTC timestamp as `YYYYmmdd_HHMMSS_fff_fff`, e.g.
/// `.traces/20251005_140642_180_342_RESPONSE_STREAM.md`.
pub fn generate_timestamp_utc() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(now: DateTime<Utc>) -> String {
    let repr = now.format("%Y%m%d_%H%M%S_%6f").to_string();
    // 毫秒与微秒之间再加一个下划线
    let (millis, micros) = repr.split_at(repr.len() - 3);
    format!("{}_{}", millis, micros)
}

/// Markdown trace of raw chunks next to their normalized output.
pub struct TraceWriter {
    path: PathBuf,
    file: File,
    recorded: usize,
}

impl TraceWriter {
    pub async fn create(dir: impl AsRef<Path>, label: &str) -> io::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{}_{}.md", generate_timestamp_utc(), label));
        let mut file = File::create(&path).await?;
        file.write_all(format!("# {}\n\n", label).as_bytes()).await?;
        debug!("writing trace to {}", path.display());
        Ok(TraceWriter {
            path,
            file,
            recorded: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn record<T: Serialize>(&mut self, raw: &Value, normalized: &[T]) -> io::Result<()> {
        self.recorded += 1;
        let raw = serde_json::to_string_pretty(raw).map_err(io::Error::other)?;
        let normalized = serde_json::to_string_pretty(normalized).map_err(io::Error::other)?;
        let entry = format!(
            "## Chunk {}\n\n### Raw\n\n```json\n{}\n```\n\n### Normalized\n\n```json\n{}\n```\n\n",
            self.recorded, raw, normalized
        );
        self.file.write_all(entry.as_bytes()).await?;
        self.file.flush().await
    }
}
