//! Durable append-only record sinks
//!
//! Records are analytics artifacts, not transactional state: writes are
//! at-least-once, duplicates are deduplicated downstream if needed, and a
//! lost record is logged rather than escalated. Each append emits one framed
//! newline-terminated JSON record in a single write, so concurrent writers
//! from different sessions cannot corrupt adjacent records.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::PersistenceError;

/// Append-only persisted record stream
#[async_trait]
pub trait DurableSink: Send + Sync {
    /// Append one record. Flushes before reporting success.
    async fn append(&self, record: &Value) -> Result<(), PersistenceError>;

    /// Sink name for logging
    fn name(&self) -> &str;
}

/// Newline-delimited UTF-8 JSON file sink.
///
/// The file (and its parent directory) is created on first write. Every
/// append runs under a bounded timeout so a stalled filesystem can never
/// block a session indefinitely.
pub struct JsonlSink {
    name: String,
    path: PathBuf,
    write_timeout: Duration,
}

impl JsonlSink {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        write_timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            write_timeout,
        }
    }

    /// File path this sink appends to
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_line(&self, line: &[u8]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        // One framed record per write; no partial interleaving
        file.write_all(line).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl DurableSink for JsonlSink {
    async fn append(&self, record: &Value) -> Result<(), PersistenceError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        match tokio::time::timeout(self.write_timeout, self.write_line(&line)).await {
            Ok(result) => {
                if result.is_ok() {
                    tracing::trace!(sink = %self.name, bytes = line.len(), "Record appended");
                }
                result
            }
            Err(_elapsed) => Err(PersistenceError::Timeout {
                ms: self.write_timeout.as_millis() as u64,
            }),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// In-memory sink for tests and development
#[derive(Default)]
pub struct MemorySink {
    name: String,
    records: Mutex<Vec<Value>>,
}

impl MemorySink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Records appended so far, in order
    pub fn records(&self) -> Vec<Value> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[async_trait]
impl DurableSink for MemorySink {
    async fn append(&self, record: &Value) -> Result<(), PersistenceError> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_jsonl_creates_file_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("signups.jsonl");
        let sink = JsonlSink::new("signups", &path, Duration::from_secs(2));

        assert!(!path.exists());
        sink.append(&json!({"session_id": "uuid-1"})).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_jsonl_frames_one_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interactions.jsonl");
        let sink = JsonlSink::new("interactions", &path, Duration::from_secs(2));

        sink.append(&json!({"n": 1})).await.unwrap();
        sink.append(&json!({"n": 2})).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(serde_json::from_str::<Value>(lines[0]).unwrap(), json!({"n": 1}));
        assert_eq!(serde_json::from_str::<Value>(lines[1]).unwrap(), json!({"n": 2}));
    }

    #[tokio::test]
    async fn test_jsonl_concurrent_appends_stay_framed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interactions.jsonl");
        let sink = std::sync::Arc::new(JsonlSink::new(
            "interactions",
            &path,
            Duration::from_secs(2),
        ));

        let mut handles = Vec::new();
        for i in 0..16 {
            let sink = std::sync::Arc::clone(&sink);
            handles.push(tokio::spawn(async move {
                sink.append(&json!({"session": i})).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut seen = 0;
        for line in contents.lines() {
            // Every line must parse on its own
            serde_json::from_str::<Value>(line).unwrap();
            seen += 1;
        }
        assert_eq!(seen, 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_append_times_out_when_write_budget_is_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interactions.jsonl");
        // A zero budget elapses before the filesystem write can complete
        let sink = JsonlSink::new("interactions", &path, Duration::ZERO);

        let err = sink.append(&json!({"n": 1})).await.unwrap_err();
        assert!(matches!(err, PersistenceError::Timeout { ms: 0 }));
    }

    #[tokio::test]
    async fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new("test");
        sink.append(&json!({"n": 1})).await.unwrap();
        sink.append(&json!({"n": 2})).await.unwrap();

        assert_eq!(sink.records(), vec![json!({"n": 1}), json!({"n": 2})]);
    }
}
