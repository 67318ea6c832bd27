//! In-memory JSON log capture for tests.
//!
//! Installs a thread-local subscriber whose JSON output lands in a shared
//! buffer, then hands back the parsed events.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

/// One parsed log event.
#[derive(Debug, Clone)]
pub(crate) struct LogEvent {
    pub level: String,
    pub message: String,
    pub fields: Map<String, Value>,
}

impl LogEvent {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl CapturedLogs {
    /// Routes every event emitted on this thread into the buffer until the
    /// guard is dropped. Use with current-thread runtimes only.
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_current_span(true)
                .with_writer(self.clone()),
        );
        tracing::subscriber::set_default(subscriber)
    }

    pub fn events(&self) -> Vec<LogEvent> {
        let buffer = self.buffer.lock().expect("capture buffer poisoned");
        String::from_utf8_lossy(&buffer)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let value: Value = serde_json::from_str(line).expect("log line is JSON");
                let mut fields = value
                    .get("fields")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                let message = fields
                    .remove("message")
                    .and_then(|m| m.as_str().map(str::to_string))
                    .unwrap_or_default();
                LogEvent {
                    level: value["level"].as_str().unwrap_or_default().to_string(),
                    message,
                    fields,
                }
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }

    pub fn at_level(&self, level: &str) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: self.buffer.clone(),
        }
    }
}

pub(crate) struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| io::Error::other("capture buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
