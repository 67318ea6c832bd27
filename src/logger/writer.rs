//! File writer for the logger

use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;

/// Shared, line-buffered log file.
///
/// Every event produced by the fmt layer is one line, so line buffering
/// keeps each event in a single write to disk.
#[derive(Clone)]
pub struct LogFileWriter {
    file: Arc<Mutex<LineWriter<File>>>,
}

impl LogFileWriter {
    /// Opens (or creates) the log file described by `config`.
    pub fn new(config: &FileConfig) -> io::Result<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = open_log_file(&config.path, config.append)?;
        Ok(Self {
            file: Arc::new(Mutex::new(LineWriter::new(file))),
        })
    }
}

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = LogFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard {
            file: self.file.clone(),
        }
    }
}

/// Per-event handle onto the shared file
pub struct LogFileGuard {
    file: Arc<Mutex<LineWriter<File>>>,
}

impl Write for LogFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        file.flush()
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    options.open(path)
}
