// Fallback sink - the always-available log destination when no backend is active

use crate::backend::{LogTarget, LoggerProvider};
use crate::diagnostics::{DiagnosticChannel, DiagnosticEvent};
use crate::{FallbackTarget, LevelFilter, LogRecord, LoggingConfig};
use anyhow::Result;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

enum FallbackOutput {
    Console(std::io::Stderr),
    File(File),
}

/// State shared between the sink and its per-name logger views
struct FallbackShared {
    output: Mutex<FallbackOutput>,
    /// LevelFilter as u8, runtime adjustable
    threshold: AtomicU8,
}

impl FallbackShared {
    fn threshold(&self) -> LevelFilter {
        LevelFilter::from_u8(self.threshold.load(Ordering::Relaxed)).unwrap_or(LevelFilter::Off)
    }

    /// Write a deterministic single-line rendering, plus the cause chain
    /// if present. Write errors are swallowed: the fallback is the last
    /// resort and has nowhere further to report.
    fn write_record(&self, record: &LogRecord) {
        let mut output = self.output.lock().unwrap_or_else(|e| e.into_inner());
        let writer: &mut dyn Write = match &mut *output {
            FallbackOutput::Console(stderr) => stderr,
            FallbackOutput::File(file) => file,
        };
        match record.render_cause() {
            Some(cause) => {
                let _ = writeln!(
                    writer,
                    "{} [{}] : {}\n{}",
                    record.logger_name, record.level, record.message, cause
                );
            }
            None => {
                let _ = writeln!(
                    writer,
                    "{} [{}] : {}",
                    record.logger_name, record.level, record.message
                );
            }
        }
    }

    fn flush(&self) {
        let mut output = self.output.lock().unwrap_or_else(|e| e.into_inner());
        match &mut *output {
            FallbackOutput::Console(stderr) => {
                let _ = stderr.flush();
            }
            FallbackOutput::File(file) => {
                let _ = file.flush();
            }
        }
    }
}

/// The always-available sink used whenever no backend is published.
///
/// Created once at manager construction and alive for the process
/// lifetime. Construction never fails: if the configured file target
/// cannot be opened, the sink degrades to console and reports the
/// degradation once on the diagnostic channel.
#[derive(Clone)]
pub struct FallbackSink {
    shared: Arc<FallbackShared>,
}

impl FallbackSink {
    /// Build the sink from configuration.
    pub fn new(config: &LoggingConfig, diagnostics: &DiagnosticChannel) -> Self {
        let output = match &config.fallback {
            FallbackTarget::Console => FallbackOutput::Console(std::io::stderr()),
            FallbackTarget::File(path) => {
                match OpenOptions::new().create(true).append(true).open(path) {
                    Ok(file) => FallbackOutput::File(file),
                    Err(e) => {
                        diagnostics.report(DiagnosticEvent::FallbackDegraded {
                            detail: format!("cannot open '{}': {}", path.display(), e),
                        });
                        FallbackOutput::Console(std::io::stderr())
                    }
                }
            }
        };

        Self {
            shared: Arc::new(FallbackShared {
                output: Mutex::new(output),
                threshold: AtomicU8::new(config.fallback_threshold.as_u8()),
            }),
        }
    }

    /// Current fallback threshold
    pub fn threshold(&self) -> LevelFilter {
        self.shared.threshold()
    }

    /// Change the fallback threshold at runtime
    pub fn set_threshold(&self, filter: LevelFilter) {
        self.shared.threshold.store(filter.as_u8(), Ordering::Relaxed);
    }

    /// Flush buffered output
    pub fn flush(&self) {
        self.shared.flush();
    }
}

impl LoggerProvider for FallbackSink {
    fn logger_for(&self, name: &str) -> Box<dyn LogTarget> {
        Box::new(FallbackLogger {
            name: name.to_string(),
            shared: Arc::clone(&self.shared),
        })
    }
}

/// Thin named view over the shared fallback sink
struct FallbackLogger {
    name: String,
    shared: Arc<FallbackShared>,
}

impl LogTarget for FallbackLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> LevelFilter {
        self.shared.threshold()
    }

    fn accept(&self, record: &LogRecord) -> Result<()> {
        self.shared.write_record(record);
        Ok(())
    }
}
