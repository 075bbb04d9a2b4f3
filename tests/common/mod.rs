//! Shared test backends for integration tests.

// Each test binary compiles this module separately and uses a subset.
#![allow(dead_code)]

use anyhow::Result;
use log_relay::{Backend, LevelFilter, LogRecord, LogTarget, LoggerProvider};
use std::sync::{Arc, Condvar, Mutex};

/// Backend that captures every accepted record, tagged with the engine
/// label, into a shared vector.
pub struct CapturingBackend {
    label: String,
    threshold: LevelFilter,
    records: Arc<Mutex<Vec<(String, LogRecord)>>>,
}

impl CapturingBackend {
    pub fn new(label: &str, threshold: LevelFilter) -> (Arc<Self>, Records) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let backend = Arc::new(Self {
            label: label.to_string(),
            threshold,
            records: Arc::clone(&records),
        });
        (backend, Records(records))
    }

    /// Like `new`, but capturing into an existing shared vector so
    /// several published instances can be counted together.
    pub fn sharing(label: &str, threshold: LevelFilter, records: &Records) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            threshold,
            records: Arc::clone(&records.0),
        })
    }
}

/// Handle onto a capture vector.
#[derive(Clone)]
pub struct Records(Arc<Mutex<Vec<(String, LogRecord)>>>);

impl Records {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn snapshot(&self) -> Vec<(String, LogRecord)> {
        self.0.lock().unwrap().clone()
    }

    pub fn messages_for(&self, label: &str) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| l == label)
            .map(|(_, r)| r.message.clone())
            .collect()
    }
}

struct CapturingTarget {
    name: String,
    label: String,
    threshold: LevelFilter,
    records: Arc<Mutex<Vec<(String, LogRecord)>>>,
}

impl LoggerProvider for CapturingBackend {
    fn logger_for(&self, name: &str) -> Box<dyn LogTarget> {
        Box::new(CapturingTarget {
            name: name.to_string(),
            label: self.label.clone(),
            threshold: self.threshold,
            records: Arc::clone(&self.records),
        })
    }
}

impl Backend for CapturingBackend {
    fn name(&self) -> &str {
        &self.label
    }

    fn threshold(&self) -> LevelFilter {
        self.threshold
    }
}

impl LogTarget for CapturingTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> LevelFilter {
        self.threshold
    }

    fn accept(&self, record: &LogRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .push((self.label.clone(), record.clone()));
        Ok(())
    }
}

/// Backend whose target for the name "slow" parks inside `accept` until
/// released. Targets for every other name accept immediately. Used to
/// show that one parked delivery does not delay calls on other targets.
pub struct GatedBackend {
    gate: Arc<Gate>,
    records: Arc<Mutex<Vec<(String, LogRecord)>>>,
}

pub struct Gate {
    open: Mutex<bool>,
    cond: Condvar,
}

impl Gate {
    pub fn release(&self) {
        let mut open = self.open.lock().unwrap();
        *open = true;
        self.cond.notify_all();
    }

    fn wait(&self) {
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.cond.wait(open).unwrap();
        }
    }
}

impl GatedBackend {
    pub fn new() -> (Arc<Self>, Arc<Gate>, Records) {
        let gate = Arc::new(Gate {
            open: Mutex::new(false),
            cond: Condvar::new(),
        });
        let records = Arc::new(Mutex::new(Vec::new()));
        let backend = Arc::new(Self {
            gate: Arc::clone(&gate),
            records: Arc::clone(&records),
        });
        (backend, gate, Records(records))
    }
}

struct GatedTarget {
    name: String,
    gate: Arc<Gate>,
    records: Arc<Mutex<Vec<(String, LogRecord)>>>,
}

impl LoggerProvider for GatedBackend {
    fn logger_for(&self, name: &str) -> Box<dyn LogTarget> {
        Box::new(GatedTarget {
            name: name.to_string(),
            gate: Arc::clone(&self.gate),
            records: Arc::clone(&self.records),
        })
    }
}

impl Backend for GatedBackend {
    fn name(&self) -> &str {
        "gated"
    }

    fn threshold(&self) -> LevelFilter {
        LevelFilter::Trace
    }
}

impl LogTarget for GatedTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> LevelFilter {
        LevelFilter::Trace
    }

    fn accept(&self, record: &LogRecord) -> Result<()> {
        if self.name == "slow" {
            self.gate.wait();
        }
        self.records
            .lock()
            .unwrap()
            .push((self.name.clone(), record.clone()));
        Ok(())
    }
}
