//! Test doubles for the ports.
//!
//! Compiled for this crate's tests and, with the `testing` feature, for
//! downstream crates' tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::ports::{Notifier, Translator};
use crate::types::Severity;

/// Notifier that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(message, severity)` received so far.
    pub fn calls(&self) -> Vec<(String, Severity)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last(&self) -> Option<(String, Severity)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((message.to_string(), severity));
    }
}

/// Translator backed by a fixed map.
#[derive(Debug, Clone, Default)]
pub struct MapTranslator {
    entries: HashMap<String, String>,
}

impl MapTranslator {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        MapTranslator {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Translator for MapTranslator {
    fn translate(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
