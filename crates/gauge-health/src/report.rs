//! The health report: service name to liveness flag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Serializes as a flat JSON object, e.g. `{"cache": true, "object_store": false}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthReport(BTreeMap<String, bool>);

impl HealthReport {
    pub(crate) fn insert(&mut self, service: impl Into<String>, healthy: bool) {
        self.0.insert(service.into(), healthy);
    }

    /// `None` if no probe was registered under `service`.
    #[must_use]
    pub fn get(&self, service: &str) -> Option<bool> {
        self.0.get(service).copied()
    }

    #[must_use]
    pub fn all_healthy(&self) -> bool {
        self.0.values().all(|healthy| *healthy)
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for HealthReport {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut report = Self::default();
        for (service, healthy) in iter {
            report.insert(service, healthy);
        }
        report
    }
}
