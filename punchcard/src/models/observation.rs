//! Canonical observation data consumed by the grid engine.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PunchcardError, PunchcardResult};

/// A magnitude contributed at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Presence-only observation; counts as one.
    pub fn presence(timestamp: NaiveDateTime) -> Self {
        Self::new(timestamp, 1.0)
    }
}

/// Observations grouped by identity (for example, commits by author).
///
/// Keys only come into existence through [`Dataset::push`], so every identity
/// present holds at least one observation. Identities iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    identities: BTreeMap<String, Vec<Observation>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation to `identity`, creating the identity if needed.
    pub fn push(&mut self, identity: impl Into<String>, observation: Observation) {
        self.identities
            .entry(identity.into())
            .or_default()
            .push(observation);
    }

    pub fn get(&self, identity: &str) -> Option<&[Observation]> {
        self.identities.get(identity).map(Vec::as_slice)
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.identities.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Observation])> {
        self.identities
            .iter()
            .map(|(identity, observations)| (identity.as_str(), observations.as_slice()))
    }

    /// Every observation across all identities.
    pub fn observations(&self) -> impl Iterator<Item = &Observation> {
        self.identities.values().flatten()
    }

    /// Number of identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn observation_count(&self) -> usize {
        self.identities.values().map(Vec::len).sum()
    }

    /// Sum of all values recorded for `identity`, zero when absent.
    pub fn total_value(&self, identity: &str) -> f64 {
        self.get(identity)
            .map(|observations| observations.iter().map(|o| o.value).sum())
            .unwrap_or(0.0)
    }

    /// Check that every value is a finite, non-negative magnitude.
    pub fn validate(&self) -> PunchcardResult<()> {
        for (identity, observations) in self.iter() {
            for (index, observation) in observations.iter().enumerate() {
                if !observation.value.is_finite() || observation.value < 0.0 {
                    return Err(PunchcardError::InvalidObservation {
                        identity: identity.to_string(),
                        index,
                        value: observation.value,
                    });
                }
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> Extend<(S, Observation)> for Dataset {
    fn extend<I: IntoIterator<Item = (S, Observation)>>(&mut self, iter: I) {
        for (identity, observation) in iter {
            self.push(identity, observation);
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Observation)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (S, Observation)>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        dataset.extend(iter);
        dataset
    }
}
