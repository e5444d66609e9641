use std::fmt;

use chrono::Utc;
use serde::{Serialize, Serializer};

/// `<prefix>_<unix_timestamp>`, unique as long as two submissions
/// do not land in the same second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobName {
    prefix: String,
    timestamp: i64,
}

impl JobName {
    pub fn new(prefix: impl Into<String>, timestamp: i64) -> Self {
        Self {
            prefix: prefix.into(),
            timestamp,
        }
    }

    /// Stamp the prefix with the current time
    pub fn now(prefix: impl Into<String>) -> Self {
        Self::new(prefix, Utc::now().timestamp())
    }
}

#[cfg(test)]
impl JobName {
    pub(crate) fn prefix(&self) -> &str {
        &self.prefix
    }

    pub(crate) fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Split a rendered name back into prefix and timestamp
    pub(crate) fn parse(s: &str) -> Option<Self> {
        let (prefix, digits) = s.rsplit_once('_')?;
        if prefix.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self::new(prefix, digits.parse().ok()?))
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.prefix, self.timestamp)
    }
}

impl Serialize for JobName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
