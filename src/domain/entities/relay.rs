//! Outcomes of the outbound calls made while relaying a webhook.

use serde::Serialize;
use std::fmt;

use super::webhook::EventKind;

/// An outbound target of the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sink {
    /// The downstream results endpoint receiving the raw body.
    Downstream,
    /// The chat channel receiving the formatted notification.
    Notifier,
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Downstream => write!(f, "downstream"),
            Self::Notifier => write!(f, "notifier"),
        }
    }
}

/// Result of a single delivery attempt to one [`Sink`].
///
/// Failures are values, not errors: the relay records them and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayOutcome {
    pub sink: Sink,
    pub succeeded: bool,
    pub status_or_error: String,
}

impl RelayOutcome {
    pub fn delivered(sink: Sink, status: u16) -> Self {
        Self {
            sink,
            succeeded: true,
            status_or_error: status.to_string(),
        }
    }

    pub fn failed(sink: Sink, error: impl Into<String>) -> Self {
        Self {
            sink,
            succeeded: false,
            status_or_error: error.into(),
        }
    }

    /// Human-readable summary shown in the notification.
    ///
    /// `Success - Status: 200` or `Failed - <error text>`.
    pub fn summary(&self) -> String {
        if self.succeeded {
            format!("Success - Status: {}", self.status_or_error)
        } else {
            format!("Failed - {}", self.status_or_error)
        }
    }
}

/// Everything that happened while relaying one webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayReport {
    pub kind: EventKind,
    pub forward: RelayOutcome,
    pub notify: RelayOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_summary() {
        assert_eq!(
            RelayOutcome::delivered(Sink::Downstream, 202).summary(),
            "Success - Status: 202"
        );
        assert_eq!(
            RelayOutcome::failed(Sink::Downstream, "operation timed out").summary(),
            "Failed - operation timed out"
        );
    }
}
