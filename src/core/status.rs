//! Status types returned by the validation pipeline.
//!
//! [`ValidationStatus`] is the four-way status a reactive session reports to
//! its caller. [`Verdict`] is the settled result of a fully evaluated
//! pipeline (single-shot mode) or of a completed asynchronous check. Both are
//! serializable so a rendering frontend can consume them directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a validated value as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationStatus {
    /// The precheck has never yet passed for this session. The message
    /// explains what is still missing, but UI convention is to suppress it:
    /// the user simply has not interacted enough yet to deserve an error.
    Ready {
        /// Precheck message, conventionally not displayed.
        message: String,
    },
    /// Synchronous stages passed and an asynchronous check is outstanding.
    Waiting,
    /// Every configured stage passed, including the asynchronous one.
    Pass,
    /// A check, a precheck (after having passed at least once), or the
    /// asynchronous check rejected the value.
    Fail {
        /// Human-readable rejection reason.
        message: String,
    },
}

impl ValidationStatus {
    /// Whether all stages have passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationStatus::Pass)
    }

    /// Whether the value was rejected.
    pub fn is_fail(&self) -> bool {
        matches!(self, ValidationStatus::Fail { .. })
    }

    /// Whether an asynchronous check is still outstanding.
    pub fn is_waiting(&self) -> bool {
        matches!(self, ValidationStatus::Waiting)
    }

    /// The attached message, if any. `Ready` carries one even though UIs
    /// conventionally do not display it.
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationStatus::Ready { message } | ValidationStatus::Fail { message } => {
                Some(message)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Ready { .. } => write!(f, "ready"),
            ValidationStatus::Waiting => write!(f, "waiting"),
            ValidationStatus::Pass => write!(f, "pass"),
            ValidationStatus::Fail { message } => write!(f, "fail: {}", message),
        }
    }
}

/// Settled result of a validation pipeline: pass, or fail with a reason.
///
/// This is the return type of the single-shot pipeline and the stored form
/// of a completed asynchronous check. A session keeps its latest
/// asynchronous outcome as `Option<Verdict>` where `None` means "waiting",
/// so a stored outcome can never be `Ready`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Verdict {
    /// Every configured stage passed.
    Pass,
    /// A stage rejected the value.
    Fail {
        /// Human-readable rejection reason.
        message: String,
    },
}

impl Verdict {
    /// Build a verdict from a stage result: `None` passes, a message fails.
    pub fn from_stage(result: Option<String>) -> Self {
        match result {
            None => Verdict::Pass,
            Some(message) => Verdict::Fail { message },
        }
    }

    /// Whether the pipeline passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    /// The failure message, if the pipeline failed.
    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Fail { message } => Some(message),
            Verdict::Pass => None,
        }
    }
}

impl From<Verdict> for ValidationStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => ValidationStatus::Pass,
            Verdict::Fail { message } => ValidationStatus::Fail { message },
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Fail { message } => write!(f, "fail: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_json_shape() {
        let fail = ValidationStatus::Fail {
            message: "taken".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&fail).unwrap(),
            json!({ "status": "fail", "message": "taken" })
        );

        let waiting = ValidationStatus::Waiting;
        assert_eq!(
            serde_json::to_value(&waiting).unwrap(),
            json!({ "status": "waiting" })
        );
    }

    #[test]
    fn test_verdict_from_stage() {
        assert_eq!(Verdict::from_stage(None), Verdict::Pass);
        assert_eq!(
            Verdict::from_stage(Some("no".to_string())),
            Verdict::Fail {
                message: "no".to_string()
            }
        );
    }

    #[test]
    fn test_verdict_into_status() {
        let status: ValidationStatus = Verdict::Fail {
            message: "taken".to_string(),
        }
        .into();
        assert!(status.is_fail());
        assert_eq!(status.message(), Some("taken"));
    }

    #[test]
    fn test_ready_message_accessible_but_not_displayed() {
        let ready = ValidationStatus::Ready {
            message: "at least 3 characters".to_string(),
        };
        assert_eq!(ready.message(), Some("at least 3 characters"));
        assert_eq!(format!("{}", ready), "ready");
    }
}
