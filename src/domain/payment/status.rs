//! Payment status state machine.
//!
//! A payment starts Pending and is settled by whichever of client verification
//! or gateway webhook confirms it first. Success is terminal.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created after a successful gateway initialization; not yet confirmed.
    Pending,

    /// Confirmed by the gateway. Premium has been granted for it.
    Success,

    /// The gateway reported the charge as failed.
    Failed,
}

impl PaymentStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "success" => Ok(PaymentStatus::Success),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("Invalid payment status: {}", other)),
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Pending, Success)
                | (Pending, Failed)
                // A later authoritative confirmation overrides a failure report
                | (Failed, Success)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Success, Failed],
            Failed => vec![Success],
            Success => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_transition_to_success() {
        let status = PaymentStatus::Pending;
        assert_eq!(
            status.transition_to(PaymentStatus::Success),
            Ok(PaymentStatus::Success)
        );
    }

    #[test]
    fn pending_can_transition_to_failed() {
        assert!(PaymentStatus::Pending.can_transition_to(&PaymentStatus::Failed));
    }

    #[test]
    fn success_is_terminal() {
        assert!(PaymentStatus::Success.is_terminal());
        assert!(!PaymentStatus::Success.can_transition_to(&PaymentStatus::Failed));
        assert!(!PaymentStatus::Success.can_transition_to(&PaymentStatus::Pending));
    }

    #[test]
    fn same_status_is_not_a_transition() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Success,
            PaymentStatus::Failed,
        ] {
            assert!(!status.can_transition_to(&status));
        }
    }

    #[test]
    fn nothing_moves_back_to_pending() {
        assert!(!PaymentStatus::Failed.can_transition_to(&PaymentStatus::Pending));
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Success,
            PaymentStatus::Failed,
        ] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target));
            }
        }
    }

    #[test]
    fn parses_storage_representation() {
        assert_eq!("success".parse::<PaymentStatus>(), Ok(PaymentStatus::Success));
        assert!("settled".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
