use std::fmt::Display;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Success,
    Failed,
    Expired,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Processing => "PROCESSING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Expired => "EXPIRED",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Success | PaymentStatus::Failed | PaymentStatus::Expired
        )
    }

    /// Settlement callbacks advance state through this predicate; the create
    /// path only ever produces `Pending`.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        if self.is_final() {
            return false;
        }

        match self {
            PaymentStatus::Pending => matches!(
                next,
                PaymentStatus::Processing | PaymentStatus::Failed | PaymentStatus::Expired
            ),
            PaymentStatus::Processing => {
                matches!(next, PaymentStatus::Success | PaymentStatus::Failed)
            }
            _ => false,
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PaymentStatus {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PROCESSING" => Ok(PaymentStatus::Processing),
            "SUCCESS" => Ok(PaymentStatus::Success),
            "FAILED" => Ok(PaymentStatus::Failed),
            "EXPIRED" => Ok(PaymentStatus::Expired),
            other => Err(anyhow!("unknown payment status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_transitions_are_allowed() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Processing));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Failed));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Expired));
        assert!(PaymentStatus::Processing.can_transition_to(PaymentStatus::Success));
        assert!(PaymentStatus::Processing.can_transition_to(PaymentStatus::Failed));
    }

    #[test]
    fn unlisted_transitions_are_rejected() {
        assert!(!PaymentStatus::Pending.can_transition_to(PaymentStatus::Success));
        assert!(!PaymentStatus::Pending.can_transition_to(PaymentStatus::Pending));
        assert!(!PaymentStatus::Processing.can_transition_to(PaymentStatus::Expired));
        assert!(!PaymentStatus::Processing.can_transition_to(PaymentStatus::Pending));
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for terminal in [
            PaymentStatus::Success,
            PaymentStatus::Failed,
            PaymentStatus::Expired,
        ] {
            for next in [
                PaymentStatus::Pending,
                PaymentStatus::Processing,
                PaymentStatus::Success,
                PaymentStatus::Failed,
                PaymentStatus::Expired,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
            assert!(terminal.is_final());
        }
    }

    #[test]
    fn round_trips_through_storage_representation() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Processing,
            PaymentStatus::Success,
            PaymentStatus::Failed,
            PaymentStatus::Expired,
        ] {
            assert_eq!(PaymentStatus::try_from(status.as_str()).unwrap(), status);
        }
        assert!(PaymentStatus::try_from("REFUNDED").is_err());
    }
}
