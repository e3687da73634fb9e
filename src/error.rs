//! Error taxonomy for calls that cross the ledger boundary.
//!
//! Every failure is surfaced to the caller as-is: nothing in this crate retries
//! or recovers. Scripts wrap these errors with `anyhow` context and exit.

use alloy::sol_types::decode_revert_reason;
use alloy::transports::{RpcError, TransportErrorKind};

/// Failure of a submission, a read-only call or a log query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The ledger refused the transaction before execution (bad arguments,
    /// unknown signer, insufficient native funds).
    #[error("transaction rejected: {reason}")]
    Rejected { reason: String },

    /// The contract reverted. `reason` holds the decoded revert string when the
    /// contract provided one.
    #[error("execution reverted: {}", .reason.as_deref().unwrap_or("<no reason>"))]
    Reverted { reason: Option<String> },

    /// The endpoint could not be reached or answered with a non-JSON-RPC error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Return data or a log did not match the expected ABI.
    #[error("decode error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ChainError>;

impl ChainError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn reverted(reason: impl Into<String>) -> Self {
        Self::Reverted {
            reason: Some(reason.into()),
        }
    }

    /// Returns true for contract reverts, with or without a reason string.
    pub fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }

    /// The revert reason, if this is a revert that carried one.
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            Self::Reverted { reason } => reason.as_deref(),
            _ => None,
        }
    }
}

impl From<RpcError<TransportErrorKind>> for ChainError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        let Some(payload) = err.as_error_resp() else {
            return Self::Transport(err.to_string());
        };

        if let Some(data) = payload.as_revert_data() {
            return Self::Reverted {
                reason: decode_revert_reason(&data),
            };
        }

        match reason_from_message(&payload.message) {
            Some(reason) => Self::Reverted { reason },
            None => Self::Rejected {
                reason: payload.message.to_string(),
            },
        }
    }
}

/// Extracts a revert reason from a node error message.
///
/// Nodes without revert data in the error payload still report the reason in
/// the message, e.g. `execution reverted: Max limit` or
/// `VM Exception while processing transaction: reverted with reason string 'Max limit'`.
/// Returns `None` when the message does not describe a revert at all and
/// `Some(None)` for a revert without a reason.
pub(crate) fn reason_from_message(message: &str) -> Option<Option<String>> {
    if let Some(start) = message.find("reason string '") {
        let rest = &message[start + "reason string '".len()..];
        let reason = rest.rfind('\'').map_or(rest, |end| &rest[..end]);
        return Some(Some(reason.to_string()));
    }

    let lower = message.to_ascii_lowercase();
    let idx = lower.find("execution reverted")?;
    let rest = message[idx + "execution reverted".len()..]
        .trim_start_matches(':')
        .trim();

    if rest.is_empty() {
        Some(None)
    } else {
        Some(Some(rest.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_from_geth_message() {
        assert_eq!(
            reason_from_message("execution reverted: Max limit"),
            Some(Some("Max limit".to_string()))
        );
    }

    #[test]
    fn test_reason_from_hardhat_message() {
        let message = "VM Exception while processing transaction: reverted with reason string 'Value below price'";
        assert_eq!(
            reason_from_message(message),
            Some(Some("Value below price".to_string()))
        );
    }

    #[test]
    fn test_bare_revert_has_no_reason() {
        assert_eq!(reason_from_message("execution reverted"), Some(None));
    }

    #[test]
    fn test_non_revert_message() {
        assert_eq!(reason_from_message("insufficient funds for gas * price + value"), None);
    }

    #[test]
    fn test_revert_helpers() {
        let err = ChainError::reverted("Max limit exceeded");
        assert!(err.is_revert());
        assert_eq!(err.revert_reason(), Some("Max limit exceeded"));
        assert_eq!(err.to_string(), "execution reverted: Max limit exceeded");

        let err = ChainError::rejected("unknown account");
        assert!(!err.is_revert());
        assert_eq!(err.revert_reason(), None);
    }
}
