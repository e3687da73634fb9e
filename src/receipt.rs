//! Transaction receipts and decoded event records.

use alloy::primitives::{Address, Log, B256};
use alloy::sol_types::SolEvent;

/// Result of a confirmed state-changing call.
///
/// Read once to learn the outcome and to pull event arguments out of the logs,
/// then discarded.
#[derive(Debug, Clone)]
pub struct TxReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    pub status: bool,
    pub gas_used: u64,
    /// Set for contract creation transactions.
    pub contract_address: Option<Address>,
    pub logs: Vec<Log>,
}

impl TxReceipt {
    /// Decodes every log of event type `E` emitted by this transaction.
    ///
    /// Logs with a different signature are skipped; a log with the right
    /// signature but malformed data is skipped as well and reported at debug level.
    pub fn decode<E: SolEvent>(&self) -> Vec<E> {
        self.logs
            .iter()
            .filter_map(|log| decode_log::<E>(log))
            .collect()
    }

    /// Decodes the logs of event type `E` emitted by `address` only.
    pub fn decode_from<E: SolEvent>(&self, address: Address) -> Vec<E> {
        self.logs
            .iter()
            .filter(|log| log.address == address)
            .filter_map(|log| decode_log::<E>(log))
            .collect()
    }

    /// First event of type `E` in the receipt.
    pub fn first<E: SolEvent>(&self) -> Option<E> {
        self.logs.iter().find_map(|log| decode_log::<E>(log))
    }
}

/// A decoded historical event with its chain position.
#[derive(Debug, Clone)]
pub struct EventRecord<E> {
    pub event: E,
    pub address: Address,
    pub block_number: Option<u64>,
    pub transaction_hash: Option<B256>,
}

pub(crate) fn decode_log<E: SolEvent>(log: &Log) -> Option<E> {
    if log.data.topics().first() != Some(&E::SIGNATURE_HASH) {
        return None;
    }

    match E::decode_log_data(&log.data) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::debug!(
                target: "tokenops::receipt",
                address = %log.address,
                event = E::SIGNATURE,
                error = %e,
                "Skipping malformed log"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};
    use alloy::sol;

    sol! {
        #[derive(Debug, PartialEq, Eq)]
        event Transfer(address indexed from, address indexed to, uint256 value);
        #[derive(Debug, PartialEq, Eq)]
        event Approval(address indexed owner, address indexed spender, uint256 value);
    }

    fn receipt(logs: Vec<Log>) -> TxReceipt {
        TxReceipt {
            transaction_hash: B256::ZERO,
            block_number: Some(1),
            status: true,
            gas_used: 0,
            contract_address: None,
            logs,
        }
    }

    #[test]
    fn test_decode_filters_by_signature() {
        let token = address!("0000000000000000000000000000000000000123");
        let transfer = Transfer {
            from: address!("0000000000000000000000000000000000000001"),
            to: address!("0000000000000000000000000000000000000002"),
            value: U256::from(1000u64),
        };
        let approval = Approval {
            owner: address!("0000000000000000000000000000000000000001"),
            spender: address!("0000000000000000000000000000000000000003"),
            value: U256::from(50u64),
        };

        let receipt = receipt(vec![
            Log {
                address: token,
                data: approval.encode_log_data(),
            },
            Log {
                address: token,
                data: transfer.encode_log_data(),
            },
        ]);

        assert_eq!(receipt.decode::<Transfer>(), vec![transfer.clone()]);
        assert_eq!(receipt.first::<Approval>(), Some(approval));
        assert_eq!(receipt.decode_from::<Transfer>(token).len(), 1);
        assert!(receipt
            .decode_from::<Transfer>(Address::ZERO)
            .is_empty());
    }

    #[test]
    fn test_decode_empty_receipt() {
        let receipt = receipt(Vec::new());
        assert!(receipt.decode::<Transfer>().is_empty());
        assert_eq!(receipt.first::<Transfer>(), None);
    }
}
