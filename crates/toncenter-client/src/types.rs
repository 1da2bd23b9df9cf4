//! TON Center v3 response types.

use serde::Deserialize;

/// Response body of `GET /jetton/transfers`.
#[derive(Debug, Clone, Deserialize)]
pub struct JettonTransfersResponse {
    /// Matching transfers, newest first when sorted descending.
    #[serde(default)]
    pub jetton_transfers: Vec<JettonTransfer>,
}

/// A single jetton transfer record.
#[derive(Debug, Clone, Deserialize)]
pub struct JettonTransfer {
    /// Sending party, absent for mints.
    pub source: Option<TransferParty>,
    /// Transfer amount in the jetton's minor units, as a decimal string.
    #[serde(default)]
    pub amount: String,
}

/// A transfer participant.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferParty {
    /// Wallet address.
    #[serde(default)]
    pub address: String,
}

impl JettonTransfer {
    /// Source wallet address, or empty when absent.
    pub fn source_address(&self) -> &str {
        self.source
            .as_ref()
            .map(|party| party.address.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_transfer_list() {
        let body = r#"{
            "jetton_transfers": [
                {"source": {"address": "EQSender"}, "amount": "8000000"},
                {"source": null, "amount": "1"}
            ]
        }"#;

        let parsed: JettonTransfersResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.jetton_transfers.len(), 2);
        assert_eq!(parsed.jetton_transfers[0].source_address(), "EQSender");
        assert_eq!(parsed.jetton_transfers[0].amount, "8000000");
        assert_eq!(parsed.jetton_transfers[1].source_address(), "");
    }

    #[test]
    fn test_parses_empty_body() {
        let parsed: JettonTransfersResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.jetton_transfers.is_empty());
    }
}
