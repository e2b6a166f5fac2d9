/*
[INPUT]:  Destination wallet address strings and target networks
[OUTPUT]: Syntactic validity checks for destination addresses
[POS]:    Data layer - local input validation before any provider call
[UPDATE]: When a network with a new address encoding is added
*/

use crate::http::{OnrampError, Result};

use super::enums::{AddressFormat, Network};

const EVM_ADDRESS_BYTES: usize = 20;
const SOLANA_PUBKEY_BYTES: usize = 32;

/// Check whether `address` is well-formed for `network`.
///
/// Only the encoding is checked; EIP-55 checksums are not enforced.
pub fn is_valid_address(address: &str, network: Network) -> bool {
    let address = address.trim();
    match network.address_format() {
        AddressFormat::Evm => is_valid_evm_address(address),
        AddressFormat::Solana => is_valid_solana_address(address),
    }
}

/// Reject an address that is not valid for at least one of `networks`.
pub fn validate_destination(address: &str, networks: &[Network]) -> Result<()> {
    if address.trim().is_empty() {
        return Err(OnrampError::Validation("Address is required".to_string()));
    }
    if networks.is_empty() {
        return Err(OnrampError::Validation(
            "At least one supported network is required".to_string(),
        ));
    }
    if networks.iter().any(|network| is_valid_address(address, *network)) {
        return Ok(());
    }

    let names: Vec<&str> = networks.iter().map(Network::as_str).collect();
    Err(OnrampError::Validation(format!(
        "Address is not valid for any of: {}",
        names.join(", ")
    )))
}

fn is_valid_evm_address(address: &str) -> bool {
    let Some(hex_part) = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
    else {
        return false;
    };

    hex_part.len() == EVM_ADDRESS_BYTES * 2
        && hex::decode(hex_part).is_ok_and(|bytes| bytes.len() == EVM_ADDRESS_BYTES)
}

fn is_valid_solana_address(address: &str) -> bool {
    bs58::decode(address)
        .into_vec()
        .is_ok_and(|bytes| bytes.len() == SOLANA_PUBKEY_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0xABCdef0123456789abcdef0123456789ABCDEF01", Network::Base, true)]
    #[case("0xabcdef0123456789abcdef0123456789abcdef01", Network::Ethereum, true)]
    #[case("abcdef0123456789abcdef0123456789abcdef01", Network::Base, false)]
    #[case("0xabc", Network::Base, false)]
    #[case("0xZZcdef0123456789abcdef0123456789abcdef01", Network::Base, false)]
    #[case("4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T", Network::Solana, true)]
    #[case("4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T", Network::Base, false)]
    #[case("0OIl", Network::Solana, false)]
    fn test_is_valid_address(#[case] address: &str, #[case] network: Network, #[case] valid: bool) {
        assert_eq!(is_valid_address(address, network), valid);
    }

    #[test]
    fn test_validate_destination_accepts_any_matching_network() {
        let solana = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";
        assert!(validate_destination(solana, &[Network::Base, Network::Solana]).is_ok());
    }

    #[test]
    fn test_validate_destination_rejects_blank() {
        let err = validate_destination("   ", &[Network::Base]).unwrap_err();
        assert!(matches!(err, OnrampError::Validation(msg) if msg == "Address is required"));
    }

    #[test]
    fn test_validate_destination_rejects_empty_network_list() {
        let err = validate_destination("0xabcdef0123456789abcdef0123456789abcdef01", &[])
            .unwrap_err();
        assert!(matches!(err, OnrampError::Validation(_)));
    }

    #[test]
    fn test_validate_destination_names_networks_on_mismatch() {
        let err = validate_destination("not-an-address", &[Network::Base, Network::Polygon])
            .unwrap_err();
        match err {
            OnrampError::Validation(msg) => assert!(msg.contains("base, polygon")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
