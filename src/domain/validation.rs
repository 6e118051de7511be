//! Format validation for XRPL identifiers.
//!
//! These checks are purely syntactic: base58-check decoding with the
//! Ripple alphabet plus version/length verification. No key derivation
//! happens here or anywhere else in this crate.

use super::error::ValidationError;

/// Version byte of a classic account address (prefix `r`).
const CLASSIC_ADDRESS_VERSION: u8 = 0x00;
/// Version byte of a family seed (prefix `s`).
const FAMILY_SEED_VERSION: u8 = 0x21;
/// Version prefix of an ed25519 seed (prefix `sEd`).
const ED25519_SEED_PREFIX: [u8; 3] = [0x01, 0xE1, 0x4B];
/// Version prefix of an X-address on mainnet (prefix `X`).
const X_ADDRESS_PREFIX: [u8; 2] = [0x05, 0x44];
/// Version prefix of an X-address on test networks (prefix `T`).
const X_ADDRESS_TEST_PREFIX: [u8; 2] = [0x04, 0x93];

fn decode_checked(input: &str) -> Option<Vec<u8>> {
    bs58::decode(input)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .with_check(None)
        .into_vec()
        .ok()
}

/// Returns true for a well-formed classic address (`r...`).
#[must_use]
pub fn is_classic_address(address: &str) -> bool {
    match decode_checked(address) {
        Some(payload) => payload.len() == 21 && payload[0] == CLASSIC_ADDRESS_VERSION,
        None => false,
    }
}

/// Returns true for a well-formed X-address (`X...` on mainnet, `T...` on
/// test networks).
#[must_use]
pub fn is_x_address(address: &str) -> bool {
    match decode_checked(address) {
        Some(payload) => {
            payload.len() == 31
                && (payload[..2] == X_ADDRESS_PREFIX || payload[..2] == X_ADDRESS_TEST_PREFIX)
        }
        None => false,
    }
}

/// Validate an account address in either classic or X form.
pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.trim().is_empty() {
        return Err(ValidationError::MissingParameter("address".to_string()));
    }
    if is_classic_address(address) || is_x_address(address) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAddress(address.to_string()))
    }
}

/// Validate a wallet seed (family seed or ed25519 seed).
///
/// Any decode failure is treated as "invalid", never propagated.
pub fn validate_seed(seed: &str) -> Result<(), ValidationError> {
    let Some(payload) = decode_checked(seed) else {
        return Err(ValidationError::InvalidSeed);
    };
    let valid = (payload.len() == 17 && payload[0] == FAMILY_SEED_VERSION)
        || (payload.len() == 19 && payload[..3] == ED25519_SEED_PREFIX);
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidSeed)
    }
}

/// Validate a transaction hash: exactly 64 hexadecimal characters.
pub fn validate_tx_hash(hash: &str) -> Result<(), ValidationError> {
    if hash.len() == 64 && hash.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTransactionHash(hash.to_string()))
    }
}

/// Validate a currency code: a 3-character ASCII code other than "XRP",
/// or a 40-character hex code.
pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    let ok = match code.len() {
        3 => code.chars().all(|c| c.is_ascii_alphanumeric()) && code != "XRP",
        40 => code.chars().all(|c| c.is_ascii_hexdigit()),
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidCurrency(code.to_string()))
    }
}

// Adapters for the `validator` derive on request payloads.

pub fn address_field(address: &str) -> Result<(), validator::ValidationError> {
    validate_address(address)
        .map_err(|_| validator::ValidationError::new("invalid_xrpl_address"))
}

pub fn seed_field(seed: &str) -> Result<(), validator::ValidationError> {
    validate_seed(seed).map_err(|_| validator::ValidationError::new("invalid_xrpl_seed"))
}

pub fn currency_field(code: &str) -> Result<(), validator::ValidationError> {
    validate_currency_code(code)
        .map_err(|_| validator::ValidationError::new("invalid_currency_code"))
}

pub fn tx_hash_field(hash: &str) -> Result<(), validator::ValidationError> {
    validate_tx_hash(hash)
        .map_err(|_| validator::ValidationError::new("invalid_transaction_hash"))
}

pub fn seed_secret_field(seed: &secrecy::SecretString) -> Result<(), validator::ValidationError> {
    use secrecy::ExposeSecret;
    seed_field(seed.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known mainnet addresses with valid checksums.
    const GENESIS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const ACCOUNT_ZERO: &str = "rrrrrrrrrrrrrrrrrrrrrhoLvTp";
    const ACCOUNT_ONE: &str = "rrrrrrrrrrrrrrrrrrrrBZbvji";
    // The documented test seed for the genesis account.
    const GENESIS_SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";

    #[test]
    fn test_classic_address_accepts_known_accounts() {
        assert!(is_classic_address(GENESIS));
        assert!(is_classic_address(ACCOUNT_ZERO));
        assert!(is_classic_address(ACCOUNT_ONE));
    }

    #[test]
    fn test_classic_address_rejects_garbage() {
        assert!(!is_classic_address(""));
        assert!(!is_classic_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyT")); // truncated
        assert!(!is_classic_address("not an address"));
        // Base58 but wrong alphabet/checksum
        assert!(!is_classic_address("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"));
    }

    #[test]
    fn test_validate_address_missing() {
        assert!(matches!(
            validate_address("  "),
            Err(ValidationError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_seed_accepts_family_seed() {
        assert!(validate_seed(GENESIS_SEED).is_ok());
    }

    #[test]
    fn test_seed_rejects_addresses_and_garbage() {
        assert!(validate_seed(GENESIS).is_err());
        assert!(validate_seed("sNotARealSeed").is_err());
        assert!(validate_seed("").is_err());
    }

    #[test]
    fn test_tx_hash_accepts_64_hex() {
        let hash = "E3FE6EA3D48F0C2B639448020EA4F03D4F4F8FFDB243A852A0F59177921B4879";
        assert!(validate_tx_hash(hash).is_ok());
        assert!(validate_tx_hash(&hash.to_lowercase()).is_ok());
    }

    #[test]
    fn test_tx_hash_rejects_wrong_length_and_non_hex() {
        assert!(validate_tx_hash("").is_err());
        assert!(validate_tx_hash("E3FE6EA3").is_err());
        assert!(validate_tx_hash(&"F".repeat(63)).is_err());
        assert!(validate_tx_hash(&"F".repeat(65)).is_err());
        assert!(validate_tx_hash(&format!("{}G", "F".repeat(63))).is_err());
    }

    #[test]
    fn test_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("EUR").is_ok());
        assert!(validate_currency_code(&"A".repeat(40)).is_ok());
        assert!(validate_currency_code("XRP").is_err()); // native asset has no trust lines
        assert!(validate_currency_code("US").is_err());
        assert!(validate_currency_code("USDT").is_err());
    }
}
