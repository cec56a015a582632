//! Key shapes and value encodings of the three record families kept in the TTL store.
//!
//! | Record | Key | Value |
//! |---|---|---|
//! | address request counter | `rate:ip:{address}` | 4-byte little-endian `i32` |
//! | phone issuance lock | `rate:phone:{phone}` | `"locked"` |
//! | active code | `otp:phone:{phone}` | 6-digit string |

use crate::errors::StoreError;

/// Address bucket used when the caller could not determine a source address
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Value written to a phone issuance lock; only its presence is inspected
pub const PHONE_LOCK_SENTINEL: &str = "locked";

/// Encoded width of an address counter
pub const COUNTER_WIDTH: usize = 4;

/// Key of the request counter for a source address
pub fn address_counter_key(address: &str) -> String {
    format!("rate:ip:{}", address)
}

/// Key of the issuance lock for a phone number
pub fn phone_lock_key(phone: &str) -> String {
    format!("rate:phone:{}", phone)
}

/// Key of the active code for a phone number
pub fn active_code_key(phone: &str) -> String {
    format!("otp:phone:{}", phone)
}

/// Resolve the address bucket for an optional, possibly blank, source address
pub fn address_bucket(source_address: Option<&str>) -> &str {
    match source_address.map(str::trim) {
        Some(address) if !address.is_empty() => address,
        _ => UNKNOWN_ADDRESS,
    }
}

pub fn encode_counter(count: i32) -> [u8; COUNTER_WIDTH] {
    count.to_le_bytes()
}

/// Decode a stored counter, rejecting anything that is not exactly four bytes
pub fn decode_counter(key: &str, bytes: &[u8]) -> Result<i32, StoreError> {
    let raw: [u8; COUNTER_WIDTH] = bytes.try_into().map_err(|_| StoreError::CorruptValue {
        key: key.to_string(),
        message: format!("expected {} counter bytes, found {}", COUNTER_WIDTH, bytes.len()),
    })?;
    Ok(i32::from_le_bytes(raw))
}
