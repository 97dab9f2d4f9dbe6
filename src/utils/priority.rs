/*!
 * Resource priority list codec.
 *
 * Priority lists are ordered sequences of resource ids. They are persisted as
 * a single comma-joined column and turned back into a `Vec<i64>` on read.
 * Encoding preserves order; decoding tolerates whitespace and silently drops
 * tokens that are not integers.
 */

use crate::constants::system::PRIORITY_DELIMITER;

/// Join ids into their persisted form; an empty list encodes to `""`.
///
/// ```rust
/// use optiplan_core::utils::priority::encode;
///
/// assert_eq!(encode(&[3, 1, 2]), "3,1,2");
/// assert_eq!(encode(&[]), "");
/// ```
pub fn encode(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(&PRIORITY_DELIMITER.to_string())
}

/// Parse a persisted priority list, dropping tokens that are not integers.
///
/// ```rust
/// use optiplan_core::utils::priority::decode;
///
/// assert_eq!(decode("1,x,3"), vec![1, 3]);
/// assert!(decode("   ").is_empty());
/// ```
pub fn decode(encoded: &str) -> Vec<i64> {
    if encoded.trim().is_empty() {
        return Vec::new();
    }

    encoded
        .split(PRIORITY_DELIMITER)
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .collect()
}
