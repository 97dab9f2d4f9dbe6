mod common;

use common::strategies::*;
use optiplan_core::utils::priority::{decode, encode};
use proptest::prelude::*;

proptest! {
    /// Property: encoding then decoding a priority list preserves ids and order
    #[test]
    fn priority_lists_survive_persistence(ids in priority_list_strategy()) {
        prop_assert_eq!(decode(&encode(&ids)), ids);
    }

    /// Property: decoding keeps exactly the integer tokens, in order
    #[test]
    fn decoding_drops_only_non_integer_tokens(text in noisy_priority_text_strategy()) {
        let expected: Vec<i64> = text
            .split(',')
            .filter_map(|token| token.trim().parse().ok())
            .collect();
        prop_assert_eq!(decode(&text), expected);
    }

    /// Property: decoded output re-encodes without whitespace or empty tokens
    #[test]
    fn re_encoding_normalizes(text in noisy_priority_text_strategy()) {
        let normalized = encode(&decode(&text));
        prop_assert!(!normalized.contains(' '));
        prop_assert!(!normalized.contains(",,"));
    }
}
