// Sequence codec for numbered radar files
// Names look like `sn.0000` .. `sn.0250`; the index space wraps modulo 251
// Any four-digit name decodes; only the step back from zero wraps

use std::fmt;

/// Filename prefix shared by every sequence file
pub const PREFIX: &str = "sn";

/// Alias the remote site keeps pointing at the newest file
pub const SENTINEL: &str = "sn.last";

/// Number of distinct indices before the sequence wraps
pub const MODULUS: u16 = 251;

const DIGITS: usize = 4;

/// Largest value a four-digit name can carry
const MAX_ENCODED: u16 = 9999;

/// Index decoded from a sequence filename (0..=9999; the remote uses 0..=250)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceIndex(u16);

impl SequenceIndex {
    pub fn new(value: u16) -> Option<Self> {
        (value <= MAX_ENCODED).then_some(Self(value))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Previous index, wrapping 0 back to 250
    pub fn predecessor(self) -> Self {
        if self.0 == 0 {
            Self(MODULUS - 1)
        } else {
            Self(self.0 - 1)
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.{:0width$}", PREFIX, self.0, width = DIGITS)
    }
}

impl fmt::Display for SequenceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// Decode the index embedded in a sequence filename.
///
/// Only `sn.` followed by exactly four ASCII digits is accepted. The
/// sentinel never decodes.
pub fn decode_index(name: &str) -> Option<SequenceIndex> {
    let digits = name.strip_prefix(PREFIX)?.strip_prefix('.')?;
    if digits.len() != DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u16>().ok().and_then(SequenceIndex::new)
}

/// Name of the file that precedes `name` in the sequence
pub fn predecessor_name(name: &str) -> Option<String> {
    decode_index(name).map(|index| index.predecessor().file_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_zero() {
        assert_eq!(decode_index("sn.0000").map(SequenceIndex::value), Some(0));
    }

    #[test]
    fn test_decode_accepts_any_four_digits() {
        assert_eq!(decode_index("sn.0250").map(SequenceIndex::value), Some(250));
        assert_eq!(decode_index("sn.0251").map(SequenceIndex::value), Some(251));
        assert_eq!(decode_index("sn.9999").map(SequenceIndex::value), Some(9999));
    }

    #[test]
    fn test_predecessor_outside_sequence_steps_back() {
        assert_eq!(predecessor_name("sn.0251").as_deref(), Some("sn.0250"));
        assert_eq!(predecessor_name("sn.9999").as_deref(), Some("sn.9998"));
    }

    #[test]
    fn test_predecessor_wraps_at_zero() {
        assert_eq!(predecessor_name("sn.0000").as_deref(), Some("sn.0250"));
    }

    #[test]
    fn test_predecessor_simple() {
        assert_eq!(predecessor_name("sn.0100").as_deref(), Some("sn.0099"));
        assert_eq!(predecessor_name("sn.0001").as_deref(), Some("sn.0000"));
        assert_eq!(predecessor_name("sn.0250").as_deref(), Some("sn.0249"));
    }

    #[test]
    fn test_rejects_malformed_names() {
        for name in [
            SENTINEL, "", "sn.", "sn.12", "sn.00001", "sn.12a4", "SN.0001", "sn-0001",
            "xsn.0001", "sn.0001 ", " sn.0001", "sn.+001", "sn.-001", "sn.٠٠٠١",
        ] {
            assert_eq!(decode_index(name), None, "{:?} should not decode", name);
            assert_eq!(predecessor_name(name), None);
        }
    }

    #[test]
    fn test_file_name_is_zero_padded() {
        assert_eq!(SequenceIndex::new(7).map(SequenceIndex::file_name).as_deref(), Some("sn.0007"));
        assert_eq!(SequenceIndex::new(250).map(|i| i.to_string()).as_deref(), Some("sn.0250"));
        assert_eq!(SequenceIndex::new(9999).map(SequenceIndex::file_name).as_deref(), Some("sn.9999"));
        assert_eq!(SequenceIndex::new(10_000), None);
    }

    proptest! {
        #[test]
        fn prop_every_index_round_trips(value in 0u16..MODULUS) {
            let name = format!("sn.{:04}", value);
            prop_assert_eq!(decode_index(&name).map(SequenceIndex::value), Some(value));
        }

        #[test]
        fn prop_predecessor_steps_back_one(value in 0u16..MODULUS) {
            let name = format!("sn.{:04}", value);
            let expected = (value + MODULUS - 1) % MODULUS;
            let prev = predecessor_name(&name);
            prop_assert_eq!(prev, Some(format!("sn.{:04}", expected)));
        }

        #[test]
        fn prop_arbitrary_strings_only_decode_in_canonical_form(name in "\\PC{0,12}") {
            if let Some(index) = decode_index(&name) {
                prop_assert_eq!(index.file_name(), name);
            }
        }

        #[test]
        fn prop_wrong_width_never_decodes(digits in "[0-9]{0,3}|[0-9]{5,8}") {
            let name = format!("sn.{}", digits);
            prop_assert_eq!(decode_index(&name), None);
        }
    }
}
