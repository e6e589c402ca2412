use crate::radix::{Alphabet, RadixError};

/// Encodes a non-negative integer into its text form under `alphabet`.
///
/// The output is minimal length with the most significant digit first; zero
/// encodes as the single first character of the alphabet.
///
/// # Example
///
/// ```
/// use floe::{Alphabet, radix};
///
/// assert_eq!(radix::encode(0, &Alphabet::BASE62), "0");
/// assert_eq!(radix::encode(825_373_492, &Alphabet::BASE62), "trBLg");
/// ```
#[must_use]
pub fn encode(value: u128, alphabet: &Alphabet) -> String {
    let radix = alphabet.radix() as u128;
    if value == 0 {
        return alphabet.digit(0).to_string();
    }

    let mut digits = Vec::new();
    let mut rest = value;
    while rest > 0 {
        digits.push(alphabet.digit((rest % radix) as usize));
        rest /= radix;
    }
    digits.iter().rev().collect()
}

/// Decodes text produced by [`encode`] back into an integer.
///
/// Characters are accumulated left to right as `acc = acc * radix + digit`.
/// Superfluous leading zero digits are accepted and simply do not survive a
/// re-encode.
///
/// # Errors
///
/// - [`RadixError::InvalidDigit`] if a character is not part of `alphabet`
/// - [`RadixError::Overflow`] if the value does not fit into 128 bits
///
/// # Example
///
/// ```
/// use floe::{Alphabet, radix};
///
/// assert_eq!(radix::decode("trBLg", &Alphabet::BASE62), Ok(825_373_492));
/// ```
pub fn decode(text: &str, alphabet: &Alphabet) -> Result<u128, RadixError> {
    let radix = alphabet.radix() as u128;
    let mut acc: u128 = 0;
    for ch in text.chars() {
        let digit = alphabet
            .index_of(ch)
            .ok_or(RadixError::InvalidDigit { ch })?;
        acc = acc
            .checked_mul(radix)
            .and_then(|shifted| shifted.checked_add(digit as u128))
            .ok_or(RadixError::Overflow)?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PRESETS: [Alphabet<'static>; 5] = [
        Alphabet::BASE2,
        Alphabet::BASE8,
        Alphabet::BASE10,
        Alphabet::BASE16,
        Alphabet::BASE62,
    ];

    fn assert_roundtrip(value: u128, alphabet: &Alphabet) {
        let text = encode(value, alphabet);
        assert_eq!(
            decode(&text, alphabet),
            Ok(value),
            "roundtrip for {value} in radix {}",
            alphabet.radix()
        );
    }

    #[test]
    fn encode_matches_core_formatting_for_native_radices() {
        for value in (0..=1_000_000u128).step_by(271).chain([0, 1, 61, 62, 63]) {
            assert_eq!(encode(value, &Alphabet::BASE2), format!("{value:b}"));
            assert_eq!(encode(value, &Alphabet::BASE8), format!("{value:o}"));
            assert_eq!(encode(value, &Alphabet::BASE10), format!("{value}"));
            assert_eq!(encode(value, &Alphabet::BASE16), format!("{value:x}"));
        }
    }

    #[test]
    fn roundtrip_covers_small_values_densely() {
        for alphabet in &PRESETS {
            for value in 0..=4096 {
                assert_roundtrip(value, alphabet);
            }
        }
    }

    #[test]
    fn roundtrip_covers_the_millions_and_the_wide_end() {
        for alphabet in &PRESETS {
            for value in (0..=1_000_000u128).step_by(997) {
                assert_roundtrip(value, alphabet);
            }
            for value in [
                1_000_000,
                u128::from(u64::MAX) - 1,
                u128::from(u64::MAX),
                u128::from(u64::MAX) + 1,
                u128::MAX - 1,
                u128::MAX,
            ] {
                assert_roundtrip(value, alphabet);
            }
        }
    }

    #[test]
    fn base62_literal_vectors() {
        assert_eq!(encode(0, &Alphabet::BASE62), "0");
        assert_eq!(encode(1, &Alphabet::BASE62), "1");
        assert_eq!(encode(48, &Alphabet::BASE62), "m");
        assert_eq!(encode(825_373_492, &Alphabet::BASE62), "trBLg");
        assert_eq!(
            encode(69_174_242_573_971_291_647_849_523, &Alphabet::BASE62),
            "5ZoxFWcU2WF6W5z"
        );

        assert_eq!(decode("0", &Alphabet::BASE62), Ok(0));
        assert_eq!(decode("1", &Alphabet::BASE62), Ok(1));
        assert_eq!(decode("m", &Alphabet::BASE62), Ok(48));
        assert_eq!(decode("trBLg", &Alphabet::BASE62), Ok(825_373_492));
        assert_eq!(
            decode("5ZoxFWcU2WF6W5z", &Alphabet::BASE62),
            Ok(69_174_242_573_971_291_647_849_523)
        );
    }

    #[test]
    fn decode_accepts_redundant_leading_zero_digits() {
        assert_eq!(decode("000trBLg", &Alphabet::BASE62), Ok(825_373_492));
        assert_eq!(decode("00", &Alphabet::BASE10), Ok(0));
    }

    #[test]
    fn decode_rejects_characters_outside_the_alphabet() {
        assert_eq!(
            decode("12!4", &Alphabet::BASE10),
            Err(RadixError::InvalidDigit { ch: '!' })
        );
        assert_eq!(
            decode("0102", &Alphabet::BASE2),
            Err(RadixError::InvalidDigit { ch: '2' })
        );
    }

    #[test]
    fn decode_rejects_values_wider_than_128_bits() {
        let max = encode(u128::MAX, &Alphabet::BASE62);
        let one_past = format!("{max}0");
        assert_eq!(
            decode(&one_past, &Alphabet::BASE62),
            Err(RadixError::Overflow)
        );
    }

    #[test]
    fn alphabet_rejects_degenerate_digit_sets() {
        assert_eq!(
            Alphabet::new("x"),
            Err(RadixError::AlphabetTooSmall { len: 1 })
        );
        assert_eq!(
            Alphabet::new("0120"),
            Err(RadixError::DuplicateDigit { ch: '0' })
        );
    }

    proptest! {
        #[test]
        fn roundtrip_holds_for_any_value_in_any_preset(value in any::<u128>()) {
            for alphabet in &PRESETS {
                let text = encode(value, alphabet);
                prop_assert_eq!(decode(&text, alphabet), Ok(value));
            }
        }

        #[test]
        fn roundtrip_holds_for_a_custom_alphabet(value in any::<u128>()) {
            let alphabet = Alphabet::new("zyxwvutsrq").unwrap();
            let text = encode(value, &alphabet);
            prop_assert_eq!(decode(&text, &alphabet), Ok(value));
        }
    }
}
