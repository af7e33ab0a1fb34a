//! Random data generators
//!
//! Every generator takes an inclusive `from..=to` range and rejects an empty one.

use rand::Rng;

use apistep_domain::{Charset, DomainError, DomainResult};

/// Word length range used by the sentence step.
pub const SENTENCE_WORD_LENGTH: (i64, i64) = (3, 10);

/// Checks that `from..=to` is a non-empty range of non-negative values and
/// converts it to `usize` bounds.
fn length_range(from: i64, to: i64) -> DomainResult<(usize, usize)> {
    let invalid = || DomainError::InvalidRange { from, to };
    if from > to {
        return Err(invalid());
    }
    let from = usize::try_from(from).map_err(|_| invalid())?;
    let to = usize::try_from(to).map_err(|_| invalid())?;
    Ok((from, to))
}

/// Generates a word whose length in characters is drawn from `from..=to`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidRange`] if `from > to` or a bound is negative.
pub fn random_word(charset: Charset, from: i64, to: i64) -> DomainResult<String> {
    let (from, to) = length_range(from, to)?;
    let runes = charset.runes();
    let mut rng = rand::rng();
    let len = rng.random_range(from..=to);
    Ok((0..len)
        .map(|_| runes[rng.random_range(0..runes.len())])
        .collect())
}

/// Generates `from..=to` words of `word_from..=word_to` characters each,
/// joined by single spaces.
///
/// # Errors
///
/// Returns [`DomainError::InvalidRange`] if either range is empty.
pub fn random_sentence(
    charset: Charset,
    from: i64,
    to: i64,
    word_from: i64,
    word_to: i64,
) -> DomainResult<String> {
    let (from, to) = length_range(from, to)?;
    length_range(word_from, word_to)?;
    let count = rand::rng().random_range(from..=to);
    let words = (0..count)
        .map(|_| random_word(charset, word_from, word_to))
        .collect::<DomainResult<Vec<_>>>()?;
    Ok(words.join(" "))
}

/// Generates an integer in `from..=to`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidRange`] if `from > to`.
pub fn random_int(from: i64, to: i64) -> DomainResult<i64> {
    if from > to {
        return Err(DomainError::InvalidRange { from, to });
    }
    Ok(rand::rng().random_range(from..=to))
}

/// Generates a float in `from..=to`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidRange`] if `from > to`.
#[allow(clippy::cast_precision_loss)]
pub fn random_float(from: i64, to: i64) -> DomainResult<f64> {
    if from > to {
        return Err(DomainError::InvalidRange { from, to });
    }
    Ok(rand::rng().random_range(from as f64..=to as f64))
}

/// Generates a random boolean.
#[must_use]
pub fn random_bool() -> bool {
    rand::rng().random_bool(0.5)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_word_length_and_charset() {
        for charset in [Charset::Ascii, Charset::Unicode, Charset::Polish, Charset::Russian] {
            for _ in 0..50 {
                let word = random_word(charset, 5, 10).unwrap();
                let len = word.chars().count();
                assert!((5..=10).contains(&len), "{word:?} has {len} characters");
                assert!(word.chars().all(|c| charset.contains(c)));
            }
        }
    }

    #[test]
    fn test_word_fixed_length() {
        assert_eq!(random_word(Charset::English, 4, 4).unwrap().chars().count(), 4);
        assert_eq!(random_word(Charset::English, 0, 0).unwrap(), "");
    }

    #[test]
    fn test_word_rejects_empty_range() {
        assert_eq!(
            random_word(Charset::Ascii, 10, 5).unwrap_err(),
            DomainError::InvalidRange { from: 10, to: 5 }
        );
        assert!(random_word(Charset::Ascii, -1, 5).is_err());
    }

    #[test]
    fn test_sentence_shape() {
        let (word_from, word_to) = SENTENCE_WORD_LENGTH;
        for _ in 0..20 {
            let sentence = random_sentence(Charset::Ascii, 2, 4, word_from, word_to).unwrap();
            let words: Vec<&str> = sentence.split(' ').collect();
            assert!((2..=4).contains(&words.len()), "{sentence:?}");
            for word in words {
                assert!((3..=10).contains(&word.chars().count()), "{word:?}");
            }
        }
    }

    #[test]
    fn test_sentence_rejects_empty_range() {
        assert!(random_sentence(Charset::Ascii, 5, 1, 3, 10).is_err());
    }

    #[test]
    fn test_numbers_in_range() {
        for _ in 0..100 {
            let n = random_int(-3, 3).unwrap();
            assert!((-3..=3).contains(&n));
            let f = random_float(1, 2).unwrap();
            assert!((1.0..=2.0).contains(&f));
        }
        assert_eq!(random_int(7, 7).unwrap(), 7);
        assert!(random_int(2, 1).is_err());
        assert!(random_float(2, 1).is_err());
    }
}
