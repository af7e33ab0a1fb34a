//! Random data generation steps

use apistep_domain::{Charset, NumericType, TimeDirection, parse_duration};

use super::ScenarioContext;
use crate::error::{ApplicationError, ApplicationResult};
use crate::generator;

impl ScenarioContext {
    /// Saves a random word of `from..=to` characters from `charset` under `key`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown charset or an empty range.
    pub fn generate_word(&mut self, charset: &str, from: i64, to: i64, key: &str) -> ApplicationResult<()> {
        let charset: Charset = charset.parse()?;
        let word = generator::random_word(charset, from, to)?;
        self.trace(&format!("generated word {word:?} as {key}"));
        self.state.cache_mut().save(key, word);
        Ok(())
    }

    /// Saves a random sentence of `from..=to` words, each `word_from..=word_to`
    /// characters long, under `key`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown charset or an empty range.
    pub fn generate_sentence(
        &mut self,
        charset: &str,
        (from, to): (i64, i64),
        (word_from, word_to): (i64, i64),
        key: &str,
    ) -> ApplicationResult<()> {
        let charset: Charset = charset.parse()?;
        let sentence = generator::random_sentence(charset, from, to, word_from, word_to)?;
        self.trace(&format!("generated sentence {sentence:?} as {key}"));
        self.state.cache_mut().save(key, sentence);
        Ok(())
    }

    /// Saves a random `int` or `float` from `from..=to` under `key`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown numeric type or an empty range.
    pub fn generate_number(&mut self, kind: &str, from: i64, to: i64, key: &str) -> ApplicationResult<()> {
        match kind.parse::<NumericType>()? {
            NumericType::Int => {
                let n = generator::random_int(from, to)?;
                self.trace(&format!("generated int {n} as {key}"));
                self.state.cache_mut().save(key, n);
            }
            NumericType::Float => {
                let n = generator::random_float(from, to)?;
                self.trace(&format!("generated float {n} as {key}"));
                self.state.cache_mut().save(key, n);
            }
        }
        Ok(())
    }

    /// Saves a random boolean under `key`.
    pub fn generate_bool(&mut self, key: &str) {
        let value = generator::random_bool();
        self.trace(&format!("generated bool {value} as {key}"));
        self.state.cache_mut().save(key, value);
    }

    /// Saves the current time moved `direction` by `duration` under `key`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown direction, a malformed duration, or a result
    /// outside the representable range.
    pub fn generate_time(&mut self, direction: &str, duration: &str, key: &str) -> ApplicationResult<()> {
        let direction: TimeDirection = direction.parse()?;
        let duration = parse_duration(&self.state.render(duration)?)?;
        let now = self.collaborators.clock.now();
        let time = direction.travel(now, duration).ok_or_else(|| {
            ApplicationError::InvalidArgument(format!("cannot travel {direction} by {duration:?} from {now}"))
        })?;
        self.trace(&format!("generated time {time} as {key}"));
        self.state.cache_mut().save(key, time);
        Ok(())
    }
}
