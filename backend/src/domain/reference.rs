//! Booking references and the default random generator.
//!
//! A reference reads `BK-<time>-<random>`. `<time>` is the creation instant
//! in epoch milliseconds and `<random>` is 64 bits from the thread-local
//! CSPRNG, both in Crockford base-32. The time prefix makes references sort
//! roughly by creation; the random suffix keeps them unguessable and unique
//! across concurrent callers without shared state.

use std::fmt;
use std::sync::Arc;

use mockable::Clock;
use rand::RngCore;

use super::booking::BookingValidationError;
use super::ports::{ReferenceGenerationError, ReferenceGenerator};

const PREFIX: &str = "BK";
const TIME_DIGITS: usize = 9;
const RANDOM_DIGITS: usize = 13;
const CROCKFORD: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const TIME_LIMIT_MS: u64 = 1 << (5 * TIME_DIGITS);

/// External identifier of a booking record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingReference(String);

impl BookingReference {
    /// Parse a reference, accepting lowercase input.
    ///
    /// The random part holds 64 bits, so its leading digit is `0`..=`F`.
    ///
    /// # Examples
    /// ```
    /// use booking_backend::domain::BookingReference;
    ///
    /// let parsed = BookingReference::parse("bk-01jq4m2x0-1zz1k3q9d8v2c").expect("well formed");
    /// assert_eq!(parsed.as_str(), "BK-01JQ4M2X0-1ZZ1K3Q9D8V2C");
    /// assert!(BookingReference::parse("BK-123").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, BookingValidationError> {
        let candidate = raw.trim().to_ascii_uppercase();
        let mut parts = candidate.split('-');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next(), parts.next()),
            (Some(PREFIX), Some(time), Some(random), None)
                if is_crockford(time, TIME_DIGITS) && is_random_part(random)
        );
        if !well_formed {
            return Err(BookingValidationError::InvalidReference {
                value: raw.to_owned(),
            });
        }
        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_crockford(part: &str, digits: usize) -> bool {
    part.len() == digits && part.bytes().all(|byte| CROCKFORD.contains(&byte))
}

fn is_random_part(part: &str) -> bool {
    // 13 digits carry 65 bits; the top one is always clear.
    is_crockford(part, RANDOM_DIGITS)
        && part
            .bytes()
            .next()
            .and_then(|lead| CROCKFORD.iter().position(|digit| *digit == lead))
            .is_some_and(|value| value < 16)
}

fn encode(mut value: u64, digits: usize) -> String {
    let mut out = vec![b'0'; digits];
    for slot in out.iter_mut().rev() {
        *slot = CROCKFORD[(value & 0x1f) as usize];
        value >>= 5;
    }
    out.into_iter().map(char::from).collect()
}

/// Reference generator backed by the wall clock and `rand::thread_rng`.
///
/// Each thread owns its RNG, so concurrent callers never contend on a lock.
#[derive(Clone)]
pub struct RandomReferenceGenerator {
    clock: Arc<dyn Clock>,
}

impl RandomReferenceGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl ReferenceGenerator for RandomReferenceGenerator {
    fn next_reference(&self) -> Result<BookingReference, ReferenceGenerationError> {
        let millis = self.clock.utc().timestamp_millis();
        let millis = u64::try_from(millis)
            .ok()
            .filter(|value| *value < TIME_LIMIT_MS)
            .ok_or_else(|| {
                ReferenceGenerationError::clock(format!("timestamp {millis}ms out of range"))
            })?;

        let mut bytes = [0_u8; 8];
        rand::thread_rng()
            .try_fill_bytes(&mut bytes)
            .map_err(|err| ReferenceGenerationError::entropy(err.to_string()))?;
        let random = u64::from_be_bytes(bytes);

        Ok(BookingReference(format!(
            "{PREFIX}-{}-{}",
            encode(millis, TIME_DIGITS),
            encode(random, RANDOM_DIGITS)
        )))
    }
}
