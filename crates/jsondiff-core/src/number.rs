use serde::{Serialize, Serializer};
use serde_json::{Number as JsonNumber, Value as JsonValue};

use crate::CanonicalizeError;

/// Represents a JSON number using IEEE-754 double precision.
///
/// Every JSON number is held as an `f64`, so `1` and `1.0` are the same value.
#[derive(Clone, Copy, Debug, PartialOrd)]
pub struct Number(f64);

impl Number {
    /// Creates a new [`Number`] after validating finiteness.
    ///
    /// ```
    /// # use jsondiff_core::Number;
    /// let num = Number::new(42.0)?;
    /// assert_eq!(num.get(), 42.0);
    /// assert!(Number::new(f64::NAN).is_err());
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    pub fn new(value: f64) -> Result<Self, CanonicalizeError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(CanonicalizeError::NotFinite { value })
        }
    }

    /// Returns the raw floating-point value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Compares two numbers using the provided absolute tolerance.
    ///
    /// The bound is inclusive. The check is also accepted when the larger
    /// value equals the smaller one plus `epsilon` after rounding, so that
    /// `x` and `x + epsilon` built by a caller always compare equal.
    /// At large magnitudes that rounded slack can exceed `epsilon`: with
    /// `epsilon = 1.5`, `1e16` and `1e16 + 2.0` compare equal.
    ///
    /// ```
    /// # use jsondiff_core::Number;
    /// let one = Number::new(1.0)?;
    /// let near = Number::new(1.0 + 1e-9)?;
    /// assert!(one.equals_within(near, 1e-9));
    /// assert!(!one.equals_within(near, 0.0));
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn equals_within(self, other: Self, epsilon: f64) -> bool {
        let (lo, hi) = if self.0 <= other.0 { (self.0, other.0) } else { (other.0, self.0) };
        hi - lo <= epsilon || hi <= lo + epsilon
    }

    /// Converts the number into a `serde_json` value using the minimal integer
    /// representation when the value is integral.
    #[must_use]
    pub fn to_json_value(self) -> JsonValue {
        if let Some(int) = self.as_exact_i64() {
            return JsonValue::Number(JsonNumber::from(int));
        }
        JsonNumber::from_f64(self.0).map_or(JsonValue::Null, JsonValue::Number)
    }

    fn as_exact_i64(self) -> Option<i64> {
        let integral = self.0.fract() == 0.0 && !(self.0 == 0.0 && self.0.is_sign_negative());
        // 2^63 is exactly representable, so the upper bound must be exclusive.
        if integral && (i64::MIN as f64) <= self.0 && self.0 < (i64::MAX as f64) {
            Some(self.0 as i64)
        } else {
            None
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_exact_i64() {
            Some(int) => serializer.serialize_i64(int),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl TryFrom<f64> for Number {
    type Error = CanonicalizeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
