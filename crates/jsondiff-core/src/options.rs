use serde::{Deserialize, Serialize};

use crate::OptionsError;

/// Configuration knobs passed to [`compare`](crate::compare).
///
/// Deserializes from the camelCase form used on the command line:
///
/// ```
/// # use jsondiff_core::DiffOptions;
/// let opts: DiffOptions = serde_json::from_str(r#"{"epsilon":1e-6,"keySort":true}"#)?;
/// assert!(opts.key_sort());
/// assert_eq!(opts.epsilon(), 1e-6);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DiffOptions {
    epsilon: f64,
    key_sort: bool,
}

impl DiffOptions {
    /// Returns the absolute tolerance used for numeric equality.
    ///
    /// ```
    /// # use jsondiff_core::DiffOptions;
    /// assert_eq!(DiffOptions::default().epsilon(), 0.0);
    /// ```
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Indicates whether object keys are visited in code-point order.
    #[must_use]
    pub fn key_sort(&self) -> bool {
        self.key_sort
    }

    /// Sets the numeric tolerance, rejecting negative and non-finite values.
    ///
    /// ```
    /// # use jsondiff_core::{DiffOptions, OptionsError};
    /// let opts = DiffOptions::default().with_epsilon(0.5)?;
    /// assert_eq!(opts.epsilon(), 0.5);
    /// let err = DiffOptions::default().with_epsilon(-1.0).unwrap_err();
    /// assert_eq!(err, OptionsError::NegativeEpsilon(-1.0));
    /// # Ok::<(), OptionsError>(())
    /// ```
    pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self, OptionsError> {
        self.epsilon = epsilon;
        self.validate()?;
        Ok(self)
    }

    /// Sets the numeric tolerance, replacing negative or non-finite values with zero.
    ///
    /// ```
    /// # use jsondiff_core::DiffOptions;
    /// assert_eq!(DiffOptions::default().with_epsilon_clamped(f64::NAN).epsilon(), 0.0);
    /// assert_eq!(DiffOptions::default().with_epsilon_clamped(-3.0).epsilon(), 0.0);
    /// assert_eq!(DiffOptions::default().with_epsilon_clamped(1e-6).epsilon(), 1e-6);
    /// ```
    #[must_use]
    pub fn with_epsilon_clamped(mut self, epsilon: f64) -> Self {
        self.epsilon = if epsilon.is_finite() && epsilon > 0.0 { epsilon } else { 0.0 };
        self
    }

    /// Enables or disables lexicographic key ordering.
    ///
    /// ```
    /// # use jsondiff_core::DiffOptions;
    /// assert!(DiffOptions::default().with_key_sort(true).key_sort());
    /// ```
    #[must_use]
    pub fn with_key_sort(mut self, key_sort: bool) -> Self {
        self.key_sort = key_sort;
        self
    }

    /// Checks the invariants that deserialization cannot enforce by itself.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.epsilon.is_finite() {
            return Err(OptionsError::NonFiniteEpsilon(self.epsilon));
        }
        if self.epsilon < 0.0 {
            return Err(OptionsError::NegativeEpsilon(self.epsilon));
        }
        Ok(())
    }
}
