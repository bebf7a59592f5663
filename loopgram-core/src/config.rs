use crate::constants::{DEFAULT_PADDING, DEFAULT_WINDOW_WIDTH};
use crate::types::GrammarError;

/// Configuration settings for a grammar training or encoding run.
///
/// One configuration describes a single (window width, padding) parameter
/// combination; sweeping several combinations is a concern of the caller,
/// and concurrent runs must write to distinct output namespaces.
///
/// # Examples
///
/// ```rust
/// use loopgram_core::config::GrammarConfig;
///
/// let config = GrammarConfig {
///     window_width: 5,
///     padding: 10,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GrammarConfig {
    /// Sliding-window width `w` in nucleotides.
    ///
    /// Every n-tuple, parsing sub-block and interval normalisation step is
    /// derived from this width. Must be positive.
    ///
    /// **Default**: `4`
    pub window_width: usize,

    /// Padding added to each boundary flank.
    ///
    /// Each flank spans `window_width + padding` nucleotides, truncated at
    /// the sequence ends. A padding that pushes a flank past the sequence
    /// bounds is not an error.
    ///
    /// **Default**: `13`
    pub padding: usize,

    /// Number of threads for interval-level extraction.
    ///
    /// When set, a dedicated Rayon pool of this size is used; `None` uses
    /// the global pool.
    ///
    /// **Default**: `None`
    pub num_threads: Option<usize>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            padding: DEFAULT_PADDING,
            num_threads: None,
        }
    }
}

impl GrammarConfig {
    /// Check the configuration before any processing starts.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidWindowWidth`] for a zero window width.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if self.window_width == 0 {
            return Err(GrammarError::InvalidWindowWidth(self.window_width));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GrammarConfig::default();
        assert_eq!(config.window_width, 4);
        assert_eq!(config.padding, 13);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = GrammarConfig {
            window_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GrammarError::InvalidWindowWidth(0))
        ));
    }
}
