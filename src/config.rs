//! Deck configuration: slide count, timings and host element names.

/// Identifiers and class names the controller uses to address host elements.
///
/// Defaults match the markup conventions of the stock deck template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementIds {
    /// Prefix joined with the 1-based slide number (`slide-3`)
    pub slide_prefix: String,
    /// Label showing the current slide number
    pub slide_number: String,
    /// Label showing the total slide count
    pub total_slides: String,
    /// Progress bar whose width tracks completion
    pub progress: String,
    /// "Previous" control
    pub prev_button: String,
    /// "Next" control
    pub next_button: String,
    /// Class carried by every slide container
    pub slide_class: String,
    /// Class marking the visible slide
    pub active_class: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            slide_prefix: "slide-".into(),
            slide_number: "slideNumber".into(),
            total_slides: "totalSlides".into(),
            progress: "progress".into(),
            prev_button: "prevBtn".into(),
            next_button: "nextBtn".into(),
            slide_class: "slide".into(),
            active_class: "active".into(),
        }
    }
}

/// Configuration for a [`PresentationController`](crate::PresentationController).
///
/// All fields are optional when loaded from TOML; missing ones keep their
/// defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeckConfig {
    /// Number of slides in the deck, fixed for the controller's lifetime
    pub total_slides: usize,
    /// Delay between autoplay advances
    pub autoplay_interval_ms: u32,
    /// Delay before slide layout is restored after printing
    pub print_restore_delay_ms: u32,
    /// Minimum horizontal travel for a touch gesture to count as a swipe
    pub swipe_threshold: f64,
    /// Host element names
    pub elements: ElementIds,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            total_slides: 15,
            autoplay_interval_ms: 5000,
            print_restore_delay_ms: 1000,
            swipe_threshold: 50.0,
            elements: ElementIds::default(),
        }
    }
}

impl DeckConfig {
    /// Default configuration with a different slide count.
    pub fn with_total_slides(total_slides: usize) -> Self {
        Self {
            total_slides,
            ..Self::default()
        }
    }

    /// Parse a deck configuration from a TOML string.
    ///
    /// ```rust
    /// use slide_deck_core::DeckConfig;
    ///
    /// let config = DeckConfig::from_toml_str("total_slides = 8\n[elements]\nprogress = \"bar\"").unwrap();
    /// assert_eq!(config.total_slides, 8);
    /// assert_eq!(config.elements.progress, "bar");
    /// assert_eq!(config.autoplay_interval_ms, 5000);
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a usable deck.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_slides == 0 {
            return Err(ConfigError::NoSlides);
        }
        if self.autoplay_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(ConfigError::InvalidSwipeThreshold(self.swipe_threshold));
        }
        Ok(())
    }

    /// Element identifier of the 1-based slide `n`.
    #[inline]
    pub fn slide_id(&self, n: usize) -> String {
        format!("{}{}", self.elements.slide_prefix, n)
    }
}

/// Error type for rejected configurations.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A deck needs at least one slide
    NoSlides,
    /// Autoplay interval of zero would spin the host timer
    ZeroInterval,
    /// Swipe threshold must be a finite, non-negative distance
    InvalidSwipeThreshold(f64),
    /// Configuration text could not be parsed
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoSlides => write!(f, "Deck must contain at least one slide"),
            ConfigError::ZeroInterval => write!(f, "Autoplay interval must be greater than zero"),
            ConfigError::InvalidSwipeThreshold(t) => {
                write!(f, "Invalid swipe threshold: {}", t)
            }
            ConfigError::Parse(msg) => write!(f, "Failed to parse deck config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_deck() {
        let config = DeckConfig::default();
        assert_eq!(config.total_slides, 15);
        assert_eq!(config.autoplay_interval_ms, 5000);
        assert_eq!(config.print_restore_delay_ms, 1000);
        assert_eq!(config.swipe_threshold, 50.0);
        assert_eq!(config.elements.prev_button, "prevBtn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn slide_id_uses_prefix() {
        let mut config = DeckConfig::default();
        assert_eq!(config.slide_id(3), "slide-3");

        config.elements.slide_prefix = "page".into();
        assert_eq!(config.slide_id(12), "page12");
    }

    #[test]
    fn validate_rejects_empty_deck() {
        let config = DeckConfig::with_total_slides(0);
        assert_eq!(config.validate(), Err(ConfigError::NoSlides));
    }

    #[test]
    fn validate_rejects_bad_timings() {
        let config = DeckConfig {
            autoplay_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));

        let config = DeckConfig {
            swipe_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSwipeThreshold(_))
        ));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_partial_config() {
        let config = DeckConfig::from_toml_str("autoplay_interval_ms = 2500").unwrap();
        assert_eq!(config.total_slides, 15);
        assert_eq!(config.autoplay_interval_ms, 2500);
        assert_eq!(config.elements, ElementIds::default());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_rejects_invalid() {
        assert_eq!(
            DeckConfig::from_toml_str("total_slides = 0"),
            Err(ConfigError::NoSlides)
        );
        assert!(matches!(
            DeckConfig::from_toml_str("total_slides = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
