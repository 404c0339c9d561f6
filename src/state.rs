//! Presentation state snapshot and the values derived from it.

/// Snapshot of the deck position and autoplay flag.
///
/// Refresh operations render exactly these derived values, so tests can
/// check a snapshot instead of inspecting host elements.
///
/// ## Example
///
/// ```rust
/// use slide_deck_core::PresentationState;
///
/// let state = PresentationState::new(15, 15);
/// assert_eq!(state.progress_percent(), 100.0);
/// assert_eq!(state.progress_width(), "100%");
/// assert!(state.next_disabled());
/// assert!(!state.prev_disabled());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresentationState {
    /// 1-based index of the visible slide
    pub current_slide: usize,
    /// Total number of slides
    pub total_slides: usize,
    /// Whether autoplay is running
    pub auto_play_active: bool,
}

impl PresentationState {
    /// Create a snapshot with autoplay off.
    pub fn new(current_slide: usize, total_slides: usize) -> Self {
        Self {
            current_slide,
            total_slides,
            auto_play_active: false,
        }
    }

    /// Returns `true` when `n` addresses a slide of this deck.
    #[inline]
    pub fn contains(&self, n: usize) -> bool {
        n >= 1 && n <= self.total_slides
    }

    #[inline]
    pub fn is_first(&self) -> bool {
        self.current_slide == 1
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        self.current_slide == self.total_slides
    }

    /// Completion percentage, unrounded.
    pub fn progress_percent(&self) -> f64 {
        if self.total_slides == 0 {
            return 0.0;
        }
        self.current_slide as f64 / self.total_slides as f64 * 100.0
    }

    /// Progress bar width as a CSS length.
    pub fn progress_width(&self) -> String {
        format!("{}%", self.progress_percent())
    }

    /// The "previous" control is disabled on the first slide.
    #[inline]
    pub fn prev_disabled(&self) -> bool {
        self.is_first()
    }

    /// The "next" control is disabled on the last slide.
    #[inline]
    pub fn next_disabled(&self) -> bool {
        self.is_last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_on_first_slide() {
        let state = PresentationState::new(1, 15);
        assert!((state.progress_percent() - 100.0 / 15.0).abs() < 1e-12);
        let width = state.progress_width();
        assert!(width.starts_with("6.66666666666666"));
        assert!(width.ends_with('%'));
    }

    #[test]
    fn progress_is_linear() {
        for n in 1..=15 {
            let state = PresentationState::new(n, 15);
            let expected = n as f64 / 15.0 * 100.0;
            assert_eq!(state.progress_percent(), expected);
            assert_eq!(state.progress_width(), format!("{}%", expected));
        }
    }

    #[test]
    fn button_states() {
        let first = PresentationState::new(1, 15);
        assert!(first.prev_disabled());
        assert!(!first.next_disabled());

        let middle = PresentationState::new(7, 15);
        assert!(!middle.prev_disabled());
        assert!(!middle.next_disabled());

        let last = PresentationState::new(15, 15);
        assert!(!last.prev_disabled());
        assert!(last.next_disabled());
    }

    #[test]
    fn single_slide_deck_disables_both() {
        let state = PresentationState::new(1, 1);
        assert!(state.prev_disabled());
        assert!(state.next_disabled());
        assert_eq!(state.progress_width(), "100%");
    }

    #[test]
    fn contains_bounds() {
        let state = PresentationState::new(1, 15);
        assert!(!state.contains(0));
        assert!(state.contains(1));
        assert!(state.contains(15));
        assert!(!state.contains(16));
    }
}
