//! Normalization of keyboard, touch and link input into navigation commands.

/// Navigation step direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Signed slide offset for this direction.
    #[inline]
    pub fn offset(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Navigation command bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    /// Left / Up
    Previous,
    /// Right / Down / Space
    Next,
    /// Home
    First,
    /// End
    Last,
}

impl KeyCommand {
    /// Map a DOM `KeyboardEvent.key` value to a command.
    ///
    /// ```rust
    /// use slide_deck_core::KeyCommand;
    ///
    /// assert_eq!(KeyCommand::from_key(" "), Some(KeyCommand::Next));
    /// assert_eq!(KeyCommand::from_key("Home"), Some(KeyCommand::First));
    /// assert_eq!(KeyCommand::from_key("Escape"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "ArrowUp" => Some(KeyCommand::Previous),
            "ArrowRight" | "ArrowDown" | " " => Some(KeyCommand::Next),
            "Home" => Some(KeyCommand::First),
            "End" => Some(KeyCommand::Last),
            _ => None,
        }
    }

    /// Whether the host's default action should be suppressed.
    ///
    /// Forward keys would otherwise scroll the page (Space in particular).
    #[inline]
    pub fn prevents_default(self) -> bool {
        self == KeyCommand::Next
    }
}

/// Horizontal swipe recognizer.
///
/// Records the touch-start point and classifies the gesture on touch-end.
/// A gesture counts when its horizontal travel exceeds its vertical travel
/// and the threshold. Dragging the finger left advances the deck.
///
/// ## Example
///
/// ```rust
/// use slide_deck_core::{Direction, SwipeDetector};
///
/// let mut swipe = SwipeDetector::new(50.0);
/// swipe.start(200.0, 100.0);
/// assert_eq!(swipe.end(140.0, 105.0), Some(Direction::Next));
/// assert!(!swipe.is_tracking());
/// ```
#[derive(Clone, Debug)]
pub struct SwipeDetector {
    threshold: f64,
    start: Option<(f64, f64)>,
}

impl SwipeDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    /// Record the starting touch point.
    pub fn start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Returns `true` between a touch-start and the following touch-end.
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Finish the gesture at the given point.
    ///
    /// The start point is cleared whether or not a swipe was recognized.
    /// Without a recorded start this returns `None`.
    pub fn end(&mut self, x: f64, y: f64) -> Option<Direction> {
        let (start_x, start_y) = self.start.take()?;
        Self::classify(x - start_x, y - start_y, self.threshold)
    }

    /// Classify a displacement (end minus start).
    pub fn classify(dx: f64, dy: f64, threshold: f64) -> Option<Direction> {
        if dx.abs() <= dy.abs() || dx.abs() <= threshold {
            return None;
        }
        if dx < 0.0 {
            Some(Direction::Next)
        } else {
            Some(Direction::Previous)
        }
    }
}

/// Identifier targeted by an in-page anchor `href`.
///
/// Returns `None` for links leaving the page and for a bare `#`.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
