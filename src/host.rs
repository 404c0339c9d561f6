//! Host capabilities the controller is wired to.
//!
//! The controller never touches a document directly. Element lookup,
//! timers, fullscreen and printing are injected through these traits so the
//! same navigation logic drives a browser page (see the `web` feature) or a
//! recording fake in tests.

/// A host element the controller can mutate.
///
/// Implementations are cheap handles (a DOM node reference, an index into a
/// fake tree); methods take `&self` because the element is owned by the host.
pub trait DeckElement {
    /// Add (`present == true`) or remove a class name.
    fn set_class(&self, class: &str, present: bool);

    /// Replace the element's text content.
    fn set_text(&self, text: &str);

    /// Set an inline style property (`"width"`, `"page-break-after"`, ...).
    fn set_style(&self, property: &str, value: &str);

    /// Set the disabled state of a control.
    fn set_disabled(&self, disabled: bool);

    /// Restart every entrance animation and transition inside this element.
    fn restart_animations(&self);

    /// Smoothly scroll the element into view.
    fn scroll_into_view(&self);
}

/// Lookup of host elements by identifier or class name.
///
/// Missing elements are not errors: callers skip them.
pub trait ElementRegistry {
    type Element: DeckElement;

    /// Find the element with the given identifier.
    fn lookup(&self, id: &str) -> Option<Self::Element>;

    /// All elements carrying `class`, in document order.
    fn by_class(&self, class: &str) -> Vec<Self::Element>;
}

/// Opaque handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wrap a host timer id.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The host timer id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Whether a timer fires once or keeps firing at its interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    Once,
    Repeating,
}

/// Host timer service.
///
/// When a timer elapses the host calls
/// [`PresentationController::fire_timer`](crate::PresentationController::fire_timer)
/// with the handle returned here.
pub trait Scheduler {
    /// Arm a timer firing after `delay_ms` (and every `delay_ms` thereafter
    /// for [`TimerKind::Repeating`]).
    fn schedule(&mut self, delay_ms: u32, kind: TimerKind) -> TimerHandle;

    /// Cancel a pending timer. Unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Host presentation surface: fullscreen mode and the print flow.
pub trait Viewport {
    /// Returns `true` while the document is shown fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Ask the host to enter fullscreen.
    fn request_fullscreen(&mut self) -> Result<(), HostError>;

    /// Leave fullscreen.
    fn exit_fullscreen(&mut self);

    /// Open the host print flow. Returns once the flow has been started.
    fn print(&mut self);
}

/// Failure reported by a host capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host refused to enter fullscreen
    FullscreenDenied(String),
    /// The capability does not exist in this host
    Unavailable(&'static str),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::FullscreenDenied(reason) => {
                write!(f, "Error attempting to enable fullscreen: {}", reason)
            }
            HostError::Unavailable(capability) => {
                write!(f, "Host capability unavailable: {}", capability)
            }
        }
    }
}

impl std::error::Error for HostError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_error_messages() {
        let err = HostError::FullscreenDenied("permission denied".into());
        assert_eq!(
            err.to_string(),
            "Error attempting to enable fullscreen: permission denied"
        );
        assert_eq!(
            HostError::Unavailable("print").to_string(),
            "Host capability unavailable: print"
        );
    }
}
