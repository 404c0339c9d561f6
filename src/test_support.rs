//! Recording fake host used by unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::{DeckElement, ElementRegistry, HostError, Scheduler, TimerHandle, TimerKind, Viewport};

#[derive(Debug, Default)]
pub struct ElementState {
    pub classes: BTreeSet<String>,
    pub text: Option<String>,
    pub styles: BTreeMap<String, String>,
    pub disabled: Option<bool>,
    pub animation_restarts: usize,
    pub scrolled: usize,
}

/// Shared handle into a fake element.
#[derive(Clone, Debug)]
pub struct FakeElement {
    pub id: String,
    state: Rc<RefCell<ElementState>>,
    log: Rc<RefCell<Vec<String>>>,
}

impl FakeElement {
    pub fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.contains(class)
    }

    pub fn text(&self) -> Option<String> {
        self.state.borrow().text.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.state.borrow().styles.get(property).cloned()
    }

    pub fn disabled(&self) -> Option<bool> {
        self.state.borrow().disabled
    }

    pub fn animation_restarts(&self) -> usize {
        self.state.borrow().animation_restarts
    }

    pub fn scrolled(&self) -> usize {
        self.state.borrow().scrolled
    }

    fn record(&self, op: &str) {
        self.log.borrow_mut().push(format!("{}:{}", op, self.id));
    }
}

impl DeckElement for FakeElement {
    fn set_class(&self, class: &str, present: bool) {
        let mut state = self.state.borrow_mut();
        if present {
            state.classes.insert(class.to_string());
            self.record("activate");
        } else {
            state.classes.remove(class);
            self.record("deactivate");
        }
    }

    fn set_text(&self, text: &str) {
        self.state.borrow_mut().text = Some(text.to_string());
        self.record("text");
    }

    fn set_style(&self, property: &str, value: &str) {
        self.state
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
        self.record("style");
    }

    fn set_disabled(&self, disabled: bool) {
        self.state.borrow_mut().disabled = Some(disabled);
        self.record("disabled");
    }

    fn restart_animations(&self) {
        self.state.borrow_mut().animation_restarts += 1;
        self.record("animate");
    }

    fn scroll_into_view(&self) {
        self.state.borrow_mut().scrolled += 1;
        self.record("scroll");
    }
}

/// In-memory element tree keyed by id, with class membership.
#[derive(Clone, Debug, Default)]
pub struct FakeRegistry {
    elements: Vec<(FakeElement, Vec<String>)>,
    pub log: Rc<RefCell<Vec<String>>>,
}

impl FakeRegistry {
    /// Slides `1..=count` carrying the `slide` class, without deck chrome.
    pub fn with_slides(count: usize, prefix: &str) -> Self {
        let mut registry = Self::default();
        for n in 1..=count {
            registry.insert(&format!("{}{}", prefix, n), &["slide"]);
        }
        registry
    }

    /// Slides plus indicator labels, progress bar and nav buttons.
    pub fn full_deck(count: usize) -> Self {
        let mut registry = Self::with_slides(count, "slide-");
        for id in ["slideNumber", "totalSlides", "progress", "prevBtn", "nextBtn"] {
            registry.insert(id, &[]);
        }
        registry
    }

    pub fn insert(&mut self, id: &str, classes: &[&str]) -> FakeElement {
        let element = FakeElement {
            id: id.to_string(),
            state: Rc::default(),
            log: Rc::clone(&self.log),
        };
        self.elements.push((
            element.clone(),
            classes.iter().map(|c| c.to_string()).collect(),
        ));
        element
    }

    pub fn remove(&mut self, id: &str) {
        self.elements.retain(|(e, _)| e.id != id);
    }

    pub fn get(&self, id: &str) -> FakeElement {
        self.lookup(id).unwrap_or_else(|| panic!("no element {}", id))
    }

    pub fn take_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

impl ElementRegistry for FakeRegistry {
    type Element = FakeElement;

    fn lookup(&self, id: &str) -> Option<FakeElement> {
        self.elements
            .iter()
            .find(|(e, _)| e.id == id)
            .map(|(e, _)| e.clone())
    }

    fn by_class(&self, class: &str) -> Vec<FakeElement> {
        self.elements
            .iter()
            .filter(|(_, classes)| classes.iter().any(|c| c == class))
            .map(|(e, _)| e.clone())
            .collect()
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    handle: TimerHandle,
    due: u64,
    interval: u32,
    kind: TimerKind,
}

/// Manually advanced clock.
///
/// `advance` returns the handles that came due, in firing order; the test
/// feeds them to the controller.
#[derive(Debug, Default)]
pub struct FakeScheduler {
    now: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
    pub cancelled: Vec<TimerHandle>,
}

impl FakeScheduler {
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward by `ms`, returning due timers.
    ///
    /// Repeating timers fire once per elapsed interval.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerHandle> {
        let target = self.now + ms;
        let mut fired = Vec::new();
        loop {
            let Some(idx) = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= target)
                .min_by_key(|(_, t)| t.due)
                .map(|(i, _)| i)
            else {
                break;
            };
            let timer = self.pending[idx];
            self.now = timer.due;
            fired.push(timer.handle);
            match timer.kind {
                TimerKind::Once => {
                    self.pending.remove(idx);
                }
                TimerKind::Repeating => {
                    self.pending[idx].due += timer.interval as u64;
                }
            }
        }
        self.now = target;
        fired
    }
}

impl Scheduler for FakeScheduler {
    fn schedule(&mut self, delay_ms: u32, kind: TimerKind) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.pending.push(PendingTimer {
            handle,
            due: self.now + delay_ms as u64,
            interval: delay_ms,
            kind,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|t| t.handle != handle);
        self.cancelled.push(handle);
    }
}

#[derive(Debug, Default)]
pub struct FakeViewport {
    pub fullscreen: bool,
    pub deny_fullscreen: bool,
    pub fullscreen_requests: usize,
    pub prints: usize,
}

impl Viewport for FakeViewport {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), HostError> {
        self.fullscreen_requests += 1;
        if self.deny_fullscreen {
            return Err(HostError::FullscreenDenied("permission denied".into()));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) {
        self.fullscreen = false;
    }

    fn print(&mut self) {
        self.prints += 1;
    }
}
