//! Presentation controller: navigation, state refresh and playback utilities.

use tracing::{debug, warn};

use crate::input::{anchor_target, Direction, KeyCommand, SwipeDetector};
use crate::print::{apply_print_layout, restore_screen_layout};
use crate::{
    ConfigError, DeckConfig, DeckElement, ElementRegistry, PresentationState, Scheduler,
    TimerHandle, TimerKind, Viewport,
};

/// Platform-agnostic slide deck controller.
///
/// Owns the slide position and autoplay state and drives the host through
/// the injected [`ElementRegistry`], [`Scheduler`] and [`Viewport`]. Timing
/// is delegated to the host: when a scheduled timer elapses, the host calls
/// [`fire_timer`](Self::fire_timer) with its handle.
///
/// Navigation requests outside `1..=total_slides` and missing host elements
/// are silently ignored.
#[derive(Debug)]
pub struct PresentationController<R, S, V> {
    config: DeckConfig,
    /// 1-based index of the visible slide
    current_slide: usize,
    /// Pending autoplay timer; present exactly while autoplay is on
    auto_play: Option<TimerHandle>,
    swipe: SwipeDetector,
    /// Print restore timers and the slide that was visible when each print started
    pending_restores: Vec<(TimerHandle, usize)>,
    registry: R,
    scheduler: S,
    viewport: V,
}

impl<R, S, V> PresentationController<R, S, V>
where
    R: ElementRegistry,
    S: Scheduler,
    V: Viewport,
{
    /// Create a controller positioned on the first slide.
    ///
    /// Does not touch the host; call [`init`](Self::init) once the document
    /// is ready.
    pub fn new(config: DeckConfig, registry: R, scheduler: S, viewport: V) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            swipe: SwipeDetector::new(config.swipe_threshold),
            config,
            current_slide: 1,
            auto_play: None,
            pending_restores: Vec::new(),
            registry,
            scheduler,
            viewport,
        })
    }

    /// Render the initial indicator, progress and button state.
    pub fn init(&mut self) {
        self.update_slide_indicator();
        self.update_progress();
        self.update_nav_buttons();
    }

    #[inline]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    #[inline]
    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    #[inline]
    pub fn total_slides(&self) -> usize {
        self.config.total_slides
    }

    #[inline]
    pub fn is_auto_playing(&self) -> bool {
        self.auto_play.is_some()
    }

    /// Snapshot of the current position and autoplay flag.
    pub fn state(&self) -> PresentationState {
        PresentationState {
            current_slide: self.current_slide,
            total_slides: self.config.total_slides,
            auto_play_active: self.is_auto_playing(),
        }
    }

    #[inline]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    #[inline]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[inline]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Step one slide back or forward. No-op at the deck edges.
    pub fn change_slide(&mut self, direction: Direction) {
        let Some(target) = self.current_slide.checked_add_signed(direction.offset()) else {
            return;
        };
        if self.state().contains(target) {
            self.go_to_slide(target);
        }
    }

    /// Show slide `n` (1-based). No-op when `n` is out of range.
    ///
    /// Re-requesting the current slide is allowed and replays its entrance
    /// animations.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// controller.go_to_slide(4);
    /// assert_eq!(controller.current_slide(), 4);
    /// controller.go_to_slide(99); // ignored
    /// assert_eq!(controller.current_slide(), 4);
    /// ```
    pub fn go_to_slide(&mut self, n: usize) {
        if !self.state().contains(n) {
            debug!(slide = n, total = self.config.total_slides, "ignoring out of range slide");
            return;
        }

        if let Some(old) = self.slide_element(self.current_slide) {
            old.set_class(&self.config.elements.active_class, false);
        }

        self.current_slide = n;
        if let Some(new) = self.slide_element(n) {
            new.set_class(&self.config.elements.active_class, true);
        }
        debug!(slide = n, "slide changed");

        self.update_slide_indicator();
        self.update_progress();
        self.update_nav_buttons();
        self.trigger_slide_animations();
    }

    fn slide_element(&self, n: usize) -> Option<R::Element> {
        self.registry.lookup(&self.config.slide_id(n))
    }

    /// Write the current slide number and slide count labels.
    pub fn update_slide_indicator(&self) {
        let ids = &self.config.elements;
        if let Some(label) = self.registry.lookup(&ids.slide_number) {
            label.set_text(&self.current_slide.to_string());
        }
        if let Some(label) = self.registry.lookup(&ids.total_slides) {
            label.set_text(&self.config.total_slides.to_string());
        }
    }

    /// Set the progress bar width to the completion percentage.
    pub fn update_progress(&self) {
        if let Some(bar) = self.registry.lookup(&self.config.elements.progress) {
            bar.set_style("width", &self.state().progress_width());
        }
    }

    /// Disable "previous" on the first slide and "next" on the last.
    pub fn update_nav_buttons(&self) {
        let state = self.state();
        let ids = &self.config.elements;
        if let Some(prev) = self.registry.lookup(&ids.prev_button) {
            prev.set_disabled(state.prev_disabled());
        }
        if let Some(next) = self.registry.lookup(&ids.next_button) {
            next.set_disabled(state.next_disabled());
        }
    }

    /// Restart the entrance animations of the current slide.
    pub fn trigger_slide_animations(&self) {
        if let Some(slide) = self.slide_element(self.current_slide) {
            slide.restart_animations();
        }
    }

    /// Handle a key press by its DOM key name.
    ///
    /// Returns `true` when the host should suppress the key's default action.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let Some(command) = KeyCommand::from_key(key) else {
            return false;
        };
        match command {
            KeyCommand::Previous => self.change_slide(Direction::Previous),
            KeyCommand::Next => self.change_slide(Direction::Next),
            KeyCommand::First => self.go_to_slide(1),
            KeyCommand::Last => self.go_to_slide(self.config.total_slides),
        }
        command.prevents_default()
    }

    /// Record the start of a touch gesture.
    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.swipe.start(x, y);
    }

    /// Touch moves never scroll the page; always returns `true`.
    #[inline]
    pub fn touch_move(&self) -> bool {
        true
    }

    /// Finish a touch gesture, navigating on a horizontal swipe.
    pub fn touch_end(&mut self, x: f64, y: f64) {
        if let Some(direction) = self.swipe.end(x, y) {
            debug!(?direction, "swipe");
            self.change_slide(direction);
        }
    }

    /// Handle a click on a link with the given `href`.
    ///
    /// In-page anchors scroll their target into view. Returns `true` when the
    /// host should cancel the link's own navigation.
    pub fn handle_anchor_click(&self, href: &str) -> bool {
        if !href.starts_with('#') {
            return false;
        }
        if let Some(target) = anchor_target(href).and_then(|id| self.registry.lookup(id)) {
            target.scroll_into_view();
        }
        true
    }

    /// Context menus are suppressed anywhere inside a slide.
    #[inline]
    pub fn suppress_context_menu(&self, inside_slide: bool) -> bool {
        inside_slide
    }

    /// Start or stop automatic advancement.
    ///
    /// Autoplay stops by itself once the last slide has been shown for a
    /// full interval; it never wraps around.
    pub fn toggle_auto_play(&mut self) {
        match self.auto_play.take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                debug!("autoplay stopped");
            }
            None => {
                let interval = self.config.autoplay_interval_ms;
                self.auto_play = Some(self.scheduler.schedule(interval, TimerKind::Repeating));
                debug!(interval_ms = interval, "autoplay started");
            }
        }
    }

    fn auto_play_tick(&mut self) {
        if self.current_slide < self.config.total_slides {
            self.change_slide(Direction::Next);
        } else if let Some(handle) = self.auto_play.take() {
            self.scheduler.cancel(handle);
            debug!("autoplay reached last slide");
        }
    }

    /// Deliver an elapsed host timer.
    ///
    /// Returns `false` for handles this controller no longer owns, such as a
    /// cancelled autoplay timer whose callback was already queued.
    pub fn fire_timer(&mut self, handle: TimerHandle) -> bool {
        if self.auto_play == Some(handle) {
            self.auto_play_tick();
            return true;
        }
        if let Some(idx) = self.pending_restores.iter().position(|(h, _)| *h == handle) {
            let (_, visible_slide) = self.pending_restores.remove(idx);
            self.restore_after_print(visible_slide);
            return true;
        }
        false
    }

    /// Enter fullscreen, or leave it when already fullscreen.
    ///
    /// A refused request is logged and otherwise ignored.
    pub fn toggle_fullscreen(&mut self) {
        if self.viewport.is_fullscreen() {
            self.viewport.exit_fullscreen();
            return;
        }
        if let Err(err) = self.viewport.request_fullscreen() {
            warn!(error = %err, "fullscreen request failed");
        }
    }

    /// Lay every slide out for printing, open the print flow and schedule
    /// the on-screen layout to come back after the restore delay.
    ///
    /// The restore is timed, not tied to the print flow finishing.
    pub fn print_presentation(&mut self) {
        for slide in self.registry.by_class(&self.config.elements.slide_class) {
            apply_print_layout(&slide);
        }

        self.viewport.print();

        let handle = self
            .scheduler
            .schedule(self.config.print_restore_delay_ms, TimerKind::Once);
        self.pending_restores.push((handle, self.current_slide));
    }

    fn restore_after_print(&self, visible_slide: usize) {
        let slides = self.registry.by_class(&self.config.elements.slide_class);
        debug!(count = slides.len(), visible_slide, "restoring slides after print");
        for (index, slide) in slides.iter().enumerate() {
            restore_screen_layout(slide, index + 1 == visible_slide);
        }
    }
}
