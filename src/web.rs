//! Browser backend: host capabilities over `web-sys` and document event wiring.
//!
//! [`WebDeck::attach`] builds a [`PresentationController`] against the
//! current document and registers the keyboard, touch, click and context
//! menu listeners. Listeners are removed when the `WebDeck` is dropped.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use js_sys::{Function, Promise, Reflect};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlButtonElement,
    HtmlElement, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions, TouchEvent, Window,
};

use crate::{
    DeckConfig, DeckElement, Direction, ElementRegistry, HostError, PresentationController,
    Scheduler, TimerHandle, TimerKind, Viewport,
};

/// Descendants whose animation state is reset when a slide is shown.
const ANIMATED_SELECTOR: &str = "[class*=\"animation\"], [style*=\"animation\"]";

const CONTROLS_CSS: &str = "position: fixed; top: 20px; right: 20px; display: flex; gap: 10px; z-index: 1002;";
const CONTROL_BUTTON_CSS: &str = "width: 40px; height: 40px; border: none; border-radius: 50%; background: rgba(255, 255, 255, 0.9); cursor: pointer; font-size: 16px;";

/// Controller wired to the live document.
pub type WebController = PresentationController<DomRegistry, WebScheduler, WebViewport>;

/// A document element.
#[derive(Clone, Debug)]
pub struct DomElement(HtmlElement);

impl DomElement {
    #[inline]
    pub fn element(&self) -> &HtmlElement {
        &self.0
    }
}

impl DeckElement for DomElement {
    fn set_class(&self, class: &str, present: bool) {
        let classes = self.0.class_list();
        let _ = if present {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.0.style().set_property(property, value);
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = self.0.set_attribute("disabled", "");
        } else {
            let _ = self.0.remove_attribute("disabled");
        }
    }

    /// Re-adding an animation class does not restart a running animation, so
    /// each animated descendant is swapped for a deep clone of itself.
    fn restart_animations(&self) {
        let Ok(animated) = self.0.query_selector_all(ANIMATED_SELECTOR) else {
            return;
        };
        for i in 0..animated.length() {
            let Some(node) = animated.get(i) else {
                continue;
            };
            let (Some(parent), Ok(clone)) = (node.parent_node(), node.clone_node_with_deep(true)) else {
                continue;
            };
            let _ = parent.replace_child(&clone, &node);
        }
    }

    fn scroll_into_view(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        self.0.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// Element lookup against a document.
#[derive(Clone, Debug)]
pub struct DomRegistry {
    document: Document,
}

impl DomRegistry {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ElementRegistry for DomRegistry {
    type Element = DomElement;

    fn lookup(&self, id: &str) -> Option<DomElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
    }

    fn by_class(&self, class: &str) -> Vec<DomElement> {
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
            .collect()
    }
}

/// Callback receiving elapsed timers; installed once the controller exists.
type TimerSink = Rc<OnceCell<Box<dyn Fn(TimerHandle)>>>;

/// Window timers (`setInterval` / `setTimeout`).
pub struct WebScheduler {
    window: Window,
    sink: TimerSink,
    next_id: u64,
    /// Live interval callbacks keyed by handle id, with the window timer id
    intervals: HashMap<u64, (i32, Closure<dyn FnMut()>)>,
    /// One-shot timer ids, so they can still be cleared
    timeouts: HashMap<u64, i32>,
    /// Cancelled interval callbacks. A cancel can run inside the callback
    /// being cancelled, so these are dropped on the next `schedule`.
    retired: Vec<Closure<dyn FnMut()>>,
}

impl WebScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            sink: Rc::new(OnceCell::new()),
            next_id: 0,
            intervals: HashMap::new(),
            timeouts: HashMap::new(),
            retired: Vec::new(),
        }
    }
}

impl Scheduler for WebScheduler {
    fn schedule(&mut self, delay_ms: u32, kind: TimerKind) -> TimerHandle {
        self.retired.clear();
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);

        match kind {
            TimerKind::Repeating => {
                let sink = Rc::clone(&self.sink);
                let callback = Closure::<dyn FnMut()>::new(move || {
                    if let Some(fire) = sink.get() {
                        fire(handle);
                    }
                });
                match self.window.set_interval_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref(),
                    timeout,
                ) {
                    Ok(id) => {
                        self.intervals.insert(handle.id(), (id, callback));
                    }
                    Err(err) => warn!(?err, "setInterval failed"),
                }
            }
            TimerKind::Once => {
                let sink = Rc::clone(&self.sink);
                let callback = Closure::once_into_js(move || {
                    if let Some(fire) = sink.get() {
                        fire(handle);
                    }
                });
                match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    timeout,
                ) {
                    Ok(id) => {
                        self.timeouts.insert(handle.id(), id);
                    }
                    Err(err) => warn!(?err, "setTimeout failed"),
                }
            }
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some((id, callback)) = self.intervals.remove(&handle.id()) {
            self.window.clear_interval_with_handle(id);
            self.retired.push(callback);
        }
        if let Some(id) = self.timeouts.remove(&handle.id()) {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

impl Drop for WebScheduler {
    fn drop(&mut self) {
        for (id, _) in self.intervals.values() {
            self.window.clear_interval_with_handle(*id);
        }
    }
}

/// Fullscreen and print through the window and document.
#[derive(Clone, Debug)]
pub struct WebViewport {
    window: Window,
    document: Document,
}

impl WebViewport {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl Viewport for WebViewport {
    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    /// `requestFullscreen` is called through reflection so the returned
    /// promise can be observed; a later rejection is logged, not returned.
    fn request_fullscreen(&mut self) -> Result<(), HostError> {
        let root = self
            .document
            .document_element()
            .ok_or(HostError::Unavailable("document element"))?;
        let request = Reflect::get(&root, &JsValue::from_str("requestFullscreen"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or(HostError::Unavailable("fullscreen"))?;
        let result = request
            .call0(&root)
            .map_err(|err| HostError::FullscreenDenied(js_error_message(&err)))?;

        if let Ok(promise) = result.dyn_into::<Promise>() {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    let err = HostError::FullscreenDenied(js_error_message(&err));
                    warn!(error = %err, "fullscreen request rejected");
                    web_sys::console::log_1(&JsValue::from_str(&err.to_string()));
                }
            });
        }
        Ok(())
    }

    fn exit_fullscreen(&mut self) {
        self.document.exit_fullscreen();
    }

    fn print(&mut self) {
        if let Err(err) = self.window.print() {
            warn!(error = %js_error_message(&err), "print failed");
        }
    }
}

fn js_error_message(err: &JsValue) -> String {
    Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// A slide deck attached to the current document.
///
/// ## Example
///
/// ```rust,ignore
/// use slide_deck_core::{web::WebDeck, DeckConfig};
///
/// let deck = WebDeck::attach(DeckConfig::default())?;
/// deck.toggle_auto_play();
/// // Keep the deck alive for as long as the page should respond to input.
/// std::mem::forget(deck);
/// ```
pub struct WebDeck {
    controller: Rc<RefCell<WebController>>,
    document: Document,
    listeners: Vec<Listener>,
}

impl WebDeck {
    /// Build a controller for the current document and register its input
    /// listeners.
    ///
    /// The initial indicator, progress and button state is rendered right
    /// away, or on `DOMContentLoaded` while the document is still loading.
    pub fn attach(config: DeckConfig) -> Result<Self, String> {
        let window = web_sys::window().ok_or("No window available")?;
        let document = window.document().ok_or("No document available")?;

        let scheduler = WebScheduler::new(window.clone());
        let sink = Rc::clone(&scheduler.sink);
        let controller = PresentationController::new(
            config,
            DomRegistry::new(document.clone()),
            scheduler,
            WebViewport::new(window, document.clone()),
        )
        .map_err(|e| e.to_string())?;
        let controller = Rc::new(RefCell::new(controller));

        let weak = Rc::downgrade(&controller);
        let _ = sink.set(Box::new(move |handle: TimerHandle| {
            with_controller(&weak, |ctrl| {
                ctrl.fire_timer(handle);
            });
        }));

        let mut deck = Self {
            controller,
            document,
            listeners: Vec::new(),
        };

        if deck.document.ready_state() == "loading" {
            deck.listen_document("DOMContentLoaded", false, |ctrl, _| ctrl.init())?;
        } else {
            deck.controller.borrow_mut().init();
        }
        deck.register_input_listeners()?;
        Ok(deck)
    }

    /// The underlying controller.
    pub fn controller(&self) -> Rc<RefCell<WebController>> {
        Rc::clone(&self.controller)
    }

    pub fn go_to_slide(&self, n: usize) {
        self.controller.borrow_mut().go_to_slide(n);
    }

    pub fn change_slide(&self, direction: Direction) {
        self.controller.borrow_mut().change_slide(direction);
    }

    pub fn toggle_auto_play(&self) {
        self.controller.borrow_mut().toggle_auto_play();
    }

    pub fn toggle_fullscreen(&self) {
        self.controller.borrow_mut().toggle_fullscreen();
    }

    pub fn print_presentation(&self) {
        self.controller.borrow_mut().print_presentation();
    }

    /// Add a fixed top-right overlay with fullscreen and print buttons.
    pub fn mount_presentation_controls(&mut self) -> Result<(), String> {
        let body = self.document.body().ok_or("No document body available")?;
        let controls = self.create_html_element("div")?;
        controls.set_class_name("presentation-controls");
        controls.style().set_css_text(CONTROLS_CSS);

        let fullscreen = self.create_control_button("\u{26F6}", "Toggle Fullscreen")?;
        let print = self.create_control_button("\u{1F5A8}", "Print Presentation")?;
        self.listen(fullscreen.clone().into(), "click", false, |ctrl, _| {
            ctrl.toggle_fullscreen()
        })?;
        self.listen(print.clone().into(), "click", false, |ctrl, _| {
            ctrl.print_presentation()
        })?;

        controls
            .append_child(&fullscreen)
            .and_then(|_| controls.append_child(&print))
            .and_then(|_| body.append_child(&controls))
            .map_err(|_| "Failed to mount presentation controls")?;
        Ok(())
    }

    fn create_html_element(&self, tag: &str) -> Result<HtmlElement, String> {
        self.document
            .create_element(tag)
            .map_err(|_| format!("Failed to create {} element", tag))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| format!("Failed to cast {} to HtmlElement", tag))
    }

    fn create_control_button(&self, label: &str, title: &str) -> Result<HtmlElement, String> {
        let button = self.create_html_element("button")?;
        button.set_text_content(Some(label));
        button.set_title(title);
        button.style().set_css_text(CONTROL_BUTTON_CSS);
        Ok(button)
    }

    fn register_input_listeners(&mut self) -> Result<(), String> {
        self.listen_document("keydown", false, |ctrl, event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if ctrl.handle_key(&event.key()) {
                event.prevent_default();
            }
        })?;

        self.listen_document("touchstart", false, |ctrl, event| {
            let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|e| e.touches().get(0))
            else {
                return;
            };
            ctrl.touch_start(touch.client_x() as f64, touch.client_y() as f64);
        })?;

        // Registered non-passive so the default scroll can be cancelled.
        self.listen_document("touchmove", true, |ctrl, event| {
            if ctrl.touch_move() {
                event.prevent_default();
            }
        })?;

        self.listen_document("touchend", false, |ctrl, event| {
            let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|e| e.changed_touches().get(0))
            else {
                return;
            };
            ctrl.touch_end(touch.client_x() as f64, touch.client_y() as f64);
        })?;

        self.listen_document("click", false, |ctrl, event| {
            let Some(anchor) = event_target_element(event) else {
                return;
            };
            if !anchor.matches("a[href^=\"#\"]").unwrap_or(false) {
                return;
            }
            let href = anchor.get_attribute("href").unwrap_or_default();
            if ctrl.handle_anchor_click(&href) {
                event.prevent_default();
            }
        })?;

        let slide_selector = format!(".{}", self.controller.borrow().config().elements.slide_class);
        self.listen_document("contextmenu", false, move |ctrl, event| {
            let inside_slide = event_target_element(event)
                .and_then(|target| target.closest(&slide_selector).ok().flatten())
                .is_some();
            if ctrl.suppress_context_menu(inside_slide) {
                event.prevent_default();
            }
        })?;

        Ok(())
    }

    fn listen_document<F>(&mut self, event: &'static str, non_passive: bool, handler: F) -> Result<(), String>
    where
        F: FnMut(&mut WebController, &Event) + 'static,
    {
        let target: EventTarget = self.document.clone().into();
        self.listen(target, event, non_passive, handler)
    }

    fn listen<F>(&mut self, target: EventTarget, event: &'static str, non_passive: bool, mut handler: F) -> Result<(), String>
    where
        F: FnMut(&mut WebController, &Event) + 'static,
    {
        let weak = Rc::downgrade(&self.controller);
        let callback = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            with_controller(&weak, |ctrl| handler(ctrl, &e));
        });

        let registered = if non_passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
        } else {
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        };
        registered.map_err(|_| format!("Failed to add {} listener", event))?;

        self.listeners.push(Listener {
            target,
            event,
            callback,
        });
        Ok(())
    }
}

impl Drop for WebDeck {
    fn drop(&mut self) {
        for listener in &self.listeners {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        if let Ok(mut ctrl) = self.controller.try_borrow_mut() {
            if ctrl.is_auto_playing() {
                ctrl.toggle_auto_play();
            }
        }
    }
}

/// Run `f` on the controller if it is still alive and not already borrowed.
fn with_controller(weak: &Weak<RefCell<WebController>>, f: impl FnOnce(&mut WebController)) {
    let Some(controller) = weak.upgrade() else {
        return;
    };
    let Ok(mut ctrl) = controller.try_borrow_mut() else {
        return;
    };
    f(&mut ctrl);
}

fn event_target_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}
