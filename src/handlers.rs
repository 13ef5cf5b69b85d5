use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::Array;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollToOptions, Window,
};

use crate::config::*;
use crate::error::{js_detail, BehaviorError};
use crate::follower::Follower;
use crate::logging::{log_event, LogLevel};
use crate::motion::{self, Bounds, FrameGate, Point};
use crate::raf::{request_frame_once, RafLoop};
use crate::reveal::{self, ObserverSpec, TitleFlicker, Trigger, ONCE_MARKER};
use crate::shortcuts::{self, FocusKind, KeyPress};
use crate::theme::{self, DocumentThemeHost};
use crate::typewriter::{self, Keystroke};

const RIPPLE_STYLE_ID: &str = "ripple-styles";
const RIPPLE_STYLES: &str = "
  .btn {
    position: relative;
    overflow: hidden;
  }

  .ripple {
    position: absolute;
    border-radius: 50%;
    background: rgba(255, 255, 255, 0.4);
    transform: scale(0);
    animation: rippleAnimation 0.6s linear;
    pointer-events: none;
  }

  @keyframes rippleAnimation {
    to {
      transform: scale(4);
      opacity: 0;
    }
  }
";

/// Everything one page view needs, captured once at startup.
#[derive(Clone)]
pub struct Page {
    window: Window,
    document: Document,
    root: HtmlElement,
    config: RuntimeConfig,
    reduced_motion: bool,
}

impl Page {
    pub fn current() -> Result<Self, BehaviorError> {
        let window = web_sys::window().ok_or(BehaviorError::MissingWindow)?;
        let document = window.document().ok_or(BehaviorError::MissingDocument)?;
        let root = document
            .document_element()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or(BehaviorError::MissingDocument)?;
        let config = RuntimeConfig::from_lookup(|name| root.get_attribute(name));
        let reduced_motion = prefers_reduced_motion(&window);

        Ok(Self {
            window,
            document,
            root,
            config,
            reduced_motion,
        })
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(1280.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(720.0)
    }

    fn by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        collect_html(self.document.query_selector_all(selector))
    }
}

fn collect_html(list: Result<NodeList, JsValue>) -> Vec<HtmlElement> {
    let Ok(list) = list else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn bounds_of(element: &Element) -> Bounds {
    let rect = element.get_bounding_client_rect();
    Bounds {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

fn pointer_of(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn smooth_scroll_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Disconnects its observer when dropped.
pub struct ObserverHandle {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observe(
    spec: ObserverSpec,
    targets: &[HtmlElement],
    mut on_enter: impl FnMut(&Element) + 'static,
) -> Result<ObserverHandle, BehaviorError> {
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let target = entry.target();

            if !spec.should_apply(entry.is_intersecting(), |name| target.has_attribute(name)) {
                continue;
            }

            on_enter(&target);

            if spec.trigger == Trigger::Once {
                let _ = target.set_attribute(ONCE_MARKER, "");
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(spec.threshold));
    if let Some(root_margin) = spec.root_margin {
        init.set_root_margin(root_margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|err| BehaviorError::dom("IntersectionObserver::new", js_detail(&err)))?;

    for target in targets {
        observer.observe(target);
    }

    Ok(ObserverHandle {
        observer,
        _callback: callback,
    })
}

/// Cancels the pending typewriter chain when dropped.
pub struct TypewriterHandle {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for TypewriterHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

/// Handles for every attached behavior; dropping it detaches them all.
pub struct Installed {
    listeners: Vec<EventListener>,
    observers: Vec<ObserverHandle>,
    follower: Option<RafLoop>,
    typewriter: Option<TypewriterHandle>,
    config: RuntimeConfig,
}

impl Drop for Installed {
    fn drop(&mut self) {
        log_event(
            &self.config,
            LogLevel::Debug,
            "behaviors.torn_down",
            json!({
                "listeners": self.listeners.len(),
                "observers": self.observers.len(),
                "follower": self.follower.as_ref().map(RafLoop::is_running).unwrap_or(false),
            }),
        );
    }
}

impl Installed {
    fn keep<T>(&self, behavior: &str, result: Result<T, BehaviorError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log_event(
                    &self.config,
                    LogLevel::Warn,
                    "behaviors.install_failed",
                    json!({ "behavior": behavior, "error": err.to_string() }),
                );
                None
            }
        }
    }
}

pub fn install(page: &Page) -> Installed {
    let mut installed = Installed {
        listeners: Vec::new(),
        observers: Vec::new(),
        follower: None,
        typewriter: None,
        config: page.config,
    };

    installed.listeners.extend(scroll_progress(page));
    let anchors = anchor_navigation(page);
    let anchor_count = anchors.len();
    installed.listeners.extend(anchors);

    let reveal_targets = page.query_all(REVEAL_SELECTOR);
    if let Some(handle) = installed.keep("reveal", reveal_on_scroll(&reveal_targets)) {
        installed.observers.push(handle);
    }

    let section_targets: Vec<HtmlElement> = page
        .query_all(SECTION_SELECTOR)
        .into_iter()
        .filter(|section| section.id() != HERO_SECTION_ID)
        .collect();
    if let Some(handle) = installed.keep("section_fade", section_fade(&section_targets)) {
        installed.observers.push(handle);
    }

    let doodles = page.query_all(DOODLE_SELECTOR);
    installed.listeners.push(parallax(page, doodles.clone()));

    let cards = page.query_all(CARD_SELECTOR);
    installed.listeners.extend(card_tilt(&cards));

    let buttons = page.query_all(BUTTON_SELECTOR);
    inject_ripple_styles(page);
    installed.listeners.extend(button_ripple(page, &buttons));

    installed.listeners.push(title_flicker(page));
    installed.listeners.push(keyboard_shortcuts(page));

    let diagrams = page.query_all(DIAGRAM_SELECTOR);
    if let Some(handle) = installed.keep("diagram_stagger", diagram_stagger(&diagrams)) {
        installed.observers.push(handle);
    }

    installed.typewriter = typewriter(page);

    let magnetic = magnetic_buttons(page, &buttons);
    let magnetic_active = !magnetic.is_empty();
    installed.listeners.extend(magnetic);

    installed.listeners.extend(theme_toggle(page));

    if let Some((listener, raf)) = cursor_follower(page) {
        installed.listeners.push(listener);
        raf.tick();
        if installed.keep("cursor_follower", raf.start()).is_some() {
            installed.follower = Some(raf);
        }
    }

    reduce_motion(page, &doodles);

    log_event(
        &page.config,
        LogLevel::Info,
        "behaviors.installed",
        json!({
            "anchors": anchor_count,
            "reveal": reveal_targets.len(),
            "sections": section_targets.len(),
            "doodles": doodles.len(),
            "cards": cards.len(),
            "buttons": buttons.len(),
            "diagrams": diagrams.len(),
            "typewriter": installed.typewriter.is_some(),
            "magnetic": magnetic_active,
            "follower": installed.follower.is_some(),
            "reduced_motion": page.reduced_motion,
        }),
    );

    installed
}

fn scroll_progress(page: &Page) -> Option<EventListener> {
    let indicator = page.by_id(SCROLL_INDICATOR_ID)?;
    let window = page.window.clone();
    let page = page.clone();

    Some(EventListener::new(&window, "scroll", move |_| {
        let document_height = f64::from(page.root.scroll_height());
        let percent =
            motion::progress_percent(page.scroll_y(), document_height, page.viewport_height());
        set_style(&indicator, "width", &format!("{percent}%"));
    }))
}

fn anchor_navigation(page: &Page) -> Vec<EventListener> {
    page.query_all(ANCHOR_SELECTOR)
        .into_iter()
        .map(|anchor| {
            let page = page.clone();
            let target = anchor.clone();
            EventListener::new_with_options(
                &target,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let Some(href) = anchor.get_attribute("href") else {
                        return;
                    };
                    let Some(element) = page.query(&href) else {
                        return;
                    };

                    let top = element.get_bounding_client_rect().top();
                    let options = ScrollToOptions::new();
                    options.set_top(motion::anchor_scroll_target(top, page.scroll_y()));
                    options.set_behavior(ScrollBehavior::Smooth);
                    page.window.scroll_to_with_scroll_to_options(&options);
                },
            )
        })
        .collect()
}

fn reveal_on_scroll(targets: &[HtmlElement]) -> Result<ObserverHandle, BehaviorError> {
    observe(reveal::REVEAL, targets, |target| {
        let _ = target.class_list().add_1(VISIBLE_CLASS);
    })
}

fn section_fade(targets: &[HtmlElement]) -> Result<ObserverHandle, BehaviorError> {
    observe(reveal::SECTION_FADE, targets, |target| {
        if let Some(section) = target.dyn_ref::<HtmlElement>() {
            set_style(section, "opacity", "1");
        }
    })
}

fn parallax(page: &Page, doodles: Vec<HtmlElement>) -> EventListener {
    let window = page.window.clone();
    let page = page.clone();
    let doodles = Rc::new(doodles);
    let gate = Rc::new(FrameGate::default());

    EventListener::new(&window, "scroll", move |_| {
        if !gate.request() {
            return;
        }

        let page = page.clone();
        let doodles = Rc::clone(&doodles);
        let frame_gate = Rc::clone(&gate);
        let scheduled = request_frame_once(move || {
            let scroll_y = page.scroll_y();
            for (index, doodle) in doodles.iter().enumerate() {
                let pose = motion::parallax_pose(scroll_y, index);
                set_style(doodle, "transform", &pose.transform());
            }
            frame_gate.complete();
        });

        if scheduled.is_err() {
            gate.complete();
        }
    })
}

fn card_tilt(cards: &[HtmlElement]) -> Vec<EventListener> {
    cards
        .iter()
        .flat_map(|card| {
            let on_move = {
                let card = card.clone();
                EventListener::new(&card.clone(), "mousemove", move |event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let transform = motion::tilt_transform(pointer_of(event), bounds_of(&card));
                    set_style(&card, "transform", &transform);
                })
            };
            let on_leave = {
                let card = card.clone();
                EventListener::new(&card.clone(), "mouseleave", move |_| {
                    set_style(&card, "transform", motion::TILT_RESET);
                })
            };
            [on_move, on_leave]
        })
        .collect()
}

fn inject_ripple_styles(page: &Page) {
    if page.document.get_element_by_id(RIPPLE_STYLE_ID).is_some() {
        return;
    }
    let Some(head) = page.document.head() else {
        return;
    };
    let Ok(style) = page.document.create_element("style") else {
        return;
    };

    style.set_id(RIPPLE_STYLE_ID);
    style.set_text_content(Some(RIPPLE_STYLES));
    let _ = head.append_child(&style);
}

fn button_ripple(page: &Page, buttons: &[HtmlElement]) -> Vec<EventListener> {
    buttons
        .iter()
        .map(|button| {
            let document = page.document.clone();
            let host = button.clone();
            EventListener::new(&button.clone(), "click", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(ripple) = document
                    .create_element("span")
                    .ok()
                    .and_then(|element| element.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };

                let origin = motion::ripple_origin(pointer_of(event), bounds_of(&host));
                ripple.set_class_name(RIPPLE_CLASS);
                set_style(&ripple, "left", &format!("{}px", origin.x));
                set_style(&ripple, "top", &format!("{}px", origin.y));

                if host.append_child(&ripple).is_err() {
                    return;
                }
                Timeout::new(RIPPLE_LIFETIME_MS, move || ripple.remove()).forget();
            })
        })
        .collect()
}

fn title_flicker(page: &Page) -> EventListener {
    let document = page.document.clone();
    let flicker = TitleFlicker::new(document.title(), HIDDEN_TITLE);

    EventListener::new(&page.document, "visibilitychange", move |_| {
        document.set_title(flicker.title_for(document.hidden()));
    })
}

fn focused_kind(document: &Document) -> FocusKind {
    let Some(active) = document.active_element() else {
        return FocusKind::Nothing;
    };
    let editable = active
        .dyn_ref::<HtmlElement>()
        .map(|element| element.is_content_editable())
        .unwrap_or(false);

    FocusKind::classify(&active.tag_name(), editable)
}

fn keyboard_shortcuts(page: &Page) -> EventListener {
    let document = page.document.clone();
    let page = page.clone();

    EventListener::new(&document, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let press = KeyPress {
            key: event.key(),
            ctrl: event.ctrl_key(),
            meta: event.meta_key(),
        };

        let Some(section) = shortcuts::resolve(&press, focused_kind(&page.document)) else {
            return;
        };
        if let Some(target) = page.query(section.selector()) {
            smooth_scroll_into_view(&target);
        }
    })
}

fn diagram_stagger(diagrams: &[HtmlElement]) -> Result<ObserverHandle, BehaviorError> {
    observe(reveal::DIAGRAM_STAGGER, diagrams, |diagram| {
        let _ = diagram.class_list().add_1(VISIBLE_CLASS);

        let steps = collect_html(diagram.query_selector_all(DIAGRAM_STEP_SELECTOR));
        for (step, delay) in steps.iter().zip(motion::stagger_delays(steps.len())) {
            set_style(step, "transition-delay", &delay);
        }
    })
}

fn typewriter(page: &Page) -> Option<TypewriterHandle> {
    let highlight = page.query(HERO_HIGHLIGHT_SELECTOR)?;
    highlight.set_text_content(Some(""));

    let cancelled = Rc::new(Cell::new(false));
    let keystrokes: Vec<Keystroke> =
        typewriter::schedule(TYPEWRITER_TEXT, TYPEWRITER_START_DELAY_MS, TYPEWRITER_STEP_MS)
            .collect();
    type_next(highlight, keystrokes.into_iter(), 0, Rc::clone(&cancelled));

    Some(TypewriterHandle { cancelled })
}

fn type_next(
    highlight: Element,
    mut pending: std::vec::IntoIter<Keystroke>,
    elapsed_ms: u32,
    cancelled: Rc<Cell<bool>>,
) {
    let Some(keystroke) = pending.next() else {
        return;
    };

    Timeout::new(keystroke.at_ms.saturating_sub(elapsed_ms), move || {
        if cancelled.get() {
            return;
        }
        highlight.set_text_content(Some(&keystroke.text));
        type_next(highlight, pending, keystroke.at_ms, cancelled);
    })
    .forget();
}

fn magnetic_buttons(page: &Page, buttons: &[HtmlElement]) -> Vec<EventListener> {
    if !motion::magnetic_enabled(page.reduced_motion, page.viewport_width()) {
        return Vec::new();
    }

    buttons
        .iter()
        .flat_map(|button| {
            let on_move = {
                let button = button.clone();
                EventListener::new(&button.clone(), "mousemove", move |event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let transform =
                        motion::magnetic_transform(pointer_of(event), bounds_of(&button));
                    set_style(&button, "transform", &transform);
                })
            };
            let on_leave = {
                let button = button.clone();
                EventListener::new(&button.clone(), "mouseleave", move |_| {
                    set_style(&button, "transform", motion::MAGNETIC_RESET);
                })
            };
            [on_move, on_leave]
        })
        .collect()
}

fn theme_toggle(page: &Page) -> Option<EventListener> {
    let host = DocumentThemeHost::new(page.root.clone().into());
    let stored = theme::ThemeHost::stored(&host);
    let initial = theme::load(&host);
    log_event(
        &page.config,
        LogLevel::Debug,
        "theme.resolved",
        json!({
            "theme": initial,
            "stored": stored,
            "system_prefers_dark": host.system_prefers_dark(),
        }),
    );

    let button = page.by_id(THEME_TOGGLE_ID)?;
    let config = page.config;

    Some(EventListener::new(&button, "click", move |_| {
        let next = theme::toggle(&host);
        log_event(&config, LogLevel::Info, "theme.toggled", json!({ "theme": next }));
    }))
}

fn cursor_follower(page: &Page) -> Option<(EventListener, RafLoop)> {
    let element = page.by_id(FOLLOWER_ID)?;
    let follower = Rc::new(RefCell::new(Follower::default()));

    let tracker = {
        let follower = Rc::clone(&follower);
        EventListener::new(&page.document, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                follower.borrow_mut().set_pointer(pointer_of(event));
            }
        })
    };

    let raf = RafLoop::new(move || {
        let frame = follower.borrow_mut().step();
        set_style(&element, "opacity", "1");
        set_style(&element, "transform", &frame.transform());
    });

    Some((tracker, raf))
}

fn reduce_motion(page: &Page, doodles: &[HtmlElement]) {
    if !page.reduced_motion {
        return;
    }

    set_style(&page.root, "scroll-behavior", "auto");
    for doodle in doodles {
        set_style(doodle, "animation", "none");
    }
}
