//! `requestAnimationFrame` drivers.
//!
//! [`RafLoop`] re-registers itself every frame until stopped or dropped.
//! [`request_frame_once`] schedules a single callback for the next frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::window;

use crate::error::{js_detail, BehaviorError};

type RafClosure = Closure<dyn FnMut(f64)>;

pub struct RafLoop {
    inner: Rc<RafInner>,
}

struct RafInner {
    /// Set once in `start()` and referenced from inside itself.
    closure: RefCell<Option<RafClosure>>,
    callback: RefCell<Box<dyn FnMut()>>,
    running: Cell<bool>,
    raf_id: Cell<i32>,
}

impl RafLoop {
    /// Creates a loop that is not yet running.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(RafInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                running: Cell::new(false),
                raf_id: Cell::new(0),
            }),
        }
    }

    pub fn start(&self) -> Result<(), BehaviorError> {
        if self.inner.running.get() {
            return Ok(());
        }

        let inner = Rc::clone(&self.inner);
        let closure = Closure::wrap(Box::new(move |_timestamp_ms: f64| {
            if !inner.running.get() {
                return;
            }

            inner.callback.borrow_mut()();

            if !inner.running.get() {
                return;
            }
            if let Some(closure) = inner.closure.borrow().as_ref() {
                match schedule(closure) {
                    Ok(id) => inner.raf_id.set(id),
                    Err(_) => inner.running.set(false),
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = schedule(&closure)?;
        self.inner.raf_id.set(id);
        self.inner.running.set(true);
        *self.inner.closure.borrow_mut() = Some(closure);
        Ok(())
    }

    /// Runs the callback once, synchronously, outside the frame schedule.
    pub fn tick(&self) {
        self.inner.callback.borrow_mut()();
    }

    pub fn stop(&self) {
        if !self.inner.running.replace(false) {
            return;
        }
        if let Some(win) = window() {
            let _ = win.cancel_animation_frame(self.inner.raf_id.get());
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        self.inner.closure.borrow_mut().take();
    }
}

fn schedule(closure: &RafClosure) -> Result<i32, BehaviorError> {
    window()
        .ok_or(BehaviorError::MissingWindow)?
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .map_err(|err| BehaviorError::dom("requestAnimationFrame", js_detail(&err)))
}

pub fn request_frame_once(callback: impl FnOnce() + 'static) -> Result<i32, BehaviorError> {
    let callback = Closure::once_into_js(move |_timestamp_ms: f64| callback());
    window()
        .ok_or(BehaviorError::MissingWindow)?
        .request_animation_frame(callback.unchecked_ref())
        .map_err(|err| BehaviorError::dom("requestAnimationFrame", js_detail(&err)))
}
