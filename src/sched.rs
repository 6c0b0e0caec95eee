//! Timer and frame-callback scheduling.
//!
//! Every timer-driven sequence on the site owns its outstanding handles and
//! clears all of them before starting over; the types here carry that
//! discipline. Callbacks are kept alive alongside their browser handles and
//! dropped when the handle is cleared.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::window;

/// Milliseconds from the page clock; 0 when unavailable.
pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Ordered set of outstanding one-shot timers belonging to one sequence.
#[derive(Default)]
pub struct TimerPool {
    timers: Vec<(i32, Closure<dyn FnMut()>)>,
}

impl TimerPool {
    pub fn new() -> Self {
        Self { timers: Vec::new() }
    }

    /// Schedule `f` after `delay_ms`; the callback stays alive until the
    /// pool is cleared.
    pub fn schedule(&mut self, delay_ms: i32, f: impl FnMut() + 'static) {
        let Some(win) = window() else { return };
        let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        if let Ok(handle) = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms,
            )
        {
            self.timers.push((handle, cb));
        }
    }

    /// Cancel every outstanding timer and drop its callback.
    pub fn clear_all(&mut self) {
        let win = window();
        for (handle, _) in self.timers.drain(..) {
            if let Some(win) = win.as_ref() {
                win.clear_timeout_with_handle(handle);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// Single re-armable timer slot; arming replaces any previous occupant.
/// Doubles as a trailing-edge debouncer.
#[derive(Default)]
pub struct Oneshot {
    slot: Option<(i32, Closure<dyn FnMut()>)>,
}

impl Oneshot {
    pub fn new() -> Self {
        Self { slot: None }
    }

    pub fn arm(&mut self, delay_ms: i32, f: impl FnMut() + 'static) {
        self.cancel();
        let Some(win) = window() else { return };
        let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        if let Ok(handle) = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms,
            )
        {
            self.slot = Some((handle, cb));
        }
    }

    pub fn cancel(&mut self) {
        if let Some((handle, _)) = self.slot.take() {
            if let Some(win) = window() {
                win.clear_timeout_with_handle(handle);
            }
        }
    }
}

/// Repeating timer; stopping or dropping the guard clears it.
pub struct Interval {
    handle: i32,
    _cb: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: i32, f: impl FnMut() + 'static) -> Option<Interval> {
        let win = window()?;
        let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let handle = win
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                period_ms,
            )
            .ok()?;
        Some(Interval { handle, _cb: cb })
    }

    /// Let the interval run for the rest of the page's life.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(win) = window() {
            win.clear_interval_with_handle(self.handle);
        }
    }
}

/// Cancellation token for a frame task started with [`run_frames`].
#[derive(Clone)]
pub struct FrameGuard {
    cancelled: Rc<Cell<bool>>,
}

impl FrameGuard {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Run `tick` once per animation frame until it returns `false` or the
/// returned guard is cancelled. The argument is the rAF timestamp.
pub fn run_frames(mut tick: impl FnMut(f64) -> bool + 'static) -> FrameGuard {
    let guard = FrameGuard {
        cancelled: Rc::new(Cell::new(false)),
    };
    let flag = guard.cancelled.clone();
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let inner = slot.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if flag.get() || !tick(ts) {
            // Release the closure slot so the task gets cleaned up.
            let _ = inner.borrow_mut().take();
            return;
        }
        if let Some(win) = window() {
            if let Some(cb) = inner.borrow().as_ref() {
                let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(win) = window() {
        if let Some(cb) = slot.borrow().as_ref() {
            let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
    guard
}
