use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Source of one-shot timers
///
/// Dropping the returned handle cancels the timer if it has not fired yet.
pub trait TimerHost {
    type Handle;

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` on the browser event loop
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl TimerHost for BrowserTimers {
    type Handle = gloo_timers::callback::Timeout;

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle {
        gloo_timers::callback::Timeout::new(delay_ms, callback)
    }
}

/// Coalesces bursts of calls into one delayed call with the last arguments
///
/// Every `trigger` replaces the pending timer, so `func` only runs once
/// `delay_ms` have passed without a new trigger.
pub struct Debouncer<A, H: TimerHost> {
    host: H,
    delay_ms: u32,
    func: Rc<dyn Fn(A)>,
    pending: RefCell<Option<H::Handle>>,
    armed: Rc<Cell<bool>>,
}

impl<A: 'static, H: TimerHost> Debouncer<A, H> {
    pub fn new(host: H, delay_ms: u32, func: impl Fn(A) + 'static) -> Self {
        Self {
            host,
            delay_ms,
            func: Rc::new(func),
            pending: RefCell::new(None),
            armed: Rc::new(Cell::new(false)),
        }
    }

    pub fn trigger(&self, args: A) {
        // Dropping the previous handle cancels it
        drop(self.pending.borrow_mut().take());

        let func = Rc::clone(&self.func);
        let armed = Rc::clone(&self.armed);
        armed.set(true);

        let handle = self.host.set_timeout(
            self.delay_ms,
            Box::new(move || {
                armed.set(false);
                func(args);
            }),
        );
        *self.pending.borrow_mut() = Some(handle);
    }

    /// Drop the pending call, if any
    pub fn cancel(&self) {
        drop(self.pending.borrow_mut().take());
        self.armed.set(false);
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.armed.get()
    }
}

/// Wrap `func` so that only the last call of each burst runs, `delay_ms` later
pub fn debounce<A: 'static, H: TimerHost + 'static>(
    host: H,
    delay_ms: u32,
    func: impl Fn(A) + 'static,
) -> impl Fn(A) {
    let debouncer = Debouncer::new(host, delay_ms, func);
    move |args| debouncer.trigger(args)
}

#[cfg(test)]
pub(crate) use manual::ManualTimers;
