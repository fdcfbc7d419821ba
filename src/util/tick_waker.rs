use std::sync::Arc;
use std::task::{Wake, Waker};

/// Waker for futures that are re-polled every tick anyway
struct TickWaker;

impl Wake for TickWaker {
    fn wake(self: Arc<Self>) {}
} // impl Wake for TickWaker

/// Tick waker getting function
/// * Returns waker that does nothing on wake
pub fn tick_waker() -> Waker {
    Waker::from(Arc::new(TickWaker))
} // fn tick_waker

// file tick_waker.rs
