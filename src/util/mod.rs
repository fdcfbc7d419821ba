pub mod tick_waker;
