use std::time::Duration;

/// Blocks between a rate-limited attempt and the next one.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Suspends the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
