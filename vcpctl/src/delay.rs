use std::time::Duration;

/// Blocking pause between dependent hardware steps.
pub trait Delay {
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
