use embedded_hal::delay::DelayNs;
use linux_embedded_hal::Delay;
use std::time::{Duration, Instant};

/// Waits shorter than this spin, longer ones sleep.
const SPIN_LIMIT_NS: u32 = 1_000_000;

/// Host delay for bit-banged time slots.
///
/// Sub-millisecond waits busy-wait on the monotonic clock so a 5 µs slot
/// phase lasts about 5 µs. Millisecond waits go to [`Delay`] and sleep.
pub struct SpinDelay {
    sleep: Delay,
}

impl SpinDelay {
    pub fn new() -> Self {
        Self { sleep: Delay }
    }

    fn spin(duration: Duration) {
        let deadline = Instant::now() + duration;
        while Instant::now() < deadline {
            std::hint::spin_loop();
        }
    }
}

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        if ns >= SPIN_LIMIT_NS {
            self.sleep.delay_ns(ns);
        } else {
            Self::spin(Duration::from_nanos(u64::from(ns)));
        }
    }

    fn delay_us(&mut self, us: u32) {
        match us.checked_mul(1000) {
            Some(ns) => self.delay_ns(ns),
            None => self.sleep.delay_us(us),
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleep.delay_ms(ms);
    }
}
