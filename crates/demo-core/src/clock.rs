use instant::Instant;

/// Monotonic scene time in seconds.
///
/// The controller is handed elapsed time by its host; a value earlier than the
/// last one is clamped so time-driven parameters never run backwards.
#[derive(Clone, Debug, Default)]
pub struct SceneClock {
    elapsed: f32,
    delta: f32,
    ticks: u64,
}

impl SceneClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `elapsed`, returning the time actually used.
    pub fn advance_to(&mut self, elapsed: f32) -> f32 {
        let next = if elapsed.is_finite() && elapsed >= self.elapsed {
            elapsed
        } else {
            log::warn!(
                "[clock] ignoring rewind from {:.4}s to {:.4}s",
                self.elapsed,
                elapsed
            );
            self.elapsed
        };
        self.delta = next - self.elapsed;
        self.elapsed = next;
        self.ticks += 1;
        next
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds between the two most recent ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Wall-clock source for hosts that do not track elapsed time themselves.
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    start: Instant,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}
