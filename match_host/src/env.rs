use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of the current time in milliseconds
pub trait Environment {
    fn now(&self) -> u64;
}

/// Wall clock, counted from construction
pub struct SystemEnv {
    origin: Instant,
}

impl SystemEnv {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for SystemEnv {
    fn now(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Environment for ManualClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}
