//! Frame timing and scoped release of per-component resources.

/// Turns animation-frame timestamps (milliseconds) into elapsed seconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. The first sample yields `0.0`, and so
    /// does a timestamp that runs backwards or is not finite.
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

/// Owns the release hooks for everything a mounted component acquired.
///
/// Hooks run in reverse order of registration when the guard is dropped, so a
/// mount that bails out halfway with `?` still releases what it got.
#[derive(Default)]
pub struct Teardown {
    hooks: Vec<Box<dyn FnOnce()>>,
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&mut self, hook: impl FnOnce() + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook now.
    pub fn release(mut self) {
        self.run();
    }

    fn run(&mut self) {
        while let Some(hook) = self.hooks.pop() {
            hook();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown").field("hooks", &self.hooks.len()).finish()
    }
}
