pub const WHEEL_THRESHOLD_PX: f32 = 50.0;
pub const WHEEL_DECAY_MS: u32 = 200;

pub const SWIPE_MIN_PX: f32 = 50.0;
pub const SWIPE_QUICK_MIN_PX: f32 = 20.0;
pub const SWIPE_QUICK_MAX_MS: f64 = 300.0;

const OVERFLOW_SLACK_PX: f32 = 2.0;
const TOP_SLACK_PX: f32 = 1.0;
const BOTTOM_SLACK_PX: f32 = 2.0;

/// One slide step along the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Previous,
    Next,
}

impl StepDirection {
    /// Positive deltas move forward (wheel down, swipe up).
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(StepDirection::Next)
        } else if delta < 0.0 {
            Some(StepDirection::Previous)
        } else {
            None
        }
    }

    pub fn apply(self, index: usize, count: usize) -> Option<usize> {
        let next = match self {
            StepDirection::Previous => index.checked_sub(1)?,
            StepDirection::Next => index + 1,
        };
        (next < count).then_some(next)
    }
}

/// Scroll geometry of a slide's own overflow region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub client_height: f32,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f32, scroll_height: f32, client_height: f32) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    pub fn has_overflow(&self) -> bool {
        self.scroll_height > self.client_height + OVERFLOW_SLACK_PX
    }

    pub fn at_top(&self) -> bool {
        self.scroll_top <= TOP_SLACK_PX
    }

    pub fn at_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - BOTTOM_SLACK_PX
    }

    /// True when a gesture in `direction` should scroll the slide natively
    /// instead of changing slides.
    pub fn allows_native_scroll(&self, direction: StepDirection) -> bool {
        if !self.has_overflow() {
            return false;
        }
        match direction {
            StepDirection::Previous => !self.at_top(),
            StepDirection::Next => !self.at_bottom(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelPush {
    /// Token for the decay timer armed by this push.
    pub generation: u64,
    pub step: Option<StepDirection>,
}

/// Sums wheel deltas until they cross the threshold. Each push supersedes the
/// previous decay timer by bumping the generation.
#[derive(Clone, Debug, Default)]
pub struct WheelAccumulator {
    accumulated: f32,
    generation: u64,
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn push(&mut self, delta_y: f32) -> WheelPush {
        self.accumulated += delta_y;
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        if self.accumulated.abs() < WHEEL_THRESHOLD_PX {
            return WheelPush {
                generation,
                step: None,
            };
        }
        let step = StepDirection::from_delta(self.accumulated);
        self.accumulated = 0.0;
        WheelPush { generation, step }
    }

    /// Returns true when the decay matched the latest push and cleared it.
    pub fn decay(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.accumulated = 0.0;
        true
    }
}

/// Vertical swipe recognizer over touch start/end samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeGesture {
    start: Option<(f32, f64)>,
}

impl SwipeGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, client_y: f32, now_ms: f64) {
        self.start = Some((client_y, now_ms));
    }

    pub fn finish(&mut self, client_y: f32, now_ms: f64) -> Option<StepDirection> {
        let (start_y, start_ms) = self.start.take()?;
        let delta = start_y - client_y;
        let elapsed = (now_ms - start_ms).max(0.0);
        if !is_swipe(delta, elapsed) {
            return None;
        }
        StepDirection::from_delta(delta)
    }
}

pub fn is_swipe(delta: f32, elapsed_ms: f64) -> bool {
    let distance = delta.abs();
    if distance >= SWIPE_MIN_PX {
        return true;
    }
    distance >= SWIPE_QUICK_MIN_PX && elapsed_ms <= SWIPE_QUICK_MAX_MS
}
