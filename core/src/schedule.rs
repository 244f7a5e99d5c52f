//! Timer outbox shared by the navigator and its drivers.
//!
//! The navigator never owns a clock. Each transition pushes [`Scheduled`]
//! entries; the page drains them into browser timers, tests drain them into a
//! [`VirtualClock`] and advance it by hand.

use crate::nav::Navigator;
use crate::view::NavView;

/// Nominal frame length used when a virtual clock stands in for rAF.
pub const VIRTUAL_FRAME_MS: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    AfterMs(u32),
    Frames(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavTimer {
    /// Marks the destination slide active once its transform has started.
    ActivateSlide {
        panel: usize,
        slide: usize,
        epoch: u64,
    },
    /// Ends the global transition started with the same epoch.
    Settle { epoch: u64 },
    /// Marks slide 0 active after a panel switch.
    ActivatePanelSlide { panel: usize, epoch: u64 },
    /// Turns the slide-track CSS transition back on after a snap.
    RestoreTransition { panel: usize },
    /// Turns the panels-track CSS transition back on after a resize snap.
    RestorePanelsTransition,
    WheelDecay { generation: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub wake: Wake,
    pub timer: NavTimer,
}

pub trait TimerDriver {
    fn schedule(&mut self, item: Scheduled);
}

#[derive(Clone, Debug)]
struct Pending {
    due_ms: f64,
    seq: u64,
    timer: NavTimer,
}

/// Deterministic stand-in for browser timers.
#[derive(Clone, Debug, Default)]
pub struct VirtualClock {
    now_ms: f64,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Moves pending navigator timers into the clock.
    pub fn collect<V: NavView>(&mut self, nav: &mut Navigator<V>) {
        nav.flush(self);
    }

    /// Advances time by `ms`, firing due timers in due order. Timers scheduled
    /// while firing are honored if they fall inside the window.
    pub fn advance<V: NavView>(&mut self, nav: &mut Navigator<V>, ms: f64) {
        let target = self.now_ms + ms.max(0.0);
        self.collect(nav);
        while let Some(next) = self.pop_due(target) {
            self.now_ms = self.now_ms.max(next.due_ms);
            nav.fire(next.timer);
            self.collect(nav);
        }
        self.now_ms = target;
    }

    fn pop_due(&mut self, target: f64) -> Option<Pending> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due_ms <= target)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .total_cmp(&b.due_ms)
                    .then_with(|| a.seq.cmp(&b.seq))
            })
            .map(|(index, _)| index)?;
        Some(self.pending.swap_remove(index))
    }
}

impl TimerDriver for VirtualClock {
    fn schedule(&mut self, item: Scheduled) {
        let delay = match item.wake {
            Wake::AfterMs(ms) => f64::from(ms),
            Wake::Frames(frames) => f64::from(frames) * VIRTUAL_FRAME_MS,
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms: self.now_ms + delay,
            seq,
            timer: item.timer,
        });
    }
}
