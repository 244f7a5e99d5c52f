//! Panel/slide navigation state machine.
//!
//! Panels are laid out horizontally, each panel holds a vertical track of
//! slides. One slide transition may be in flight per page; its visual phases
//! run `Idle -> Transitioning -> Settling -> Idle`, driven by [`NavTimer`]s
//! pushed into an outbox that the caller drains.

use crate::config::NARROW_VIEWPORT_PX;
use crate::gesture::{StepDirection, SwipeGesture, WheelAccumulator, WHEEL_DECAY_MS};
use crate::panel_key::{PanelKey, PanelKeyError};
use crate::schedule::{NavTimer, Scheduled, TimerDriver, Wake};
use crate::view::NavView;

/// Delay before the destination slide gets its active marker, so the CSS
/// entrance starts after the track has begun moving.
pub const SLIDE_ACTIVATE_DELAY_MS: u32 = 100;
/// Time until the slide track transform has settled.
pub const SLIDE_SETTLE_MS: u32 = 850;
/// Delay before slide 0 of a freshly shown panel gets its active marker.
pub const PANEL_ACTIVATE_DELAY_MS: u32 = 200;
/// Frames to wait before re-enabling a transition after a snap.
pub const SNAP_RESTORE_FRAMES: u8 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Transitioning {
        panel: usize,
        slide: usize,
    },
    Settling {
        panel: usize,
        slide: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
}

/// Whether the host should let the browser handle the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResponse {
    /// Leave the event alone (native scroll, unhandled key).
    PassThrough,
    /// Call `preventDefault`.
    Consumed,
}

#[derive(Clone, Copy, Debug)]
struct SlideTrack {
    count: usize,
    current: usize,
    /// Bumped whenever a pending activation on this track becomes stale.
    activation_epoch: u64,
}

pub struct Navigator<V: NavView> {
    view: V,
    tracks: Vec<SlideTrack>,
    current_panel: usize,
    phase: TransitionPhase,
    settle_epoch: u64,
    wheel: WheelAccumulator,
    swipe: SwipeGesture,
    outbox: Vec<Scheduled>,
}

impl<V: NavView> Navigator<V> {
    pub fn new(view: V) -> Self {
        let tracks = (0..view.panel_count())
            .map(|panel| SlideTrack {
                count: view.slide_count(panel),
                current: 0,
                activation_epoch: 0,
            })
            .collect();
        Self {
            view,
            tracks,
            current_panel: 0,
            phase: TransitionPhase::Idle,
            settle_epoch: 0,
            wheel: WheelAccumulator::new(),
            swipe: SwipeGesture::new(),
            outbox: Vec::new(),
        }
    }

    /// Initial markers: first panel and tab, first slide and dot everywhere.
    pub fn start(&mut self) {
        for (panel, track) in self.tracks.iter().enumerate() {
            let active = panel == self.current_panel;
            self.view.set_panel_active(panel, active);
            self.view.set_tab_active(panel, active);
            for slide in 0..track.count {
                self.view.set_dot_active(panel, slide, slide == 0);
                self.view.set_slide_active(panel, slide, slide == 0);
            }
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn panel_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn current_panel(&self) -> usize {
        self.current_panel
    }

    pub fn current_slide(&self, panel: usize) -> Option<usize> {
        self.tracks.get(panel).map(|track| track.current)
    }

    pub fn slide_count(&self, panel: usize) -> Option<usize> {
        self.tracks.get(panel).map(|track| track.count)
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    pub fn wheel_accumulated(&self) -> f32 {
        self.wheel.accumulated()
    }

    pub fn is_narrow(&self) -> bool {
        self.view.viewport_width() <= NARROW_VIEWPORT_PX
    }

    pub fn drain_scheduled(&mut self) -> Vec<Scheduled> {
        std::mem::take(&mut self.outbox)
    }

    pub fn flush(&mut self, driver: &mut impl TimerDriver) {
        for item in self.outbox.drain(..) {
            driver.schedule(item);
        }
    }

    fn schedule(&mut self, wake: Wake, timer: NavTimer) {
        self.outbox.push(Scheduled { wake, timer });
    }

    pub fn go_to_panel(&mut self, index: usize) {
        if index >= self.tracks.len() {
            return;
        }
        self.current_panel = index;
        let offset = if self.is_narrow() {
            0.0
        } else {
            -(index as f32) * self.view.viewport_width()
        };
        self.view.set_panels_offset(offset);
        for panel in 0..self.tracks.len() {
            self.view.set_tab_active(panel, panel == index);
            self.view.set_panel_active(panel, panel == index);
        }

        let track = &mut self.tracks[index];
        track.activation_epoch += 1;
        let epoch = track.activation_epoch;
        let count = track.count;
        if track.current != 0 {
            let previous = track.current;
            track.current = 0;
            self.view.set_slide_active(index, previous, false);
            self.view.set_slides_transition(index, false);
            self.view.set_slides_offset(index, 0.0);
            for slide in 0..count {
                self.view.set_dot_active(index, slide, slide == 0);
            }
            self.schedule(
                Wake::Frames(SNAP_RESTORE_FRAMES),
                NavTimer::RestoreTransition { panel: index },
            );
        }
        // A slide activation still pending on this track must not fire.
        if let TransitionPhase::Transitioning { panel, slide } = self.phase {
            if panel == index {
                self.phase = TransitionPhase::Settling { panel, slide };
            }
        }

        if count > 0 {
            for slide in 0..count {
                self.view.set_slide_active(index, slide, false);
            }
            self.schedule(
                Wake::AfterMs(PANEL_ACTIVATE_DELAY_MS),
                NavTimer::ActivatePanelSlide {
                    panel: index,
                    epoch,
                },
            );
        }

        self.view.close_menu();
    }

    pub fn go_to_keyword(&mut self, keyword: &str) -> Result<(), PanelKeyError> {
        let key = PanelKey::parse(keyword)?;
        self.go_to_panel(key.index());
        Ok(())
    }

    pub fn step_panel(&mut self, direction: StepDirection) {
        if let Some(next) = direction.apply(self.current_panel, self.tracks.len()) {
            self.go_to_panel(next);
        }
    }

    pub fn go_to_slide(&mut self, panel: usize, slide: usize) {
        let Some(track) = self.tracks.get(panel).copied() else {
            return;
        };
        if slide >= track.count {
            return;
        }
        if slide == track.current && self.is_animating() {
            return;
        }

        let previous = track.current;
        self.settle_epoch += 1;
        let settle_epoch = self.settle_epoch;
        let activation_epoch = track.activation_epoch + 1;
        self.tracks[panel].current = slide;
        self.tracks[panel].activation_epoch = activation_epoch;
        self.phase = TransitionPhase::Transitioning { panel, slide };

        let height = self.view.panel_height(panel);
        self.view.set_slides_offset(panel, -(slide as f32) * height);
        for dot in 0..track.count {
            self.view.set_dot_active(panel, dot, dot == slide);
        }
        self.view.set_slide_active(panel, previous, false);
        self.schedule(
            Wake::AfterMs(SLIDE_ACTIVATE_DELAY_MS),
            NavTimer::ActivateSlide {
                panel,
                slide,
                epoch: activation_epoch,
            },
        );
        self.view.reset_slide_scroll(panel, slide);
        self.schedule(
            Wake::AfterMs(SLIDE_SETTLE_MS),
            NavTimer::Settle {
                epoch: settle_epoch,
            },
        );
    }

    /// One slide up or down within the current panel.
    pub fn step_slide(&mut self, direction: StepDirection) {
        let panel = self.current_panel;
        let Some(track) = self.tracks.get(panel) else {
            return;
        };
        if let Some(next) = direction.apply(track.current, track.count) {
            self.go_to_slide(panel, next);
        }
    }

    pub fn fire(&mut self, timer: NavTimer) {
        match timer {
            NavTimer::ActivateSlide {
                panel,
                slide,
                epoch,
            } => {
                let Some(track) = self.tracks.get(panel) else {
                    return;
                };
                if track.activation_epoch != epoch || track.current != slide {
                    return;
                }
                self.view.set_slide_active(panel, slide, true);
                if self.phase == (TransitionPhase::Transitioning { panel, slide }) {
                    self.phase = TransitionPhase::Settling { panel, slide };
                }
            }
            NavTimer::Settle { epoch } => {
                if epoch == self.settle_epoch {
                    self.phase = TransitionPhase::Idle;
                }
            }
            NavTimer::ActivatePanelSlide { panel, epoch } => {
                let Some(track) = self.tracks.get(panel) else {
                    return;
                };
                if track.activation_epoch != epoch || track.count == 0 {
                    return;
                }
                let current = track.current;
                self.view.set_slide_active(panel, current, true);
            }
            NavTimer::RestoreTransition { panel } => {
                if panel < self.tracks.len() {
                    self.view.set_slides_transition(panel, true);
                }
            }
            NavTimer::RestorePanelsTransition => {
                self.view.set_panels_transition(true);
            }
            NavTimer::WheelDecay { generation } => {
                self.wheel.decay(generation);
            }
        }
    }

    fn current_allows_native_scroll(&self, direction: StepDirection) -> bool {
        let panel = self.current_panel;
        let Some(track) = self.tracks.get(panel) else {
            return false;
        };
        if track.count == 0 {
            return false;
        }
        self.view
            .slide_scroll(panel, track.current)
            .allows_native_scroll(direction)
    }

    pub fn on_wheel(&mut self, delta_y: f32) -> InputResponse {
        if self.is_animating() {
            return InputResponse::Consumed;
        }
        if self.tracks.get(self.current_panel).is_none() {
            return InputResponse::PassThrough;
        }
        if let Some(direction) = StepDirection::from_delta(delta_y) {
            if self.current_allows_native_scroll(direction) {
                return InputResponse::PassThrough;
            }
        }

        let push = self.wheel.push(delta_y);
        self.schedule(
            Wake::AfterMs(WHEEL_DECAY_MS),
            NavTimer::WheelDecay {
                generation: push.generation,
            },
        );
        if let Some(direction) = push.step {
            self.step_slide(direction);
        }
        InputResponse::Consumed
    }

    pub fn on_touch_start(&mut self, client_y: f32, now_ms: f64) {
        self.swipe.begin(client_y, now_ms);
    }

    pub fn on_touch_end(&mut self, client_y: f32, now_ms: f64) {
        if self.is_animating() {
            return;
        }
        let Some(direction) = self.swipe.finish(client_y, now_ms) else {
            return;
        };
        if self.current_allows_native_scroll(direction) {
            return;
        }
        self.step_slide(direction);
    }

    pub fn on_key(&mut self, key: NavKey) -> InputResponse {
        match key {
            NavKey::Right => {
                self.step_panel(StepDirection::Next);
                InputResponse::PassThrough
            }
            NavKey::Left => {
                self.step_panel(StepDirection::Previous);
                InputResponse::PassThrough
            }
            NavKey::Down => {
                self.step_slide(StepDirection::Next);
                InputResponse::Consumed
            }
            NavKey::Up => {
                self.step_slide(StepDirection::Previous);
                InputResponse::Consumed
            }
        }
    }

    /// Reasserts offsets for the new viewport without animating the snap.
    pub fn on_resize(&mut self) {
        let offset = if self.is_narrow() {
            0.0
        } else {
            -(self.current_panel as f32) * self.view.viewport_width()
        };
        self.view.set_panels_transition(false);
        self.view.set_panels_offset(offset);
        self.schedule(
            Wake::Frames(SNAP_RESTORE_FRAMES),
            NavTimer::RestorePanelsTransition,
        );
        for panel in 0..self.tracks.len() {
            let current = self.tracks[panel].current;
            if current == 0 {
                continue;
            }
            let height = self.view.panel_height(panel);
            self.view.set_slides_transition(panel, false);
            self.view.set_slides_offset(panel, -(current as f32) * height);
            self.schedule(
                Wake::Frames(SNAP_RESTORE_FRAMES),
                NavTimer::RestoreTransition { panel },
            );
        }
    }
}
