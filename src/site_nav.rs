//! Browser host for the [`Navigator`]: routes page events into it and turns
//! its scheduled timers into real timeouts and animation frames.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use braced_core::{InputResponse, NavTimer, Navigator, Scheduled, Wake};
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use js_sys::Date;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, KeyboardEvent, TouchEvent, WheelEvent};

use crate::dom::{blocking_options, query_all, viewport_size};
use crate::dom_view::DomNavView;
use crate::input::{nav_key, touch_end_y, touch_start_y, wheel_delta_px};

pub(crate) struct SiteNav {
    nav: RefCell<Navigator<DomNavView>>,
    timeouts: RefCell<HashMap<NavTimer, Timeout>>,
    wheel_decay: RefCell<Option<Timeout>>,
    frames: RefCell<HashMap<NavTimer, AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl SiteNav {
    pub(crate) fn install(document: &Document) -> Rc<Self> {
        let mut nav = Navigator::new(DomNavView::build(document));
        nav.start();
        gloo::console::log!("nav: panels", nav.panel_count());
        let site = Rc::new(Self {
            nav: RefCell::new(nav),
            timeouts: RefCell::new(HashMap::new()),
            wheel_decay: RefCell::new(None),
            frames: RefCell::new(HashMap::new()),
            listeners: RefCell::new(Vec::new()),
        });
        site.flush();
        site.install_listeners(document);
        site
    }

    /// Runs one navigator operation, then hands its timers to the browser.
    fn with_nav<R>(self: &Rc<Self>, action: impl FnOnce(&mut Navigator<DomNavView>) -> R) -> R {
        let result = action(&mut self.nav.borrow_mut());
        self.flush();
        result
    }

    pub(crate) fn go_to_panel(self: &Rc<Self>, index: usize) {
        self.with_nav(|nav| nav.go_to_panel(index));
    }

    pub(crate) fn go_to_slide(self: &Rc<Self>, panel: usize, slide: usize) {
        self.with_nav(|nav| nav.go_to_slide(panel, slide));
    }

    fn fire(self: &Rc<Self>, timer: NavTimer) {
        self.with_nav(|nav| nav.fire(timer));
    }

    fn flush(self: &Rc<Self>) {
        let scheduled = self.nav.borrow_mut().drain_scheduled();
        for item in scheduled {
            self.schedule(item);
        }
    }

    fn schedule(self: &Rc<Self>, item: Scheduled) {
        match item.wake {
            Wake::AfterMs(delay_ms) => self.schedule_timeout(delay_ms, item.timer),
            Wake::Frames(frames) => self.schedule_frames(frames, item.timer),
        }
    }

    fn schedule_timeout(self: &Rc<Self>, delay_ms: u32, timer: NavTimer) {
        let site = Rc::clone(self);
        if let NavTimer::WheelDecay { .. } = timer {
            // Replacing the handle clears the previous decay.
            *self.wheel_decay.borrow_mut() = Some(Timeout::new(delay_ms, move || {
                site.wheel_decay.borrow_mut().take();
                site.fire(timer);
            }));
            return;
        }
        let handle = Timeout::new(delay_ms, move || {
            site.timeouts.borrow_mut().remove(&timer);
            site.fire(timer);
        });
        self.timeouts.borrow_mut().insert(timer, handle);
    }

    fn schedule_frames(self: &Rc<Self>, frames: u8, timer: NavTimer) {
        if frames == 0 {
            self.fire(timer);
            return;
        }
        let site = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            site.frames.borrow_mut().remove(&timer);
            site.schedule_frames(frames - 1, timer);
        });
        self.frames.borrow_mut().insert(timer, handle);
    }

    fn install_listeners(self: &Rc<Self>, document: &Document) {
        let mut listeners = Vec::new();

        let site = Rc::clone(self);
        let listener = EventListener::new_with_options(
            document,
            "wheel",
            blocking_options(),
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let delta = wheel_delta_px(event, viewport_size().1);
                if site.with_nav(|nav| nav.on_wheel(delta)) == InputResponse::Consumed {
                    event.prevent_default();
                }
            },
        );
        listeners.push(listener);

        let site = Rc::clone(self);
        let listener = EventListener::new(document, "touchstart", move |event: &Event| {
            let Some(client_y) = event.dyn_ref::<TouchEvent>().and_then(touch_start_y) else {
                return;
            };
            site.with_nav(|nav| nav.on_touch_start(client_y, Date::now()));
        });
        listeners.push(listener);

        let site = Rc::clone(self);
        let listener = EventListener::new(document, "touchend", move |event: &Event| {
            let Some(client_y) = event.dyn_ref::<TouchEvent>().and_then(touch_end_y) else {
                return;
            };
            site.with_nav(|nav| nav.on_touch_end(client_y, Date::now()));
        });
        listeners.push(listener);

        let site = Rc::clone(self);
        let listener = EventListener::new_with_options(
            document,
            "keydown",
            blocking_options(),
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(key) = nav_key(event) else {
                    return;
                };
                if site.with_nav(|nav| nav.on_key(key)) == InputResponse::Consumed {
                    event.prevent_default();
                }
            },
        );
        listeners.push(listener);

        if let Some(window) = web_sys::window() {
            let site = Rc::clone(self);
            let listener = EventListener::new(&window, "resize", move |_event| {
                site.with_nav(|nav| nav.on_resize());
            });
            listeners.push(listener);
        }

        let tabs = self.nav.borrow().view().tabs().to_vec();
        for (index, tab) in tabs.iter().enumerate() {
            let site = Rc::clone(self);
            let listener = EventListener::new(tab, "click", move |_event| {
                site.go_to_panel(index);
            });
            listeners.push(listener);
        }

        let panel_count = self.nav.borrow().panel_count();
        for panel in 0..panel_count {
            let dots = self.nav.borrow().view().dots(panel).to_vec();
            for (slide, dot) in dots.iter().enumerate() {
                let site = Rc::clone(self);
                let listener = EventListener::new(dot, "click", move |_event| {
                    site.go_to_slide(panel, slide);
                });
                listeners.push(listener);
            }
        }

        if let Ok(Some(logo)) = document.query_selector(".logo") {
            let site = Rc::clone(self);
            let listener = EventListener::new_with_options(
                &logo,
                "click",
                blocking_options(),
                move |event: &Event| {
                    event.prevent_default();
                    site.go_to_panel(0);
                },
            );
            listeners.push(listener);
        }

        for link in query_all(document, "[data-go-tab]") {
            let site = Rc::clone(self);
            let target = link.clone();
            let listener = EventListener::new(&link, "click", move |_event| {
                let Some(keyword) = target.get_attribute("data-go-tab") else {
                    return;
                };
                if let Err(err) = site.with_nav(|nav| nav.go_to_keyword(&keyword)) {
                    gloo::console::warn!("nav:", err.to_string());
                }
            });
            listeners.push(listener);
        }

        let menu_toggle = self.nav.borrow().view().menu_toggle().cloned();
        if let Some(toggle) = menu_toggle {
            let site = Rc::clone(self);
            let listener = EventListener::new(&toggle, "click", move |_event| {
                site.nav.borrow().view().toggle_menu();
            });
            listeners.push(listener);
        }

        *self.listeners.borrow_mut() = listeners;
    }
}
