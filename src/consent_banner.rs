use std::cell::RefCell;
use std::rc::Rc;

use braced_core::{apply_stored_consent, record_consent, ConsentChoice};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use web_sys::{Document, Element};

use crate::analytics::PageAnalytics;
use crate::dom::{set_class, VISIBLE_CLASS};
use crate::storage::LocalStore;

pub(crate) const CONSENT_FEEDBACK_MS: u32 = 2500;

pub(crate) struct ConsentBanner {
    banner: Element,
    feedback: Option<Element>,
    store: RefCell<LocalStore>,
    analytics: RefCell<PageAnalytics>,
    feedback_timer: RefCell<Option<Timeout>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ConsentBanner {
    /// Applies the stored choice (analytics load even without banner markup)
    /// and wires the banner buttons when the banner exists.
    pub(crate) fn install(document: &Document) -> Option<Rc<Self>> {
        let store = LocalStore::open();
        let mut analytics = PageAnalytics;
        let outcome = apply_stored_consent(&store, &mut analytics);
        gloo::console::log!("consent: stored state", format!("{:?}", outcome.state));

        let banner = document.get_element_by_id("cookie-banner")?;
        set_class(&banner, VISIBLE_CLASS, outcome.show_banner);
        let consent = Rc::new(Self {
            banner,
            feedback: document.get_element_by_id("cookie-feedback"),
            store: RefCell::new(store),
            analytics: RefCell::new(analytics),
            feedback_timer: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        consent.install_listeners(document);
        Some(consent)
    }

    fn choose(self: &Rc<Self>, choice: ConsentChoice) {
        let outcome = record_consent(
            &mut *self.store.borrow_mut(),
            &mut *self.analytics.borrow_mut(),
            choice,
        );
        set_class(&self.banner, VISIBLE_CLASS, outcome.show_banner);
        self.show_feedback();
    }

    fn show_feedback(self: &Rc<Self>) {
        let Some(feedback) = self.feedback.as_ref() else {
            return;
        };
        set_class(feedback, VISIBLE_CLASS, true);
        let consent = Rc::clone(self);
        *self.feedback_timer.borrow_mut() = Some(Timeout::new(CONSENT_FEEDBACK_MS, move || {
            consent.feedback_timer.borrow_mut().take();
            if let Some(feedback) = consent.feedback.as_ref() {
                set_class(feedback, VISIBLE_CLASS, false);
            }
        }));
    }

    fn install_listeners(self: &Rc<Self>, document: &Document) {
        let mut listeners = Vec::new();
        for (id, choice) in [
            ("cookie-accept", ConsentChoice::Accept),
            ("cookie-reject", ConsentChoice::Reject),
        ] {
            let Some(button) = document.get_element_by_id(id) else {
                gloo::console::warn!("consent: button missing", id);
                continue;
            };
            let consent = Rc::clone(self);
            let listener = EventListener::new(&button, "click", move |_event| {
                consent.choose(choice);
            });
            listeners.push(listener);
        }
        *self.listeners.borrow_mut() = listeners;
    }
}
