use std::cell::RefCell;
use std::rc::Rc;

use braced_core::config::CONTACT_EMAIL;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, HtmlDocument, HtmlElement, HtmlFormElement, HtmlTextAreaElement};

use crate::dom::{
    blocking_options, clear_style, html_element, js_err, query_all, query_in, set_class,
    set_style, VISIBLE_CLASS,
};
use crate::lang_toggle::LangToggle;

pub(crate) const SENT_RESET_MS: u32 = 2000;
pub(crate) const COPY_FEEDBACK_MS: u32 = 2000;
const SENT_BACKGROUND: &str = "#27ae60";

/// Submit button state while the "sent" confirmation is up.
struct SentState {
    button: HtmlElement,
    original_text: Option<String>,
    _reset: Timeout,
}

pub(crate) struct ContactForm {
    form: HtmlFormElement,
    lang: Rc<LangToggle>,
    sent: RefCell<Option<SentState>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ContactForm {
    pub(crate) fn install(document: &Document, lang: Rc<LangToggle>) -> Option<Rc<Self>> {
        let form = document
            .get_element_by_id("contact-form")?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        let contact = Rc::new(Self {
            form,
            lang,
            sent: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        contact.install_listeners();
        Some(contact)
    }

    fn install_listeners(self: &Rc<Self>) {
        let contact = Rc::clone(self);
        let listener = EventListener::new_with_options(
            &self.form,
            "submit",
            blocking_options(),
            move |event: &Event| {
                event.prevent_default();
                contact.confirm_sent();
            },
        );
        self.listeners.borrow_mut().push(listener);
    }

    fn confirm_sent(self: &Rc<Self>) {
        // A second submit during the confirmation keeps the first original text.
        if self.sent.borrow().is_some() {
            return;
        }
        let Some(button) = query_in(&self.form, ".btn").and_then(html_element) else {
            return;
        };
        let original_text = button.text_content();
        button.set_text_content(Some(self.lang.current().sent_label()));
        set_style(&button, "background", SENT_BACKGROUND);
        let contact = Rc::clone(self);
        let reset = Timeout::new(SENT_RESET_MS, move || contact.restore());
        *self.sent.borrow_mut() = Some(SentState {
            button,
            original_text,
            _reset: reset,
        });
    }

    fn restore(&self) {
        let Some(state) = self.sent.borrow_mut().take() else {
            return;
        };
        state.button.set_text_content(state.original_text.as_deref());
        clear_style(&state.button, "background");
        self.form.reset();
    }
}

/// `[data-copy-email]` buttons.
pub(crate) struct CopyEmail {
    lang: Rc<LangToggle>,
    hide_timer: RefCell<Option<Timeout>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl CopyEmail {
    pub(crate) fn install(document: &Document, lang: Rc<LangToggle>) -> Rc<Self> {
        let copy = Rc::new(Self {
            lang,
            hide_timer: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        copy.install_listeners(document);
        copy
    }

    fn install_listeners(self: &Rc<Self>, document: &Document) {
        let mut listeners = Vec::new();
        for button in query_all(document, "[data-copy-email]") {
            let feedback = feedback_for(document, &button);
            let copy = Rc::clone(self);
            let listener = EventListener::new(&button, "click", move |_event| {
                let copy = Rc::clone(&copy);
                let feedback = feedback.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match copy_to_clipboard(CONTACT_EMAIL).await {
                        Ok(()) => {
                            if let Some(feedback) = feedback {
                                copy.show_feedback(feedback);
                            }
                        }
                        Err(err) => gloo::console::warn!("clipboard: copy failed", err),
                    }
                });
            });
            listeners.push(listener);
        }
        *self.listeners.borrow_mut() = listeners;
    }

    fn show_feedback(self: &Rc<Self>, feedback: Element) {
        feedback.set_text_content(Some(self.lang.current().copied_label()));
        set_class(&feedback, VISIBLE_CLASS, true);
        *self.hide_timer.borrow_mut() = Some(Timeout::new(COPY_FEEDBACK_MS, move || {
            set_class(&feedback, VISIBLE_CLASS, false);
        }));
    }
}

/// Indicator next to the button, falling back to the first one on the page.
fn feedback_for(document: &Document, button: &Element) -> Option<Element> {
    button
        .parent_element()
        .and_then(|parent| query_in(&parent, ".copy-feedback"))
        .or_else(|| document.query_selector(".copy-feedback").ok().flatten())
}

pub(crate) async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    match write_async_clipboard(text).await {
        Ok(()) => Ok(()),
        Err(err) => {
            gloo::console::log!("clipboard: async write unavailable, using fallback", js_err(err));
            copy_with_textarea(text).map_err(js_err)
        }
    }
}

async fn write_async_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("clipboard unavailable"));
    }
    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<Function>()?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<Promise>()?;
    JsFuture::from(promise).await?;
    Ok(())
}

fn copy_with_textarea(text: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("missing document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("missing body"))?;
    let area = document
        .create_element("textarea")?
        .dyn_into::<HtmlTextAreaElement>()?;
    area.set_value(text);
    area.set_attribute("readonly", "")?;
    set_style(&area, "position", "fixed");
    set_style(&area, "opacity", "0");
    body.append_child(&area)?;
    area.select();
    let copied = document
        .dyn_ref::<HtmlDocument>()
        .ok_or_else(|| JsValue::from_str("not an html document"))
        .and_then(|html| html.exec_command("copy"));
    area.remove();
    if copied? {
        Ok(())
    } else {
        Err(JsValue::from_str("copy command rejected"))
    }
}
