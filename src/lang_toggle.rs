use std::cell::{Cell, RefCell};
use std::rc::Rc;

use braced_core::{leaf_text, Lang};
use gloo::events::EventListener;
use web_sys::{Document, Element};

use crate::dom::query_all;
use crate::storage::LocalStore;

const FLAG_EN: &str = r##"<svg class="lang-flag" viewBox="0 0 20 14" aria-hidden="true"><rect width="20" height="14" rx="2" fill="#012169"/><path d="M0 0L20 14M20 0L0 14" stroke="#fff" stroke-width="2.5"/><path d="M0 0L20 14M20 0L0 14" stroke="#C8102E" stroke-width="1.5"/><path d="M10 0V14M0 7H20" stroke="#fff" stroke-width="4"/><path d="M10 0V14M0 7H20" stroke="#C8102E" stroke-width="2.5"/></svg>"##;
const FLAG_ES: &str = r##"<svg class="lang-flag" viewBox="0 0 20 14" aria-hidden="true"><rect width="20" height="14" rx="2" fill="#c60b1e"/><rect y="4" width="20" height="6" fill="#ffc400"/></svg>"##;

/// Markup for the toggle button: flag and code of the language a click
/// switches to.
pub(crate) fn toggle_markup(current: Lang) -> String {
    let flag = match current.toggled() {
        Lang::En => FLAG_EN,
        Lang::Es => FLAG_ES,
    };
    format!("{flag} {}", current.toggle_label())
}

/// Writes `lang` into the document: `<html lang>`, every bilingual leaf and
/// the title.
pub(crate) fn apply_lang(document: &Document, lang: Lang) {
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("lang", lang.code());
    }
    for element in query_all(document, "[data-es]") {
        let value = element.get_attribute(lang.attr());
        if let Some(text) = leaf_text(element.child_element_count(), value.as_deref()) {
            element.set_text_content(Some(text));
        }
    }
    document.set_title(lang.document_title());
}

pub(crate) struct LangToggle {
    document: Document,
    button: Option<Element>,
    lang: Cell<Lang>,
    store: RefCell<LocalStore>,
    listeners: RefCell<Vec<EventListener>>,
}

impl LangToggle {
    pub(crate) fn install(document: &Document) -> Rc<Self> {
        let store = LocalStore::open();
        let lang = Lang::load(&store);
        let toggle = Rc::new(Self {
            document: document.clone(),
            button: document.get_element_by_id("lang-toggle"),
            lang: Cell::new(lang),
            store: RefCell::new(store),
            listeners: RefCell::new(Vec::new()),
        });
        toggle.apply(lang);
        toggle.install_listeners();
        toggle
    }

    pub(crate) fn current(&self) -> Lang {
        self.lang.get()
    }

    fn apply(&self, lang: Lang) {
        self.lang.set(lang);
        if let Some(button) = &self.button {
            button.set_inner_html(&toggle_markup(lang));
        }
        apply_lang(&self.document, lang);
    }

    fn install_listeners(self: &Rc<Self>) {
        let Some(button) = self.button.as_ref() else {
            gloo::console::warn!("lang: #lang-toggle missing");
            return;
        };
        let toggle = Rc::clone(self);
        let listener = EventListener::new(button, "click", move |_event| {
            let next = toggle.current().toggled();
            toggle.apply(next);
            next.save(&mut *toggle.store.borrow_mut());
        });
        self.listeners.borrow_mut().push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_offers_the_other_language() {
        let spanish = toggle_markup(Lang::Es);
        assert!(spanish.starts_with(FLAG_EN));
        assert!(spanish.ends_with(" EN"));
        let english = toggle_markup(Lang::En);
        assert!(english.starts_with(FLAG_ES));
        assert!(english.ends_with(" ES"));
    }
}
