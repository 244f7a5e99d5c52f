use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::consent_banner::ConsentBanner;
use crate::contact::{ContactForm, CopyEmail};
use crate::lang_toggle::LangToggle;
use crate::particles_canvas::ParticleCanvas;
use crate::site_nav::SiteNav;

/// Everything installed on the page. Held for the page lifetime so the
/// listeners and timers stay attached.
struct Page {
    _nav: Rc<SiteNav>,
    _lang: Rc<LangToggle>,
    _contact: Option<Rc<ContactForm>>,
    _copy: Rc<CopyEmail>,
    _consent: Option<Rc<ConsentBanner>>,
    _particles: Option<Rc<ParticleCanvas>>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
    static PAGE_STARTED: Cell<bool> = Cell::new(false);
}

pub(crate) fn run() {
    if PAGE_STARTED.with(|started| started.replace(true)) {
        return;
    }
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let lang = LangToggle::install(&document);
    let page = Page {
        _nav: SiteNav::install(&document),
        _contact: ContactForm::install(&document, Rc::clone(&lang)),
        _copy: CopyEmail::install(&document, Rc::clone(&lang)),
        _consent: ConsentBanner::install(&document),
        _particles: ParticleCanvas::install(&document),
        _lang: lang,
    };
    PAGE.with(|slot| {
        *slot.borrow_mut() = Some(page);
    });
    gloo::console::log!("page: ready");
}
