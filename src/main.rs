mod analytics;
mod consent_banner;
mod contact;
mod dom;
mod dom_view;
mod input;
mod lang_toggle;
mod page;
mod particles_canvas;
mod site_nav;
mod storage;

fn main() {
    page::run();
}
