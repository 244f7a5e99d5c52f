//! Document-backed [`NavView`]: builds the slide markup once at start-up and
//! applies navigator state as classes and inline transforms.

use braced_core::{NavView, ScrollMetrics};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement};

use crate::dom::{
    clear_style, create_div, html_element, js_err, query_all, query_in, set_class, set_style,
    toggle_class, viewport_size, ACTIVE_CLASS, OPEN_CLASS,
};

pub(crate) const ACTIVE_SLIDE_CLASS: &str = "active-slide";

struct SlideTrackDom {
    scroll: HtmlElement,
    track: HtmlElement,
    slides: Vec<HtmlElement>,
    dots: Vec<Element>,
}

pub(crate) struct DomNavView {
    panels_track: Option<HtmlElement>,
    panels: Vec<Element>,
    tabs: Vec<Element>,
    tracks: Vec<Option<SlideTrackDom>>,
    menu_toggle: Option<Element>,
    menu: Option<Element>,
}

impl DomNavView {
    pub(crate) fn build(document: &Document) -> Self {
        let panels = query_all(document, ".panel");
        let tracks = panels
            .iter()
            .enumerate()
            .map(|(index, panel)| {
                let scroll = query_in(panel, ".panel-scroll").and_then(html_element)?;
                match build_slide_track(document, scroll) {
                    Ok(track) => Some(track),
                    Err(err) => {
                        gloo::console::warn!("nav: slide markup failed for panel", index, js_err(err));
                        None
                    }
                }
            })
            .collect();
        let panels_track = document
            .get_element_by_id("panels-track")
            .and_then(html_element);
        if panels_track.is_none() {
            gloo::console::warn!("nav: #panels-track missing");
        }
        Self {
            panels_track,
            panels,
            tabs: query_all(document, ".nav-tab"),
            tracks,
            menu_toggle: document.get_element_by_id("menu-toggle"),
            menu: document.get_element_by_id("nav"),
        }
    }

    pub(crate) fn tabs(&self) -> &[Element] {
        &self.tabs
    }

    pub(crate) fn dots(&self, panel: usize) -> &[Element] {
        match self.tracks.get(panel) {
            Some(Some(track)) => &track.dots,
            _ => &[],
        }
    }

    pub(crate) fn menu_toggle(&self) -> Option<&Element> {
        self.menu_toggle.as_ref()
    }

    pub(crate) fn toggle_menu(&self) {
        for element in [&self.menu_toggle, &self.menu].into_iter().flatten() {
            toggle_class(element, OPEN_CLASS);
        }
    }

    fn track(&self, panel: usize) -> Option<&SlideTrackDom> {
        self.tracks.get(panel)?.as_ref()
    }

    fn slide(&self, panel: usize, slide: usize) -> Option<&HtmlElement> {
        self.track(panel)?.slides.get(slide)
    }
}

/// Wraps each direct child of `.panel-scroll` into `.slide > .slide-content`
/// inside a new `.slides-track`, then appends one dot button per slide.
fn build_slide_track(document: &Document, scroll: HtmlElement) -> Result<SlideTrackDom, JsValue> {
    let children = scroll.children();
    let originals: Vec<Element> = (0..children.length())
        .filter_map(|index| children.item(index))
        .collect();

    let track = create_div(document, "slides-track")?;
    let mut slides = Vec::with_capacity(originals.len());
    for child in originals {
        let slide = create_div(document, "slide")?;
        let content = create_div(document, "slide-content")?;
        content.append_child(&child)?;
        slide.append_child(&content)?;
        track.append_child(&slide)?;
        slides.push(slide);
    }
    scroll.append_child(&track)?;

    let row = create_div(document, "slide-dots")?;
    let mut dots = Vec::with_capacity(slides.len());
    for index in 0..slides.len() {
        let dot = document.create_element("button")?;
        dot.set_class_name("slide-dot");
        dot.set_attribute("type", "button")?;
        dot.set_attribute("aria-label", &format!("Slide {}", index + 1))?;
        row.append_child(&dot)?;
        dots.push(dot);
    }
    scroll.append_child(&row)?;

    Ok(SlideTrackDom {
        scroll,
        track,
        slides,
        dots,
    })
}

impl NavView for DomNavView {
    fn panel_count(&self) -> usize {
        self.panels.len()
    }

    fn slide_count(&self, panel: usize) -> usize {
        self.track(panel).map_or(0, |track| track.slides.len())
    }

    fn viewport_width(&self) -> f32 {
        viewport_size().0
    }

    fn panel_height(&self, panel: usize) -> f32 {
        self.track(panel)
            .map_or(0.0, |track| track.scroll.offset_height() as f32)
    }

    fn slide_scroll(&self, panel: usize, slide: usize) -> ScrollMetrics {
        let Some(slide) = self.slide(panel, slide) else {
            return ScrollMetrics::default();
        };
        ScrollMetrics::new(
            slide.scroll_top() as f32,
            slide.scroll_height() as f32,
            slide.client_height() as f32,
        )
    }

    fn set_panels_offset(&mut self, offset_x: f32) {
        if let Some(track) = &self.panels_track {
            set_style(track, "transform", &format!("translateX({offset_x}px)"));
        }
    }

    fn set_panels_transition(&mut self, enabled: bool) {
        let Some(track) = &self.panels_track else {
            return;
        };
        if enabled {
            clear_style(track, "transition");
        } else {
            set_style(track, "transition", "none");
        }
    }

    fn set_panel_active(&mut self, panel: usize, active: bool) {
        if let Some(element) = self.panels.get(panel) {
            set_class(element, ACTIVE_CLASS, active);
        }
    }

    fn set_tab_active(&mut self, tab: usize, active: bool) {
        if let Some(element) = self.tabs.get(tab) {
            set_class(element, ACTIVE_CLASS, active);
        }
    }

    fn set_slides_offset(&mut self, panel: usize, offset_y: f32) {
        if let Some(track) = self.track(panel) {
            set_style(&track.track, "transform", &format!("translateY({offset_y}px)"));
        }
    }

    fn set_slides_transition(&mut self, panel: usize, enabled: bool) {
        let Some(track) = self.track(panel) else {
            return;
        };
        if enabled {
            clear_style(&track.track, "transition");
        } else {
            set_style(&track.track, "transition", "none");
        }
    }

    fn set_dot_active(&mut self, panel: usize, slide: usize, active: bool) {
        if let Some(dot) = self.dots(panel).get(slide) {
            set_class(dot, ACTIVE_CLASS, active);
        }
    }

    fn set_slide_active(&mut self, panel: usize, slide: usize, active: bool) {
        if let Some(element) = self.slide(panel, slide) {
            set_class(element, ACTIVE_SLIDE_CLASS, active);
        }
    }

    fn reset_slide_scroll(&mut self, panel: usize, slide: usize) {
        if let Some(element) = self.slide(panel, slide) {
            element.set_scroll_top(0);
        }
    }

    fn close_menu(&mut self) {
        for element in [&self.menu_toggle, &self.menu].into_iter().flatten() {
            set_class(element, OPEN_CLASS, false);
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn slide_track_wraps_each_child_and_adds_dots() {
        let document = web_sys::window().unwrap().document().unwrap();
        let scroll = create_div(&document, "panel-scroll").unwrap();
        for text in ["uno", "dos", "tres"] {
            let child = document.create_element("section").unwrap();
            child.set_text_content(Some(text));
            scroll.append_child(&child).unwrap();
        }
        document.body().unwrap().append_child(&scroll).unwrap();

        let track = build_slide_track(&document, scroll.clone()).unwrap();
        assert_eq!(track.slides.len(), 3);
        assert_eq!(track.dots.len(), 3);
        for (index, (slide, text)) in track.slides.iter().zip(["uno", "dos", "tres"]).enumerate() {
            assert_eq!(slide.class_name(), "slide");
            let content = query_in(slide, ".slide-content > section").unwrap();
            assert_eq!(content.text_content().as_deref(), Some(text));
            let label = format!("Slide {}", index + 1);
            assert_eq!(track.dots[index].get_attribute("aria-label").as_deref(), Some(label.as_str()));
        }
        assert_eq!(scroll.children().length(), 2);
        assert_eq!(
            scroll.first_element_child().unwrap().class_name(),
            "slides-track"
        );
        assert_eq!(
            scroll.last_element_child().unwrap().class_name(),
            "slide-dots"
        );
        let dots = query_all(&document, ".slide-dots .slide-dot");
        assert_eq!(dots.len(), 3);
        assert!(dots[0].dyn_ref::<HtmlElement>().is_some());

        scroll.remove();
    }
}
