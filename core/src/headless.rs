use crate::gesture::ScrollMetrics;
use crate::view::NavView;

/// Recording [`NavView`] with no document behind it.
#[derive(Clone, Debug)]
pub struct HeadlessView {
    pub viewport_width: f32,
    pub panel_height: f32,
    pub panels_offset: f32,
    pub panels_transition: bool,
    pub panel_active: Vec<bool>,
    pub tab_active: Vec<bool>,
    pub slides_offset: Vec<f32>,
    pub slides_transition: Vec<bool>,
    pub slide_active: Vec<Vec<bool>>,
    pub dot_active: Vec<Vec<bool>>,
    pub scroll: Vec<Vec<ScrollMetrics>>,
    pub menu_closes: u32,
}

impl HeadlessView {
    pub fn new(slide_counts: &[usize], viewport_width: f32, panel_height: f32) -> Self {
        let fitting = ScrollMetrics::new(0.0, panel_height, panel_height);
        Self {
            viewport_width,
            panel_height,
            panels_offset: 0.0,
            panels_transition: true,
            panel_active: vec![false; slide_counts.len()],
            tab_active: vec![false; slide_counts.len()],
            slides_offset: vec![0.0; slide_counts.len()],
            slides_transition: vec![true; slide_counts.len()],
            slide_active: slide_counts.iter().map(|count| vec![false; *count]).collect(),
            dot_active: slide_counts.iter().map(|count| vec![false; *count]).collect(),
            scroll: slide_counts
                .iter()
                .map(|count| vec![fitting; *count])
                .collect(),
            menu_closes: 0,
        }
    }

    pub fn active_panels(&self) -> Vec<usize> {
        indices_of(&self.panel_active)
    }

    pub fn active_tabs(&self) -> Vec<usize> {
        indices_of(&self.tab_active)
    }

    pub fn active_slides(&self, panel: usize) -> Vec<usize> {
        self.slide_active
            .get(panel)
            .map(|flags| indices_of(flags))
            .unwrap_or_default()
    }

    pub fn active_dots(&self, panel: usize) -> Vec<usize> {
        self.dot_active
            .get(panel)
            .map(|flags| indices_of(flags))
            .unwrap_or_default()
    }

    pub fn set_scroll(&mut self, panel: usize, slide: usize, metrics: ScrollMetrics) {
        if let Some(slot) = self.scroll.get_mut(panel).and_then(|row| row.get_mut(slide)) {
            *slot = metrics;
        }
    }
}

fn indices_of(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(index, flag)| flag.then_some(index))
        .collect()
}

impl NavView for HeadlessView {
    fn panel_count(&self) -> usize {
        self.panel_active.len()
    }

    fn slide_count(&self, panel: usize) -> usize {
        self.slide_active.get(panel).map_or(0, Vec::len)
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn panel_height(&self, _panel: usize) -> f32 {
        self.panel_height
    }

    fn slide_scroll(&self, panel: usize, slide: usize) -> ScrollMetrics {
        self.scroll
            .get(panel)
            .and_then(|row| row.get(slide))
            .copied()
            .unwrap_or_default()
    }

    fn set_panels_offset(&mut self, offset_x: f32) {
        self.panels_offset = offset_x;
    }

    fn set_panels_transition(&mut self, enabled: bool) {
        self.panels_transition = enabled;
    }

    fn set_panel_active(&mut self, panel: usize, active: bool) {
        self.panel_active[panel] = active;
    }

    fn set_tab_active(&mut self, tab: usize, active: bool) {
        self.tab_active[tab] = active;
    }

    fn set_slides_offset(&mut self, panel: usize, offset_y: f32) {
        self.slides_offset[panel] = offset_y;
    }

    fn set_slides_transition(&mut self, panel: usize, enabled: bool) {
        self.slides_transition[panel] = enabled;
    }

    fn set_dot_active(&mut self, panel: usize, slide: usize, active: bool) {
        self.dot_active[panel][slide] = active;
    }

    fn set_slide_active(&mut self, panel: usize, slide: usize, active: bool) {
        self.slide_active[panel][slide] = active;
    }

    fn reset_slide_scroll(&mut self, panel: usize, slide: usize) {
        if let Some(slot) = self.scroll.get_mut(panel).and_then(|row| row.get_mut(slide)) {
            slot.scroll_top = 0.0;
        }
    }

    fn close_menu(&mut self) {
        self.menu_closes += 1;
    }
}
