use crate::gesture::ScrollMetrics;

/// Rendering side of the navigator: geometry reads and marker/transform
/// writes. Indices passed in are always in range for the counts reported.
pub trait NavView {
    fn panel_count(&self) -> usize;
    fn slide_count(&self, panel: usize) -> usize;
    fn viewport_width(&self) -> f32;
    fn panel_height(&self, panel: usize) -> f32;
    fn slide_scroll(&self, panel: usize, slide: usize) -> ScrollMetrics;

    fn set_panels_offset(&mut self, offset_x: f32);
    fn set_panels_transition(&mut self, enabled: bool);
    fn set_panel_active(&mut self, panel: usize, active: bool);
    fn set_tab_active(&mut self, tab: usize, active: bool);
    fn set_slides_offset(&mut self, panel: usize, offset_y: f32);
    fn set_slides_transition(&mut self, panel: usize, enabled: bool);
    fn set_dot_active(&mut self, panel: usize, slide: usize, active: bool);
    fn set_slide_active(&mut self, panel: usize, slide: usize, active: bool);
    fn reset_slide_scroll(&mut self, panel: usize, slide: usize);
    fn close_menu(&mut self);
}
