use braced_core::NavKey;
use web_sys::{KeyboardEvent, TouchEvent, TouchList, WheelEvent};

/// Pixels per wheel line when the browser reports line-mode deltas.
pub(crate) const WHEEL_LINE_PX: f32 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WheelDeltaMode {
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    pub(crate) fn from_dom(value: u32) -> Self {
        match value {
            1 => WheelDeltaMode::Line,
            2 => WheelDeltaMode::Page,
            _ => WheelDeltaMode::Pixel,
        }
    }
}

pub(crate) fn normalize_wheel_delta(delta: f64, mode: WheelDeltaMode, page_px: f32) -> f32 {
    let delta = delta as f32;
    match mode {
        WheelDeltaMode::Pixel => delta,
        WheelDeltaMode::Line => delta * WHEEL_LINE_PX,
        WheelDeltaMode::Page => delta * page_px.max(1.0),
    }
}

pub(crate) fn wheel_delta_px(event: &WheelEvent, page_px: f32) -> f32 {
    normalize_wheel_delta(
        event.delta_y(),
        WheelDeltaMode::from_dom(event.delta_mode()),
        page_px,
    )
}

pub(crate) fn nav_key_from_str(key: &str) -> Option<NavKey> {
    match key {
        "ArrowLeft" => Some(NavKey::Left),
        "ArrowRight" => Some(NavKey::Right),
        "ArrowUp" => Some(NavKey::Up),
        "ArrowDown" => Some(NavKey::Down),
        _ => None,
    }
}

pub(crate) fn nav_key(event: &KeyboardEvent) -> Option<NavKey> {
    nav_key_from_str(&event.key())
}

fn first_client_y(list: TouchList) -> Option<f32> {
    list.get(0).map(|touch| touch.client_y() as f32)
}

pub(crate) fn touch_start_y(event: &TouchEvent) -> Option<f32> {
    first_client_y(event.touches())
}

pub(crate) fn touch_end_y(event: &TouchEvent) -> Option<f32> {
    first_client_y(event.changed_touches())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_deltas_pass_through() {
        assert_eq!(normalize_wheel_delta(-37.5, WheelDeltaMode::Pixel, 900.0), -37.5);
    }

    #[test]
    fn line_and_page_deltas_scale_to_pixels() {
        assert_eq!(normalize_wheel_delta(3.0, WheelDeltaMode::Line, 900.0), 48.0);
        assert_eq!(normalize_wheel_delta(-1.0, WheelDeltaMode::Page, 900.0), -900.0);
        assert_eq!(normalize_wheel_delta(1.0, WheelDeltaMode::Page, 0.0), 1.0);
    }

    #[test]
    fn unknown_delta_mode_reads_as_pixels() {
        assert_eq!(WheelDeltaMode::from_dom(0), WheelDeltaMode::Pixel);
        assert_eq!(WheelDeltaMode::from_dom(1), WheelDeltaMode::Line);
        assert_eq!(WheelDeltaMode::from_dom(2), WheelDeltaMode::Page);
        assert_eq!(WheelDeltaMode::from_dom(7), WheelDeltaMode::Pixel);
    }

    #[test]
    fn only_arrow_keys_navigate() {
        assert_eq!(nav_key_from_str("ArrowLeft"), Some(NavKey::Left));
        assert_eq!(nav_key_from_str("ArrowRight"), Some(NavKey::Right));
        assert_eq!(nav_key_from_str("ArrowUp"), Some(NavKey::Up));
        assert_eq!(nav_key_from_str("ArrowDown"), Some(NavKey::Down));
        assert_eq!(nav_key_from_str("PageDown"), None);
        assert_eq!(nav_key_from_str("arrowleft"), None);
    }
}
