use braced_core::{HeadlessView, InputResponse, Navigator, ScrollMetrics, VirtualClock};

fn setup(counts: &[usize]) -> (Navigator<HeadlessView>, VirtualClock) {
    let view = HeadlessView::new(counts, 1280.0, 800.0);
    let mut nav = Navigator::new(view);
    nav.start();
    (nav, VirtualClock::new())
}

#[test]
fn wheel_below_threshold_changes_nothing() {
    let (mut nav, _clock) = setup(&[3]);
    assert_eq!(nav.on_wheel(20.0), InputResponse::Consumed);
    assert_eq!(nav.on_wheel(20.0), InputResponse::Consumed);
    assert_eq!(nav.current_slide(0), Some(0));
    assert_eq!(nav.wheel_accumulated(), 40.0);
    assert!(!nav.is_animating());
}

#[test]
fn wheel_crossing_threshold_steps_once_and_resets() {
    let (mut nav, mut clock) = setup(&[3]);
    nav.on_wheel(30.0);
    nav.on_wheel(30.0);
    assert_eq!(nav.current_slide(0), Some(1));
    assert_eq!(nav.wheel_accumulated(), 0.0);

    // Blocked while the transition runs.
    nav.on_wheel(200.0);
    assert_eq!(nav.current_slide(0), Some(1));
    assert_eq!(nav.wheel_accumulated(), 0.0);

    clock.advance(&mut nav, 900.0);
    nav.on_wheel(-75.0);
    assert_eq!(nav.current_slide(0), Some(0));
    assert_eq!(nav.wheel_accumulated(), 0.0);
}

#[test]
fn wheel_accumulator_decays_after_inactivity() {
    let (mut nav, mut clock) = setup(&[3]);
    nav.on_wheel(30.0);
    clock.advance(&mut nav, 150.0);
    nav.on_wheel(10.0);
    assert_eq!(nav.wheel_accumulated(), 40.0);

    // The first decay timer was superseded by the second push.
    clock.advance(&mut nav, 100.0);
    assert_eq!(nav.wheel_accumulated(), 40.0);

    clock.advance(&mut nav, 100.0);
    assert_eq!(nav.wheel_accumulated(), 0.0);

    nav.on_wheel(30.0);
    assert_eq!(nav.current_slide(0), Some(0));
}

#[test]
fn wheel_up_at_top_of_overflowing_slide_does_not_change_slide() {
    let (mut nav, _clock) = setup(&[3]);
    nav.view_mut()
        .set_scroll(0, 0, ScrollMetrics::new(0.0, 2000.0, 800.0));
    assert_eq!(nav.on_wheel(-80.0), InputResponse::Consumed);
    assert_eq!(nav.current_slide(0), Some(0));
    assert!(!nav.is_animating());
}

#[test]
fn wheel_inside_overflow_passes_through_to_native_scroll() {
    let (mut nav, _clock) = setup(&[3]);
    nav.view_mut()
        .set_scroll(0, 0, ScrollMetrics::new(300.0, 2000.0, 800.0));
    assert_eq!(nav.on_wheel(-80.0), InputResponse::PassThrough);
    assert_eq!(nav.on_wheel(80.0), InputResponse::PassThrough);
    assert_eq!(nav.wheel_accumulated(), 0.0);
    assert_eq!(nav.view().slides_offset[0], 0.0);
    assert_eq!(nav.current_slide(0), Some(0));
}

#[test]
fn wheel_at_bottom_of_overflow_advances() {
    let (mut nav, _clock) = setup(&[3]);
    nav.view_mut()
        .set_scroll(0, 0, ScrollMetrics::new(1200.0, 2000.0, 800.0));
    assert_eq!(nav.on_wheel(90.0), InputResponse::Consumed);
    assert_eq!(nav.current_slide(0), Some(1));
}

#[test]
fn long_swipe_steps_once_in_its_direction() {
    let (mut nav, mut clock) = setup(&[3]);
    nav.on_touch_start(500.0, 0.0);
    nav.on_touch_end(380.0, 1000.0);
    assert_eq!(nav.current_slide(0), Some(1));

    clock.advance(&mut nav, 900.0);
    nav.on_touch_start(300.0, 2000.0);
    nav.on_touch_end(360.0, 2600.0);
    assert_eq!(nav.current_slide(0), Some(0));
}

#[test]
fn quick_short_swipe_steps() {
    let (mut nav, _clock) = setup(&[3]);
    nav.on_touch_start(500.0, 0.0);
    nav.on_touch_end(475.0, 200.0);
    assert_eq!(nav.current_slide(0), Some(1));
}

#[test]
fn slow_or_tiny_swipes_are_ignored() {
    let (mut nav, _clock) = setup(&[3]);
    nav.on_touch_start(500.0, 0.0);
    nav.on_touch_end(485.0, 800.0);
    assert_eq!(nav.current_slide(0), Some(0));

    nav.on_touch_start(500.0, 1000.0);
    nav.on_touch_end(475.0, 1500.0);
    assert_eq!(nav.current_slide(0), Some(0));

    nav.on_touch_start(500.0, 2000.0);
    nav.on_touch_end(485.0, 2100.0);
    assert_eq!(nav.current_slide(0), Some(0));
    assert!(!nav.is_animating());
}

#[test]
fn swipe_inside_overflow_is_left_to_native_scroll() {
    let (mut nav, _clock) = setup(&[3]);
    nav.view_mut()
        .set_scroll(0, 0, ScrollMetrics::new(200.0, 2000.0, 800.0));
    nav.on_touch_start(500.0, 0.0);
    nav.on_touch_end(400.0, 150.0);
    assert_eq!(nav.current_slide(0), Some(0));
}
