use braced_core::{
    HeadlessView, InputResponse, NavKey, Navigator, PanelKeyError, TransitionPhase, VirtualClock,
};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 800.0;

fn setup(counts: &[usize]) -> (Navigator<HeadlessView>, VirtualClock) {
    let view = HeadlessView::new(counts, WIDTH, HEIGHT);
    let mut nav = Navigator::new(view);
    nav.start();
    (nav, VirtualClock::new())
}

#[test]
fn start_marks_first_panel_and_first_slides() {
    let (nav, _clock) = setup(&[3, 2, 4]);
    assert_eq!(nav.view().active_panels(), vec![0]);
    assert_eq!(nav.view().active_tabs(), vec![0]);
    for panel in 0..3 {
        assert_eq!(nav.view().active_slides(panel), vec![0]);
        assert_eq!(nav.view().active_dots(panel), vec![0]);
    }
}

#[test]
fn go_to_panel_marks_exactly_one_panel_and_tab() {
    let (mut nav, _clock) = setup(&[3, 2, 4, 1, 2]);
    for panel in [3, 1, 4, 0, 2] {
        nav.go_to_panel(panel);
        assert_eq!(nav.current_panel(), panel);
        assert_eq!(nav.view().active_panels(), vec![panel]);
        assert_eq!(nav.view().active_tabs(), vec![panel]);
        assert_eq!(nav.view().panels_offset, -(panel as f32) * WIDTH);
    }
    assert_eq!(nav.view().menu_closes, 5);
}

#[test]
fn go_to_panel_out_of_range_is_noop() {
    let (mut nav, _clock) = setup(&[2, 2]);
    nav.go_to_panel(1);
    nav.drain_scheduled();
    let closes = nav.view().menu_closes;
    nav.go_to_panel(2);
    assert_eq!(nav.current_panel(), 1);
    assert_eq!(nav.view().menu_closes, closes);
    assert!(nav.drain_scheduled().is_empty());
}

#[test]
fn go_to_panel_resets_slide_without_animating_the_snap() {
    let (mut nav, mut clock) = setup(&[2, 2, 3]);
    nav.go_to_panel(2);
    clock.advance(&mut nav, 250.0);
    assert_eq!(nav.view().active_slides(2), vec![0]);

    nav.go_to_slide(2, 2);
    clock.advance(&mut nav, 900.0);
    assert_eq!(nav.current_slide(2), Some(2));
    assert_eq!(nav.view().active_slides(2), vec![2]);
    assert_eq!(nav.view().slides_offset[2], -2.0 * HEIGHT);

    nav.go_to_panel(0);
    nav.go_to_panel(2);
    assert_eq!(nav.current_slide(2), Some(0));
    assert_eq!(nav.view().slides_offset[2], 0.0);
    assert!(!nav.view().slides_transition[2]);
    assert!(nav.view().active_slides(2).is_empty());
    assert_eq!(nav.view().active_dots(2), vec![0]);

    clock.advance(&mut nav, 40.0);
    assert!(nav.view().slides_transition[2]);
    assert!(nav.view().active_slides(2).is_empty());

    clock.advance(&mut nav, 200.0);
    assert_eq!(nav.view().active_slides(2), vec![0]);
}

#[test]
fn go_to_slide_activates_after_delay_and_settles() {
    let (mut nav, mut clock) = setup(&[3]);
    nav.go_to_slide(0, 1);
    assert!(nav.is_animating());
    assert_eq!(nav.current_slide(0), Some(1));
    assert!(nav.view().active_slides(0).is_empty());
    assert_eq!(nav.view().active_dots(0), vec![1]);
    assert_eq!(nav.view().slides_offset[0], -HEIGHT);
    assert_eq!(
        nav.phase(),
        TransitionPhase::Transitioning { panel: 0, slide: 1 }
    );

    clock.advance(&mut nav, 50.0);
    assert!(nav.view().active_slides(0).is_empty());

    clock.advance(&mut nav, 60.0);
    assert_eq!(nav.view().active_slides(0), vec![1]);
    assert_eq!(nav.phase(), TransitionPhase::Settling { panel: 0, slide: 1 });

    clock.advance(&mut nav, 800.0);
    assert_eq!(nav.phase(), TransitionPhase::Idle);
    assert!(!nav.is_animating());
}

#[test]
fn go_to_slide_resets_destination_scroll() {
    let (mut nav, _clock) = setup(&[3]);
    nav.view_mut()
        .set_scroll(0, 2, braced_core::ScrollMetrics::new(320.0, 1600.0, 800.0));
    nav.go_to_slide(0, 2);
    assert_eq!(nav.view().scroll[0][2].scroll_top, 0.0);
}

#[test]
fn go_to_slide_out_of_range_changes_nothing() {
    let (mut nav, _clock) = setup(&[3, 2]);
    nav.go_to_slide(0, 3);
    nav.go_to_slide(5, 0);
    assert_eq!(nav.current_slide(0), Some(0));
    assert!(!nav.is_animating());
    assert!(nav.drain_scheduled().is_empty());
    assert_eq!(nav.view().active_slides(0), vec![0]);
}

#[test]
fn go_to_current_slide_mid_transition_is_noop() {
    let (mut nav, mut clock) = setup(&[3]);
    nav.go_to_slide(0, 1);
    clock.collect(&mut nav);
    assert_eq!(clock.pending_len(), 2);

    nav.go_to_slide(0, 1);
    assert!(nav.drain_scheduled().is_empty());
    assert_eq!(nav.current_slide(0), Some(1));
}

#[test]
fn newer_slide_transition_supersedes_pending_timers() {
    let (mut nav, mut clock) = setup(&[4]);
    nav.go_to_slide(0, 1);
    clock.advance(&mut nav, 50.0);
    nav.go_to_slide(0, 2);

    clock.advance(&mut nav, 100.0);
    assert_eq!(nav.view().active_slides(0), vec![2]);

    clock.advance(&mut nav, 740.0);
    assert!(nav.is_animating());

    clock.advance(&mut nav, 20.0);
    assert!(!nav.is_animating());
    assert_eq!(nav.view().active_slides(0), vec![2]);
}

#[test]
fn panel_switch_is_not_gated_by_slide_transition() {
    let (mut nav, mut clock) = setup(&[3, 3]);
    nav.go_to_slide(0, 1);
    nav.go_to_panel(1);
    assert_eq!(nav.current_panel(), 1);
    assert!(nav.is_animating());

    assert_eq!(nav.on_wheel(120.0), InputResponse::Consumed);
    assert_eq!(nav.current_slide(1), Some(0));

    clock.advance(&mut nav, 900.0);
    assert!(!nav.is_animating());
    // The hidden panel still finishes its own activation.
    assert_eq!(nav.view().active_slides(0), vec![1]);
    assert_eq!(nav.view().active_slides(1), vec![0]);
}

#[test]
fn keyboard_steps_panels_and_slides() {
    let (mut nav, mut clock) = setup(&[3, 2]);
    assert_eq!(nav.on_key(NavKey::Left), InputResponse::PassThrough);
    assert_eq!(nav.current_panel(), 0);

    assert_eq!(nav.on_key(NavKey::Down), InputResponse::Consumed);
    assert_eq!(nav.current_slide(0), Some(1));
    clock.advance(&mut nav, 900.0);

    assert_eq!(nav.on_key(NavKey::Up), InputResponse::Consumed);
    assert_eq!(nav.current_slide(0), Some(0));
    clock.advance(&mut nav, 900.0);

    assert_eq!(nav.on_key(NavKey::Up), InputResponse::Consumed);
    assert!(!nav.is_animating());

    nav.on_key(NavKey::Right);
    nav.on_key(NavKey::Right);
    assert_eq!(nav.current_panel(), 1);
}

#[test]
fn keywords_resolve_to_configured_panels() {
    let (mut nav, _clock) = setup(&[1, 1, 1, 1, 1]);
    nav.go_to_keyword("casos").unwrap();
    assert_eq!(nav.current_panel(), 2);
    nav.go_to_keyword("contacto").unwrap();
    assert_eq!(nav.current_panel(), 4);

    let err = nav.go_to_keyword("blog").unwrap_err();
    assert_eq!(err, PanelKeyError::Unknown("blog".to_string()));
    assert_eq!(nav.current_panel(), 4);
}

#[test]
fn resize_reasserts_offsets_without_animation() {
    let (mut nav, mut clock) = setup(&[3, 2]);
    nav.go_to_slide(0, 2);
    clock.advance(&mut nav, 900.0);

    nav.view_mut().panel_height = 600.0;
    nav.view_mut().viewport_width = 1000.0;
    nav.on_resize();
    assert_eq!(nav.view().slides_offset[0], -1200.0);
    assert!(!nav.view().slides_transition[0]);
    assert!(nav.view().slides_transition[1]);
    assert_eq!(nav.view().panels_offset, 0.0);

    clock.advance(&mut nav, 40.0);
    assert!(nav.view().slides_transition[0]);
    assert!(nav.view().panels_transition);
}

#[test]
fn resize_snaps_panels_track_without_sliding() {
    let (mut nav, mut clock) = setup(&[1, 1, 1]);
    nav.go_to_panel(2);
    assert!(nav.view().panels_transition);
    clock.advance(&mut nav, 900.0);

    nav.view_mut().viewport_width = 1600.0;
    nav.on_resize();
    assert!(!nav.view().panels_transition);
    assert_eq!(nav.view().panels_offset, -3200.0);

    clock.advance(&mut nav, 16.0);
    assert!(!nav.view().panels_transition);
    clock.advance(&mut nav, 24.0);
    assert!(nav.view().panels_transition);
    assert_eq!(nav.view().panels_offset, -3200.0);
}

#[test]
fn narrow_viewport_toggles_panels_without_translation() {
    let view = HeadlessView::new(&[1, 1, 1, 1], 480.0, 700.0);
    let mut nav = Navigator::new(view);
    nav.start();
    assert!(nav.is_narrow());
    nav.go_to_panel(3);
    assert_eq!(nav.view().panels_offset, 0.0);
    assert_eq!(nav.view().active_panels(), vec![3]);
}
