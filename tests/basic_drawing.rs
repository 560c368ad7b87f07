// tests/basic_drawing.rs
use glam::DVec2;
use std::io::Cursor;
use turtle_lsystem::{
    Alphabet, DEFAULT_HEADING, DrawRules, LSystem, Paint, PathCommand, RenderError, RuleTable,
    TurtleConfig, TurtleOp, TurtleRenderer, TurtleState,
};

fn setup() -> DrawRules {
    let mut rules = DrawRules::new();
    rules
        .add('A', TurtleOp::Forward(10))
        .add('-', TurtleOp::Turn(-60))
        .add('+', TurtleOp::Turn(60))
        .add_brackets();
    rules
}

fn assert_close(actual: DVec2, expected: DVec2) {
    assert!(
        actual.abs_diff_eq(expected, 1e-9),
        "expected {expected:?}, got {actual:?}"
    );
}

fn line_ends(path: &[PathCommand]) -> Vec<DVec2> {
    path.iter()
        .filter_map(|c| match c {
            PathCommand::LineTo(p) => Some(*p),
            PathCommand::MoveTo(_) => None,
        })
        .collect()
}

#[test]
fn test_turtle_starts_at_centre() {
    let renderer = TurtleRenderer::new(101, 60, setup());
    let initial = renderer.initial_state();

    // Integer halving, as for odd widths.
    assert_eq!(initial.position, DVec2::new(50.0, 30.0));
    assert_eq!(initial.heading, DEFAULT_HEADING);
    assert_eq!(renderer.image().dimensions(), (101, 60));
}

#[test]
fn test_forward_turn_forward() {
    let mut renderer = TurtleRenderer::new(100, 100, setup());
    renderer.draw_str("A-A");

    let path = renderer.path();
    assert_eq!(path.len(), 3);
    assert_eq!(path[0], PathCommand::MoveTo(DVec2::new(50.0, 50.0)));

    let ends = line_ends(path);
    // Heading 90 points along +X.
    assert_close(ends[0], DVec2::new(60.0, 50.0));
    // Heading 30: sin gives X, cos gives Y.
    assert_close(ends[1], DVec2::new(65.0, 50.0 + 10.0 * 30f64.to_radians().cos()));

    let state = renderer.state();
    assert_eq!(state.heading, 30.0);
    assert_eq!(state.position, ends[1]);
}

#[test]
fn test_forward_matches_axis_convention_exactly() {
    let mut renderer = TurtleRenderer::new(100, 100, setup());
    renderer.draw_str("-A");

    let heading = 30f64.to_radians();
    let expected = DVec2::new(heading.sin() * 10.0 + 50.0, heading.cos() * 10.0 + 50.0);
    assert_eq!(renderer.state().position, expected);
}

#[test]
fn test_turns_are_not_normalised() {
    let mut renderer = TurtleRenderer::new(10, 10, setup());
    renderer.draw_str("++++++++");
    assert_eq!(renderer.state().heading, DEFAULT_HEADING + 480.0);

    renderer.draw_str("------");
    assert_eq!(renderer.state().heading, DEFAULT_HEADING - 360.0);
}

#[test]
fn test_branch_does_not_move_trunk() {
    let mut branched = TurtleRenderer::new(100, 100, setup());
    branched.draw_str("A[+A]A");

    let mut straight = TurtleRenderer::new(100, 100, setup());
    straight.draw_str("AA");

    assert_eq!(branched.state(), straight.state());
    assert_eq!(branched.stack_depth(), 0);

    // The pop begins a new subpath at the saved position.
    let path = branched.path();
    assert_eq!(path.len(), 5);
    assert_eq!(path[3], PathCommand::MoveTo(DVec2::new(60.0, 50.0)));
}

#[test]
fn test_unmatched_pop_is_ignored() {
    let mut renderer = TurtleRenderer::new(100, 100, setup());
    renderer.draw_str("]]A]");

    let mut plain = TurtleRenderer::new(100, 100, setup());
    plain.draw_str("A");

    assert_eq!(renderer.path(), plain.path());
    assert_eq!(renderer.state(), plain.state());
}

#[test]
fn test_unbound_symbols_are_skipped() {
    let mut noisy = TurtleRenderer::new(100, 100, setup());
    noisy.draw_str("xAyz-QA");

    let mut clean = TurtleRenderer::new(100, 100, setup());
    clean.draw_str("A-A");

    assert_eq!(noisy.path(), clean.path());
    assert_eq!(noisy.image(), clean.image());
}

#[test]
fn test_empty_string_leaves_buffer_untouched() {
    let mut renderer = TurtleRenderer::new(32, 32, setup());
    renderer.draw_str("");

    assert_eq!(renderer.path(), &[PathCommand::MoveTo(DVec2::new(16.0, 16.0))]);
    assert!(renderer.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn test_stroke_reaches_buffer() {
    let config = TurtleConfig {
        background: Some([255, 255, 255, 255]),
        paint: Paint {
            line_width: 2.0,
            ..Paint::default()
        },
        ..TurtleConfig::default()
    };
    let mut renderer = TurtleRenderer::with_config(100, 100, setup(), config);
    renderer.draw_str("A");

    // Segment runs from (50, 50) to (60, 50); rows 49 and 50 straddle it.
    assert_eq!(renderer.image().get_pixel(55, 49).0, [0, 0, 0, 255]);
    assert_eq!(renderer.image().get_pixel(55, 50).0, [0, 0, 0, 255]);
    assert_eq!(renderer.image().get_pixel(5, 5).0, [255, 255, 255, 255]);
}

#[test]
fn test_configured_start() {
    let config = TurtleConfig {
        initial_heading: 0.0,
        initial_position: Some(DVec2::new(5.0, 5.0)),
        ..TurtleConfig::default()
    };
    let mut renderer = TurtleRenderer::with_config(64, 64, setup(), config);
    renderer.draw_str("A");

    // Heading 0 points along +Y.
    assert_eq!(renderer.initial_state(), TurtleState::new(DVec2::new(5.0, 5.0), 0.0));
    assert_eq!(renderer.state().position, DVec2::new(5.0, 15.0));
}

#[test]
fn test_stack_depth_limit_drops_pushes() {
    let config = TurtleConfig {
        max_stack_depth: Some(1),
        ..TurtleConfig::default()
    };
    let mut renderer = TurtleRenderer::with_config(100, 100, setup(), config);
    // Second push is dropped, so the first pop restores the outer save and
    // the second pop finds an empty stack.
    renderer.draw_str("[A[AA]]");

    assert_eq!(renderer.state().position, DVec2::new(50.0, 50.0));
    assert_eq!(renderer.stack_depth(), 0);
}

#[test]
fn test_draw_reads_lsystem_state() {
    let rules = RuleTable::new().with('A', "A+A");
    let mut system = LSystem::new("A", Alphabet::from_symbols("A", "+"), rules);
    system.run(2);

    let mut from_system = TurtleRenderer::new(100, 100, setup());
    from_system.draw(&system);

    let mut from_str = TurtleRenderer::new(100, 100, setup());
    from_str.draw_str("A+A+A+A");

    assert_eq!(from_system.path(), from_str.path());
    assert_eq!(line_ends(from_system.path()).len(), 4);
}

#[test]
fn test_redraw_rebuilds_path() {
    let mut renderer = TurtleRenderer::new(100, 100, setup());
    renderer.draw_str("[AAA");
    renderer.draw_str("A");

    assert_eq!(renderer.path().len(), 2);
    assert_eq!(renderer.stack_depth(), 0);
}

#[test]
fn test_write_png() {
    let mut renderer = TurtleRenderer::new(16, 16, setup());
    renderer.draw_str("A+A");

    let mut buffer = Cursor::new(Vec::new());
    renderer.write_png(&mut buffer).unwrap();

    let bytes = buffer.into_inner();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_save_png() {
    let mut renderer = TurtleRenderer::new(16, 16, setup());
    renderer.draw_str("A");

    let path = std::env::temp_dir().join(format!("turtle-lsystem-{}.png", std::process::id()));
    renderer.save_png(&path).unwrap();
    let written = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(&written[..4], b"\x89PNG");
}

#[test]
fn test_save_png_reports_io_failure() {
    let renderer = TurtleRenderer::new(4, 4, setup());
    let err = renderer
        .save_png("/nonexistent-dir/for/turtle.png")
        .unwrap_err();
    assert!(matches!(err, RenderError::Io(_)), "unexpected error: {err}");
}

#[test]
fn test_presets_serialize() {
    let rules = setup();
    let json = serde_json::to_string(&rules).unwrap();
    let restored: DrawRules = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, rules);

    let config: TurtleConfig = serde_json::from_str(
        &serde_json::to_string(&TurtleConfig::default()).unwrap(),
    )
    .unwrap();
    assert_eq!(config, TurtleConfig::default());

    let alphabet = Alphabet::from_symbols("XY", "F+-");
    let restored: Alphabet = serde_json::from_str(&serde_json::to_string(&alphabet).unwrap()).unwrap();
    assert_eq!(restored, alphabet);

    let grammar = RuleTable::new().with('X', "X+YF").with('Y', "FX-Y");
    let restored: RuleTable = serde_json::from_str(&serde_json::to_string(&grammar).unwrap()).unwrap();
    assert_eq!(restored, grammar);
    assert_eq!(restored.get('Y'), Some("FX-Y"));
}
