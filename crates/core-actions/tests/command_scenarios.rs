mod common;
use common::*;

use core_events::{KeyCode, ctrl};
use core_state::{ClipboardShape, Mode};
use pretty_assertions::assert_eq;

#[test]
fn d2w_cuts_two_words() {
    let mut h = Harness::new();
    h.tap(KeyCode::D);
    h.tap(KeyCode::Num2);
    h.press(KeyCode::W);
    assert_eq!(
        h.take(),
        Expect::new()
            .p(KeyCode::LeftShift)
            .t_n(ctrl(KeyCode::Right), 2)
            .r(KeyCode::LeftShift)
            .t(ctrl(KeyCode::X))
            .build()
    );
    assert_eq!(h.it.state().clipboard, ClipboardShape::Charwise);
    assert_eq!(h.mode(), Mode::Normal);
}

#[test]
fn shifted_yank_then_linewise_paste() {
    let mut h = Harness::new();
    h.keys("Y");
    assert_eq!(
        h.take(),
        Expect::new()
            .line_start()
            .p(KeyCode::LeftShift)
            .t(KeyCode::End)
            .r(KeyCode::LeftShift)
            .t(ctrl(KeyCode::C))
            .t(KeyCode::Left)
            .build()
    );
    assert_eq!(h.it.state().clipboard, ClipboardShape::Linewise);

    h.keys("1p");
    assert_eq!(
        h.take(),
        Expect::new()
            .t(KeyCode::End)
            .t(KeyCode::Enter)
            .t(ctrl(KeyCode::V))
            .t(KeyCode::Home)
            .build()
    );
}

#[test]
fn shifted_delete_cuts_to_line_end() {
    let mut h = Harness::new();
    h.press(KeyCode::LeftShift);
    h.tap(KeyCode::D);
    assert_eq!(
        h.take(),
        Expect::new()
            .p(KeyCode::LeftShift)
            .t(KeyCode::End)
            .r(KeyCode::LeftShift)
            .t(ctrl(KeyCode::X))
            .build()
    );
    assert_eq!(h.it.state().clipboard, ClipboardShape::Charwise);
}

#[test]
fn c3k_cuts_lines_upward_and_enters_insert() {
    let mut h = Harness::new();
    h.tap(KeyCode::C);
    h.tap(KeyCode::Num3);
    h.press(KeyCode::K);
    assert_eq!(
        h.take(),
        Expect::new()
            .t(KeyCode::End)
            .p(KeyCode::LeftShift)
            .t_n(KeyCode::Up, 2)
            .t(KeyCode::Home)
            .r(KeyCode::LeftShift)
            .t(ctrl(KeyCode::X))
            .t(KeyCode::Delete)
            .build()
    );
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.layers(), &[0]);
}

#[test]
fn double_tap_equals_down_motion() {
    let mut dd = Harness::new();
    dd.keys("dd");
    let mut dj = Harness::new();
    dj.keys("dj");
    let dd_out = dd.take();
    assert_eq!(dd_out, dj.take());
    assert_eq!(
        dd_out,
        Expect::new()
            .line_start()
            .p(KeyCode::LeftShift)
            .t(KeyCode::End)
            .r(KeyCode::LeftShift)
            .t(ctrl(KeyCode::X))
            .t(KeyCode::Delete)
            .build()
    );
}

#[test]
fn yank_word_collapses_left() {
    let mut h = Harness::new();
    h.keys("yb");
    assert_eq!(
        h.take(),
        Expect::new()
            .p(KeyCode::LeftShift)
            .t(ctrl(KeyCode::Left))
            .r(KeyCode::LeftShift)
            .t(ctrl(KeyCode::C))
            .t(KeyCode::Left)
            .build()
    );
}

#[test]
fn action_to_line_end_and_start() {
    let mut h = Harness::new();
    h.tap(KeyCode::D);
    h.press(KeyCode::LeftShift);
    h.tap(KeyCode::Num4);
    h.release(KeyCode::LeftShift);
    assert_eq!(
        h.take(),
        Expect::new()
            .p(KeyCode::LeftShift)
            .t(KeyCode::End)
            .r(KeyCode::LeftShift)
            .t(ctrl(KeyCode::X))
            .build()
    );
}

#[test]
fn charwise_paste_before_cursor() {
    let mut h = Harness::new();
    h.keys("yl");
    h.take();
    h.keys("2P");
    assert_eq!(
        h.take(),
        Expect::new()
            .t(KeyCode::Left)
            .t_n(ctrl(KeyCode::V), 2)
            .build()
    );
}

#[test]
fn indent_double_tap() {
    let mut h = Harness::new();
    h.press(KeyCode::LeftShift);
    h.tap(KeyCode::Dot);
    h.tap(KeyCode::Dot);
    h.release(KeyCode::LeftShift);
    assert_eq!(
        h.take(),
        Expect::new().line_start().t_n(KeyCode::Space, 2).build()
    );
}

#[test]
fn indent_with_motion_repeat_and_dedent() {
    let mut h = Harness::new();
    h.press(KeyCode::LeftShift);
    h.tap(KeyCode::Dot);
    h.release(KeyCode::LeftShift);
    h.keys("1k");
    let indent = Expect::new()
        .line_start()
        .t_n(KeyCode::Space, 2)
        .t(KeyCode::Up)
        .t(KeyCode::Home)
        .t_n(KeyCode::Space, 2)
        .t(KeyCode::Down)
        .t(KeyCode::Home)
        .build();
    assert_eq!(h.take(), indent);

    h.keys(".");
    assert_eq!(h.take(), indent);

    h.press(KeyCode::LeftShift);
    h.tap(KeyCode::Comma);
    h.release(KeyCode::LeftShift);
    h.keys("1k");
    assert_eq!(
        h.take(),
        Expect::new()
            .line_start()
            .t_n(KeyCode::Delete, 2)
            .t(KeyCode::Up)
            .t_n(KeyCode::Delete, 2)
            .t(KeyCode::Down)
            .t(KeyCode::Home)
            .build()
    );
}

#[test]
fn comma_dedents_without_latch() {
    let mut h = Harness::new();
    h.keys(",,");
    assert_eq!(
        h.take(),
        Expect::new().line_start().t_n(KeyCode::Delete, 2).build()
    );
}

#[test]
fn indent_size_follows_options() {
    let mut h = Harness::with_options(core_actions::InterpreterOptions {
        indent_size: 4,
        ..Default::default()
    });
    h.keys(",,");
    assert_eq!(
        h.take(),
        Expect::new().line_start().t_n(KeyCode::Delete, 4).build()
    );
}

#[test]
fn join_lines_repeats() {
    let mut h = Harness::new();
    h.tap(KeyCode::Num2);
    h.press(KeyCode::LeftShift);
    h.press(KeyCode::J);
    assert_eq!(
        h.take(),
        Expect::new()
            .t(KeyCode::End)
            .t(KeyCode::Delete)
            .t(KeyCode::Space)
            .t(KeyCode::End)
            .t(KeyCode::Delete)
            .t(KeyCode::Space)
            .build()
    );
    // No motion is held for a join.
    assert!(!h.release(KeyCode::J));
    assert!(h.take().is_empty());
}

#[test]
fn undo_then_multiplied_replay() {
    let mut h = Harness::new();
    h.keys("34u5.");
    assert_eq!(
        h.take(),
        Expect::new().t_n(ctrl(KeyCode::Z), 34 + 34 * 5).build()
    );
    assert_eq!(h.it.pending().previous().map(|c| c.repeat), Some(170));
}

#[test]
fn replay_without_prefix_repeats_unchanged() {
    let mut h = Harness::new();
    h.keys("3u");
    h.take();
    h.keys(".");
    assert_eq!(h.take(), Expect::new().t_n(ctrl(KeyCode::Z), 3).build());
}

#[test]
fn replay_without_history_is_silent() {
    let mut h = Harness::new();
    h.keys("7.");
    assert!(h.take().is_empty());
    assert_eq!(h.it.pending().current().repeat, 0);
}

#[test]
fn replay_of_delete_reissues_selection() {
    let mut h = Harness::new();
    h.keys("dw");
    let first = h.take();
    h.keys(".");
    assert_eq!(h.take(), first);
}
