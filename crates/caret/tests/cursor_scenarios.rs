use std::cell::RefCell;
use std::rc::Rc;

use caret::harness::{MonospaceMeasurer, SimField};
use caret::{
    CaretTracker, CursorPosition, FieldEvent, LocatorConfig, WrapCorrection, plain_text,
};
use css::compute_style;
use input_core::{CaretStrategy, FieldId};
use layout::{caret_line_index, layout_field_text};
use pretty_assertions::assert_eq;

fn assert_approx_eq(got: f32, want: f32) {
    let eps = 0.01;
    assert!(
        (got - want).abs() <= eps,
        "expected {want:.4}, got {got:.4}"
    );
}

fn tracker() -> CaretTracker {
    CaretTracker::new(Box::new(MonospaceMeasurer::default()))
}

type Published = Rc<RefCell<Vec<(FieldId, CursorPosition)>>>;

fn recording_config() -> (LocatorConfig, Published) {
    let published: Published = Rc::default();
    let sink = Rc::clone(&published);
    let config = LocatorConfig::default().on_change(move |id, pos| sink.borrow_mut().push((id, *pos)));
    (config, published)
}

fn measure(field: &mut SimField) -> CursorPosition {
    let mut t = tracker();
    t.attach(&*field, LocatorConfig::default());
    t.notify(field, FieldEvent::KeyUp).expect("tracked event")
}

/// Line the field itself paints the caret on, 12px lines at 10px/char.
fn field_line(field: &SimField, width: f32, caret: usize) -> usize {
    let style = compute_style(caret::SourceField::computed_style(field).declarations(), None);
    let value = plain_text(field);
    let lines = layout_field_text(&MonospaceMeasurer::default(), &style, width, &value, true);
    caret_line_index(&lines, &value, caret)
}

#[test]
fn caret_inside_first_line() {
    let mut field = SimField::textarea(1u32, "hello world").caret_at(5);
    let pos = measure(&mut field);
    assert_approx_eq(pos.position.left, 50.0);
    assert_approx_eq(pos.position.top, 9.0);
}

#[test]
fn caret_on_empty_line_between_paragraphs() {
    let text = "a\n\nb";
    let expected = [(0.0, 9.0), (10.0, 9.0), (0.0, 21.0), (0.0, 33.0), (10.0, 33.0)];
    for (caret, (left, top)) in expected.into_iter().enumerate() {
        let mut field = SimField::textarea(1u32, text).caret_at(caret);
        let pos = measure(&mut field);
        assert_approx_eq(pos.position.left, left);
        assert_approx_eq(pos.position.top, top);
        assert_eq!((pos.position.top / 12.0) as usize, field_line(&field, 200.0, caret));
    }
}

#[test]
fn wrapped_caret_lands_on_the_field_line() {
    let text = "hello world";
    for width in [50.0, 60.0, 80.0, 100.0] {
        for caret in 0..=text.len() {
            let mut field = SimField::textarea(1u32, text)
                .with_content_size(width, 120.0)
                .caret_at(caret);
            let pos = measure(&mut field);
            let mirror_line = (pos.position.top / 12.0) as usize;
            assert_eq!(
                mirror_line,
                field_line(&field, width, caret),
                "width {width}, caret {caret}"
            );
        }
    }
}

#[test]
fn word_filling_the_line_keeps_its_space_hanging() {
    let mut field = SimField::textarea(1u32, "hello world")
        .with_content_size(50.0, 120.0)
        .caret_at(8);
    let pos = measure(&mut field);
    assert_approx_eq(pos.position.left, 20.0);
    assert_approx_eq(pos.position.top, 21.0);
}

#[test]
fn words_wider_than_the_line_are_split_in_place() {
    let cases: [(&str, f32, &[usize]); 3] = [
        ("hello world foo bar", 30.0, &[1, 2]),
        ("hello world foo bar", 40.0, &[1, 2, 3]),
        ("aaaa bbbbbbbbbbbb c", 30.0, &[1, 2]),
    ];
    for (text, width, carets) in cases {
        for &caret in carets {
            let mut field = SimField::textarea(1u32, text)
                .with_content_size(width, 120.0)
                .caret_at(caret);
            let pos = measure(&mut field);
            assert_approx_eq(pos.position.top, 9.0);
            assert_eq!(field_line(&field, width, caret), 0, "{text:?} at {width}, caret {caret}");
        }
    }
}

#[test]
fn long_word_after_other_text_still_moves_down() {
    // "b" fits after "a " but the rest of the word does not, so the field
    // starts the whole word on the next line.
    let text = "aaaa bbbbbbbbbbbb c";
    let mut field = SimField::textarea(1u32, text)
        .with_content_size(30.0, 120.0)
        .caret_at(6);
    let mut t = tracker();
    t.attach(&field, LocatorConfig::default());
    let pos = t.notify(&mut field, FieldEvent::KeyUp).expect("position");

    let locator = t.locator(FieldId::from_raw(1)).expect("attached");
    assert_eq!(locator.last_correction(), WrapCorrection::BreakBeforeBeforeWord);
    assert_approx_eq(pos.position.left, 10.0);
    assert_approx_eq(pos.position.top, 33.0);
    assert_eq!(field_line(&field, 30.0, 6), 2);
}

#[test]
fn caret_inside_a_wrapped_word() {
    let mut field = SimField::textarea(1u32, "hello world")
        .with_content_size(80.0, 120.0)
        .caret_at(8);
    let pos = measure(&mut field);
    assert_approx_eq(pos.position.left, 20.0);
    assert_approx_eq(pos.position.top, 21.0);
}

#[test]
fn correction_is_reported_by_the_locator() {
    let mut field = SimField::textarea(7u32, "hello world")
        .with_content_size(80.0, 120.0)
        .caret_at(6);
    let mut t = tracker();
    t.attach(&field, LocatorConfig::default());
    t.notify(&mut field, FieldEvent::KeyDown);

    let locator = t.locator(FieldId::from_raw(7)).expect("attached");
    assert_eq!(locator.last_correction(), WrapCorrection::BreakAfterBeforeWord);
    let markup = locator.mirror().expect("mirror").inner_markup();
    assert!(markup.contains("</span>&#8203;<br class=\"jCursorPos-linebreak\">&#8203;"));
}

#[test]
fn repeated_updates_give_the_same_result() {
    let mut field = SimField::textarea(1u32, "some text\nmore").caret_at(12);
    let mut t = tracker();
    t.attach(&field, LocatorConfig::default());
    let first = t.notify(&mut field, FieldEvent::KeyUp);
    let first_markup = t.locator(FieldId::from_raw(1)).and_then(|l| l.mirror()).map(|m| m.inner_markup());
    let second = t.notify(&mut field, FieldEvent::KeyUp);
    let second_markup = t.locator(FieldId::from_raw(1)).and_then(|l| l.mirror()).map(|m| m.inner_markup());

    assert_eq!(first, second);
    assert_eq!(first_markup, second_markup);
}

#[test]
fn resize_resyncs_the_mirror() {
    let mut field = SimField::textarea(1u32, "hello world").caret_at(8);
    let mut t = tracker();
    t.attach(&field, LocatorConfig::default());

    let wide = t.notify(&mut field, FieldEvent::KeyUp).expect("position");
    assert_approx_eq(wide.position.left, 80.0);
    assert_approx_eq(wide.position.top, 9.0);

    field.resize(80.0, 120.0);
    let narrow = t.notify(&mut field, FieldEvent::KeyUp).expect("position");
    assert_approx_eq(narrow.position.left, 20.0);
    assert_approx_eq(narrow.position.top, 21.0);

    let mirror = t.locator(FieldId::from_raw(1)).and_then(|l| l.mirror()).expect("mirror");
    assert_eq!(mirror.style().get("width"), Some("80px"));
}

#[test]
fn scrollbar_goes_away_when_the_text_shrinks() {
    let mut field = SimField::textarea(1u32, &"word ".repeat(30)).with_content_size(100.0, 24.0);
    let mut t = tracker();
    t.attach(&field, LocatorConfig::default());
    t.notify(&mut field, FieldEvent::KeyUp);
    let overflow_y = |t: &CaretTracker| {
        t.locator(FieldId::from_raw(1))
            .and_then(|l| l.mirror())
            .and_then(|m| m.style().get("overflow-y").map(str::to_string))
    };
    assert_eq!(overflow_y(&t).as_deref(), Some("scroll"));

    field.buffer_mut().set_value("aaaaaaaa bb");
    field.resize(100.0, 48.0);
    let reused = t.notify(&mut field, FieldEvent::KeyUp).expect("position");
    assert_eq!(overflow_y(&t).as_deref(), Some("visible"));
    assert_approx_eq(reused.position.left, 20.0);
    assert_approx_eq(reused.position.top, 21.0);

    let fresh = measure(&mut field);
    assert_eq!(reused, fresh);
}

#[test]
fn single_line_input_never_wraps() {
    let mut field = SimField::input(1u32, "hello world")
        .with_content_size(50.0, 12.0)
        .caret_at(11);
    let pos = measure(&mut field);
    assert_approx_eq(pos.position.left, 110.0);
    assert_approx_eq(pos.position.top, 9.0);
}

#[test]
fn preserved_space_runs_keep_their_width() {
    let mut field = SimField::input(1u32, "a    b").caret_at(5);
    let pos = measure(&mut field);
    assert_approx_eq(pos.position.left, 50.0);
}

#[test]
fn legacy_range_probe_counts_characters() {
    let mut field = SimField::input(1u32, "abcdef").caret_at(3).legacy_only();
    let mut t = tracker();
    t.attach(&field, LocatorConfig::default());
    let pos = t.notify(&mut field, FieldEvent::PointerUp).expect("position");
    assert_approx_eq(pos.position.left, 30.0);

    let locator = t.locator(FieldId::from_raw(1)).expect("attached");
    assert_eq!(locator.last_strategy(), Some(CaretStrategy::RangeUnitCount));
}

#[test]
fn content_editable_counts_plain_text() {
    let mut field = SimField::content_editable(1u32, "<div>ab</div><div>c&amp;d</div>").caret_at(5);
    assert_eq!(plain_text(&field), "ab\nc&d");
    let pos = measure(&mut field);
    assert_approx_eq(pos.position.left, 20.0);
    assert_approx_eq(pos.position.top, 21.0);
}

#[test]
fn styles_are_injected_once() {
    let a = SimField::input(1u32, "a");
    let b = SimField::textarea(2u32, "b");
    let mut t = tracker();
    assert!(t.attach(&a, LocatorConfig::default()));
    assert!(t.attach(&b, LocatorConfig::default()));
    assert_eq!(t.document().style_tags().len(), 1);
    assert!(t.document().style_markup().contains(".jCursorPos-cursor"));
}

#[test]
fn reattaching_is_a_no_op() {
    let mut field = SimField::input(1u32, "abc").caret_at(1);
    let (config, published) = recording_config();
    let mut t = tracker();
    assert!(t.attach(&field, config));
    let (second, second_published) = recording_config();
    assert!(!t.attach(&field, second));

    t.notify(&mut field, FieldEvent::KeyUp);
    assert_eq!(published.borrow().len(), 1);
    assert!(second_published.borrow().is_empty());
}

#[test]
fn untracked_events_and_fields_are_ignored() {
    let mut field = SimField::input(1u32, "abc");
    let (config, published) = recording_config();
    let mut t = tracker();
    t.attach(&field, config);

    for event in [FieldEvent::Blur, FieldEvent::Scroll, FieldEvent::Input] {
        assert_eq!(t.notify(&mut field, event), None);
    }
    let mut stranger = SimField::input(2u32, "abc");
    assert_eq!(t.notify(&mut stranger, FieldEvent::KeyUp), None);
    assert!(published.borrow().is_empty());
}

#[test]
fn positions_are_published_and_written_back() {
    let mut field = SimField::textarea(3u32, "hello")
        .with_page_offset(100.0, 40.0)
        .with_scroll_offset(0.0, 6.0)
        .caret_at(2);
    let (config, published) = recording_config();
    let mut t = tracker();
    t.attach(&field, config);
    let pos = t.notify(&mut field, FieldEvent::Paste).expect("position");

    assert_eq!(published.borrow().as_slice(), &[(FieldId::from_raw(3), pos)]);
    let attr = |name: &str| -> f32 {
        field
            .data_attribute(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| panic!("missing {name}"))
    };
    assert_approx_eq(attr("data-jcursorpos-position-left"), 20.0);
    assert_approx_eq(attr("data-jcursorpos-position-top"), 9.0);
    assert_approx_eq(attr("data-jcursorpos-offset-left"), 120.0);
    assert_approx_eq(attr("data-jcursorpos-offset-top"), 43.0);
}

#[test]
fn custom_class_name_prefixes_everything() {
    let mut field = SimField::input(1u32, "abc").caret_at(1);
    let mut t = tracker();
    t.attach(&field, LocatorConfig::default().class_name("Caret"));
    t.notify(&mut field, FieldEvent::Focus);

    assert!(field.data_attribute("data-caret-position-left").is_some());
    let markup = t.locator(FieldId::from_raw(1)).and_then(|l| l.mirror()).map(|m| m.inner_markup());
    assert!(markup.is_some_and(|m| m.contains("class=\"Caret-cursor\"")));
}

#[test]
fn failed_measurement_keeps_the_last_position() {
    let mut field = SimField::textarea(1u32, "abc").with_style("display: none").caret_at(2);
    let (config, published) = recording_config();
    let mut t = tracker();
    t.attach(&field, config);

    let pos = t.notify(&mut field, FieldEvent::KeyUp).expect("tracked");
    assert_eq!(pos, CursorPosition::default());
    assert!(published.borrow().is_empty());
    assert_eq!(field.data_attribute("data-jcursorpos-offset-left"), None);
}

#[test]
fn edits_move_the_caret() {
    let mut field = SimField::input(1u32, "");
    let mut t = tracker();
    t.attach(&field, LocatorConfig::default());

    field.buffer_mut().insert_text("abcd");
    let end = t.notify(&mut field, FieldEvent::KeyUp).expect("position");
    assert_approx_eq(end.position.left, 40.0);

    field.buffer_mut().move_left(false);
    field.buffer_mut().backspace();
    let moved = t.notify(&mut field, FieldEvent::KeyUp).expect("position");
    assert_eq!(field.buffer().value(), "abd");
    assert_approx_eq(moved.position.left, 20.0);
}
