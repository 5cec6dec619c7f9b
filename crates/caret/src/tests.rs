use css::Stylesheet;
use html::{NodeFactory, count_by_class};
use layout::MirrorLayoutOptions;

use crate::harness::{MonospaceMeasurer, SimField};
use crate::segment::segment;
use crate::wrap::{WrapCorrection, correct};
use crate::{
    ClassNames, Document, LayoutEnv, LocatorConfig, LocatorState, MeasureError, MirrorElement,
    reader, style_mirror,
};

fn assert_approx_eq(got: f32, want: f32) {
    let eps = 0.01;
    assert!(
        (got - want).abs() <= eps,
        "expected {want:.4}, got {got:.4}"
    );
}

struct Fixture {
    names: ClassNames,
    document: Document,
    measurer: MonospaceMeasurer,
}

impl Fixture {
    fn new() -> Self {
        let names = ClassNames::new("jCursorPos");
        let mut document = Document::new();
        document.ensure_caret_styles(&names);
        Self {
            names,
            document,
            measurer: MonospaceMeasurer::default(),
        }
    }

    fn env(&self) -> LayoutEnv<'_> {
        LayoutEnv {
            measurer: &self.measurer,
            stylesheet: self.document.stylesheet(),
            options: MirrorLayoutOptions::default(),
        }
    }

    fn mirror_for(&self, field: &SimField, text: &str, caret: usize) -> MirrorElement {
        let mut mirror = MirrorElement::new(&self.names);
        style_mirror::sync(field, &mut mirror);
        let nodes = segment(text, caret).to_nodes(mirror.factory_mut(), &self.names);
        mirror.replace_content(nodes);
        mirror
    }
}

#[test]
fn sync_copies_style_and_pins_size() {
    let field = SimField::textarea(1u32, "x")
        .with_content_size(120.0, 48.0)
        .with_style("padding-left: 4px; letter-spacing: 1px");
    let mut mirror = MirrorElement::new(&ClassNames::new("jCursorPos"));
    style_mirror::sync(&field, &mut mirror);

    let style = mirror.style();
    assert_eq!(style.get("padding-left"), Some("4px"));
    assert_eq!(style.get("letter-spacing"), Some("1px"));
    assert_eq!(style.get("width"), Some("120px"));
    assert_eq!(style.get("height"), Some("48px"));
    assert_eq!(style.get("position"), Some("absolute"));
    assert_eq!(style.get("left"), Some("-9999px"));
    assert_eq!(style.get("white-space"), Some("pre-wrap"));
    assert_eq!(style.get("overflow-wrap"), Some("break-word"));
    assert_eq!(style.get("overflow-y"), Some("visible"));
}

#[test]
fn single_line_mirrors_never_wrap() {
    let field = SimField::input(1u32, "x");
    let mut mirror = MirrorElement::new(&ClassNames::new("jCursorPos"));
    style_mirror::sync(&field, &mut mirror);
    assert_eq!(mirror.style().get("white-space"), Some("nowrap"));
    assert_eq!(mirror.style().get("word-wrap"), Some("normal"));
}

#[test]
fn overflowing_fields_get_scrollbars() {
    let field = SimField::textarea(1u32, &"abcd ".repeat(30)).with_content_size(100.0, 24.0);
    let mut mirror = MirrorElement::new(&ClassNames::new("jCursorPos"));
    style_mirror::sync(&field, &mut mirror);
    assert_eq!(mirror.style().get("overflow-y"), Some("scroll"));
    assert_eq!(mirror.style().get("overflow-x"), Some("visible"));
}

#[test]
fn scrollbar_is_cleared_once_the_text_fits() {
    let mut field = SimField::textarea(1u32, &"abcd ".repeat(30)).with_content_size(100.0, 24.0);
    let mut mirror = MirrorElement::new(&ClassNames::new("jCursorPos"));
    style_mirror::sync(&field, &mut mirror);
    assert_eq!(mirror.style().get("overflow-y"), Some("scroll"));

    field.buffer_mut().set_value("abcd");
    style_mirror::sync(&field, &mut mirror);
    assert_eq!(mirror.style().get("overflow-y"), Some("visible"));

    let field = field.with_style("overflow-y: auto");
    style_mirror::sync(&field, &mut mirror);
    assert_eq!(mirror.style().get("overflow-y"), Some("auto"));
}

#[test]
fn resync_is_needed_only_after_a_resize() {
    let mut field = SimField::textarea(1u32, "x");
    let mut mirror = MirrorElement::new(&ClassNames::new("jCursorPos"));
    assert!(style_mirror::needs_resync(&field, &mirror));

    style_mirror::sync(&field, &mut mirror);
    assert!(!style_mirror::needs_resync(&field, &mirror));

    field.resize(150.0, 120.0);
    assert!(style_mirror::needs_resync(&field, &mirror));
}

#[test]
fn caret_after_a_space_breaks_after_the_word() {
    let fx = Fixture::new();
    let field = SimField::textarea(1u32, "hello world").with_content_size(80.0, 120.0);
    let text = "hello world";
    let mut mirror = fx.mirror_for(&field, text, 6);

    let correction = correct(&segment(text, 6), 6, &mut mirror, &fx.names, &fx.env());
    assert_eq!(correction, WrapCorrection::BreakAfterBeforeWord);
    assert_eq!(count_by_class(mirror.content(), "jCursorPos-linebreak"), 1);

    let pos = reader::read(&field, &mut mirror, &fx.names, &fx.env()).expect("position");
    // The detached space still renders at the start of the new line.
    assert_approx_eq(pos.position.left, 10.0);
    assert_approx_eq(pos.position.top, 21.0);
}

#[test]
fn caret_before_a_space_needs_no_break() {
    let fx = Fixture::new();
    let field = SimField::textarea(1u32, "hello world").with_content_size(80.0, 120.0);
    let text = "hello world";
    let mut mirror = fx.mirror_for(&field, text, 5);

    let correction = correct(&segment(text, 5), 5, &mut mirror, &fx.names, &fx.env());
    assert_eq!(correction, WrapCorrection::None);

    let pos = reader::read(&field, &mut mirror, &fx.names, &fx.env()).expect("position");
    assert_approx_eq(pos.position.left, 50.0);
    assert_approx_eq(pos.position.top, 9.0);
}

#[test]
fn words_on_one_line_are_left_alone() {
    let fx = Fixture::new();
    let field = SimField::textarea(1u32, "hello world");
    let text = "hello world";
    let mut mirror = fx.mirror_for(&field, text, 8);
    let correction = correct(&segment(text, 8), 8, &mut mirror, &fx.names, &fx.env());
    assert_eq!(correction, WrapCorrection::None);
    assert_eq!(count_by_class(mirror.content(), "jCursorPos-linebreak"), 0);
}

#[test]
fn word_wider_than_the_line_is_split_in_place() {
    let fx = Fixture::new();
    let text = "hello world foo bar";
    let field = SimField::textarea(1u32, text).with_content_size(30.0, 120.0);
    let mut mirror = fx.mirror_for(&field, text, 1);

    let correction = correct(&segment(text, 1), 1, &mut mirror, &fx.names, &fx.env());
    assert_eq!(correction, WrapCorrection::None);
    assert_eq!(count_by_class(mirror.content(), "jCursorPos-linebreak"), 0);

    let pos = reader::read(&field, &mut mirror, &fx.names, &fx.env()).expect("position");
    assert_approx_eq(pos.position.left, 10.0);
    assert_approx_eq(pos.position.top, 9.0);
}

#[test]
fn caret_at_start_is_never_corrected() {
    let fx = Fixture::new();
    let field = SimField::textarea(1u32, "hello").with_content_size(20.0, 120.0);
    let mut mirror = fx.mirror_for(&field, "hello", 0);
    let correction = correct(&segment("hello", 0), 0, &mut mirror, &fx.names, &fx.env());
    assert_eq!(correction, WrapCorrection::None);
}

#[test]
fn missing_marker_is_reported() {
    let fx = Fixture::new();
    let field = SimField::textarea(1u32, "abc");
    let mut mirror = MirrorElement::new(&fx.names);
    style_mirror::sync(&field, &mut mirror);
    let text = NodeFactory::new().text("abc");
    mirror.replace_content(vec![text]);

    let err = reader::read(&field, &mut mirror, &fx.names, &fx.env()).unwrap_err();
    assert_eq!(err, MeasureError::MarkerMissing);
}

#[test]
fn hidden_mirror_is_not_rendered() {
    let fx = Fixture::new();
    let field = SimField::textarea(1u32, "abc").with_style("display: none");
    let mut mirror = fx.mirror_for(&field, "abc", 1);
    let err = reader::read(&field, &mut mirror, &fx.names, &fx.env()).unwrap_err();
    assert_eq!(err, MeasureError::NotRendered);
    assert_eq!(err.to_string(), "mirror is not rendered");
}

#[test]
fn page_offset_adds_border_and_removes_scroll() {
    let fx = Fixture::new();
    let field = SimField::textarea(1u32, "hello")
        .with_style("border-left-width: 2px; border-top-width: 3px; padding-left: 5px; padding-top: 2px")
        .with_page_offset(100.0, 50.0)
        .with_scroll_offset(0.0, 4.0);
    let mut mirror = fx.mirror_for(&field, "hello", 3);

    let pos = reader::read(&field, &mut mirror, &fx.names, &fx.env()).expect("position");
    assert_approx_eq(pos.position.left, 35.0);
    assert_approx_eq(pos.position.top, 11.0);
    assert_approx_eq(pos.offset.left, 137.0);
    assert_approx_eq(pos.offset.top, 60.0);
}

#[test]
fn locator_activates_once() {
    let field = SimField::input(1u32, "abc");
    let mut document = Document::new();
    let mut locator = crate::CaretLocator::new(LocatorConfig::default());
    assert_eq!(locator.state(), LocatorState::Uninitialized);
    assert!(locator.mirror().is_none());

    locator.activate(&field, &mut document);
    locator.activate(&field, &mut document);
    assert_eq!(locator.state(), LocatorState::Active);
    assert_eq!(document.style_tags().len(), 1);
    assert!(locator.mirror().is_some());
}

#[test]
fn update_before_activation_returns_zero() {
    let mut field = SimField::input(1u32, "abc");
    let mut locator = crate::CaretLocator::new(LocatorConfig::default());
    let pos = locator.update(
        &mut field,
        &Document::new(),
        &MonospaceMeasurer::default(),
        MirrorLayoutOptions::default(),
    );
    assert_eq!(pos, crate::CursorPosition::default());
    assert_eq!(field.data_attribute("data-jcursorpos-offset-left"), None);
}

#[test]
fn empty_stylesheet_still_lays_out_the_marker() {
    // Without the injected rule the marker is an empty inline span.
    let names = ClassNames::new("jCursorPos");
    let measurer = MonospaceMeasurer::default();
    let sheet = Stylesheet::default();
    let env = LayoutEnv {
        measurer: &measurer,
        stylesheet: &sheet,
        options: MirrorLayoutOptions::default(),
    };
    let field = SimField::input(1u32, "abcd");
    let mut mirror = MirrorElement::new(&names);
    style_mirror::sync(&field, &mut mirror);
    let nodes = segment("abcd", 2).to_nodes(mirror.factory_mut(), &names);
    mirror.replace_content(nodes);

    let pos = reader::read(&field, &mut mirror, &names, &env).expect("position");
    assert_approx_eq(pos.position.left, 20.0);
}
