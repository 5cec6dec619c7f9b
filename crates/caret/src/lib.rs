//! # caret
//!
//! Pixel coordinates of a text field's caret.
//!
//! Fields do not expose where their caret is painted. A [`CaretLocator`]
//! copies the field's text into an offscreen mirror styled like the field,
//! drops a zero-size marker at the caret offset and reads the marker back
//! from the mirror's layout. Per cycle:
//!
//! 1. [`style_mirror`] resyncs the mirror if the field was resized,
//! 2. [`segment`] cuts the text at the caret into mirror content,
//! 3. [`wrap`] adds a break where the mirror wrapped differently than the
//!    field would,
//! 4. [`reader`] measures the marker.
//!
//! [`CaretTracker`] keeps one locator per attached field and routes host
//! notifications to them.

mod config;
mod document;
mod event;
mod field;
mod locator;
mod mirror;
mod position;
mod registry;

pub mod reader;
pub mod segment;
pub mod style_mirror;
pub mod wrap;

#[cfg(any(test, feature = "test-harness"))]
pub mod harness;

pub use config::{ChangeCallback, ClassNames, DEFAULT_CLASS_NAME, LocatorConfig};
pub use document::Document;
pub use event::FieldEvent;
pub use field::{FieldContent, FieldKind, Point, Size, SourceField, plain_text};
pub use locator::{CaretLocator, LocatorState};
pub use mirror::{LayoutEnv, MirrorElement};
pub use position::CursorPosition;
pub use reader::MeasureError;
pub use registry::CaretTracker;
pub use segment::{Piece, SegmentedText, WordSide};
pub use wrap::WrapCorrection;

#[cfg(test)]
mod tests;
