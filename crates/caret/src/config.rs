use std::fmt;

use input_core::FieldId;

use crate::position::CursorPosition;

/// Class prefix used when none is configured.
pub const DEFAULT_CLASS_NAME: &str = "jCursorPos";

pub type ChangeCallback = Box<dyn FnMut(FieldId, &CursorPosition)>;

/// Per-field options for a caret locator.
pub struct LocatorConfig {
    /// Called with every successfully measured position.
    pub on_change: ChangeCallback,
    /// Prefix for the mirror, marker, style tag and data attribute names.
    pub class_name: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            on_change: Box::new(|_, _| {}),
            class_name: DEFAULT_CLASS_NAME.to_string(),
        }
    }
}

impl fmt::Debug for LocatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocatorConfig")
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

impl LocatorConfig {
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(FieldId, &CursorPosition) + 'static) -> Self {
        self.on_change = Box::new(callback);
        self
    }

    pub fn class_names(&self) -> ClassNames {
        ClassNames::new(&self.class_name)
    }
}

/// Every name derived from a locator's class prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    pub base: String,
    pub clone: String,
    pub cursor: String,
    pub linebreak: String,
    pub styles: String,
    data_prefix: String,
}

impl ClassNames {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            clone: format!("{base}-clone"),
            cursor: format!("{base}-cursor"),
            linebreak: format!("{base}-linebreak"),
            styles: format!("{base}-styles"),
            data_prefix: format!("data-{}", base.to_ascii_lowercase()),
        }
    }

    /// `data-<class>-<suffix>`, with the class lowercased.
    pub fn data_attribute(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.data_prefix)
    }
}
