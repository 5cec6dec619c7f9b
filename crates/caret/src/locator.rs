//! One locator per tracked field: the full measurement cycle.

use input_core::{CaretStrategy, read_caret_offset};
use layout::{MirrorLayoutOptions, TextMeasurer};

use crate::config::{ClassNames, LocatorConfig};
use crate::document::Document;
use crate::field::{SourceField, plain_text};
use crate::mirror::{LayoutEnv, MirrorElement};
use crate::position::CursorPosition;
use crate::segment::segment;
use crate::wrap::{self, WrapCorrection};
use crate::{reader, style_mirror};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocatorState {
    Uninitialized,
    Active,
}

pub struct CaretLocator {
    config: LocatorConfig,
    names: ClassNames,
    state: LocatorState,
    mirror: Option<MirrorElement>,
    last_position: Option<CursorPosition>,
    last_correction: WrapCorrection,
    last_strategy: Option<CaretStrategy>,
}

impl CaretLocator {
    pub fn new(config: LocatorConfig) -> Self {
        let names = config.class_names();
        Self {
            config,
            names,
            state: LocatorState::Uninitialized,
            mirror: None,
            last_position: None,
            last_correction: WrapCorrection::None,
            last_strategy: None,
        }
    }

    /// Inject the document styles, create the mirror and give it the
    /// field's style. Does nothing once active.
    pub fn activate(&mut self, field: &dyn SourceField, document: &mut Document) {
        if self.state == LocatorState::Active {
            return;
        }
        document.ensure_caret_styles(&self.names);

        let mut mirror = MirrorElement::new(&self.names);
        style_mirror::sync(field, &mut mirror);
        self.mirror = Some(mirror);
        self.state = LocatorState::Active;
        log::debug!(target: "caret.locator", "{} active", field.field_id());
    }

    /// Run one cycle: read the caret, rebuild the mirror content, correct
    /// wrapping, measure, then publish and annotate the field.
    ///
    /// When measuring fails the previous position is returned (zero if there
    /// never was one) and nothing is published.
    pub fn update<F: SourceField>(
        &mut self,
        field: &mut F,
        document: &Document,
        measurer: &dyn TextMeasurer,
        options: MirrorLayoutOptions,
    ) -> CursorPosition {
        let Some(mirror) = self.mirror.as_mut() else {
            log::debug!(target: "caret.locator", "{}: update before activation", field.field_id());
            return self.last_position.unwrap_or_default();
        };
        let env = LayoutEnv {
            measurer,
            stylesheet: document.stylesheet(),
            options,
        };

        style_mirror::resync_if_needed(&*field, mirror);

        let text = plain_text(&*field).into_owned();
        let reading = read_caret_offset(field, input_core::char_count(&text));
        self.last_strategy = Some(reading.strategy);

        let segmented = segment(&text, reading.offset);
        let nodes = segmented.to_nodes(mirror.factory_mut(), &self.names);
        mirror.replace_content(nodes);

        self.last_correction = wrap::correct(&segmented, reading.offset, mirror, &self.names, &env);

        match reader::read(&*field, mirror, &self.names, &env) {
            Ok(position) => {
                self.last_position = Some(position);
                (self.config.on_change)(field.field_id(), &position);
                self.annotate(field, &position);
                position
            }
            Err(err) => {
                log::warn!(target: "caret.locator", "{}: {err}", field.field_id());
                self.last_position.unwrap_or_default()
            }
        }
    }

    fn annotate(&self, field: &mut dyn SourceField, position: &CursorPosition) {
        let values = [
            ("offset-left", position.offset.left),
            ("offset-top", position.offset.top),
            ("position-left", position.position.left),
            ("position-top", position.position.top),
        ];
        for (suffix, value) in values {
            field.set_data_attribute(&self.names.data_attribute(suffix), value.to_string());
        }
    }

    pub fn state(&self) -> LocatorState {
        self.state
    }

    pub fn class_names(&self) -> &ClassNames {
        &self.names
    }

    /// Last successfully measured position.
    pub fn last_position(&self) -> Option<CursorPosition> {
        self.last_position
    }

    /// Wrap correction applied in the last cycle.
    pub fn last_correction(&self) -> WrapCorrection {
        self.last_correction
    }

    /// How the caret offset was obtained in the last cycle.
    pub fn last_strategy(&self) -> Option<CaretStrategy> {
        self.last_strategy
    }

    pub fn mirror(&self) -> Option<&MirrorElement> {
        self.mirror.as_ref()
    }
}
