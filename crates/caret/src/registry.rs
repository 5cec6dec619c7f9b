use std::collections::HashMap;

use input_core::FieldId;
use layout::{MirrorLayoutOptions, TextMeasurer};

use crate::config::LocatorConfig;
use crate::document::Document;
use crate::event::FieldEvent;
use crate::field::SourceField;
use crate::locator::CaretLocator;
use crate::position::CursorPosition;

/// Tracks caret positions for every attached field of one document.
pub struct CaretTracker {
    measurer: Box<dyn TextMeasurer>,
    document: Document,
    options: MirrorLayoutOptions,
    locators: HashMap<FieldId, CaretLocator>,
}

impl CaretTracker {
    pub fn new(measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            measurer,
            document: Document::new(),
            options: MirrorLayoutOptions::default(),
            locators: HashMap::new(),
        }
    }

    pub fn with_options(mut self, options: MirrorLayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Start tracking `field`. Returns `false` if it was already tracked, in
    /// which case `config` is dropped.
    pub fn attach(&mut self, field: &dyn SourceField, config: LocatorConfig) -> bool {
        let id = field.field_id();
        if self.locators.contains_key(&id) {
            log::debug!(target: "caret.locator", "{id} already attached");
            return false;
        }

        let mut locator = CaretLocator::new(config);
        locator.activate(field, &mut self.document);
        self.locators.insert(id, locator);
        true
    }

    /// Deliver a host notification. Runs a cycle for caret-moving events on
    /// attached fields and returns the resulting position.
    pub fn notify<F: SourceField>(&mut self, field: &mut F, event: FieldEvent) -> Option<CursorPosition> {
        if !event.is_tracked() {
            return None;
        }
        let locator = self.locators.get_mut(&field.field_id())?;
        Some(locator.update(field, &self.document, self.measurer.as_ref(), self.options))
    }

    pub fn is_attached(&self, id: FieldId) -> bool {
        self.locators.contains_key(&id)
    }

    pub fn locator(&self, id: FieldId) -> Option<&CaretLocator> {
        self.locators.get(&id)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}
