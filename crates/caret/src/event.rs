/// Notifications a host can deliver for a tracked field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldEvent {
    KeyDown,
    KeyUp,
    Paste,
    Focus,
    PointerUp,
    Blur,
    Scroll,
    Input,
}

impl FieldEvent {
    /// Whether this notification can move the caret and triggers a cycle.
    pub fn is_tracked(self) -> bool {
        matches!(
            self,
            FieldEvent::KeyDown
                | FieldEvent::KeyUp
                | FieldEvent::Paste
                | FieldEvent::Focus
                | FieldEvent::PointerUp
        )
    }
}
