//! Generic input event types delivered by the host.

/// Generic key representation for the text overlay.
///
/// Hosts map their native key codes to these values before forwarding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Mouse or pen pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// One contact point of a touch event, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// Touch event carrying the active contacts and the ones that changed.
///
/// On touch-end the lifted finger is only present in `changed_touches`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchEvent {
    pub touches: Vec<TouchPoint>,
    pub changed_touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// A touch with a single active contact.
    pub fn single(client_x: f64, client_y: f64) -> Self {
        Self {
            touches: vec![TouchPoint { client_x, client_y }],
            changed_touches: Vec::new(),
        }
    }

    /// A touch-end where the lifted contact is reported as changed.
    pub fn lifted(client_x: f64, client_y: f64) -> Self {
        Self {
            touches: Vec::new(),
            changed_touches: vec![TouchPoint { client_x, client_y }],
        }
    }
}

/// Either kind of pointer input. Both drive the same down/move/up phases.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Touch(TouchEvent),
}

impl InputEvent {
    /// Viewport position of the event, if it carries one.
    ///
    /// Touch events use the first active contact and fall back to the first
    /// changed contact. Further contacts are ignored.
    pub fn client_position(&self) -> Option<(f64, f64)> {
        match self {
            InputEvent::Pointer(p) => Some((p.client_x, p.client_y)),
            InputEvent::Touch(t) => t
                .touches
                .first()
                .or_else(|| t.changed_touches.first())
                .map(|p| (p.client_x, p.client_y)),
        }
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(event: TouchEvent) -> Self {
        InputEvent::Touch(event)
    }
}
