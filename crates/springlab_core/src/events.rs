//! Pointer events forwarded by the host

use std::fmt::{Display, Formatter};

/// The pointer vocabulary interactive demos react to.
///
/// Hosts translate their own input (mouse, touch, pen) into these four
/// events; the preview never sees coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    /// Pointer moved over the element
    Enter,
    /// Pointer moved off the element
    Leave,
    /// Button or touch went down on the element
    Down,
    /// Button or touch released
    Up,
}

impl PointerEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Leave => "leave",
            Self::Down => "down",
            Self::Up => "up",
        }
    }
}

impl Display for PointerEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
