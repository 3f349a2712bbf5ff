//! Idle / hovered / pressed interaction states

use crate::events::PointerEvent;
use crate::fsm::StateMachine;

/// Where the pointer is relative to an interactive element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

impl InteractionState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Hovered => "hovered",
            Self::Pressed => "pressed",
        }
    }
}

/// The standard interaction machine, starting idle.
///
/// Touch input can press without hovering first, so `Idle --down--> Pressed`
/// is allowed. Releasing returns to hovered; leaving always returns to idle.
pub fn interaction_machine() -> StateMachine<InteractionState, PointerEvent> {
    use InteractionState::*;

    StateMachine::builder(Idle)
        .on(Idle, PointerEvent::Enter, Hovered)
        .on(Idle, PointerEvent::Down, Pressed)
        .on(Hovered, PointerEvent::Leave, Idle)
        .on(Hovered, PointerEvent::Down, Pressed)
        .on(Pressed, PointerEvent::Up, Hovered)
        .on(Pressed, PointerEvent::Leave, Idle)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_press_release_leave() {
        let mut machine = interaction_machine();
        assert_eq!(machine.current_state(), InteractionState::Idle);

        assert_eq!(machine.send(PointerEvent::Enter), InteractionState::Hovered);
        assert_eq!(machine.send(PointerEvent::Down), InteractionState::Pressed);
        assert_eq!(machine.send(PointerEvent::Up), InteractionState::Hovered);
        assert_eq!(machine.send(PointerEvent::Leave), InteractionState::Idle);
    }

    #[test]
    fn touch_press_skips_hover() {
        let mut machine = interaction_machine();
        assert_eq!(machine.send(PointerEvent::Down), InteractionState::Pressed);
    }

    #[test]
    fn dragging_off_cancels_press() {
        let mut machine = interaction_machine();
        machine.send(PointerEvent::Down);
        assert_eq!(machine.send(PointerEvent::Leave), InteractionState::Idle);
        // the release happens off the element and is ignored
        assert_eq!(machine.send(PointerEvent::Up), InteractionState::Idle);
    }

    #[test]
    fn redundant_events_are_ignored() {
        let mut machine = interaction_machine();
        machine.send(PointerEvent::Enter);
        assert!(!machine.can_send(PointerEvent::Enter));
        assert_eq!(machine.send(PointerEvent::Enter), InteractionState::Hovered);
        assert_eq!(machine.history().len(), 1);
    }
}
