//! springlab core
//!
//! Primitives shared by the preview engine and its demos:
//!
//! - **State Machines**: typed flat statecharts with guards, entry/exit
//!   actions, and transition history
//! - **Pointer Events**: the enter/leave/down/up vocabulary hosts forward
//! - **Interaction States**: the standard idle/hovered/pressed machine
//!
//! # Example
//!
//! ```rust
//! use springlab_core::{interaction_machine, InteractionState, PointerEvent};
//!
//! let mut machine = interaction_machine();
//! machine.send(PointerEvent::Enter);
//! machine.send(PointerEvent::Down);
//! assert_eq!(machine.current_state(), InteractionState::Pressed);
//! ```

pub mod events;
pub mod fsm;
pub mod interaction;

pub use events::PointerEvent;
pub use fsm::{StateMachine, StateMachineBuilder, Step, Transition};
pub use interaction::{interaction_machine, InteractionState};
