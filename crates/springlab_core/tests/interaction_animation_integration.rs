//! Integration tests for interaction states + spring animation
//!
//! These tests verify that:
//! - FSM state transitions can drive spring targets
//! - Entry callbacks can feed retargets to an animation loop
//! - Rapid state changes keep springs stable and interruptible

use springlab_animation::{AnimationScheduler, Spring, SpringConfig};
use springlab_core::{interaction_machine, InteractionState, PointerEvent};
use std::sync::{Arc, Mutex};

const FRAME: f32 = 1.0 / 60.0;

/// Scale target for each interaction state
fn scale_for(state: InteractionState) -> f32 {
    match state {
        InteractionState::Idle => 1.0,
        InteractionState::Hovered => 1.05,
        InteractionState::Pressed => 0.95,
    }
}

/// Test that the state returned by `send` picks the spring target
#[test]
fn test_fsm_drives_animation_targets() {
    let mut machine = interaction_machine();
    let mut scale = Spring::new(SpringConfig::stiff(), 1.0);

    let state = machine.send(PointerEvent::Enter);
    scale.set_target(scale_for(state));
    for _ in 0..120 {
        scale.step(FRAME);
    }
    assert!(scale.is_settled());
    assert_eq!(scale.value(), 1.05);

    let state = machine.send(PointerEvent::Down);
    scale.set_target(scale_for(state));
    for _ in 0..120 {
        scale.step(FRAME);
    }
    assert_eq!(scale.value(), 0.95);
}

/// Test that entry callbacks can queue retargets for a scheduler to apply
#[test]
fn test_entry_callbacks_queue_retargets() {
    let queued = Arc::new(Mutex::new(Vec::new()));

    let mut machine = interaction_machine();
    for state in [
        InteractionState::Idle,
        InteractionState::Hovered,
        InteractionState::Pressed,
    ] {
        let queued = queued.clone();
        machine.on_enter(state, move || {
            queued.lock().unwrap().push(scale_for(state));
        });
    }

    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add_spring(Spring::new(SpringConfig::standard(), 1.0));

    machine.send(PointerEvent::Enter);
    machine.send(PointerEvent::Down);
    machine.send(PointerEvent::Up);

    for target in queued.lock().unwrap().drain(..) {
        scheduler.set_target(id, target);
    }
    for _ in 0..300 {
        scheduler.tick(FRAME);
    }

    assert!(!scheduler.has_active_animations());
    assert_eq!(scheduler.value(id), Some(1.05));
}

/// Test that retargeting mid-flight keeps velocity and still lands on the new target
#[test]
fn test_interruptible_animation() {
    let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
    spring.set_target(100.0);

    for _ in 0..5 {
        spring.step(FRAME);
    }
    assert!(spring.value() > 0.0, "Spring should have moved from initial position");

    let mid_velocity = spring.velocity();
    assert!(mid_velocity > 0.0, "Spring should be moving forward");

    // Interrupt with a new target: velocity carries over
    spring.set_target(0.0);
    assert_eq!(spring.velocity(), mid_velocity);

    for _ in 0..240 {
        spring.step(FRAME);
    }
    assert_eq!(spring.value(), 0.0);
}

/// Test that pointer events faster than a frame keep the spring bounded and settling
#[test]
fn test_rapid_state_changes() {
    let mut machine = interaction_machine();
    let mut scale = Spring::new(SpringConfig::wobbly(), 1.0);

    let events = [
        PointerEvent::Enter,
        PointerEvent::Down,
        PointerEvent::Up,
        PointerEvent::Leave,
    ];
    for i in 0..200 {
        let state = machine.send(events[i % events.len()]);
        scale.set_target(scale_for(state));
        scale.step(FRAME / 4.0);
        assert!(scale.value().is_finite());
        assert!(scale.value() > 0.5 && scale.value() < 1.5);
    }

    assert_eq!(machine.current_state(), InteractionState::Idle);
    for _ in 0..600 {
        scale.step(FRAME);
    }
    assert!(scale.is_settled());
    assert_eq!(scale.value(), 1.0);
}
