//! Flat typed state machines
//!
//! States and events are small `Copy` enums. Transitions are indexed by
//! `(state, event)`; when several share a key, the first whose guard passes
//! is taken. Exit hooks of the old state run first, then the transition's
//! effects, then entry hooks of the new state. Every taken transition is
//! recorded as a [`Step`].

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

/// Predicate consulted before a transition is taken
pub type Guard = Box<dyn Fn() -> bool + Send>;

/// Side effect run on entry, exit or while transitioning
pub type Hook = Box<dyn FnMut() + Send>;

/// Older steps are dropped once history grows past this
pub const HISTORY_LIMIT: usize = 64;

pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
    guard: Option<Guard>,
    effects: SmallVec<[Hook; 2]>,
}

impl<S, E> Transition<S, E> {
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
            guard: None,
            effects: SmallVec::new(),
        }
    }

    /// Only take this transition while `guard` returns true.
    ///
    /// A second call replaces the first guard.
    pub fn with_guard(mut self, guard: impl Fn() -> bool + Send + 'static) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Run `effect` between the exit and entry hooks
    pub fn with_action(mut self, effect: impl FnMut() + Send + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    fn allowed(&self) -> bool {
        self.guard.as_ref().map_or(true, |guard| guard())
    }
}

/// One taken transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step<S, E> {
    pub from: S,
    pub event: E,
    pub to: S,
}

#[derive(Default)]
struct StateHooks {
    enter: SmallVec<[Hook; 1]>,
    exit: SmallVec<[Hook; 1]>,
}

fn run_all(hooks: &mut [Hook]) {
    hooks.iter_mut().for_each(|hook| hook());
}

pub struct StateMachine<S, E> {
    state: S,
    table: FxHashMap<(S, E), SmallVec<[Transition<S, E>; 1]>>,
    hooks: FxHashMap<S, StateHooks>,
    history: VecDeque<Step<S, E>>,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    pub fn new(initial_state: S, transitions: Vec<Transition<S, E>>) -> Self {
        let mut machine = Self {
            state: initial_state,
            table: FxHashMap::default(),
            hooks: FxHashMap::default(),
            history: VecDeque::new(),
        };
        for transition in transitions {
            machine.add(transition);
        }
        machine
    }

    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder {
            machine: Self::new(initial_state, Vec::new()),
        }
    }

    /// Append a transition after any already registered for its key
    pub fn add(&mut self, transition: Transition<S, E>) {
        self.table
            .entry((transition.from_state, transition.event))
            .or_default()
            .push(transition);
    }

    pub fn current_state(&self) -> S {
        self.state
    }

    pub fn is_in(&self, state: S) -> bool {
        self.state == state
    }

    /// Taken transitions, oldest first, at most [`HISTORY_LIMIT`]
    pub fn history(&self) -> &VecDeque<Step<S, E>> {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Index of the transition `event` would take right now
    fn pick(&self, event: E) -> Option<(usize, S)> {
        let candidates = self.table.get(&(self.state, event))?;
        let index = candidates.iter().position(Transition::allowed)?;
        Some((index, candidates[index].to_state))
    }

    pub fn can_send(&self, event: E) -> bool {
        self.pick(event).is_some()
    }

    /// Feed `event` to the machine and return the resulting state.
    ///
    /// Unhandled events, and events whose guards all refuse, change nothing
    /// and run no hooks.
    pub fn send(&mut self, event: E) -> S {
        let from = self.state;
        let Some((index, to)) = self.pick(event) else {
            trace!(state = ?from, ?event, "event ignored");
            return from;
        };

        if let Some(hooks) = self.hooks.get_mut(&from) {
            run_all(&mut hooks.exit);
        }
        if let Some(candidates) = self.table.get_mut(&(from, event)) {
            run_all(&mut candidates[index].effects);
        }

        self.state = to;
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(Step { from, event, to });
        trace!(?from, ?event, ?to, "state transition");

        if let Some(hooks) = self.hooks.get_mut(&to) {
            run_all(&mut hooks.enter);
        }
        to
    }

    pub fn on_enter(&mut self, state: S, hook: impl FnMut() + Send + 'static) {
        self.hooks.entry(state).or_default().enter.push(Box::new(hook));
    }

    pub fn on_exit(&mut self, state: S, hook: impl FnMut() + Send + 'static) {
        self.hooks.entry(state).or_default().exit.push(Box::new(hook));
    }
}

/// Chained construction of a [`StateMachine`]
pub struct StateMachineBuilder<S, E> {
    machine: StateMachine<S, E>,
}

impl<S, E> StateMachineBuilder<S, E>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    pub fn on(self, from: S, event: E, to: S) -> Self {
        self.transition(Transition::new(from, event, to))
    }

    pub fn transition(mut self, transition: Transition<S, E>) -> Self {
        self.machine.add(transition);
        self
    }

    pub fn on_enter(mut self, state: S, hook: impl FnMut() + Send + 'static) -> Self {
        self.machine.on_enter(state, hook);
        self
    }

    pub fn on_exit(mut self, state: S, hook: impl FnMut() + Send + 'static) -> Self {
        self.machine.on_exit(state, hook);
        self
    }

    pub fn build(self) -> StateMachine<S, E> {
        self.machine
    }
}
