// File: crates/story-core/src/controls.rs
// Summary: Pure dispatch of control events (search box, picker, chip remove, clear) to selection state.

use crate::selection::{AddOutcome, Selection};
use crate::series::EntityLookup;

/// What a reader can do to an interactive chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    /// Text typed into the search box.
    Input(String),
    /// Add button or Enter: add the typed text, then clear the box.
    Submit,
    /// A name chosen from the dropdown.
    Pick(String),
    /// Chip remove button.
    Remove(String),
    Clear,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub input: String,
    pub selection: Selection,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: Controls,
    /// Chips and chart must be redrawn.
    pub rerender: bool,
    /// Set for events that try to add.
    pub outcome: Option<AddOutcome>,
}

impl Controls {
    pub fn new(selection: Selection) -> Self {
        Self { input: String::new(), selection }
    }

    /// Next state for `event`; `self` is left untouched.
    pub fn handle<L: EntityLookup + ?Sized>(&self, event: &ControlEvent, lookup: &L) -> Transition {
        let mut state = self.clone();
        let (rerender, outcome) = match event {
            ControlEvent::Input(text) => {
                state.input = text.clone();
                (false, None)
            }
            ControlEvent::Submit => {
                let text = std::mem::take(&mut state.input);
                let outcome = state.selection.add(&text, lookup);
                (outcome.is_added(), Some(outcome))
            }
            ControlEvent::Pick(name) => {
                let outcome = state.selection.add(name, lookup);
                (outcome.is_added(), Some(outcome))
            }
            ControlEvent::Remove(name) => {
                state.selection.remove(name);
                (true, None)
            }
            ControlEvent::Clear => {
                state.selection.clear();
                (true, None)
            }
        };
        Transition { state, rerender, outcome }
    }

    /// Fold `events` through [`Controls::handle`].
    pub fn apply_all<'e, L, I>(&self, events: I, lookup: &L) -> Controls
    where
        L: EntityLookup + ?Sized,
        I: IntoIterator<Item = &'e ControlEvent>,
    {
        events.into_iter().fold(self.clone(), |state, ev| state.handle(ev, lookup).state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [&str; 3] = ["A", "B", "Stephen Curry"];

    fn known() -> &'static [&'static str] {
        &KNOWN
    }

    #[test]
    fn input_only_updates_text() {
        let c = Controls::new(Selection::unbounded());
        let t = c.handle(&ControlEvent::Input("A".into()), known());
        assert_eq!(t.state.input, "A");
        assert!(!t.rerender);
        assert!(t.state.selection.is_empty());
    }

    #[test]
    fn submit_adds_and_clears_input() {
        let c = Controls::new(Selection::unbounded());
        let c = c.handle(&ControlEvent::Input(" A ".into()), known()).state;
        let t = c.handle(&ControlEvent::Submit, known());
        assert_eq!(t.outcome, Some(AddOutcome::Added));
        assert!(t.rerender);
        assert_eq!(t.state.input, "");
        assert_eq!(t.state.selection.names(), &["A".to_string()]);
        // original state untouched
        assert_eq!(c.input, " A ");
    }

    #[test]
    fn rejected_submit_still_clears_input() {
        let c = Controls::new(Selection::unbounded().with_pinned("Stephen Curry"));
        let c = c.handle(&ControlEvent::Input("Stephen Curry".into()), known()).state;
        let t = c.handle(&ControlEvent::Submit, known());
        assert_eq!(t.outcome, Some(AddOutcome::Pinned));
        assert!(!t.rerender);
        assert_eq!(t.state.input, "");
        assert!(t.state.selection.is_empty());
    }

    #[test]
    fn unknown_pick_is_a_noop() {
        let c = Controls::new(Selection::bounded(5));
        let t = c.handle(&ControlEvent::Pick("Nobody".into()), known());
        assert_eq!(t.outcome, Some(AddOutcome::Unknown));
        assert!(!t.rerender);
        assert_eq!(t.state, c);
    }

    #[test]
    fn remove_and_clear_always_rerender() {
        let c = Controls::new(Selection::unbounded());
        let c = c.apply_all(&[ControlEvent::Pick("A".into()), ControlEvent::Pick("B".into())], known());
        let t = c.handle(&ControlEvent::Remove("Z".into()), known());
        assert!(t.rerender);
        assert_eq!(t.state.selection.len(), 2);
        let t = t.state.handle(&ControlEvent::Clear, known());
        assert!(t.rerender);
        assert!(t.state.selection.is_empty());
    }
}
