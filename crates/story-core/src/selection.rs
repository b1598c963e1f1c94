// File: crates/story-core/src/selection.rs
// Summary: Ordered, duplicate-free entity selection and the stable colour table.
// Notes:
// - `add` never panics and never grows past `capacity`; rejected adds report why.

use std::collections::HashMap;

use crate::series::EntityLookup;
use crate::theme::{Rgba, TABLEAU10};

/// Most players the position view overlays at once.
pub const POSITION_CAPACITY: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Blank after trimming.
    Empty,
    /// No series for the name.
    Unknown,
    Duplicate,
    Full,
    /// The always-shown featured entity.
    Pinned,
}

impl AddOutcome {
    pub fn is_added(self) -> bool {
        self == AddOutcome::Added
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    names: Vec<String>,
    capacity: Option<usize>,
    pinned: Option<String>,
}

impl Selection {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(capacity: usize) -> Self {
        Self { capacity: Some(capacity), ..Self::default() }
    }

    /// Reject `name` as already shown.
    pub fn with_pinned(mut self, name: impl Into<String>) -> Self {
        self.pinned = Some(name.into());
        self
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn pinned(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|c| self.names.len() >= c)
    }

    /// Append the trimmed `name` when it is known, new and fits.
    pub fn add<L: EntityLookup + ?Sized>(&mut self, name: &str, lookup: &L) -> AddOutcome {
        let name = name.trim();
        let outcome = if name.is_empty() {
            AddOutcome::Empty
        } else if self.pinned.as_deref() == Some(name) {
            AddOutcome::Pinned
        } else if !lookup.contains_entity(name) {
            AddOutcome::Unknown
        } else if self.contains(name) {
            AddOutcome::Duplicate
        } else if self.is_full() {
            AddOutcome::Full
        } else {
            AddOutcome::Added
        };
        if outcome.is_added() {
            self.names.push(name.to_string());
        }
        outcome
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

/// Name to colour, assigned on first request in first-seen order from
/// Tableau10 (cycling) and never reassigned.
#[derive(Clone, Debug, Default)]
pub struct ColorAssignment {
    assigned: HashMap<String, Rgba>,
}

impl ColorAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&mut self, name: &str) -> Rgba {
        if let Some(c) = self.assigned.get(name) {
            return *c;
        }
        let c = TABLEAU10[self.assigned.len() % TABLEAU10.len()];
        self.assigned.insert(name.to_string(), c);
        c
    }

    pub fn peek(&self, name: &str) -> Option<Rgba> {
        self.assigned.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [&str; 7] = ["A", "B", "C", "D", "E", "F", "Stephen Curry"];

    fn lookup() -> &'static [&'static str] {
        &KNOWN
    }

    #[test]
    fn add_trims_and_appends_in_order() {
        let mut s = Selection::unbounded();
        assert_eq!(s.add("  B ", lookup()), AddOutcome::Added);
        assert_eq!(s.add("A", lookup()), AddOutcome::Added);
        assert_eq!(s.names(), &["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn rejected_adds_leave_selection_unchanged() {
        let mut s = Selection::unbounded().with_pinned("Stephen Curry");
        s.add("A", lookup());
        let before = s.clone();
        assert_eq!(s.add("   ", lookup()), AddOutcome::Empty);
        assert_eq!(s.add("Z", lookup()), AddOutcome::Unknown);
        assert_eq!(s.add("A", lookup()), AddOutcome::Duplicate);
        assert_eq!(s.add("Stephen Curry", lookup()), AddOutcome::Pinned);
        assert_eq!(s, before);
    }

    #[test]
    fn bounded_selection_stops_at_capacity() {
        let mut s = Selection::bounded(POSITION_CAPACITY);
        for n in ["A", "B", "C", "D", "E"] {
            assert!(s.add(n, lookup()).is_added());
        }
        let before = s.names().to_vec();
        assert_eq!(s.add("F", lookup()), AddOutcome::Full);
        assert_eq!(s.names(), before.as_slice());
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn add_then_remove_restores_state() {
        let mut s = Selection::unbounded();
        s.add("A", lookup());
        let before = s.clone();
        s.add("B", lookup());
        assert!(s.remove("B"));
        assert_eq!(s, before);
        assert!(!s.remove("B"));
    }

    #[test]
    fn clear_empties() {
        let mut s = Selection::bounded(3);
        s.add("A", lookup());
        s.add("B", lookup());
        s.clear();
        assert!(s.is_empty());
    }

    #[test]
    fn colors_are_stable_and_first_seen() {
        let mut colors = ColorAssignment::new();
        let b = colors.color("B");
        let a = colors.color("A");
        assert_eq!(b, TABLEAU10[0]);
        assert_eq!(a, TABLEAU10[1]);
        assert_eq!(colors.color("B"), b);
        for i in 0..10 {
            colors.color(&format!("p{i}"));
        }
        assert_eq!(colors.peek("B"), Some(b));
        assert_eq!(colors.len(), 12);
    }
}
