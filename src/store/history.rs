//! Operation History Module
//!
//! Records reversible mutations and holds the undo/redo stacks that back
//! the store's linear history.

use crate::store::Entry;

// == Operation ==
/// One logged mutation, carrying the state needed to walk it in either
/// direction.
///
/// The variants encode the logging preconditions: a `Delete` has no "after"
/// state, and `Update`/`Delete` are only ever constructed for a key that was
/// logically live, so their `before` entries are not optional.
#[derive(Debug, Clone)]
pub enum Operation {
    /// A set, which may have overwritten a live entry
    Set {
        key: String,
        before: Option<Entry>,
        after: Entry,
    },
    /// An update of a live entry
    Update {
        key: String,
        before: Entry,
        after: Entry,
    },
    /// A delete of a live entry
    Delete { key: String, before: Entry },
}

impl Operation {
    /// Returns the key this operation mutated.
    pub fn key(&self) -> &str {
        match self {
            Operation::Set { key, .. }
            | Operation::Update { key, .. }
            | Operation::Delete { key, .. } => key,
        }
    }
}

// == Operation Log ==
/// LIFO undo and redo stacks of recorded mutations.
///
/// Recording a new operation invalidates the redo history: each operation
/// alternates between the stacks through `undo`/`redo` until the next fresh
/// mutation clears everything still sitting on the redo side.
#[derive(Debug, Default)]
pub struct OperationLog {
    undo: Vec<Operation>,
    redo: Vec<Operation>,
}

impl OperationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fresh mutation: pushes onto the undo stack and clears the
    /// redo stack entirely.
    pub fn record(&mut self, op: Operation) {
        self.undo.push(op);
        self.redo.clear();
    }

    /// Pops the most recent operation from the undo stack.
    pub fn pop_undo(&mut self) -> Option<Operation> {
        self.undo.pop()
    }

    /// Pops the most recent operation from the redo stack.
    pub fn pop_redo(&mut self) -> Option<Operation> {
        self.redo.pop()
    }

    /// Pushes an operation onto the undo stack without touching redo.
    ///
    /// Used when a redone operation returns to the undo side; `record` is
    /// the entry point for new mutations.
    pub fn push_undo(&mut self, op: Operation) {
        self.undo.push(op);
    }

    /// Pushes an undone operation onto the redo stack.
    pub fn push_redo(&mut self, op: Operation) {
        self.redo.push(op);
    }

    /// Number of operations available to undo.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of operations available to redo.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}
