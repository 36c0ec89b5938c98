//! # Import Ledger
//!
//! A side-channel manifest of the qualified names a patch's inserted code
//! requires. The ledger never edits a file's import block itself; the printer
//! consumes the snapshot after the patch completes.

use indexmap::IndexSet;

/// Append-only, deduplicated set of qualified names with stable insertion
/// order, so the eventual merge into a file is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportLedger {
    names: IndexSet<String>,
}

impl ImportLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        ImportLedger::default()
    }

    /// Records a qualified name. Adding the same name twice has no further
    /// effect.
    pub fn require(&mut self, qualified_name: impl Into<String>) {
        self.names.insert(qualified_name.into());
    }

    /// Whether the name has been recorded.
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.names.contains(qualified_name)
    }

    /// Number of distinct names recorded.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Copies the recorded names out, in insertion order.
    pub fn snapshot(&self) -> IndexSet<String> {
        self.names.clone()
    }
}

impl Extend<String> for ImportLedger {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        for name in iter {
            self.require(name);
        }
    }
}
