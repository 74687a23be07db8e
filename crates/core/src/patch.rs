//! Tri-state representation of a single field in a partial update.

/// The state of one field in a partial update.
///
/// A partial update must distinguish three cases that a bare `Option`
/// collapses into two:
///
/// - [`Patch::Unset`] — the field was not supplied; leave it alone.
/// - [`Patch::Clear`] — the field was supplied as the empty-string
///   sentinel; set the column to NULL.
/// - [`Patch::Set`] — the field was supplied with a value that passed
///   validation; assign it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Unset,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Patch::Clear)
    }

    /// Collapse to an `Option` for insertion, where `Clear` and `Unset`
    /// both mean "stored as absent".
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }
}
