//! Categories Data

/// Longest accepted category name.
pub const NAME_MAX_CHARS: usize = 50;

/// Longest accepted category description.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// New Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}
