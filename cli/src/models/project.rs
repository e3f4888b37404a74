//! Provider project models

/// Result of the create-or-fetch project lookup
#[derive(Debug, Clone)]
pub struct ProjectHandle {
    pub id: String,

    /// True when this call created the project rather than finding it.
    /// Affects whether the production alias is requested immediately.
    pub is_new: bool,
}
