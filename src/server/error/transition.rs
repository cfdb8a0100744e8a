use thiserror::Error;

/// A status change outside the allowed transition table.
///
/// Results in 400 Bad Request.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Cannot change {entity} status from '{from}' to '{to}'")]
pub struct TransitionError {
    pub entity: &'static str,
    pub from: String,
    pub to: String,
}

impl TransitionError {
    pub fn new(entity: &'static str, from: impl ToString, to: impl ToString) -> Self {
        Self {
            entity,
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
