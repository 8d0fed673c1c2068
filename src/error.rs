use thiserror::Error;

use crate::marshaller::ElementId;

/// Misuse of the marshaller's element API.
///
/// Lookups never produce these; a missing value or breakpoint is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("element {0:?} is not registered or was already released")]
    UnknownElement(ElementId),
    #[error("key `{key}` was never initialized for element {element:?}")]
    UnknownKey { element: ElementId, key: String },
}
