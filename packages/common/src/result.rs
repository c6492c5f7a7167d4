use crate::error::PatchError;

/// Result of applying mutations to a tree.
pub type PatchResult<T> = Result<T, PatchError>;
