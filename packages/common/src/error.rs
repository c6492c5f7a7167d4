use crate::address::Address;
use thiserror::Error;

/// Why an address failed to resolve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressErrorKind {
    #[error("child index {index} out of range (len {len})")]
    ChildOutOfRange { index: usize, len: usize },

    #[error("rule index {index} out of range (len {len})")]
    RuleOutOfRange { index: usize, len: usize },

    #[error("declaration index {index} out of range (len {len})")]
    DeclarationOutOfRange { index: usize, len: usize },

    #[error("{segment} cannot descend into a {found}")]
    NotAContainer { segment: String, found: &'static str },

    #[error("segments follow a declaration")]
    TrailingSegment,

    #[error("no {what} named {name:?}")]
    NameNotFound { what: &'static str, name: String },

    #[error("{what} {name:?} already exists")]
    NameExists { what: &'static str, name: String },
}

/// An address did not resolve against the tree it was applied to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Address {address} does not resolve: {kind}")]
pub struct AddressError {
    pub address: Address,
    pub kind: AddressErrorKind,
}

impl AddressError {
    pub fn new(address: Address, kind: AddressErrorKind) -> Self {
        Self { address, kind }
    }
}

/// A mutation's payload does not fit the kind of its target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Shape mismatch at {address}: expected {expected}, found {found}")]
pub struct ShapeMismatchError {
    pub address: Address,
    pub expected: &'static str,
    pub found: &'static str,
}

impl ShapeMismatchError {
    pub fn new(address: Address, expected: &'static str, found: &'static str) -> Self {
        Self {
            address,
            expected,
            found,
        }
    }
}

/// Failure while applying a mutation. Both variants mean the tree does not
/// match the state the mutation was computed against.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),
}

impl PatchError {
    pub fn address(&self) -> &Address {
        match self {
            PatchError::Address(e) => &e.address,
            PatchError::ShapeMismatch(e) => &e.address,
        }
    }
}
