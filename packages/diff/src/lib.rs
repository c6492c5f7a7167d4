//! # Paperclip diff/patch
//!
//! ```text
//! evaluator ──▶ Tree A ──┐
//!                        ├──▶ diff(A, B) ──▶ [Mutation] ──┬──▶ patch_all(A, ..) == B
//! evaluator ──▶ Tree B ──┘                               └──▶ renderer (in order)
//! ```
//!
//! Both operations are pure and synchronous. Mutations from one `diff` call
//! must be applied, in order, to the exact `old` tree they were computed
//! from.

pub mod css_differ;
pub mod mutation;
pub mod patcher;
pub mod vdom_differ;

pub use mutation::{Child, MissingFieldError, Mutation};
pub use patcher::{patch, patch_all};
pub use vdom_differ::diff;

pub use paperclip_common::{AddressError, PatchError, PatchResult, ShapeMismatchError};
