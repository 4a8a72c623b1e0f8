//! Resolve user input to one of several candidate types.
//!
//! Candidates live in a [`Namespace`] and declare the selectors they answer
//! to through [`Candidate::selectable_for`]. A [`Registry`] indexes them on
//! first use and resolves queries, lowercasing text unless configured not to.

pub mod config;
pub mod error;
pub mod manifest;
pub mod namespace;
pub mod registry;
pub mod selector;

pub use config::RegistryConfig;
pub use error::{Result, SelectableError};
pub use manifest::ManifestCandidate;
pub use namespace::{Candidate, Member, Namespace};
pub use registry::{Index, Registry, Selection};
pub use selector::{Selector, TypeToken};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
