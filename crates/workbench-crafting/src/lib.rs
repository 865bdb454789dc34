//! Requirement resolution and consumption for the Workbench crafting
//! inventory.
//!
//! Given a requirement set (alternative-sets of tools and components, each
//! entry an item type or a functionality tag with a signed count), this
//! crate finds what in reach could satisfy it, resolves items that two
//! requirements would both count, lets a [`Chooser`] settle genuine
//! ambiguity, and finally commits the choice against the world.
//!
//! # Modules
//!
//! - [`requirement`] -- [`Requirement`] accounting and the caller's input
//!   types.
//! - [`candidate`] -- [`Locator`]s and [`Candidate`]s: where an item lives.
//! - [`source`] -- [`SourceCatalog`]: every source in reach, with counting
//!   queries.
//! - [`functionality`] -- Lazily built functionality provider table.
//! - [`simple`] / [`complex`] -- Simple and complex requirements.
//! - [`overlap`] -- Overlap resolution between requirements sharing a type.
//! - [`selection`] -- Narrowing to one alternative and its candidates.
//! - [`chooser`] -- The disambiguation hook.
//! - [`solution`] -- [`Solution`] lifecycle and dump.
//! - [`persist`] -- Persisted selections across turns.
//! - [`consume`] -- Committing a selection.
//! - [`session`] -- [`CraftingSession`], the facade.
//! - [`config`] -- [`CraftingConfig`] loaded from YAML.
//! - [`error`] -- Error types.
//!
//! [`Requirement`]: requirement::Requirement
//! [`Locator`]: candidate::Locator
//! [`Candidate`]: candidate::Candidate
//! [`SourceCatalog`]: source::SourceCatalog
//! [`Chooser`]: chooser::Chooser
//! [`Solution`]: solution::Solution
//! [`CraftingSession`]: session::CraftingSession
//! [`CraftingConfig`]: config::CraftingConfig

pub mod candidate;
pub mod chooser;
pub mod complex;
pub mod config;
pub mod consume;
pub mod error;
pub mod functionality;
pub mod overlap;
pub mod persist;
pub mod requirement;
pub mod selection;
pub mod session;
pub mod simple;
pub mod solution;
pub mod source;

// Re-export primary types for convenience.
pub use candidate::{Candidate, Locator, SourceMask};
pub use chooser::{Chooser, FirstOption, FnChooser, ScriptedChooser};
pub use complex::{ComplexRequirement, Selection};
pub use config::{ConfigError, CraftingConfig};
pub use consume::{ConsumeFailure, ConsumeReport};
pub use error::CraftingError;
pub use functionality::FunctionalityTable;
pub use requirement::{Requirement, RequirementSet, RequirementSpec};
pub use selection::Strategy;
pub use session::CraftingSession;
pub use simple::{SimpleRef, SimpleRequirement};
pub use solution::{Solution, SolutionState};
pub use source::SourceCatalog;
