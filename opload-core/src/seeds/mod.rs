//! Seed provisioning
//!
//! A run that declares a [`SeedsPlan`] gets its prerequisite operations
//! created once, before any virtual user starts. The [`SeedsBuilder`] turns
//! the plan into a [`SeedsResult`], which is persisted as a [`SeedDump`] and
//! published to users as a [`SeedPool`].

pub mod builder;
pub mod dumps;
pub mod plan;
pub mod pool;
pub mod result;

pub use builder::SeedsBuilder;
pub use dumps::{dump_path, SeedDump};
pub use plan::{SeedOperationsPlan, SeedsPlan};
pub use pool::SeedPool;
pub use result::{SeedOperationResult, SeedsResult};
