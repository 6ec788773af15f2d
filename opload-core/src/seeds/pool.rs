//! Shared pool of seeded operations

use super::result::{SeedOperationResult, SeedsResult};
use crate::error::SeedPoolError;
use parking_lot::RwLock;
use rand::Rng;
use std::collections::VecDeque;

/// Ordered collection of seeded operations shared by every virtual user.
///
/// Random picks are non-destructive and run under the shared lock. FIFO
/// consumption takes the exclusive lock, so two concurrent callers never
/// receive the same element.
#[derive(Debug, Default)]
pub struct SeedPool {
    operations: RwLock<VecDeque<SeedOperationResult>>,
}

impl SeedPool {
    pub fn new(operations: impl IntoIterator<Item = SeedOperationResult>) -> Self {
        Self {
            operations: RwLock::new(operations.into_iter().collect()),
        }
    }

    /// Uniformly random element, left in place
    pub fn random_pick(&self) -> Result<SeedOperationResult, SeedPoolError> {
        self.random_pick_with(&mut rand::thread_rng())
    }

    /// [`random_pick`](Self::random_pick) driven by a caller-supplied RNG
    pub fn random_pick_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<SeedOperationResult, SeedPoolError> {
        let operations = self.operations.read();
        if operations.is_empty() {
            return Err(SeedPoolError::Empty);
        }
        let index = rng.gen_range(0..operations.len());
        Ok(operations[index])
    }

    /// Remove and return the first element
    pub fn take_next(&self) -> Result<SeedOperationResult, SeedPoolError> {
        self.operations.write().pop_front().ok_or(SeedPoolError::Empty)
    }

    pub fn len(&self) -> usize {
        self.operations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.read().is_empty()
    }

    /// Ordered copy of the remaining elements
    pub fn snapshot(&self) -> SeedsResult {
        SeedsResult {
            operations: self.operations.read().iter().copied().collect(),
        }
    }
}

impl From<SeedsResult> for SeedPool {
    fn from(result: SeedsResult) -> Self {
        Self::new(result.operations)
    }
}
