//! Seed construction

use super::plan::SeedsPlan;
use super::result::{SeedOperationResult, SeedsResult};
use crate::error::SeedBuildError;
use crate::gateway::SharedGateway;
use tracing::{debug, info, warn};

/// Executes a [`SeedsPlan`] against a gateway.
///
/// Creates are issued one at a time in plan order; the result keeps the
/// identifiers in the order the server returned them. The first remote
/// failure aborts the build and nothing is returned for the partial pool.
pub struct SeedsBuilder {
    gateway: SharedGateway,
}

impl SeedsBuilder {
    pub fn new(gateway: SharedGateway) -> Self {
        Self { gateway }
    }

    pub async fn build(&self, plan: &SeedsPlan) -> Result<SeedsResult, SeedBuildError> {
        let requested = plan.operations_count();
        let mut operations = Vec::with_capacity(requested);

        info!("Seeding {} operations", requested);

        for _ in 0..requested {
            match self.gateway.create_operation().await {
                Ok(operation) => {
                    debug!("Seeded operation {}", operation.id);
                    operations.push(SeedOperationResult::from(operation.id));
                }
                Err(source) => {
                    warn!(
                        "Seeding aborted after {} of {} operations: {}",
                        operations.len(),
                        requested,
                        source
                    );
                    return Err(SeedBuildError {
                        created: operations.len(),
                        requested,
                        source,
                    });
                }
            }
        }

        info!("Seeded {} operations", operations.len());
        Ok(SeedsResult { operations })
    }
}
