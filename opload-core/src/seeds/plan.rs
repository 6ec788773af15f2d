use serde::{Deserialize, Serialize};

/// How many operations to pre-create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOperationsPlan {
    #[serde(default)]
    pub count: usize,
}

/// Seed requirements declared by a scenario
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedsPlan {
    #[serde(default)]
    pub operations: SeedOperationsPlan,
}

impl SeedsPlan {
    pub fn with_operations(count: usize) -> Self {
        Self {
            operations: SeedOperationsPlan { count },
        }
    }

    /// Number of operations the plan asks for
    pub fn operations_count(&self) -> usize {
        self.operations.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_is_empty() {
        assert_eq!(SeedsPlan::default().operations_count(), 0);
    }

    #[test]
    fn test_plan_deserializes_without_count() {
        let plan: SeedsPlan = serde_json::from_str(r#"{"operations":{}}"#).unwrap();
        assert_eq!(plan, SeedsPlan::default());
    }
}
