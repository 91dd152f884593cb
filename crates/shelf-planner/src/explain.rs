//! EXPLAIN: the stages `prepare_products` would run for a spec.

use shelf_core::collate::BinaryCollation;
use shelf_core::query::QuerySpec;
use shelf_operators::plan_stages;

/// One line per active stage, in execution order.
pub fn explain(spec: &QuerySpec) -> Vec<String> {
    // Stage descriptions do not depend on the collation.
    plan_stages(spec, &BinaryCollation)
        .iter()
        .enumerate()
        .map(|(i, stage)| format!("{}. {:<8} {}", i + 1, stage.name(), stage.describe()))
        .collect()
}
