//! Stage trait shared by the filter and sort steps of the pipeline.

use shelf_core::model::EnrichedProduct;

/// One step of `prepare_products`.
///
/// Invariants:
/// - `eval` is total and deterministic given the same rows.
/// - Filter stages return a subsequence of their input; sort stages a
///   permutation of it.
pub trait Stage {
    /// Human-readable stage name (stable).
    fn name(&self) -> &'static str;

    /// One-line description used by `shelf explain`.
    fn describe(&self) -> String;

    fn eval(&self, rows: Vec<EnrichedProduct>) -> Vec<EnrichedProduct>;
}
