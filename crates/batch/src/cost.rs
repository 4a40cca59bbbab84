//! Restore cost estimation.
//!
//! Closed-form and informational only: the estimate is printed before
//! submission but never blocks it. Keys are assumed to be roughly 1 GB,
//! which holds for WARC archives.

/// Cost per 1,000 bulk restore requests, USD.
const BULK_REQUEST_COST_PER_1K: f64 = 0.000025;

/// Bulk retrieval cost per GB, USD.
const BULK_RETRIEVAL_COST_PER_GB: f64 = 0.0025;

/// Standard-tier storage cost per GB per month, USD.
const STANDARD_STORAGE_COST_PER_GB_MONTH: f64 = 0.02;

/// Estimate the USD cost of restoring `num_keys` archives for `restore_days`.
///
/// Sums the bulk request cost (rounded up to the next multiple of 1,000
/// requests), the bulk retrieval cost, and standard-tier storage over the
/// retention window.
pub fn estimate_restore_cost(num_keys: usize, restore_days: u32) -> f64 {
    let gb_cost_per_day: f64 = STANDARD_STORAGE_COST_PER_GB_MONTH / 30.0;
    let storage_cost: f64 = restore_days as f64 * gb_cost_per_day * num_keys as f64;

    let request_blocks: f64 = (num_keys as f64 / 1000.0).ceil();

    request_blocks * BULK_REQUEST_COST_PER_1K
        + num_keys as f64 * BULK_RETRIEVAL_COST_PER_GB
        + storage_cost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_matches_closed_form() {
        // 1000 keys for 5 days, terms computed independently:
        // requests: ceil(1000/1000) * 0.000025 = 0.000025
        // retrieval: 1000 * 0.0025 = 2.5
        // storage: 5 * (0.02/30) * 1000 = 3.333...
        let expected: f64 = 0.000025 + 2.5 + 5.0 * (0.02 / 30.0) * 1000.0;

        let estimate: f64 = estimate_restore_cost(1000, 5);
        assert!((estimate - expected).abs() < 1e-12);
        assert!((estimate - 5.833_358).abs() < 1e-5);
    }

    #[test]
    fn test_request_cost_rounds_up_to_next_thousand() {
        let flat: f64 = estimate_restore_cost(1000, 0);
        let one_more: f64 = estimate_restore_cost(1001, 0);

        // 1001 keys pay for 2000 requests
        let expected_delta: f64 = BULK_REQUEST_COST_PER_1K + BULK_RETRIEVAL_COST_PER_GB;
        assert!((one_more - flat - expected_delta).abs() < 1e-12);
    }

    #[test]
    fn test_zero_keys_cost_nothing() {
        assert_eq!(estimate_restore_cost(0, 30), 0.0);
    }
}
