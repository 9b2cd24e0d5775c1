//! Node/UE-level aggregation algorithms (spec §4.2 "Key algorithms").
//!
//! Each helper mirrors one accumulation pattern observed across
//! `e2sm_kpm_du_meas_provider_impl.cpp`'s metric getters:
//!
//! - `sum_cumulative_counter_kbit` — a CC (cumulative-counter) metric is a
//!   data *volume*: the node-level value is a straight sum over history,
//!   converted to kbit, never divided by a period
//!   (`get_drb_rlc_sdu_transmitted_volume_dl`).
//! - `mean_of_ue_means` — a DER (derived-per-event) delay metric: average
//!   each UE's own mean, then average across UEs (`get_drb_ul_rlc_sdu_latency`).
//! - `ratio_of_sums` — a rate expressed as one global ratio,
//!   `sum(numerator) / sum(denominator)` across all UEs and samples, not the
//!   mean of per-UE ratios.
//! - `per_ue_prb_usage` — uses only the single latest scheduler sample,
//!   dividing a UE's PRB total by the cell's DL/UL slot count
//!   (`get_prb_used_dl`/`get_prb_used_ul`).

/// Sums byte counts across history and converts to kbit (`* 8 / 1000`,
/// truncating). Matches the reference source's `total_bytes * 8 / 1000`.
pub fn bytes_to_kbit(total_bytes: u64) -> i64 {
    (total_bytes * 8 / 1000) as i64
}

/// `Σ numerator / Σ denominator` across all UEs and samples (spec §4.2
/// "rate metrics"). Returns `None` if the denominator sum is zero (no
/// observations), matching the caller's obligation to surface `no_value`
/// rather than dividing by zero.
pub fn ratio_of_sums(pairs: impl Iterator<Item = (u64, u64)>) -> Option<f64> {
    let (num, den) = pairs.fold((0u64, 0u64), |(n, d), (pn, pd)| (n + pn, d + pd));
    if den == 0 {
        None
    } else {
        Some(num as f64 / den as f64)
    }
}

/// Per-UE mean-of-means, then averaged across UEs (spec §4.2 "delays"). Each
/// item is `(sum_of_values, count)` for one UE's history window; UEs with a
/// zero count contribute nothing (matches the reference's
/// `if (tot_num_sdus && tot_sdu_latency_us)` guard). Returns `None` if no UE
/// contributed an observation.
pub fn mean_of_ue_means(per_ue: impl Iterator<Item = (f64, u64)>) -> Option<f64> {
    let mut total = 0.0f64;
    let mut contributors = 0u32;
    for (sum, count) in per_ue {
        if count > 0 {
            total += sum / count as f64;
            contributors += 1;
        }
    }
    if contributors == 0 {
        None
    } else {
        Some(total / contributors as f64)
    }
}

/// Per-UE PRB usage from the single latest scheduler sample: integer
/// division of the UE's PRB total by the slot count (spec §4.2 "Per-UE PRB
/// usage"). Returns 0 if `slot_count` is 0, matching the reference's
/// `nof_dl_slots > 0 ? ... : 0` guard.
pub fn per_ue_prb_usage(prb_total: u32, slot_count: u32) -> u32 {
    if slot_count == 0 {
        0
    } else {
        prb_total / slot_count
    }
}

/// Cell-wide PRB usage percentage, truncated (not rounded) to integer (spec
/// §4.2: `100 × used / nof_prbs`).
pub fn prb_usage_percent(used: u32, nof_prbs: u32) -> u32 {
    if nof_prbs == 0 {
        0
    } else {
        100 * used / nof_prbs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_kbit_truncates() {
        assert_eq!(bytes_to_kbit(999), 7); // 999*8=7992/1000 = 7 (trunc)
        assert_eq!(bytes_to_kbit(1000), 8);
    }

    #[test]
    fn ratio_of_sums_matches_global_ratio_not_mean_of_ratios() {
        // UE A: 1/2, UE B: 10/10 -> mean-of-ratios would be (0.5+1.0)/2=0.75
        // but global ratio is (1+10)/(2+10) = 11/12.
        let r = ratio_of_sums(vec![(1, 2), (10, 10)].into_iter()).unwrap();
        assert!((r - 11.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn mean_of_ue_means_skips_zero_count_ues() {
        let r = mean_of_ue_means(vec![(100.0, 10), (0.0, 0)].into_iter()).unwrap();
        assert_eq!(r, 10.0);
    }

    #[test]
    fn per_ue_prb_usage_scenario_2() {
        // Scenario 2: 4 UEs, 10 DL slots, per-slot vectors summing to
        // 43, 36, 25, 25 -> truncated per-UE then summed = 11.
        let totals = [43u32, 36, 25, 25];
        let used: u32 = totals.iter().map(|&t| per_ue_prb_usage(t, 10)).sum();
        assert_eq!(used, 11);

        let nof_prbs = 25u32;
        let avail = nof_prbs.saturating_sub(used);
        assert_eq!(avail, 14);
        assert_eq!(prb_usage_percent(used, nof_prbs), 44);
    }
}
