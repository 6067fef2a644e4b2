//! Property-based tests for depreciation grouping and schedules.

use std::collections::{HashMap, HashSet};

use backoffice_shared::types::{AccountId, DepreciationScheduleId, FixedAssetId};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::aggregation::group_by_account_pair;
use super::schedule::straight_line_schedule;
use super::types::{AccountPair, AssetTerms, PendingSchedule};
use crate::journal::validate_lines;

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Up to 4 account pairs drawn from a small account space.
fn pair_strategy() -> impl Strategy<Value = AccountPair> {
    (1u128..4, 10u128..13).prop_map(|(e, a)| AccountPair {
        expense_account_id: AccountId::from_uuid(Uuid::from_u128(e)),
        accumulated_account_id: AccountId::from_uuid(Uuid::from_u128(a)),
    })
}

/// Assets with their pair and a list of pending amounts.
fn run_input() -> impl Strategy<Value = Vec<(AccountPair, Vec<Decimal>)>> {
    prop::collection::vec(
        (pair_strategy(), prop::collection::vec(positive_amount(), 1..5)),
        0..10,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every schedule lands in exactly one group, totals are preserved, and
    /// each group's journal balances.
    #[test]
    fn prop_grouping_partitions_schedules(input in run_input()) {
        let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let mut settings = HashMap::new();
        let mut schedules = Vec::new();
        for (pair, amounts) in &input {
            let asset = FixedAssetId::new();
            settings.insert(asset, *pair);
            for amount in amounts {
                schedules.push(PendingSchedule {
                    schedule_id: DepreciationScheduleId::new(),
                    fixed_asset_id: asset,
                    depreciation_date: date,
                    amount: *amount,
                });
            }
        }

        let groups = group_by_account_pair(&schedules, &settings).unwrap();

        let distinct_pairs: HashSet<AccountPair> = input.iter().map(|(p, _)| *p).collect();
        prop_assert_eq!(groups.len(), distinct_pairs.len());

        let grouped: usize = groups.iter().map(|g| g.schedules.len()).sum();
        prop_assert_eq!(grouped, schedules.len());

        let grand_total: Decimal = schedules.iter().map(|s| s.amount).sum();
        let grouped_total: Decimal = groups.iter().map(|g| g.total).sum();
        prop_assert_eq!(grand_total, grouped_total);

        for pair in groups.windows(2) {
            prop_assert!(pair[0].account_pair < pair[1].account_pair);
        }
        for group in &groups {
            prop_assert!(validate_lines(&group.journal_lines()).is_ok());
            for s in &group.schedules {
                prop_assert_eq!(settings[&s.fixed_asset_id], group.account_pair);
            }
        }
    }

    /// A straight-line schedule always sums to cost minus salvage and never
    /// has a non-positive period.
    #[test]
    fn prop_schedule_sums_to_base(
        cost_cents in 0i64..100_000_000,
        salvage_pct in 0i64..=100,
        months in 1i32..=120,
    ) {
        let cost = Decimal::new(cost_cents, 2);
        let salvage = (cost * Decimal::new(salvage_pct, 2)).round_dp(2).min(cost);
        let terms = AssetTerms {
            acquisition_cost: cost,
            salvage_value: salvage,
            useful_life_months: months,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };

        let schedule = straight_line_schedule(&terms).unwrap();
        let total: Decimal = schedule.iter().map(|p| p.amount).sum();
        prop_assert_eq!(total, cost - salvage);
        prop_assert!(schedule.iter().all(|p| p.amount > Decimal::ZERO));
        prop_assert!(schedule.len() <= usize::try_from(months).unwrap());
        for pair in schedule.windows(2) {
            prop_assert!(pair[0].depreciation_date < pair[1].depreciation_date);
        }
    }
}
