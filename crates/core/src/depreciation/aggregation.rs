//! Grouping of pending schedules by account pair.

use std::collections::{BTreeMap, HashMap};

use backoffice_shared::types::FixedAssetId;
use rust_decimal::Decimal;

use super::error::DepreciationError;
use super::types::{AccountPair, PendingSchedule, PostingGroup};

/// Groups schedules by the account pair of their asset's setting.
///
/// Groups come back in ascending `AccountPair` order; schedules inside a
/// group are ordered by date then id. Groups are never empty.
///
/// # Errors
///
/// `SettingNotFound` if any schedule's asset has no entry in `settings`.
/// Nothing is grouped in that case.
pub fn group_by_account_pair(
    schedules: &[PendingSchedule],
    settings: &HashMap<FixedAssetId, AccountPair>,
) -> Result<Vec<PostingGroup>, DepreciationError> {
    let mut groups: BTreeMap<AccountPair, Vec<PendingSchedule>> = BTreeMap::new();

    for schedule in schedules {
        let pair = settings.get(&schedule.fixed_asset_id).ok_or_else(|| {
            DepreciationError::SettingNotFound(schedule.fixed_asset_id.into_inner())
        })?;
        groups.entry(*pair).or_default().push(schedule.clone());
    }

    Ok(groups
        .into_iter()
        .map(|(account_pair, mut schedules)| {
            schedules.sort_by(|a, b| {
                a.depreciation_date
                    .cmp(&b.depreciation_date)
                    .then_with(|| a.schedule_id.cmp(&b.schedule_id))
            });
            let total: Decimal = schedules.iter().map(|s| s.amount).sum();
            PostingGroup {
                account_pair,
                schedules,
                total,
            }
        })
        .collect())
}
