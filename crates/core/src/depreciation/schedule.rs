//! Straight-line depreciation schedules.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::DepreciationError;
use super::types::{AssetTerms, PlannedDepreciation};

/// Last day of the month containing `date`.
#[must_use]
pub fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Validates asset terms.
///
/// # Errors
///
/// Returns the first invalid field.
pub fn validate_terms(terms: &AssetTerms) -> Result<(), DepreciationError> {
    if terms.useful_life_months <= 0 {
        return Err(DepreciationError::InvalidUsefulLife(terms.useful_life_months));
    }
    if terms.acquisition_cost < Decimal::ZERO {
        return Err(DepreciationError::NegativeCost(terms.acquisition_cost));
    }
    if terms.salvage_value < Decimal::ZERO || terms.salvage_value > terms.acquisition_cost {
        return Err(DepreciationError::InvalidSalvageValue {
            cost: terms.acquisition_cost,
            salvage: terms.salvage_value,
        });
    }
    Ok(())
}

/// Builds a monthly straight-line schedule.
///
/// Each period gets the depreciable base divided by the useful life, rounded
/// toward zero to cents. The last period takes the remainder so the schedule
/// sums exactly to the base. Periods that would be zero are omitted.
///
/// # Errors
///
/// Invalid terms, or a period date past the end of the calendar.
pub fn straight_line_schedule(
    terms: &AssetTerms,
) -> Result<Vec<PlannedDepreciation>, DepreciationError> {
    validate_terms(terms)?;

    let base = terms.depreciable_base();
    let months = terms.useful_life_months;
    let monthly =
        (base / Decimal::from(months)).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    let first_month = NaiveDate::from_ymd_opt(terms.start_date.year(), terms.start_date.month(), 1)
        .ok_or(DepreciationError::DateOutOfRange)?;

    let mut periods = Vec::new();
    let mut allocated = Decimal::ZERO;

    for period in 1..=months {
        let amount = if period == months {
            base - allocated
        } else {
            monthly
        };
        allocated += amount;

        if amount.is_zero() {
            continue;
        }

        let offset = u32::try_from(period - 1).map_err(|_| DepreciationError::DateOutOfRange)?;
        let depreciation_date = first_month
            .checked_add_months(Months::new(offset))
            .and_then(end_of_month)
            .ok_or(DepreciationError::DateOutOfRange)?;

        periods.push(PlannedDepreciation {
            period,
            depreciation_date,
            amount,
        });
    }

    Ok(periods)
}
