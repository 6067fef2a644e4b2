//! Journal balance validation.
//!
//! Pure functions. Nothing here touches storage; callers run them before
//! opening a transaction.

use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{EntryType, JournalLine, JournalTotals};

/// Sums debit and credit amounts.
///
/// # Errors
///
/// Returns [`JournalError::AmountOverflow`] if either side exceeds the
/// decimal range.
pub fn totals(lines: &[JournalLine]) -> Result<JournalTotals, JournalError> {
    lines.iter().try_fold(JournalTotals::default(), |mut acc, line| {
        let side = match line.entry_type {
            EntryType::Debit => &mut acc.debit,
            EntryType::Credit => &mut acc.credit,
        };
        *side = side
            .checked_add(line.amount)
            .ok_or(JournalError::AmountOverflow)?;
        Ok(acc)
    })
}

/// Returns true iff Σ DEBIT == Σ CREDIT, compared exactly.
///
/// An empty list is balanced (both sums are zero). Lines whose sums
/// overflow are never balanced.
#[must_use]
pub fn validate_balance(lines: &[JournalLine]) -> bool {
    totals(lines).is_ok_and(|t| t.is_balanced())
}

/// Validates lines before a journal is written.
///
/// Rules, checked in order:
/// 1. at least two lines
/// 2. every amount strictly positive
/// 3. both sides present
/// 4. sums fit the decimal range
/// 5. balanced
///
/// # Errors
///
/// Returns the first rule violated.
pub fn validate_lines(lines: &[JournalLine]) -> Result<JournalTotals, JournalError> {
    if lines.len() < 2 {
        return Err(JournalError::InsufficientLines);
    }

    if let Some((idx, line)) = lines
        .iter()
        .enumerate()
        .find(|(_, l)| l.amount <= Decimal::ZERO)
    {
        return Err(JournalError::NonPositiveAmount {
            line: idx + 1,
            amount: line.amount,
        });
    }

    let has_debit = lines.iter().any(|l| l.entry_type == EntryType::Debit);
    let has_credit = lines.iter().any(|l| l.entry_type == EntryType::Credit);
    if !has_debit || !has_credit {
        return Err(JournalError::SingleSided);
    }

    let totals = totals(lines)?;
    if !totals.is_balanced() {
        return Err(JournalError::Unbalanced {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}
