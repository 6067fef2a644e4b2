//! Property-based tests for journal balance validation.

use backoffice_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::error::JournalError;
use super::types::{EntryType, JournalLine};
use super::validation::{totals, validate_balance, validate_lines};

/// Strategy to generate a positive amount from 0.01 to 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

fn line(entry_type: EntryType, amount: Decimal) -> JournalLine {
    JournalLine {
        account_id: AccountId::new(),
        entry_type,
        amount,
        memo: None,
    }
}

/// Debit lines and a credit side split so that it sums to the same total.
fn balanced_lines() -> impl Strategy<Value = Vec<JournalLine>> {
    prop::collection::vec(positive_amount(), 1..8).prop_flat_map(|debits| {
        let total: Decimal = debits.iter().copied().sum();
        let cents = (total * Decimal::ONE_HUNDRED).trunc();
        let max_split = cents.to_i64().unwrap_or(1).max(1);
        (Just(debits), 0i64..max_split).prop_map(move |(debits, split)| {
            let mut lines: Vec<JournalLine> = debits
                .iter()
                .map(|a| line(EntryType::Debit, *a))
                .collect();
            let first = Decimal::new(split, 2);
            let second = total - first;
            if first > Decimal::ZERO {
                lines.push(line(EntryType::Credit, first));
            }
            lines.push(line(EntryType::Credit, second));
            lines
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Balanced lines validate, and the totals agree.
    #[test]
    fn prop_balanced_lines_accepted(lines in balanced_lines()) {
        prop_assert!(validate_balance(&lines));
        let result = validate_lines(&lines);
        prop_assert!(result.is_ok(), "balanced lines rejected: {:?}", result);
        let t = result.unwrap();
        prop_assert_eq!(t.debit, t.credit);
    }

    /// Adding any positive amount to one side breaks the balance.
    #[test]
    fn prop_any_difference_rejected(
        mut lines in balanced_lines(),
        extra in positive_amount(),
        side in entry_type_strategy(),
    ) {
        lines.push(line(side, extra));
        prop_assert!(!validate_balance(&lines));
        let is_unbalanced = matches!(validate_lines(&lines), Err(JournalError::Unbalanced { .. }));
        prop_assert!(is_unbalanced);
    }

    /// validate_balance agrees with the signed sum being zero.
    #[test]
    fn prop_balance_matches_signed_sum(
        raw in prop::collection::vec((entry_type_strategy(), positive_amount()), 0..10),
    ) {
        let lines: Vec<JournalLine> = raw.into_iter().map(|(t, a)| line(t, a)).collect();
        let signed: Decimal = lines.iter().map(JournalLine::signed_amount).sum();
        prop_assert_eq!(validate_balance(&lines), signed.is_zero());
        let t = totals(&lines).unwrap();
        prop_assert_eq!(t.debit - t.credit, signed);
    }

    /// Line order never changes the verdict.
    #[test]
    fn prop_order_independent(mut lines in balanced_lines()) {
        let before = validate_balance(&lines);
        lines.reverse();
        prop_assert_eq!(before, validate_balance(&lines));
    }

    /// A non-positive amount anywhere is rejected before balancing.
    #[test]
    fn prop_non_positive_rejected(
        mut lines in balanced_lines(),
        cents in 0i64..1_000_000,
        side in entry_type_strategy(),
    ) {
        lines.push(line(side, Decimal::new(-cents, 2)));
        let is_invalid = matches!(
            validate_lines(&lines),
            Err(JournalError::NonPositiveAmount { .. })
        );
        prop_assert!(is_invalid);
    }
}
