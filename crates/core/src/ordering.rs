//! Order sequence validation for a project's ticket statuses.
//!
//! A project's statuses are valid when their `order` values form a dense,
//! zero-based permutation: exactly `{0, 1, ..., n - 1}` with no duplicates.
//! Batch edits are checked against this after the fact rather than proving
//! each delete/reorder/insert step correct in isolation.

use crate::types::StatusOrder;

/// Why an order sequence is not a dense zero-based permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrderingError {
    /// The same order value is used by more than one status.
    #[error("order {order} is used more than once")]
    Duplicate { order: StatusOrder },

    /// After sorting, position `expected` holds a different value.
    #[error("expected order {expected}, found {found}")]
    Gap {
        expected: StatusOrder,
        found: StatusOrder,
    },
}

/// Check that `orders` is exactly `{0..n-1}`, reporting the first problem
/// found in ascending order.
pub fn check_ordering<I>(orders: I) -> Result<(), OrderingError>
where
    I: IntoIterator<Item = StatusOrder>,
{
    let mut sorted: Vec<StatusOrder> = orders.into_iter().collect();
    sorted.sort_unstable();

    for (index, &order) in sorted.iter().enumerate() {
        // Positions beyond i32::MAX cannot be dense anyway.
        let expected = StatusOrder::try_from(index).unwrap_or(StatusOrder::MAX);
        if order == expected {
            continue;
        }
        if index > 0 && sorted[index - 1] == order {
            return Err(OrderingError::Duplicate { order });
        }
        return Err(OrderingError::Gap {
            expected,
            found: order,
        });
    }
    Ok(())
}

/// Returns `true` only for a dense, zero-based, duplicate-free sequence.
///
/// The empty sequence is valid.
pub fn is_valid_ordering<I>(orders: I) -> bool
where
    I: IntoIterator<Item = StatusOrder>,
{
    check_ordering(orders).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_valid() {
        assert!(is_valid_ordering(Vec::new()));
    }

    #[test]
    fn permutation_in_any_input_order_is_valid() {
        assert!(is_valid_ordering([0, 1, 2]));
        assert!(is_valid_ordering([2, 0, 1]));
        assert!(is_valid_ordering([1, 0]));
    }

    #[test]
    fn duplicate_zero_with_gap_is_rejected_as_duplicate() {
        assert_eq!(
            check_ordering([0, 0, 2]),
            Err(OrderingError::Duplicate { order: 0 })
        );
    }

    #[test]
    fn gap_is_reported_with_expected_position() {
        assert_eq!(
            check_ordering([0, 2]),
            Err(OrderingError::Gap {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn must_start_at_zero() {
        assert!(!is_valid_ordering([1, 2, 3]));
    }

    #[test]
    fn negative_orders_are_rejected() {
        assert_eq!(
            check_ordering([-1, 0]),
            Err(OrderingError::Gap {
                expected: 0,
                found: -1
            })
        );
    }

    #[test]
    fn single_status_must_be_zero() {
        assert!(is_valid_ordering([0]));
        assert!(!is_valid_ordering([1]));
    }
}
