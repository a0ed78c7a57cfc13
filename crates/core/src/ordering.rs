//! Ordinal bookkeeping for manually ordered collections.
//!
//! Ordinals are expected to form the dense sequence `1..=N`. Moving an
//! item swaps its ordinal with its neighbour's in display order, leaving
//! every other item untouched.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::resource::Resource;
use crate::types::RecordId;

/// Records carrying an integer display ordinal.
pub trait Ordinal {
    fn ordinal(&self) -> i64;
    fn set_ordinal(&mut self, ordinal: i64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A single `(id, order)` write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAssignment {
    pub id: RecordId,
    pub order: i64,
}

/// The two writes needed to move one item past its neighbour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPlan {
    /// The moved item with its new ordinal (the neighbour's old one).
    pub target: OrderAssignment,
    /// The neighbour with its new ordinal (the target's old one).
    pub neighbour: OrderAssignment,
}

impl SwapPlan {
    /// The write that puts the target back where it was.
    pub fn revert_target(&self) -> OrderAssignment {
        OrderAssignment {
            id: self.target.id.clone(),
            order: self.neighbour.order,
        }
    }

    pub fn assignments(&self) -> [OrderAssignment; 2] {
        [self.target.clone(), self.neighbour.clone()]
    }
}

/// Stable sort by ordinal.
pub fn sort_by_ordinal<T: Ordinal>(items: &mut [T]) {
    items.sort_by_key(|item| item.ordinal());
}

/// Ordinal for a newly created item: one past the current maximum, or 1
/// for an empty collection.
pub fn next_ordinal<T: Ordinal>(items: &[T]) -> i64 {
    items.iter().map(Ordinal::ordinal).max().map_or(1, |max| max + 1)
}

/// Whether the ordinals are exactly a permutation of `1..=N`.
pub fn is_dense_permutation<T: Ordinal>(items: &[T]) -> bool {
    let mut ordinals: Vec<i64> = items.iter().map(Ordinal::ordinal).collect();
    ordinals.sort_unstable();
    ordinals
        .iter()
        .enumerate()
        .all(|(i, &o)| o == i as i64 + 1)
}

/// Work out the swap that moves `id` one step in `direction`.
///
/// Neighbours are taken from display order (sorted by ordinal). Returns
/// `Ok(None)` when the item is already at that end of the list, and a
/// validation error when the neighbour holds the same ordinal.
pub fn plan_swap<T: Resource + Ordinal>(
    items: &[T],
    id: &str,
    direction: Direction,
) -> Result<Option<SwapPlan>, CoreError> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.ordinal());

    let index = sorted
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| CoreError::NotFound {
            entity: T::NOUN,
            id: id.to_string(),
        })?;

    let neighbour_index = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < sorted.len() => index + 1,
        _ => return Ok(None),
    };

    let target = sorted[index];
    let neighbour = sorted[neighbour_index];
    if target.ordinal() == neighbour.ordinal() {
        return Err(CoreError::Validation(format!(
            "{} and {} share order {}, swapping would not move either",
            target.id(),
            neighbour.id(),
            target.ordinal()
        )));
    }
    Ok(Some(SwapPlan {
        target: OrderAssignment {
            id: target.id().to_string(),
            order: neighbour.ordinal(),
        },
        neighbour: OrderAssignment {
            id: neighbour.id().to_string(),
            order: target.ordinal(),
        },
    }))
}

/// Apply a persisted swap to local state and re-sort.
pub fn apply_swap<T: Resource + Ordinal>(items: &mut [T], plan: &SwapPlan) {
    for item in items.iter_mut() {
        if item.id() == plan.target.id {
            item.set_ordinal(plan.target.order);
        } else if item.id() == plan.neighbour.id {
            item.set_ordinal(plan.neighbour.order);
        }
    }
    sort_by_ordinal(items);
}
