//! Session allocation: spacing items out or packing them into study days.
//!
//! With `N` items and `D` requested days:
//!
//! - **Spacing** (`N <= D`): one item per session, gaps spread evenly over
//!   the `D - 1` day window with the remainder front-loaded.
//! - **Packing** (`N > D`): items are grouped greedily until a session
//!   reaches the per-day target `T / D`, then padded with empty sessions up
//!   to exactly `D`. Every gap is one day.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::LearningItem,
};

/// Strategy chosen by comparing item count with day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationMode {
    Spacing,
    Packing,
}

/// One study occasion in the working schedule.
///
/// `items` are indices into the collected item list, in curriculum order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub items: Vec<usize>,
    pub duration_seconds: u64,
    /// Days until the next session; meaningless on the last session
    pub gap_to_next: u32,
}

impl Session {
    /// Builds a session over `indices`, summing durations from `items`.
    pub fn new(indices: Vec<usize>, items: &[LearningItem], gap_to_next: u32) -> Self {
        let duration_seconds = indices.iter().map(|&i| items[i].duration_seconds).sum();
        Self {
            items: indices,
            duration_seconds,
            gap_to_next,
        }
    }

    /// A rest day with no items.
    pub fn empty(gap_to_next: u32) -> Self {
        Self {
            items: Vec::new(),
            duration_seconds: 0,
            gap_to_next,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of the allocation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub mode: AllocationMode,
    pub sessions: Vec<Session>,
}

/// Allocates `items` over `requested_days`.
///
/// # Errors
///
/// Returns `PlannerError::InvalidInput` when `items` is empty, when
/// `requested_days` is zero, or when a packing allocation has no total
/// duration to divide.
pub fn allocate(items: &[LearningItem], requested_days: u32) -> Result<Allocation> {
    if items.is_empty() {
        return Err(PlannerError::invalid_input("curriculum")
            .with_reason("Cannot allocate sessions for an empty curriculum"));
    }
    if requested_days == 0 {
        return Err(PlannerError::invalid_input("requested_days")
            .with_reason("At least one study day is required"));
    }

    let allocation = if items.len() <= requested_days as usize {
        Allocation {
            mode: AllocationMode::Spacing,
            sessions: space(items, requested_days),
        }
    } else {
        Allocation {
            mode: AllocationMode::Packing,
            sessions: pack(items, requested_days)?,
        }
    };

    debug!(
        "Allocated {} items into {} sessions ({:?} mode)",
        items.len(),
        allocation.sessions.len(),
        allocation.mode
    );
    Ok(allocation)
}

/// Gaps between consecutive sessions in spacing mode.
///
/// Returns `n - 1` gaps; a single item needs none.
pub fn spacing_gaps(n: usize, requested_days: u32) -> Vec<u32> {
    if n <= 1 {
        return Vec::new();
    }
    let transitions = (n - 1) as u32;
    let window = requested_days.saturating_sub(1);
    let base = window / transitions;
    let remainder = window - base * transitions;

    (0..transitions)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

fn space(items: &[LearningItem], requested_days: u32) -> Vec<Session> {
    let gaps = spacing_gaps(items.len(), requested_days);
    (0..items.len())
        .map(|i| Session::new(vec![i], items, gaps.get(i).copied().unwrap_or(0)))
        .collect()
}

fn pack(items: &[LearningItem], requested_days: u32) -> Result<Vec<Session>> {
    let total = items
        .iter()
        .try_fold(0u64, |total, item| total.checked_add(item.duration_seconds))
        .ok_or_else(|| {
            PlannerError::invalid_input("curriculum")
                .with_reason("Total study duration is too long to schedule")
        })?;
    if total == 0 {
        return Err(PlannerError::invalid_input("curriculum")
            .with_reason("Items have no study duration to distribute"));
    }

    // accumulated * D >= T is the exact form of accumulated >= T / D
    let days = u128::from(requested_days);
    let target = u128::from(total);
    let mut accumulated: u128 = 0;
    let mut current = Vec::new();
    let mut sessions = Vec::with_capacity(requested_days as usize);

    for (index, item) in items.iter().enumerate() {
        current.push(index);
        accumulated += u128::from(item.duration_seconds) * days;
        if accumulated >= target {
            sessions.push(Session::new(std::mem::take(&mut current), items, 1));
            accumulated -= target;
        }
    }
    if !current.is_empty() {
        sessions.push(Session::new(current, items, 1));
    }
    while sessions.len() < requested_days as usize {
        sessions.push(Session::empty(1));
    }

    Ok(sessions)
}
