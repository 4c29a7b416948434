//! Load balancing of packed sessions.
//!
//! Repeatedly sweeps adjacent session pairs from right to left, moving one
//! item across the shared boundary when that narrows the duration gap
//! between the pair. Items never change order: only the first item of the
//! right session or the last item of the left session can cross.
//!
//! A move is accepted when the pair's difference shrinks, or when it stays
//! equal and the right session was the smaller one. The loop stops after a
//! sweep with no accepted move.

use log::debug;

use super::allocator::Session;
use crate::models::LearningItem;

/// Sessions after balancing, with the number of sweeps it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balanced {
    pub sessions: Vec<Session>,
    /// Sweeps performed, including the final one without moves
    pub sweeps: usize,
}

/// Balances `sessions` until a full sweep accepts no move.
pub fn balance(mut sessions: Vec<Session>, items: &[LearningItem]) -> Balanced {
    let mut sweeps = 0;

    loop {
        sweeps += 1;
        let mut moved = false;

        for i in (1..sessions.len()).rev() {
            if let Some((left, right)) = propose_move(&sessions[i - 1], &sessions[i], items) {
                sessions[i - 1] = left;
                sessions[i] = right;
                moved = true;
            }
        }

        if !moved {
            break;
        }
    }

    debug!("Balanced {} sessions in {sweeps} sweeps", sessions.len());
    Balanced { sessions, sweeps }
}

/// Evaluates the single candidate move across the boundary of `left` and
/// `right`, returning the replacement pair when it is accepted.
pub fn propose_move(
    left: &Session,
    right: &Session,
    items: &[LearningItem],
) -> Option<(Session, Session)> {
    let diff_before = left.duration_seconds.abs_diff(right.duration_seconds);

    let (new_left, new_right) = if right.duration_seconds > left.duration_seconds {
        let (&first, rest) = right.items.split_first()?;
        let mut left_items = left.items.clone();
        left_items.push(first);
        (
            Session::new(left_items, items, left.gap_to_next),
            Session::new(rest.to_vec(), items, right.gap_to_next),
        )
    } else {
        let (&last, rest) = left.items.split_last()?;
        let mut right_items = Vec::with_capacity(right.items.len() + 1);
        right_items.push(last);
        right_items.extend_from_slice(&right.items);
        (
            Session::new(rest.to_vec(), items, left.gap_to_next),
            Session::new(right_items, items, right.gap_to_next),
        )
    };

    let diff_after = new_left.duration_seconds.abs_diff(new_right.duration_seconds);
    let accept = diff_after < diff_before
        || (diff_after == diff_before && right.duration_seconds < left.duration_seconds);

    accept.then_some((new_left, new_right))
}

/// Largest minus smallest session duration.
pub fn spread(sessions: &[Session]) -> u64 {
    let max = sessions.iter().map(|s| s.duration_seconds).max().unwrap_or(0);
    let min = sessions.iter().map(|s| s.duration_seconds).min().unwrap_or(0);
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{ItemKind, Ordinal},
        scheduling::allocator::allocate,
    };

    fn items_with(durations: &[u64]) -> Vec<LearningItem> {
        durations
            .iter()
            .enumerate()
            .map(|(i, &duration_seconds)| LearningItem {
                id: i as u64,
                kind: ItemKind::Lesson,
                title: format!("Item {i}"),
                duration_seconds,
                ordinal: Ordinal {
                    course: 0,
                    module: 0,
                    position: i as u32,
                },
            })
            .collect()
    }

    fn sizes(sessions: &[Session]) -> Vec<usize> {
        sessions.iter().map(|s| s.items.len()).collect()
    }

    fn flatten(sessions: &[Session]) -> Vec<usize> {
        sessions.iter().flat_map(|s| s.items.iter().copied()).collect()
    }

    #[test]
    fn test_moves_first_item_left_when_right_is_heavier() {
        let items = items_with(&[1000, 1000, 3000]);
        let left = Session::new(vec![0], &items, 1);
        let right = Session::new(vec![1, 2], &items, 1);

        let (new_left, new_right) = propose_move(&left, &right, &items).unwrap();
        assert_eq!(new_left.items, vec![0, 1]);
        assert_eq!(new_right.items, vec![2]);
        assert_eq!(new_left.duration_seconds, 2000);
        assert_eq!(new_right.duration_seconds, 3000);
    }

    #[test]
    fn test_rejects_leftward_move_on_tie_without_improvement() {
        let items = items_with(&[1000, 3000, 1000]);
        let left = Session::new(vec![0], &items, 1);
        let right = Session::new(vec![1, 2], &items, 1);

        assert!(propose_move(&left, &right, &items).is_none());
    }

    #[test]
    fn test_moves_last_item_right_when_left_is_heavier() {
        let items = items_with(&[1000, 1000, 1000]);
        let left = Session::new(vec![0, 1, 2], &items, 1);
        let right = Session::empty(1);

        let (new_left, new_right) = propose_move(&left, &right, &items).unwrap();
        assert_eq!(new_left.items, vec![0, 1]);
        assert_eq!(new_right.items, vec![2]);
    }

    #[test]
    fn test_rejects_move_that_widens_gap() {
        let items = items_with(&[1000, 1000]);
        let left = Session::new(vec![0], &items, 1);
        let right = Session::new(vec![1], &items, 1);
        assert!(propose_move(&left, &right, &items).is_none());
    }

    #[test]
    fn test_tie_accepted_only_when_right_is_smaller() {
        // left 3000, right 1000: moving the 2000 item swaps totals
        let items = items_with(&[1000, 2000, 1000]);
        let left = Session::new(vec![0, 1], &items, 1);
        let right = Session::new(vec![2], &items, 1);
        let (new_left, new_right) = propose_move(&left, &right, &items).unwrap();
        assert_eq!(new_left.duration_seconds, 1000);
        assert_eq!(new_right.duration_seconds, 3000);

        // mirrored: left 1000, right 3000 with a 2000 head item is a tie but
        // the right side is larger, so nothing moves
        let items = items_with(&[1000, 2000, 1000]);
        let left = Session::new(vec![0], &items, 1);
        let right = Session::new(vec![1, 2], &items, 1);
        assert!(propose_move(&left, &right, &items).is_none());
    }

    #[test]
    fn test_two_empty_sessions_have_no_candidate() {
        let items = items_with(&[]);
        assert!(propose_move(&Session::empty(1), &Session::empty(1), &items).is_none());
    }

    #[test]
    fn test_uniform_items_settle_with_surplus_at_the_end() {
        let items = items_with(&[1800; 10]);
        let allocation = allocate(&items, 3).unwrap();
        assert_eq!(sizes(&allocation.sessions), vec![4, 3, 3]);
        let before = spread(&allocation.sessions);

        let balanced = balance(allocation.sessions, &items);

        assert_eq!(sizes(&balanced.sessions), vec![3, 3, 4]);
        assert!(spread(&balanced.sessions) <= before);
        assert_eq!(flatten(&balanced.sessions), (0..10).collect::<Vec<_>>());
        assert_eq!(balanced.sweeps, 3);
    }

    #[test]
    fn test_empty_tail_sessions_receive_items() {
        let items = items_with(&[1800, 1800, 1800, 100_000]);
        let allocation = allocate(&items, 3).unwrap();
        assert_eq!(sizes(&allocation.sessions), vec![4, 0, 0]);

        let balanced = balance(allocation.sessions, &items);

        assert_eq!(flatten(&balanced.sessions), vec![0, 1, 2, 3]);
        assert!(spread(&balanced.sessions) < 105_400);
        assert_eq!(balanced.sessions.last().unwrap().items, vec![3]);
    }

    #[test]
    fn test_balancing_never_widens_spread_and_terminates() {
        let durations: Vec<u64> = (1..=60).map(|i| 900 + (i * 53 % 17) * 240).collect();
        let items = items_with(&durations);

        for days in [2, 5, 9, 14, 31, 59] {
            let allocation = allocate(&items, days).unwrap();
            let before = spread(&allocation.sessions);
            let balanced = balance(allocation.sessions, &items);

            assert!(spread(&balanced.sessions) <= before, "days={days}");
            assert_eq!(balanced.sessions.len(), days as usize);
            assert_eq!(flatten(&balanced.sessions), (0..items.len()).collect::<Vec<_>>());
            assert!(balanced.sweeps >= 1);
        }
    }
}
