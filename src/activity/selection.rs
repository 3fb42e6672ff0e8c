//! Random selection of tasks and exercises.
//!
//! Everything here is pure given the random source: callers pass the RNG in,
//! so a seeded `StdRng` reproduces a selection exactly.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use super::record::{ExerciseRecord, SelectionResult, TaskRecord};

/// Upper bound on selected tasks and on selected exercises.
pub const MAX_SELECTED: usize = 5;

/// Select up to [`MAX_SELECTED`] tasks, up to [`MAX_SELECTED`] exercises and
/// one bonus task from what is left of the task pool.
///
/// # Postconditions
/// - `selected_tasks.len() == min(MAX_SELECTED, tasks.len())`
/// - `selected_exercises.len() == min(MAX_SELECTED, exercises.len())`
/// - No pool position is drawn twice; output order is the draw order
/// - `bonus_task` is drawn from `tasks - selected_tasks` (multiset difference)
///   and never equals a selected task
/// - `bonus_task.is_none()` whenever `tasks.len() <= MAX_SELECTED`
pub fn select_activities<R: Rng + ?Sized>(
    tasks: &[TaskRecord],
    exercises: &[ExerciseRecord],
    rng: &mut R,
) -> SelectionResult {
    let selected_tasks = sample_without_replacement(tasks, MAX_SELECTED, rng);
    let selected_exercises = sample_without_replacement(exercises, MAX_SELECTED, rng);

    // Duplicate rows can leave a copy of a selected task in the remainder.
    let candidates: Vec<TaskRecord> = multiset_difference(tasks, &selected_tasks)
        .into_iter()
        .filter(|task| !selected_tasks.contains(task))
        .collect();
    let bonus_task = candidates.choose(rng).cloned();

    SelectionResult {
        selected_tasks,
        selected_exercises,
        bonus_task,
    }
}

/// Draw `min(amount, pool.len())` elements uniformly without replacement.
///
/// Every subset of that size is equally likely and the result is in random
/// order. Positions are sampled, so equal values at different positions may
/// both be drawn, but one position never is drawn twice.
pub fn sample_without_replacement<T: Clone, R: Rng + ?Sized>(
    pool: &[T],
    amount: usize,
    rng: &mut R,
) -> Vec<T> {
    let amount = amount.min(pool.len());
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}

/// `pool - taken` as multisets.
///
/// Each element of `taken` removes exactly one equal occurrence from `pool`
/// (the first one still present). Order of the survivors is preserved.
pub fn multiset_difference<T: Clone + PartialEq>(pool: &[T], taken: &[T]) -> Vec<T> {
    let mut removed = vec![false; pool.len()];
    for item in taken {
        if let Some(pos) = pool
            .iter()
            .enumerate()
            .position(|(i, candidate)| !removed[i] && candidate == item)
        {
            removed[pos] = true;
        }
    }
    pool.iter()
        .zip(removed)
        .filter(|(_, gone)| !gone)
        .map(|(item, _)| item.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn task_pool(n: usize) -> Vec<TaskRecord> {
        (0..n)
            .map(|i| TaskRecord::new(format!("task-{}", i), 10 + i as u32, format!("desc {}", i)))
            .collect()
    }

    fn exercise_pool(n: usize) -> Vec<ExerciseRecord> {
        (0..n)
            .map(|i| ExerciseRecord::new(format!("exercise-{}", i), 3, "do it", None))
            .collect()
    }

    #[test]
    fn selected_sizes_are_capped_at_five() {
        for n in 0..=12 {
            let mut rng = StdRng::seed_from_u64(n as u64);
            let result = select_activities(&task_pool(n), &exercise_pool(n), &mut rng);
            assert_eq!(result.selected_tasks.len(), n.min(MAX_SELECTED));
            assert_eq!(result.selected_exercises.len(), n.min(MAX_SELECTED));
        }
    }

    #[test]
    fn selected_tasks_come_from_pool_without_repeats() {
        let pool = task_pool(9);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = select_activities(&pool, &[], &mut rng);
            let unique: HashSet<_> = result.selected_tasks.iter().collect();
            assert_eq!(unique.len(), result.selected_tasks.len());
            assert!(result.selected_tasks.iter().all(|t| pool.contains(t)));
        }
    }

    #[test]
    fn bonus_never_equals_a_selected_task() {
        let pool = task_pool(8);
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = select_activities(&pool, &[], &mut rng);
            let bonus = result.bonus_task.expect("pool of 8 leaves a remainder");
            assert!(!result.selected_tasks.contains(&bonus));
            assert!(pool.contains(&bonus));
        }
    }

    #[test]
    fn no_bonus_when_pool_has_five_or_fewer() {
        for n in 0..=MAX_SELECTED {
            let mut rng = StdRng::seed_from_u64(7);
            let result = select_activities(&task_pool(n), &[], &mut rng);
            assert!(result.bonus_task.is_none(), "pool of {} gave a bonus", n);
        }
    }

    #[test]
    fn pool_of_exactly_five_selects_everything() {
        let pool = task_pool(5);
        let mut rng = StdRng::seed_from_u64(11);
        let result = select_activities(&pool, &[], &mut rng);
        let selected: HashSet<_> = result.selected_tasks.iter().collect();
        let all: HashSet<_> = pool.iter().collect();
        assert_eq!(selected, all);
    }

    #[test]
    fn pool_of_seven_gives_bonus_from_the_two_unselected() {
        let pool = task_pool(7);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = select_activities(&pool, &[], &mut rng);
            let unselected = multiset_difference(&pool, &result.selected_tasks);
            assert_eq!(unselected.len(), 2);
            let bonus = result.bonus_task.expect("pool of 7 must give a bonus");
            assert!(unselected.contains(&bonus));
        }
    }

    #[test]
    fn same_seed_same_selection() {
        let tasks = task_pool(12);
        let exercises = exercise_pool(9);
        let first = select_activities(&tasks, &exercises, &mut StdRng::seed_from_u64(42));
        let second = select_activities(&tasks, &exercises, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn empty_pools_give_empty_selection() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = select_activities(&[], &[], &mut rng);
        assert_eq!(result, SelectionResult::default());
    }

    #[test]
    fn draw_order_is_random() {
        let pool = task_pool(5);
        let reordered = (0..20).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            select_activities(&pool, &[], &mut rng).selected_tasks != pool
        });
        assert!(reordered);
    }

    #[test]
    fn every_task_is_left_out_roughly_equally() {
        let pool = task_pool(6);
        let mut left_out = vec![0usize; pool.len()];
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..6000 {
            let selected = sample_without_replacement(&pool, MAX_SELECTED, &mut rng);
            let missing = multiset_difference(&pool, &selected);
            let idx = pool.iter().position(|t| *t == missing[0]).expect("from pool");
            left_out[idx] += 1;
        }
        for count in left_out {
            assert!((700..=1300).contains(&count), "skewed count {}", count);
        }
    }

    #[test]
    fn bonus_is_uniform_over_the_remainder() {
        let pool = task_pool(7);
        let mut first_of_two = 0usize;
        let mut as_bonus = vec![0usize; pool.len()];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..7000 {
            let result = select_activities(&pool, &[], &mut rng);
            let unselected = multiset_difference(&pool, &result.selected_tasks);
            let bonus = result.bonus_task.expect("pool of 7 must give a bonus");
            if bonus == unselected[0] {
                first_of_two += 1;
            }
            let idx = pool.iter().position(|t| *t == bonus).expect("from pool");
            as_bonus[idx] += 1;
        }
        assert!((3200..=3800).contains(&first_of_two), "skewed split {}", first_of_two);
        for count in as_bonus {
            assert!((850..=1150).contains(&count), "skewed bonus count {}", count);
        }
    }

    #[test]
    fn multiset_difference_removes_one_occurrence_per_item() {
        let a = TaskRecord::new("A", 10, "a");
        let b = TaskRecord::new("B", 20, "b");
        let pool = vec![a.clone(), a.clone(), b.clone()];
        assert_eq!(multiset_difference(&pool, &[a.clone()]), vec![a.clone(), b.clone()]);
        assert_eq!(multiset_difference(&pool, &[a.clone(), a.clone()]), vec![b.clone()]);
        assert!(multiset_difference(&pool, &[a.clone(), b, a]).is_empty());
    }

    #[test]
    fn duplicate_rows_never_make_bonus_equal_to_selection() {
        let a = TaskRecord::new("A", 10, "a");
        let mut pool = task_pool(5);
        pool.push(a.clone());
        pool.push(a.clone());
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = select_activities(&pool, &[], &mut rng);
            assert_eq!(result.selected_tasks.len(), MAX_SELECTED);
            if let Some(bonus) = &result.bonus_task {
                assert!(!result.selected_tasks.contains(bonus));
            }
        }
    }

    #[test]
    fn exercises_do_not_affect_task_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = select_activities(&[], &exercise_pool(2), &mut rng);
        assert!(result.selected_tasks.is_empty());
        assert!(result.bonus_task.is_none());
        assert_eq!(result.selected_exercises.len(), 2);
    }
}
