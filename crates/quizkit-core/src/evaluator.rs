//! Answer evaluation.
//!
//! Total over well-formed questions: there is no error path here.

use std::collections::BTreeSet;

use crate::model::Question;

/// Decide whether `selection` is a correct response to `question`.
///
/// - Multiple choice: the selected set must equal the correct set exactly.
///   Order and duplicates are irrelevant; an empty selection is never correct.
/// - Single choice: exactly one option selected, and it is one of the
///   correct options. Over-selection is wrong, never partially credited.
pub fn is_correct_selection(question: &Question, selection: &[usize]) -> bool {
    if question.is_multiple_choice {
        let selected: BTreeSet<usize> = selection.iter().copied().collect();
        let correct: BTreeSet<usize> = question.correct_answer_index.iter().copied().collect();
        !selected.is_empty() && selected == correct
    } else {
        match selection {
            [only] => question.correct_answer_index.contains(only),
            _ => false,
        }
    }
}

/// Evaluate the question's current `user_answers` and memoize the verdict
/// in `is_correct`. Idempotent.
pub fn evaluate(question: &mut Question) -> bool {
    let verdict = is_correct_selection(question, &question.user_answers);
    question.is_correct = Some(verdict);
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(correct: Vec<usize>) -> Question {
        Question::new(
            "single",
            vec!["A".into(), "B".into(), "C".into()],
            correct,
        )
    }

    fn multi(correct: Vec<usize>) -> Question {
        Question::new(
            "multi",
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct,
        )
        .with_multiple_choice(true)
    }

    fn answer(mut q: Question, selection: Vec<usize>) -> Question {
        q.user_answers = selection;
        q
    }

    #[test]
    fn single_choice_scenario() {
        let mut q = answer(single(vec![1]), vec![1]);
        assert!(evaluate(&mut q));
        assert_eq!(q.is_correct, Some(true));

        let mut q = answer(single(vec![1]), vec![0]);
        assert!(!evaluate(&mut q));
        assert_eq!(q.is_correct, Some(false));
    }

    #[test]
    fn single_choice_requires_exactly_one_selection() {
        assert!(!is_correct_selection(&single(vec![1]), &[]));
        assert!(!is_correct_selection(&single(vec![1]), &[1, 1]));
        assert!(!is_correct_selection(&single(vec![0, 1]), &[0, 1]));
    }

    #[test]
    fn single_choice_accepts_any_member_of_correct_set() {
        let q = single(vec![0, 2]);
        assert!(is_correct_selection(&q, &[0]));
        assert!(is_correct_selection(&q, &[2]));
        assert!(!is_correct_selection(&q, &[1]));
    }

    #[test]
    fn multi_choice_scenario_is_order_independent() {
        let mut q = answer(multi(vec![0, 2]), vec![2, 0]);
        assert!(evaluate(&mut q));

        let mut q = answer(multi(vec![0, 2]), vec![0]);
        assert!(!evaluate(&mut q));
    }

    #[test]
    fn multi_choice_ignores_duplicates_and_rejects_supersets() {
        let q = multi(vec![0, 2]);
        assert!(is_correct_selection(&q, &[0, 2, 2, 0]));
        assert!(!is_correct_selection(&q, &[0, 1, 2]));
        assert!(!is_correct_selection(&q, &[]));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut q = answer(multi(vec![1, 3]), vec![3, 1]);
        let first = evaluate(&mut q);
        let second = evaluate(&mut q);
        assert_eq!(first, second);
        assert_eq!(q.is_correct, Some(true));

        let mut q = answer(single(vec![1]), vec![2]);
        assert_eq!(evaluate(&mut q), evaluate(&mut q));
    }

    #[test]
    fn exhaustive_single_choice_property() {
        // Every selection of up to two options over three answers.
        let q = single(vec![1]);
        let mut selections: Vec<Vec<usize>> = vec![vec![]];
        for a in 0..3 {
            selections.push(vec![a]);
            for b in 0..3 {
                selections.push(vec![a, b]);
            }
        }
        for sel in selections {
            let expected = sel.len() == 1 && q.correct_answer_index.contains(&sel[0]);
            assert_eq!(is_correct_selection(&q, &sel), expected, "selection {sel:?}");
        }
    }

    #[test]
    fn exhaustive_multi_choice_property() {
        // Every non-empty correct set against every selection, both as a
        // bitmask over four options and reversed.
        for correct_mask in 1u8..16 {
            let correct: Vec<usize> = (0..4).filter(|i| correct_mask & (1 << i) != 0).collect();
            let q = multi(correct.clone());
            for selected_mask in 0u8..16 {
                let sel: Vec<usize> = (0..4).filter(|i| selected_mask & (1 << i) != 0).collect();
                let expected = selected_mask == correct_mask;
                assert_eq!(
                    is_correct_selection(&q, &sel),
                    expected,
                    "correct {correct:?}, selection {sel:?}"
                );
                let reversed: Vec<usize> = sel.iter().rev().copied().collect();
                assert_eq!(is_correct_selection(&q, &reversed), expected);
            }
        }
    }
}
