//! Pure step functions: how long to wait and what comes next.
//!
//! Nothing in this module touches a timer. [`delay_for`] and [`advance`]
//! are total over [`Status`] and are composed by
//! [`schedule_next_step`](super::schedule_next_step) and by the [`Steps`]
//! iterator.

use std::time::Duration;

use super::progress::{Progress, Status, Typewriter};

// ============================================================================
// Delay lookup
// ============================================================================

/// Returns how long to wait before advancing from `progress`.
///
/// Only `progress.status` is consulted.
#[must_use]
pub const fn delay_for(typewriter: &Typewriter, progress: &Progress) -> Duration {
    let Typewriter {
        typing_speed,
        erasing_speed,
    } = typewriter;

    match progress.status {
        Status::WaitingToType | Status::Unrecognized => typing_speed.start_delay(),
        Status::Typing => typing_speed.step_delay(),
        Status::WaitingToErase => erasing_speed.start_delay(),
        Status::Erasing => erasing_speed.step_delay(),
    }
}

// ============================================================================
// Transition
// ============================================================================

/// Computes the progress that follows `progress`.
///
/// Reveal and erase counts overshooting the phrase bounds are clamped;
/// a step that finishes early does not carry the remainder forward.
/// Lengths are measured in `char`s.
///
/// # Panics
///
/// Panics if `phrases` is empty and an erase completes (the index wraps
/// modulo the list length), or if `progress.phrase_idx` is out of range
/// while typing or erasing.
#[must_use]
pub fn advance<S: AsRef<str>>(
    phrases: &[S],
    typewriter: &Typewriter,
    progress: &Progress,
) -> Progress {
    match progress.status {
        Status::Typing => {
            let full = phrases[progress.phrase_idx].as_ref();
            let end = progress
                .revealed_len()
                .saturating_add(typewriter.typing_speed.num_units);
            let status = if end >= full.chars().count() {
                Status::WaitingToErase
            } else {
                Status::Typing
            };
            Progress {
                phrase: prefix(full, end),
                phrase_idx: progress.phrase_idx,
                status,
            }
        }
        Status::WaitingToErase => Progress {
            status: Status::Erasing,
            ..progress.clone()
        },
        Status::Erasing => {
            let revealed = progress.revealed_len();
            let removed = typewriter.erasing_speed.num_units;
            if revealed <= removed {
                Progress {
                    phrase: String::new(),
                    phrase_idx: (progress.phrase_idx + 1) % phrases.len(),
                    status: Status::WaitingToType,
                }
            } else {
                let full = phrases[progress.phrase_idx].as_ref();
                Progress {
                    phrase: prefix(full, revealed - removed),
                    phrase_idx: progress.phrase_idx,
                    status: Status::Erasing,
                }
            }
        }
        // The displayed phrase is passed through untouched, not reset.
        Status::WaitingToType | Status::Unrecognized => Progress {
            status: Status::Typing,
            ..progress.clone()
        },
    }
}

/// First `len` chars of `full`, or all of it when `len` overshoots.
fn prefix(full: &str, len: usize) -> String {
    full.chars().take(len).collect()
}

// ============================================================================
// Steps iterator
// ============================================================================

/// One scheduled transition: the wait before it and the progress it yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Delay that precedes the transition.
    pub delay: Duration,
    /// Progress after the transition.
    pub progress: Progress,
}

/// Endless, timer-free replay of the animation schedule.
///
/// Created by [`steps`].
#[derive(Debug, Clone)]
pub struct Steps<'a, S> {
    phrases: &'a [S],
    typewriter: Typewriter,
    current: Progress,
}

/// Iterates the steps that follow `progress`, without sleeping.
///
/// # Panics
///
/// Iterating panics under the same conditions as [`advance`].
#[must_use]
pub fn steps<S: AsRef<str>>(
    phrases: &[S],
    typewriter: Typewriter,
    progress: Progress,
) -> Steps<'_, S> {
    Steps {
        phrases,
        typewriter,
        current: progress,
    }
}

impl<S: AsRef<str>> Iterator for Steps<'_, S> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        let delay = delay_for(&self.typewriter, &self.current);
        let next = advance(self.phrases, &self.typewriter, &self.current);
        self.current = next.clone();
        Some(Step {
            delay,
            progress: next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycler::progress::{DEFAULT_PROGRESS, Speed};

    use proptest::prelude::*;

    fn typewriter(typing_units: usize, erasing_units: usize) -> Typewriter {
        Typewriter::new(
            Speed::new(typing_units, 10, 100),
            Speed::new(erasing_units, 20, 200),
        )
    }

    // ========================================================================
    // delay_for
    // ========================================================================

    #[test]
    fn delay_for_each_status() {
        let tw = typewriter(1, 1);
        let cases = [
            (Status::WaitingToType, 100),
            (Status::Typing, 10),
            (Status::WaitingToErase, 200),
            (Status::Erasing, 20),
            (Status::Unrecognized, 100),
        ];
        for (status, expected_ms) in cases {
            let progress = Progress::new("", 0, status);
            assert_eq!(
                delay_for(&tw, &progress),
                Duration::from_millis(expected_ms),
                "status {status}"
            );
        }
    }

    #[test]
    fn delay_ignores_phrase_and_index() {
        let tw = typewriter(1, 1);
        let a = Progress::new("", 0, Status::Erasing);
        let b = Progress::new("something long", 7, Status::Erasing);
        assert_eq!(delay_for(&tw, &a), delay_for(&tw, &b));
    }

    // ========================================================================
    // advance: typing
    // ========================================================================

    #[test]
    fn typing_reveals_units() {
        let phrases = ["hello"];
        let next = advance(
            &phrases,
            &typewriter(2, 1),
            &Progress::new("h", 0, Status::Typing),
        );
        assert_eq!(next, Progress::new("hel", 0, Status::Typing));
    }

    #[test]
    fn typing_completion_overshoot() {
        let phrases = ["hi"];
        let next = advance(
            &phrases,
            &typewriter(5, 1),
            &Progress::new("h", 0, Status::Typing),
        );
        assert_eq!(next, Progress::new("hi", 0, Status::WaitingToErase));
    }

    #[test]
    fn typing_exact_end_waits_to_erase() {
        let phrases = ["abc"];
        let next = advance(
            &phrases,
            &typewriter(1, 1),
            &Progress::new("ab", 0, Status::Typing),
        );
        assert_eq!(next, Progress::new("abc", 0, Status::WaitingToErase));
    }

    #[test]
    fn typing_zero_units_stalls() {
        let phrases = ["abc"];
        let current = Progress::new("a", 0, Status::Typing);
        let next = advance(&phrases, &typewriter(0, 1), &current);
        assert_eq!(next, current);
    }

    #[test]
    fn typing_multibyte_is_char_indexed() {
        let phrases = ["héllo wörld"];
        let next = advance(
            &phrases,
            &typewriter(2, 1),
            &Progress::new("h", 0, Status::Typing),
        );
        assert_eq!(next.phrase, "hél");
    }

    // ========================================================================
    // advance: waiting
    // ========================================================================

    #[test]
    fn waiting_to_erase_only_flips_status() {
        let phrases = ["abc", "def"];
        let current = Progress::new("abc", 0, Status::WaitingToErase);
        let next = advance(&phrases, &typewriter(1, 1), &current);
        assert_eq!(next.phrase, current.phrase);
        assert_eq!(next.phrase_idx, current.phrase_idx);
        assert_eq!(next.status, Status::Erasing);
    }

    #[test]
    fn waiting_to_type_passes_phrase_through() {
        let phrases = ["abc"];
        let current = Progress::new("ab", 0, Status::WaitingToType);
        let next = advance(&phrases, &typewriter(1, 1), &current);
        assert_eq!(next, Progress::new("ab", 0, Status::Typing));
    }

    #[test]
    fn unrecognized_status_starts_typing() {
        let phrases = ["abc"];
        let next = advance(
            &phrases,
            &typewriter(1, 1),
            &Progress::new("", 0, Status::Unrecognized),
        );
        assert_eq!(next, Progress::new("", 0, Status::Typing));
    }

    // ========================================================================
    // advance: erasing
    // ========================================================================

    #[test]
    fn erasing_removes_units_from_current_phrase() {
        let phrases = ["hello", "world"];
        let next = advance(
            &phrases,
            &typewriter(1, 2),
            &Progress::new("hello", 0, Status::Erasing),
        );
        assert_eq!(next, Progress::new("hel", 0, Status::Erasing));
    }

    #[test]
    fn erase_completion_advances_index() {
        let phrases = ["a", "b"];
        let next = advance(
            &phrases,
            &typewriter(1, 5),
            &Progress::new("a", 0, Status::Erasing),
        );
        assert_eq!(next, Progress::new("", 1, Status::WaitingToType));
    }

    #[test]
    fn erase_completion_wraps_at_end() {
        let phrases = ["a", "b"];
        let next = advance(
            &phrases,
            &typewriter(1, 5),
            &Progress::new("b", 1, Status::Erasing),
        );
        assert_eq!(next, Progress::new("", 0, Status::WaitingToType));
    }

    #[test]
    fn erase_exact_length_completes() {
        let phrases = ["ab", "cd"];
        let next = advance(
            &phrases,
            &typewriter(1, 2),
            &Progress::new("ab", 0, Status::Erasing),
        );
        assert_eq!(next, Progress::new("", 1, Status::WaitingToType));
    }

    #[test]
    #[should_panic(expected = "remainder with a divisor of zero")]
    fn erase_completion_with_no_phrases_panics() {
        let phrases: [&str; 0] = [];
        let _ = advance(
            &phrases,
            &typewriter(1, 1),
            &Progress::new("a", 0, Status::Erasing),
        );
    }

    // ========================================================================
    // Full cycle
    // ========================================================================

    #[test]
    fn single_phrase_cycle_returns_to_start() {
        let phrases = ["hey"];
        let tw = typewriter(1, 1);
        let mut current = DEFAULT_PROGRESS;
        let mut seen = Vec::new();
        for _ in 0..32 {
            current = advance(&phrases, &tw, &current);
            seen.push(current.status);
            if current == DEFAULT_PROGRESS {
                break;
            }
        }
        assert_eq!(current, DEFAULT_PROGRESS);
        assert!(seen.contains(&Status::WaitingToErase));
        assert!(seen.contains(&Status::Erasing));
    }

    #[test]
    fn steps_pair_delay_with_preceding_status() {
        let phrases = ["ab"];
        let tw = typewriter(1, 2);
        let collected: Vec<Step> = steps(&phrases, tw, DEFAULT_PROGRESS).take(6).collect();

        let expected = [
            (100, Progress::new("", 0, Status::Typing)),
            (10, Progress::new("a", 0, Status::Typing)),
            (10, Progress::new("ab", 0, Status::WaitingToErase)),
            (200, Progress::new("ab", 0, Status::Erasing)),
            (20, Progress::new("", 0, Status::WaitingToType)),
            (100, Progress::new("", 0, Status::Typing)),
        ];
        for (step, (ms, progress)) in collected.iter().zip(expected) {
            assert_eq!(step.delay, Duration::from_millis(ms));
            assert_eq!(step.progress, progress);
        }
    }

    #[test]
    fn steps_visit_every_phrase_in_order() {
        let phrases = ["one", "two", "three"];
        let indices: Vec<usize> = steps(&phrases, typewriter(2, 2), DEFAULT_PROGRESS)
            .filter(|s| s.progress.status == Status::WaitingToErase)
            .map(|s| s.progress.phrase_idx)
            .take(4)
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 0]);
    }

    // ========================================================================
    // Properties
    // ========================================================================

    proptest! {
        #[test]
        fn typing_never_shrinks(
            phrase in "[a-zé ]{0,24}",
            revealed in 0usize..24,
            units in 0usize..8,
        ) {
            let phrases = [phrase.clone()];
            let shown: String = phrase.chars().take(revealed).collect();
            let current = Progress::new(shown, 0, Status::Typing);
            let next = advance(&phrases, &typewriter(units, 1), &current);

            prop_assert!(next.revealed_len() >= current.revealed_len());
            if units > 0 && current.revealed_len() < phrase.chars().count() {
                prop_assert!(next.revealed_len() > current.revealed_len());
            }
            prop_assert!(phrase.starts_with(&next.phrase));
        }

        #[test]
        fn erasing_stays_a_prefix(
            phrase in "[a-z]{1,24}",
            units in 1usize..8,
        ) {
            let phrases = [phrase.clone(), "next".to_string()];
            let mut current = Progress::new(phrase.clone(), 0, Status::Erasing);
            while current.status == Status::Erasing {
                let next = advance(&phrases, &typewriter(1, units), &current);
                prop_assert!(next.revealed_len() < current.revealed_len());
                if next.status == Status::Erasing {
                    prop_assert!(phrase.starts_with(&next.phrase));
                }
                current = next;
            }
            prop_assert_eq!(current, Progress::new("", 1, Status::WaitingToType));
        }
    }
}
