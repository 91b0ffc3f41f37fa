//! Tests for hint aggregation and hard-mode validation over whole histories.

use strum::IntoEnumIterator;
use wordeau_core::{
    Guess, LetterHints, LetterState, PositionHints, derive_hints, unused_hint_letters,
};

use LetterState::{Absent, Correct, Present};

fn guess(word: &str, states: [LetterState; 5]) -> Guess {
    Guess::from_word(word, states).expect("Valid guess")
}

/// A plausible game against the secret word "slate".
fn slate_history() -> Vec<Guess> {
    vec![
        guess("crane", [Absent, Absent, Correct, Absent, Correct]),
        guess("plate", [Absent, Correct, Correct, Correct, Correct]),
        guess("elate", [Absent, Correct, Correct, Correct, Correct]),
        guess("slate", [Correct; 5]),
    ]
}

#[test]
fn test_crane_scenario() {
    let history = vec![guess("crane", [Absent, Absent, Present, Absent, Correct])];
    let hints = derive_hints(&history);

    let expected_letters = LetterHints::from([
        ('c', Absent),
        ('r', Absent),
        ('a', Present),
        ('n', Absent),
        ('e', Correct),
    ]);
    assert_eq!(hints.letters, expected_letters);
    assert_eq!(hints.positions, PositionHints::from([(4, 'e')]));

    // Position 4 is satisfied but the present 'a' is not used.
    assert_eq!(
        unused_hint_letters("eerie", &hints.letters, &hints.positions),
        vec!['a']
    );
}

#[test]
fn test_derive_hints_is_idempotent() {
    let history = slate_history();
    assert_eq!(derive_hints(&history), derive_hints(&history));
}

#[test]
fn test_correct_letter_never_downgraded() {
    // 'e' is correct in the first guess; every later state for 'e' must not
    // lower its hint.
    for later in LetterState::iter() {
        let history = vec![
            guess("crane", [Absent, Absent, Absent, Absent, Correct]),
            guess("ember", [later, Absent, Absent, Absent, Absent]),
        ];
        assert_eq!(derive_hints(&history).letter('e'), Some(Correct));
    }
}

#[test]
fn test_present_letter_never_downgraded() {
    let history = vec![
        guess("crane", [Absent, Absent, Present, Absent, Absent]),
        guess("baths", [Absent, Absent, Absent, Absent, Absent]),
    ];
    assert_eq!(derive_hints(&history).letter('a'), Some(Present));
}

#[test]
fn test_positions_are_permanent() {
    let history = slate_history();
    for len in 1..=history.len() {
        let prefix = derive_hints(&history[..len]);
        let full = derive_hints(&history);
        for (position, letter) in &prefix.positions {
            assert_eq!(full.position(*position), Some(*letter));
        }
    }
}

#[test]
fn test_empty_result_means_rules_hold() {
    let history = slate_history();
    let hints = derive_hints(&history[..2]);

    for candidate in ["slate", "elate", "plate", "blate"] {
        let missing = unused_hint_letters(candidate, &hints.letters, &hints.positions);
        if missing.is_empty() {
            for (letter, state) in &hints.letters {
                if *state == Present {
                    assert!(candidate.contains(*letter));
                }
            }
            for (position, letter) in &hints.positions {
                assert_eq!(candidate.chars().nth(*position), Some(*letter));
            }
        }
    }
}

#[test]
fn test_hard_mode_rejects_dropped_position() {
    let history = slate_history();
    let hints = derive_hints(&history[..2]);
    // 'l' is known at position 1.
    assert_eq!(
        unused_hint_letters("abate", &hints.letters, &hints.positions),
        vec!['l']
    );
}
