//! Property tests for the guess state machine
//!
//! These tests verify that for every difficulty:
//! - Drawn secrets always fall inside the difficulty range
//! - Any in-range guess on a running game consumes exactly one attempt
//! - Out-of-range guesses never change the game

use mystere::DifficultyKey;
use mystere::models::{GamePhase, GameState, GuessOutcome};
use proptest::prelude::*;
use std::collections::HashSet;

fn any_difficulty() -> impl Strategy<Value = DifficultyKey> {
    prop::sample::select(DifficultyKey::ALL.to_vec())
}

proptest! {
    #[test]
    fn secret_is_always_in_range(key in any_difficulty(), seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let game = GameState::draw(key, &mut rng);
        prop_assert!(key.profile().contains(game.secret()));
    }

    #[test]
    fn in_range_guess_uses_one_attempt(key in any_difficulty(), secret_offset in 0i32..=100, guess_offset in 0i32..=100) {
        let profile = key.profile();
        let secret = profile.min + secret_offset % profile.span() as i32;
        let guess = profile.min + guess_offset % profile.span() as i32;
        let mut game = GameState::new(key, secret).unwrap();

        let result = game.evaluate(guess).unwrap();
        prop_assert_eq!(result.attempts_used, 1);
        prop_assert_eq!(game.attempts(), 1);

        let expected = match guess.cmp(&secret) {
            std::cmp::Ordering::Less => GuessOutcome::TooLow,
            std::cmp::Ordering::Greater => GuessOutcome::TooHigh,
            std::cmp::Ordering::Equal => GuessOutcome::Correct,
        };
        prop_assert_eq!(result.outcome, expected);
    }

    #[test]
    fn out_of_range_guess_changes_nothing(key in any_difficulty(), above in 1i32..1000) {
        let profile = key.profile();
        let mut game = GameState::new(key, profile.min).unwrap();

        prop_assert!(game.evaluate(profile.max + above).is_err());
        prop_assert!(game.evaluate(profile.min - above).is_err());
        prop_assert_eq!(game.attempts(), 0);
        prop_assert_eq!(game.phase(), GamePhase::Ready);
    }
}

#[test]
fn test_draws_cover_both_endpoints() {
    let mut rng = fastrand::Rng::with_seed(67);
    let profile = DifficultyKey::Facile.profile();

    let seen: HashSet<i32> = (0..10_000)
        .map(|_| GameState::draw(DifficultyKey::Facile, &mut rng).secret())
        .collect();

    assert!(seen.contains(&profile.min));
    assert!(seen.contains(&profile.max));
    assert_eq!(seen.len() as u32, profile.span());
}

#[test]
fn test_game_never_exceeds_max_attempts() {
    for key in DifficultyKey::ALL {
        let profile = key.profile();
        let mut game = GameState::new(key, profile.max).unwrap();

        while !game.is_game_over() {
            game.evaluate(profile.min).unwrap();
        }

        assert_eq!(game.phase(), GamePhase::Lost);
        assert_eq!(game.attempts(), profile.max_attempts);
    }
}
