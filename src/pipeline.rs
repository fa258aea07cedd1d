//! Standardize then personify a batch of games, preserving input order.

use tracing::{info, warn};

use crate::chess::{
    GameError, PersonifiedGameHeader, RawGameHeader, SpeedThresholds, personify, standardize,
};

/// What to do with a game whose transform fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first failing game.
    #[default]
    Abort,
    /// Log the failure and leave the game out.
    Skip,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub games: Vec<PersonifiedGameHeader>,
    pub skipped: Vec<GameError>,
}

pub fn transform_game(
    raw: &RawGameHeader,
    player: &str,
    thresholds: &SpeedThresholds,
) -> Result<PersonifiedGameHeader, GameError> {
    let standardized = standardize(raw, thresholds)?;
    personify(&standardized, player)
}

pub fn transform_games(
    raw_games: &[RawGameHeader],
    player: &str,
    thresholds: &SpeedThresholds,
    policy: ErrorPolicy,
) -> Result<BatchOutcome, GameError> {
    let mut outcome = BatchOutcome {
        games: Vec::with_capacity(raw_games.len()),
        skipped: Vec::new(),
    };

    for (position, raw) in raw_games.iter().enumerate() {
        match transform_game(raw, player, thresholds) {
            Ok(game) => outcome.games.push(game),
            Err(err) => {
                let err = err.with_index(position + 1);
                match policy {
                    ErrorPolicy::Abort => return Err(err),
                    ErrorPolicy::Skip => {
                        warn!(field = err.field(), "skipping {err}");
                        outcome.skipped.push(err);
                    }
                }
            }
        }
    }

    info!(
        player,
        transformed = outcome.games.len(),
        skipped = outcome.skipped.len(),
        "transformed games"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Color, GameRef, TimeControlType};

    fn raw(site: &str, white: &str, black: &str, result: &str, time_control: &str) -> RawGameHeader {
        RawGameHeader {
            site: Some(site.to_string()),
            white: Some(white.to_string()),
            black: Some(black.to_string()),
            result: Some(result.to_string()),
            time_control: Some(time_control.to_string()),
            ..RawGameHeader::default()
        }
    }

    fn batch() -> Vec<RawGameHeader> {
        vec![
            raw("g1", "alice", "bob", "1-0", "180+0"),
            raw("g2", "carol", "alice", "1-0", "abc"),
            raw("g3", "dave", "erin", "1/2-1/2", "60+0"),
            raw("g4", "bob", "alice", "1-0", "15+0"),
        ]
    }

    #[test]
    fn test_transform_game_end_to_end() {
        let game = transform_game(
            &raw("g4", "bob", "alice", "1-0", "15+0"),
            "alice",
            &SpeedThresholds::default(),
        )
        .unwrap();

        assert_eq!(game.color, Color::Black);
        assert_eq!(game.result, Some(0.0));
        assert_eq!(game.result_lose, 1);
        assert_eq!(game.time_control.as_deref(), Some("¼+0"));
        assert_eq!(game.time_control_type, Some(TimeControlType::UltraBullet));
    }

    #[test]
    fn test_skip_policy_keeps_order_and_reports_failures() {
        let outcome = transform_games(
            &batch(),
            "alice",
            &SpeedThresholds::default(),
            ErrorPolicy::Skip,
        )
        .unwrap();

        let sites: Vec<_> = outcome.games.iter().map(|g| g.site.as_deref()).collect();
        assert_eq!(sites, vec![Some("g1"), Some("g4")]);

        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.skipped[0].field(), "TimeControl");
        assert_eq!(outcome.skipped[0].game(), &GameRef::Site("g2".to_string()));
        assert_eq!(outcome.skipped[1].field(), "White/Black");
    }

    #[test]
    fn test_abort_policy_stops_at_first_failure() {
        let err = transform_games(
            &batch(),
            "alice",
            &SpeedThresholds::default(),
            ErrorPolicy::Abort,
        )
        .unwrap_err();

        assert!(matches!(err, GameError::MalformedTimeControl { .. }));
    }

    #[test]
    fn test_unidentified_game_is_named_by_position() {
        let games = vec![RawGameHeader {
            white: Some("x".to_string()),
            black: Some("y".to_string()),
            ..RawGameHeader::default()
        }];
        let err = transform_games(&games, "alice", &SpeedThresholds::default(), ErrorPolicy::Abort)
            .unwrap_err();

        assert_eq!(err.game(), &GameRef::Index(1));
        assert!(err.to_string().starts_with("game #1: "));
    }

    #[test]
    fn test_empty_batch() {
        let outcome =
            transform_games(&[], "alice", &SpeedThresholds::default(), ErrorPolicy::Abort)
                .unwrap();
        assert!(outcome.games.is_empty());
        assert!(outcome.skipped.is_empty());
    }
}
