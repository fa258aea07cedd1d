use chrono::{DateTime, NaiveDateTime, Utc};

use super::error::{GameError, GameRef};
use super::opening::split_opening;
use super::timecontrol::{SpeedThresholds, TimeControl, TimeControlType};
use super::types::{RawGameHeader, StandardizedGameHeader};

const UTC_INPUT_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Score from White's side; anything but a finished-game code is unknown.
pub fn map_result(raw: Option<&str>) -> Option<f64> {
    match raw?.trim() {
        "1-0" => Some(1.0),
        "0-1" => Some(0.0),
        "1/2-1/2" => Some(0.5),
        _ => None,
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Joins `YYYY.MM.DD` and `HH:MM:SS` into one UTC timestamp.
///
/// `Ok(None)` when either part is missing; `Err` when both are there but do
/// not parse.
pub fn join_utc_datetime(
    date: Option<&str>,
    time: Option<&str>,
    game: &GameRef,
) -> Result<Option<DateTime<Utc>>, GameError> {
    let (Some(date), Some(time)) = (present(date), present(time)) else {
        return Ok(None);
    };

    NaiveDateTime::parse_from_str(&format!("{date} {time}"), UTC_INPUT_FORMAT)
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| GameError::MalformedDateTime {
            game: game.clone(),
            date: date.to_string(),
            time: time.to_string(),
            reason: e.to_string(),
        })
}

/// Lenient unsigned integer: blank or non-numeric gives `None`.
pub fn parse_optional_uint(raw: Option<&str>) -> Option<u32> {
    present(raw)?.parse().ok()
}

/// Lenient signed number keeping fractions ("+8", "-12", "3.5").
pub fn parse_optional_number(raw: Option<&str>) -> Option<f64> {
    present(raw)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeControlFields {
    pub display: String,
    pub seconds: String,
    pub category: TimeControlType,
}

/// Display notation, seconds notation and category of a `TimeControl` tag.
/// The seconds notation is the tag itself, trimmed. Absent tag gives
/// `Ok(None)`; a present tag that does not parse is an error.
pub fn parse_time_control(
    raw: Option<&str>,
    thresholds: &SpeedThresholds,
    game: &GameRef,
) -> Result<Option<TimeControlFields>, GameError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let time_control =
        TimeControl::parse(raw).map_err(|e| GameError::MalformedTimeControl {
            game: game.clone(),
            reason: e.to_string(),
        })?;

    Ok(Some(TimeControlFields {
        display: time_control.display_notation(),
        seconds: raw.trim().to_string(),
        category: thresholds.classify(&time_control),
    }))
}

pub fn standardize(
    raw: &RawGameHeader,
    thresholds: &SpeedThresholds,
) -> Result<StandardizedGameHeader, GameError> {
    let game = GameRef::new(raw.game_id.as_deref(), raw.site.as_deref());

    let utc_date_time =
        join_utc_datetime(raw.utc_date.as_deref(), raw.utc_time.as_deref(), &game)?;
    let time_control = parse_time_control(raw.time_control.as_deref(), thresholds, &game)?;
    let opening = split_opening(raw.opening.as_deref());

    let (time_control, time_control_sec, time_control_type) = match time_control {
        Some(fields) => (
            Some(fields.display),
            Some(fields.seconds),
            Some(fields.category),
        ),
        None => (None, None, None),
    };

    Ok(StandardizedGameHeader {
        event: raw.event.clone(),
        site: raw.site.clone(),
        date: raw.date.clone(),
        round: raw.round.clone(),
        white: raw.white.clone(),
        black: raw.black.clone(),
        result: map_result(raw.result.as_deref()),
        utc_date_time,
        white_elo: parse_optional_uint(raw.white_elo.as_deref()),
        black_elo: parse_optional_uint(raw.black_elo.as_deref()),
        white_rating_change: parse_optional_number(raw.white_rating_diff.as_deref()),
        black_rating_change: parse_optional_number(raw.black_rating_diff.as_deref()),
        variant: raw.variant.clone(),
        time_control,
        time_control_sec,
        time_control_type,
        eco: raw.eco.clone(),
        opening_family: opening.family,
        opening_variation: opening.variation,
        opening_sub_variation: opening.sub_variation,
        white_title: raw.white_title.clone(),
        black_title: raw.black_title.clone(),
        termination: raw.termination.clone(),
        game_id: raw.game_id.clone(),
    })
}
