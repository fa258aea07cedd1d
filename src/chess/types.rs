use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::timecontrol::TimeControlType;

/// Header tags of one game as read from PGN - matches the Lichess export tag set.
/// Empty tag values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGameHeader {
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub round: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>,
    pub utc_date: Option<String>,
    pub utc_time: Option<String>,
    pub white_elo: Option<String>,
    pub black_elo: Option<String>,
    pub white_rating_diff: Option<String>,
    pub black_rating_diff: Option<String>,
    pub variant: Option<String>,
    pub time_control: Option<String>,
    pub eco: Option<String>,
    pub opening: Option<String>,
    pub white_title: Option<String>,
    pub black_title: Option<String>,
    pub termination: Option<String>,

    // Only used to name the game in error messages.
    pub game_id: Option<String>,
}

/// Typed game record, still in White/Black terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardizedGameHeader {
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub round: Option<String>,

    pub white: Option<String>,
    pub black: Option<String>,

    /// 1.0 White won, 0.5 draw, 0.0 White lost.
    pub result: Option<f64>,
    pub utc_date_time: Option<DateTime<Utc>>,
    pub white_elo: Option<u32>,
    pub black_elo: Option<u32>,
    pub white_rating_change: Option<f64>,
    pub black_rating_change: Option<f64>,

    pub variant: Option<String>,
    pub time_control: Option<String>,
    pub time_control_sec: Option<String>,
    pub time_control_type: Option<TimeControlType>,

    pub eco: Option<String>,
    pub opening_family: Option<String>,
    pub opening_variation: Option<String>,
    pub opening_sub_variation: Option<String>,

    pub white_title: Option<String>,
    pub black_title: Option<String>,
    pub termination: Option<String>,

    pub game_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game record relative to one player. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonifiedGameHeader {
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub round: Option<String>,

    pub player: String,
    pub opponent: Option<String>,
    pub color: Color,

    pub result: Option<f64>,
    pub result_win: u8,
    pub result_draw: u8,
    pub result_lose: u8,

    #[serde(rename = "UTCDateTime", serialize_with = "serialize_utc")]
    pub utc_date_time: Option<DateTime<Utc>>,
    pub player_elo: Option<u32>,
    pub opponent_elo: Option<u32>,
    pub player_rating_change: Option<f64>,
    pub opponent_rating_change: Option<f64>,

    pub variant: Option<String>,
    pub time_control: Option<String>,
    pub time_control_sec: Option<String>,
    pub time_control_type: Option<TimeControlType>,

    #[serde(rename = "ECO")]
    pub eco: Option<String>,
    pub opening_family: Option<String>,
    pub opening_variation: Option<String>,
    pub opening_sub_variation: Option<String>,

    pub player_title: Option<String>,
    pub opponent_title: Option<String>,
    pub termination: Option<String>,
}

impl PersonifiedGameHeader {
    /// Output column names, in declaration order.
    pub const COLUMNS: [&'static str; 27] = [
        "Event",
        "Site",
        "Date",
        "Round",
        "Player",
        "Opponent",
        "Color",
        "Result",
        "ResultWin",
        "ResultDraw",
        "ResultLose",
        "UTCDateTime",
        "PlayerElo",
        "OpponentElo",
        "PlayerRatingChange",
        "OpponentRatingChange",
        "Variant",
        "TimeControl",
        "TimeControlSec",
        "TimeControlType",
        "ECO",
        "OpeningFamily",
        "OpeningVariation",
        "OpeningSubVariation",
        "PlayerTitle",
        "OpponentTitle",
        "Termination",
    ];
}

const UTC_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

fn serialize_utc<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(ts) => serializer.serialize_str(&ts.format(UTC_OUTPUT_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}
