use super::error::{GameError, GameRef};
use super::types::{Color, PersonifiedGameHeader, StandardizedGameHeader};

/// Score from the given side's point of view.
pub fn score_for(color: Color, white_score: Option<f64>) -> Option<f64> {
    match color {
        Color::White => white_score,
        Color::Black => white_score.map(|score| 1.0 - score),
    }
}

struct Side<'a> {
    name: &'a Option<String>,
    elo: Option<u32>,
    rating_change: Option<f64>,
    title: &'a Option<String>,
}

fn side(header: &StandardizedGameHeader, color: Color) -> Side<'_> {
    match color {
        Color::White => Side {
            name: &header.white,
            elo: header.white_elo,
            rating_change: header.white_rating_change,
            title: &header.white_title,
        },
        Color::Black => Side {
            name: &header.black,
            elo: header.black_elo,
            rating_change: header.black_rating_change,
            title: &header.black_title,
        },
    }
}

/// `(win, draw, lose)` 0/1 flags; all zero when the score is unknown.
pub fn result_flags(score: Option<f64>) -> (u8, u8, u8) {
    let is = |target: f64| u8::from(score == Some(target));
    (is(1.0), is(0.5), is(0.0))
}

/// Re-expresses a game relative to `player` (exact, case-sensitive name match).
pub fn personify(
    header: &StandardizedGameHeader,
    player: &str,
) -> Result<PersonifiedGameHeader, GameError> {
    let color = if header.white.as_deref() == Some(player) {
        Color::White
    } else if header.black.as_deref() == Some(player) {
        Color::Black
    } else {
        return Err(GameError::PlayerNotFound {
            game: GameRef::new(header.game_id.as_deref(), header.site.as_deref()),
            player: player.to_string(),
            white: header.white.clone().unwrap_or_default(),
            black: header.black.clone().unwrap_or_default(),
        });
    };

    let own = side(header, color);
    let other = side(header, color.opposite());

    let result = score_for(color, header.result);
    let (result_win, result_draw, result_lose) = result_flags(result);

    Ok(PersonifiedGameHeader {
        event: header.event.clone(),
        site: header.site.clone(),
        date: header.date.clone(),
        round: header.round.clone(),
        player: player.to_string(),
        opponent: other.name.clone(),
        color,
        result,
        result_win,
        result_draw,
        result_lose,
        utc_date_time: header.utc_date_time,
        player_elo: own.elo,
        opponent_elo: other.elo,
        player_rating_change: own.rating_change,
        opponent_rating_change: other.rating_change,
        variant: header.variant.clone(),
        time_control: header.time_control.clone(),
        time_control_sec: header.time_control_sec.clone(),
        time_control_type: header.time_control_type,
        eco: header.eco.clone(),
        opening_family: header.opening_family.clone(),
        opening_variation: header.opening_variation.clone(),
        opening_sub_variation: header.opening_sub_variation.clone(),
        player_title: own.title.clone(),
        opponent_title: other.title.clone(),
        termination: header.termination.clone(),
    })
}
