use super::types::RawGameHeader;

use pgn_reader::{RawTag, Skip, Visitor};
use std::ops::ControlFlow;

/// Header-only PGN visitor (pgn-reader).
///
/// Collects the known tags of each game into a [`RawGameHeader`] and ignores
/// the movetext. The first occurrence of a repeated tag wins; empty values
/// are left unset.
#[derive(Debug, Default)]
pub struct HeaderVisitor;

impl HeaderVisitor {
    pub fn new() -> Self {
        Self
    }
}

fn set_known_tag(header: &mut RawGameHeader, key: &[u8], value: RawTag<'_>) {
    let slot: &mut Option<String> = match key {
        b"Event" => &mut header.event,
        b"Site" => &mut header.site,
        b"Date" => &mut header.date,
        b"Round" => &mut header.round,
        b"White" => &mut header.white,
        b"Black" => &mut header.black,
        b"Result" => &mut header.result,
        b"UTCDate" => &mut header.utc_date,
        b"UTCTime" => &mut header.utc_time,
        b"WhiteElo" => &mut header.white_elo,
        b"BlackElo" => &mut header.black_elo,
        b"WhiteRatingDiff" => &mut header.white_rating_diff,
        b"BlackRatingDiff" => &mut header.black_rating_diff,
        b"Variant" => &mut header.variant,
        b"TimeControl" => &mut header.time_control,
        b"ECO" => &mut header.eco,
        b"Opening" => &mut header.opening,
        b"WhiteTitle" => &mut header.white_title,
        b"BlackTitle" => &mut header.black_title,
        b"Termination" => &mut header.termination,
        b"GameId" => &mut header.game_id,
        _ => return,
    };

    if slot.is_some() {
        return;
    }

    let bytes = value.as_bytes();
    if bytes.is_empty() {
        return;
    }

    *slot = Some(String::from_utf8_lossy(bytes).into_owned());
}

impl Visitor for HeaderVisitor {
    type Tags = RawGameHeader;
    type Movetext = RawGameHeader;
    type Output = RawGameHeader;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(RawGameHeader::default())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        set_known_tag(tags, key, value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(tags)
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        movetext
    }
}
