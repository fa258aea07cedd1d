//! Export a player's Lichess games as a table, one row per game, seen from
//! that player's side.
//!
//! The pipeline is [`chess::read_headers`] (or [`lichess::LichessClient`]) →
//! [`chess::standardize`] → [`chess::personify`] → [`export::write_games`].

pub mod chess;
pub mod export;
pub mod lichess;
pub mod logging;
pub mod pipeline;
