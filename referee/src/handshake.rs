use std::io::{Read, Write};

use rand::rngs::StdRng;
use rand::Rng;
use tictactoe::{Mark, Message};
use tracing::{info, warn};

use crate::error::PlayerError;
use crate::player::{say_bye, Listener, Player};

/// Accepts the next two connections and performs the handshake with both.
///
/// Returns `Ok(None)` if a player did not open with the handshake message.
/// Both players have been sent `bye` in that case. An error is only
/// returned when accepting a connection failed.
pub fn pair_players<L: Listener>(
    listener: &mut L,
    rng: &mut StdRng,
) -> std::io::Result<Option<[Player<L::Stream>; 2]>> {
    // Either connection is equally likely to play x
    let [mark_1, mark_2] = if rng.gen::<bool>() {
        [Mark::X, Mark::O]
    } else {
        [Mark::O, Mark::X]
    };

    let (stream, peer) = listener.accept()?;
    info!(peer, "Received connection 1");
    let player_1 = Player::new(stream, peer, mark_1);
    let (stream, peer) = listener.accept()?;
    info!(peer, "Received connection 2");
    let player_2 = Player::new(stream, peer, mark_2);

    let mut players = [player_1, player_2];
    for player_idx in 0..players.len() {
        if let Err(err) = greet(&mut players[player_idx]) {
            warn!(peer = &players[player_idx].peer, %err, "Handshake failed");
            say_bye(&mut players);
            return Ok(None);
        }
    }
    Ok(Some(players))
}

/// Waits for the handshake message, then tells the player its mark.
fn greet<S: Read + Write>(player: &mut Player<S>) -> Result<(), PlayerError> {
    match player.receive()? {
        Message::Hello => player.send(&Message::Mark(player.mark)),
        received => Err(PlayerError::Unexpected {
            expected: "the handshake",
            received,
        }),
    }
}
