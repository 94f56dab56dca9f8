use std::io::{Read, Write};

use tictactoe::Message;
use tracing::debug;

use crate::player::{say_bye, Player};

/// Asks both players, in order, whether they want to play again.
///
/// Only if both answer `continue` is the result `true`. Otherwise `bye` has
/// been sent to both players. Reading stops at the first player who declines.
pub fn agree_on_rematch<S: Read + Write>(players: &mut [Player<S>; 2]) -> bool {
    let agreed = players.iter_mut().all(wants_rematch);
    if !agreed {
        say_bye(players);
    }
    agreed
}

fn wants_rematch<S: Read + Write>(player: &mut Player<S>) -> bool {
    match player.receive() {
        Ok(Message::Rematch(true)) => true,
        Ok(received) => {
            debug!(peer = &player.peer, %received, "Player declined a rematch");
            false
        }
        Err(err) => {
            debug!(peer = &player.peer, %err, "No answer to the rematch question");
            false
        }
    }
}
