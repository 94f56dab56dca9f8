use std::io::{Read, Write};

use rand::rngs::StdRng;
use tictactoe::Mark;
use tracing::{debug, info, warn};

use crate::error::PlayerFault;
use crate::game::{GameSession, RoundResult};
use crate::handshake::pair_players;
use crate::player::Listener;
use crate::rematch::agree_on_rematch;
use crate::Config;

/// How a match between two paired players came to an end.
#[derive(Debug)]
pub enum MatchEnd {
    /// A player did not want to play another round.
    RematchDeclined,
    /// A player misbehaved or disconnected during a round.
    Aborted(PlayerFault),
}

#[derive(Debug)]
pub struct MatchSummary {
    /// Includes an aborted last round.
    pub rounds: usize,
    pub wins_x: usize,
    pub wins_o: usize,
    pub ties: usize,
    pub end: MatchEnd,
}

/// Plays rounds with the same two players for as long as both want to.
///
/// The players are dropped, closing their connections, when this returns.
pub fn play_match<S: Read + Write>(
    mut session: GameSession<S>,
    rng: &mut StdRng,
) -> MatchSummary {
    let (mut rounds, mut wins_x, mut wins_o, mut ties) = (0, 0, 0, 0);
    let end = loop {
        session.reset(rng);
        rounds += 1;
        match session.play_round() {
            RoundResult::WonByPlayer { player_idx } => {
                let winner = session.players[player_idx].mark;
                debug!(round = rounds, %winner, "Round won");
                match winner {
                    Mark::X => wins_x += 1,
                    Mark::O => wins_o += 1,
                }
            }
            RoundResult::Tie => {
                debug!(round = rounds, "Tie");
                ties += 1;
            }
            RoundResult::Aborted(fault) => break MatchEnd::Aborted(fault),
        }
        if !agree_on_rematch(&mut session.players) {
            break MatchEnd::RematchDeclined;
        }
    };
    MatchSummary {
        rounds,
        wins_x,
        wins_o,
        ties,
        end,
    }
}

/// Pairs the next two players and plays a full match with them.
///
/// Returns `Ok(None)` if the handshake failed.
pub fn serve_match<L: Listener>(
    listener: &mut L,
    config: &mut Config,
) -> std::io::Result<Option<MatchSummary>> {
    let Some(players) = pair_players(listener, &mut config.rng)? else {
        return Ok(None);
    };
    for player in &players {
        info!(peer = &player.peer, mark = %player.mark, "Player joined");
    }

    let summary = play_match(GameSession::new(players), &mut config.rng);
    info!(
        rounds = summary.rounds,
        wins_x = summary.wins_x,
        wins_o = summary.wins_o,
        ties = summary.ties,
        aborted = matches!(summary.end, MatchEnd::Aborted(_)),
        "Match over"
    );
    Ok(Some(summary))
}

/// Serves one match after the other, forever.
pub fn serve<L: Listener>(listener: &mut L, config: &mut Config) -> ! {
    loop {
        if let Err(err) = serve_match(listener, config) {
            warn!(%err, "Could not accept a connection");
        }
    }
}
