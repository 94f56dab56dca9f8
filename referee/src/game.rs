use std::io::{Read, Write};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tictactoe::{is_winning_move, Board, Message, Move, Outcome};
use tracing::{debug, warn};

use crate::error::{PlayerError, PlayerFault};
use crate::player::{broadcast, say_bye, Player};

#[derive(Debug)]
pub enum RoundResult {
    WonByPlayer { player_idx: usize },
    Tie,
    /// `bye` has already been sent to both players.
    Aborted(PlayerFault),
}

/// Two paired players and the board they are playing on.
pub struct GameSession<S> {
    /// The player at index 0 makes the first move of a round.
    pub players: [Player<S>; 2],
    board: Board,
}

impl<S: Read + Write> GameSession<S> {
    pub fn new(players: [Player<S>; 2]) -> Self {
        Self {
            players,
            board: Board::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Prepares the next round: a fresh board and a random starting player.
    pub fn reset(&mut self, rng: &mut StdRng) {
        self.players.shuffle(rng);
        self.board = Board::new();
    }

    /// Plays one round on the current board until it is won, tied or aborted.
    ///
    /// Any misbehavior (a malformed or illegal move, a disconnect) aborts
    /// the round immediately.
    pub fn play_round(&mut self) -> RoundResult {
        match self.play_turns() {
            Ok(result) => result,
            Err(fault) => {
                let player = &self.players[fault.player_idx];
                warn!(
                    peer = &player.peer,
                    mark = %player.mark,
                    err = %fault.err,
                    "Aborting round"
                );
                say_bye(&mut self.players);
                RoundResult::Aborted(fault)
            }
        }
    }

    fn play_turns(&mut self) -> Result<RoundResult, PlayerFault> {
        let mut current_player_idx = 0;
        loop {
            let other_player_idx = 1 - current_player_idx;
            let at_fault = |err| PlayerFault {
                player_idx: current_player_idx,
                err,
            };

            let player = &mut self.players[current_player_idx];
            let mark = player.mark;
            let mv = request_move(player).map_err(at_fault)?;
            self.board
                .place(mark, mv)
                .map_err(|err| at_fault(PlayerError::IllegalMove(err)))?;
            debug!(%mark, %mv, move_count = self.board.move_count(), "Move");
            broadcast(&mut self.players, &Message::Placed { mark, mv })?;

            if is_winning_move(&self.board, mv) {
                self.players[current_player_idx]
                    .send(&Message::Outcome(Outcome::Win))
                    .map_err(at_fault)?;
                self.players[other_player_idx]
                    .send(&Message::Outcome(Outcome::Lose))
                    .map_err(|err| PlayerFault {
                        player_idx: other_player_idx,
                        err,
                    })?;
                return Ok(RoundResult::WonByPlayer {
                    player_idx: current_player_idx,
                });
            } else if self.board.is_full() {
                broadcast(&mut self.players, &Message::Outcome(Outcome::Tie))?;
                return Ok(RoundResult::Tie);
            }
            current_player_idx = other_player_idx;
        }
    }
}

fn request_move<S: Read + Write>(player: &mut Player<S>) -> Result<Move, PlayerError> {
    player.send(&Message::MovePrompt)?;
    match player.receive()? {
        Message::Move(mv) => Ok(mv),
        received => Err(PlayerError::Unexpected {
            expected: "a move",
            received,
        }),
    }
}
