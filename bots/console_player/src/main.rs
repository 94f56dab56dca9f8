use std::io::{stdin, stdout, Write};

use anyhow::Context;
use clap::Parser;
use tictactoe::{visualize_board, Board, Mark, Move, Outcome};
use tictactoe_bot_utils::Bot;

#[derive(Parser)]
struct Args {
    /// Host of the referee
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port of the referee
    #[arg(short, long, env = "PORT")]
    port: u16,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    ConsolePlayer.run((args.host.as_str(), args.port))?;
    println!("the game ended.");
    Ok(())
}

struct ConsolePlayer;

/// Reads one line from stdin after printing the prompt. Fails on EOF.
fn prompt(question: &str) -> anyhow::Result<String> {
    print!("{}", question);
    stdout().flush()?;
    let mut answer = String::new();
    let num_bytes_read = stdin().read_line(&mut answer)?;
    anyhow::ensure!(num_bytes_read > 0, "stdin was closed");
    Ok(answer)
}

/// Parses coordinates given as two numbers separated by whitespace, e.g. `2 0`.
fn parse_coordinates(input: &str) -> Option<Move> {
    let mut numbers = input.split_whitespace().map(str::parse::<u8>);
    match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Move::new(x, y),
        _ => None,
    }
}

impl Bot for ConsolePlayer {
    fn new_game(&mut self, mark: Mark) {
        println!("you are: {}", mark);
    }

    fn play_move(&mut self, board: &Board) -> anyhow::Result<Move> {
        loop {
            let input = prompt("enter move as coords 'x y': ")?;
            match parse_coordinates(&input) {
                Some(mv) if board.get(mv).is_none() => return Ok(mv),
                Some(mv) => println!("{} is already taken", mv),
                None => println!("x and y must be between 0 and 2"),
            }
        }
    }

    fn move_placed(&mut self, _mark: Mark, _mv: Move, board: &Board) {
        println!("{}\n", visualize_board(board));
    }

    fn game_over(&mut self, outcome: Outcome, _board: &Board) -> anyhow::Result<bool> {
        match outcome {
            Outcome::Win => println!("you won!"),
            Outcome::Lose => println!("you lost!"),
            Outcome::Tie => println!("the game ended in a tie."),
        }
        let answer = prompt("would you like a rematch (y/n): ")
            .context("Could not read the rematch decision")?;
        Ok(answer.trim().to_lowercase().starts_with('y'))
    }
}
