use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};
use tictactoe::{Board, Mark, Move, Outcome};
use tictactoe_bot_utils::Bot;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Host of the referee
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port of the referee
    #[arg(short, long, env = "PORT")]
    port: u16,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// How many rematches to request before stopping
    #[arg(short, long, default_value_t = 0)]
    rematches: usize,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .with(Targets::new().with_default(args.log_level))
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot {
        rng,
        rematches_left: args.rematches,
    }
    .run((args.host.as_str(), args.port))
}

struct RandomBot {
    rng: StdRng,
    rematches_left: usize,
}

impl Bot for RandomBot {
    fn new_game(&mut self, mark: Mark) {
        info!(%mark, "New game");
    }

    fn play_move(&mut self, board: &Board) -> anyhow::Result<Move> {
        board
            .empty_cells()
            .choose(&mut self.rng)
            .context("The referee asked for a move on a full board")
    }

    fn game_over(&mut self, outcome: Outcome, _board: &Board) -> anyhow::Result<bool> {
        info!(?outcome, "Game over");
        let again = self.rematches_left > 0;
        self.rematches_left = self.rematches_left.saturating_sub(1);
        Ok(again)
    }
}
