mod error;
mod game;
mod handshake;
mod player;
mod rematch;
mod session;
#[cfg(test)]
mod testing;
pub use error::*;
pub use game::*;
pub use handshake::*;
pub use player::*;
pub use rematch::*;
pub use session::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Config {
    pub rng: StdRng,
}

impl Config {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}
