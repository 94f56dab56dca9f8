pub use board::*;
pub use errors::*;
pub use protocol::*;
pub use visualization::*;
pub use win::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod protocol;
mod visualization;
mod win;
