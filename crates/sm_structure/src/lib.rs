mod error;
mod pairing;
mod score;

pub use error::*;
pub use pairing::*;
pub use score::*;

