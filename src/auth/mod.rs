mod hasher;
mod token;

pub use hasher::BoardHasher;
pub use token::{Claims, TokenSigner};
