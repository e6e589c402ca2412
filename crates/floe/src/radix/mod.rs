//! Conversion between non-negative integers and their text representation
//! under a caller-supplied digit alphabet.

mod alphabet;
mod codec;
mod error;

pub use alphabet::*;
pub use codec::*;
pub use error::*;
