mod adapting;
mod flake;
mod id;
mod interface;
mod tag;
mod worker;

pub use adapting::*;
pub use flake::*;
pub use id::*;
pub use interface::*;
pub use tag::*;
pub use worker::*;
