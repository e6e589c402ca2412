//! Distributed, k-ordered identifiers.
//!
//! `floe` issues 128-bit flake identifiers — a millisecond timestamp, a
//! 48-bit worker tag, and a 16-bit per-millisecond sequence counter — that
//! sort by issuance order across a fleet of uncoordinated workers.
//! Identifiers travel as base62 text, and every identifier flavor speaks
//! the same entity-typed [`Identity`] contract, so values minted by
//! unrelated generators stay comparable.
//!
//! # Quick start
//!
//! ```
//! use floe::{FlakeGenerator, FlakeId, WorkerId};
//!
//! struct Invoice;
//!
//! let generator = FlakeGenerator::new();
//! let worker = WorkerId::from_bytes([0x02, 0x00, 0x5e, 0x10, 0x00, 0x01]);
//!
//! let id: FlakeId<Invoice> = generator.issue(worker)?;
//! let parsed: FlakeId<Invoice> = id.to_string().parse()?;
//! assert_eq!(id, parsed);
//! # Ok::<(), floe::Error>(())
//! ```
//!
//! To tag a worker with the hardware address of its fastest network
//! interface, use [`default_worker_id`]. External identifiers (UUIDs,
//! upstream tokens) join the same identity space through [`AdaptingId`].

mod error;
mod generator;
mod identity;
mod net;
pub mod radix;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::identity::*;
pub use crate::net::*;
pub use crate::radix::{Alphabet, RadixError};
pub use crate::time::*;
