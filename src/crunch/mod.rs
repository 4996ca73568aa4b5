//! ByteBoozer 2 cruncher engine.
//!
//! Data flows one way through the submodules:
//!
//! ```text
//! rle ──► index ──► search ──► parse ──► encode ──► api::assemble
//!                                 ▲         ▲
//!                                 └─ cost ──┘
//! ```

pub mod api;
pub mod cost;
pub mod decruncher;
pub mod encode;
pub mod index;
pub mod parse;
pub mod rle;
pub mod search;
pub mod types;

pub use api::{
    assemble, crunch, crunch_with, ecrunch, parse_address, rcrunch, split_prg, validate_address,
    Cruncher, Mode, Options, Workspace,
};
pub use encode::Packed;
pub use types::{CrunchError, MAX_INPUT_SIZE};
