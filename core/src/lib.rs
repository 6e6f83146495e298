#![no_std]

extern crate alloc;

pub use analysis::*;
pub use board::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use inventory::*;
pub use pipe::*;
pub use session::*;
pub use types::*;

mod analysis;
mod board;
mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod inventory;
mod pipe;
mod session;
mod types;
