#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use lines::*;
pub use path::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod lines;
mod path;
mod types;
