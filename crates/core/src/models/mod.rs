//! Data models for Sorteador

mod draw;
mod list;
mod participant;

pub use draw::*;
pub use list::*;
pub use participant::*;
