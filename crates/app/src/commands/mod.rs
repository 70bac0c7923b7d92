//! Command handlers
//!
//! Each handler loads what it needs from storage, calls into the core, and
//! returns the text to print.

mod draw;
mod history;
mod lists;

use sorteador_core::Result;

use crate::cli::Command;
use crate::state::AppState;

pub use draw::run_draw;

pub fn dispatch(state: &mut AppState, command: Command) -> Result<String> {
    match command {
        Command::List(cmd) => lists::run_list(state, cmd),
        Command::Name(cmd) => lists::run_name(state, cmd),
        Command::Reset { list_id } => lists::reset(state, list_id),
        Command::Draw(args) => run_draw(state, &args),
        Command::History(cmd) => history::run_history(state, cmd),
        Command::Stats { list_id } => history::show_stats(state, list_id),
    }
}
