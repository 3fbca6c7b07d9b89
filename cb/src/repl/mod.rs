//! Interactive menu for the address book
//!
//! Reads one menu number per iteration and dispatches it to a handler that
//! prompts for whatever the command needs.

mod command;
mod input;
mod session;

pub use command::Command;
pub use input::{EditorSource, Line, LineSource, ScriptedSource};
pub use session::{Flow, Session};

use std::path::Path;

use colored::Colorize;
use eyre::Result;
use tracing::warn;

use crate::config::Config;
use crate::format;

/// Run the interactive menu on the terminal
///
/// `initial` is loaded before the first menu is shown; if that fails the
/// session starts empty.
pub fn run_interactive(config: &Config, initial: Option<&Path>) -> Result<()> {
    let input = EditorSource::new()?;
    let mut session = Session::new(input, config.clone());

    if let Some(path) = initial {
        let loaded = format::load_contacts(path).and_then(|contacts| session.store_mut().replace_all(contacts));
        if let Err(e) = loaded {
            warn!(path = %path.display(), error = %e, "Initial load failed");
            eprintln!("{} {}", "✗".red(), e);
        }
    }

    session.run()
}
