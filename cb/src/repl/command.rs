//! Menu commands

use std::fmt;

/// A numbered main-menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Append,
    InsertAlphabetical,
    RemoveByIndex,
    RemoveByName,
    Edit,
    List,
    WriteFile,
    WriteReport,
    Load,
    AppendFromFile,
    MergeFromFile,
    Exit,
}

impl Command {
    /// Every command, in menu order
    pub const ALL: [Command; 12] = [
        Command::Append,
        Command::InsertAlphabetical,
        Command::RemoveByIndex,
        Command::RemoveByName,
        Command::Edit,
        Command::List,
        Command::WriteFile,
        Command::WriteReport,
        Command::Load,
        Command::AppendFromFile,
        Command::MergeFromFile,
        Command::Exit,
    ];

    /// Menu number, starting at 1
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).map_or(0, |i| i + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::Append => "Append Contact",
            Command::InsertAlphabetical => "Insert Contact in Alphabetical Order",
            Command::RemoveByIndex => "Remove Contact by Index",
            Command::RemoveByName => "Remove Contact by Full Name",
            Command::Edit => "Find and Edit Contact",
            Command::List => "List Contacts",
            Command::WriteFile => "Write Contacts to File",
            Command::WriteReport => "Write Contacts to File (Human Readable)",
            Command::Load => "Load Contacts from File Replacing Existing Contacts",
            Command::AppendFromFile => "Append Contacts from File",
            Command::MergeFromFile => "Merge Contacts from File",
            Command::Exit => "Exit",
        }
    }

    /// Look up the command for a typed menu number
    pub fn from_choice(input: &str) -> Option<Command> {
        let n: usize = input.trim().parse().ok()?;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}
