//! Line input for the REPL

use std::collections::VecDeque;

use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// One read from a [`LineSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A typed answer, possibly empty
    Text(String),
    /// Ctrl+C: cancel the current prompt
    Interrupted,
    /// Ctrl+D or end of piped input
    Closed,
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Line::Text(s.to_string())
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Line::Text(s)
    }
}

/// Somewhere the session reads answers from
pub trait LineSource {
    /// Show `prompt` and read one line
    fn read_line(&mut self, prompt: &str) -> Result<Line>;
}

/// Terminal input with line editing and history
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Line> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Line::Text(line))
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                Ok(Line::Interrupted)
            }
            Err(ReadlineError::Eof) => Ok(Line::Closed),
            Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
        }
    }
}

/// Fixed answers, consumed in order; [`Line::Closed`] once exhausted
#[derive(Debug, Default)]
pub struct ScriptedSource {
    lines: VecDeque<Line>,
}

impl ScriptedSource {
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Line>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, _prompt: &str) -> Result<Line> {
        Ok(self.lines.pop_front().unwrap_or(Line::Closed))
    }
}
