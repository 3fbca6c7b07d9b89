//! REPL session management

use std::fmt::Display;
use std::path::{Path, PathBuf};

use colored::Colorize;
use eyre::Result;
use tracing::{debug, warn};

use super::command::Command;
use super::input::{Line, LineSource};
use crate::config::Config;
use crate::contact::{Contact, ContactField, validate_age, validate_phone, validate_text};
use crate::error::ValidationError;
use crate::format;
use crate::store::{ContactStore, MergeSummary, RemoveOutcome};

/// What the main loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A prompt either produced a value or ended the command early
enum Step<T> {
    Value(T),
    Abort(Flow),
}

impl<T> From<Flow> for Step<T> {
    fn from(flow: Flow) -> Self {
        Step::Abort(flow)
    }
}

/// Take the value out of a prompt result, or return its flow from the caller
macro_rules! answer {
    ($step:expr) => {
        match $step? {
            Step::Value(v) => v,
            Step::Abort(flow) => return Ok(flow.into()),
        }
    };
}

/// Interactive menu session over one contact store
pub struct Session<S: LineSource> {
    input: S,
    store: ContactStore,
    config: Config,
}

impl<S: LineSource> Session<S> {
    /// Create a session with an empty store
    pub fn new(input: S, config: Config) -> Self {
        let store = ContactStore::with_limit(config.max_contacts);
        Self::with_store(input, config, store)
    }

    /// Create a session over an existing store
    pub fn with_store(input: S, config: Config, store: ContactStore) -> Self {
        Self { input, store, config }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ContactStore {
        &mut self.store
    }

    /// Run the menu loop until Exit or end of input
    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        loop {
            self.print_menu();
            let line = match self.input.read_line("Choose an option: ")? {
                Line::Text(line) => line,
                Line::Interrupted => continue,
                Line::Closed => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
            };

            let choice = line.trim();
            if choice.is_empty() {
                continue;
            }

            let Some(command) = Command::from_choice(choice) else {
                self.fail(format!("Unknown option: {}", choice));
                continue;
            };

            debug!(?command, "Dispatching menu command");
            if self.dispatch(command)? == Flow::Exit {
                break;
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Run a single menu command
    pub fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Append => self.cmd_append(),
            Command::InsertAlphabetical => self.cmd_insert_alphabetical(),
            Command::RemoveByIndex => self.cmd_remove_by_index(),
            Command::RemoveByName => self.cmd_remove_by_name(),
            Command::Edit => self.cmd_edit(),
            Command::List => {
                self.print_contacts();
                Ok(Flow::Continue)
            }
            Command::WriteFile => self.cmd_write_file(),
            Command::WriteReport => self.cmd_write_report(),
            Command::Load => self.cmd_load(),
            Command::AppendFromFile => self.cmd_append_from_file(),
            Command::MergeFromFile => self.cmd_merge_from_file(),
            Command::Exit => Ok(Flow::Exit),
        }
    }

    fn cmd_append(&mut self) -> Result<Flow> {
        let contact = answer!(self.read_new_contact());
        match self.store.append(contact) {
            Ok(()) => self.done("Contact appended"),
            Err(e) => self.fail(e),
        }
        Ok(Flow::Continue)
    }

    fn cmd_insert_alphabetical(&mut self) -> Result<Flow> {
        let contact = answer!(self.read_new_contact());
        match self.store.insert_alphabetical(contact) {
            Ok(index) => self.done(format!("Contact inserted at index {}", index)),
            Err(e) => self.fail(e),
        }
        Ok(Flow::Continue)
    }

    fn cmd_remove_by_index(&mut self) -> Result<Flow> {
        let raw = answer!(self.ask("Enter index to remove (0 based): "));
        let Some(index) = parse_index(&raw) else {
            self.fail(format!("Invalid index: {}", raw.trim()));
            return Ok(Flow::Continue);
        };
        match self.store.remove_at(index) {
            Ok(removed) => self.done(format!("Removed {}", removed.full_name())),
            Err(e) => self.fail(e),
        }
        Ok(Flow::Continue)
    }

    fn cmd_remove_by_name(&mut self) -> Result<Flow> {
        let first_name = answer!(self.ask("Enter first name: "));
        let family_name = answer!(self.ask("Enter family name: "));
        let (first_name, family_name) = (first_name.trim(), family_name.trim());
        match self.store.remove_by_name(first_name, family_name) {
            RemoveOutcome::Removed(_) => self.done(format!("Contact '{} {}' removed", first_name, family_name)),
            RemoveOutcome::NotFound => self.fail(format!("Contact '{} {}' not found", first_name, family_name)),
        }
        Ok(Flow::Continue)
    }

    fn cmd_edit(&mut self) -> Result<Flow> {
        if self.store.is_empty() {
            println!("No contacts available to edit.");
            return Ok(Flow::Continue);
        }

        let last = self.store.len() - 1;
        let raw = answer!(self.ask(&format!("Enter index of contact to edit (0-{}): ", last)));
        let Some((index, name)) = parse_index(&raw).and_then(|i| self.store.get(i).map(|c| (i, c.full_name())))
        else {
            self.fail(format!("Invalid index: {}", raw.trim()));
            return Ok(Flow::Continue);
        };

        println!("Editing contact: {}", name.bright_cyan());
        for (i, field) in ContactField::ALL.iter().enumerate() {
            println!("  {}. Edit {}", i + 1, field);
        }
        println!("  {}. Cancel", ContactField::ALL.len() + 1);

        let choice = answer!(self.ask("Choose an option: "));
        let Some(field) = parse_index(&choice)
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| ContactField::ALL.get(i).copied())
        else {
            println!("{}", "Edit cancelled.".dimmed());
            return Ok(Flow::Continue);
        };

        let value = answer!(self.ask(&format!("Enter new {}: ", field)));
        match self.store.edit_field(index, field, &value) {
            Ok(()) => self.done(format!("Updated {} of {}", field, name)),
            Err(e) => self.fail(e),
        }
        Ok(Flow::Continue)
    }

    fn cmd_write_file(&mut self) -> Result<Flow> {
        let default = self.config.default_file.clone();
        let path = answer!(self.ask_path(&default));
        match format::save_contacts(&path, self.store.as_slice()) {
            Ok(()) => self.done(format!("Wrote {} contacts to {}", self.store.len(), path.display())),
            Err(e) => self.fail(e),
        }
        Ok(Flow::Continue)
    }

    fn cmd_write_report(&mut self) -> Result<Flow> {
        let default = self.config.report_file.clone();
        let path = answer!(self.ask_path(&default));
        match format::save_report(&path, self.store.as_slice()) {
            Ok(()) => self.done(format!("Wrote report to {}", path.display())),
            Err(e) => self.fail(e),
        }
        Ok(Flow::Continue)
    }

    fn cmd_load(&mut self) -> Result<Flow> {
        let default = self.config.default_file.clone();
        let path = answer!(self.ask_path(&default));
        let result = format::load_contacts(&path).and_then(|contacts| self.store.replace_all(contacts));
        match result {
            Ok(()) => self.done(format!("Loaded {} contacts from {}", self.store.len(), path.display())),
            Err(e) => self.fail(e),
        }
        Ok(Flow::Continue)
    }

    fn cmd_append_from_file(&mut self) -> Result<Flow> {
        let default = self.config.default_file.clone();
        let path = answer!(self.ask_path(&default));
        let result = format::load_contacts(&path).and_then(|contacts| self.store.append_from(contacts, true));
        match result {
            Ok(summary) => self.done(summary_message("Appended", &summary, &path)),
            Err(e) => self.fail(e),
        }
        Ok(Flow::Continue)
    }

    fn cmd_merge_from_file(&mut self) -> Result<Flow> {
        let default = self.config.default_file.clone();
        let path = answer!(self.ask_path(&default));
        let result = format::load_contacts(&path).and_then(|contacts| self.store.merge_from(contacts, true));
        match result {
            Ok(summary) => self.done(summary_message("Merged", &summary, &path)),
            Err(e) => self.fail(e),
        }
        Ok(Flow::Continue)
    }

    /// Prompt for every field of a new contact
    ///
    /// Each field gets `max-attempts` tries. Running out of tries abandons the
    /// whole entry; nothing is stored.
    fn read_new_contact(&mut self) -> Result<Step<Contact>> {
        let first_name = answer!(self.ask_field("Enter the first name: ", |s| validate_text(
            ContactField::FirstName,
            s
        )));
        let family_name = answer!(self.ask_field("Enter the family name: ", |s| validate_text(
            ContactField::FamilyName,
            s
        )));
        let address = answer!(self.ask_field("Enter the address: ", |s| validate_text(ContactField::Address, s)));
        let phone = answer!(self.ask_field(
            "Enter 10-digit phone number that must not start with 0: ",
            validate_phone
        ));
        let age = answer!(self.ask_field("Enter the age of the contact: ", validate_age));

        Ok(Step::Value(Contact {
            first_name,
            family_name,
            phone,
            address,
            age,
        }))
    }

    /// Read one answer; Ctrl+C cancels the command, end of input exits
    fn ask(&mut self, prompt: &str) -> Result<Step<String>> {
        match self.input.read_line(prompt)? {
            Line::Text(line) => Ok(Step::Value(line)),
            Line::Interrupted => {
                debug!(prompt, "Prompt cancelled");
                println!("{}", "Cancelled.".dimmed());
                Ok(Step::Abort(Flow::Continue))
            }
            Line::Closed => Ok(Step::Abort(Flow::Exit)),
        }
    }

    /// Ask until `parse` accepts the answer or attempts run out
    fn ask_field<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> Result<T, ValidationError>) -> Result<Step<T>> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        let mut prompt = prompt.to_string();
        loop {
            let line = answer!(self.ask(&prompt));
            match parse(&line) {
                Ok(value) => return Ok(Step::Value(value)),
                Err(e) if attempt < max_attempts => {
                    eprintln!("{} {}", "✗".red(), e);
                    prompt = "Try again: ".to_string();
                    attempt += 1;
                }
                Err(e) => {
                    warn!(attempts = attempt, error = %e, "Giving up on field entry");
                    self.fail(format!("{} (no attempts left, contact discarded)", e));
                    return Ok(Step::Abort(Flow::Continue));
                }
            }
        }
    }

    /// Ask for a file name, falling back to `default` on an empty answer
    fn ask_path(&mut self, default: &Path) -> Result<Step<PathBuf>> {
        let line = answer!(self.ask(&format!("Enter file name [{}]: ", default.display())));
        let name = line.trim();
        let path = if name.is_empty() {
            default.to_path_buf()
        } else {
            PathBuf::from(name)
        };
        Ok(Step::Value(path))
    }

    fn done(&self, message: impl Display) {
        println!("{} {}", "✓".green(), message);
    }

    fn fail(&self, message: impl Display) {
        warn!(error = %message, "Command failed");
        eprintln!("{} {}", "✗".red(), message);
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Address Book".bright_cyan().bold());
        if !self.store.is_empty() {
            println!("{} contacts loaded", self.store.len());
        }
    }

    fn print_menu(&self) {
        println!();
        println!("{}", "Address Book Menu".bright_cyan());
        for command in Command::ALL {
            println!("{:>4}. {}", command.number(), command.label());
        }
    }

    /// Print every contact with the index the remove and edit prompts expect
    fn print_contacts(&self) {
        if self.store.is_empty() {
            println!("No contacts available.");
            return;
        }

        for (i, contact) in self.store.iter().enumerate() {
            println!("[{}] {}", i.to_string().yellow(), contact.full_name().bold());
            println!("    Phone: {}", contact.phone_display());
            println!("    Address: {}", contact.address);
            println!("    Age: {}", contact.age);
        }
        println!("{}", format!("Total Contacts: {}", self.store.len()).dimmed());
    }
}

fn parse_index(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

fn summary_message(verb: &str, summary: &MergeSummary, path: &Path) -> String {
    format!(
        "{} {} contacts from {} ({} duplicates skipped)",
        verb,
        summary.added,
        path.display(),
        summary.skipped
    )
}
