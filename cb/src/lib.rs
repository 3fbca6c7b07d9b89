//! contactbook - interactive address book
//!
//! Keeps an ordered list of contacts in memory and persists it to a simple
//! line-oriented file. The `cb` binary drives a [`ContactStore`] from a
//! numbered menu.
//!
//! # Example
//!
//! ```
//! use contactbook::{Contact, ContactStore};
//!
//! let mut store = ContactStore::new();
//! store.append(Contact::new("Ada", "Lovelace", 2025551234, "1 Main St", 36)).unwrap();
//! store.append(Contact::new("Alan", "Turing", 2025555678, "2 Oak Ave", 41)).unwrap();
//! store.insert_alphabetical(Contact::new("Grace", "Hopper", 2025559999, "3 Elm Rd", 40)).unwrap();
//!
//! let families: Vec<&str> = store.iter().map(|c| c.family_name.as_str()).collect();
//! assert_eq!(families, ["Hopper", "Lovelace", "Turing"]);
//! ```

pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod format;
pub mod repl;
mod store;

pub use contact::{Contact, ContactField};
pub use error::{BookError, BookResult, ValidationError};
pub use store::{ContactStore, MergeSummary, RemoveOutcome};

/// Attempts allowed per field during interactive entry
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default contacts file
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.txt";

/// Default report file
pub const DEFAULT_REPORT_FILE: &str = "report.txt";
