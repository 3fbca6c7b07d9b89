//! Flat-file contact format and human-readable report
//!
//! # Contact file
//!
//! ```text
//! <contact_count>
//! <first name>
//! <family name>
//! <address>
//! <phone number>
//! <age>
//! ...             (five lines per contact, contact_count times)
//! ```
//!
//! Invalid phone numbers and ages are read as 0 so that one bad field does
//! not cost the whole record.

use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::contact::{Contact, validate_age, validate_phone};
use crate::error::{BookError, BookResult};

const REPORT_TITLE: &str = "Address Book Report";
const REPORT_RULE: &str = "-------------------";

/// Read contacts in the flat-file format
pub fn read_contacts<R: BufRead>(reader: R) -> BookResult<Vec<Contact>> {
    let mut lines = reader.lines();

    let header = lines.next().transpose()?.unwrap_or_default();
    let count: usize = header.trim().parse().map_err(|_| BookError::MalformedCount {
        line: header.clone(),
    })?;

    let mut contacts = Vec::new();

    let mut next_field = |found: usize| -> BookResult<String> {
        match lines.next() {
            Some(line) => Ok(line?.trim_end_matches('\r').to_string()),
            None => Err(BookError::Truncated { expected: count, found }),
        }
    };

    for index in 0..count {
        let first_name = next_field(index)?;
        let family_name = next_field(index)?;
        let address = next_field(index)?;
        let phone_raw = next_field(index)?;
        let age_raw = next_field(index)?;

        let phone = validate_phone(&phone_raw).unwrap_or_else(|e| {
            warn!(index, error = %e, "Invalid phone number in file, storing 0");
            0
        });
        let age = validate_age(&age_raw).unwrap_or_else(|e| {
            warn!(index, error = %e, "Invalid age in file, storing 0");
            0
        });

        contacts.push(Contact {
            first_name,
            family_name,
            phone,
            address,
            age,
        });
    }

    Ok(contacts)
}

/// Write contacts in the flat-file format
pub fn write_contacts<W: Write>(mut writer: W, contacts: &[Contact]) -> io::Result<()> {
    writeln!(writer, "{}", contacts.len())?;
    for c in contacts {
        writeln!(writer, "{}", c.first_name)?;
        writeln!(writer, "{}", c.family_name)?;
        writeln!(writer, "{}", c.address)?;
        writeln!(writer, "{}", c.phone)?;
        writeln!(writer, "{}", c.age)?;
    }
    writer.flush()
}

/// Write the human-readable report
///
/// Contacts are numbered from 1. The report is not meant to be read back.
pub fn write_report<W: Write>(mut writer: W, contacts: &[Contact]) -> io::Result<()> {
    writeln!(writer, "{}", REPORT_TITLE)?;
    writeln!(writer, "{}", REPORT_RULE)?;
    for (i, c) in contacts.iter().enumerate() {
        writeln!(writer, "{}. {}", i + 1, c.full_name())?;
        writeln!(writer, "   Phone: {}", c.phone_display())?;
        writeln!(writer, "   Address: {}", c.address)?;
        writeln!(writer, "   Age: {}", c.age)?;
    }
    writeln!(writer, "{}", REPORT_RULE)?;
    writeln!(writer, "Total Contacts: {}", contacts.len())?;
    writer.flush()
}

/// Load every contact from a file
pub fn load_contacts(path: &Path) -> BookResult<Vec<Contact>> {
    let file = fs::File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => BookError::FileNotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => BookError::Io(source),
    })?;
    let contacts = read_contacts(BufReader::new(file))?;
    info!(path = %path.display(), count = contacts.len(), "Loaded contacts");
    Ok(contacts)
}

/// Save contacts to a file in the flat-file format
pub fn save_contacts(path: &Path, contacts: &[Contact]) -> BookResult<()> {
    let file = fs::File::create(path)?;
    write_contacts(BufWriter::new(file), contacts)?;
    info!(path = %path.display(), count = contacts.len(), "Saved contacts");
    Ok(())
}

/// Save the human-readable report to a file
pub fn save_report(path: &Path, contacts: &[Contact]) -> BookResult<()> {
    let file = fs::File::create(path)?;
    write_report(BufWriter::new(file), contacts)?;
    info!(path = %path.display(), count = contacts.len(), "Saved report");
    Ok(())
}
