//! Core ContactStore implementation

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::contact::{Contact, ContactField, cmp_by_name};
use crate::error::{BookError, BookResult};

/// Result of removing a contact by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The first matching contact, now owned by the caller
    Removed(Contact),
    /// No contact has that first and family name
    NotFound,
}

/// Counts reported by bulk append and merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Contacts added to the store
    pub added: usize,
    /// Contacts dropped because the name was already present
    pub skipped: usize,
}

/// Ordered, growable collection of contacts
///
/// Order is insertion order until [`ContactStore::sort_by_name`],
/// [`ContactStore::insert_alphabetical`] or [`ContactStore::merge_from`] is
/// used. Every fallible operation leaves the store untouched on error.
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    limit: Option<usize>,
}

impl ContactStore {
    /// Create an empty store with no capacity limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that refuses to grow past `limit` contacts
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            contacts: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts
    }

    /// Index of the first contact with exactly this name
    pub fn position_of(&self, first_name: &str, family_name: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.has_name(first_name, family_name))
    }

    pub fn contains_name(&self, first_name: &str, family_name: &str) -> bool {
        self.position_of(first_name, family_name).is_some()
    }

    /// True when the contacts are in (family name, first name) order
    pub fn is_sorted_by_name(&self) -> bool {
        self.contacts.windows(2).all(|w| cmp_by_name(&w[0], &w[1]) != Ordering::Greater)
    }

    /// Make room for `additional` more contacts or fail without changing anything
    fn reserve(&mut self, additional: usize) -> BookResult<()> {
        if let Some(limit) = self.limit
            && self.contacts.len() + additional > limit
        {
            return Err(BookError::CapacityExceeded { limit });
        }
        self.contacts.try_reserve(additional)?;
        Ok(())
    }

    /// Position before the first contact that sorts strictly after `contact`
    fn insertion_point(&self, contact: &Contact) -> usize {
        self.contacts
            .iter()
            .position(|existing| cmp_by_name(existing, contact) == Ordering::Greater)
            .unwrap_or(self.contacts.len())
    }

    /// Add a contact at the end
    pub fn append(&mut self, contact: Contact) -> BookResult<()> {
        self.reserve(1)?;
        debug!(name = %contact.full_name(), index = self.contacts.len(), "Appended contact");
        self.contacts.push(contact);
        Ok(())
    }

    /// Insert a contact before the first one that sorts after it
    ///
    /// Contacts with an equal name stay ahead of the new one. Returns the
    /// index the contact was placed at.
    pub fn insert_alphabetical(&mut self, contact: Contact) -> BookResult<usize> {
        self.reserve(1)?;
        let index = self.insertion_point(&contact);
        debug!(name = %contact.full_name(), index, "Inserted contact alphabetically");
        self.contacts.insert(index, contact);
        Ok(index)
    }

    /// Remove and return the contact at `index`
    pub fn remove_at(&mut self, index: usize) -> BookResult<Contact> {
        if self.contacts.is_empty() {
            return Err(BookError::Empty);
        }
        if index >= self.contacts.len() {
            return Err(BookError::IndexOutOfRange {
                index,
                len: self.contacts.len(),
            });
        }
        let removed = self.contacts.remove(index);
        debug!(name = %removed.full_name(), index, "Removed contact");
        Ok(removed)
    }

    /// Remove the first contact whose first and family name match exactly
    pub fn remove_by_name(&mut self, first_name: &str, family_name: &str) -> RemoveOutcome {
        match self.position_of(first_name, family_name) {
            Some(index) => {
                let removed = self.contacts.remove(index);
                debug!(name = %removed.full_name(), index, "Removed contact by name");
                RemoveOutcome::Removed(removed)
            }
            None => {
                debug!(first_name, family_name, "No contact to remove");
                RemoveOutcome::NotFound
            }
        }
    }

    /// Replace one field of the contact at `index`
    ///
    /// The raw value is validated for the field; an invalid value leaves the
    /// contact unchanged.
    pub fn edit_field(&mut self, index: usize, field: ContactField, raw: &str) -> BookResult<()> {
        let len = self.contacts.len();
        if len == 0 {
            return Err(BookError::Empty);
        }
        let contact = self
            .contacts
            .get_mut(index)
            .ok_or(BookError::IndexOutOfRange { index, len })?;
        contact.set_field(field, raw)?;
        debug!(index, %field, "Edited contact");
        Ok(())
    }

    /// Stable insertion sort by (family name, first name)
    pub fn sort_by_name(&mut self) {
        for i in 1..self.contacts.len() {
            let mut j = i;
            while j > 0 && cmp_by_name(&self.contacts[j - 1], &self.contacts[j]) == Ordering::Greater {
                self.contacts.swap(j - 1, j);
                j -= 1;
            }
        }
        debug!(count = self.contacts.len(), "Sorted contacts by name");
    }

    /// Drop every contact and adopt `contacts` as the new contents
    pub fn replace_all(&mut self, contacts: Vec<Contact>) -> BookResult<()> {
        if let Some(limit) = self.limit
            && contacts.len() > limit
        {
            return Err(BookError::CapacityExceeded { limit });
        }
        info!(old = self.contacts.len(), new = contacts.len(), "Replaced all contacts");
        self.contacts = contacts;
        Ok(())
    }

    /// Drop every contact
    pub fn clear(&mut self) {
        debug!(count = self.contacts.len(), "Cleared contacts");
        self.contacts.clear();
    }

    /// Contacts from `source` that should be added, in source order
    ///
    /// With `dedupe`, a candidate is dropped when its name is already in the
    /// store or was accepted earlier from the same source.
    fn accept_new(&self, source: impl IntoIterator<Item = Contact>, dedupe: bool) -> (Vec<Contact>, usize) {
        let mut accepted: Vec<Contact> = Vec::new();
        let mut skipped = 0;
        for candidate in source {
            let duplicate = dedupe
                && (self.contains_name(&candidate.first_name, &candidate.family_name)
                    || accepted.iter().any(|c| c.same_name(&candidate)));
            if duplicate {
                debug!(name = %candidate.full_name(), "Skipping duplicate contact");
                skipped += 1;
            } else {
                accepted.push(candidate);
            }
        }
        (accepted, skipped)
    }

    /// Append every contact from `source`, keeping source order
    ///
    /// Either all accepted contacts are added or, on error, none are.
    pub fn append_from(
        &mut self,
        source: impl IntoIterator<Item = Contact>,
        dedupe: bool,
    ) -> BookResult<MergeSummary> {
        let (accepted, skipped) = self.accept_new(source, dedupe);
        self.reserve(accepted.len())?;
        let summary = MergeSummary {
            added: accepted.len(),
            skipped,
        };
        self.contacts.extend(accepted);
        info!(added = summary.added, skipped = summary.skipped, "Appended contacts");
        Ok(summary)
    }

    /// Sort the store, then insert every contact from `source` alphabetically
    ///
    /// The result is fully ordered by (family name, first name). On error the
    /// store is neither sorted nor extended.
    pub fn merge_from(
        &mut self,
        source: impl IntoIterator<Item = Contact>,
        dedupe: bool,
    ) -> BookResult<MergeSummary> {
        let (accepted, skipped) = self.accept_new(source, dedupe);
        self.reserve(accepted.len())?;
        self.sort_by_name();
        let summary = MergeSummary {
            added: accepted.len(),
            skipped,
        };
        for contact in accepted {
            let index = self.insertion_point(&contact);
            self.contacts.insert(index, contact);
        }
        info!(added = summary.added, skipped = summary.skipped, "Merged contacts");
        Ok(summary)
    }
}

impl<'a> IntoIterator for &'a ContactStore {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.contacts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(first: &str, family: &str) -> Contact {
        Contact::new(first, family, 2025550000, "1 Test Rd", 30)
    }

    fn names(store: &ContactStore) -> Vec<String> {
        store.iter().map(Contact::full_name).collect()
    }

    fn sample() -> ContactStore {
        let mut store = ContactStore::new();
        store
            .append(Contact::new("Ada", "Lovelace", 2025551234, "1 Main St", 36))
            .unwrap();
        store
            .append(Contact::new("Alan", "Turing", 2025555678, "2 Oak Ave", 41))
            .unwrap();
        store
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut store = ContactStore::new();
        store.append(contact("Zoe", "Young")).unwrap();
        store.append(contact("Amy", "Adams")).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(names(&store), vec!["Zoe Young", "Amy Adams"]);
    }

    #[test]
    fn test_append_past_limit_leaves_store_unchanged() {
        let mut store = ContactStore::with_limit(Some(1));
        store.append(contact("Amy", "Adams")).unwrap();
        let err = store.append(contact("Bob", "Brown")).unwrap_err();
        assert!(matches!(err, BookError::CapacityExceeded { limit: 1 }));
        assert_eq!(store.len(), 1);
        assert!(store.insert_alphabetical(contact("Al", "Aa")).is_err());
        assert_eq!(names(&store), vec!["Amy Adams"]);
    }

    #[test]
    fn test_insert_alphabetical_scenario() {
        let mut store = sample();
        let index = store
            .insert_alphabetical(Contact::new("Grace", "Hopper", 2025559999, "3 Elm Rd", 40))
            .unwrap();
        assert_eq!(index, 0);
        let families: Vec<&str> = store.iter().map(|c| c.family_name.as_str()).collect();
        assert_eq!(families, vec!["Hopper", "Lovelace", "Turing"]);
    }

    #[test]
    fn test_insert_alphabetical_into_empty() {
        let mut store = ContactStore::new();
        assert_eq!(store.insert_alphabetical(contact("Amy", "Adams")).unwrap(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_alphabetical_ties_on_first_name() {
        let mut store = ContactStore::new();
        store.insert_alphabetical(contact("Carl", "Smith")).unwrap();
        store.insert_alphabetical(contact("Anna", "Smith")).unwrap();
        store.insert_alphabetical(contact("Bea", "Smith")).unwrap();
        assert_eq!(names(&store), vec!["Anna Smith", "Bea Smith", "Carl Smith"]);
    }

    #[test]
    fn test_insert_alphabetical_equal_names_go_after() {
        let mut store = ContactStore::new();
        store
            .insert_alphabetical(Contact::new("Ann", "Lee", 2025550001, "first", 20))
            .unwrap();
        let index = store
            .insert_alphabetical(Contact::new("Ann", "Lee", 2025550002, "second", 21))
            .unwrap();
        assert_eq!(index, 1);
        assert_eq!(store.get(0).unwrap().address, "first");
        assert_eq!(store.get(1).unwrap().address, "second");
    }

    #[test]
    fn test_remove_at_shifts_left() {
        let mut store = ContactStore::new();
        for name in ["A", "B", "C", "D"] {
            store.append(contact(name, "X")).unwrap();
        }
        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.first_name, "B");
        assert_eq!(names(&store), vec!["A X", "C X", "D X"]);
    }

    #[test]
    fn test_remove_at_errors() {
        let mut store = ContactStore::new();
        assert!(matches!(store.remove_at(0), Err(BookError::Empty)));

        let mut store = sample();
        assert!(matches!(
            store.remove_at(2),
            Err(BookError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_by_name_first_match_only() {
        let mut store = ContactStore::new();
        store.append(Contact::new("Ann", "Lee", 2025550001, "first", 20)).unwrap();
        store.append(contact("Bob", "Ray")).unwrap();
        store.append(Contact::new("Ann", "Lee", 2025550002, "second", 21)).unwrap();

        match store.remove_by_name("Ann", "Lee") {
            RemoveOutcome::Removed(c) => assert_eq!(c.address, "first"),
            RemoveOutcome::NotFound => panic!("expected a removal"),
        }
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().address, "second");
    }

    #[test]
    fn test_remove_by_name_not_found_leaves_store_identical() {
        let mut store = sample();
        let before = store.as_slice().to_vec();
        assert_eq!(store.remove_by_name("ada", "Lovelace"), RemoveOutcome::NotFound);
        assert_eq!(store.remove_by_name("Grace", "Hopper"), RemoveOutcome::NotFound);
        assert_eq!(store.as_slice(), before.as_slice());
    }

    #[test]
    fn test_edit_field() {
        let mut store = sample();
        store.edit_field(1, ContactField::Address, "9 New Rd").unwrap();
        store.edit_field(1, ContactField::Age, "42").unwrap();
        let alan = store.get(1).unwrap();
        assert_eq!(alan.address, "9 New Rd");
        assert_eq!(alan.age, 42);
    }

    #[test]
    fn test_edit_field_invalid_value_aborts() {
        let mut store = sample();
        let before = store.as_slice().to_vec();
        assert!(matches!(
            store.edit_field(0, ContactField::Phone, "0123456789"),
            Err(BookError::Validation(_))
        ));
        assert!(matches!(
            store.edit_field(0, ContactField::Age, "0"),
            Err(BookError::Validation(_))
        ));
        assert!(matches!(
            store.edit_field(5, ContactField::Age, "30"),
            Err(BookError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert_eq!(store.as_slice(), before.as_slice());
    }

    #[test]
    fn test_sort_by_name_is_stable() {
        let mut store = ContactStore::new();
        store.append(Contact::new("Ann", "Lee", 2025550001, "first", 20)).unwrap();
        store.append(contact("Zed", "Adams")).unwrap();
        store.append(Contact::new("Ann", "Lee", 2025550002, "second", 21)).unwrap();
        store.append(contact("Amy", "Adams")).unwrap();
        store.sort_by_name();
        assert!(store.is_sorted_by_name());
        assert_eq!(names(&store), vec!["Amy Adams", "Zed Adams", "Ann Lee", "Ann Lee"]);
        assert_eq!(store.get(2).unwrap().address, "first");
        assert_eq!(store.get(3).unwrap().address, "second");
    }

    #[test]
    fn test_replace_all() {
        let mut store = sample();
        store.replace_all(vec![contact("Amy", "Adams")]).unwrap();
        assert_eq!(names(&store), vec!["Amy Adams"]);

        let mut limited = ContactStore::with_limit(Some(1));
        assert!(limited.replace_all(vec![contact("A", "A"), contact("B", "B")]).is_err());
        assert!(limited.is_empty());
    }

    #[test]
    fn test_append_from_dedupes_and_keeps_order() {
        let mut store = sample();
        let source = vec![
            contact("Zed", "Zulu"),
            Contact::new("Ada", "Lovelace", 2029999999, "elsewhere", 50),
            contact("Amy", "Adams"),
            contact("Zed", "Zulu"),
        ];
        let summary = store.append_from(source, true).unwrap();
        assert_eq!(summary, MergeSummary { added: 2, skipped: 2 });
        assert_eq!(
            names(&store),
            vec!["Ada Lovelace", "Alan Turing", "Zed Zulu", "Amy Adams"]
        );
        assert_eq!(store.get(0).unwrap().address, "1 Main St");
    }

    #[test]
    fn test_append_from_without_dedupe() {
        let mut store = sample();
        let summary = store.append_from(vec![contact("Ada", "Lovelace")], false).unwrap();
        assert_eq!(summary.added, 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_merge_from_sorts_and_dedupes() {
        let mut store = ContactStore::new();
        store.append(contact("Alan", "Turing")).unwrap();
        store.append(contact("Ada", "Lovelace")).unwrap();
        let source = vec![
            contact("Grace", "Hopper"),
            contact("Alan", "Turing"),
            contact("Charles", "Babbage"),
        ];
        let summary = store.merge_from(source, true).unwrap();
        assert_eq!(summary, MergeSummary { added: 2, skipped: 1 });
        assert_eq!(
            names(&store),
            vec!["Charles Babbage", "Grace Hopper", "Ada Lovelace", "Alan Turing"]
        );
    }

    #[test]
    fn test_merge_past_limit_is_atomic() {
        let mut store = ContactStore::with_limit(Some(3));
        store.append(contact("Alan", "Turing")).unwrap();
        store.append(contact("Ada", "Lovelace")).unwrap();
        let source = vec![contact("Grace", "Hopper"), contact("Charles", "Babbage")];
        assert!(matches!(
            store.merge_from(source, true),
            Err(BookError::CapacityExceeded { limit: 3 })
        ));
        assert_eq!(names(&store), vec!["Alan Turing", "Ada Lovelace"]);
    }

    #[test]
    fn test_clear() {
        let mut store = sample();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.position_of("Ada", "Lovelace"), None);
    }
}
