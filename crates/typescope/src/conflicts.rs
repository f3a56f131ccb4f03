//! Detection of display-name collisions between distinct types.

use crate::schema::NamedSchema;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use tracing::warn;

/// Distinct identities that render under the same display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConflictRecord {
    pub name: String,
    pub identities: BTreeSet<String>,
}

/// Accumulates [`ConflictRecord`]s, grouped by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    records: IndexMap<String, ConflictRecord>,
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares `new_schema` against `cached` and records any schema with
    /// the same name (ignoring case) but a different identity.
    ///
    /// Returns `true` if a record was created or grew.
    pub fn analyze<'a, I>(&mut self, new_schema: &NamedSchema, cached: I) -> bool
    where
        I: IntoIterator<Item = &'a NamedSchema>,
    {
        let key = new_schema.name.to_lowercase();
        let clashes: Vec<&str> = cached
            .into_iter()
            .filter(|s| s.identity != new_schema.identity && s.name.to_lowercase() == key)
            .map(|s| s.identity.as_str())
            .collect();

        if clashes.is_empty() {
            return false;
        }

        let record = self
            .records
            .entry(key)
            .or_insert_with(|| ConflictRecord {
                name: new_schema.name.clone(),
                identities: BTreeSet::new(),
            });

        let before = record.identities.len();
        record.identities.insert(new_schema.identity.clone());
        record
            .identities
            .extend(clashes.into_iter().map(str::to_string));

        let grew = record.identities.len() != before;
        if grew {
            warn!(
                "Schema name '{}' is shared by {} types: {:?}",
                record.name,
                record.identities.len(),
                record.identities
            );
        }
        grew
    }

    pub fn records(&self) -> impl Iterator<Item = &ConflictRecord> {
        self.records.values()
    }

    /// Looks up the record for `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<&ConflictRecord> {
        self.records.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;

    fn schema(name: &str, identity: &str) -> NamedSchema {
        NamedSchema::new(name, identity, SchemaNode::empty_object())
    }

    #[test]
    fn test_same_identity_is_not_a_conflict() {
        let mut detector = ConflictDetector::new();
        let a = schema("Address", "com.a.Address");
        assert!(!detector.analyze(&a, [&a]));
        assert!(detector.is_empty());
    }

    #[test]
    fn test_records_both_identities_case_insensitively() {
        let mut detector = ConflictDetector::new();
        let a = schema("Address", "com.a.Address");
        let b = schema("address", "com.b.address");

        assert!(detector.analyze(&b, [&a, &b]));

        let record = detector.get("ADDRESS").unwrap();
        assert_eq!(record.name, "address");
        assert_eq!(
            record.identities.iter().collect::<Vec<_>>(),
            vec!["com.a.Address", "com.b.address"]
        );
    }

    #[test]
    fn test_appends_to_existing_record() {
        let mut detector = ConflictDetector::new();
        let a = schema("Address", "com.a.Address");
        let b = schema("Address", "com.b.Address");
        let c = schema("Address", "com.c.Address");

        detector.analyze(&b, [&a, &b]);
        assert!(detector.analyze(&c, [&a, &b, &c]));
        assert!(!detector.analyze(&c, [&a, &b, &c]));

        assert_eq!(detector.len(), 1);
        assert_eq!(detector.get("Address").unwrap().identities.len(), 3);
    }
}
