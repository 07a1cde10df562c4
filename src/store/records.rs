//! The in-memory side of the store: an insertion-ordered working set with
//! unique ids, plus the operations the menu exposes. Every mutation rewrites
//! the backing file before reporting success; if that rewrite fails, the
//! in-memory change is rolled back so memory and disk never drift apart.

use std::path::{Path, PathBuf};

use super::backing::{load_records, save_records};
use super::StoreError;
use crate::models::{Patient, PatientId};

/// Result of an insert attempt. A duplicate id is an ordinary outcome the
/// menu reports in the footer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum AddOutcome {
    Added,
    DuplicateId,
}

/// Result of an update or delete attempt. "Not found" is an ordinary
/// outcome; when it is returned, nothing was mutated and nothing was
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum MutateOutcome {
    Applied,
    NotFound,
}

/// The authoritative set of patient records. Records live in a `Vec` in
/// insertion/load order; lookups are a linear scan, which is plenty for a
/// working set a single person maintains by hand.
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Patient>,
}

impl RecordStore {
    /// Open the store at `path`, eagerly loading everything the backing
    /// file holds. A missing file is not an error; the store starts empty
    /// and the file appears on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = load_records(&path)?;
        Ok(Self { path, records })
    }

    /// Location of the backing file, mostly for status messages.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new record. Reports `DuplicateId` and leaves everything
    /// untouched when the id is already present.
    pub fn add_patient(&mut self, patient: Patient) -> Result<AddOutcome, StoreError> {
        if self.position(&patient.id).is_some() {
            return Ok(AddOutcome::DuplicateId);
        }

        self.records.push(patient);
        if let Err(err) = self.save() {
            self.records.pop();
            return Err(err);
        }
        Ok(AddOutcome::Added)
    }

    /// Look up a record by id. Missing ids are a `None`, never a panic or
    /// an error.
    pub fn patient(&self, id: &PatientId) -> Option<&Patient> {
        self.position(id).map(|pos| &self.records[pos])
    }

    /// Replace a record wholesale (this is not a field merge). Reports
    /// `NotFound` without touching memory or disk when the id is absent.
    pub fn update_patient(&mut self, patient: Patient) -> Result<MutateOutcome, StoreError> {
        let Some(pos) = self.position(&patient.id) else {
            return Ok(MutateOutcome::NotFound);
        };

        let previous = std::mem::replace(&mut self.records[pos], patient);
        if let Err(err) = self.save() {
            self.records[pos] = previous;
            return Err(err);
        }
        Ok(MutateOutcome::Applied)
    }

    /// Remove a record by id. Reports `NotFound` without writing when the
    /// id is absent.
    pub fn delete_patient(&mut self, id: &PatientId) -> Result<MutateOutcome, StoreError> {
        let Some(pos) = self.position(id) else {
            return Ok(MutateOutcome::NotFound);
        };

        let removed = self.records.remove(pos);
        if let Err(err) = self.save() {
            self.records.insert(pos, removed);
            return Err(err);
        }
        Ok(MutateOutcome::Applied)
    }

    /// All records whose age falls within `min..=max`. Ages that never
    /// parsed count as zero here, so a garbled age only matches ranges that
    /// include zero. An empty result is a normal value.
    pub fn search_by_age_range(&self, min: u32, max: u32) -> Vec<&Patient> {
        self.records
            .iter()
            .filter(|patient| {
                let age = patient.age.years_or_zero();
                min <= age && age <= max
            })
            .collect()
    }

    /// Enumerate every record in insertion/load order. Repeated calls
    /// re-enumerate from the current state.
    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.records.iter()
    }

    /// The records as a slice, for screens that want to clone the whole
    /// working set up front.
    pub fn patients(&self) -> &[Patient] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &PatientId) -> Option<usize> {
        self.records.iter().position(|patient| &patient.id == id)
    }

    fn save(&self) -> Result<(), StoreError> {
        save_records(&self.path, &self.records)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::tempdir;

    use super::*;
    use crate::models::Age;
    use crate::store::StoreError;

    fn patient(id: &str, name: &str, address: &str, phone: &str, age: &str, problem: &str) -> Patient {
        Patient {
            id: PatientId::new(id),
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            age: Age::new(age),
            health_problem: problem.to_string(),
        }
    }

    fn open_store(path: &Path) -> RecordStore {
        RecordStore::open(path).unwrap()
    }

    #[test]
    fn add_then_get_returns_the_same_fields() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("records.csv"));
        let record = patient("12", "Ann", "1 Main St", "555-0100", "30", "Flu");

        assert_eq!(store.add_patient(record.clone()).unwrap(), AddOutcome::Added);
        assert_eq!(store.patient(&PatientId::new("12")), Some(&record));
    }

    #[test]
    fn numeric_and_string_ids_name_the_same_record() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("records.csv"));
        let record = patient("7", "Bea", "", "", "50", "");

        let _ = store.add_patient(record.clone()).unwrap();
        assert_eq!(store.patient(&PatientId::new(7)), Some(&record));
    }

    #[test]
    fn duplicate_add_leaves_the_existing_record_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("records.csv"));
        let original = patient("1", "Ann", "Addr", "555", "30", "Flu");

        let _ = store.add_patient(original.clone()).unwrap();
        let outcome = store
            .add_patient(patient("1", "Impostor", "Elsewhere", "000", "99", "None"))
            .unwrap();

        assert_eq!(outcome, AddOutcome::DuplicateId);
        assert_eq!(store.patient(&PatientId::new("1")), Some(&original));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_then_get_reports_not_found() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("records.csv"));
        let _ = store
            .add_patient(patient("5", "Cal", "", "", "41", ""))
            .unwrap();

        assert_eq!(
            store.delete_patient(&PatientId::new("5")).unwrap(),
            MutateOutcome::Applied
        );
        assert_eq!(store.patient(&PatientId::new("5")), None);
        assert_eq!(
            store.delete_patient(&PatientId::new("5")).unwrap(),
            MutateOutcome::NotFound
        );
    }

    #[test]
    fn save_then_fresh_load_reproduces_the_mapping() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");

        let mut store = open_store(&path);
        let first = patient("1", "Ann", "1 Main St", "555-0100", "30", "Flu");
        let second = patient("2", "Bea", "2 Oak Ave", "555-0101", "not known", "Asthma");
        let _ = store.add_patient(first.clone()).unwrap();
        let _ = store.add_patient(second.clone()).unwrap();

        let reloaded = open_store(&path);
        assert_eq!(reloaded.patients(), &[first, second]);
    }

    #[test]
    fn age_range_search_is_inclusive_on_both_bounds() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("records.csv"));
        for (id, age) in [("a", "10"), ("b", "18"), ("c", "40"), ("d", "65"), ("e", "70")] {
            let _ = store.add_patient(patient(id, id, "", "", age, "")).unwrap();
        }

        let hits: Vec<&str> = store
            .search_by_age_range(18, 65)
            .into_iter()
            .map(|p| p.age.as_str())
            .collect();
        assert_eq!(hits, vec!["18", "40", "65"]);
    }

    #[test]
    fn unparseable_age_counts_as_zero_in_range_search() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("records.csv"));
        let _ = store
            .add_patient(patient("x", "Mys", "", "", "unknown", ""))
            .unwrap();

        assert_eq!(store.search_by_age_range(0, 5).len(), 1);
        assert!(store.search_by_age_range(1, 5).is_empty());
    }

    #[test]
    fn update_of_missing_id_performs_no_file_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let mut store = open_store(&path);

        let outcome = store
            .update_patient(patient("404", "Nobody", "", "", "1", ""))
            .unwrap();
        assert_eq!(outcome, MutateOutcome::NotFound);
        assert!(!path.exists());

        let _ = store
            .add_patient(patient("1", "Ann", "Addr", "555", "30", "Flu"))
            .unwrap();
        let before = fs::read_to_string(&path).unwrap();
        let outcome = store
            .update_patient(patient("404", "Nobody", "", "", "1", ""))
            .unwrap();
        assert_eq!(outcome, MutateOutcome::NotFound);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn failed_save_rolls_back_the_in_memory_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let mut store = open_store(&path);
        let ann = patient("1", "Ann", "Addr", "555", "30", "Flu");
        let _ = store.add_patient(ann.clone()).unwrap();

        // Occupy the sibling temp path with a directory so every save from
        // here on fails before the rename.
        fs::create_dir(dir.path().join("records.csv.tmp")).unwrap();

        let err = store
            .add_patient(patient("2", "Bea", "", "", "40", ""))
            .unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.patient(&PatientId::new("2")), None);

        let err = store
            .update_patient(patient("1", "Ann", "Elsewhere", "555", "31", "Flu"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.patient(&PatientId::new("1")), Some(&ann));

        let err = store.delete_patient(&PatientId::new("1")).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.patient(&PatientId::new("1")), Some(&ann));

        // Disk still holds the last successful save.
        let reloaded = open_store(&path);
        assert_eq!(reloaded.patients(), &[ann]);
    }

    #[test]
    fn full_session_scenario() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");

        let mut store = open_store(&path);
        assert!(store.is_empty());

        let outcome = store
            .add_patient(patient("1", "Ann", "Addr", "555", "30", "Flu"))
            .unwrap();
        assert_eq!(outcome, AddOutcome::Added);

        let listed: Vec<&Patient> = store.iter().collect();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, PatientId::new("1"));

        let outcome = store
            .update_patient(patient("1", "Ann", "NewAddr", "555", "31", "Flu"))
            .unwrap();
        assert_eq!(outcome, MutateOutcome::Applied);

        let updated = store.patient(&PatientId::new("1")).unwrap();
        assert_eq!(updated.address, "NewAddr");
        assert_eq!(updated.age.as_str(), "31");
    }

    #[test]
    fn iteration_is_restartable_and_ordered() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir.path().join("records.csv"));
        for id in ["3", "1", "2"] {
            let _ = store.add_patient(patient(id, id, "", "", "20", "")).unwrap();
        }

        let first: Vec<String> = store.iter().map(|p| p.id.to_string()).collect();
        let second: Vec<String> = store.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(first, vec!["3", "1", "2"]);
        assert_eq!(first, second);
    }
}
