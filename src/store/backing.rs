//! The backing file: a CSV table with a fixed header, rewritten in full on
//! every mutation. Columns are located by header name on read, so a
//! hand-reordered file still loads, and rows shorter than the header read
//! their missing cells as empty strings rather than failing the load.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use csv::{ReaderBuilder, StringRecord, Writer};
use directories::BaseDirs;

use super::StoreError;
use crate::models::{Age, Patient, PatientId};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".patient-records-manager";
/// CSV file name stored inside the application data directory.
const STORE_FILE_NAME: &str = "patient_records.csv";

/// Column order of the backing file. Several code paths (header writing,
/// column lookup, tests) rely on the exact same strings.
pub(crate) const COLUMNS: [&str; 6] = [
    "PatientID",
    "Name",
    "Address",
    "Phone Number",
    "Age",
    "Health Problem",
];

/// Resolve the absolute path of the backing file inside the user's home.
/// Tests and alternate front ends can bypass this and hand
/// [`super::RecordStore::open`] any path they like.
pub fn default_store_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs
        .home_dir()
        .join(DATA_DIR_NAME)
        .join(STORE_FILE_NAME))
}

/// Read every record from the backing file, keyed and deduplicated by
/// normalized `PatientID`. A missing file yields an empty list; rows with a
/// blank id are skipped; a later row with a duplicate id replaces the
/// earlier one, matching a mapping built row by row.
pub fn load_records(path: &Path) -> Result<Vec<Patient>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(StoreError::read(path, csv::Error::from(err))),
    };

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|err| StoreError::read(path, err))?
        .clone();
    let column = |name: &str| headers.iter().position(|header| header == name);
    let columns: Vec<Option<usize>> = COLUMNS.iter().map(|name| column(name)).collect();

    let mut records: Vec<Patient> = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| StoreError::read(path, err))?;
        let cell = |slot: usize| field(&row, columns[slot]);

        let id = PatientId::new(cell(0));
        if id.is_blank() {
            continue;
        }
        let patient = Patient {
            id,
            name: cell(1),
            address: cell(2),
            phone: cell(3),
            age: Age::new(cell(4)),
            health_problem: cell(5),
        };

        match records.iter().position(|known| known.id == patient.id) {
            Some(pos) => records[pos] = patient,
            None => records.push(patient),
        }
    }

    Ok(records)
}

/// Rewrite the backing file with the given records, header first, in the
/// fixed column order. The rows land in a sibling temporary file that is
/// renamed over the target, so an interrupted write leaves either the old
/// contents or the new ones, never a torn file. No fsync happens; that is a
/// known weakness of this store, not an oversight.
pub fn save_records(path: &Path, records: &[Patient]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| StoreError::write_io(path, err))?;
        }
    }

    let tmp_path = sibling_tmp_path(path);
    let mut writer = Writer::from_path(&tmp_path).map_err(|err| StoreError::write(path, err))?;

    writer
        .write_record(COLUMNS)
        .map_err(|err| StoreError::write(path, err))?;
    for patient in records {
        writer
            .write_record([
                patient.id.as_str(),
                patient.name.as_str(),
                patient.address.as_str(),
                patient.phone.as_str(),
                patient.age.as_str(),
                patient.health_problem.as_str(),
            ])
            .map_err(|err| StoreError::write(path, err))?;
    }
    writer
        .flush()
        .map_err(|err| StoreError::write_io(path, err))?;
    drop(writer);

    fs::rename(&tmp_path, path).map_err(|err| StoreError::write_io(path, err))
}

fn sibling_tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn field(row: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|index| row.get(index))
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn patient(id: &str, name: &str, age: &str) -> Patient {
        Patient {
            id: PatientId::new(id),
            name: name.to_string(),
            address: String::new(),
            phone: String::new(),
            age: Age::new(age),
            health_problem: String::new(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert!(load_records(&path).unwrap().is_empty());
    }

    #[test]
    fn short_rows_read_missing_cells_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        fs::write(
            &path,
            "PatientID,Name,Address,Phone Number,Age,Health Problem\n3,Cal\n",
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Cal");
        assert_eq!(records[0].address, "");
        assert_eq!(records[0].age.as_str(), "");
    }

    #[test]
    fn blank_id_rows_are_skipped_and_last_duplicate_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        fs::write(
            &path,
            "PatientID,Name,Address,Phone Number,Age,Health Problem\n\
             ,Ghost,,,12,\n\
             4,Old Name,,,30,\n\
             4,New Name,,,31,\n",
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "New Name");
        assert_eq!(records[0].age.years(), Some(31));
    }

    #[test]
    fn save_quotes_fields_containing_the_delimiter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let mut record = patient("9", "Doe, Jane", "44");
        record.address = "1 Main St, Apt 2".to_string();
        save_records(&path, &[record.clone()]).unwrap();

        let reloaded = load_records(&path).unwrap();
        assert_eq!(reloaded, vec![record]);
    }

    #[test]
    fn save_leaves_no_temporary_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        save_records(&path, &[patient("1", "Ann", "30")]).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![OsString::from("records.csv")]);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deep").join("records.csv");
        save_records(&path, &[]).unwrap();
        assert!(path.exists());
    }
}
