//! Domain models that mirror the backing CSV columns and get passed
//! throughout the TUI. The intent is that these types stay light-weight data
//! holders so other layers can focus on presentation and persistence logic.
//! The two small wrappers (`PatientId`, `Age`) exist to do their
//! normalization exactly once, at construction, instead of ad hoc at every
//! call site.

use std::fmt;

/// Canonical patient identifier. Callers hand us ids as whatever they have
/// on hand (digits typed into a form, numbers from test fixtures), so the
/// constructor funnels everything through `ToString` and trims it once.
/// After that the id is just an opaque string key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Normalize arbitrary caller input into the canonical string form.
    pub fn new(raw: impl ToString) -> Self {
        Self(raw.to_string().trim().to_string())
    }

    /// The canonical string form, as persisted in the backing file.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An id with no visible characters can never name a record.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A patient's age as entered by the user. The raw text is what persists, so
/// round-trips through the backing file preserve input exactly; the integer
/// interpretation is parsed here, once, and cached for the range query and
/// the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Age {
    raw: String,
    years: Option<u32>,
}

impl Age {
    /// Capture the raw text and parse the integer view. Anything that is not
    /// a valid non-negative integer (including the empty string) yields
    /// `None` for the parsed form.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into().trim().to_string();
        let years = raw.parse::<u32>().ok();
        Self { raw, years }
    }

    /// The text form that gets written to the backing file.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed age, if the raw text was a valid non-negative integer.
    /// Chart computations use this and skip the `None`s.
    pub fn years(&self) -> Option<u32> {
        self.years
    }

    /// The parsed age with unparseable values read as zero. This is the
    /// interpretation the age-range search uses, so records with a garbled
    /// age still match queries that include zero.
    pub fn years_or_zero(&self) -> u32 {
        self.years.unwrap_or(0)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// In-memory representation of one patient record. The struct mirrors one
/// row of the backing file, in its column order.
pub struct Patient {
    /// Unique key within the store. Edit/delete flows bubble this back to
    /// the persistence layer, so we keep it on the record even though list
    /// views mostly show the other fields.
    pub id: PatientId,
    /// Patient's name, free-form.
    pub name: String,
    /// Postal address, free-form.
    pub address: String,
    /// Phone number, kept as raw text so formatting and extensions survive.
    pub phone: String,
    /// Age as entered, with its cached integer interpretation.
    pub age: Age,
    /// Current health problem, free-form. Blank means "not recorded" and is
    /// excluded from the frequency chart.
    pub health_problem: String,
}

impl Patient {
    /// Compose the one-line `id | name | age` rendering that list screens
    /// and search results rely on.
    pub fn summary(&self) -> String {
        let age = if self.age.as_str().is_empty() {
            "?"
        } else {
            self.age.as_str()
        };
        format!("{} | {} | age {}", self.id, self.name, age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_id_normalizes_numbers_and_whitespace() {
        assert_eq!(PatientId::new(42).as_str(), "42");
        assert_eq!(PatientId::new("  7 "), PatientId::new("7"));
        assert!(PatientId::new("   ").is_blank());
    }

    #[test]
    fn age_parses_once_with_zero_fallback() {
        let ok = Age::new("31");
        assert_eq!(ok.years(), Some(31));
        assert_eq!(ok.years_or_zero(), 31);

        let garbled = Age::new("thirty");
        assert_eq!(garbled.as_str(), "thirty");
        assert_eq!(garbled.years(), None);
        assert_eq!(garbled.years_or_zero(), 0);

        let blank = Age::new("");
        assert_eq!(blank.years(), None);
        assert_eq!(blank.years_or_zero(), 0);
    }

    #[test]
    fn age_rejects_negatives() {
        assert_eq!(Age::new("-4").years(), None);
    }
}
