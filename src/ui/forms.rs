use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Age, Patient, PatientId};

/// Internal representation of the six-field patient form used by both the
/// add and update flows. Update locks the id field, since the id is the key
/// the record was looked up under.
#[derive(Default, Clone)]
pub(crate) struct PatientForm {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) address: String,
    pub(crate) phone: String,
    pub(crate) age: String,
    pub(crate) health_problem: String,
    pub(crate) active: PatientField,
    pub(crate) error: Option<String>,
    id_locked: bool,
}

/// Fields available within the patient form, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum PatientField {
    #[default]
    Id,
    Name,
    Address,
    Phone,
    Age,
    HealthProblem,
}

impl PatientField {
    /// Display order of the form, reused by the renderer and by cursor
    /// placement.
    pub(crate) const ORDER: [PatientField; 6] = [
        PatientField::Id,
        PatientField::Name,
        PatientField::Address,
        PatientField::Phone,
        PatientField::Age,
        PatientField::HealthProblem,
    ];

    pub(crate) fn title(self) -> &'static str {
        match self {
            PatientField::Id => "Patient ID",
            PatientField::Name => "Name",
            PatientField::Address => "Address",
            PatientField::Phone => "Phone Number",
            PatientField::Age => "Age",
            PatientField::HealthProblem => "Health Problem",
        }
    }
}

impl PatientForm {
    /// Populate the form from an existing record when entering edit mode.
    /// The id field is locked; updates replace the record under its key.
    pub(crate) fn from_patient(patient: &Patient) -> Self {
        Self {
            id: patient.id.to_string(),
            name: patient.name.clone(),
            address: patient.address.clone(),
            phone: patient.phone.clone(),
            age: patient.age.as_str().to_string(),
            health_problem: patient.health_problem.clone(),
            active: PatientField::Name,
            error: None,
            id_locked: true,
        }
    }

    /// Move focus to the next editable field, wrapping at the end.
    pub(crate) fn next_field(&mut self) {
        self.active = self.neighbor(1);
    }

    /// Move focus to the previous editable field, wrapping at the start.
    pub(crate) fn previous_field(&mut self) {
        self.active = self.neighbor(PatientField::ORDER.len() - 1);
    }

    fn neighbor(&self, step: usize) -> PatientField {
        let order = PatientField::ORDER;
        let mut index = order
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0);
        loop {
            index = (index + step) % order.len();
            if !(self.id_locked && order[index] == PatientField::Id) {
                return order[index];
            }
        }
    }

    /// Append a character to the active field, validating allowed input.
    /// The age field only accepts digits so the stored interpretation stays
    /// numeric for anything entered through this UI.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            PatientField::Id => {
                if self.id_locked {
                    return false;
                }
                self.id.push(ch);
            }
            PatientField::Name => self.name.push(ch),
            PatientField::Address => self.address.push(ch),
            PatientField::Phone => self.phone.push(ch),
            PatientField::Age => {
                if !ch.is_ascii_digit() {
                    return false;
                }
                self.age.push(ch);
            }
            PatientField::HealthProblem => self.health_problem.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            PatientField::Id => {
                if !self.id_locked {
                    self.id.pop();
                }
            }
            PatientField::Name => {
                self.name.pop();
            }
            PatientField::Address => {
                self.address.pop();
            }
            PatientField::Phone => {
                self.phone.pop();
            }
            PatientField::Age => {
                self.age.pop();
            }
            PatientField::HealthProblem => {
                self.health_problem.pop();
            }
        }
    }

    /// Validate the inputs and build the record ready for the store. Only
    /// the id is required; everything else mirrors the free-form columns of
    /// the backing file.
    pub(crate) fn parse_inputs(&self) -> Result<Patient> {
        let id = PatientId::new(&self.id);
        if id.is_blank() {
            return Err(anyhow!("Patient ID is required."));
        }
        Ok(Patient {
            id,
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
            age: Age::new(self.age.as_str()),
            health_problem: self.health_problem.trim().to_string(),
        })
    }

    fn value(&self, field: PatientField) -> &str {
        match field {
            PatientField::Id => &self.id,
            PatientField::Name => &self.name,
            PatientField::Address => &self.address,
            PatientField::Phone => &self.phone,
            PatientField::Age => &self.age,
            PatientField::HealthProblem => &self.health_problem,
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: PatientField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let placeholder = match field {
            PatientField::Id => "<required>",
            _ => "<optional>",
        };
        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if field == PatientField::Id && self.id_locked {
            Style::default().fg(Color::DarkGray)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.title())),
            Span::styled(display, style),
        ])
    }

    /// Cursor column data for the active field: (row within the form,
    /// label-prefix width, value width).
    pub(crate) fn cursor_hint(&self) -> (usize, usize, usize) {
        let row = PatientField::ORDER
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0);
        let prefix = self.active.title().chars().count() + 2;
        let value = self.value(self.active).chars().count();
        (row, prefix, value)
    }
}

/// What the id the user is typing will be used for once submitted.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum IdPurpose {
    Search,
    Update,
    Delete,
}

impl IdPurpose {
    pub(crate) fn title(self) -> &'static str {
        match self {
            IdPurpose::Search => "Search Patient",
            IdPurpose::Update => "Update Patient",
            IdPurpose::Delete => "Delete Patient",
        }
    }
}

/// Single-field prompt asking for a patient id before a lookup-driven flow.
pub(crate) struct IdPrompt {
    pub(crate) purpose: IdPurpose,
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl IdPrompt {
    pub(crate) fn new(purpose: IdPurpose) -> Self {
        Self {
            purpose,
            value: String::new(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    /// Normalize the typed id, rejecting blank input.
    pub(crate) fn parse_input(&self) -> Result<PatientId> {
        let id = PatientId::new(&self.value);
        if id.is_blank() {
            Err(anyhow!("Patient ID is required."))
        } else {
            Ok(id)
        }
    }
}

/// Fields of the age-range prompt.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum RangeField {
    #[default]
    Min,
    Max,
}

/// Two-field prompt for the inclusive age-range search. Only digits are
/// accepted, so the bounds always parse once non-empty.
#[derive(Default)]
pub(crate) struct AgeRangeForm {
    pub(crate) min: String,
    pub(crate) max: String,
    pub(crate) active: RangeField,
    pub(crate) error: Option<String>,
}

impl AgeRangeForm {
    /// Swap focus between the two bound fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            RangeField::Min => RangeField::Max,
            RangeField::Max => RangeField::Min,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if !ch.is_ascii_digit() {
            return false;
        }
        match self.active {
            RangeField::Min => self.min.push(ch),
            RangeField::Max => self.max.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            RangeField::Min => {
                self.min.pop();
            }
            RangeField::Max => {
                self.max.pop();
            }
        }
    }

    /// Validate the bounds. Both are required; an inverted range is allowed
    /// and simply matches nothing, like any other empty result.
    pub(crate) fn parse_inputs(&self) -> Result<(u32, u32)> {
        let min = self
            .min
            .trim()
            .parse::<u32>()
            .map_err(|_| anyhow!("Minimum age is required."))?;
        let max = self
            .max
            .trim()
            .parse::<u32>()
            .map_err(|_| anyhow!("Maximum age is required."))?;
        Ok((min, max))
    }

    /// Render a styled line for one of the bound fields.
    pub(crate) fn build_line(&self, field_name: &str, field: RangeField) -> Line<'static> {
        let (value, is_active) = match field {
            RangeField::Min => (&self.min, self.active == RangeField::Min),
            RangeField::Max => (&self.max, self.active == RangeField::Max),
        };

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }
}

/// State for confirming the permanent deletion of a record.
pub(crate) struct ConfirmDelete {
    pub(crate) patient: Patient,
}

impl ConfirmDelete {
    pub(crate) fn from(patient: Patient) -> Self {
        Self { patient }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_form_requires_an_id() {
        let form = PatientForm::default();
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn edit_form_locks_the_id_field() {
        let record = Patient {
            id: PatientId::new("9"),
            name: "Ann".to_string(),
            address: String::new(),
            phone: String::new(),
            age: Age::new("30"),
            health_problem: String::new(),
        };
        let mut form = PatientForm::from_patient(&record);

        // Cycling through every field must never land on the locked id.
        for _ in 0..PatientField::ORDER.len() * 2 {
            assert_ne!(form.active, PatientField::Id);
            form.next_field();
        }
        assert_eq!(form.parse_inputs().unwrap().id, record.id);
    }

    #[test]
    fn age_field_accepts_digits_only() {
        let mut form = PatientForm::default();
        form.active = PatientField::Age;
        assert!(form.push_char('3'));
        assert!(!form.push_char('x'));
        assert_eq!(form.age, "3");
    }

    #[test]
    fn age_range_form_requires_both_bounds() {
        let mut form = AgeRangeForm::default();
        assert!(form.parse_inputs().is_err());
        form.min = "18".to_string();
        form.max = "65".to_string();
        assert_eq!(form.parse_inputs().unwrap(), (18, 65));
    }
}
