use crate::models::Patient;

/// Scrollable view over the full record set, in the store's insertion/load
/// order. The screen takes its own snapshot so rendering never borrows the
/// store while a modal mutation is in flight.
pub(crate) struct DirectoryScreen {
    pub(crate) patients: Vec<Patient>,
    pub(crate) selected: usize,
}

impl DirectoryScreen {
    pub(crate) fn new(patients: Vec<Patient>) -> Self {
        Self {
            patients,
            selected: 0,
        }
    }

    pub(crate) fn current_patient(&self) -> Option<&Patient> {
        self.patients.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        move_clamped(&mut self.selected, offset, self.patients.len());
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.patients.len().saturating_sub(1);
    }
}

/// Results of an age-range search, kept with the bounds so the title can
/// restate the query.
pub(crate) struct AgeResultsScreen {
    pub(crate) min: u32,
    pub(crate) max: u32,
    pub(crate) patients: Vec<Patient>,
    pub(crate) selected: usize,
}

impl AgeResultsScreen {
    pub(crate) fn new(min: u32, max: u32, patients: Vec<Patient>) -> Self {
        Self {
            min,
            max,
            patients,
            selected: 0,
        }
    }

    pub(crate) fn title(&self) -> String {
        format!("Patients Aged {}-{}", self.min, self.max)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        move_clamped(&mut self.selected, offset, self.patients.len());
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.patients.len().saturating_sub(1);
    }
}

/// Shift a selection index by `offset`, clamping to `0..len`.
fn move_clamped(selected: &mut usize, offset: isize, len: usize) {
    if len == 0 {
        *selected = 0;
        return;
    }
    let max = len as isize - 1;
    let next = (*selected as isize + offset).clamp(0, max);
    *selected = next as usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Age, PatientId};

    fn patients(n: usize) -> Vec<Patient> {
        (0..n)
            .map(|i| Patient {
                id: PatientId::new(i),
                name: format!("p{i}"),
                address: String::new(),
                phone: String::new(),
                age: Age::new("20"),
                health_problem: String::new(),
            })
            .collect()
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut screen = DirectoryScreen::new(patients(3));
        screen.move_selection(-5);
        assert_eq!(screen.selected, 0);
        screen.move_selection(10);
        assert_eq!(screen.selected, 2);
        screen.select_first();
        assert_eq!(screen.selected, 0);
        screen.select_last();
        assert_eq!(screen.selected, 2);
    }

    #[test]
    fn empty_screen_has_no_current_patient() {
        let mut screen = DirectoryScreen::new(Vec::new());
        screen.move_selection(1);
        assert!(screen.current_patient().is_none());
    }
}
