use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
};
use ratatui::Frame;

use crate::charts::{age_histogram, health_problem_frequencies, AgeBucket, ProblemSlice};
use crate::models::Patient;
use crate::store::{AddOutcome, MutateOutcome, RecordStore};

use super::forms::{
    AgeRangeForm, ConfirmDelete, IdPrompt, IdPurpose, PatientField, PatientForm, RangeField,
};
use super::helpers::{centered_rect, patient_detail_lines, patient_row, surface_error};
use super::screens::{AgeResultsScreen, DirectoryScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// The nine menu actions, in the order the original flat-file manager
/// numbered them. Digit keys jump straight to an entry.
const MENU_ITEMS: [&str; 9] = [
    "1. Add Patient",
    "2. Search Patient by ID",
    "3. Display All Patients",
    "4. Update Patient Information",
    "5. Delete Patient Record",
    "6. Search Patients by Age Range",
    "7. Plot Age Distribution",
    "8. Plot Health Problem Distribution",
    "9. Quit",
];

/// High-level navigation states. Keeping this explicit makes it easy to
/// reason about which rendering path runs and what keyboard shortcuts
/// should do.
enum Screen {
    Menu,
    Directory(DirectoryScreen),
    AgeResults(AgeResultsScreen),
    AgeChart(Vec<AgeBucket>),
    ProblemChart(Vec<ProblemSlice>),
}

/// Fine-grained modal flows layered over the current screen.
enum Mode {
    Normal,
    AddingPatient(PatientForm),
    EditingPatient(PatientForm),
    PromptingId(IdPrompt),
    ViewingPatient(Patient),
    ConfirmDelete(ConfirmDelete),
    EnteringAgeRange(AgeRangeForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The store instance is
/// owned here and passed nowhere else; there is no process-wide singleton.
pub struct App {
    store: RecordStore,
    screen: Screen,
    mode: Mode,
    menu_selected: usize,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            screen: Screen::Menu,
            mode: Mode::Normal,
            menu_selected: 0,
            status: None,
        }
    }

    /// Dispatch one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingPatient(form) => self.handle_add_patient(code, form),
            Mode::EditingPatient(form) => self.handle_edit_patient(code, form),
            Mode::PromptingId(prompt) => self.handle_id_prompt(code, prompt),
            Mode::ViewingPatient(patient) => Self::handle_view_patient(code, patient),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::EnteringAgeRange(form) => self.handle_age_range(code, form),
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Menu => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Up => {
                        self.menu_selected = self.menu_selected.saturating_sub(1);
                    }
                    KeyCode::Down => {
                        self.menu_selected = (self.menu_selected + 1).min(MENU_ITEMS.len() - 1);
                    }
                    KeyCode::Char(ch @ '1'..='9') => {
                        let index = ch as usize - '1' as usize;
                        self.menu_selected = index;
                        return self.activate_menu_entry(index, exit);
                    }
                    KeyCode::Enter => {
                        return self.activate_menu_entry(self.menu_selected, exit);
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Directory(ref mut directory) => {
                let mut back_to_menu = false;
                let mut view: Option<Patient> = None;
                let mut edit: Option<Patient> = None;
                let mut delete: Option<Patient> = None;
                let mut missing_selection = false;

                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc => back_to_menu = true,
                    KeyCode::Up => directory.move_selection(-1),
                    KeyCode::Down => directory.move_selection(1),
                    KeyCode::PageUp => directory.move_selection(-5),
                    KeyCode::PageDown => directory.move_selection(5),
                    KeyCode::Home => directory.select_first(),
                    KeyCode::End => directory.select_last(),
                    KeyCode::Enter => view = directory.current_patient().cloned(),
                    KeyCode::Char('e') | KeyCode::Char('E') => {
                        edit = directory.current_patient().cloned();
                        missing_selection = edit.is_none();
                    }
                    KeyCode::Char('-') | KeyCode::Delete => {
                        delete = directory.current_patient().cloned();
                        missing_selection = delete.is_none();
                    }
                    _ => {}
                }

                if back_to_menu {
                    self.screen = Screen::Menu;
                    self.clear_status();
                }
                if missing_selection {
                    self.set_status("No patient selected.", StatusKind::Error);
                }
                if let Some(patient) = view {
                    return Ok(Mode::ViewingPatient(patient));
                }
                if let Some(patient) = edit {
                    self.clear_status();
                    return Ok(Mode::EditingPatient(PatientForm::from_patient(&patient)));
                }
                if let Some(patient) = delete {
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(ConfirmDelete::from(patient)));
                }
                Ok(Mode::Normal)
            }
            Screen::AgeResults(ref mut results) => {
                let mut back_to_menu = false;
                let mut view: Option<Patient> = None;

                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc => back_to_menu = true,
                    KeyCode::Up => results.move_selection(-1),
                    KeyCode::Down => results.move_selection(1),
                    KeyCode::PageUp => results.move_selection(-5),
                    KeyCode::PageDown => results.move_selection(5),
                    KeyCode::Home => results.select_first(),
                    KeyCode::End => results.select_last(),
                    KeyCode::Enter => view = results.patients.get(results.selected).cloned(),
                    _ => {}
                }

                if back_to_menu {
                    self.screen = Screen::Menu;
                    self.clear_status();
                }
                if let Some(patient) = view {
                    return Ok(Mode::ViewingPatient(patient));
                }
                Ok(Mode::Normal)
            }
            Screen::AgeChart(_) | Screen::ProblemChart(_) => {
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
                        self.screen = Screen::Menu;
                        self.clear_status();
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn activate_menu_entry(&mut self, index: usize, exit: &mut bool) -> Result<Mode> {
        self.clear_status();
        match index {
            0 => return Ok(Mode::AddingPatient(PatientForm::default())),
            1 => return Ok(Mode::PromptingId(IdPrompt::new(IdPurpose::Search))),
            2 => {
                self.screen = Screen::Directory(DirectoryScreen::new(
                    self.store.patients().to_vec(),
                ));
            }
            3 => return Ok(Mode::PromptingId(IdPrompt::new(IdPurpose::Update))),
            4 => return Ok(Mode::PromptingId(IdPrompt::new(IdPurpose::Delete))),
            5 => return Ok(Mode::EnteringAgeRange(AgeRangeForm::default())),
            6 => {
                let buckets = age_histogram(self.store.iter());
                if buckets.is_empty() {
                    self.set_status("No numeric ages recorded to chart.", StatusKind::Error);
                } else {
                    self.screen = Screen::AgeChart(buckets);
                }
            }
            7 => {
                let slices = health_problem_frequencies(self.store.iter());
                if slices.is_empty() {
                    self.set_status("No health problems recorded to chart.", StatusKind::Error);
                } else {
                    self.screen = Screen::ProblemChart(slices);
                }
            }
            _ => *exit = true,
        }
        Ok(Mode::Normal)
    }

    fn handle_add_patient(&mut self, code: KeyCode, mut form: PatientForm) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(patient) => {
                    let shown = display_name(&patient);
                    match self.store.add_patient(patient.clone()) {
                        Ok(AddOutcome::Added) => {
                            self.set_status(
                                format!("Patient {shown} added."),
                                StatusKind::Info,
                            );
                            return Mode::Normal;
                        }
                        Ok(AddOutcome::DuplicateId) => {
                            form.error = Some(format!(
                                "Patient with ID {} already exists.",
                                patient.id
                            ));
                        }
                        Err(err) => form.error = Some(err.to_string()),
                    }
                }
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingPatient(form)
    }

    fn handle_edit_patient(&mut self, code: KeyCode, mut form: PatientForm) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(patient) => {
                    let shown = display_name(&patient);
                    match self.store.update_patient(patient.clone()) {
                        Ok(MutateOutcome::Applied) => {
                            self.refresh_directory();
                            self.set_status(
                                format!("Patient {shown} information updated."),
                                StatusKind::Info,
                            );
                            return Mode::Normal;
                        }
                        Ok(MutateOutcome::NotFound) => {
                            form.error =
                                Some(format!("Patient with ID {} not found.", patient.id));
                        }
                        Err(err) => form.error = Some(err.to_string()),
                    }
                }
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::EditingPatient(form)
    }

    fn handle_id_prompt(&mut self, code: KeyCode, mut prompt: IdPrompt) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Enter => match prompt.parse_input() {
                Ok(id) => match self.store.patient(&id) {
                    Some(patient) => {
                        let patient = patient.clone();
                        return match prompt.purpose {
                            IdPurpose::Search => Mode::ViewingPatient(patient),
                            IdPurpose::Update => {
                                Mode::EditingPatient(PatientForm::from_patient(&patient))
                            }
                            IdPurpose::Delete => {
                                Mode::ConfirmDelete(ConfirmDelete::from(patient))
                            }
                        };
                    }
                    None => prompt.error = Some(format!("Patient with ID {id} not found.")),
                },
                Err(err) => prompt.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                if prompt.push_char(ch) {
                    prompt.error = None;
                }
            }
            _ => {}
        }
        Mode::PromptingId(prompt)
    }

    fn handle_view_patient(code: KeyCode, patient: Patient) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Enter => Mode::Normal,
            _ => Mode::ViewingPatient(patient),
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Mode {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let id = confirm.patient.id.clone();
                match self.store.delete_patient(&id) {
                    Ok(MutateOutcome::Applied) => {
                        self.refresh_directory();
                        self.set_status(
                            format!("Patient with ID {id} deleted."),
                            StatusKind::Info,
                        );
                    }
                    Ok(MutateOutcome::NotFound) => {
                        self.set_status(
                            format!("Patient with ID {id} not found."),
                            StatusKind::Error,
                        );
                    }
                    Err(err) => self.set_status(err.to_string(), StatusKind::Error),
                }
                Mode::Normal
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Mode::Normal,
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn handle_age_range(&mut self, code: KeyCode, mut form: AgeRangeForm) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok((min, max)) => {
                    let matches: Vec<Patient> = self
                        .store
                        .search_by_age_range(min, max)
                        .into_iter()
                        .cloned()
                        .collect();
                    self.screen = Screen::AgeResults(AgeResultsScreen::new(min, max, matches));
                    return Mode::Normal;
                }
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::EnteringAgeRange(form)
    }

    /// Rebuild the directory snapshot after a mutation so an open list does
    /// not keep showing a deleted record.
    fn refresh_directory(&mut self) {
        if let Screen::Directory(ref mut directory) = self.screen {
            let selected = directory.selected;
            *directory = DirectoryScreen::new(self.store.patients().to_vec());
            directory.selected = selected.min(directory.patients.len().saturating_sub(1));
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    // Rendering -----------------------------------------------------------

    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
            .split(frame.area());
        let body = chunks[0];

        match self.screen {
            Screen::Menu => self.draw_menu(frame, body),
            Screen::Directory(ref directory) => Self::draw_directory(frame, body, directory),
            Screen::AgeResults(ref results) => Self::draw_age_results(frame, body, results),
            Screen::AgeChart(ref buckets) => Self::draw_age_chart(frame, body, buckets),
            Screen::ProblemChart(ref slices) => Self::draw_problem_chart(frame, body, slices),
        }

        match self.mode {
            Mode::Normal => {}
            Mode::AddingPatient(ref form) => {
                Self::draw_patient_form(frame, body, form, "Add Patient");
            }
            Mode::EditingPatient(ref form) => {
                Self::draw_patient_form(frame, body, form, "Update Patient");
            }
            Mode::PromptingId(ref prompt) => Self::draw_id_prompt(frame, body, prompt),
            Mode::ViewingPatient(ref patient) => Self::draw_patient_detail(frame, body, patient),
            Mode::ConfirmDelete(ref confirm) => Self::draw_confirm_delete(frame, body, confirm),
            Mode::EnteringAgeRange(ref form) => Self::draw_age_range_form(frame, body, form),
        }

        self.draw_footer(frame, chunks[1]);
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Patient Records")
            .title_alignment(Alignment::Center);
        let inner = centered_rect(60, 70, block.inner(area));
        frame.render_widget(block, area);

        let items: Vec<ListItem> = MENU_ITEMS
            .iter()
            .map(|item| ListItem::new(*item))
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.menu_selected));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn draw_directory(frame: &mut Frame, area: Rect, directory: &DirectoryScreen) {
        let title = format!("All Patients ({})", directory.patients.len());
        let block = Block::default().borders(Borders::ALL).title(title);

        if directory.patients.is_empty() {
            let message = Paragraph::new("No patient records yet. Add one from the menu.")
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = directory
            .patients
            .iter()
            .map(|patient| ListItem::new(patient_row(patient)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(directory.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_age_results(frame: &mut Frame, area: Rect, results: &AgeResultsScreen) {
        let block = Block::default().borders(Borders::ALL).title(results.title());

        if results.patients.is_empty() {
            let message = Paragraph::new("No patients found in the specified age range.")
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = results
            .patients
            .iter()
            .map(|patient| ListItem::new(patient.summary()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(results.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_age_chart(frame: &mut Frame, area: Rect, buckets: &[AgeBucket]) {
        let bars: Vec<Bar> = buckets
            .iter()
            .map(|bucket| {
                Bar::default()
                    .value(bucket.count)
                    .label(Line::from(bucket.label()))
            })
            .collect();
        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Age Distribution of Patients"),
            )
            .bar_width(7)
            .bar_gap(2)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, area);
    }

    fn draw_problem_chart(frame: &mut Frame, area: Rect, slices: &[ProblemSlice]) {
        let bars: Vec<Bar> = slices
            .iter()
            .map(|slice| {
                Bar::default()
                    .value(slice.count)
                    .label(Line::from(slice.label.clone()))
                    .text_value(format!("{} ({:.1}%)", slice.count, slice.percent))
            })
            .collect();
        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Health Problems Distribution of Patients"),
            )
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Magenta))
            .value_style(Style::default().fg(Color::Black).bg(Color::Magenta))
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, area);
    }

    fn draw_patient_form(frame: &mut Frame, area: Rect, form: &PatientForm, title: &str) {
        let popup = centered_rect(55, 60, area);
        frame.render_widget(Clear, popup);

        let mut lines: Vec<Line> = PatientField::ORDER
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Tab: next field   Enter: save   Esc: cancel",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, popup);

        let (row, prefix, value) = form.cursor_hint();
        frame.set_cursor_position((
            popup.x + 1 + (prefix + value) as u16,
            popup.y + 1 + row as u16,
        ));
    }

    fn draw_id_prompt(frame: &mut Frame, area: Rect, prompt: &IdPrompt) {
        let popup = centered_rect(40, 25, area);
        frame.render_widget(Clear, popup);

        let value = if prompt.value.is_empty() {
            Span::styled("<required>", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(prompt.value.clone(), Style::default().fg(Color::Yellow))
        };
        let mut lines = vec![Line::from(vec![Span::raw("Patient ID: "), value])];
        lines.push(Line::from(""));
        if let Some(error) = &prompt.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter: continue   Esc: cancel",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let widget = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(prompt.purpose.title()),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, popup);

        let prefix = "Patient ID: ".chars().count();
        frame.set_cursor_position((
            popup.x + 1 + (prefix + prompt.value.chars().count()) as u16,
            popup.y + 1,
        ));
    }

    fn draw_patient_detail(frame: &mut Frame, area: Rect, patient: &Patient) {
        let popup = centered_rect(50, 50, area);
        frame.render_widget(Clear, popup);

        let mut lines = patient_detail_lines(patient);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        let widget = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Patient Information"),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, popup);
    }

    fn draw_confirm_delete(frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup = centered_rect(50, 50, area);
        frame.render_widget(Clear, popup);

        let mut lines = vec![
            Line::from("Delete this patient record? This cannot be undone."),
            Line::from(""),
        ];
        lines.extend(patient_detail_lines(&confirm.patient));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter/Y: delete   Esc/N: cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let widget = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm Deletion")
                    .style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, popup);
    }

    fn draw_age_range_form(frame: &mut Frame, area: Rect, form: &AgeRangeForm) {
        let popup = centered_rect(40, 30, area);
        frame.render_widget(Clear, popup);

        let mut lines = vec![
            form.build_line("Minimum age", RangeField::Min),
            form.build_line("Maximum age", RangeField::Max),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Tab: switch field   Enter: search   Esc: cancel",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let widget = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Search by Age Range"),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, popup);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(status) = &self.status {
            Line::from(Span::styled(status.text.clone(), status.kind.style()))
        } else {
            let hint = match (&self.mode, &self.screen) {
                (Mode::Normal, Screen::Menu) => {
                    "Up/Down or 1-9 to choose, Enter to run, q to quit"
                }
                (Mode::Normal, Screen::Directory(_)) => {
                    "Up/Down scroll, Enter details, e edit, - delete, Esc menu, q quit"
                }
                (Mode::Normal, Screen::AgeResults(_)) => {
                    "Up/Down to scroll, Enter for details, Esc for menu, q to quit"
                }
                (Mode::Normal, _) => "Esc for menu, q to quit",
                _ => "",
            };
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
        };

        let footer = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Left);
        frame.render_widget(footer, area);
    }
}

/// Prefer the name for status messages, falling back to the id when the
/// name was left blank.
fn display_name(patient: &Patient) -> String {
    if patient.name.trim().is_empty() {
        format!("with ID {}", patient.id)
    } else {
        patient.name.clone()
    }
}
