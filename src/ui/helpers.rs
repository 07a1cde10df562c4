use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;

use crate::models::Patient;

/// Produce a rectangle centered within `area` that spans the requested
/// percent of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Field-per-line rendering of one record, shared by the detail popup and
/// the delete confirmation.
pub(crate) fn patient_detail_lines(patient: &Patient) -> Vec<Line<'static>> {
    let shown = |value: &str| {
        if value.trim().is_empty() {
            "N/A".to_string()
        } else {
            value.to_string()
        }
    };
    vec![
        Line::from(format!("Patient ID: {}", patient.id)),
        Line::from(format!("Name: {}", shown(&patient.name))),
        Line::from(format!("Address: {}", shown(&patient.address))),
        Line::from(format!("Phone Number: {}", shown(&patient.phone))),
        Line::from(format!("Age: {}", shown(patient.age.as_str()))),
        Line::from(format!(
            "Health Problem: {}",
            shown(&patient.health_problem)
        )),
    ]
}

/// Single-row rendering used by the directory list: every column on one
/// line, with blank fields shown as "N/A" like the detail popup.
pub(crate) fn patient_row(patient: &Patient) -> String {
    let shown = |value: &str| {
        if value.trim().is_empty() {
            "N/A".to_string()
        } else {
            value.to_string()
        }
    };
    format!(
        "{} | {} | {} | {} | age {} | {}",
        patient.id,
        shown(&patient.name),
        shown(&patient.address),
        shown(&patient.phone),
        shown(patient.age.as_str()),
        shown(&patient.health_problem),
    )
}
