//! Terminal rendering surface for forms

mod button;
mod driver;
mod field_renderer;
mod focus;

pub use button::{render_submit_button, BUTTON_HEIGHT};
pub use driver::{KeyOutcome, TerminalDriver};
pub use field_renderer::{display_text, draw_field};
pub use focus::FocusRing;

use crate::form::FormOutput;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

/// Draw every field followed by the submit button, one row each
pub fn draw_form(frame: &mut Frame, area: Rect, output: &FormOutput, focus: &FocusRing) {
    let names = focus.field_names();

    let mut constraints: Vec<Constraint> = names
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (index, name) in names.iter().enumerate() {
        if let Some(field) = output.field(name) {
            draw_field(frame, rows[index], name, field, focus.active() == index);
        }
    }

    render_submit_button(
        frame,
        rows[names.len()],
        &output.submit_button,
        focus.is_button_row_active(),
    );
}
