//! Field rendering for terminal forms

use crate::form::{DisplayProps, FieldBinding};
use crate::state::TextKind;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MASK_CHAR: char = '•';

/// Text shown inside the field box
pub fn display_text(field: &FieldBinding, is_active: bool) -> String {
    match &field.props.display {
        DisplayProps::Checkbox { checked, .. } => {
            if *checked {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            }
        }
        DisplayProps::Text { value, .. } | DisplayProps::Select { value }
            if value.is_empty() && !is_active =>
        {
            "(empty)".to_string()
        }
        DisplayProps::Text {
            kind: TextKind::Password,
            value,
        } => value.chars().map(|_| MASK_CHAR).collect(),
        DisplayProps::Text { value, .. } => value.clone(),
        DisplayProps::Select { value } => format!("< {value} >"),
    }
}

fn border_color(field: &FieldBinding, is_active: bool) -> Color {
    if is_active {
        Color::Cyan
    } else if field.is_touched && !field.is_valid {
        Color::Red
    } else {
        Color::DarkGray
    }
}

/// Draw one bound field
pub fn draw_field(frame: &mut Frame, area: Rect, label: &str, field: &FieldBinding, is_active: bool) {
    let border_style = Style::default().fg(border_color(field, is_active));
    let text_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let takes_text = matches!(field.props.display, DisplayProps::Text { .. });
    let cursor = if is_active && takes_text { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_text(field, is_active), text_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let title = if field.is_touched && !field.is_valid {
        format!(" {label} (invalid) ")
    } else {
        format!(" {label} ")
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.block(block), area);
}
