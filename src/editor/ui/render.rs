//! Editor screen renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::editor::state::{EditorForm, NoticeKind};
use crate::ui::{render_controls, render_popup};

use super::card::form_lines;

pub fn render(frame: &mut Frame, form: &EditorForm) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(8),    // Form
        Constraint::Length(1), // Status
        Constraint::Length(1), // Controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], form);
    render_form(frame, chunks[1], form);
    render_status(frame, chunks[2], form);
    render_controls(
        frame,
        chunks[3],
        "tab/arrows move  ·  enter activate  ·  space toggle  ·  ←/→ time  ·  del remove  ·  ctrl+s save  ·  esc quit",
    );

    if let Some(prompt) = form.prompt() {
        render_popup(
            frame,
            area,
            "Attach image",
            Color::Cyan,
            vec![
                Line::from("Path of the image file:".fg(Color::White)),
                Line::from(Span::styled(
                    format!("{}_", prompt.input),
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
                Line::from("[Enter] attach  ·  [Esc] cancel".fg(Color::DarkGray)),
            ],
        );
    }

    if let Some(notice) = form.notice() {
        let (title, color) = match notice.kind {
            NoticeKind::Success => ("Saved", Color::Green),
            NoticeKind::Failure => ("Error", Color::Red),
        };
        render_popup(
            frame,
            area,
            title,
            color,
            vec![
                Line::from(Span::styled(
                    notice.message.clone(),
                    Style::default().fg(color).bold(),
                )),
                Line::from(""),
                Line::from("[Enter] OK".fg(Color::DarkGray)),
            ],
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, form: &EditorForm) {
    let mode = match form.quiz_id() {
        Some(id) => format!("EDIT QUIZ {}", id),
        None => "NEW QUIZ".to_string(),
    };
    let summary = format!("{}  ·  {} question(s)", mode, form.cards().len());

    let widget = Paragraph::new(summary)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(widget, area);
}

fn render_form(frame: &mut Frame, area: Rect, form: &EditorForm) {
    let (lines, focus_line) = form_lines(form);

    // keep the focused line inside the viewport, with some context above it
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = focus_line.saturating_sub(visible.saturating_sub(4));

    let widget = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, form: &EditorForm) {
    let Some(status) = form.status() else {
        return;
    };
    let widget = Paragraph::new(status.to_string())
        .alignment(Alignment::Center)
        .fg(Color::Red);
    frame.render_widget(widget, area);
}
