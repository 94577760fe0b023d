//! Browser screen renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::browser::state::QuizBrowser;
use crate::ui::{render_controls, render_popup};

use super::list::{render_pagination, render_quiz_list};

pub fn render(frame: &mut Frame, browser: &QuizBrowser) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Search and sort
        Constraint::Min(5),    // Quiz cards
        Constraint::Length(1), // Pagination
        Constraint::Length(1), // Controls
    ])
    .margin(1)
    .split(area);

    render_search_bar(frame, chunks[0], browser);
    render_quiz_list(frame, chunks[1], browser);
    render_pagination(frame, chunks[2], browser.pagination());
    render_controls(
        frame,
        chunks[3],
        "type to search  ·  tab sort  ·  ↑/↓ select  ·  ←/→ page  ·  home/end first/last  ·  del delete  ·  esc quit",
    );

    if let Some(quiz_id) = browser.pending_delete() {
        let title = browser
            .quizzes()
            .iter()
            .find(|q| q.id == quiz_id)
            .map(|q| q.title.clone())
            .unwrap_or_else(|| quiz_id.to_string());
        let hint = if browser.is_deleting() {
            "Deleting..."
        } else {
            "[Y] delete  ·  [N] cancel"
        };
        render_popup(
            frame,
            area,
            "Delete quiz",
            Color::Red,
            vec![
                Line::from("Are you sure you want to delete".fg(Color::White)),
                Line::from(Span::styled(title, Style::default().fg(Color::Yellow).bold())),
                Line::from(""),
                Line::from(hint.fg(Color::DarkGray)),
            ],
        );
    }

    if let Some(notice) = browser.notice() {
        render_popup(
            frame,
            area,
            "Error",
            Color::Red,
            vec![
                Line::from(Span::styled(
                    notice.to_string(),
                    Style::default().fg(Color::Red).bold(),
                )),
                Line::from(""),
                Line::from("[Enter] OK".fg(Color::DarkGray)),
            ],
        );
    }
}

fn render_search_bar(frame: &mut Frame, area: Rect, browser: &QuizBrowser) {
    let mut spans = vec![
        Span::styled("Search: ", Style::default().fg(Color::White)),
        Span::styled(browser.search().to_string(), Style::default().fg(Color::Yellow)),
        Span::styled("_", Style::default().fg(Color::Yellow)),
        Span::raw("    "),
        Span::styled("Sort: ", Style::default().fg(Color::White)),
        Span::styled(browser.sort().label(), Style::default().fg(Color::Cyan)),
    ];
    if browser.is_loading() {
        spans.push(Span::styled("    loading...", Style::default().fg(Color::DarkGray)));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" QUIZZES ")
            .title_style(Style::default().fg(Color::Cyan).bold()),
    );
    frame.render_widget(widget, area);
}
