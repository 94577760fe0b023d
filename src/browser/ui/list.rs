//! Quiz cards and pagination bar.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::browser::pagination::{PageControl, Pagination};
use crate::browser::state::QuizBrowser;
use crate::models::QuizSummary;

const CARD_HEIGHT: u16 = 5;

pub fn render_quiz_list(frame: &mut Frame, area: Rect, browser: &QuizBrowser) {
    let quizzes = browser.quizzes();

    if quizzes.is_empty() {
        let text = if browser.is_loading() {
            "Loading quizzes..."
        } else {
            "No quizzes found."
        };
        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
        frame.render_widget(widget, area);
        return;
    }

    let per_screen = usize::from((area.height / CARD_HEIGHT).max(1));
    let first = browser
        .selected_index()
        .saturating_sub(per_screen.saturating_sub(1));

    let constraints = vec![Constraint::Length(CARD_HEIGHT); per_screen];
    let slots = Layout::vertical(constraints).split(area);

    for (slot, (index, quiz)) in slots
        .iter()
        .zip(quizzes.iter().enumerate().skip(first))
    {
        render_quiz_card(frame, *slot, quiz, index == browser.selected_index());
    }
}

fn render_quiz_card(frame: &mut Frame, area: Rect, quiz: &QuizSummary, selected: bool) {
    let border = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut links = vec![Span::styled(
        format!("view {}", quiz.view_path()),
        Style::default().fg(Color::Gray),
    )];
    if let Some(edit) = quiz.edit_path() {
        links.push(Span::raw("  ·  "));
        links.push(Span::styled(
            format!("edit {}", edit),
            Style::default().fg(Color::Gray),
        ));
        links.push(Span::raw("  ·  "));
        links.push(Span::styled("[del] delete", Style::default().fg(Color::Red)));
    }

    let content = vec![
        Line::from(vec![
            Span::styled("by ", Style::default().fg(Color::DarkGray)),
            Span::styled(quiz.author.clone(), Style::default().fg(Color::Green)),
            Span::styled(
                format!("  ·  {} question(s)", quiz.questions),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(links),
    ];

    let widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", quiz.title))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

pub fn render_pagination(frame: &mut Frame, area: Rect, pagination: Pagination) {
    let mut spans = Vec::new();

    for control in PageControl::ALL {
        if control == PageControl::Next {
            spans.push(Span::styled(
                format!(" {} ", pagination.label()),
                Style::default().fg(Color::White).bold(),
            ));
        }
        spans.push(Span::raw(" "));
        spans.push(control_span(pagination, control));
    }

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn control_span(pagination: Pagination, control: PageControl) -> Span<'static> {
    let style = if pagination.is_enabled(control) {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("[{}]", control.label()), style)
}
