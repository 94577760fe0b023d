//! Rendering helpers shared by the editor and the browser screens.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

/// Style of a control, highlighted when it has focus.
pub fn control_style(focused: bool, base: Style) -> Style {
    if focused {
        base.fg(Color::Yellow).bold()
    } else {
        base
    }
}

/// `[label]` button span.
pub fn button<'a>(label: &str, focused: bool, base: Style) -> Span<'a> {
    let marker = if focused { ">" } else { " " };
    Span::styled(format!("{}[{}]", marker, label), control_style(focused, base))
}

/// A `width`% by `height`-rows rectangle centered in `area`.
pub fn centered_rect(area: Rect, width_percent: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .split(vertical[1])[1]
}

/// Modal box drawn over whatever is below it.
pub fn render_popup(frame: &mut Frame, area: Rect, title: &str, color: Color, lines: Vec<Line>) {
    let height = lines.len() as u16 + 4;
    let popup = centered_rect(area, 60, height);

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(color).bold())
                .padding(Padding::uniform(1)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}

/// Bottom line listing key bindings.
pub fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
