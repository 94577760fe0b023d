//! Line layout of the editor form.

use ratatui::prelude::*;

use crate::editor::state::{Control, EditorForm};
use crate::models::{QuestionCard, TextField, TIME_LIMIT_MAX, TIME_LIMIT_MIN};
use crate::ui::{button, control_style};

const SLIDER_WIDTH: usize = 26;

/// The whole form as lines, plus the index of the line holding the focus.
pub fn form_lines(form: &EditorForm) -> (Vec<Line<'static>>, usize) {
    let focused = form.focused();
    let mut lines = Vec::new();
    let mut focus_line = 0;

    let mut mark = |lines: &Vec<Line<'static>>, controls: &[Control]| {
        if controls.contains(&focused) {
            focus_line = lines.len();
        }
    };

    mark(&lines, &[Control::Title]);
    lines.push(Line::from(vec![
        Span::styled("Quiz title: ", Style::default().fg(Color::Cyan).bold()),
        field_span(form.title(), "Quiz title", focused == Control::Title),
    ]));
    lines.push(Line::from(""));

    let can_delete_question = form.can_delete_question();
    for (index, card) in form.cards().iter().enumerate() {
        // header
        let mut header = vec![Span::styled(
            format!("Question {}", index + 1),
            Style::default().fg(Color::Cyan).bold(),
        )];
        if can_delete_question {
            let control = Control::RemoveQuestion(card.id);
            mark(&lines, &[control]);
            header.push(Span::raw("  "));
            header.push(button(
                "delete question",
                focused == control,
                Style::default().fg(Color::Red),
            ));
        }
        lines.push(Line::from(header));

        // image
        let choose = Control::ChooseImage(card.id);
        let remove = Control::RemoveImage(card.id);
        mark(&lines, &[choose, remove]);
        let mut image_line = vec![Span::raw("  ")];
        let label = if card.image.has_image() {
            "change image"
        } else {
            "attach image"
        };
        image_line.push(button(label, focused == choose, Style::default().fg(Color::Gray)));
        if card.image.has_image() {
            image_line.push(Span::raw(" "));
            image_line.push(button(
                "remove image",
                focused == remove,
                Style::default().fg(Color::Red),
            ));
        }
        lines.push(Line::from(image_line));
        if focused == choose || focused == remove {
            lines.push(preview_line(card));
        }

        // content
        let content = Control::QuestionContent(card.id);
        mark(&lines, &[content]);
        lines.push(Line::from(vec![
            Span::styled("  Question: ", Style::default().fg(Color::White)),
            field_span(&card.content, "Question text", focused == content),
        ]));

        // answers
        let can_delete_answer = card.can_delete_answer();
        for row in &card.answers {
            let correct = Control::Correct(card.id, row.id);
            let text = Control::AnswerContent(card.id, row.id);
            let delete = Control::RemoveAnswer(card.id, row.id);
            mark(&lines, &[correct, text, delete]);

            let box_style = if row.correctness_error {
                Style::default().fg(Color::Red)
            } else if row.is_highlighted() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            let checkbox = if row.is_correct { "[x]" } else { "[ ]" };
            let marker = if focused == correct { ">" } else { " " };

            let mut spans = vec![
                Span::raw("   "),
                Span::styled(
                    format!("{}{}", marker, checkbox),
                    control_style(focused == correct, box_style),
                ),
                Span::raw(" "),
                field_span(&row.content, "Answer text", focused == text),
            ];
            if can_delete_answer {
                spans.push(Span::raw("  "));
                spans.push(button(
                    "x",
                    focused == delete,
                    Style::default().fg(Color::Red),
                ));
            }
            let line = Line::from(spans);
            lines.push(if row.is_highlighted() {
                line.bg(Color::Rgb(0, 48, 0))
            } else {
                line
            });
        }

        if card.can_add_answer() {
            let add = Control::AddAnswer(card.id);
            mark(&lines, &[add]);
            lines.push(Line::from(vec![
                Span::raw("    "),
                button("+ add answer", focused == add, Style::default().fg(Color::Gray)),
            ]));
        }

        let slider = Control::TimeLimit(card.id);
        mark(&lines, &[slider]);
        lines.push(slider_line(card, focused == slider));
        lines.push(Line::from(""));
    }

    mark(&lines, &[Control::AddQuestion, Control::Save]);
    let save_label = if form.is_saving() { "saving..." } else { "save" };
    lines.push(Line::from(vec![
        button(
            "+ add question",
            focused == Control::AddQuestion,
            Style::default().fg(Color::Gray),
        ),
        Span::raw("   "),
        button(
            save_label,
            focused == Control::Save,
            Style::default().fg(Color::Green).bold(),
        ),
    ]));

    (lines, focus_line)
}

fn field_span(field: &TextField, placeholder: &str, focused: bool) -> Span<'static> {
    let base = if field.is_invalid() {
        Style::default().fg(Color::Red).underlined()
    } else {
        Style::default().fg(Color::White)
    };

    if field.value().is_empty() && !focused {
        let style = if field.is_invalid() {
            base
        } else {
            Style::default().fg(Color::DarkGray)
        };
        return Span::styled(format!("<{}>", placeholder), style);
    }

    let cursor = if focused { "_" } else { "" };
    Span::styled(
        format!("{}{}", field.value(), cursor),
        control_style(focused, base),
    )
}

fn preview_line(card: &QuestionCard) -> Line<'static> {
    let text = match card.image.preview() {
        Some(preview) => format!("    preview: {}", preview.caption),
        None if card.image.has_image() => "    preview: loading...".to_string(),
        None => "    no image".to_string(),
    };
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray).italic()))
}

fn slider_line(card: &QuestionCard, focused: bool) -> Line<'static> {
    let value = card.time_limit.seconds();
    let range = usize::from(TIME_LIMIT_MAX - TIME_LIMIT_MIN);
    let filled = usize::from(value - TIME_LIMIT_MIN) * SLIDER_WIDTH / range;

    let bar = format!(
        "{}o{}",
        "=".repeat(filled),
        "-".repeat(SLIDER_WIDTH - filled)
    );
    let marker = if focused { ">" } else { " " };

    Line::from(vec![
        Span::raw("   "),
        Span::styled(
            format!("{}time ", marker),
            control_style(focused, Style::default().fg(Color::Gray)),
        ),
        Span::styled(bar, control_style(focused, Style::default().fg(Color::Cyan))),
        Span::styled(
            format!(" {}s", card.time_limit.readout()),
            Style::default().fg(Color::White).bold(),
        ),
    ])
}
