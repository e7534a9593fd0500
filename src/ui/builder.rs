use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::{App, Focus};
use crate::builder::{MAX_ANSWERS, MIN_ANSWERS};
use crate::models::QuestionType;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);
    render_form(frame, chunks[1], app);
    render_checklist(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let count = app.builder.quiz().questions.len();
    let label = if count == 1 {
        "1 question".to_string()
    } else {
        format!("{count} questions")
    };
    let line = Line::from(vec![
        Span::styled("QUIZ BUILDER", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("  ·  {label}"), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let quiz = app.builder.quiz();
    let mut lines: Vec<Line> = Vec::new();
    let mut focused_line = 0usize;

    push_field(
        &mut lines,
        &mut focused_line,
        "Title",
        &quiz.title,
        app.focus == Focus::QuizTitle,
    );
    push_field(
        &mut lines,
        &mut focused_line,
        "Description",
        &quiz.description,
        app.focus == Focus::QuizDescription,
    );
    lines.push(Line::from(""));

    if quiz.questions.is_empty() {
        lines.push(Line::from(Span::styled(
            "No questions yet. Ctrl+N adds the first one.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (number, question) in quiz.questions.iter().enumerate() {
        let focused = app.focus == Focus::QuestionTitle(question.id);
        if focused {
            focused_line = lines.len();
        }

        let title_style = if focused {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::White).bold()
        };
        let mut spans = vec![
            Span::styled(
                format!("{}. ", number + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(question.title.as_str(), title_style),
        ];
        if focused {
            spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        }
        spans.push(Span::styled(
            format!("  [{}]", question.kind()),
            Style::default().fg(Color::Magenta),
        ));
        lines.push(Line::from(spans));

        for (index, answer) in question.answers.iter().enumerate() {
            let focused = app.focus == Focus::Answer(question.id, index);
            if focused {
                focused_line = lines.len();
            }

            let marked = !answer.is_empty() && question.correct.contains(answer);
            let marker = match question.kind() {
                QuestionType::Unique => {
                    if marked {
                        "(•)"
                    } else {
                        "( )"
                    }
                }
                QuestionType::Multiple => {
                    if marked {
                        "[x]"
                    } else {
                        "[ ]"
                    }
                }
            };
            let marker_color = if marked { Color::Green } else { Color::DarkGray };
            let answer_style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::styled(format!("   {marker} "), Style::default().fg(marker_color)),
                Span::styled(answer.as_str(), answer_style),
            ];
            if focused {
                spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
            }
            lines.push(Line::from(spans));
        }

        let count = question.answers.len();
        let hint = if count >= MAX_ANSWERS {
            " (max)"
        } else if count <= MIN_ANSWERS {
            " (min)"
        } else {
            ""
        };
        lines.push(Line::from(Span::styled(
            format!("   answers {count}/{MAX_ANSWERS}{hint}"),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    // Keep the focused field on screen.
    let visible = area.height as usize;
    let scroll = focused_line.saturating_sub(visible.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), area);
}

fn push_field<'a>(
    lines: &mut Vec<Line<'a>>,
    focused_line: &mut usize,
    label: &'a str,
    value: &'a str,
    focused: bool,
) {
    if focused {
        *focused_line = lines.len();
    }
    let value_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let mut spans = vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, value_style),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    lines.push(Line::from(spans));
    lines.push(Line::from(""));
}

fn render_checklist(frame: &mut Frame, area: Rect, app: &App) {
    let report = app.validation();
    let mut lines: Vec<Line> = Vec::new();

    if report.is_valid() {
        lines.push(Line::from(Span::styled(
            "Quiz complete. Ctrl+E exports it, Ctrl+P test-plays it.",
            Style::default().fg(Color::Green),
        )));
    } else if !app.builder.quiz().questions.is_empty() {
        lines.push(Line::from(Span::styled(
            "Before exporting, the quiz needs:",
            Style::default().fg(Color::DarkGray),
        )));
        for (label, passed) in report.rules() {
            let (symbol, color) = if passed {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {symbol} "), Style::default().fg(color)),
                Span::styled(
                    label,
                    Style::default().fg(if passed { Color::DarkGray } else { Color::Gray }),
                ),
            ]));
        }
    }

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Cyan),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("tab/shift-tab move  ·  enter mark correct  ·  ctrl+t type"),
        Line::from("ctrl+n/d question  ·  ctrl+a/x answer  ·  ctrl+e export  ·  ctrl+p test  ·  ctrl+q quit"),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
