use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::QuestionType;
use crate::session::PlaySession;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.session else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);
    render_progress(frame, chunks[1], session);
    render_question(frame, chunks[2], session);
    render_options(frame, chunks[3], session, app.selected_option);
    render_controls(frame, chunks[4], session);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let (title, description) = match &app.quiz {
        Some(quiz) => (quiz.title.as_str(), quiz.description.as_str()),
        None => ("", ""),
    };
    let lines = vec![
        Line::from(Span::styled(title, Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(
            description,
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &PlaySession) {
    let total = session.total_questions();
    let current = (session.current_index() + 1).min(total);
    let ratio = if total == 0 {
        0.0
    } else {
        current as f64 / total as f64
    };

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!("{current} / {total}"));
    frame.render_widget(gauge, area);
}

fn render_question(frame: &mut Frame, area: Rect, session: &PlaySession) {
    let mut lines = Vec::new();
    match session.current_question() {
        Some(question) => {
            lines.push(Line::from(Span::styled(
                question.title.as_str(),
                Style::default().fg(Color::White).bold(),
            )));
            if question.kind() == QuestionType::Multiple {
                lines.push(Line::from(Span::styled(
                    "select all that apply",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "This quiz has no questions. Press f to finish.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_options(frame: &mut Frame, area: Rect, session: &PlaySession, selected: usize) {
    let Some(question) = session.current_question() else {
        return;
    };
    let user_answer = session.user_answer(question.id);

    let mut lines: Vec<Line> = Vec::with_capacity(question.answers.len() * 2);
    for (index, answer) in question.answers.iter().enumerate() {
        let is_selected = index == selected;
        let picked = user_answer.is_some_and(|a| a.contains(answer));

        let marker = match question.kind() {
            QuestionType::Unique => {
                if picked {
                    "(•)"
                } else {
                    "( )"
                }
            }
            QuestionType::Multiple => {
                if picked {
                    "[x]"
                } else {
                    "[ ]"
                }
            }
        };

        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker_style = if picked {
            Style::default().fg(Color::Green)
        } else {
            style
        };
        let cursor = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {cursor} "), style),
            Span::styled(format!("{marker} "), marker_style),
            Span::styled(answer.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect, session: &PlaySession) {
    let next_or_finish = if session.is_last_question() {
        "f finish"
    } else {
        "l next"
    };
    let text = format!(
        "j/k choose  ·  enter select  ·  h previous  ·  {next_or_finish}  ·  esc builder  ·  q quit"
    );
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
