use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.session else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Fill(1),
    ])
    .split(area);

    let score = session.score();
    let color = score_color(score);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ COMPLETE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{score}%"),
            Style::default().fg(color).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            score_message(score),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} of {} answered correctly",
                session.correct_count(),
                session.total_questions()
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "r restart  ·  n new quiz  ·  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
}

fn score_color(score: u8) -> Color {
    if score >= 80 {
        Color::Green
    } else if score >= 60 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn score_message(score: u8) -> &'static str {
    if score == 100 {
        "Perfect!"
    } else if score >= 80 {
        "Excellent work!"
    } else if score >= 60 {
        "Good job!"
    } else if score >= 40 {
        "Not bad, you can do better!"
    } else {
        "Keep practicing!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_color_thresholds() {
        assert_eq!(score_color(100), Color::Green);
        assert_eq!(score_color(80), Color::Green);
        assert_eq!(score_color(79), Color::Yellow);
        assert_eq!(score_color(60), Color::Yellow);
        assert_eq!(score_color(59), Color::Red);
        assert_eq!(score_color(0), Color::Red);
    }

    #[test]
    fn test_score_message_bands() {
        assert_eq!(score_message(100), "Perfect!");
        assert_eq!(score_message(99), "Excellent work!");
        assert_eq!(score_message(80), "Excellent work!");
        assert_eq!(score_message(60), "Good job!");
        assert_eq!(score_message(40), "Not bad, you can do better!");
        assert_eq!(score_message(39), "Keep practicing!");
    }
}
