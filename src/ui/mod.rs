mod builder;
mod load;
mod play;
mod results;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, View};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.view {
        View::Builder => builder::render(frame, area, app),
        View::Load => load::render(frame, area, app),
        View::Play => play::render(frame, area, app),
        View::Results => results::render(frame, area, app),
    }
}
