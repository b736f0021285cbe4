use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    /// Render the one-line state readout with key hints
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let (state, state_bg) = if app.engine.is_running() {
            ("running", Color::Green)
        } else {
            ("stopped", Color::Red)
        };

        let status = Line::from(vec![
            Span::styled(
                format!(" {state} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(state_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {:+.0} px/s ", app.engine.speed()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!(
                "images {} cursor {} offset {:.1} ",
                app.engine.image_count(),
                app.engine.cursor(),
                app.engine.offset(),
            )),
            Span::styled("space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause "),
            Span::styled("r", Style::default().fg(Color::Cyan)),
            Span::raw(" reshuffle "),
            Span::styled("+/-", Style::default().fg(Color::Cyan)),
            Span::raw(" speed "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]);

        let paragraph = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(paragraph, area);
    }
}
