use std::io;
use std::time::Instant;

use anyhow::{anyhow, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::warn;

use filmstrip_core::{load_sources, AppConfig, FsImageSource};
use filmstrip_tui::{
    widgets::{StatusBarWidget, StripWidget},
    App, AppEvent, EventHandler,
};

pub fn run(config: AppConfig) -> Result<()> {
    if config.strip.images.is_empty() {
        return Err(anyhow!(
            "No images configured.\nPass image paths on the command line or set [strip] images in {}",
            AppConfig::config_path().display()
        ));
    }

    // Decode everything up front; failed sources are skipped, not fatal
    let sources = load_sources(&FsImageSource, &config.strip.images, &config.strip.weights);
    if sources.is_empty() {
        warn!("none of the configured images could be loaded; the strip will be empty");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Filmstrip"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate_ms = config.ui.tick_rate_ms;
    let status_bar = config.ui.status_bar;
    let size = terminal.size()?;
    let mut app = App::new(config, sources, size.height);
    let event_handler = EventHandler::new(tick_rate_ms);

    let result = run_loop(&mut terminal, &mut app, &event_handler, status_bar);

    // Restore terminal even when the loop errored
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    status_bar: bool,
) -> Result<()> {
    // Draw at least once; afterwards the engine's continuation flag
    // decides whether idle ticks repaint
    let mut dirty = true;

    loop {
        match events.next()? {
            Some(AppEvent::Key(key)) => {
                app.handle_key(key);
                dirty = true;
            }
            Some(AppEvent::Resize(w, h)) => {
                app.resize(w, h);
                dirty = true;
            }
            Some(AppEvent::Tick) | None => {}
        }

        if app.should_quit {
            return Ok(());
        }

        if !dirty {
            continue;
        }

        let mut request_next_frame = false;
        terminal.draw(|frame| {
            let area = frame.area();
            let (strip_area, status_area) = split_areas(area, status_bar);

            let tick = app.engine.tick(Instant::now(), strip_area.width as f64);
            request_next_frame = tick.needs_redraw;

            StripWidget::render(frame, strip_area, &tick);
            if status_area.height > 0 {
                StatusBarWidget::render(frame, status_area, app);
            }
        })?;
        dirty = request_next_frame;
    }
}

fn split_areas(area: Rect, status_bar: bool) -> (Rect, Rect) {
    if status_bar && area.height > 1 {
        let strip = Rect {
            height: area.height - 1,
            ..area
        };
        let status = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        (strip, status)
    } else {
        (area, Rect::default())
    }
}
