use crossterm::event::{KeyCode, KeyEvent};
use image::DynamicImage;
use tracing::info;

use filmstrip_core::{AppConfig, SceneBuilder, ScrollEngine};

/// How much a single keypress changes the speed, in pixels per second.
const SPEED_STEP: f64 = 10.0;

/// Terminal host state: the engine plus everything needed to rebuild it.
///
/// The engine is replaced whole-sale on resize or reshuffle; raw sources
/// are kept around so a rebuild can rescale them to the new viewport
/// height.
pub struct App {
    pub config: AppConfig,
    sources: Vec<(DynamicImage, u32)>,
    pub engine: ScrollEngine,
    strip_rows: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, sources: Vec<(DynamicImage, u32)>, term_height: u16) -> Self {
        let strip_rows = Self::strip_rows(&config, term_height);
        let mut rng = config.strip.rng();
        let engine = Self::build_engine(
            &config,
            &sources,
            strip_rows,
            &mut rng,
            config.strip.start_immediately,
        );
        Self {
            config,
            sources,
            engine,
            strip_rows,
            should_quit: false,
        }
    }

    /// Rows available for the strip once the status bar took its line.
    fn strip_rows(config: &AppConfig, term_height: u16) -> u16 {
        if config.ui.status_bar {
            term_height.saturating_sub(1)
        } else {
            term_height
        }
    }

    fn build_engine(
        config: &AppConfig,
        sources: &[(DynamicImage, u32)],
        strip_rows: u16,
        rng: &mut fastrand::Rng,
        running: bool,
    ) -> ScrollEngine {
        // Half-block cells pack two pixel rows per terminal row
        let viewport_height = strip_rows as u32 * 2;
        let builder = SceneBuilder::new(config.strip.scene_length, config.strip.contiguous);
        let (images, scene) = builder.build(sources, viewport_height, rng);
        ScrollEngine::new(images, scene, config.strip.speed, running)
    }

    /// Rebuild the engine for a new terminal size, keeping the running
    /// state but rescaling every image to the new viewport height.
    pub fn resize(&mut self, _term_width: u16, term_height: u16) {
        self.strip_rows = Self::strip_rows(&self.config, term_height);
        let mut rng = self.config.strip.rng();
        self.engine = Self::build_engine(
            &self.config,
            &self.sources,
            self.strip_rows,
            &mut rng,
            self.engine.is_running(),
        );
    }

    /// Regenerate the scene with a fresh seed.
    pub fn reshuffle(&mut self) {
        let mut rng = fastrand::Rng::new();
        self.engine = Self::build_engine(
            &self.config,
            &self.sources,
            self.strip_rows,
            &mut rng,
            self.engine.is_running(),
        );
        info!("scene reshuffled");
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => {
                if self.engine.is_running() {
                    self.engine.stop();
                } else {
                    self.engine.start();
                }
            }
            KeyCode::Char('r') => self.reshuffle(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.engine.set_speed(self.engine.speed() + SPEED_STEP);
            }
            KeyCode::Char('-') => {
                self.engine.set_speed(self.engine.speed() - SPEED_STEP);
            }
            _ => {}
        }
    }
}
