use std::time::Instant;

use tracing::debug;

use crate::scene::{ImageList, Scene};
use crate::source::StripImage;

const NANOS_PER_SEC: f64 = 1e9;

/// One image placed at a horizontal position for the current frame.
///
/// `x` is in viewport pixels and may be negative or extend past the right
/// edge for the partially visible tiles.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub image: StripImage,
    pub x: f64,
}

/// Output of a single tick: the tiles to draw and whether the host
/// should schedule another frame.
#[derive(Debug, Clone, Default)]
pub struct TickFrame {
    pub tiles: Vec<DrawCommand>,
    pub needs_redraw: bool,
}

#[derive(Debug, Clone)]
struct ScrollState {
    /// Position in the scene of the leftmost (or rightmost, when
    /// reversed) tile
    cursor: usize,
    /// Sub-tile scroll accumulator, kept in `(-current_width, 0]` by
    /// normalization
    offset: f64,
    /// Moment of the previous tick; `None` right after start/stop so the
    /// next tick sees zero elapsed time
    last_tick: Option<Instant>,
    running: bool,
}

/// Owns the animation state and computes the visible tiles each frame.
///
/// Single-threaded by construction: all state is behind `&mut self` and
/// the host drives `tick` from its render loop. Reconfiguration is a
/// whole-sale replacement with a freshly built engine, never a field
/// patch on a live one.
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    images: ImageList,
    scene: Scene,
    /// Pixels per second; the sign mirrors draw positions, it does not
    /// flip the accumulator
    speed: f64,
    state: ScrollState,
}

impl ScrollEngine {
    pub fn new(images: ImageList, scene: Scene, speed: f64, start_immediately: bool) -> Self {
        debug_assert!(
            images.is_empty() || scene.iter().all(|&slot| slot < images.len()),
            "scene references images outside the list"
        );
        if images.is_empty() {
            debug!("scroll engine built without images; it will render nothing");
        }
        Self {
            images,
            scene,
            speed,
            state: ScrollState {
                cursor: 0,
                offset: 0.0,
                last_tick: None,
                running: start_immediately,
            },
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Current scroll accumulator in pixels.
    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    /// Current position in the scene.
    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Begin advancing the offset.
    ///
    /// Returns true when the call actually transitioned to running and
    /// the host should schedule a redraw; calling `start` on a running
    /// engine is a no-op.
    pub fn start(&mut self) -> bool {
        if self.state.running {
            return false;
        }
        self.state.running = true;
        // Forget the previous frame instant so the resume tick sees zero
        // elapsed time instead of the whole stopped interval
        self.state.last_tick = None;
        true
    }

    /// Freeze the strip on the current frame.
    ///
    /// Returns true when the call actually transitioned to stopped and
    /// the host should redraw once to show the frozen frame; stopping a
    /// stopped engine is a no-op.
    pub fn stop(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.running = false;
        self.state.last_tick = None;
        true
    }

    /// Advance the animation to `now` and lay out the visible tiles.
    ///
    /// The offset moves by `|speed| / 1e9 * elapsed_nanos` while running,
    /// so motion depends on real elapsed time, not on how often the host
    /// ticks. Degenerate state (no images, empty scene, a zero-width
    /// tile) yields an empty frame instead of failing.
    pub fn tick(&mut self, now: Instant, viewport_width: f64) -> TickFrame {
        if self.images.is_empty() || self.scene.is_empty() {
            return TickFrame::default();
        }

        let elapsed_nanos = match self.state.last_tick {
            Some(prev) => now.saturating_duration_since(prev).as_nanos() as f64,
            None => 0.0,
        };
        self.state.last_tick = Some(now);

        if self.state.running && self.speed != 0.0 {
            self.state.offset -= self.speed.abs() / NANOS_PER_SEC * elapsed_nanos;
        }

        // Fold whole tiles back into the cursor so the accumulator stays
        // bounded no matter how far the last tick lies in the past
        loop {
            let Some(width) = self.tile_width(self.state.cursor) else {
                return TickFrame::default();
            };
            if width <= 0.0 {
                return TickFrame::default();
            }
            if self.state.offset > -width {
                break;
            }
            self.state.offset += width;
            self.state.cursor = (self.state.cursor + 1) % self.scene.len();
        }

        // Tile from the leading edge until the viewport is covered; at
        // most one partial tile hangs off each edge
        let mut tiles = Vec::new();
        let mut left = self.state.offset;
        let mut index = 0;
        while left < viewport_width {
            let Some(tile) = self.tile(self.state.cursor + index) else {
                return TickFrame::default();
            };
            let width = tile.width() as f64;
            if width <= 0.0 {
                return TickFrame::default();
            }
            tiles.push(DrawCommand {
                image: tile.clone(),
                x: self.draw_x(width, left, viewport_width),
            });
            left += width;
            index += 1;
        }

        TickFrame {
            tiles,
            needs_redraw: self.state.running && self.speed != 0.0,
        }
    }

    fn tile(&self, scene_index: usize) -> Option<&StripImage> {
        let slot = self.scene[scene_index % self.scene.len()];
        self.images.get(slot)
    }

    fn tile_width(&self, scene_index: usize) -> Option<f64> {
        self.tile(scene_index).map(|tile| tile.width() as f64)
    }

    /// Draw position for a tile whose leading edge sits at `left`.
    ///
    /// Negative speed mirrors the layout across the viewport without
    /// touching the offset arithmetic; this asymmetry is what makes
    /// reverse scroll look right.
    fn draw_x(&self, tile_width: f64, left: f64, viewport_width: f64) -> f64 {
        if self.speed < 0.0 {
            viewport_width - tile_width - left
        } else {
            left
        }
    }
}
