use filmstrip_core::{DrawCommand, TickFrame};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders one tick's draw commands into a terminal region.
///
/// The viewport is `area.width` pixels wide and `area.height * 2` pixels
/// tall: each character cell shows two vertically stacked pixels via the
/// half-block glyph, fg for the top pixel and bg for the bottom one.
pub struct StripWidget;

impl StripWidget {
    pub fn render(frame: &mut Frame, area: Rect, tick: &TickFrame) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let vw = area.width as u32;
        let vh = area.height as u32 * 2;

        // Composite all tiles into an RGB framebuffer over black
        let mut fb = vec![[0u8; 3]; (vw * vh) as usize];
        for cmd in &tick.tiles {
            Self::blit(&mut fb, vw, vh, cmd);
        }

        for row in 0..area.height {
            let y = row as u32 * 2;
            let mut spans: Vec<Span> = Vec::with_capacity(vw as usize);
            for x in 0..vw {
                let top = fb[(y * vw + x) as usize];
                let bottom = if y + 1 < vh {
                    fb[((y + 1) * vw + x) as usize]
                } else {
                    top
                };
                spans.push(Span::styled(
                    "▀",
                    Style::default()
                        .fg(Color::Rgb(top[0], top[1], top[2]))
                        .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
                ));
            }
            let line_area = Rect {
                x: area.x,
                y: area.y + row,
                width: area.width,
                height: 1,
            };
            frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
        }
    }

    /// Copy one tile into the framebuffer at its x position, clipping to
    /// the viewport. Fractional positions floor so adjacent tiles stay
    /// aligned to the same cell grid.
    fn blit(fb: &mut [[u8; 3]], vw: u32, vh: u32, cmd: &DrawCommand) {
        let x0 = cmd.x.floor() as i64;
        let tile_w = cmd.image.width();
        if x0 >= vw as i64 || x0 + tile_w as i64 <= 0 {
            return;
        }
        let rgba = cmd.image.buffer().to_rgba8();
        let tile_h = cmd.image.height().min(vh);
        for tx in 0..tile_w {
            let fx = x0 + tx as i64;
            if fx < 0 || fx >= vw as i64 {
                continue;
            }
            for ty in 0..tile_h {
                let px = rgba.get_pixel(tx, ty);
                let alpha = px[3] as u32;
                fb[(ty * vw + fx as u32) as usize] = [
                    (px[0] as u32 * alpha / 255) as u8,
                    (px[1] as u32 * alpha / 255) as u8,
                    (px[2] as u32 * alpha / 255) as u8,
                ];
            }
        }
    }
}
