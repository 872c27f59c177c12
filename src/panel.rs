use raylib::prelude::*;
use crate::constants::*;
use crate::slideshow::{Direction, Panel, PanelPhase};

/// Renders one panel of the slideshow: a pre-loaded texture, scaled to fit
/// the stage above the footer and drawn at a horizontal offset that follows
/// the panel's transition phase.
pub struct PanelView {
    image: Texture2D,
    scale: f32,
}

impl PanelView {
    pub fn new(image: Texture2D) -> Self {
        let stage_width = RENDER_WIDTH as f32 * 0.9;
        let stage_height = (RENDER_HEIGHT - FOOTER_HEIGHT) as f32 * 0.9;

        // Shrink to fit the stage, never enlarge
        let scale = (stage_width / image.width() as f32)
            .min(stage_height / image.height() as f32)
            .min(1.0);

        Self { image, scale }
    }

    /// Horizontal offset factor in stage widths: 0 when settled, +/-1 when
    /// fully off stage. Forward transitions enter from the right and exit
    /// to the left; backward transitions are mirrored.
    fn offset_factor(panel: &Panel, direction: Direction) -> f32 {
        let side = match direction {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        };
        let t = panel.progress();
        match panel.phase() {
            PanelPhase::Entering => side * (1.0 - t),
            PanelPhase::Active => 0.0,
            PanelPhase::Exiting => -side * t,
            PanelPhase::Removed => 0.0,
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, panel: &Panel, direction: Direction) {
        if !panel.is_visible() {
            return;
        }

        let stage_width = RENDER_WIDTH as f32;
        let stage_height = (RENDER_HEIGHT - FOOTER_HEIGHT) as f32;

        let tex_width = self.image.width() as f32;
        let tex_height = self.image.height() as f32;

        let scaled_width = tex_width * self.scale;
        let scaled_height = tex_height * self.scale;

        let offset_x = Self::offset_factor(panel, direction) * stage_width;

        // Centered on the stage, then shifted along the transition axis
        let draw_pos = Vector2::new(
            (stage_width - scaled_width) * 0.5 + offset_x,
            (stage_height - scaled_height) * 0.5,
        );

        d.draw_texture_pro(
            &self.image,
            Rectangle::new(0.0, 0.0, tex_width, tex_height), // Source rect uses original texture size
            Rectangle::new(draw_pos.x, draw_pos.y, scaled_width, scaled_height), // Dest rect uses scaled size
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}
