pub const RENDER_WIDTH: i32 = 1280;           // Width of the window
pub const RENDER_HEIGHT: i32 = 720;           // Height of the window
pub const FPS: u32 = 60;                      // Frames per second

pub const SLIDE_DURATION: f32 = 0.5;          // Duration of a slide transition (seconds)

pub const FOOTER_HEIGHT: i32 = 64;            // Height of the wizard footer bar
pub const FOOTER_FONT_SIZE: i32 = 24;         // Font size for footer controls
pub const FOOTER_MARGIN: i32 = 24;            // Horizontal margin around footer controls
