use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Result};
use clap::Parser;
use raylib::prelude::*;

mod constants;
mod panel;
mod slideshow;
mod texture_loader;
mod wizard;

use crate::constants::*;
use crate::panel::PanelView;
use crate::slideshow::Slideshow;
use crate::texture_loader::{load_sorted_image_paths, load_texture_with_exif_rotation};
use crate::wizard::{Wizard, WizardConfig, WizardStep};

#[derive(Parser)]
#[command(about = "Present the images of a directory as a step-by-step wizard")]
struct Args {
    /// Directory containing the images to show, one step per image
    image_directory: PathBuf,

    /// Step index to open the wizard at
    #[arg(long, default_value_t = 0)]
    initial_step: usize,

    /// Count the intro and finish steps as wizard progress
    #[arg(long)]
    include_wrapping_steps: bool,

    /// Advance label shown on the intro step
    #[arg(long, default_value = "Start")]
    start_label: String,

    /// Advance label shown on the last step
    #[arg(long, default_value = "Finish")]
    finish_label: String,
}

const CONTROL_WIDTH: i32 = 140;
const CONTROL_HEIGHT: i32 = 40;
const DOT_SPACING: i32 = 28;

const STEP_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

fn back_control_rect() -> Rectangle {
    Rectangle::new(
        FOOTER_MARGIN as f32,
        (RENDER_HEIGHT - FOOTER_HEIGHT + (FOOTER_HEIGHT - CONTROL_HEIGHT) / 2) as f32,
        CONTROL_WIDTH as f32,
        CONTROL_HEIGHT as f32,
    )
}

fn next_control_rect() -> Rectangle {
    Rectangle::new(
        (RENDER_WIDTH - FOOTER_MARGIN - CONTROL_WIDTH) as f32,
        (RENDER_HEIGHT - FOOTER_HEIGHT + (FOOTER_HEIGHT - CONTROL_HEIGHT) / 2) as f32,
        CONTROL_WIDTH as f32,
        CONTROL_HEIGHT as f32,
    )
}

fn draw_control_text(d: &mut RaylibDrawHandle, text: &str, rect: Rectangle, color: Color) {
    let text_y = rect.y as i32 + (CONTROL_HEIGHT - FOOTER_FONT_SIZE) / 2;
    d.draw_text(text, rect.x as i32 + 12, text_y, FOOTER_FONT_SIZE, color);
}

/// Draws the footer bar: back link, progress dots and the advance control.
/// The advance control is a filled button on the wrapping steps and a plain
/// underlined link in between.
fn draw_footer(d: &mut RaylibDrawHandle, wizard: &Wizard) {
    let footer_top = RENDER_HEIGHT - FOOTER_HEIGHT;
    d.draw_rectangle(0, footer_top, RENDER_WIDTH, FOOTER_HEIGHT, Color::new(24, 24, 24, 255));

    draw_control_text(d, "Back", back_control_rect(), Color::LIGHTGRAY);

    // Progress dots; the wrapping steps are hidden from progress unless
    // they are counted as part of it
    let n = wizard.step_count();
    let (first_dot, dot_count) = if !wizard.include_wrapping_steps() && n > 2 {
        (1, n - 2)
    } else {
        (0, n)
    };
    let dots_left = RENDER_WIDTH / 2 - (dot_count as i32 * DOT_SPACING) / 2 + DOT_SPACING / 2;
    let dots_y = footer_top + FOOTER_HEIGHT / 2;
    for dot in 0..dot_count {
        let step_index = first_dot + dot;
        let x = dots_left + dot as i32 * DOT_SPACING;
        if step_index == wizard.current_step() {
            d.draw_circle(x, dots_y, 7.0, Color::RAYWHITE);
        } else if step_index < wizard.current_step() {
            d.draw_circle(x, dots_y, 5.0, Color::GRAY);
        } else {
            d.draw_circle_lines(x, dots_y, 5.0, Color::GRAY);
        }
    }

    let next_rect = next_control_rect();
    let label = wizard.next_label(wizard.is_first_step(), wizard.is_last_step());
    if wizard.next_is_button() {
        d.draw_rectangle_rec(next_rect, Color::DARKBLUE);
        draw_control_text(d, label, next_rect, Color::RAYWHITE);
    } else {
        draw_control_text(d, label, next_rect, Color::SKYBLUE);
        let underline_y = (next_rect.y + next_rect.height) as i32 - 6;
        d.draw_line(
            next_rect.x as i32 + 12,
            underline_y,
            next_rect.x as i32 + 12 + label.len() as i32 * FOOTER_FONT_SIZE / 2,
            underline_y,
            Color::SKYBLUE,
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let image_paths = load_sorted_image_paths(&args.image_directory)?;

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH, RENDER_HEIGHT)
        .title("Wizard Slideshow")
        .vsync()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load panel textures, one per wizard step ---
    let mut panel_views: Vec<PanelView> = Vec::new();
    for path in &image_paths {
        match load_texture_with_exif_rotation(&mut rl, &thread, path) {
            Ok(texture) => panel_views.push(PanelView::new(texture)),
            Err(e) => eprintln!("Skipping {}: {}", path.display(), e),
        }
    }
    if panel_views.is_empty() {
        bail!("No panels were loaded successfully");
    }

    // The finish control closes the window on the last step
    let finished = Rc::new(Cell::new(false));
    let on_finish = {
        let finished = Rc::clone(&finished);
        Box::new(move || finished.set(true))
    };

    let steps: Vec<WizardStep> = (0..panel_views.len()).map(|_| WizardStep::new()).collect();
    let mut wizard = Wizard::new(
        steps,
        WizardConfig {
            initial_step: args.initial_step,
            include_wrapping_steps: args.include_wrapping_steps,
            start_label: args.start_label,
            finish_label: args.finish_label,
            on_start: Some(Box::new(|| println!("Wizard started"))),
            on_finish: Some(on_finish),
        },
    );
    let mut slideshow = Slideshow::new(panel_views.len(), wizard.current_step());

    // --- Main Loop ---
    while !rl.window_should_close() && !finished.get() {
        // --- Input ---
        let advance = rl.is_key_pressed(KeyboardKey::KEY_RIGHT)
            || rl.is_key_pressed(KeyboardKey::KEY_ENTER)
            || rl.is_key_pressed(KeyboardKey::KEY_SPACE);
        let retreat =
            rl.is_key_pressed(KeyboardKey::KEY_LEFT) || rl.is_key_pressed(KeyboardKey::KEY_BACKSPACE);

        let clicked = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
        let mouse = rl.get_mouse_position();

        if advance || (clicked && next_control_rect().check_collision_point_rec(mouse)) {
            wizard.advance();
        } else if retreat || (clicked && back_control_rect().check_collision_point_rec(mouse)) {
            wizard.retreat();
        } else {
            // Digit keys jump straight to a step
            for (step, key) in STEP_KEYS.iter().enumerate() {
                if rl.is_key_pressed(*key) {
                    wizard.jump_to(step);
                }
            }
        }

        // Index flows one way: wizard down into the slideshow
        slideshow.set_current(wizard.current_step());
        slideshow.update(rl.get_frame_time());

        // --- Render ---
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        let direction = slideshow.direction();
        for (i, panel) in slideshow.panels() {
            panel_views[i].draw(&mut d, panel, direction);
        }

        if let Some(active) = slideshow.active_slide() {
            let caption = format!("{} / {}", active + 1, wizard.step_count());
            d.draw_text(&caption, FOOTER_MARGIN, 16, 20, Color::GRAY);
        }

        draw_footer(&mut d, &wizard);
    }

    Ok(())
}
