// What you SEE now:
// • A white canvas; hold Left Mouse to draw with the current brush.
// • Right Mouse draws a second stroke at the same time (two fingers).
// • 1-8 pick brush colors (8 is white = eraser), [ and ] resize the brush.
// • C clears the canvas. S saves a JPEG next to the executable. ESC quits.

mod canvas;
mod draw;
mod error;
mod export;
mod raster;
mod stroke;
mod types;

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use log::{error, info};

use canvas::DoodleCanvas;
use draw::{Drawer, draw_brush_ring, draw_text_5x7};
use error::Error;
use types::Surface;

const WIDTH: usize = 960;
const HEIGHT: usize = 640;

/// Brush palette on the digit row. Slot 8 is white, which doubles as an
/// eraser on the white canvas.
const PALETTE: [u32; 8] = [
    0xFF00_0000, // 1: black
    0xFFE5_3935, // 2: red
    0xFF43_A047, // 3: green
    0xFF1E_88E5, // 4: blue
    0xFFFD_D835, // 5: yellow
    0xFF8E_24AA, // 6: purple
    0xFF00_ACC1, // 7: teal
    0xFFFF_FFFF, // 8: white / eraser
];

const HUD_COLOR: u32 = 0x0033_3333;
const RING_COLOR: u32 = 0x0088_8888;

fn main() -> Result<(), Error> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    /* --- Window + canvas setup ---
       Visual: window opens showing a blank white canvas. */
    let mut drawer = Drawer::new("Doodle Pad — Finger Paint", WIDTH, HEIGHT)?;
    let mut canvas = DoodleCanvas::new();
    canvas.init_surface(WIDTH, HEIGHT);
    info!("canvas ready at {WIDTH}x{HEIGHT}");

    /* --- Reusable frame buffer ---
       Visual: this is the image you actually see; the canvas composites
       its raster plus any in-progress strokes into it. */
    let mut screen = Surface::new(WIDTH, HEIGHT);

    /* --- Save pipeline ---
       Saves run on their own thread over a snapshot, and report back
       through this channel so the HUD can show the outcome. */
    let (status_tx, status_rx) = mpsc::channel::<String>();
    let mut hud_status = String::from("DRAW WITH THE MOUSE");
    let mut save_seq = 0u32;

    /* --- Mouse button edge tracking ---
       minifb only reports "is down"; the canvas wants down/moved/up. */
    let mut left_was_down = false;
    let mut right_was_down = false;
    let mut last_cursor: Option<(i32, i32)> = None;
    let mut moved_batch: Vec<(u32, f32, f32)> = Vec::new();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let mut hud_dirty = false;

        /* 1) Keyboard: brush style, clear, save */
        if let Some(slot) = drawer.color_pick_pressed() {
            canvas.set_color(PALETTE[slot]);
            hud_dirty = true;
        }
        if drawer.width_down_pressed() {
            canvas.set_width(canvas.width() - 2.0); // clamps at 0 (hairline)
            hud_dirty = true;
        }
        if drawer.width_up_pressed() {
            canvas.set_width(canvas.width() + 2.0);
            hud_dirty = true;
        }
        if drawer.clear_pressed() {
            canvas.clear();
            hud_status = String::from("CLEARED");
            hud_dirty = true;
        }
        if drawer.save_pressed() {
            // Snapshot here on the event loop; encode + write elsewhere.
            match canvas.snapshot() {
                Ok(snap) => {
                    info!("exporting {}x{} snapshot", snap.width(), snap.height());
                    save_seq += 1;
                    let path = PathBuf::from(format!("doodle-{save_seq}.jpg"));
                    let tx = status_tx.clone();
                    thread::spawn(move || {
                        let msg = match snap.save_jpeg(&path) {
                            Ok(()) => format!("SAVED {}", path.display()).to_uppercase(),
                            Err(e) => {
                                error!("save failed: {e}");
                                String::from("SAVE FAILED")
                            }
                        };
                        let _ = tx.send(msg);
                    });
                }
                Err(e) => error!("cannot save: {e}"),
            }
        }

        /* 2) Mouse buttons → pointer events (left = id 0, right = id 1).
           Visual: ink appears under the cursor while a button is held. */
        if let Some((x, y)) = drawer.mouse_pos() {
            moved_batch.clear();

            let left = drawer.left_mouse_down();
            if left && !left_was_down {
                canvas.pointer_down(0, x, y);
            } else if left {
                moved_batch.push((0, x, y));
            } else if left_was_down {
                canvas.pointer_up(0);
            }
            left_was_down = left;

            let right = drawer.right_mouse_down();
            if right && !right_was_down {
                canvas.pointer_down(1, x, y);
            } else if right {
                moved_batch.push((1, x, y));
            } else if right_was_down {
                canvas.pointer_up(1);
            }
            right_was_down = right;

            // One batched move per frame with every held pointer in it.
            if !moved_batch.is_empty() {
                canvas.pointer_moved(&moved_batch);
            }
        }

        /* 3) Pick up finished saves */
        while let Ok(msg) = status_rx.try_recv() {
            hud_status = msg;
            hud_dirty = true;
        }

        /* 4) Present when something changed (canvas invalidation, HUD
           text, or the brush ring following the cursor). */
        let cursor = drawer
            .mouse_pos()
            .map(|(x, y)| (x.round() as i32, y.round() as i32));
        let cursor_moved = cursor != last_cursor;
        last_cursor = cursor;

        if canvas.take_redraw() || hud_dirty || cursor_moved {
            canvas.compose(&mut screen)?;

            if let Some((cx, cy)) = cursor {
                let ring = (canvas.width() * 0.5).round() as i32;
                draw_brush_ring(&mut screen, cx, cy, ring, RING_COLOR);
            }

            let hud = format!(
                "W: {:02} | #{:08X} | {}",
                canvas.width() as u32,
                canvas.color(),
                hud_status
            );
            draw_text_5x7(&mut screen, 8, 8, &hud, HUD_COLOR);

            drawer.present(&screen)?;
        } else {
            drawer.pump(); // keep polling input without redrawing
        }
    }

    Ok(())
}
