// Window + software overlay utilities.
// Provided here:
// 1) A window that shows the composited drawing.
// 2) A ring that previews the brush size at the cursor.
// 3) A tiny 5x7 bitmap font to render HUD text on top of the drawing.

use crate::error::Error;
use crate::types::Surface;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the canvas.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        // Without a frame cap the event loop would spin a core.
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, frame: &Surface) -> Result<(), Error> {
        self.window
            .update_with_buffer(&frame.pixels, frame.width, frame.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Poll window events without pushing a new frame. Needed on the
    /// iterations where nothing invalidated the display.
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window pixel coordinates (clamped to
    /// the window), which are also canvas coordinates here.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Clamp)
    }

    /// Left button drives pointer 0.
    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Right button drives pointer 1, so two "fingers" can draw at once.
    pub fn right_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Right)
    }

    /// C wipes the canvas back to white.
    pub fn clear_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }

    /// S saves the drawing as a JPEG.
    pub fn save_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }

    /// [ and ] shrink / grow the brush.
    pub fn width_down_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::LeftBracket, KeyRepeat::No)
    }

    pub fn width_up_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::RightBracket, KeyRepeat::No)
    }

    /// Digit row picks a brush color; returns the palette slot.
    pub fn color_pick_pressed(&self) -> Option<usize> {
        const DIGITS: [Key; 8] = [
            Key::Key1,
            Key::Key2,
            Key::Key3,
            Key::Key4,
            Key::Key5,
            Key::Key6,
            Key::Key7,
            Key::Key8,
        ];
        DIGITS
            .iter()
            .position(|&k| self.window.is_key_pressed(k, KeyRepeat::No))
    }
}

/* ---------- Software overlay drawing: pixels, brush ring, tiny font ---------- */

/// Put a pixel on the frame if (x,y) is inside bounds.
#[inline]
fn put_pixel(frame: &mut Surface, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= frame.width || y >= frame.height {
        return;
    }
    let idx = y * frame.width + x;
    frame.pixels[idx] = color;
}

/// Draw a 1-px circle outline centered at (cx,cy): the brush-size
/// preview that follows the mouse.
pub fn draw_brush_ring(frame: &mut Surface, cx: i32, cy: i32, radius: i32, color: u32) {
    let r = radius.max(2) as f32;
    // Enough samples that the ring has no visible gaps.
    let steps = (r * 8.0) as usize;
    for i in 0..steps {
        let a = i as f32 / steps as f32 * std::f32::consts::TAU;
        put_pixel(
            frame,
            cx + (a.cos() * r).round() as i32,
            cy + (a.sin() * r).round() as i32,
            color,
        );
    }
    // Center dot to anchor the ring visually
    put_pixel(frame, cx, cy, color);
}

/* ---------- 5x7 bitmap font (ASCII subset the HUD needs) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set: digits, the
/// letters used by the HUD strings (including hex A..F), and a little
/// punctuation. Each u8 is a row; the low 5 bits are the pixels
/// (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters the HUD strings use
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),

        // Punctuation: space, vertical bar, colon, dot, dash, hash
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b01110,0b00000,0b00000,0b00000),
        '#' => g!(0b01010,0b11111,0b01010,0b01010,0b01010,0b11111,0b01010),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel light shadow so
/// the HUD stays readable over any drawing.
fn draw_char_5x7(frame: &mut Surface, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by (1,1) in white for contrast on ink
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(frame, x + rx as i32 + 1, y + ry as i32 + 1, 0x00FF_FFFF);
                }
            }
        }

        // Foreground pass: actual glyph in chosen color
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(frame, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
pub fn draw_text_5x7(frame: &mut Surface, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(frame, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BACKGROUND;

    #[test]
    fn ring_stays_inside_the_frame() {
        let mut frame = Surface::new(32, 32);
        draw_brush_ring(&mut frame, 0, 0, 50, 0x0000_0000); // mostly off-screen
        draw_brush_ring(&mut frame, 16, 16, 6, 0x0000_0000);
        assert!(frame.pixels.iter().any(|&p| p != BACKGROUND));
    }

    #[test]
    fn hud_glyphs_cover_the_status_strings() {
        for ch in "W: 05 | #FF123ABC | SAVED DOODLE-12.JPG SAVE FAILED CLEARED DRAW WITH THE MOUSE".chars()
        {
            assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
        }
    }

    #[test]
    fn text_marks_pixels_at_the_anchor() {
        let mut frame = Surface::new(64, 16);
        draw_text_5x7(&mut frame, 2, 2, "W", 0x0000_0000);
        assert!(frame.pixels.iter().any(|&p| p == 0x0000_0000));
    }
}
