// Core raster types shared by the canvas, the rasterizer and the window.

/// Background the canvas is cleared to (opaque white paper).
pub const BACKGROUND: u32 = 0x00FF_FFFF;

/// Fixed-size raster the drawing is baked into.
/// Each entry is 0x00RRGGBB, ready to hand to minifb as-is.
#[derive(Clone, PartialEq)]
pub struct Surface {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>, // length = width * height
}

impl Surface {
    /// A surface filled with the paper background.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![BACKGROUND; width * height] }
    }

    /// Reset every pixel to the paper background.
    pub fn erase(&mut self) {
        self.pixels.fill(BACKGROUND);
    }
}

/// Current brush settings. Color is full ARGB; the alpha byte is
/// honored when the stroke is blended, the width is in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub color: u32, // 0xAARRGGBB
    pub width: f32, // >= 0; 0 draws a one-pixel hairline
}

impl Default for Style {
    fn default() -> Self {
        // Opaque black, 5 px wide: the classic starting brush.
        Self { color: 0xFF00_0000, width: 5.0 }
    }
}

/// Per-pixel stroke coverage in [0,1] over a bounding box; 1 = fully
/// inked, 0 = untouched. Dabs are combined with max, not sum, so a
/// translucent stroke stays one uniform wash where dabs overlap.
pub struct CoverageMask {
    pub x0: i32, // top-left corner in surface coordinates
    pub y0: i32,
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>, // length = width * height
}

impl CoverageMask {
    pub fn new(x0: i32, y0: i32, width: usize, height: usize) -> Self {
        Self { x0, y0, width, height, alpha: vec![0.0; width * height] }
    }
}
