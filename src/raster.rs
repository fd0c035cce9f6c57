// Software stroking: turns a command list into inked pixels.
//
// The stroke is first rendered into a per-stroke coverage mask (one f32
// per pixel over the stroke's bounding box), then the brush color is
// blended through the mask in a single pass. Dabs combine with max, so
// a 50%-alpha stroke reads as one even wash no matter how many dabs
// overlap along the way.

use crate::stroke::{PathCmd, flatten_path};
use crate::types::{CoverageMask, Style, Surface};

/// Stroke `cmds` onto `surface` with the given brush. A command list
/// with no curve segment (a tap that never moved) draws nothing.
pub fn stroke_path(surface: &mut Surface, cmds: &[PathCmd], style: &Style) {
    let mut pts = Vec::new();
    flatten_path(cmds, &mut pts);
    if pts.len() < 2 {
        return;
    }

    let radius = style.width * 0.5;
    let Some(mut mask) = mask_for(surface, &pts, radius) else {
        return; // stroke lies entirely off the surface
    };

    if style.width <= 0.0 {
        // Hairline: 1-px Bresenham through the flattened points.
        for w in pts.windows(2) {
            line_into_mask(
                &mut mask,
                w[0].0.round() as i32,
                w[0].1.round() as i32,
                w[1].0.round() as i32,
                w[1].1.round() as i32,
            );
        }
    } else {
        for &(x, y) in &pts {
            dab_into_mask(&mut mask, x, y, radius);
        }
    }

    blend_through_mask(surface, &mask, style.color);
}

/// Coverage mask sized to the stroke's bounding box (grown by the brush
/// radius plus an antialiasing pixel), clipped to the surface. None if
/// the clipped box is empty.
fn mask_for(surface: &Surface, pts: &[(f32, f32)], radius: f32) -> Option<CoverageMask> {
    let pad = radius + 1.5;
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for &(x, y) in pts {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    let x0 = ((min_x - pad).floor() as i32).max(0);
    let y0 = ((min_y - pad).floor() as i32).max(0);
    let x1 = ((max_x + pad).ceil() as i32).min(surface.width as i32);
    let y1 = ((max_y + pad).ceil() as i32).min(surface.height as i32);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    Some(CoverageMask::new(x0, y0, (x1 - x0) as usize, (y1 - y0) as usize))
}

/// Mark one mask cell at surface coordinates (x, y), max-combined.
#[inline]
fn mark(mask: &mut CoverageMask, x: i32, y: i32, cov: f32) {
    let mx = x - mask.x0;
    let my = y - mask.y0;
    if mx < 0 || my < 0 {
        return;
    }
    let (mx, my) = (mx as usize, my as usize);
    if mx >= mask.width || my >= mask.height {
        return;
    }
    let idx = my * mask.width + mx;
    if cov > mask.alpha[idx] {
        mask.alpha[idx] = cov;
    }
}

/// Stamp one soft round dab centered at (cx, cy). Coverage is 1 inside
/// the disc and falls off linearly over the last pixel of radius.
fn dab_into_mask(mask: &mut CoverageMask, cx: f32, cy: f32, radius: f32) {
    let reach = (radius + 1.0).ceil() as i32;
    let ix = cx.round() as i32;
    let iy = cy.round() as i32;

    // Scan just the bounding box (fast enough for brush-sized radii)
    for y in (iy - reach)..=(iy + reach) {
        for x in (ix - reach)..=(ix + reach) {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let dist = dx.hypot(dy);
            let cov = (radius + 0.5 - dist).clamp(0.0, 1.0);
            if cov > 0.0 {
                mark(mask, x, y, cov);
            }
        }
    }
}

/// Full-coverage Bresenham line between two mask cells.
fn line_into_mask(mask: &mut CoverageMask, x0: i32, y0: i32, x1: i32, y1: i32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        mark(mask, x0, y0, 1.0);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Source-over blend of `color` (0xAARRGGBB) into the surface wherever
/// the mask has coverage. Blending happens in plain sRGB space.
fn blend_through_mask(surface: &mut Surface, mask: &CoverageMask, color: u32) {
    let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let sr = ((color >> 16) & 0xFF) as f32;
    let sg = ((color >> 8) & 0xFF) as f32;
    let sb = (color & 0xFF) as f32;

    for my in 0..mask.height {
        let row = (mask.y0 as usize + my) * surface.width;
        for mx in 0..mask.width {
            let cov = mask.alpha[my * mask.width + mx];
            if cov <= 0.0 {
                continue;
            }
            let a = cov * alpha;
            let idx = row + mask.x0 as usize + mx;
            let dst = surface.pixels[idx];

            let dr = ((dst >> 16) & 0xFF) as f32;
            let dg = ((dst >> 8) & 0xFF) as f32;
            let db = (dst & 0xFF) as f32;

            let r = (sr * a + dr * (1.0 - a)).round() as u32;
            let g = (sg * a + dg * (1.0 - a)).round() as u32;
            let b = (sb * a + db * (1.0 - a)).round() as u32;
            surface.pixels[idx] = (r << 16) | (g << 8) | b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BACKGROUND;

    fn horizontal_cmds() -> Vec<PathCmd> {
        vec![
            PathCmd::MoveTo { x: 10.0, y: 20.0 },
            PathCmd::QuadTo { cx: 10.0, cy: 20.0, x: 30.0, y: 20.0 },
        ]
    }

    #[test]
    fn stroke_inks_pixels_along_the_curve() {
        let mut surface = Surface::new(64, 40);
        let style = Style { color: 0xFF00_0000, width: 4.0 };
        stroke_path(&mut surface, &horizontal_cmds(), &style);

        // Midpoint of the segment is solidly black.
        assert_eq!(surface.pixels[20 * 64 + 20], 0x0000_0000);
        // Far corner untouched.
        assert_eq!(surface.pixels[0], BACKGROUND);
    }

    #[test]
    fn bare_move_draws_nothing() {
        let mut surface = Surface::new(16, 16);
        let style = Style { color: 0xFF00_0000, width: 8.0 };
        stroke_path(&mut surface, &[PathCmd::MoveTo { x: 8.0, y: 8.0 }], &style);
        assert!(surface.pixels.iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn off_surface_stroke_is_clipped_not_panicking() {
        let mut surface = Surface::new(16, 16);
        let style = Style { color: 0xFF00_0000, width: 6.0 };
        let cmds = vec![
            PathCmd::MoveTo { x: -50.0, y: -50.0 },
            PathCmd::QuadTo { cx: -50.0, cy: -50.0, x: -20.0, y: -20.0 },
        ];
        stroke_path(&mut surface, &cmds, &style);
        assert!(surface.pixels.iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn hairline_width_zero_marks_single_pixels() {
        let mut surface = Surface::new(64, 40);
        let style = Style { color: 0xFF00_0000, width: 0.0 };
        stroke_path(&mut surface, &horizontal_cmds(), &style);

        // On the line: inked. One row off: untouched.
        assert_eq!(surface.pixels[20 * 64 + 15], 0x0000_0000);
        assert_eq!(surface.pixels[22 * 64 + 15], BACKGROUND);
    }

    #[test]
    fn baking_is_deterministic() {
        let style = Style { color: 0x80FF_4020, width: 7.0 };
        let mut a = Surface::new(48, 48);
        let mut b = a.clone();
        let cmds = vec![
            PathCmd::MoveTo { x: 5.0, y: 5.0 },
            PathCmd::QuadTo { cx: 5.0, cy: 5.0, x: 20.0, y: 30.0 },
            PathCmd::QuadTo { cx: 35.0, cy: 55.0, x: 40.0, y: 20.0 },
        ];
        stroke_path(&mut a, &cmds, &style);
        stroke_path(&mut b, &cmds, &style);
        assert!(a == b);
    }

    #[test]
    fn translucent_stroke_is_one_even_wash() {
        // Max-combined coverage: the fully-covered interior of a wide
        // translucent stroke is a single uniform value even though many
        // dabs overlapped there.
        let mut surface = Surface::new(64, 40);
        let style = Style { color: 0x8000_00FF, width: 8.0 };
        stroke_path(&mut surface, &horizontal_cmds(), &style);

        let center = surface.pixels[20 * 64 + 20];
        for x in 14..=26 {
            assert_eq!(surface.pixels[20 * 64 + x], center, "x={x}");
        }
        assert_ne!(center, BACKGROUND);
    }
}
