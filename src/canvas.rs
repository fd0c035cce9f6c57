// The doodle canvas: a persistent raster plus the strokes currently
// being drawn on top of it.
//
// All mutation (pointer events, style changes, clear) arrives on one
// sequential event stream, so no locking is needed anywhere here. The
// single operation that may leave that stream is export, and it works
// on a `Snapshot` copied out while still on the stream.
//
// Per-pointer state machine: no entry -> entry on touch-down -> grows
// on qualifying moves -> baked into the raster and recycled on
// touch-up/cancel. Pointer ids are reused by input systems, so records
// are pooled instead of reallocated.

use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::error::Error;
use crate::export::Snapshot;
use crate::raster;
use crate::stroke::Stroke;
use crate::types::{Style, Surface};

/// Minimum finger travel (on either axis, in pixels) before new curve
/// geometry is recorded. Keeps fast scribbles from degenerating into
/// hundreds of micro-segments.
pub const TOUCH_TOLERANCE: f32 = 10.0;

pub struct DoodleCanvas {
    /// Baked drawing. None until the host reports its first layout.
    surface: Option<Surface>,
    /// One in-progress stroke per currently-down pointer id.
    strokes: HashMap<u32, Stroke>,
    /// Finished records waiting to be reused by the next touch-down.
    spare: Vec<Stroke>,
    style: Style,
    needs_redraw: bool,
}

impl DoodleCanvas {
    pub fn new() -> Self {
        Self {
            surface: None,
            strokes: HashMap::new(),
            spare: Vec::new(),
            style: Style::default(),
            needs_redraw: false,
        }
    }

    /// Called once the display surface first knows its size. The raster
    /// is created white and keeps these dimensions for its lifetime;
    /// later calls are ignored.
    pub fn init_surface(&mut self, width: usize, height: usize) {
        if self.surface.is_some() {
            warn!("surface already initialized, ignoring resize to {width}x{height}");
            return;
        }
        debug!("creating {width}x{height} surface");
        self.surface = Some(Surface::new(width, height));
        self.needs_redraw = true;
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    // ------------------------- touch input -------------------------

    /// A new finger went down. Starts a fresh stroke at (x, y); if the
    /// input system handed us an id we somehow still hold (a lost
    /// up-event), the stale geometry is reset in place.
    pub fn pointer_down(&mut self, id: u32, x: f32, y: f32) {
        trace!("pointer {id} down at ({x:.1}, {y:.1})");
        let stroke = self
            .strokes
            .entry(id)
            .or_insert_with(|| self.spare.pop().unwrap_or_default());
        stroke.begin(x, y);
        self.needs_redraw = true;
    }

    /// One batched move event carrying the current position of every
    /// down pointer. Ids with no active stroke are skipped; they show
    /// up routinely when a pointer went down before our surface existed
    /// or an up-event arrived twice.
    pub fn pointer_moved(&mut self, batch: &[(u32, f32, f32)]) {
        for &(id, x, y) in batch {
            if let Some(stroke) = self.strokes.get_mut(&id) {
                if stroke.advance(x, y, TOUCH_TOLERANCE) {
                    trace!("pointer {id} curve extended to ({x:.1}, {y:.1})");
                }
            }
        }
        // Redraw regardless; at worst it costs one identical frame.
        self.needs_redraw = true;
    }

    /// Finger lifted: bake its accumulated curve into the raster with
    /// the style current *right now*, then recycle the record. Unknown
    /// ids are ignored.
    pub fn pointer_up(&mut self, id: u32) {
        if let Some(mut stroke) = self.strokes.remove(&id) {
            debug!("pointer {id} up, baking {} commands", stroke.cmds().len());
            if let Some(surface) = self.surface.as_mut() {
                raster::stroke_path(surface, stroke.cmds(), &self.style);
            }
            stroke.reset();
            self.spare.push(stroke);
        } else {
            trace!("pointer {id} up with no active stroke, ignoring");
        }
        self.needs_redraw = true;
    }

    /// The input system aborted the gesture. Same contract as a normal
    /// up: whatever was drawn so far is kept and baked.
    pub fn pointer_cancel(&mut self, id: u32) {
        trace!("pointer {id} cancelled");
        self.pointer_up(id);
    }

    // ------------------------- style -------------------------

    pub fn set_color(&mut self, argb: u32) {
        self.style.color = argb;
    }

    pub fn color(&self) -> u32 {
        self.style.color
    }

    /// Widths are clamped at zero from below; zero itself is legal and
    /// draws a hairline.
    pub fn set_width(&mut self, width: f32) {
        self.style.width = width.max(0.0);
    }

    pub fn width(&self) -> f32 {
        self.style.width
    }

    // ------------------------- operations -------------------------

    /// Throw away everything drawn: in-progress strokes are dropped
    /// (not baked) and the raster goes back to white. The brush keeps
    /// its color and width.
    pub fn clear(&mut self) {
        debug!("clearing canvas ({} active strokes dropped)", self.strokes.len());
        for (_, mut stroke) in self.strokes.drain() {
            stroke.reset();
            self.spare.push(stroke);
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.erase();
        }
        self.needs_redraw = true;
    }

    /// Composite one displayable frame: the baked raster with every
    /// in-progress stroke drawn on top in the current style. Read-only
    /// with respect to canvas state, so it can run at display rate.
    pub fn compose(&self, frame: &mut Surface) -> Result<(), Error> {
        let surface = self.surface.as_ref().ok_or(Error::InvalidDimensions)?;

        if frame.width == surface.width && frame.height == surface.height {
            frame.pixels.copy_from_slice(&surface.pixels);
        } else {
            *frame = surface.clone();
        }
        for stroke in self.strokes.values() {
            raster::stroke_path(frame, stroke.cmds(), &self.style);
        }
        Ok(())
    }

    /// True once since the last call if anything requested a redraw.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Immutable copy of the baked raster, taken synchronously on the
    /// event stream. In-progress strokes are not included; they only
    /// become part of the drawing when their finger lifts. Encoding and
    /// file I/O run on the copy, so later touch events can keep
    /// mutating the live surface without tearing the artifact.
    pub fn snapshot(&self) -> Result<Snapshot, Error> {
        let surface = self.surface.as_ref().ok_or(Error::InvalidDimensions)?;
        Ok(Snapshot::of(surface))
    }

    pub fn active_stroke_count(&self) -> usize {
        self.strokes.len()
    }
}

impl Default for DoodleCanvas {
    fn default() -> Self {
        Self::new()
    }
}
