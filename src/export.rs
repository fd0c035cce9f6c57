// Export: flatten the baked drawing to a JPEG, like a camera-roll save.
//
// A `Snapshot` is a plain copy of the raster taken on the event stream;
// everything slow (encoding, file I/O) happens on the copy, so drawing
// can continue while a save is in flight.

use std::io::Cursor;
use std::path::Path;

use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use log::info;

use crate::error::Error;
use crate::types::Surface;

/// Immutable copy of the baked pixels at the moment it was taken.
pub struct Snapshot {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Snapshot {
    pub(crate) fn of(surface: &Surface) -> Self {
        Self {
            width: surface.width,
            height: surface.height,
            pixels: surface.pixels.clone(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Encode as a quality-100 JPEG and return the bytes.
    pub fn encode_jpeg(&self) -> Result<Vec<u8>, Error> {
        // Unpack 0x00RRGGBB into the tightly packed RGB8 bytes the
        // encoder wants. The canvas is opaque, so alpha is not a loss.
        let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
        for &px in &self.pixels {
            rgb.push(((px >> 16) & 0xFF) as u8);
            rgb.push(((px >> 8) & 0xFF) as u8);
            rgb.push((px & 0xFF) as u8);
        }

        let mut out = Cursor::new(Vec::new());
        let mut encoder = JpegEncoder::new_with_quality(&mut out, 100);
        encoder
            .encode(&rgb, self.width as u32, self.height as u32, ExtendedColorType::Rgb8)
            .map_err(|e| Error::ExportEncode(e.to_string()))?;
        Ok(out.into_inner())
    }

    /// Encode and write to `path`. Success is only reported once the
    /// bytes are fully on disk.
    pub fn save_jpeg(&self, path: &Path) -> Result<(), Error> {
        let bytes = self.encode_jpeg()?;
        std::fs::write(path, &bytes)?;
        info!("saved {}x{} drawing to {}", self.width, self.height, path.display());
        Ok(())
    }
}
