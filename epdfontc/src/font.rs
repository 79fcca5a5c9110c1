//! FreeType-backed glyph sources.

use std::{
    borrow::Borrow,
    path::{Path, PathBuf},
    sync::Arc,
};

use freetype::{face::LoadFlag, Face, Library};
use write_epdfont::{GlyphSource, LineMetrics, RasterGlyph};

use crate::Error;

/// Rendering resolution in dots per inch, both axes.
const RENDER_DPI: u32 = 150;

/// Memory mapped font file data shared with FreeType.
#[derive(Clone)]
pub struct SharedFontData(Arc<memmap2::Mmap>);

impl Borrow<[u8]> for SharedFontData {
    fn borrow(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// An ordered stack of FreeType faces, all set to the same pixel size.
///
/// Code points are resolved against the faces in priority order; the first
/// face with a matching character wins.
pub struct FontStack {
    // Faces borrow from the library; it has to outlive them.
    _library: Library,
    faces: Vec<Face<SharedFontData>>,
}

impl FontStack {
    /// Map the given font files and set every face to `size` points.
    pub fn new(paths: &[PathBuf], size: u32) -> Result<Self, Error> {
        let library = Library::init()?;
        let mut faces = Vec::with_capacity(paths.len());
        for path in paths {
            let face = library.new_memory_face2(map_font_file(path)?, 0)?;
            let size = (size as isize) << 6;
            face.set_char_size(size, size, RENDER_DPI, RENDER_DPI)?;
            faces.push(face);
        }
        Ok(Self {
            _library: library,
            faces,
        })
    }

    /// The face covering `code_point` and the glyph index within it.
    fn face_for(&self, code_point: u32) -> Option<(&Face<SharedFontData>, u32)> {
        self.faces.iter().find_map(|face| {
            let glyph_index = face.get_char_index(code_point as usize);
            (glyph_index > 0).then_some((face, glyph_index))
        })
    }
}

fn map_font_file(path: &Path) -> Result<SharedFontData, Error> {
    let file = std::fs::File::open(path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    Ok(SharedFontData(Arc::new(mmap)))
}

impl GlyphSource for FontStack {
    fn resolve(&mut self, code_point: u32) -> Option<RasterGlyph> {
        let (face, glyph_index) = self.face_for(code_point)?;
        face.load_glyph(glyph_index, LoadFlag::RENDER).ok()?;
        let slot = face.glyph();
        let bitmap = slot.bitmap();
        let width = bitmap.width() as u32;
        let height = bitmap.rows() as u32;

        // FreeType rows are padded to `pitch` bytes; repack densely.
        let mut coverage = Vec::with_capacity((width * height) as usize);
        if width > 0 && height > 0 {
            let pitch = bitmap.pitch() as usize;
            let buffer = bitmap.buffer();
            for row in 0..height as usize {
                let start = row * pitch;
                coverage.extend_from_slice(&buffer[start..start + width as usize]);
            }
        }

        Some(RasterGlyph {
            coverage,
            width,
            height,
            advance: slot.advance().x,
            left: slot.bitmap_left(),
            top: slot.bitmap_top(),
        })
    }

    fn line_metrics(&mut self) -> LineMetrics {
        let reference = self
            .face_for(u32::from('|'))
            .map(|(face, _)| face)
            .or_else(|| self.faces.first());
        let Some(metrics) = reference.and_then(|face| face.size_metrics()) else {
            return LineMetrics::default();
        };
        LineMetrics {
            height: metrics.height,
            ascender: metrics.ascender,
            descender: metrics.descender,
        }
    }
}
