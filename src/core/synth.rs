use crate::common::{Dimensions, ImageConfig};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use rusttype::{Font, Scale};
use std::path::{Path, PathBuf};

pub type TestImage = RgbImage;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);

// Proportions of the built-in face relative to the requested scale
const BUILTIN_ADVANCE: f32 = 0.55;
const BUILTIN_GLYPH_WIDTH: f32 = 0.45;
const BUILTIN_GLYPH_HEIGHT: f32 = 0.7;

/// Largest font scale, in pixels, the synthesizer will draw at.
pub const MAX_FONT_SCALE: f32 = 1000.0;

/// Typeface used to draw the test expression.
pub enum FontFace {
    TrueType { font: Font<'static>, source: PathBuf },
    /// Solid glyph boxes, used when no font file can be loaded.
    BuiltIn,
}

impl FontFace {
    /// Pick the first candidate that parses as a font, falling back to the built-in face.
    pub fn load(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            match load_font_file(path) {
                Some(font) => {
                    tracing::debug!("Using font {}", path.display());
                    return FontFace::TrueType { font, source: path.clone() };
                }
                None => tracing::debug!("Font not usable: {}", path.display()),
            }
        }

        tracing::warn!("No TrueType font found in {} candidates, using built-in glyph boxes", candidates.len());
        FontFace::BuiltIn
    }

    pub fn describe(&self) -> String {
        match self {
            FontFace::TrueType { source, .. } => source.display().to_string(),
            FontFace::BuiltIn => "built-in".to_string(),
        }
    }

    /// Width and height of the rendered text's bounding box.
    pub fn measure(&self, scale: f32, text: &str) -> (i32, i32) {
        match self {
            FontFace::TrueType { font, .. } => text_size(Scale::uniform(scale), font, text),
            FontFace::BuiltIn => {
                let metrics = BuiltInMetrics::new(scale);
                let chars = text.chars().count() as i32;
                if chars == 0 {
                    return (0, 0);
                }
                let width = metrics
                    .advance
                    .saturating_mul(chars - 1)
                    .saturating_add(metrics.glyph_width);
                (width, metrics.glyph_height)
            }
        }
    }

    pub fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, scale: f32, text: &str) {
        match self {
            FontFace::TrueType { font, .. } => {
                draw_text_mut(canvas, INK, x, y, Scale::uniform(scale), font, text);
            }
            FontFace::BuiltIn => {
                let metrics = BuiltInMetrics::new(scale);
                for (i, ch) in text.chars().enumerate() {
                    if ch.is_whitespace() {
                        continue;
                    }
                    let offset = metrics.advance.saturating_mul(i as i32);
                    let glyph = Rect::at(x.saturating_add(offset), y)
                        .of_size(metrics.glyph_width as u32, metrics.glyph_height as u32);
                    draw_filled_rect_mut(canvas, glyph, INK);
                }
            }
        }
    }
}

fn load_font_file(path: &Path) -> Option<Font<'static>> {
    let bytes = std::fs::read(path).ok()?;
    Font::try_from_vec(bytes)
}

struct BuiltInMetrics {
    advance: i32,
    glyph_width: i32,
    glyph_height: i32,
}

impl BuiltInMetrics {
    fn new(scale: f32) -> Self {
        let scale = scale.min(MAX_FONT_SCALE);
        let px = |ratio: f32| ((scale * ratio).round() as i32).max(1);
        Self {
            advance: px(BUILTIN_ADVANCE),
            glyph_width: px(BUILTIN_GLYPH_WIDTH),
            glyph_height: px(BUILTIN_GLYPH_HEIGHT),
        }
    }
}

/// Renders the fixed test expression centered on a white canvas.
pub struct ImageSynthesizer {
    face: FontFace,
    scale: f32,
    text: String,
}

impl ImageSynthesizer {
    pub fn new(config: &ImageConfig) -> Self {
        Self::with_face(FontFace::load(&config.font_paths), config)
    }

    pub fn with_face(face: FontFace, config: &ImageConfig) -> Self {
        Self {
            face,
            scale: config.font_scale.min(MAX_FONT_SCALE),
            text: config.text.clone(),
        }
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    pub fn render(&self, size: Dimensions) -> TestImage {
        let mut canvas = RgbImage::from_pixel(size.width, size.height, BACKGROUND);

        let (text_width, text_height) = self.face.measure(self.scale, &self.text);
        let x = (size.width as i32 - text_width) / 2;
        let y = (size.height as i32 - text_height) / 2;

        self.face.draw(&mut canvas, x, y, self.scale, &self.text);
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_synth() -> ImageSynthesizer {
        ImageSynthesizer::with_face(FontFace::BuiltIn, &ImageConfig::default())
    }

    fn ink_bounds(img: &RgbImage) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, px) in img.enumerate_pixels() {
            if px[0] < 128 {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x1, y1, x2, y2)) => (x1.min(x), y1.min(y), x2.max(x), y2.max(y)),
                });
            }
        }
        bounds
    }

    #[test]
    fn renders_exact_requested_dimensions() {
        let synth = builtin_synth();
        for size in [Dimensions::new(800, 600), Dimensions::new(1, 1), Dimensions::new(37, 911)] {
            let img = synth.render(size);
            assert_eq!(img.dimensions(), (size.width, size.height));
        }
    }

    #[test]
    fn text_is_centered_on_white_background() {
        let img = builtin_synth().render(Dimensions::new(800, 600));

        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(799, 599), BACKGROUND);

        let (x1, y1, x2, y2) = ink_bounds(&img).expect("text should leave ink on the canvas");
        let center_x = (x1 + x2) as i32 / 2;
        let center_y = (y1 + y2) as i32 / 2;
        assert!((center_x - 400).abs() <= 2, "horizontal center was {}", center_x);
        assert!((center_y - 300).abs() <= 2, "vertical center was {}", center_y);
    }

    #[test]
    fn canvas_smaller_than_text_is_clipped_not_resized() {
        let img = builtin_synth().render(Dimensions::new(20, 10));
        assert_eq!(img.dimensions(), (20, 10));
        assert!(ink_bounds(&img).is_some());
    }

    #[test]
    fn builtin_measure_counts_every_character() {
        let face = FontFace::BuiltIn;
        let (w1, h1) = face.measure(40.0, "ab");
        let (w2, h2) = face.measure(40.0, "abcd");
        assert_eq!(h1, h2);
        assert_eq!(w2 - w1, 2 * 22);
        assert_eq!(face.measure(40.0, ""), (0, 0));
    }

    #[test]
    fn oversized_scale_is_clamped_instead_of_overflowing() {
        let config = ImageConfig { font_scale: 1e9, ..ImageConfig::default() };
        let synth = ImageSynthesizer::with_face(FontFace::BuiltIn, &config);

        let img = synth.render(Dimensions::new(800, 600));
        assert_eq!(img.dimensions(), (800, 600));
        assert_eq!(FontFace::BuiltIn.measure(1e9, "ab"), FontFace::BuiltIn.measure(MAX_FONT_SCALE, "ab"));
    }

    #[test]
    fn unusable_candidates_fall_back_to_builtin() {
        let not_a_font = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let face = FontFace::load(&[PathBuf::from("/nonexistent/font.ttf"), not_a_font]);
        assert!(matches!(face, FontFace::BuiltIn));
        assert_eq!(face.describe(), "built-in");
    }
}
