#![forbid(unsafe_code)]

//! A [`VideoSource`] backed by the `image` crate.
//!
//! Animated GIFs are decoded whole into memory, one [`Image`] per frame.
//! Any other still image the `image` crate can read plays as a one-frame
//! video.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageReader, RgbaImage};
use tracing::{debug, info};
use vplayer_backend::{SourceError, VideoProperty, VideoSource, fourcc_code};
use vplayer_render::Image;

/// Frame rate reported when a GIF carries no delay.
pub const DEFAULT_GIF_FPS: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct GifSource {
    frames: Vec<Image>,
    fps: f64,
    fourcc: [u8; 4],
    pos: usize,
    closed: bool,
}

impl GifSource {
    pub const GIF_FOURCC: [u8; 4] = *b"GIF ";
    pub const STILL_FOURCC: [u8; 4] = *b"IMG ";

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn open_gif(path: &Path) -> Result<Self, SourceError> {
        let reader = BufReader::new(File::open(path)?);
        let decoder =
            GifDecoder::new(reader).map_err(|e| SourceError::unsupported(path, e.to_string()))?;
        let frames = decoder
            .into_frames()
            .collect_frames()
            .map_err(|e| SourceError::unsupported(path, e.to_string()))?;

        let fps = frames
            .first()
            .map(|f| {
                let (numer, denom) = f.delay().numer_denom_ms();
                if numer == 0 || denom == 0 {
                    DEFAULT_GIF_FPS
                } else {
                    1000.0 * f64::from(denom) / f64::from(numer)
                }
            })
            .unwrap_or(DEFAULT_GIF_FPS);

        let frames = frames
            .into_iter()
            .map(|f| to_image(&f.into_buffer()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SourceError::unsupported(path, e.to_string()))?;
        Ok(Self {
            frames,
            fps,
            fourcc: Self::GIF_FOURCC,
            pos: 0,
            closed: false,
        })
    }

    fn open_still(path: &Path) -> Result<Self, SourceError> {
        let decoded = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| SourceError::unsupported(path, e.to_string()))?;
        let frame =
            to_image(&decoded.to_rgba8()).map_err(|e| SourceError::unsupported(path, e.to_string()))?;
        Ok(Self {
            frames: vec![frame],
            fps: DEFAULT_GIF_FPS,
            fourcc: Self::STILL_FOURCC,
            pos: 0,
            closed: false,
        })
    }
}

/// Drop alpha; transparent pixels keep whatever colour they carry.
fn to_image(rgba: &RgbaImage) -> Result<Image, vplayer_render::RegionError> {
    let rgb: Vec<u8> = rgba
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    Image::from_raw(rgba.width(), rgba.height(), 3, rgb)
}

impl VideoSource for GifSource {
    fn open(path: &Path) -> Result<Self, SourceError> {
        if !path.is_file() {
            return Err(SourceError::not_found(path));
        }
        let is_gif = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("gif"));
        let source = if is_gif {
            Self::open_gif(path)?
        } else {
            Self::open_still(path)?
        };
        info!(
            path = %path.display(),
            frames = source.frames.len(),
            fps = source.fps,
            "decoded image source"
        );
        Ok(source)
    }

    fn grab(&mut self) -> bool {
        if self.closed || self.pos >= self.frames.len() {
            return false;
        }
        self.pos += 1;
        true
    }

    fn query_frame(&mut self) -> Option<Image> {
        if self.closed {
            return None;
        }
        let frame = self.frames.get(self.pos)?.clone();
        self.pos += 1;
        Some(frame)
    }

    fn property(&self, prop: VideoProperty) -> f64 {
        match prop {
            VideoProperty::Fps => self.fps,
            VideoProperty::PosFrames => self.pos as f64,
            VideoProperty::FourCc => fourcc_code(self.fourcc),
            VideoProperty::FrameCount => self.frames.len() as f64,
        }
    }

    fn set_property(&mut self, prop: VideoProperty, value: f64) -> bool {
        match prop {
            VideoProperty::PosFrames if value.is_finite() => {
                self.pos = (value.max(0.0) as usize).min(self.frames.len());
                true
            }
            _ => false,
        }
    }

    fn close(&mut self) {
        debug!("closing image source");
        self.closed = true;
        self.frames.clear();
    }
}
