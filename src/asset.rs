/// DELVE Project
/// `File` asset.rs
/// `Description` Image asset decoding module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use std::future::Future;
use std::io::Read;
use std::path::PathBuf;

/// Decoded image representation structure
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Row-major RGBA8 pixel data
    pub rgba: Vec<u8>,
} // struct DecodedImage

impl DecodedImage {
    /// Single color image construction function
    /// * `width` - image width
    /// * `height` - image height
    /// * `rgba` - color of every pixel
    /// * Returns image
    pub fn solid(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        Self {
            width,
            height,
            rgba: rgba.repeat(width * height),
        }
    } // fn solid
} // impl DecodedImage

/// Asset decoding error
#[derive(Debug)]
pub enum AssetError {
    Io(std::io::Error),
    Decoding(png::DecodingError),
    UnsupportedFormat {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },
    TruncatedData {
        required: usize,
        actual: usize,
    },
} // enum AssetError

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => f.write_fmt(format_args!("asset i/o error: {err}")),
            Self::Decoding(err) => f.write_fmt(format_args!("png decoding error: {err}")),
            Self::UnsupportedFormat { color_type, bit_depth } => {
                f.write_fmt(format_args!("unsupported pixel format {color_type:?}/{bit_depth:?}"))
            }
            Self::TruncatedData { required, actual } => {
                f.write_fmt(format_args!("image data truncated: {actual} of {required} bytes"))
            }
        }
    } // fn fmt
} // impl std::fmt::Display for AssetError

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Decoding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AssetError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<png::DecodingError> for AssetError {
    fn from(value: png::DecodingError) -> Self {
        Self::Decoding(value)
    }
}

/// Asset-loading collaborator. Decodes an opaque image source into RGBA on request.
pub trait AssetLoader {
    /// Image decoding function
    /// * `source` - image source handle (e.g. relative file name)
    /// * Returns future resolving into decoded image or decoding error
    fn decode(&self, source: &str) -> impl Future<Output = Result<DecodedImage, AssetError>>;
} // trait AssetLoader

/// PNG stream decoding function
/// * `reader` - PNG byte stream
/// * Returns RGBA image
pub fn decode_png<R: Read>(reader: R) -> Result<DecodedImage, AssetError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut buffer = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    let data = &buffer[..info.buffer_size()];

    let width = info.width as usize;
    let height = info.height as usize;
    let pixel_count = width * height;

    let channels = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => 4,
        (png::ColorType::Rgb, png::BitDepth::Eight) => 3,
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => 2,
        (png::ColorType::Grayscale, png::BitDepth::Eight) => 1,
        (color_type, bit_depth) => return Err(AssetError::UnsupportedFormat { color_type, bit_depth }),
    };

    if data.len() < pixel_count * channels {
        return Err(AssetError::TruncatedData { required: pixel_count * channels, actual: data.len() });
    }

    let mut rgba = Vec::with_capacity(pixel_count * 4);
    for pixel in data.chunks_exact(channels).take(pixel_count) {
        match *pixel {
            [r, g, b, a] => rgba.extend_from_slice(&[r, g, b, a]),
            [r, g, b] => rgba.extend_from_slice(&[r, g, b, 0xFF]),
            [l, a] => rgba.extend_from_slice(&[l, l, l, a]),
            [l] => rgba.extend_from_slice(&[l, l, l, 0xFF]),
            _ => unreachable!("chunks_exact yields {channels}-byte slices"),
        }
    }

    Ok(DecodedImage { width, height, rgba })
} // fn decode_png

/// File system PNG loader
pub struct PngLoader {
    root: PathBuf,
} // struct PngLoader

impl PngLoader {
    /// Loader construction function
    /// * `root` - directory image sources are resolved against
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    } // fn new
} // impl PngLoader

impl AssetLoader for PngLoader {
    async fn decode(&self, source: &str) -> Result<DecodedImage, AssetError> {
        let path = self.root.join(source);
        tracing::debug!(path = %path.display(), "decoding png");

        let file = std::fs::File::open(&path)?;
        decode_png(std::io::BufReader::new(file))
    }
} // impl AssetLoader for PngLoader


// file asset.rs
