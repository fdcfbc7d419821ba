/// DELVE Project
/// `File` surface.rs
/// `Description` Software drawing surface module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use crate::math::Ext2su;
use crate::texture::Texture;

/// RGBA color with straight alpha
pub type Rgba = [u8; 4];

/// Color channel blending function
fn mix(dst: u32, src: u32, alpha: u32) -> u32 {
    (dst * (255 - alpha) + src * alpha) / 255
} // fn mix

/// 0x00RRGGBB pixel with RGBA color blending function
/// * `pixel` - destination pixel
/// * `color` - color to blend, alpha is coverage
/// * Returns blended pixel
pub fn blend(pixel: u32, color: Rgba) -> u32 {
    let [r, g, b, a] = color.map(u32::from);

    let dr = mix((pixel >> 16) & 0xFF, r, a);
    let dg = mix((pixel >> 8) & 0xFF, g, a);
    let db = mix(pixel & 0xFF, b, a);

    (dr << 16) | (dg << 8) | db
} // fn blend

/// Pixel buffer drawing surface. Pixels are stored as 0x00RRGGBB.
pub struct Surface<'a> {
    data: &'a mut [u32],
    width: usize,
    height: usize,
    stride: usize,
} // struct Surface

impl<'a> Surface<'a> {
    /// Surface construction function
    /// * `data` - pixel buffer, at least `width * height` long
    /// * `width`, `height` - surface size
    /// * Returns surface
    pub fn new(data: &'a mut [u32], width: usize, height: usize) -> Self {
        Self::with_stride(data, width, height, width)
    } // fn new

    /// Surface with custom row stride construction function
    pub fn with_stride(data: &'a mut [u32], width: usize, height: usize, stride: usize) -> Self {
        let stride = stride.max(width);
        let height = if stride == 0 { 0 } else { height.min(data.len() / stride) };

        Self { data, width, height, stride }
    } // fn with_stride

    /// Surface extent getting function
    pub fn get_extent(&self) -> Ext2su {
        Ext2su {
            width: self.width,
            height: self.height,
        }
    } // fn get_extent

    /// Surface filling function
    pub fn fill(&mut self, color: u32) {
        for y in 0..self.height {
            self.data[y * self.stride..y * self.stride + self.width].fill(color & 0x00FF_FFFF);
        }
    } // fn fill

    /// Pixel getting function
    /// * Returns pixel or None if it is outside of surface
    pub fn get_pixel(&self, x: isize, y: isize) -> Option<u32> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.stride + x as usize])
    } // fn get_pixel

    /// Pixel setting function, pixels outside of surface are ignored
    pub fn put_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.data[y as usize * self.stride + x as usize] = color & 0x00FF_FFFF;
    } // fn put_pixel

    /// Clipped rectangle getting function
    fn clip(&self, x: isize, y: isize, width: usize, height: usize) -> Option<(usize, usize, usize, usize)> {
        let x0 = x.clamp(0, self.width as isize) as usize;
        let y0 = y.clamp(0, self.height as isize) as usize;
        let x1 = x.saturating_add(width as isize).clamp(0, self.width as isize) as usize;
        let y1 = y.saturating_add(height as isize).clamp(0, self.height as isize) as usize;

        if x0 >= x1 || y0 >= y1 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    } // fn clip

    /// Solid rectangle drawing function
    pub fn draw_bar(&mut self, x: isize, y: isize, width: usize, height: usize, color: u32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) else {
            return;
        };

        for y in y0..y1 {
            self.data[y * self.stride + x0..y * self.stride + x1].fill(color & 0x00FF_FFFF);
        }
    } // fn draw_bar

    /// Rectangle outline drawing function
    pub fn draw_frame(&mut self, x: isize, y: isize, width: usize, height: usize, color: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let (w, h) = (width as isize - 1, height as isize - 1);

        self.draw_line(x, y, x + w, y, color);
        self.draw_line(x, y + h, x + w, y + h, color);
        self.draw_line(x, y, x, y + h, color);
        self.draw_line(x + w, y, x + w, y + h, color);
    } // fn draw_frame

    /// Line drawing function (Bresenham)
    pub fn draw_line(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut error = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.put_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * error;
            if e2 >= dy {
                error += dy;
                x += sx;
            }
            if e2 <= dx {
                error += dx;
                y += sy;
            }
        }
    } // fn draw_line

    /// Row getting function
    /// * Returns row pixels or None if row is outside of surface
    pub fn row(&self, y: usize) -> Option<&[u32]> {
        (y < self.height).then(|| &self.data[y * self.stride..y * self.stride + self.width])
    } // fn row

    /// Row putting function, row is cut to surface width
    pub fn put_row(&mut self, y: usize, row: &[u32]) {
        if y >= self.height {
            return;
        }
        let count = row.len().min(self.width);
        self.data[y * self.stride..y * self.stride + count].copy_from_slice(&row[..count]);
    } // fn put_row

    /// Smaller image to surface scaling function. Aspect ratio is kept, borders are filled with black.
    /// * `src` - 0x00RRGGBB image rows
    /// * `src_width`, `src_height` - image size
    pub fn letterbox(&mut self, src: &[u32], src_width: usize, src_height: usize) {
        self.fill(0x000000);
        if src_width == 0 || src_height == 0 || src.len() < src_width * src_height {
            return;
        }

        let scale = (self.width as f32 / src_width as f32).min(self.height as f32 / src_height as f32);
        let dst_width = ((src_width as f32 * scale) as usize).min(self.width);
        let dst_height = ((src_height as f32 * scale) as usize).min(self.height);
        if dst_width == 0 || dst_height == 0 {
            return;
        }

        let x0 = (self.width - dst_width) / 2;
        let y0 = (self.height - dst_height) / 2;

        for y in 0..dst_height {
            let src_row = &src[y * src_height / dst_height * src_width..][..src_width];
            let dst_row = &mut self.data[(y0 + y) * self.stride + x0..][..dst_width];

            for (x, pixel) in dst_row.iter_mut().enumerate() {
                *pixel = src_row[x * src_width / dst_width];
            }
        }
    } // fn letterbox

    /// Vertical texture slice drawing function
    /// * `texture` - texture to sample
    /// * `src_x` - image column
    /// * `src_y` - first image row
    /// * `src_h` - image rows to stretch over destination
    /// * `dst_x`, `dst_y` - destination top pixel, may be outside of surface
    /// * `dst_h` - destination height
    /// * `transparent` - skip pixels with alpha below one half
    /// * `tint` - color to blend over every drawn pixel
    #[allow(clippy::too_many_arguments)]
    pub fn blit_column(&mut self, texture: &Texture, src_x: usize, src_y: f32, src_h: f32, dst_x: isize, dst_y: isize, dst_h: usize, transparent: bool, tint: Option<Rgba>) {
        if dst_x < 0 || dst_x as usize >= self.width || dst_h == 0 {
            return;
        }
        let Some((_, y0, _, y1)) = self.clip(dst_x, dst_y, 1, dst_h) else {
            return;
        };

        let step = src_h / dst_h as f32;
        for y in y0..y1 {
            let ty = src_y + (y as isize - dst_y) as f32 * step;
            let pixel = texture.pixel(src_x, ty.max(0.0) as usize);

            if transparent && (pixel >> 24) < 0x80 {
                continue;
            }
            self.data[y * self.stride + dst_x as usize] = match tint {
                Some(color) => blend(pixel & 0x00FF_FFFF, color),
                None => pixel & 0x00FF_FFFF,
            };
        }
    } // fn blit_column

    /// Color blending over rectangle function
    pub fn blend_bar(&mut self, x: isize, y: isize, width: usize, height: usize, color: Rgba) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) else {
            return;
        };

        for y in y0..y1 {
            for pixel in &mut self.data[y * self.stride + x0..y * self.stride + x1] {
                *pixel = blend(*pixel, color);
            }
        }
    } // fn blend_bar

    /// Vertical linear gradient drawing function
    /// * `from` - color at the top row
    /// * `to` - color at the bottom row
    pub fn draw_gradient(&mut self, x: isize, y: isize, width: usize, height: usize, from: Rgba, to: Rgba) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) else {
            return;
        };

        let span = (height.max(2) - 1) as f32;
        for row in y0..y1 {
            let t = (row as isize - y) as f32 / span;
            let color: Rgba = std::array::from_fn(|i| (from[i] as f32 + (to[i] as f32 - from[i] as f32) * t).round() as u8);

            for pixel in &mut self.data[row * self.stride + x0..row * self.stride + x1] {
                *pixel = blend(*pixel, color);
            }
        }
    } // fn draw_gradient
} // impl Surface

/// Distance darkening color calculation function
/// * `tint` - apparent size factor
/// * Returns darkening color or None if no darkening is required
pub fn tint_color(tint: f32) -> Option<Rgba> {
    if !tint.is_finite() || tint >= 1.0 {
        return None;
    }

    let level = if tint <= 0.0 { 0.0 } else { (60.0 - (60.0 / tint).round()).max(0.0) };
    let alpha = ((1.0 - tint.max(0.0)) * 255.0).round().clamp(0.0, 255.0) as u8;

    Some([level as u8, level as u8, level as u8, alpha])
} // fn tint_color

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipped_bar() {
        let mut data = vec![0u32; 4 * 3];
        let mut surface = Surface::new(&mut data, 4, 3);

        surface.draw_bar(-1, 1, 3, 10, 0xFFFFFFFF);

        assert_eq!(surface.get_pixel(0, 0), Some(0));
        assert_eq!(surface.get_pixel(1, 2), Some(0x00FFFFFF));
        assert_eq!(surface.get_pixel(2, 1), Some(0));
        assert_eq!(surface.get_pixel(4, 0), None);
    }

    #[test]
    fn line_endpoints() {
        let mut data = vec![0u32; 8 * 8];
        let mut surface = Surface::new(&mut data, 8, 8);

        surface.draw_line(1, 6, 6, 2, 0x123456);

        assert_eq!(surface.get_pixel(1, 6), Some(0x123456));
        assert_eq!(surface.get_pixel(6, 2), Some(0x123456));
        assert_eq!(data.iter().filter(|p| **p != 0).count(), 6);
    }

    #[test]
    fn column_blit_stretches_texture() {
        let mut texture = Texture::basic(1, "t.png", 1, 2);
        texture_from(&mut texture, &[0xFF0000FF, 0x80FF0000]);

        let mut data = vec![0u32; 4];
        let mut surface = Surface::new(&mut data, 1, 4);
        surface.blit_column(&texture, 0, 0.0, 2.0, 0, 0, 4, false, None);

        assert_eq!(data, vec![0x0000FF, 0x0000FF, 0xFF0000, 0xFF0000]);
    }

    #[test]
    fn tint_is_skipped_for_near_walls() {
        assert_eq!(tint_color(1.5), None);
        assert_eq!(tint_color(0.5), Some([0, 0, 0, 128]));
        assert_eq!(blend(0xFFFFFF, [0, 0, 0, 255]), 0);
        assert_eq!(blend(0x102030, [0, 0, 0, 0]), 0x102030);
    }

    #[test]
    fn gradient_interpolates_rows() {
        let mut data = vec![0xFFFFFFu32; 3];
        let mut surface = Surface::new(&mut data, 1, 3);

        surface.draw_gradient(0, 0, 1, 3, [0, 0, 0, 255], [0, 0, 0, 0]);

        assert_eq!(data[0], 0);
        assert_eq!(data[2], 0xFFFFFF);
    }

    #[test]
    fn letterbox_keeps_aspect() {
        let src = [0x111111, 0x222222];
        let mut data = vec![0xFFFFFFu32; 4 * 4];
        let mut surface = Surface::new(&mut data, 4, 4);

        surface.letterbox(&src, 2, 1);

        assert!(data[..4].iter().all(|p| *p == 0));
        assert_eq!(&data[4..8], &[0x111111, 0x111111, 0x222222, 0x222222]);
        assert_eq!(&data[8..12], &[0x111111, 0x111111, 0x222222, 0x222222]);
        assert!(data[12..].iter().all(|p| *p == 0));
    }

    fn texture_from(texture: &mut Texture, pixels: &[u32]) {
        let rgba = pixels.iter().flat_map(|p| {
            let [a, r, g, b] = p.to_be_bytes();
            [r, g, b, a]
        });
        texture.set_image(crate::asset::DecodedImage {
            width: texture.image_width,
            height: texture.image_height,
            rgba: rgba.collect(),
        });
    }
}

// file surface.rs
