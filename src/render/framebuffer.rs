//! Color and depth storage for the software backend.
//!
//! Depth holds NDC `z / w` in `[0, 1]`: 0 at the near plane, 1 at the far
//! plane. A cleared buffer reads 1.0 everywhere and a fragment is kept only
//! when it is strictly closer than what is stored.

/// ARGB8888 color buffer plus a matching depth buffer.
pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

/// Depth of the far plane, the value every pixel is cleared to.
pub const FAR_DEPTH: f32 = 1.0;

/// Number of pixels in a `width` x `height` surface, computed without `u32`
/// overflow.
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, clear_color: u32) -> Self {
        let size = pixel_count(width, height);
        Self {
            color_buffer: vec![clear_color; size],
            depth_buffer: vec![FAR_DEPTH; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32, clear_color: u32) {
        *self = Self::new(width, height, clear_color);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Resets every depth to the far plane.
    #[inline]
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(FAR_DEPTH);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Whether a fragment at `depth` would survive the depth test.
    ///
    /// Out-of-bounds pixels and depths outside `[0, 1]` always fail.
    #[inline]
    pub fn depth_test(&self, x: i32, y: i32, depth: f32) -> bool {
        if !(0.0..=FAR_DEPTH).contains(&depth) {
            return false;
        }
        self.index(x, y)
            .is_some_and(|idx| depth < self.depth_buffer[idx])
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is smaller than the stored depth.
    /// Silently ignores out-of-bounds coordinates. Returns whether the pixel
    /// was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) -> bool {
        if !self.depth_test(x, y, depth) {
            return false;
        }
        if let Some(idx) = self.index(x, y) {
            self.depth_buffer[idx] = depth;
            self.color_buffer[idx] = color;
        }
        true
    }

    /// Set a pixel without depth testing.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// Row-major pixels, top row first.
    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// The color buffer as raw bytes for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }

    /// Bytes per row of [`as_bytes`](Self::as_bytes).
    pub fn pitch(&self) -> usize {
        self.width as usize * std::mem::size_of::<u32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_count_does_not_wrap_at_u32() {
        assert_eq!(pixel_count(65_536, 65_537), 65_536 * 65_537);
        assert_eq!(pixel_count(1280, 720), 921_600);
    }

    #[test]
    fn closer_fragment_wins() {
        let mut fb = FrameBuffer::new(4, 4, 0);
        assert!(fb.set_pixel_with_depth(1, 1, 0.5, 0xAA));
        assert!(!fb.set_pixel_with_depth(1, 1, 0.7, 0xBB));
        assert!(fb.set_pixel_with_depth(1, 1, 0.2, 0xCC));
        assert_eq!(fb.get_pixel(1, 1), Some(0xCC));
        assert_eq!(fb.get_depth(1, 1), Some(0.2));
    }

    #[test]
    fn depth_outside_unit_range_is_rejected() {
        let mut fb = FrameBuffer::new(2, 2, 0);
        assert!(!fb.set_pixel_with_depth(0, 0, -0.1, 1));
        assert!(!fb.set_pixel_with_depth(0, 0, 1.5, 1));
        assert_eq!(fb.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut fb = FrameBuffer::new(2, 2, 7);
        fb.set_pixel(-1, 0, 1);
        fb.set_pixel(2, 0, 1);
        assert!(!fb.set_pixel_with_depth(0, 5, 0.1, 1));
        assert_eq!(fb.get_pixel(5, 5), None);
        assert!(fb.pixels().iter().all(|&p| p == 7));
    }

    #[test]
    fn clear_depth_restores_far_plane() {
        let mut fb = FrameBuffer::new(2, 1, 0);
        fb.set_pixel_with_depth(0, 0, 0.3, 1);
        fb.clear_depth();
        assert_eq!(fb.get_depth(0, 0), Some(FAR_DEPTH));
    }

    #[test]
    fn byte_view_matches_pitch() {
        let fb = FrameBuffer::new(3, 2, 0xFF00_0000);
        assert_eq!(fb.pitch(), 12);
        assert_eq!(fb.as_bytes().len(), 24);
    }
}
