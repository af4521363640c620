//! Owned color + alpha pixel planes.
//!
//! A [`Framebuffer`] stores one packed `0x00RRGGBB` color and one alpha byte
//! per pixel, row-major with the origin at the top-left. Both planes always
//! hold exactly `width * height` elements.

use log::warn;

use crate::colors;
use crate::error::FramebufferError;

#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color_buffer: Vec<u32>,
    alpha_buffer: Vec<u8>,
    clear_color: u32,
    clear_alpha: u8,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            color_buffer: Vec::new(),
            alpha_buffer: Vec::new(),
            clear_color: colors::BLACK,
            clear_alpha: 255,
        }
    }
}

impl Framebuffer {
    /// Allocates a cleared framebuffer at origin `(x, y)`.
    ///
    /// A non-positive width or height gives an empty 0x0 framebuffer that
    /// ignores writes.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, FramebufferError> {
        let mut framebuffer = Self::default();
        framebuffer.resize(x, y, width, height)?;
        Ok(framebuffer)
    }

    /// Reallocates both planes to the new size and clears them.
    ///
    /// Does nothing if `width` or `height` is not positive. If allocation
    /// fails the framebuffer keeps its previous size and contents.
    pub fn resize(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), FramebufferError> {
        if width <= 0 || height <= 0 {
            return Ok(());
        }
        let error = FramebufferError::Allocation { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| error.clone())?;

        let mut color_buffer = Vec::new();
        let mut alpha_buffer = Vec::new();
        color_buffer
            .try_reserve_exact(len)
            .map_err(|_| error.clone())?;
        alpha_buffer.try_reserve_exact(len).map_err(|_| error)?;
        color_buffer.resize(len, self.clear_color);
        alpha_buffer.resize(len, self.clear_alpha);

        self.x = x;
        self.y = y;
        self.width = width as u32;
        self.height = height as u32;
        self.color_buffer = color_buffer;
        self.alpha_buffer = alpha_buffer;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.color_buffer.is_empty()
    }

    /// Sets the values used by [`clear`](Self::clear). Takes effect on the next clear.
    pub fn set_clear_color(&mut self, color: u32, alpha: u8) {
        self.clear_color = color;
        self.clear_alpha = alpha;
    }

    pub fn clear_color(&self) -> (u32, u8) {
        (self.clear_color, self.clear_alpha)
    }

    /// Fills every pixel with the clear color and alpha.
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.clear_color);
        self.alpha_buffer.fill(self.clear_alpha);
    }

    /// Writes one pixel. Coordinates outside `[0, width) x [0, height)` are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32, alpha: u8) {
        if let Some(index) = self.index(x, y) {
            self.color_buffer[index] = color;
            self.alpha_buffer[index] = alpha;
        }
    }

    /// Color and alpha at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<(u32, u8)> {
        self.index(x, y)
            .map(|index| (self.color_buffer[index], self.alpha_buffer[index]))
    }

    /// Copies both planes from a framebuffer of the same size.
    ///
    /// Copying between different sizes is a caller bug: it asserts in debug
    /// builds and leaves `self` untouched in release builds.
    pub fn copy_from(&mut self, other: &Framebuffer) {
        let same_size = self.width == other.width && self.height == other.height;
        debug_assert!(
            same_size,
            "copy between {}x{} and {}x{} framebuffers",
            other.width, other.height, self.width, self.height
        );
        if !same_size {
            warn!(
                "Skipping framebuffer copy: {}x{} into {}x{}",
                other.width, other.height, self.width, self.height
            );
            return;
        }
        self.color_buffer.copy_from_slice(&other.color_buffer);
        self.alpha_buffer.copy_from_slice(&other.alpha_buffer);
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn alpha_buffer(&self) -> &[u8] {
        &self.alpha_buffer
    }

    /// The frame as tightly packed RGBA8 rows.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .zip(&self.alpha_buffer)
            .flat_map(|(&color, &alpha)| colors::to_rgba(color, alpha))
            .collect()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}
