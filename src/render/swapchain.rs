//! Front/back framebuffer pair.
//!
//! The pipeline draws into the back buffer and flags it complete when the
//! frame is done. [`Swapchain::present`] then copies it to the front buffer
//! and hands the front buffer to the surface. While the back buffer is still
//! incomplete the previous front buffer is shown again.

use std::cell::Cell;
use std::rc::Rc;

use log::info;

use super::framebuffer::Framebuffer;
use crate::error::{FramebufferError, SurfaceError};
use crate::events::{EventBus, WindowEvent, WindowEventKind};
use crate::surface::Surface;

#[derive(Debug)]
pub struct Swapchain {
    front: Framebuffer,
    back: Framebuffer,
    backbuffer_complete: bool,
    pending_resize: Rc<Cell<Option<(i32, i32)>>>,
}

impl Swapchain {
    pub fn new(width: i32, height: i32) -> Result<Self, FramebufferError> {
        Ok(Self {
            front: Framebuffer::new(0, 0, width, height)?,
            back: Framebuffer::new(0, 0, width, height)?,
            backbuffer_complete: false,
            pending_resize: Rc::new(Cell::new(None)),
        })
    }

    /// Records window resizes so they are applied by
    /// [`apply_pending_resize`](Self::apply_pending_resize) before the next frame.
    pub fn subscribe(&self, events: &mut EventBus) {
        let pending = Rc::clone(&self.pending_resize);
        events.window.add_listener(WindowEventKind::Resize, move |event| {
            if let WindowEvent::Resize { width, height } = *event {
                pending.set(Some((width, height)));
            }
            false
        });
    }

    /// Resizes both buffers to the last size received from the window.
    ///
    /// Returns `true` if the buffers changed size.
    pub fn apply_pending_resize(&mut self) -> Result<bool, FramebufferError> {
        match self.pending_resize.take() {
            Some((width, height)) => self.resize(width, height),
            None => Ok(false),
        }
    }

    /// Resizes both buffers, keeping their clear colors.
    ///
    /// Non-positive sizes are ignored. Both buffers are allocated before either
    /// is replaced, so on failure the swapchain keeps its previous size.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<bool, FramebufferError> {
        if width <= 0 || height <= 0 {
            return Ok(false);
        }
        if (width as u32, height as u32) == (self.back.width(), self.back.height()) {
            return Ok(false);
        }

        let (color, alpha) = self.back.clear_color();
        let mut front = Framebuffer::new(0, 0, width, height)?;
        let mut back = Framebuffer::new(0, 0, width, height)?;
        for buffer in [&mut front, &mut back] {
            buffer.set_clear_color(color, alpha);
            buffer.clear();
        }
        self.front = front;
        self.back = back;
        self.backbuffer_complete = false;
        info!("Swapchain resized to {width}x{height}");
        Ok(true)
    }

    pub fn set_clear_color(&mut self, color: u32, alpha: u8) {
        self.front.set_clear_color(color, alpha);
        self.back.set_clear_color(color, alpha);
    }

    pub fn back_buffer(&self) -> &Framebuffer {
        &self.back
    }

    pub fn back_buffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.back
    }

    pub fn front_buffer(&self) -> &Framebuffer {
        &self.front
    }

    /// Clears the back buffer and marks it unfinished until
    /// [`set_backbuffer_complete`](Self::set_backbuffer_complete) is called.
    pub fn clear_back_buffer(&mut self) {
        self.back.clear();
        self.backbuffer_complete = false;
    }

    pub fn set_backbuffer_complete(&mut self, complete: bool) {
        self.backbuffer_complete = complete;
    }

    pub fn is_backbuffer_complete(&self) -> bool {
        self.backbuffer_complete
    }

    pub fn width(&self) -> u32 {
        self.back.width()
    }

    pub fn height(&self) -> u32 {
        self.back.height()
    }

    /// Shows a frame on `surface`.
    ///
    /// With double buffering a complete back buffer is copied to the front
    /// buffer first and the front buffer is shown. Without it the back buffer
    /// is shown directly, finished or not.
    pub fn present<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        double_buffer: bool,
    ) -> Result<(), SurfaceError> {
        if !double_buffer {
            return surface.present(&self.back);
        }
        if self.backbuffer_complete {
            self.front.copy_from(&self.back);
        }
        surface.present(&self.front)
    }
}
