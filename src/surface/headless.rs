//! Off-screen surface.
//!
//! Keeps a copy of the last presented frame, replays queued input events and
//! can write the frame to a PNG file. Used by the binary when no window is
//! available and by the tests.

use std::collections::VecDeque;
use std::path::Path;

use log::{debug, info};

use super::Surface;
use crate::error::SurfaceError;
use crate::events::{EventBus, InputEvent, WindowEvent};
use crate::render::Framebuffer;

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    last_frame: Option<Framebuffer>,
    present_count: u64,
    pending: VecDeque<InputEvent>,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Queues an event for the next [`poll_events`](Surface::poll_events).
    pub fn push_event(&mut self, event: impl Into<InputEvent>) {
        self.pending.push_back(event.into());
    }

    pub fn last_frame(&self) -> Option<&Framebuffer> {
        self.last_frame.as_ref()
    }

    pub fn present_count(&self) -> u64 {
        self.present_count
    }

    /// Writes the last presented frame as an RGBA PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SurfaceError> {
        let path = path.as_ref();
        let frame = self
            .last_frame
            .as_ref()
            .ok_or_else(|| SurfaceError::Present("no frame has been presented".into()))?;
        let image = image::RgbaImage::from_raw(frame.width(), frame.height(), frame.to_rgba8())
            .ok_or_else(|| {
                SurfaceError::Present("frame size does not match its pixel data".into())
            })?;
        image.save(path)?;
        info!("Saved {}x{} frame to {}", frame.width(), frame.height(), path.display());
        Ok(())
    }
}

impl Surface for HeadlessSurface {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), SurfaceError> {
        let same_size = |last: &&mut Framebuffer| {
            last.width() == frame.width() && last.height() == frame.height()
        };
        if let Some(last) = self.last_frame.as_mut().filter(same_size) {
            last.copy_from(frame);
        } else {
            self.last_frame = Some(frame.clone());
        }
        self.present_count += 1;
        Ok(())
    }

    fn poll_events(&mut self, events: &mut EventBus) {
        while let Some(event) = self.pending.pop_front() {
            if let InputEvent::Window(WindowEvent::Resize { width, height }) = event {
                if width > 0 && height > 0 {
                    self.width = width as u32;
                    self.height = height as u32;
                }
            }
            debug!("Headless event {:?}", event);
            events.send(event);
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::events::{Key, KeyEvent, KeyEventKind, WindowEventKind};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn present_keeps_a_copy_of_the_frame() {
        let mut surface = HeadlessSurface::new(4, 4);
        let mut frame = Framebuffer::new(0, 0, 4, 4).unwrap();
        frame.set_pixel(1, 2, colors::RED, 255);
        surface.present(&frame).unwrap();

        frame.set_pixel(1, 2, colors::BLUE, 255);
        assert_eq!(surface.last_frame().unwrap().pixel(1, 2), Some((colors::RED, 255)));

        surface.present(&frame).unwrap();
        assert_eq!(surface.last_frame().unwrap().pixel(1, 2), Some((colors::BLUE, 255)));
        assert_eq!(surface.present_count(), 2);
    }

    #[test]
    fn queued_events_are_replayed_in_order() {
        let mut surface = HeadlessSurface::new(4, 4);
        surface.push_event(KeyEvent::Down(Key::W));
        surface.push_event(WindowEvent::Resize { width: 10, height: 20 });

        let keys = Rc::new(Cell::new(0));
        let mut events = EventBus::new();
        let seen = Rc::clone(&keys);
        events.keyboard.add_listener(KeyEventKind::Down, move |_| {
            seen.set(seen.get() + 1);
            false
        });
        events.window.add_listener(WindowEventKind::Resize, |_| false);

        surface.poll_events(&mut events);
        assert_eq!(keys.get(), 1);
        assert_eq!(surface.size(), (10, 20));

        surface.poll_events(&mut events);
        assert_eq!(keys.get(), 1);
    }

    #[test]
    fn save_png_needs_a_frame() {
        let surface = HeadlessSurface::new(4, 4);
        let path = std::env::temp_dir().join("minirender-never-written.png");
        assert!(matches!(surface.save_png(&path), Err(SurfaceError::Present(_))));
    }

    #[test]
    fn save_png_writes_a_readable_file() {
        let mut surface = HeadlessSurface::new(3, 2);
        let mut frame = Framebuffer::new(0, 0, 3, 2).unwrap();
        frame.set_pixel(2, 1, 0x336699, 255);
        surface.present(&frame).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        surface.save_png(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
