//! Presentation surfaces.
//!
//! A [`Surface`] receives finished frames and produces input events. The
//! renderer only talks to this trait; [`create`] picks the implementation
//! named by [`RendererConfig::surface`].

mod headless;
#[cfg(feature = "sdl")]
mod sdl;

pub use headless::HeadlessSurface;
#[cfg(feature = "sdl")]
pub use sdl::SdlSurface;

use crate::config::{RendererConfig, SurfaceKind};
use crate::error::SurfaceError;
use crate::events::EventBus;
use crate::render::Framebuffer;

pub trait Surface {
    /// Shows a finished frame.
    fn present(&mut self, frame: &Framebuffer) -> Result<(), SurfaceError>;

    /// Sends every pending input event through `events`.
    fn poll_events(&mut self, events: &mut EventBus);

    /// Current drawable size in pixels.
    fn size(&self) -> (u32, u32);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), SurfaceError> {
        (**self).present(frame)
    }

    fn poll_events(&mut self, events: &mut EventBus) {
        (**self).poll_events(events)
    }

    fn size(&self) -> (u32, u32) {
        (**self).size()
    }
}

/// Creates the surface selected in `config`.
pub fn create(config: &RendererConfig) -> Result<Box<dyn Surface>, SurfaceError> {
    match config.surface {
        SurfaceKind::Headless => Ok(Box::new(HeadlessSurface::new(config.width, config.height))),
        #[cfg(feature = "sdl")]
        SurfaceKind::Sdl => Ok(Box::new(SdlSurface::new(
            &config.title,
            config.width,
            config.height,
        )?)),
        #[cfg(not(feature = "sdl"))]
        SurfaceKind::Sdl => Err(SurfaceError::Unavailable(SurfaceKind::Sdl)),
    }
}
