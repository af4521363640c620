//! SDL2 window surface.
//!
//! Frames are uploaded into a streaming RGB888 texture and stretched over the
//! whole window. The texture is recreated whenever a frame of a different
//! size arrives.

use log::{debug, info};
use sdl2::event::{Event as SdlEvent, WindowEvent as SdlWindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton as SdlMouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use super::Surface;
use crate::error::SurfaceError;
use crate::events::{EventBus, Key, KeyEvent, MouseButton, MouseEvent, WindowEvent};
use crate::render::Framebuffer;

pub struct SdlSurface {
    // Fields drop in declaration order: the texture must go before its creator.
    texture: Texture<'static>,
    texture_size: (u32, u32),
    texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

impl SdlSurface {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, SurfaceError> {
        let sdl_context = sdl2::init().map_err(SurfaceError::Creation)?;
        let video_subsystem = sdl_context.video().map_err(SurfaceError::Creation)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| SurfaceError::Creation(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| SurfaceError::Creation(e.to_string()))?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(SurfaceError::Creation)?;
        let texture = create_texture(&texture_creator, width, height)?;

        info!("Opened {width}x{height} SDL window \"{title}\"");
        Ok(Self {
            texture,
            texture_size: (width, height),
            texture_creator,
            canvas,
            event_pump,
            width,
            height,
        })
    }

    fn upload(&mut self, frame: &Framebuffer) -> Result<(), SurfaceError> {
        let size = (frame.width(), frame.height());
        if size != self.texture_size {
            self.texture = create_texture(&self.texture_creator, size.0, size.1)?;
            self.texture_size = size;
            debug!("Recreated streaming texture at {}x{}", size.0, size.1);
        }

        let width = frame.width() as usize;
        self.texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                for (y, row) in frame.color_buffer().chunks_exact(width).enumerate() {
                    let line = &mut buffer[y * pitch..y * pitch + width * 4];
                    for (texel, color) in line.chunks_exact_mut(4).zip(row) {
                        texel.copy_from_slice(&color.to_ne_bytes());
                    }
                }
            })
            .map_err(SurfaceError::Present)
    }
}

fn create_texture(
    creator: &TextureCreator<WindowContext>,
    width: u32,
    height: u32,
) -> Result<Texture<'static>, SurfaceError> {
    // SAFETY: the creator is boxed and owned by the same SdlSurface as every
    // texture made from it, and is declared after the texture so it outlives it.
    let creator: &'static TextureCreator<WindowContext> = unsafe { &*(creator as *const _) };
    creator
        .create_texture_streaming(PixelFormatEnum::RGB888, width.max(1), height.max(1))
        .map_err(|e| SurfaceError::Creation(e.to_string()))
}

impl Surface for SdlSurface {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), SurfaceError> {
        if frame.is_empty() {
            return Ok(());
        }
        self.upload(frame)?;
        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, None)
            .map_err(SurfaceError::Present)?;
        self.canvas.present();
        Ok(())
    }

    fn poll_events(&mut self, events: &mut EventBus) {
        for event in self.event_pump.poll_iter() {
            match event {
                SdlEvent::Quit { .. } => {
                    events.send(WindowEvent::Close);
                }
                SdlEvent::Window {
                    win_event:
                        SdlWindowEvent::Resized(width, height)
                        | SdlWindowEvent::SizeChanged(width, height),
                    ..
                } => {
                    if width > 0 && height > 0 {
                        self.width = width as u32;
                        self.height = height as u32;
                    }
                    events.send(WindowEvent::Resize { width, height });
                }
                SdlEvent::MouseMotion { x, y, .. } => {
                    events.send(MouseEvent::Moved { x, y });
                }
                SdlEvent::MouseButtonDown { mouse_btn, .. } => {
                    if let Some(button) = map_button(mouse_btn) {
                        events.send(MouseEvent::ButtonDown(button));
                    }
                }
                SdlEvent::MouseButtonUp { mouse_btn, .. } => {
                    if let Some(button) = map_button(mouse_btn) {
                        events.send(MouseEvent::ButtonUp(button));
                    }
                }
                SdlEvent::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    events.send(KeyEvent::Down(map_key(keycode)));
                }
                SdlEvent::KeyUp {
                    keycode: Some(keycode), ..
                } => {
                    events.send(KeyEvent::Up(map_key(keycode)));
                }
                _ => {}
            }
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn map_button(button: SdlMouseButton) -> Option<MouseButton> {
    match button {
        SdlMouseButton::Left => Some(MouseButton::Left),
        SdlMouseButton::Middle => Some(MouseButton::Middle),
        SdlMouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

fn map_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::W => Key::W,
        Keycode::A => Key::A,
        Keycode::S => Key::S,
        Keycode::D => Key::D,
        Keycode::Escape => Key::Escape,
        _ => Key::Other,
    }
}
