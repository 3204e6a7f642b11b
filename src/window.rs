//! SDL2 window: presents the software framebuffer and samples input.
//!
//! The window runs the mouse in relative mode, so pointer motion arrives as
//! deltas without the cursor leaving the window.

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::input::{InputSample, InputSampler, Key, KeyboardState};
use crate::math::Vec2;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

/// Logical key for an SDL keycode.
fn map_keycode(keycode: Keycode) -> Option<Key> {
    let key = match keycode {
        Keycode::LShift | Keycode::RShift => Key::Shift,
        Keycode::Space => Key::Space,
        Keycode::Escape => Key::Escape,
        Keycode::W => Key::W,
        Keycode::A => Key::A,
        Keycode::S => Key::S,
        Keycode::D => Key::D,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        _ => return None,
    };
    Some(key)
}

pub struct Window {
    // Dropped before `texture_creator`, which it borrows from.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    keys: KeyboardState,
    pending_resize: Option<(u32, u32)>,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        sdl_context.mouse().set_relative_mouse_mode(true);

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        let texture = Self::create_texture(&texture_creator, width, height)?;

        log::info!("opened {}x{} window", width, height);
        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            keys: KeyboardState::new(),
            pending_resize: None,
            width,
            height,
        })
    }

    fn create_texture(
        creator: &sdl2::render::TextureCreator<sdl2::video::WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<sdl2::render::Texture<'static>, String> {
        // SAFETY: the creator is boxed and owned by the same `Window` as the
        // texture, and field order drops the texture first.
        let creator: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(creator as *const _) };
        creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Copies an ARGB8888 framebuffer to the screen.
    pub fn present(&mut self, buffer: &[u8], pitch: usize) -> Result<(), String> {
        self.texture
            .update(None, buffer, pitch)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Size reported by the last resize event, if any, since the previous call.
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.pending_resize.take()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

impl InputSampler for Window {
    fn sample(&mut self) -> InputSample {
        self.keys.begin_sample();
        let mut pointer_delta = Vec2::ZERO;
        let mut quit = false;

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => quit = true,
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = map_keycode(keycode) {
                        self.keys.key_down(key);
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = map_keycode(keycode) {
                        self.keys.key_up(key);
                    }
                }
                Event::MouseMotion { xrel, yrel, .. } => {
                    pointer_delta = pointer_delta + Vec2::from_pixels(xrel, yrel);
                }
                Event::Window {
                    win_event: WindowEvent::Resized(w, h),
                    ..
                } => self.pending_resize = Some((w.max(1) as u32, h.max(1) as u32)),
                Event::Window {
                    win_event: WindowEvent::FocusLost,
                    ..
                } => self.keys.release_all(),
                _ => {}
            }
        }

        InputSample {
            pointer_delta,
            keys: self.keys,
            quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_are_mapped() {
        assert_eq!(map_keycode(Keycode::W), Some(Key::W));
        assert_eq!(map_keycode(Keycode::RShift), Some(Key::Shift));
        assert_eq!(map_keycode(Keycode::Escape), Some(Key::Escape));
        assert_eq!(map_keycode(Keycode::Q), None);
    }
}
