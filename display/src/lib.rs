use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::{pixel, FrameBuffer};

#[cfg(feature = "sdl")]
pub use window::Display;

/// Formats a Chip-8 FrameBuffer as RGB24 pixels.
///
/// The result is the concatenated rows of the display, 3 bytes per pixel,
/// white for lit pixels and black otherwise.
///
/// # Arguments
/// * `frame` a packed Chip-8 FrameBuffer
pub fn frame_to_rgb(frame: &FrameBuffer) -> Vec<u8> {
    (0..DISPLAY_HEIGHT)
        .flat_map(|y| (0..DISPLAY_WIDTH).map(move |x| pixel(frame, x, y)))
        .flat_map(|lit| std::iter::repeat(u8::from(lit) * 255).take(3))
        .collect()
}

#[cfg(feature = "sdl")]
mod window {
    use sdl2::pixels::PixelFormatEnum;

    use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use chip8_core::FrameBuffer;

    use super::frame_to_rgb;

    /// # Display
    /// The Chip-8 display is composed of 64x32 pixels black/white pixels.
    /// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
    pub struct Display {
        canvas: sdl2::render::WindowCanvas,
    }

    impl Display {
        /// Creates a new display object bound to an sdl2 context.
        ///
        /// # Arguments
        /// * `sdl` an sdl2 context with which to draw
        /// * `scale` the size multiplier for each pixel
        pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
            let video_subsystem = sdl.video()?;
            let window = video_subsystem
                .window(
                    "Chip-8",
                    DISPLAY_WIDTH as u32 * scale,
                    DISPLAY_HEIGHT as u32 * scale,
                )
                .position_centered()
                .opengl()
                .build()
                .map_err(|e| e.to_string())?;
            let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

            Ok(Display { canvas })
        }

        /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
        ///
        /// # Arguments
        /// * `frame` a Chip-8 FrameBuffer
        pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
            let texture_creator = self.canvas.texture_creator();

            let mut texture = texture_creator
                .create_texture_streaming(
                    PixelFormatEnum::RGB24,
                    DISPLAY_WIDTH as u32,
                    DISPLAY_HEIGHT as u32,
                )
                .map_err(|e| e.to_string())?;

            let pixels = frame_to_rgb(frame);
            texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
                let row_bytes = DISPLAY_WIDTH * 3;
                for (y, row) in pixels.chunks(row_bytes).enumerate() {
                    buffer[y * pitch..y * pitch + row_bytes].copy_from_slice(row);
                }
            })?;

            self.canvas.copy(&texture, None, None)?;
            self.canvas.present();
            Ok(())
        }
    }
}
