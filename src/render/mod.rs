//! CPU reference backend.

pub mod color;
pub mod framebuffer;
pub mod rasterizer;
pub mod software;

pub use color::{pack_argb, unpack_argb, BACKGROUND};
pub use framebuffer::FrameBuffer;
pub use rasterizer::{EdgeFunctionRasterizer, Fragment, PixelShader, ScreenVertex};
pub use software::{DrawStats, SoftwareBackend};
