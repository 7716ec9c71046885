//! # phong-sphere
//!
//! CPU软件光栅化管线：生成UV球体网格，估计顶点法线，经建模、相机、投影与视口变换后
//! 逐像素做深度测试和 Blinn-Phong 着色，结果写入浮点RGB帧缓冲区。

pub mod core;
pub mod geometry;
pub mod io;
pub mod material_system;
pub mod utils;

pub use crate::core::frame_buffer::FrameBuffer;
pub use crate::core::renderer::Renderer;
pub use crate::io::render_settings::RenderSettings;
