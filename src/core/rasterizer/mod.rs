//! # 三角形光栅化模块
//!
//! 串行扫描包围盒，逐像素做覆盖测试、深度测试、插值与 Blinn-Phong 着色

pub mod pixel_processor;
pub mod shading;
pub mod triangle_data;

// 重新导出主要类型和函数
pub use pixel_processor::{rasterize_mesh, rasterize_triangle};
pub use shading::{ShadingContext, shade_blinn_phong};
pub use triangle_data::{BoundingBox, TriangleData, VertexRenderData};
