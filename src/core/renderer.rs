use crate::core::frame_buffer::FrameBuffer;
use crate::core::geometry_processor::GeometryProcessor;
use crate::core::rasterizer::{ShadingContext, rasterize_mesh};
use crate::geometry::normals::estimate_vertex_normals;
use crate::geometry::sphere::generate_uv_sphere;
use crate::io::render_settings::RenderSettings;
use log::{debug, info};
use std::time::Instant;

/// 渲染器：持有帧缓冲区，按设置完成一帧的完整管线
pub struct Renderer {
    pub frame_buffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            frame_buffer: FrameBuffer::new(width, height),
        }
    }

    /// 渲染一帧：生成球体 -> 估计法线 -> 顶点变换 -> 光栅化着色
    ///
    /// 设置校验失败时帧缓冲区保持不变。尺寸与设置不一致时重新分配缓冲区。
    pub fn render(&mut self, settings: &RenderSettings) -> Result<(), String> {
        settings.validate()?;

        let start_time = Instant::now();

        if self.frame_buffer.width != settings.width || self.frame_buffer.height != settings.height
        {
            debug!(
                "帧缓冲区尺寸 {}x{} -> {}x{}",
                self.frame_buffer.width, self.frame_buffer.height, settings.width, settings.height
            );
            self.frame_buffer = FrameBuffer::new(settings.width, settings.height);
        } else {
            self.frame_buffer.clear();
        }

        let mesh = generate_uv_sphere(settings.sphere_width, settings.sphere_height)?;
        let normals = estimate_vertex_normals(&mesh);
        debug!(
            "UV球体: {} 个顶点, {} 个三角形",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        let transform_start = Instant::now();
        let geometry = GeometryProcessor::transform_geometry(&mesh, &normals, settings);
        let transform_duration = transform_start.elapsed();

        let raster_start = Instant::now();
        let context = ShadingContext::from_settings(settings);
        let written = rasterize_mesh(&mesh, &geometry, &mut self.frame_buffer, &context);
        let raster_duration = raster_start.elapsed();

        debug!(
            "变换: {:?}, 光栅化: {:?}, 写入像素 {} 次",
            transform_duration, raster_duration, written
        );
        info!(
            "渲染完成 {}x{}, 耗时 {:?}",
            settings.width,
            settings.height,
            start_time.elapsed()
        );

        Ok(())
    }
}
