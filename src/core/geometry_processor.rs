use crate::geometry::camera::{Camera, Frustum};
use crate::geometry::interpolation::normalize_or_zero;
use crate::geometry::mesh::Mesh;
use crate::geometry::transform::{
    TransformFactory, compute_normal_matrix, perspective_divide, viewport_transform,
};
use crate::io::render_settings::RenderSettings;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};
use rayon::prelude::*;

/// 几何变换结果，三张表均与网格顶点一一对应
#[derive(Debug, Clone)]
pub struct GeometryResult {
    /// 屏幕坐标：x, y 为像素坐标，z 为透视除法后的深度
    pub screen_coords: Vec<Vector4<f32>>,
    /// 建模变换后的世界坐标，用于着色
    pub world_positions: Vec<Point3<f32>>,
    /// 世界空间法线
    pub world_normals: Vec<Vector3<f32>>,
}

/// 单个顶点的变换管线：建模 -> 相机 -> 投影 -> 透视除法 -> 视口
///
/// 各阶段逐个矩阵相乘，不预先合并。
#[derive(Debug, Clone)]
pub struct VertexPipeline {
    pub model_matrix: Matrix4<f32>,
    pub view_matrix: Matrix4<f32>,
    pub projection_matrix: Matrix4<f32>,
    pub normal_matrix: Matrix3<f32>,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl VertexPipeline {
    pub fn new(
        model_matrix: Matrix4<f32>,
        camera: &Camera,
        frustum: &Frustum,
        viewport_width: usize,
        viewport_height: usize,
    ) -> Self {
        Self {
            model_matrix,
            view_matrix: camera.view_matrix(),
            projection_matrix: frustum.projection_matrix(),
            normal_matrix: compute_normal_matrix(&model_matrix),
            viewport_width: viewport_width as f32,
            viewport_height: viewport_height as f32,
        }
    }

    pub fn from_settings(settings: &RenderSettings) -> Self {
        let model_matrix =
            TransformFactory::modeling(&settings.object_scale, &settings.object_position);
        Self::new(
            model_matrix,
            &settings.camera,
            &settings.frustum,
            settings.width,
            settings.height,
        )
    }

    /// 变换一个物体空间顶点，返回 (世界坐标, 屏幕坐标)
    pub fn transform_vertex(&self, position: &Point3<f32>) -> (Point3<f32>, Vector4<f32>) {
        let world = self.model_matrix * position.to_homogeneous();
        let camera = self.view_matrix * world;
        let clip = self.projection_matrix * camera;
        let ndc = perspective_divide(clip);
        let screen = viewport_transform(ndc, self.viewport_width, self.viewport_height);

        (Point3::new(world.x, world.y, world.z), screen)
    }

    pub fn transform_normal(&self, normal: &Vector3<f32>) -> Vector3<f32> {
        normalize_or_zero(&(self.normal_matrix * normal))
    }
}

/// 几何处理器，负责顶点变换和几何数据准备
pub struct GeometryProcessor;

impl GeometryProcessor {
    /// 执行完整的几何变换管线
    ///
    /// 顶点之间相互独立，`use_multithreading` 时使用 rayon 并行，结果与串行完全一致。
    pub fn transform_geometry(
        mesh: &Mesh,
        normals: &[Vector3<f32>],
        settings: &RenderSettings,
    ) -> GeometryResult {
        let pipeline = VertexPipeline::from_settings(settings);
        Self::transform_with_pipeline(mesh, normals, &pipeline, settings.use_multithreading)
    }

    pub fn transform_with_pipeline(
        mesh: &Mesh,
        normals: &[Vector3<f32>],
        pipeline: &VertexPipeline,
        parallel: bool,
    ) -> GeometryResult {
        let (world_positions, screen_coords): (Vec<_>, Vec<_>) = if parallel {
            mesh.vertices()
                .par_iter()
                .map(|p| pipeline.transform_vertex(p))
                .unzip()
        } else {
            mesh.vertices()
                .iter()
                .map(|p| pipeline.transform_vertex(p))
                .unzip()
        };

        let world_normals = if parallel {
            normals
                .par_iter()
                .map(|n| pipeline.transform_normal(n))
                .collect()
        } else {
            normals
                .iter()
                .map(|n| pipeline.transform_normal(n))
                .collect()
        };

        GeometryResult {
            screen_coords,
            world_positions,
            world_normals,
        }
    }
}
