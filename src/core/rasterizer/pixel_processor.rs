use super::shading::{ShadingContext, shade_blinn_phong};
use super::triangle_data::{BoundingBox, TriangleData};
use crate::core::frame_buffer::FrameBuffer;
use crate::core::geometry_processor::GeometryResult;
use crate::geometry::interpolation::{
    barycentric_weights, interpolate_depth, interpolate_normal, interpolate_position,
    is_inside_triangle,
};
use crate::geometry::mesh::Mesh;
use nalgebra::Point2;

/// 按索引顺序光栅化整个网格
///
/// 三角形严格串行处理，深度相等时先绘制者保留。返回写入过的像素次数。
pub fn rasterize_mesh(
    mesh: &Mesh,
    geometry: &GeometryResult,
    frame_buffer: &mut FrameBuffer,
    context: &ShadingContext,
) -> usize {
    mesh.triangles()
        .map(|indices| {
            let triangle = TriangleData::from_geometry(indices, geometry);
            rasterize_triangle(&triangle, frame_buffer, context)
        })
        .sum()
}

/// 光栅化单个三角形，返回通过深度测试并写入的像素数
///
/// 退化三角形（二倍面积为零）不写入任何像素。
pub fn rasterize_triangle(
    triangle: &TriangleData,
    frame_buffer: &mut FrameBuffer,
    context: &ShadingContext,
) -> usize {
    let denom = triangle.denominator();
    if denom == 0.0 {
        return 0;
    }

    let bbox = match BoundingBox::from_triangle(triangle, frame_buffer.width, frame_buffer.height)
    {
        Some(bbox) => bbox,
        None => return 0,
    };

    let mut written = 0;
    bbox.for_each_pixel(|x, y| {
        if process_pixel(triangle, denom, x, y, frame_buffer, context) {
            written += 1;
        }
    });
    written
}

/// 核心像素处理：覆盖测试 -> 深度测试 -> 插值 -> 着色 -> 写入
fn process_pixel(
    triangle: &TriangleData,
    denom: f32,
    x: usize,
    y: usize,
    frame_buffer: &mut FrameBuffer,
    context: &ShadingContext,
) -> bool {
    let [v0, v1, v2] = &triangle.vertices;
    let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);

    let bary = barycentric_weights(pixel_center, v0.pix, v1.pix, v2.pix, denom);
    if !is_inside_triangle(bary) {
        return false;
    }

    let depth = interpolate_depth(bary, v0.z, v1.z, v2.z);
    if !frame_buffer.depth_test_and_set(x, y, depth) {
        return false;
    }

    let normal = interpolate_normal(bary, v0.normal, v1.normal, v2.normal);
    let position = interpolate_position(
        bary,
        v0.position_world,
        v1.position_world,
        v2.position_world,
    );

    let color = shade_blinn_phong(&normal, &position, context);
    frame_buffer.set_color(x, y, &color);
    true
}
