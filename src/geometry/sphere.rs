//! UV球体网格生成
//!
//! 经向采样数为 `width`，纬向环数为 `height`（含两极）。内部环共 `height - 2` 条，
//! 两个极点顶点追加在最后。经向最后一个采样点不回绕到索引0，
//! 因此在 `phi = 0 / 2π` 处保留一条接缝。

use super::mesh::Mesh;
use nalgebra::Point3;
use std::f32::consts::PI;

/// 默认经向采样数
pub const DEFAULT_SPHERE_WIDTH: usize = 32;
/// 默认纬向环数（含两极）
pub const DEFAULT_SPHERE_HEIGHT: usize = 16;

/// 给定分辨率下的顶点数：`(height - 2) * width + 2`
pub fn sphere_vertex_count(width: usize, height: usize) -> usize {
    (height - 2) * width + 2
}

/// 给定分辨率下的三角形数：`(height - 2) * (width - 1) * 2`
pub fn sphere_triangle_count(width: usize, height: usize) -> usize {
    (height - 2) * (width - 1) * 2
}

/// 检查球体分辨率：`width >= 2`、`height >= 3`，且顶点数能用 `u32` 索引
pub fn check_sphere_resolution(width: usize, height: usize) -> Result<(), String> {
    if width < 2 || height < 3 {
        return Err(format!(
            "球体分辨率无效: width={} (需>=2), height={} (需>=3)",
            width, height
        ));
    }

    let vertex_count = (height - 2)
        .checked_mul(width)
        .and_then(|n| n.checked_add(2))
        .filter(|&n| n <= u32::MAX as usize);
    if vertex_count.is_none() {
        return Err(format!(
            "球体分辨率过大: {}×{} 的顶点数超出 u32 索引范围",
            width, height
        ));
    }

    Ok(())
}

/// 生成单位UV球体
///
/// 分辨率不满足 [`check_sphere_resolution`] 时返回错误。
pub fn generate_uv_sphere(width: usize, height: usize) -> Result<Mesh, String> {
    check_sphere_resolution(width, height)?;

    let mut vertices = Vec::with_capacity(sphere_vertex_count(width, height));

    for j in 1..height - 1 {
        let theta = j as f32 / (height - 1) as f32 * PI;
        for i in 0..width {
            let phi = i as f32 / (width - 1) as f32 * PI * 2.0;
            vertices.push(Point3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                -theta.sin() * phi.sin(),
            ));
        }
    }

    // 北极、南极
    vertices.push(Point3::new(0.0, 1.0, 0.0));
    vertices.push(Point3::new(0.0, -1.0, 0.0));

    let w = width as u32;
    let rings = (height - 2) as u32;
    let north = rings * w;
    let south = north + 1;

    let mut indices = Vec::with_capacity(3 * sphere_triangle_count(width, height));

    // 相邻内部环之间的四边形带，每个四边形拆成两个三角形
    for j in 0..rings - 1 {
        for i in 0..w - 1 {
            indices.extend_from_slice(&[j * w + i, (j + 1) * w + (i + 1), j * w + (i + 1)]);
            indices.extend_from_slice(&[j * w + i, (j + 1) * w + i, (j + 1) * w + (i + 1)]);
        }
    }

    // 两极的三角扇
    let last_ring = (rings - 1) * w;
    for i in 0..w - 1 {
        indices.extend_from_slice(&[north, i, i + 1]);
        indices.extend_from_slice(&[south, last_ring + i + 1, last_ring + i]);
    }

    Mesh::new(vertices, indices)
}
