use crate::core::geometry_processor::GeometryResult;
use crate::geometry::interpolation::edge_denominator;
use nalgebra::{Point2, Point3, Vector3};

/// 顶点渲染数据
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRenderData {
    pub pix: Point2<f32>,
    pub z: f32,
    pub normal: Vector3<f32>,
    pub position_world: Point3<f32>,
}

/// 三角形光栅化数据
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleData {
    pub vertices: [VertexRenderData; 3],
}

impl TriangleData {
    /// 从几何结果中取出三个顶点的屏幕坐标、法线与世界坐标
    pub fn from_geometry(indices: [usize; 3], geometry: &GeometryResult) -> Self {
        let vertex = |i: usize| {
            let screen = geometry.screen_coords[i];
            VertexRenderData {
                pix: Point2::new(screen.x, screen.y),
                z: screen.z,
                normal: geometry.world_normals[i],
                position_world: geometry.world_positions[i],
            }
        };

        Self {
            vertices: [vertex(indices[0]), vertex(indices[1]), vertex(indices[2])],
        }
    }

    /// 带符号的二倍面积，为零表示退化三角形
    pub fn denominator(&self) -> f32 {
        edge_denominator(
            self.vertices[0].pix,
            self.vertices[1].pix,
            self.vertices[2].pix,
        )
    }
}

/// 屏幕空间包围盒（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    /// 最小值向下取整、最大值向上取整，并限制在 `[0, width-1] × [0, height-1]`
    ///
    /// 三角形完全落在缓冲区之外时返回 `None`。
    pub fn from_triangle(triangle: &TriangleData, width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let v0 = &triangle.vertices[0].pix;
        let v1 = &triangle.vertices[1].pix;
        let v2 = &triangle.vertices[2].pix;

        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i64).max(0);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i64).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i64).min(width as i64 - 1);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i64).min(height as i64 - 1);

        if max_x < min_x || max_y < min_y {
            None
        } else {
            Some(Self {
                min_x: min_x as usize,
                min_y: min_y as usize,
                max_x: max_x as usize,
                max_y: max_y as usize,
            })
        }
    }

    pub fn for_each_pixel<F>(&self, mut callback: F)
    where
        F: FnMut(usize, usize),
    {
        for y in self.min_y..=self.max_y {
            for x in self.min_x..=self.max_x {
                callback(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_triangle(points: [(f32, f32); 3], z: f32) -> TriangleData {
        let vertex = |(x, y): (f32, f32)| VertexRenderData {
            pix: Point2::new(x, y),
            z,
            normal: Vector3::z(),
            position_world: Point3::new(0.0, 0.0, -5.0),
        };
        TriangleData {
            vertices: [vertex(points[0]), vertex(points[1]), vertex(points[2])],
        }
    }

    #[test]
    fn test_bbox_floor_ceil() {
        let tri = flat_triangle([(1.2, 1.7), (5.5, 2.1), (3.0, 6.9)], 0.0);
        let bbox = BoundingBox::from_triangle(&tri, 16, 16).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                min_x: 1,
                min_y: 1,
                max_x: 6,
                max_y: 7
            }
        );
    }

    #[test]
    fn test_bbox_clamped_to_buffer() {
        let tri = flat_triangle([(-5.0, -5.0), (20.0, 0.0), (0.0, 30.0)], 0.0);
        let bbox = BoundingBox::from_triangle(&tri, 8, 8).unwrap();
        assert_eq!((bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y), (0, 0, 7, 7));

        let mut count = 0;
        bbox.for_each_pixel(|_, _| count += 1);
        assert_eq!(count, 64);
    }

    #[test]
    fn test_bbox_offscreen() {
        let tri = flat_triangle([(-9.0, -9.0), (-5.0, -9.0), (-7.0, -4.0)], 0.0);
        assert!(BoundingBox::from_triangle(&tri, 8, 8).is_none());
        let tri = flat_triangle([(20.0, 1.0), (25.0, 1.0), (22.0, 4.0)], 0.0);
        assert!(BoundingBox::from_triangle(&tri, 8, 8).is_none());
    }

    #[test]
    fn test_degenerate_denominator() {
        let tri = flat_triangle([(1.0, 1.0), (1.0, 1.0), (4.0, 3.0)], 0.0);
        assert_eq!(tri.denominator(), 0.0);
    }
}
