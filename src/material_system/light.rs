use crate::geometry::interpolation::normalize_or_zero;
use nalgebra::{Point3, Vector3};

/// 点光源（无衰减）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    /// 光源强度 `Id`
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Point3::new(-4.0, 4.0, -3.0),
            intensity: 1.0,
        }
    }
}

impl Light {
    pub fn point(position: Point3<f32>, intensity: f32) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// 获取光源的方向（从表面点指向光源，单位向量）
    pub fn get_direction(&self, point: &Point3<f32>) -> Vector3<f32> {
        normalize_or_zero(&(self.position - point))
    }

    pub fn get_intensity(&self) -> f32 {
        self.intensity
    }
}
