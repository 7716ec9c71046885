use super::color::Color;
use nalgebra::Vector3;

/// Blinn-Phong 材质参数
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// 环境光反射系数 `ka`
    pub ambient: Color,
    /// 漫反射系数 `kd`
    pub diffuse: Color,
    /// 镜面反射系数 `ks`
    pub specular: Color,
    /// 高光指数 `p`
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::new(0.0, 1.0, 0.0),
            diffuse: Color::new(0.0, 0.5, 0.0),
            specular: Color::new(0.5, 0.5, 0.5),
            shininess: 32.0,
        }
    }
}

impl Material {
    /// 计算线性空间中的 Blinn-Phong 响应
    ///
    /// `ka·Ia + kd·Id·max(0, n·l) + ks·Id·max(0, n·h)^p`，其中 `h = normalize(l + v)`。
    /// `normal`、`light_dir`、`half_vector` 均应为单位向量（或零向量）。
    pub fn compute_response(
        &self,
        normal: &Vector3<f32>,
        light_dir: &Vector3<f32>,
        half_vector: &Vector3<f32>,
        ambient_intensity: f32,
        light_intensity: f32,
    ) -> Color {
        let n_dot_l = normal.dot(light_dir).max(0.0);
        let n_dot_h = normal.dot(half_vector).max(0.0);

        let ambient = self.ambient * ambient_intensity;
        let diffuse = self.diffuse * light_intensity * n_dot_l;
        let specular = self.specular * light_intensity * n_dot_h.powf(self.shininess);

        ambient + diffuse + specular
    }
}
