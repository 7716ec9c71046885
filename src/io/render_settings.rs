use crate::geometry::camera::{Camera, Frustum};
use crate::geometry::sphere::{
    DEFAULT_SPHERE_HEIGHT, DEFAULT_SPHERE_WIDTH, check_sphere_resolution,
};
use crate::material_system::light::Light;
use crate::material_system::materials::Material;
use log::warn;
use nalgebra::{Point3, Vector3};

/// 默认输出宽度
pub const DEFAULT_WIDTH: usize = 512;
/// 默认输出高度
pub const DEFAULT_HEIGHT: usize = 512;

/// 所有可通过TOML配置的渲染参数
///
/// 默认值即固定场景：32×16 球体、缩放2、平移 (0,0,-7)、单位相机、
/// 视锥 (-0.1, 0.1, 0.1, -0.1, -0.1, -1000)、512×512 视口、光源 (-4,4,-3)。
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    // ===== 文件路径设置 =====
    /// 输出文件的基础名称
    pub output: String,
    /// 输出图像的目录
    pub output_dir: String,
    /// 保存深度可视化图
    pub save_depth: bool,

    // ===== 渲染基础设置 =====
    /// 输出图像的宽度
    pub width: usize,
    /// 输出图像的高度
    pub height: usize,
    /// 顶点变换阶段启用多线程
    pub use_multithreading: bool,
    /// 着色后应用gamma编码
    pub use_gamma: bool,

    // ===== 网格分辨率 =====
    /// 经向采样数
    pub sphere_width: usize,
    /// 纬向环数（含两极）
    pub sphere_height: usize,

    // ===== 物体变换 =====
    /// 缩放 (sx, sy, sz)
    pub object_scale: Vector3<f32>,
    /// 平移 (tx, ty, tz)
    pub object_position: Vector3<f32>,

    // ===== 相机与投影 =====
    pub camera: Camera,
    pub frustum: Frustum,

    // ===== 光照 =====
    pub light: Light,
    /// 环境光强度 `Ia`
    pub ambient: f32,
    /// 着色时使用的视点位置
    pub view_position: Point3<f32>,

    // ===== 材质 =====
    pub material: Material,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output: "sphere".to_string(),
            output_dir: "output_rust".to_string(),
            save_depth: true,

            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            use_multithreading: true,
            use_gamma: true,

            sphere_width: DEFAULT_SPHERE_WIDTH,
            sphere_height: DEFAULT_SPHERE_HEIGHT,

            object_scale: Vector3::new(2.0, 2.0, 2.0),
            object_position: Vector3::new(0.0, 0.0, -7.0),

            camera: Camera::default(),
            frustum: Frustum::default(),

            light: Light::default(),
            ambient: 0.2,
            view_position: Point3::origin(),

            material: Material::default(),
        }
    }
}

/// 辅助函数用于解析逗号分隔的浮点数
pub fn parse_vec3(s: &str) -> Result<Vector3<f32>, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("需要3个逗号分隔的值: '{}'", s));
    }
    let x = parts[0]
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("无效数字 '{}': {}", parts[0], e))?;
    let y = parts[1]
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("无效数字 '{}': {}", parts[1], e))?;
    let z = parts[2]
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("无效数字 '{}': {}", parts[2], e))?;
    Ok(Vector3::new(x, y, z))
}

pub fn parse_point3(s: &str) -> Result<Point3<f32>, String> {
    parse_vec3(s).map(Point3::from)
}

/// 将向量格式化为 "x,y,z"，与 [`parse_vec3`] 互逆
pub fn format_vec3(v: &Vector3<f32>) -> String {
    format!("{},{},{}", v.x, v.y, v.z)
}

impl RenderSettings {
    /// 验证参数，返回第一个发现的错误
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("错误: 图像宽度和高度必须大于0".to_string());
        }

        if self.output_dir.trim().is_empty() {
            return Err("错误: 输出目录不能为空".to_string());
        }

        if self.output.trim().is_empty() {
            return Err("错误: 输出文件名不能为空".to_string());
        }

        check_sphere_resolution(self.sphere_width, self.sphere_height)
            .map_err(|e| format!("错误: {}", e))?;

        if self.frustum.is_degenerate() {
            return Err(format!("错误: 视锥体退化 {:?}", self.frustum));
        }

        if self.material.shininess < 0.0 {
            return Err("错误: 高光指数不能为负".to_string());
        }

        if !self.camera.is_orthonormal(1e-4) {
            warn!("相机基向量不是正交单位基，渲染结果可能变形");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RenderSettings::default().validate().is_ok());
    }

    #[test]
    fn test_parse_vec3() {
        assert_eq!(
            parse_vec3(" -4, 4 ,-3").unwrap(),
            Vector3::new(-4.0, 4.0, -3.0)
        );
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,a,2").is_err());
        let v = Vector3::new(0.5, -1.25, 7.0);
        assert_eq!(parse_vec3(&format_vec3(&v)).unwrap(), v);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_size = RenderSettings {
            width: 0,
            ..Default::default()
        };
        assert!(zero_size.validate().is_err());

        let tiny_sphere = RenderSettings {
            sphere_height: 2,
            ..Default::default()
        };
        assert!(tiny_sphere.validate().is_err());

        let huge_sphere = RenderSettings {
            sphere_width: 1 << 31,
            sphere_height: 16,
            ..Default::default()
        };
        assert!(huge_sphere.validate().is_err());

        let flat_frustum = RenderSettings {
            frustum: Frustum::new(-0.1, 0.1, 0.1, 0.1, -0.1, -1000.0),
            ..Default::default()
        };
        assert!(flat_frustum.validate().is_err());
    }
}
