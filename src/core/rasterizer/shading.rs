use crate::geometry::interpolation::normalize_or_zero;
use crate::io::render_settings::RenderSettings;
use crate::material_system::color::{Color, apply_gamma_correction, clamp_color};
use crate::material_system::light::Light;
use crate::material_system::materials::Material;
use nalgebra::{Point3, Vector3};

/// 一次光栅化过程中不变的着色参数
#[derive(Debug, Clone, Copy)]
pub struct ShadingContext<'a> {
    pub material: &'a Material,
    pub light: &'a Light,
    pub view_position: Point3<f32>,
    pub ambient_intensity: f32,
    pub use_gamma: bool,
}

impl<'a> ShadingContext<'a> {
    pub fn from_settings(settings: &'a RenderSettings) -> Self {
        Self {
            material: &settings.material,
            light: &settings.light,
            view_position: settings.view_position,
            ambient_intensity: settings.ambient,
            use_gamma: settings.use_gamma,
        }
    }
}

/// 逐像素 Blinn-Phong 着色
///
/// 结果经gamma编码后限制在 [0, 1]。
pub fn shade_blinn_phong(
    normal: &Vector3<f32>,
    position: &Point3<f32>,
    context: &ShadingContext,
) -> Color {
    let n = normalize_or_zero(normal);
    let l = context.light.get_direction(position);
    let v = normalize_or_zero(&(context.view_position - position));
    let h = normalize_or_zero(&(l + v));

    let color = context.material.compute_response(
        &n,
        &l,
        &h,
        context.ambient_intensity,
        context.light.get_intensity(),
    );

    let encoded = if context.use_gamma {
        apply_gamma_correction(&color)
    } else {
        color
    };

    clamp_color(&encoded)
}
