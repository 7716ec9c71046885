use nalgebra::Vector3;

/// Represents an RGB color with float components [0.0, 1.0].
pub type Color = Vector3<f32>;

/// 显示伽马值
pub const GAMMA: f32 = 2.2;

/// 应用gamma编码，每个通道取 `1/2.2` 次幂
pub fn apply_gamma_correction(linear_color: &Color) -> Color {
    let inv_gamma = 1.0 / GAMMA;
    Color::new(
        linear_color.x.powf(inv_gamma),
        linear_color.y.powf(inv_gamma),
        linear_color.z.powf(inv_gamma),
    )
}

/// 将每个通道限制到 [0, 1]，NaN 归零
pub fn clamp_color(color: &Color) -> Color {
    color.map(|c| c.max(0.0).min(1.0))
}

/// 将 [0, 1] 浮点颜色转换为u8数组（不再做gamma处理）
pub fn rgb_to_u8(color: &Color) -> [u8; 3] {
    [
        (color.x * 255.0).clamp(0.0, 255.0) as u8,
        (color.y * 255.0).clamp(0.0, 255.0) as u8,
        (color.z * 255.0).clamp(0.0, 255.0) as u8,
    ]
}

/// Applies the JET colormap to normalized depth values.
///
/// Non-finite values stay black. Returns `None` when the slice length does not
/// match `width * height`.
pub fn apply_colormap_jet(
    normalized_depth: &[f32],
    width: usize,
    height: usize,
) -> Option<Vec<u8>> {
    let num_pixels = width * height;
    if normalized_depth.len() != num_pixels {
        return None;
    }

    let mut result = vec![0u8; num_pixels * 3];

    for (index, &depth) in normalized_depth.iter().enumerate() {
        if !depth.is_finite() {
            continue;
        }

        let value = depth.clamp(0.0, 1.0);

        let mut r = 0.0;
        let g;
        let mut b = 0.0;

        if value <= 0.25 {
            // Blue to Cyan
            b = 1.0;
            g = value * 4.0;
        } else if value <= 0.5 {
            // Cyan to Green
            g = 1.0;
            b = 1.0 - (value - 0.25) * 4.0;
        } else if value <= 0.75 {
            // Green to Yellow
            g = 1.0;
            r = (value - 0.5) * 4.0;
        } else {
            // Yellow to Red
            r = 1.0;
            g = 1.0 - (value - 0.75) * 4.0;
        }

        let [r_u8, g_u8, b_u8] = rgb_to_u8(&Color::new(r, g, b));
        let base_index = index * 3;
        result[base_index] = r_u8;
        result[base_index + 1] = g_u8;
        result[base_index + 2] = b_u8;
    }

    Some(result)
}
