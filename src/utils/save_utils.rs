use crate::core::frame_buffer::FrameBuffer;
use crate::io::render_settings::RenderSettings;
use crate::material_system::color::apply_colormap_jet;
use image::ColorType;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// 保存RGB图像数据到PNG文件
///
/// # 参数
/// * `path` - 输出文件路径
/// * `data` - RGB数据（u8数组）
/// * `width` - 图像宽度
/// * `height` - 图像高度
pub fn save_image(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), String> {
    image::save_buffer(path, data, width, height, ColorType::Rgb8)
        .map_err(|e| format!("保存图像到 {} 时出错: {}", path.display(), e))?;
    info!("图像已保存到 {}", path.display());
    Ok(())
}

/// 将深度缓冲数据归一化到指定的百分位数范围
///
/// 有限值映射到 [0, 1]，非有限值（背景）保持为 +∞。
pub fn normalize_depth(depth_buffer: &[f32], min_percentile: f32, max_percentile: f32) -> Vec<f32> {
    let mut finite_depths: Vec<f32> = depth_buffer
        .iter()
        .copied()
        .filter(|d| d.is_finite())
        .collect();

    if finite_depths.is_empty() {
        warn!("深度缓冲区中没有有限值，跳过归一化");
        return vec![f32::INFINITY; depth_buffer.len()];
    }

    finite_depths.sort_unstable_by(|a, b| a.total_cmp(b));

    let last = finite_depths.len() - 1;
    let percentile_index =
        |p: f32| ((p / 100.0 * last as f32).round() as usize).min(last);

    let mut min_clip = finite_depths[percentile_index(min_percentile)];
    let mut max_clip = finite_depths[percentile_index(max_percentile)];

    if (max_clip - min_clip).abs() < 1e-6 {
        // 范围太小时退回到绝对最小/最大值
        min_clip = finite_depths[0];
        max_clip = finite_depths[last];
        if (max_clip - min_clip).abs() < 1e-6 {
            max_clip = min_clip + 1.0;
        }
    }
    debug!(
        "使用百分位数归一化深度: [{:.1}%, {:.1}%] -> [{:.4}, {:.4}]",
        min_percentile, max_percentile, min_clip, max_clip
    );

    let inv_range = 1.0 / (max_clip - min_clip);
    depth_buffer
        .iter()
        .map(|&depth| {
            if depth.is_finite() {
                ((depth.clamp(min_clip, max_clip) - min_clip) * inv_range).clamp(0.0, 1.0)
            } else {
                f32::INFINITY
            }
        })
        .collect()
}

fn output_path(output_dir: &str, output_name: &str, suffix: &str) -> PathBuf {
    Path::new(output_dir).join(format!("{}_{}.png", output_name, suffix))
}

/// 保存渲染结果：彩色图像，以及按设置保存JET伪彩色深度图
pub fn save_render_result(
    frame_buffer: &FrameBuffer,
    settings: &RenderSettings,
) -> Result<(), String> {
    std::fs::create_dir_all(&settings.output_dir)
        .map_err(|e| format!("创建输出目录 '{}' 失败: {}", settings.output_dir, e))?;

    let width = frame_buffer.width as u32;
    let height = frame_buffer.height as u32;

    let color_path = output_path(&settings.output_dir, &settings.output, "color");
    save_image(
        &color_path,
        &frame_buffer.get_color_buffer_bytes(),
        width,
        height,
    )?;

    if settings.save_depth {
        let depth_normalized = normalize_depth(&frame_buffer.get_depth_buffer_flipped(), 1.0, 99.0);
        // 反转：深度越小（通过深度测试者）越热
        let inverted: Vec<f32> = depth_normalized.iter().map(|&d| 1.0 - d).collect();
        let depth_colored = apply_colormap_jet(&inverted, frame_buffer.width, frame_buffer.height)
            .ok_or_else(|| "深度数据尺寸与帧缓冲区不一致".to_string())?;

        let depth_path = output_path(&settings.output_dir, &settings.output, "depth");
        save_image(&depth_path, &depth_colored, width, height)?;
    }

    Ok(())
}
