use log::warn;
use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

/// 变换矩阵工厂，提供创建各种变换矩阵的静态方法
pub struct TransformFactory;
impl TransformFactory {
    /// 创建平移矩阵
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(translation)
    }

    /// 创建非均匀缩放矩阵
    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(scale)
    }

    /// 创建建模矩阵：先缩放，后平移
    ///
    /// 结果为 `[[sx,0,0,tx],[0,sy,0,ty],[0,0,sz,tz],[0,0,0,1]]`
    pub fn modeling(scale: &Vector3<f32>, translation: &Vector3<f32>) -> Matrix4<f32> {
        Self::translation(translation) * Self::scaling_nonuniform(scale)
    }
}

/// 计算法线变换矩阵（模型矩阵的逆转置）
pub fn compute_normal_matrix(model_matrix: &Matrix4<f32>) -> Matrix3<f32> {
    model_matrix.try_inverse().map_or_else(
        || {
            warn!("模型矩阵不可逆，使用单位矩阵代替法线矩阵");
            Matrix3::identity()
        },
        |inv| inv.transpose().fixed_view::<3, 3>(0, 0).into_owned(),
    )
}

/// 透视除法：`w != 0` 时 `x, y, z /= w` 且 `w = 1`；`w == 0` 时原样返回
#[inline]
pub fn perspective_divide(clip: Vector4<f32>) -> Vector4<f32> {
    if clip.w != 0.0 {
        Vector4::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w, 1.0)
    } else {
        clip
    }
}

/// 视口变换：NDC `[-1, 1]` 映射到像素坐标 `[0, width] × [0, height]`
///
/// y 轴不翻转，z 保持不变作为深度测试值。
#[inline]
pub fn viewport_transform(ndc: Vector4<f32>, width: f32, height: f32) -> Vector4<f32> {
    Vector4::new(
        (ndc.x + 1.0) * width * 0.5,
        (ndc.y + 1.0) * height * 0.5,
        ndc.z,
        ndc.w,
    )
}
