use nalgebra::{Matrix4, Point3, Vector3};

/// 相机：由正交基 `u, v, w` 和视点 `eye` 定义
///
/// 相机看向 `-w` 方向，`u` 为右方向，`v` 为上方向。
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub u: Vector3<f32>,
    pub v: Vector3<f32>,
    pub w: Vector3<f32>,
    pub eye: Point3<f32>,
}

impl Default for Camera {
    /// 单位基、位于原点的相机（相机变换为恒等变换）
    fn default() -> Self {
        Self {
            u: Vector3::x(),
            v: Vector3::y(),
            w: Vector3::z(),
            eye: Point3::origin(),
        }
    }
}

impl Camera {
    pub fn new(u: Vector3<f32>, v: Vector3<f32>, w: Vector3<f32>, eye: Point3<f32>) -> Self {
        Self { u, v, w, eye }
    }

    /// 由视点、目标点与上方向构建正交基
    ///
    /// 视点与目标重合，或上方向与视线平行时无法构成基，返回错误。
    pub fn look_at(
        eye: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
    ) -> Result<Self, String> {
        let w = (eye - target)
            .try_normalize(f32::EPSILON)
            .ok_or_else(|| format!("相机视点 {:?} 与目标点 {:?} 重合", eye, target))?;
        let u = up
            .cross(&w)
            .try_normalize(f32::EPSILON)
            .ok_or_else(|| format!("上方向 {:?} 与视线方向平行或为零", up))?;
        let v = w.cross(&u);
        Ok(Self { u, v, w, eye })
    }

    /// 视图矩阵（世界坐标 -> 相机坐标）
    ///
    /// 行向量为 `u, v, w`，平移为 `-(u·e, v·e, w·e)`，即以基为列、以 `e` 为平移的
    /// 相机到世界矩阵的逆。
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let e = self.eye.coords;
        #[rustfmt::skip]
        let view = Matrix4::new(
            self.u.x, self.u.y, self.u.z, -self.u.dot(&e),
            self.v.x, self.v.y, self.v.z, -self.v.dot(&e),
            self.w.x, self.w.y, self.w.z, -self.w.dot(&e),
            0.0,      0.0,      0.0,      1.0,
        );
        view
    }

    /// 基向量是否为单位长度且两两正交
    pub fn is_orthonormal(&self, tolerance: f32) -> bool {
        let unit = |a: &Vector3<f32>| (a.norm() - 1.0).abs() <= tolerance;
        unit(&self.u)
            && unit(&self.v)
            && unit(&self.w)
            && self.u.dot(&self.v).abs() <= tolerance
            && self.v.dot(&self.w).abs() <= tolerance
            && self.w.dot(&self.u).abs() <= tolerance
    }
}

/// 视锥体参数 `(l, r, t, b, n, f)`
///
/// 近平面与远平面使用相机坐标中的有符号 z 值（朝 `-z` 看时为负）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            left: -0.1,
            right: 0.1,
            top: 0.1,
            bottom: -0.1,
            near: -0.1,
            far: -1000.0,
        }
    }
}

impl Frustum {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            near,
            far,
        }
    }

    /// 透视投影矩阵（相机坐标 -> 裁剪坐标）
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let Self {
            left: l,
            right: r,
            top: t,
            bottom: b,
            near: n,
            far: f,
        } = *self;

        #[rustfmt::skip]
        let projection = Matrix4::new(
            2.0 * n / (r - l), 0.0,               (l + r) / (l - r), 0.0,
            0.0,               2.0 * n / (t - b), (b + t) / (b - t), 0.0,
            0.0,               0.0,               (f + n) / (n - f), (2.0 * f * n) / (f - n),
            0.0,               0.0,               1.0,               0.0,
        );
        projection
    }

    /// 宽、高或深度为零的视锥体会产生除零
    pub fn is_degenerate(&self) -> bool {
        self.right == self.left || self.top == self.bottom || self.near == self.far
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    #[test]
    fn test_default_camera_is_identity() {
        let camera = Camera::default();
        assert_eq!(camera.view_matrix(), Matrix4::identity());
        assert!(camera.is_orthonormal(1e-6));
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let camera = Camera::look_at(
            Point3::new(3.0, 2.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::y(),
        )
        .unwrap();
        assert!(camera.is_orthonormal(1e-5));

        let eye_cam = camera.view_matrix() * camera.eye.to_homogeneous();
        assert!(eye_cam.xyz().norm() < 1e-5);

        // 目标点位于相机前方（-w 方向）
        let target_cam = camera.view_matrix() * Point3::origin().to_homogeneous();
        assert!(target_cam.x.abs() < 1e-5 && target_cam.y.abs() < 1e-5);
        assert!(target_cam.z < 0.0);
    }

    #[test]
    fn test_rotated_basis() {
        // 绕 y 轴转 90 度：相机看向 -x
        let camera = Camera::new(
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::y(),
            Vector3::x(),
            Point3::origin(),
        );
        let p = camera.view_matrix() * Vector4::new(-5.0, 0.0, 0.0, 1.0);
        assert!((p - Vector4::new(0.0, 0.0, -5.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_view_matrix_is_inverse_of_camera_frame() {
        // 非单位基且视点不在原点时，两种约定才有区别
        let camera = Camera::new(
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::y(),
            Vector3::x(),
            Point3::new(2.0, 1.0, 3.0),
        );
        let view = camera.view_matrix();

        #[rustfmt::skip]
        let camera_to_world = Matrix4::new(
            0.0,  0.0, 1.0, 2.0,
            0.0,  1.0, 0.0, 1.0,
            -1.0, 0.0, 0.0, 3.0,
            0.0,  0.0, 0.0, 1.0,
        );
        assert!((view * camera_to_world - Matrix4::identity()).norm() < 1e-6);
        assert!((view - camera_to_world).norm() > 1.0);

        // 第一行是 u，平移分量是 -(u·e)
        assert_eq!(view[(0, 0)], 0.0);
        assert_eq!(view[(0, 2)], -1.0);
        assert_eq!(view[(0, 3)], 3.0);
        assert_eq!(view[(2, 0)], 1.0);
        assert_eq!(view[(2, 3)], -2.0);
    }

    #[test]
    fn test_look_at_rejects_degenerate_input() {
        let eye = Point3::new(0.0, 0.0, 5.0);
        assert!(Camera::look_at(eye, eye, Vector3::y()).is_err());
        assert!(Camera::look_at(eye, Point3::origin(), Vector3::z()).is_err());
        assert!(Camera::look_at(eye, Point3::origin(), Vector3::zeros()).is_err());
    }

    #[test]
    fn test_projection_matrix_entries() {
        let m = Frustum::default().projection_matrix();
        assert!((m[(0, 0)] + 1.0).abs() < 1e-6);
        assert!((m[(1, 1)] + 1.0).abs() < 1e-6);
        assert_eq!(m[(3, 2)], 1.0);
        assert_eq!(m[(3, 3)], 0.0);
        assert!(!Frustum::default().is_degenerate());
        assert!(Frustum::new(0.1, 0.1, 0.1, -0.1, -0.1, -10.0).is_degenerate());
    }
}
