// geometry/mod.rs
// 导出网格生成、法线估计与坐标变换相关模块
pub mod camera;
pub mod interpolation;
pub mod mesh;
pub mod normals;
pub mod sphere;
pub mod transform;
