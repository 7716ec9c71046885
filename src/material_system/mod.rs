// material_system/mod.rs
// 导出颜色、光源与材质相关模块
pub mod color;
pub mod light;
pub mod materials;
