// utils/mod.rs
// 输出相关工具函数
pub mod save_utils;
