use crate::material_system::color::{Color, rgb_to_u8};

/// 帧缓冲区实现，存储渲染结果
///
/// 一次光栅化过程独占该缓冲区，开始时重置。
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    /// 每像素一个深度值，初始为 +∞，数值越小越优先
    depth_buffer: Vec<f32>,
    /// 行优先的RGB浮点颜色，长度 `width * height * 3`，取值 [0, 1]
    color_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let num_pixels = width * height;
        FrameBuffer {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; num_pixels],
            color_buffer: vec![0.0; num_pixels * 3],
        }
    }

    /// 深度重置为 +∞，颜色重置为黑色
    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.color_buffer.fill(0.0);
    }

    #[inline]
    pub fn pixel_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth_buffer[self.pixel_index(x, y)]
    }

    #[inline]
    pub fn color_at(&self, x: usize, y: usize) -> Color {
        let base = self.pixel_index(x, y) * 3;
        Color::new(
            self.color_buffer[base],
            self.color_buffer[base + 1],
            self.color_buffer[base + 2],
        )
    }

    /// 深度测试：`depth` 严格小于当前值时写入深度并返回 true
    #[inline]
    pub fn depth_test_and_set(&mut self, x: usize, y: usize, depth: f32) -> bool {
        let index = self.pixel_index(x, y);
        if depth < self.depth_buffer[index] {
            self.depth_buffer[index] = depth;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn set_color(&mut self, x: usize, y: usize, color: &Color) {
        let base = self.pixel_index(x, y) * 3;
        self.color_buffer[base] = color.x;
        self.color_buffer[base + 1] = color.y;
        self.color_buffer[base + 2] = color.z;
    }

    /// 颜色缓冲区的只读视图
    pub fn color_buffer(&self) -> &[f32] {
        &self.color_buffer
    }

    /// 深度缓冲区的只读视图
    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// 获取用于保存图像的字节数据
    ///
    /// 缓冲区第0行对应视口底部，图像第0行为顶部，因此按行翻转。
    pub fn get_color_buffer_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.color_buffer.len());
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                bytes.extend_from_slice(&rgb_to_u8(&self.color_at(x, y)));
            }
        }
        bytes
    }

    /// 深度数据，按与 [`Self::get_color_buffer_bytes`] 相同的行序翻转
    pub fn get_depth_buffer_flipped(&self) -> Vec<f32> {
        (0..self.height)
            .rev()
            .flat_map(|y| {
                self.depth_buffer[y * self.width..(y + 1) * self.width]
                    .iter()
                    .copied()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_clear() {
        let mut fb = FrameBuffer::new(4, 3);
        assert_eq!(fb.depth_buffer().len(), 12);
        assert_eq!(fb.color_buffer().len(), 36);
        assert!(fb.depth_buffer().iter().all(|d| *d == f32::INFINITY));

        assert!(fb.depth_test_and_set(1, 2, -0.5));
        fb.set_color(1, 2, &Color::new(0.1, 0.2, 0.3));
        fb.clear();
        assert!(fb.depth_buffer().iter().all(|d| *d == f32::INFINITY));
        assert!(fb.color_buffer().iter().all(|c| *c == 0.0));
    }

    #[test]
    fn test_depth_test_keeps_smaller() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.depth_test_and_set(0, 0, 0.5));
        assert!(!fb.depth_test_and_set(0, 0, 0.7));
        assert!(!fb.depth_test_and_set(0, 0, 0.5));
        assert!(fb.depth_test_and_set(0, 0, 0.2));
        assert_eq!(fb.depth_at(0, 0), 0.2);
    }

    #[test]
    fn test_color_layout_and_flip() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_color(1, 0, &Color::new(1.0, 0.0, 0.0));
        // 行优先，像素 (1, 0) 的起始下标为 3
        assert_eq!(&fb.color_buffer()[3..6], &[1.0, 0.0, 0.0]);

        let bytes = fb.get_color_buffer_bytes();
        // 缓冲区第0行在图像中位于最后一行
        assert_eq!(&bytes[9..12], &[255, 0, 0]);
        assert_eq!(&bytes[0..3], &[0, 0, 0]);

        fb.depth_test_and_set(0, 0, 0.25);
        let depth = fb.get_depth_buffer_flipped();
        assert_eq!(depth[2], 0.25);
    }
}
