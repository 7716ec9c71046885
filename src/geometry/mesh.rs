use nalgebra::Point3;

/// 三角形网格：顶点位置 + 扁平索引缓冲（每3个索引构成一个三角形，按绕序排列）
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    indices: Vec<u32>,
}

impl Mesh {
    /// 创建网格并校验索引缓冲
    ///
    /// 索引数量必须是3的倍数，且每个索引都必须落在 `[0, 顶点数)` 内。
    pub fn new(vertices: Vec<Point3<f32>>, indices: Vec<u32>) -> Result<Self, String> {
        if indices.len() % 3 != 0 {
            return Err(format!("索引数量 {} 不是3的倍数", indices.len()));
        }

        if let Some((pos, &index)) = indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertices.len())
        {
            return Err(format!(
                "第 {} 个索引 {} 越界（顶点数 {}）",
                pos,
                index,
                vertices.len()
            ));
        }

        Ok(Self { vertices, indices })
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 按索引顺序遍历三角形的三个顶点索引
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
    }
}
