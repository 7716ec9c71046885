use super::interpolation::normalize_or_zero;
use super::mesh::Mesh;
use nalgebra::Vector3;

/// 估计逐顶点法线
///
/// 每个三角形的面法线为 `normalize((v1 - v0) × (v2 - v0))`，累加到三个顶点上，
/// 最后逐顶点归一化。这是不加权的平均（不按面积或角度加权）。
/// 没有任何关联三角形的顶点得到零向量。
pub fn estimate_vertex_normals(mesh: &Mesh) -> Vec<Vector3<f32>> {
    let vertices = mesh.vertices();
    let mut normals = vec![Vector3::zeros(); vertices.len()];

    for [i0, i1, i2] in mesh.triangles() {
        let p0 = vertices[i0];
        let edge1 = vertices[i1] - p0;
        let edge2 = vertices[i2] - p0;
        let face_normal = normalize_or_zero(&edge1.cross(&edge2));

        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    for normal in normals.iter_mut() {
        *normal = normalize_or_zero(normal);
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::sphere::generate_uv_sphere;
    use nalgebra::Point3;

    #[test]
    fn test_sphere_normals_unit_and_outward() {
        let mesh = generate_uv_sphere(32, 16).unwrap();
        let normals = estimate_vertex_normals(&mesh);
        assert_eq!(normals.len(), mesh.vertex_count());

        for (n, p) in normals.iter().zip(mesh.vertices()) {
            assert!((n.norm() - 1.0).abs() < 1e-5);
            assert!(n.dot(&p.coords) > 0.0, "法线应朝外: n={:?} p={:?}", n, p);
        }
    }

    #[test]
    fn test_unweighted_average() {
        // 顶点0被两个面共享：一个大三角形朝+z，一个小三角形朝+x
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(0.0, 0.1, 0.0),
            Point3::new(0.0, 0.0, 0.1),
        ];
        let mesh = Mesh::new(vertices, vec![0, 1, 2, 0, 3, 4]).unwrap();
        let normals = estimate_vertex_normals(&mesh);

        let expected = Vector3::new(1.0, 0.0, 1.0).normalize();
        assert!((normals[0] - expected).norm() < 1e-5);
        assert!((normals[1] - Vector3::z()).norm() < 1e-5);
        assert!((normals[3] - Vector3::x()).norm() < 1e-5);
    }

    #[test]
    fn test_isolated_vertex_gets_zero_normal() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        ];
        let mesh = Mesh::new(vertices, vec![0, 1, 2]).unwrap();
        let normals = estimate_vertex_normals(&mesh);
        assert_eq!(normals[3], Vector3::zeros());
    }
}
