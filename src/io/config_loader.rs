use crate::geometry::camera::Camera;
use crate::io::render_settings::{RenderSettings, format_vec3, parse_point3, parse_vec3};
use log::debug;
use nalgebra::Vector3;
use std::path::Path;
use toml::Value;

/// TOML配置管理器 - 统一处理所有配置的读写
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    /// 从TOML文件加载完整配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderSettings, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("读取配置文件失败: {}", e))?;

        Self::load_from_content(&content)
    }

    /// 从TOML内容字符串加载配置
    pub fn load_from_content(content: &str) -> Result<RenderSettings, String> {
        let toml_value: Value =
            toml::from_str(content).map_err(|e| format!("解析TOML失败: {}", e))?;

        let settings = Self::parse_toml_to_settings(toml_value)?;
        settings.validate()?;
        Ok(settings)
    }

    /// 保存配置到TOML文件
    pub fn save_to_file<P: AsRef<Path>>(settings: &RenderSettings, path: P) -> Result<(), String> {
        let toml_content = Self::settings_to_toml(settings);
        std::fs::write(path, toml_content).map_err(|e| format!("写入配置文件失败: {}", e))
    }

    /// 以默认设置生成示例配置文件
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<(), String> {
        Self::save_to_file(&RenderSettings::default(), path)
            .map_err(|e| format!("创建示例配置失败: {}", e))
    }

    // ===== TOML -> RenderSettings 转换 =====

    fn parse_toml_to_settings(toml: Value) -> Result<RenderSettings, String> {
        let mut settings = RenderSettings::default();

        if let Some(files) = toml.get("files").and_then(|v| v.as_table()) {
            Self::parse_files_section(&mut settings, files)?;
        }
        if let Some(render) = toml.get("render").and_then(|v| v.as_table()) {
            Self::parse_render_section(&mut settings, render)?;
        }
        if let Some(mesh) = toml.get("mesh").and_then(|v| v.as_table()) {
            Self::parse_mesh_section(&mut settings, mesh)?;
        }
        if let Some(object) = toml.get("object").and_then(|v| v.as_table()) {
            Self::parse_object_section(&mut settings, object)?;
        }
        if let Some(camera) = toml.get("camera").and_then(|v| v.as_table()) {
            Self::parse_camera_section(&mut settings, camera)?;
        }
        if let Some(frustum) = toml.get("frustum").and_then(|v| v.as_table()) {
            Self::parse_frustum_section(&mut settings, frustum)?;
        }
        if let Some(lighting) = toml.get("lighting").and_then(|v| v.as_table()) {
            Self::parse_lighting_section(&mut settings, lighting)?;
        }
        if let Some(material) = toml.get("material").and_then(|v| v.as_table()) {
            Self::parse_material_section(&mut settings, material)?;
        }

        Ok(settings)
    }

    fn parse_files_section(
        settings: &mut RenderSettings,
        files: &toml::Table,
    ) -> Result<(), String> {
        if let Some(output) = files.get("output").and_then(|v| v.as_str()) {
            settings.output = output.to_string();
        }
        if let Some(output_dir) = files.get("output_dir").and_then(|v| v.as_str()) {
            settings.output_dir = output_dir.to_string();
        }
        if let Some(save_depth) = files.get("save_depth").and_then(|v| v.as_bool()) {
            settings.save_depth = save_depth;
        }
        Ok(())
    }

    fn parse_render_section(
        settings: &mut RenderSettings,
        render: &toml::Table,
    ) -> Result<(), String> {
        if let Some(width) = Self::get_usize(render, "width")? {
            settings.width = width;
        }
        if let Some(height) = Self::get_usize(render, "height")? {
            settings.height = height;
        }
        if let Some(mt) = render.get("use_multithreading").and_then(|v| v.as_bool()) {
            settings.use_multithreading = mt;
        }
        if let Some(use_gamma) = render.get("use_gamma").and_then(|v| v.as_bool()) {
            settings.use_gamma = use_gamma;
        }
        Ok(())
    }

    fn parse_mesh_section(settings: &mut RenderSettings, mesh: &toml::Table) -> Result<(), String> {
        if let Some(width) = Self::get_usize(mesh, "width")? {
            settings.sphere_width = width;
        }
        if let Some(height) = Self::get_usize(mesh, "height")? {
            settings.sphere_height = height;
        }
        Ok(())
    }

    fn parse_object_section(
        settings: &mut RenderSettings,
        object: &toml::Table,
    ) -> Result<(), String> {
        if let Some(scale) = Self::get_vec3(object, "scale")? {
            settings.object_scale = scale;
        }
        if let Some(position) = Self::get_vec3(object, "position")? {
            settings.object_position = position;
        }
        Ok(())
    }

    /// `[camera]` 支持两种写法：显式基 `u/v/w/eye`，或 `from/at/up`
    fn parse_camera_section(
        settings: &mut RenderSettings,
        camera: &toml::Table,
    ) -> Result<(), String> {
        if let Some(from) = camera.get("from").and_then(|v| v.as_str()) {
            let from = parse_point3(from).map_err(|e| format!("camera.from 无效: {}", e))?;
            let at = match camera.get("at").and_then(|v| v.as_str()) {
                Some(at) => parse_point3(at).map_err(|e| format!("camera.at 无效: {}", e))?,
                None => return Err("camera.from 需要同时指定 camera.at".to_string()),
            };
            let up = Self::get_vec3(camera, "up")?.unwrap_or_else(Vector3::y);
            debug!("使用 look-at 相机: from={:?} at={:?} up={:?}", from, at, up);
            settings.camera =
                Camera::look_at(from, at, up).map_err(|e| format!("[camera] 无效: {}", e))?;
            return Ok(());
        }

        if let Some(u) = Self::get_vec3(camera, "u")? {
            settings.camera.u = u;
        }
        if let Some(v) = Self::get_vec3(camera, "v")? {
            settings.camera.v = v;
        }
        if let Some(w) = Self::get_vec3(camera, "w")? {
            settings.camera.w = w;
        }
        if let Some(eye) = Self::get_vec3(camera, "eye")? {
            settings.camera.eye = eye.into();
        }
        Ok(())
    }

    fn parse_frustum_section(
        settings: &mut RenderSettings,
        frustum: &toml::Table,
    ) -> Result<(), String> {
        let f = &mut settings.frustum;
        for (key, slot) in [
            ("left", &mut f.left),
            ("right", &mut f.right),
            ("top", &mut f.top),
            ("bottom", &mut f.bottom),
            ("near", &mut f.near),
            ("far", &mut f.far),
        ] {
            if let Some(value) = Self::get_f32(frustum, key)? {
                *slot = value;
            }
        }
        Ok(())
    }

    fn parse_lighting_section(
        settings: &mut RenderSettings,
        lighting: &toml::Table,
    ) -> Result<(), String> {
        if let Some(position) = Self::get_vec3(lighting, "light_position")? {
            settings.light.position = position.into();
        }
        if let Some(intensity) = Self::get_f32(lighting, "light_intensity")? {
            settings.light.intensity = intensity;
        }
        if let Some(ambient) = Self::get_f32(lighting, "ambient")? {
            settings.ambient = ambient;
        }
        if let Some(view) = Self::get_vec3(lighting, "view_position")? {
            settings.view_position = view.into();
        }
        Ok(())
    }

    fn parse_material_section(
        settings: &mut RenderSettings,
        material: &toml::Table,
    ) -> Result<(), String> {
        if let Some(ambient) = Self::get_vec3(material, "ambient")? {
            settings.material.ambient = ambient;
        }
        if let Some(diffuse) = Self::get_vec3(material, "diffuse")? {
            settings.material.diffuse = diffuse;
        }
        if let Some(specular) = Self::get_vec3(material, "specular")? {
            settings.material.specular = specular;
        }
        if let Some(shininess) = Self::get_f32(material, "shininess")? {
            settings.material.shininess = shininess;
        }
        Ok(())
    }

    // ===== 取值辅助 =====

    /// 整数和浮点数都接受
    fn get_f32(table: &toml::Table, key: &str) -> Result<Option<f32>, String> {
        match table.get(key) {
            None => Ok(None),
            Some(Value::Float(f)) => Ok(Some(*f as f32)),
            Some(Value::Integer(i)) => Ok(Some(*i as f32)),
            Some(other) => Err(format!("'{}' 应为数字，实际为 {}", key, other.type_str())),
        }
    }

    fn get_usize(table: &toml::Table, key: &str) -> Result<Option<usize>, String> {
        match table.get(key) {
            None => Ok(None),
            Some(Value::Integer(i)) if *i >= 0 => Ok(Some(*i as usize)),
            Some(other) => Err(format!("'{}' 应为非负整数，实际为 {}", key, other)),
        }
    }

    fn get_vec3(table: &toml::Table, key: &str) -> Result<Option<Vector3<f32>>, String> {
        match table.get(key).and_then(|v| v.as_str()) {
            None => Ok(None),
            Some(s) => parse_vec3(s)
                .map(Some)
                .map_err(|e| format!("'{}' 格式不正确: {}", key, e)),
        }
    }

    // ===== RenderSettings -> TOML 转换 =====

    fn settings_to_toml(settings: &RenderSettings) -> String {
        let mut content = String::new();

        content.push_str("# 球体光栅化渲染器配置文件\n");
        content.push_str("# 向量使用 \"x,y,z\" 字符串格式\n\n");

        content.push_str("[files]\n");
        content.push_str(&format!("output = \"{}\"\n", settings.output));
        content.push_str(&format!("output_dir = \"{}\"\n", settings.output_dir));
        content.push_str(&format!("save_depth = {}\n\n", settings.save_depth));

        content.push_str("[render]\n");
        content.push_str(&format!("width = {}\n", settings.width));
        content.push_str(&format!("height = {}\n", settings.height));
        content.push_str(&format!(
            "use_multithreading = {}\n",
            settings.use_multithreading
        ));
        content.push_str(&format!("use_gamma = {}\n\n", settings.use_gamma));

        content.push_str("[mesh]\n");
        content.push_str(&format!("width = {}\n", settings.sphere_width));
        content.push_str(&format!("height = {}\n\n", settings.sphere_height));

        content.push_str("[object]\n");
        content.push_str(&format!(
            "scale = \"{}\"\n",
            format_vec3(&settings.object_scale)
        ));
        content.push_str(&format!(
            "position = \"{}\"\n\n",
            format_vec3(&settings.object_position)
        ));

        let camera = &settings.camera;
        content.push_str("[camera]\n");
        content.push_str(&format!("u = \"{}\"\n", format_vec3(&camera.u)));
        content.push_str(&format!("v = \"{}\"\n", format_vec3(&camera.v)));
        content.push_str(&format!("w = \"{}\"\n", format_vec3(&camera.w)));
        content.push_str(&format!("eye = \"{}\"\n", format_vec3(&camera.eye.coords)));
        content.push_str("# 或者: from = \"0,0,0\"  at = \"0,0,-1\"  up = \"0,1,0\"\n\n");

        let f = &settings.frustum;
        content.push_str("[frustum]\n");
        content.push_str(&format!("left = {:?}\n", f.left));
        content.push_str(&format!("right = {:?}\n", f.right));
        content.push_str(&format!("top = {:?}\n", f.top));
        content.push_str(&format!("bottom = {:?}\n", f.bottom));
        content.push_str(&format!("near = {:?}\n", f.near));
        content.push_str(&format!("far = {:?}\n\n", f.far));

        content.push_str("[lighting]\n");
        content.push_str(&format!(
            "light_position = \"{}\"\n",
            format_vec3(&settings.light.position.coords)
        ));
        content.push_str(&format!(
            "light_intensity = {:?}\n",
            settings.light.intensity
        ));
        content.push_str(&format!("ambient = {:?}\n", settings.ambient));
        content.push_str(&format!(
            "view_position = \"{}\"\n\n",
            format_vec3(&settings.view_position.coords)
        ));

        let m = &settings.material;
        content.push_str("[material]\n");
        content.push_str(&format!("ambient = \"{}\"\n", format_vec3(&m.ambient)));
        content.push_str(&format!("diffuse = \"{}\"\n", format_vec3(&m.diffuse)));
        content.push_str(&format!("specular = \"{}\"\n", format_vec3(&m.specular)));
        content.push_str(&format!("shininess = {:?}\n", m.shininess));

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_empty_config_gives_defaults() {
        let settings = TomlConfigLoader::load_from_content("").unwrap();
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_default_settings_round_trip() {
        let original = RenderSettings::default();
        let text = TomlConfigLoader::settings_to_toml(&original);
        let parsed = TomlConfigLoader::load_from_content(&text).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_partial_override() {
        let text = r#"
            [render]
            width = 128
            height = 64

            [object]
            position = "1, 0, -9"

            [frustum]
            far = -500

            [lighting]
            light_position = "0,10,0"
            ambient = 0.5

            [material]
            shininess = 8
        "#;
        let s = TomlConfigLoader::load_from_content(text).unwrap();
        assert_eq!((s.width, s.height), (128, 64));
        assert_eq!(s.object_position, Vector3::new(1.0, 0.0, -9.0));
        assert_eq!(s.frustum.far, -500.0);
        assert_eq!(s.frustum.near, -0.1);
        assert_eq!(s.light.position, Point3::new(0.0, 10.0, 0.0));
        assert_eq!(s.ambient, 0.5);
        assert_eq!(s.material.shininess, 8.0);
    }

    #[test]
    fn test_look_at_camera() {
        let text = r#"
            [camera]
            from = "0,0,5"
            at = "0,0,0"
        "#;
        let s = TomlConfigLoader::load_from_content(text).unwrap();
        assert!((s.camera.w - Vector3::z()).norm() < 1e-6);
        assert!((s.camera.u - Vector3::x()).norm() < 1e-6);
        assert_eq!(s.camera.eye, Point3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_degenerate_look_at_camera_rejected() {
        let same_point = r#"
            [camera]
            from = "1,2,3"
            at = "1,2,3"
        "#;
        assert!(TomlConfigLoader::load_from_content(same_point).is_err());

        let parallel_up = r#"
            [camera]
            from = "0,5,0"
            at = "0,0,0"
            up = "0,1,0"
        "#;
        let err = TomlConfigLoader::load_from_content(parallel_up).unwrap_err();
        assert!(err.contains("camera"), "{}", err);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(TomlConfigLoader::load_from_content("[render]\nwidth = -3").is_err());
        assert!(TomlConfigLoader::load_from_content("[render]\nwidth = 0").is_err());
        assert!(TomlConfigLoader::load_from_content("[object]\nscale = \"1,2\"").is_err());
        assert!(TomlConfigLoader::load_from_content("[frustum]\nnear = \"x\"").is_err());
        assert!(TomlConfigLoader::load_from_content("[mesh]\nheight = 2").is_err());
        assert!(TomlConfigLoader::load_from_content("not toml [").is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "phong_sphere_config_{}.toml",
            std::process::id()
        ));
        TomlConfigLoader::create_example_config(&path).unwrap();
        let loaded = TomlConfigLoader::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, RenderSettings::default());
    }
}
