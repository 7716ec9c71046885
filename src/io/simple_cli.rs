use crate::io::config_loader::TomlConfigLoader;
use crate::io::render_settings::RenderSettings;
use clap::Parser;
use log::info;

/// 命令行参数：配置文件加少量覆盖项
#[derive(Parser, Debug)]
#[command(name = "phong-sphere")]
#[command(about = "软件光栅化 Phong 着色球体")]
pub struct SimpleCli {
    /// 配置文件路径（TOML格式）
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// 使用示例配置（写出并加载）
    #[arg(long)]
    pub use_example_config: bool,

    /// 覆盖输出目录
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// 不保存深度图
    #[arg(long)]
    pub no_depth: bool,
}

impl SimpleCli {
    /// 解析命令行并返回最终的渲染设置
    pub fn process() -> Result<RenderSettings, String> {
        Self::parse().into_settings()
    }

    pub fn into_settings(self) -> Result<RenderSettings, String> {
        let mut settings = if self.use_example_config {
            let temp_config_path = "temp_example_config.toml";

            TomlConfigLoader::create_example_config(temp_config_path)
                .map_err(|e| format!("创建示例配置失败: {}", e))?;
            info!("已创建示例配置: {}", temp_config_path);

            // 保留文件，用户可以当模板
            TomlConfigLoader::load_from_file(temp_config_path)
                .map_err(|e| format!("加载示例配置失败: {}", e))?
        } else if let Some(config_path) = &self.config {
            info!("加载配置文件: {}", config_path);
            TomlConfigLoader::load_from_file(config_path)
                .map_err(|e| format!("配置文件加载失败: {}", e))?
        } else {
            info!("使用默认设置");
            RenderSettings::default()
        };

        if let Some(output_dir) = self.output_dir {
            settings.output_dir = output_dir;
        }
        if self.no_depth {
            settings.save_depth = false;
        }

        settings.validate()?;
        Ok(settings)
    }
}
