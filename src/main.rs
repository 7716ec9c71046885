use log::{error, info};
use phong_sphere::Renderer;
use phong_sphere::io::simple_cli::SimpleCli;
use phong_sphere::utils::save_utils::save_render_result;

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = SimpleCli::process().inspect_err(|e| error!("{}", e))?;

    let mut renderer = Renderer::new(settings.width, settings.height);
    renderer.render(&settings)?;
    save_render_result(&renderer.frame_buffer, &settings)?;

    info!("输出目录: {}", settings.output_dir);
    Ok(())
}
