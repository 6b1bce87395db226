use std::num::NonZeroUsize;

use fractal_refinery::{
    Complex, PpmFilePresenter, RenderRequest, RenderingEngine, SnapshotController,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let request = RenderRequest::new(
        800,
        600,
        1.0 / 200.0,
        Complex::ZERO,
        RenderingEngine::INITIAL_TILE_SIZE,
    )?;

    let workers = NonZeroUsize::new(RenderingEngine::DEFAULT_WORKER_COUNT)
        .expect("default worker count is non-zero");
    let mut controller = SnapshotController::new(PpmFilePresenter::new(), workers);

    controller.render(request)?;

    std::fs::create_dir_all("output")?;
    controller.write("output/mandelbrot.ppm")?;

    Ok(())
}
