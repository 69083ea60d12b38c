mod gpu;

use backdrop_core::pointer::pointer_to_ndc;
use backdrop_core::Scene;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

const SCENE_SEED: u64 = 42;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Animated Backdrop")
        .build(&event_loop)?;

    let mut size = window.inner_size();
    let mut scene = Scene::new(size.width, size.height, SCENE_SEED);

    // A missing GPU degrades to a blank window: the scene still ticks, the
    // process never crashes over a cosmetic layer.
    let mut gpu = match pollster::block_on(gpu::GpuState::new(&window)) {
        Ok(state) => Some(state),
        Err(e) => {
            log::warn!("renderer unavailable, running without drawing: {e}");
            None
        }
    };

    // Poll keeps the simulation ticking even when nothing requests redraws.
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(new_size),
            ..
        } => {
            size = new_size;
            scene.resize(new_size.width, new_size.height);
            if let Some(state) = gpu.as_mut() {
                state.resize(new_size);
            }
        }
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            let ndc = pointer_to_ndc(
                position.x as f32,
                position.y as f32,
                size.width as f32,
                size.height as f32,
            );
            scene.pointer_moved(ndc);
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            scene.dispose();
            elwt.exit();
        }
        Event::AboutToWait => {
            if !scene.advance() {
                return;
            }
            if let Some(state) = gpu.as_mut() {
                match state.render(&scene) {
                    Ok(_) => state.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => state.resize(size),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
        }
        _ => {}
    })?;
    Ok(())
}
