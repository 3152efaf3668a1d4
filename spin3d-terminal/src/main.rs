/// Spin3D Terminal Viewer - Rotating Cube
///
/// Renders a wireframe cube with painter's-algorithm depth sorting and
/// momentum-based mouse controls.
/// Controls:
///   - Mouse drag: rotate (momentum carries after release)
///   - Scroll wheel: dolly zoom
///   - Space: reset the view
///   - Q/ESC: quit

use std::io;
use std::{env, fs};

use log::debug;
use spin3d_core::{EngineConfig, Mesh};
use spin3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    // Optional first argument: path to a JSON settings document
    let config = match env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => EngineConfig {
            fov_multiplier: 0.8,
            ..EngineConfig::default()
        },
    };

    let cube = Mesh::cube(2.0);

    let mut app = TerminalApp::new(cube, config)?;
    app.run()
}

/// Read engine settings from a JSON document. Missing keys fall back to
/// defaults; unrecognized keys are ignored.
fn load_config(path: &str) -> io::Result<EngineConfig> {
    let text = fs::read_to_string(path)?;
    let config = serde_json::from_str(&text)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    debug!("settings loaded from {path}: {config:?}");
    Ok(config)
}
