/// Terminal front-end for the wireframe mesh viewer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use spin3d_core::{Engine, EngineConfig, InputEvent, Mesh};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::TermCanvas;
use renderer::{CELL_HEIGHT, CELL_WIDTH};

/// Wheel impulse per scroll notch, in the classic wheel-delta encoding
const WHEEL_NOTCH: f32 = 120.0;

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    engine: Engine,
    canvas: TermCanvas,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: EngineConfig) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;

        Ok(Self {
            engine: Engine::new(mesh, config),
            canvas: TermCanvas::new(cols, rows),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = self.engine.frame_interval();

        while self.running {
            let frame_start = Instant::now();

            // Drain everything that arrived since the last tick, in
            // arrival order, so the tick sees all of it
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_input(&event);
            }

            self.engine.tick(&mut self.canvas);
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self, event: &Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char(c) => {
                    self.engine.push_event(InputEvent::KeyPress { key: *c });
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                if let Some(translated) = translate_mouse(mouse) {
                    self.engine.push_event(translated);
                }
            }
            Event::Resize(cols, rows) => {
                self.canvas.set_grid(*cols, *rows);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        self.canvas.present(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Spin3D Terminal Viewer | FPS: {:.1} | Controls: Drag=Rotate Wheel=Zoom Space=Reset Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Map a crossterm mouse event onto the engine's input vocabulary.
/// Cell coordinates are scaled to pseudo-pixels so that drag
/// sensitivity over coarse terminal cells matches a desktop pointer.
fn translate_mouse(mouse: &MouseEvent) -> Option<InputEvent> {
    let x = f32::from(mouse.column) * CELL_WIDTH;
    let y = f32::from(mouse.row) * CELL_HEIGHT;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            Some(InputEvent::PointerMove {
                x,
                y,
                buttons_held: true,
            })
        }
        MouseEventKind::Up(MouseButton::Left) | MouseEventKind::Moved => {
            Some(InputEvent::PointerMove {
                x,
                y,
                buttons_held: false,
            })
        }
        MouseEventKind::ScrollUp => Some(InputEvent::Scroll {
            wheel_delta: Some(WHEEL_NOTCH),
            detail: None,
        }),
        MouseEventKind::ScrollDown => Some(InputEvent::Scroll {
            wheel_delta: Some(-WHEEL_NOTCH),
            detail: None,
        }),
        _ => None,
    }
}
