mod platform;
mod services;

use crate::services::{DesktopFetchError, DesktopPlatformServices};
use gl_steps::{controls::Controls, Exercise, InputAction, LoopFeedback, Settings, StepError};
use glfw::{Context as _, SwapInterval, WindowEvent};
use luminance_front::framebuffer::FramebufferError;
use luminance_glfw::GlfwSurface;
use luminance_windowing::{WindowDim, WindowOpt};
use std::{error::Error, fmt, path::PathBuf, process, time::Instant};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(short, long)]
  /// List available exercises.
  list_exercises: bool,

  #[structopt(long, default_value = "1600")]
  /// Initial window width.
  width: u32,

  #[structopt(long, default_value = "900")]
  /// Initial window height.
  height: u32,

  #[structopt(long, default_value = "0.1")]
  /// Gamepad stick magnitude ignored around the rest position.
  dead_zone: f32,

  #[structopt(long, default_value = "0.1")]
  /// Translation per unit of movement axis, manual camera.
  move_speed: f32,

  #[structopt(long, default_value = "1.0")]
  /// Degrees per unit of rotation axis, manual camera.
  rotation_speed: f32,

  #[structopt(short, long, parse(from_os_str), default_value = "textures")]
  /// Directory textures are loaded from.
  textures: PathBuf,

  /// Exercise to run.
  #[structopt(default_value = "shape-viewer")]
  exercise: String,
}

impl CLIOpts {
  fn settings(&self) -> Settings {
    Settings {
      move_speed: self.move_speed,
      rotation_speed: self.rotation_speed,
      dead_zone: self.dead_zone,
    }
  }
}

#[derive(Debug)]
pub enum DesktopError {
  /// No exercise with that name.
  UnknownExercise(String),

  /// A texture required by the exercise could not be loaded.
  Fetch(DesktopFetchError),

  /// The window or its OpenGL context could not be created.
  Surface(Box<dyn Error>),

  /// The back buffer could not be acquired.
  BackBuffer(FramebufferError),

  /// The exercise failed to bootstrap.
  Step(StepError),
}

impl fmt::Display for DesktopError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DesktopError::UnknownExercise(ref name) => write!(f, "no exercise named {}", name),
      DesktopError::Fetch(ref e) => write!(f, "cannot load resources: {}", e),
      DesktopError::Surface(ref e) => write!(f, "cannot create GLFW surface: {}", e),
      DesktopError::BackBuffer(ref e) => write!(f, "cannot get back buffer: {}", e),
      DesktopError::Step(ref e) => write!(f, "cannot bootstrap exercise: {}", e),
    }
  }
}

impl Error for DesktopError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      DesktopError::UnknownExercise(_) => None,
      DesktopError::Fetch(e) => Some(e),
      DesktopError::Surface(e) => Some(e.as_ref()),
      DesktopError::BackBuffer(e) => Some(e),
      DesktopError::Step(e) => Some(e),
    }
  }
}

impl From<DesktopFetchError> for DesktopError {
  fn from(e: DesktopFetchError) -> Self {
    DesktopError::Fetch(e)
  }
}

impl From<FramebufferError> for DesktopError {
  fn from(e: FramebufferError) -> Self {
    DesktopError::BackBuffer(e)
  }
}

impl From<StepError> for DesktopError {
  fn from(e: StepError) -> Self {
    DesktopError::Step(e)
  }
}

/// Macro to declaratively add exercises.
macro_rules! exercises {
  ($($name:literal, $module:ident),* $(,)?) => {
    fn show_available_exercises() {
      println!("available exercises:");
      $( println!("  - {}", $name); )*
    }

    // run an exercise based on its name
    fn pick_and_run_exercise(cli_opts: &CLIOpts) -> Result<(), DesktopError> {
      match cli_opts.exercise.as_str() {
        $(
          $name => run_exercise::<gl_steps::$module::LocalExercise>(cli_opts, $name),
        )*

        name => {
          show_available_exercises();
          Err(DesktopError::UnknownExercise(name.to_owned()))
        }
      }
    }
  }
}

// Run an exercise until it exits or the window is closed.
fn run_exercise<E>(cli_opts: &CLIOpts, name: &str) -> Result<(), DesktopError>
where
  E: Exercise,
{
  let mut services = DesktopPlatformServices::load(&cli_opts.textures, &E::features())?;

  let dim = WindowDim::Windowed {
    width: cli_opts.width,
    height: cli_opts.height,
  };
  let surface = GlfwSurface::new_gl33(name, WindowOpt::default().set_dim(dim))
    .map_err(|e| DesktopError::Surface(Box::new(e)))?;
  let mut context = surface.context;
  let events = surface.events_rx;

  context.window.glfw.set_swap_interval(SwapInterval::Sync(1));

  let settings = cli_opts.settings();
  let mut controls = Controls::new(settings.dead_zone);
  let mut exercise = E::bootstrap(&mut services, &settings, &mut context)?;
  let start_t = Instant::now();

  // exercises start with a default aspect ratio; tell them the real one right away
  let (fb_w, fb_h) = context.window.get_framebuffer_size();
  let mut actions = vec![InputAction::Resized {
    width: fb_w as _,
    height: fb_h as _,
  }];

  'app: loop {
    context.window.glfw.poll_events();

    for (_, event) in glfw::flush_messages(&events) {
      match event {
        WindowEvent::Close => actions.push(InputAction::Quit),

        WindowEvent::FramebufferSize(width, height) => actions.push(InputAction::Resized {
          width: width as _,
          height: height as _,
        }),

        WindowEvent::Key(key, _, action, _) => log::debug!("key {:?}: {:?}", key, action),

        _ => (),
      }
    }

    let keyboard = platform::poll_keyboard(&context.window);
    let gamepad = platform::poll_gamepad(&context.window.glfw);
    actions.extend(controls.frame(&keyboard, gamepad.as_ref()));

    let back_buffer = context.back_buffer()?;
    let t = start_t.elapsed().as_secs_f32();
    let feedback = exercise.render_frame(t, back_buffer, actions.drain(..), &mut context);

    if let LoopFeedback::Continue(stepped) = feedback {
      exercise = stepped;
      context.window.swap_buffers();
    } else {
      break 'app;
    }
  }

  Ok(())
}

exercises! {
  "clear-color", clear_color,
  "static-shape", static_shape,
  "shape-viewer", shape_viewer,
  "scene-graph", scene_graph,
  "textured-quad", textured_quad,
}

// diagnostics, shape switches included, are part of the program output
fn log_target() -> env_logger::Target {
  env_logger::Target::Stdout
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .target(log_target())
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if cli_opts.list_exercises {
    show_available_exercises();
  } else if let Err(e) = pick_and_run_exercise(&cli_opts) {
    log::error!("{}", e);
    process::exit(1);
  }
}
