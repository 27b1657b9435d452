//! OpenGL learning steps.
//!
//! This crate provides a set of small, incremental exercises: animating the clear color, binding
//! vertex and index buffers, compiling shaders and finally driving a 3D shape viewer with the
//! keyboard or a gamepad. The exercises are platform-agnostic on purpose: the code opening a
//! window, creating the OpenGL context and polling devices lives in a runner crate, once for all
//! the exercises.
//!
//! # Exercise architecture
//!
//! Exercises are simple modules exposed from this crate. They do not depend on any
//! platform-specific concepts, such as system events, key codes or joystick identifiers. Whenever
//! an exercise requires user interaction, it reads [`InputAction`]s, which the runner produces by
//! feeding device snapshots to [`controls::Controls`].
//!
//! Exercises allocate their luminance resources in [`Exercise::bootstrap`] and implement their
//! frame logic in [`Exercise::render_frame`]. The exercise value is moved through the frame loop,
//! so all of its state (camera offsets, selected shape, GPU buffers) is owned by the loop driver.
//!
//! # Error handling
//!
//! Bootstrapping an exercise compiles shaders and uploads buffers, which can fail; those errors
//! are reported as [`StepError`]. Errors happening while rendering a frame end the loop.

use luminance_front::{
  context::GraphicsContext, framebuffer::Framebuffer, shader::ProgramError, tess::TessError,
  texture::{Dim2, TextureError}, Backend,
};
use std::{error::Error, fmt};

pub mod binder;
pub mod clear_color;
pub mod color;
pub mod controls;
pub mod hsv;
pub mod scene;
pub mod scene_graph;
pub mod shape;
pub mod shape_viewer;
mod shared;
pub mod static_shape;
pub mod textured_quad;
pub mod transform;

pub use binder::BindError;

/// Exercise interface.
pub trait Exercise: Sized {
  /// Resources the runner must make available before bootstrapping.
  fn features() -> Features {
    Features::none()
  }

  /// Bootstrap the exercise.
  fn bootstrap(
    platform: &mut impl PlatformServices,
    settings: &Settings,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> Result<Self, StepError>;

  /// Render a frame of the exercise.
  fn render_frame(
    self,
    time: f32,
    back_buffer: Framebuffer<Dim2, (), ()>,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> LoopFeedback<Self>;
}

/// Features an exercise needs from the platform.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Features {
  textures: Vec<String>,
}

impl Features {
  pub fn none() -> Self {
    Features::default()
  }

  /// Require the texture `name`.
  pub fn texture(mut self, name: impl Into<String>) -> Self {
    self.textures.push(name.into());
    self
  }

  pub fn textures(&self) -> &[String] {
    &self.textures
  }
}

/// Platform services exercises can ask for.
///
/// Runners load everything listed in [`Exercise::features`] up front; exercises then fetch the
/// resources by name while bootstrapping.
pub trait PlatformServices {
  type FetchError: Error + 'static;

  fn fetch_texture(&mut self, name: impl AsRef<str>) -> Result<&image::RgbImage, Self::FetchError>;
}

/// Tunables shared by all the exercises.
///
/// The runner builds this from its command line; exercises only read it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
  /// Translation applied per unit of accumulated movement axis.
  pub move_speed: f32,

  /// Degrees applied per unit of accumulated rotation axis.
  pub rotation_speed: f32,

  /// Analog magnitude at or below which stick input is ignored.
  pub dead_zone: f32,
}

impl Default for Settings {
  fn default() -> Self {
    Settings {
      move_speed: 0.1,
      rotation_speed: 1.0,
      dead_zone: controls::DEFAULT_DEAD_ZONE,
    }
  }
}

/// How triangles are rasterized.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RasterMode {
  /// Filled triangles.
  Fill,

  /// Triangle edges only.
  Wireframe,

  /// Vertices only.
  Point,
}

impl Default for RasterMode {
  fn default() -> Self {
    RasterMode::Fill
  }
}

/// A type used to pass “inputs” to exercises.
#[derive(Clone, Debug, PartialEq)]
pub enum InputAction {
  /// Quit the application.
  Quit,

  /// Switch between the automatic and manual camera.
  ToggleCamera,

  /// Change the rasterization mode.
  Raster(RasterMode),

  /// Select the next shape.
  NextShape,

  /// Select the previous shape.
  PreviousShape,

  /// The zoom modifier went down.
  ZoomPressed,

  /// The zoom modifier went up.
  ZoomReleased,

  /// Movement axes held during this frame, in [-2, 2] (keyboard and gamepad add up).
  Move { x: f32, y: f32 },

  /// Rotation axes held during this frame.
  Rotate { x: f32, y: f32 },

  /// Framebuffer size changed.
  Resized { width: u32, height: u32 },
}

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum LoopFeedback<T> {
  Continue(T),
  Exit,
}

/// Errors that can happen while bootstrapping an exercise.
#[non_exhaustive]
#[derive(Debug)]
pub enum StepError {
  /// A shader stage failed to compile or the program failed to link.
  Program(ProgramError),

  /// A GPU tessellation could not be created.
  Tess(TessError),

  /// A shape could not be bound.
  Bind(BindError),

  /// The platform could not provide a resource.
  Fetch(Box<dyn Error>),

  /// A texture could not be created.
  Texture(TextureError),
}

impl StepError {
  pub fn fetch(e: impl Error + 'static) -> Self {
    StepError::Fetch(Box::new(e))
  }
}

impl fmt::Display for StepError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StepError::Program(ref e) => write!(f, "shader program error: {}", e),
      StepError::Tess(ref e) => write!(f, "tessellation error: {}", e),
      StepError::Bind(ref e) => write!(f, "cannot bind shape: {}", e),
      StepError::Fetch(ref e) => write!(f, "cannot fetch resource: {}", e),
      StepError::Texture(ref e) => write!(f, "texture error: {}", e),
    }
  }
}

impl Error for StepError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      StepError::Program(e) => Some(e),
      StepError::Tess(e) => Some(e),
      StepError::Bind(e) => Some(e),
      StepError::Fetch(e) => Some(e.as_ref()),
      StepError::Texture(e) => Some(e),
    }
  }
}

impl From<ProgramError> for StepError {
  fn from(e: ProgramError) -> Self {
    StepError::Program(e)
  }
}

impl From<TessError> for StepError {
  fn from(e: TessError) -> Self {
    StepError::Tess(e)
  }
}

impl From<BindError> for StepError {
  fn from(e: BindError) -> Self {
    StepError::Bind(e)
  }
}

impl From<TextureError> for StepError {
  fn from(e: TextureError) -> Self {
    StepError::Texture(e)
  }
}
