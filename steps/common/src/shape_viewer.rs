//! Interactive 3D shape viewer.
//!
//! The selected shape is drawn with a model / view / projection transform. In automatic mode it
//! sways and spins on its own; in manual mode the movement and rotation axes drive it and the
//! zoom modifier narrows the field of view.
//!
//! Controls:
//!
//! - <toggle camera> switches between the automatic and manual camera.
//! - <next shape> and <previous shape> cycle through the built-in shapes.
//! - <fill>, <wireframe> and <point> change how the shape is rasterized.
//! - <zoom> is held to zoom in, manual camera only.
//!
//! <https://docs.rs/luminance>

use crate::{
  binder::ShapeBinder,
  shape::{Shape, ShapeRegistry},
  shared::Semantics,
  transform::{CameraMode, ManualInput, TransformUpdater, Transforms},
  Exercise, InputAction, LoopFeedback, PlatformServices, RasterMode, Settings, StepError,
};
use luminance::UniformInterface;
use luminance_front::{
  context::GraphicsContext,
  framebuffer::Framebuffer,
  pipeline::PipelineState,
  render_state::RenderState,
  shader::{BuiltProgram, Program, Uniform},
  texture::Dim2,
  Backend,
};

const VS: &str = include_str!("mvp-vs.glsl");
const FS: &str = include_str!("mvp-fs.glsl");

const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.];

// initial aspect ratio, until the first resize event
const DEFAULT_ASPECT_RATIO: f32 = 16. / 9.;

#[derive(Debug, UniformInterface)]
struct ShaderInterface {
  model: Uniform<[[f32; 4]; 4]>,
  view: Uniform<[[f32; 4]; 4]>,
  projection: Uniform<[[f32; 4]; 4]>,
}

/// Everything the viewer knows besides its GPU resources.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
  registry: ShapeRegistry,
  shape_index: usize,
  raster: RasterMode,
  camera: CameraMode,
  input: ManualInput,
  updater: TransformUpdater,
  needs_rebind: bool,
}

impl ViewerState {
  pub fn new(registry: ShapeRegistry, settings: &Settings) -> Self {
    ViewerState {
      registry,
      shape_index: 0,
      raster: RasterMode::default(),
      camera: CameraMode::default(),
      input: ManualInput::default(),
      updater: TransformUpdater::new(
        settings.move_speed,
        settings.rotation_speed,
        DEFAULT_ASPECT_RATIO,
      ),
      needs_rebind: true,
    }
  }

  /// Apply an action; returns `false` if the viewer should quit.
  pub fn apply(&mut self, action: &InputAction) -> bool {
    match *action {
      InputAction::Quit => return false,

      InputAction::ToggleCamera => {
        self.camera = self.camera.toggle();
        log::debug!("camera mode: {:?}", self.camera);
      }

      InputAction::Raster(raster) => {
        if raster != self.raster {
          self.raster = raster;
          self.needs_rebind = true;
        }
      }

      InputAction::NextShape => self.select(self.registry.next_index(self.shape_index)),

      InputAction::PreviousShape => self.select(self.registry.previous_index(self.shape_index)),

      InputAction::ZoomPressed => self.input.zoom = true,

      InputAction::ZoomReleased => self.input.zoom = false,

      InputAction::Move { x, y } => self.input.translate(x, y),

      InputAction::Rotate { x, y } => self.input.rotate(x, y),

      InputAction::Resized { width, height } => {
        log::debug!("resized to {}×{}", width, height);
        self.updater.resize(width, height);
      }
    }

    true
  }

  fn select(&mut self, index: usize) {
    self.shape_index = index;
    self.needs_rebind = true;

    log::info!("shape name: {}", self.shape().name);
    log::info!("switched to shape index: {}", index);
  }

  pub fn shape_index(&self) -> usize {
    self.shape_index
  }

  pub fn shape(&self) -> &'static Shape {
    self.registry.get(self.shape_index)
  }

  pub fn raster(&self) -> RasterMode {
    self.raster
  }

  pub fn camera(&self) -> CameraMode {
    self.camera
  }

  pub fn input(&self) -> &ManualInput {
    &self.input
  }

  /// Whether the bound buffers are stale; clears the flag.
  pub fn take_rebind(&mut self) -> bool {
    std::mem::replace(&mut self.needs_rebind, false)
  }

  pub fn transforms(&self, elapsed: f32) -> Transforms {
    self.updater.update(elapsed, self.camera, &self.input)
  }
}

pub struct LocalExercise {
  program: Program<Semantics, (), ShaderInterface>,
  binder: ShapeBinder,
  state: ViewerState,
}

impl Exercise for LocalExercise {
  fn bootstrap(
    _: &mut impl PlatformServices,
    settings: &Settings,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> Result<Self, StepError> {
    let BuiltProgram { program, warnings } = context
      .new_shader_program::<Semantics, (), ShaderInterface>()
      .from_strings(VS, None, None, FS)?;

    for warning in warnings {
      log::warn!("{}", warning);
    }

    let mut state = ViewerState::new(ShapeRegistry::builtin(), settings);
    let mut binder = ShapeBinder::new();

    state.take_rebind();
    binder.bind(context, state.shape(), state.raster())?;

    Ok(LocalExercise {
      program,
      binder,
      state,
    })
  }

  fn render_frame(
    mut self,
    time: f32,
    back_buffer: Framebuffer<Dim2, (), ()>,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> LoopFeedback<Self> {
    for action in actions {
      if !self.state.apply(&action) {
        return LoopFeedback::Exit;
      }
    }

    if self.state.take_rebind() {
      if let Err(e) = self
        .binder
        .bind(context, self.state.shape(), self.state.raster())
      {
        log::error!("{}", e);
        return LoopFeedback::Exit;
      }
    }

    let Transforms {
      model,
      view,
      projection,
    } = self.state.transforms(time);

    let program = &mut self.program;
    let tess = self.binder.tess();

    let render = context
      .new_pipeline_gate()
      .pipeline(
        &back_buffer,
        &PipelineState::default().set_clear_color(CLEAR_COLOR),
        |_, mut shd_gate| {
          shd_gate.shade(program, |mut iface, uni, mut rdr_gate| {
            iface.set(&uni.model, model.into());
            iface.set(&uni.view, view.into());
            iface.set(&uni.projection, projection.into());

            rdr_gate.render(&RenderState::default(), |mut tess_gate| match tess {
              Some(tess) => tess_gate.render(tess),
              None => Ok(()),
            })
          })
        },
      )
      .assume()
      .into_result();

    if render.is_ok() {
      LoopFeedback::Continue(self)
    } else {
      LoopFeedback::Exit
    }
  }
}
