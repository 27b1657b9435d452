//! Bind a shape once and draw it every frame, untransformed, with a single flat color.
//!
//! The cube is drawn as a wireframe so that its edges are visible without any lighting; since no
//! transform is applied, only its front face (the square) is visible.

use crate::{
  binder::ShapeBinder,
  color::Rgb,
  shape::ShapeRegistry,
  shared::Semantics,
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

const VS: &str = include_str!("flat-vs.glsl");
const FS: &str = include_str!("flat-fs.glsl");

const SHAPE_NAME: &str = "cube";
const SHAPE_COLOR: Rgb = Rgb::new(0., 0., 1.);
const CLEAR_COLOR: [f32; 4] = [0.25, 0.25, 1., 0.25];

#[derive(Debug, UniformInterface)]
struct ShaderInterface {
  color: Uniform<[f32; 3]>,
}

pub struct LocalExercise {
  program: Program<Semantics, (), ShaderInterface>,
  binder: ShapeBinder,
}

impl Exercise for LocalExercise {
  fn bootstrap(
    _: &mut impl PlatformServices,
    _: &Settings,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> Result<Self, StepError> {
    let BuiltProgram { program, warnings } = context
      .new_shader_program::<Semantics, (), ShaderInterface>()
      .from_strings(VS, None, None, FS)?;

    for warning in warnings {
      log::warn!("{}", warning);
    }

    let registry = ShapeRegistry::builtin();
    let shape = registry
      .find(SHAPE_NAME)
      .map_or_else(|| registry.get(0), |(_, shape)| shape);

    let mut binder = ShapeBinder::new();
    binder.bind(context, shape, RasterMode::Wireframe)?;
    log::info!(
      "bound {} ({} elements)",
      shape.name,
      binder.element_count()
    );

    Ok(LocalExercise { program, binder })
  }

  fn render_frame(
    mut self,
    _: f32,
    back_buffer: Framebuffer<Dim2, (), ()>,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> LoopFeedback<Self> {
    for action in actions {
      if let InputAction::Quit = action {
        return LoopFeedback::Exit;
      }
    }

    let program = &mut self.program;
    let tess = self.binder.tess();
    let [r, g, b] = SHAPE_COLOR.to_array();

    let render = context
      .new_pipeline_gate()
      .pipeline(
        &back_buffer,
        &PipelineState::default().set_clear_color(CLEAR_COLOR),
        |_, mut shd_gate| {
          shd_gate.shade(program, |mut iface, uni, mut rdr_gate| {
            iface.set(&uni.color, [r, g, b]);

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
