//! A single textured quad whose colors are animated in HSV space.
//!
//! The texture is sampled in the fragment shader, converted to HSV, shifted by [`HsvShift::at`]
//! and converted back to RGB. The quad stays still, ten units in front of the camera.
//!
//! <https://docs.rs/luminance>

use crate::{
  hsv::HsvShift,
  scene::Transform,
  shared::{load_texture, textured_quad, RGBTexture, Semantics, TexturedVertex, QUAD_INDICES},
  transform::Transforms,
  Exercise, Features, InputAction, LoopFeedback, PlatformServices, Settings, StepError,
};
use cgmath::{perspective, Deg, Matrix4, SquareMatrix as _, Vector3};
use luminance::UniformInterface;
use luminance_front::{
  blending::{Blending, Equation, Factor},
  context::GraphicsContext,
  framebuffer::Framebuffer,
  pipeline::{PipelineState, TextureBinding},
  pixel::NormUnsigned,
  render_state::RenderState,
  shader::{BuiltProgram, Program, Uniform},
  tess::{Mode, Tess},
  texture::Dim2,
  Backend,
};

const VS: &str = include_str!("hsv-vs.glsl");
const FS: &str = include_str!("hsv-fs.glsl");

pub const TEXTURE: &str = "crate.jpg";

const FOVY: f32 = 45.;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.;
const QUAD_COLOR: [f32; 3] = [1., 1., 1.];

#[derive(UniformInterface)]
struct ShaderInterface {
  tex: Uniform<TextureBinding<Dim2, NormUnsigned>>,
  model: Uniform<[[f32; 4]; 4]>,
  view: Uniform<[[f32; 4]; 4]>,
  projection: Uniform<[[f32; 4]; 4]>,
  color: Uniform<[f32; 3]>,
  hue: Uniform<f32>,
  saturation: Uniform<f32>,
  value: Uniform<f32>,
}

/// Transforms of the quad for a given aspect ratio.
pub fn quad_transforms(aspect_ratio: f32) -> Transforms {
  Transforms {
    model: Transform::at(Vector3::new(0., 0., -10.)).trs(),
    view: Matrix4::identity(),
    projection: perspective(Deg(FOVY), aspect_ratio, Z_NEAR, Z_FAR),
  }
}

pub struct LocalExercise {
  texture: RGBTexture,
  program: Program<Semantics, (), ShaderInterface>,
  quad: Tess<TexturedVertex, u32>,
}

impl Exercise for LocalExercise {
  fn features() -> Features {
    Features::none().texture(TEXTURE)
  }

  fn bootstrap(
    platform: &mut impl PlatformServices,
    _: &Settings,
    context: &mut impl GraphicsContext<Backend = Backend>,
  ) -> Result<Self, StepError> {
    let texture = load_texture(context, platform, TEXTURE)?;

    let BuiltProgram { program, warnings } = context
      .new_shader_program::<Semantics, (), ShaderInterface>()
      .from_strings(VS, None, None, FS)?;

    for warning in warnings {
      log::warn!("{}", warning);
    }

    let quad = context
      .new_tess()
      .set_vertices(textured_quad())
      .set_indices(QUAD_INDICES.to_vec())
      .set_mode(Mode::Triangle)
      .build()?;

    Ok(LocalExercise {
      texture,
      program,
      quad,
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
      if let InputAction::Quit = action {
        return LoopFeedback::Exit;
      }
    }

    let [width, height] = back_buffer.size();
    let Transforms {
      model,
      view,
      projection,
    } = quad_transforms(width as f32 / height.max(1) as f32);
    let shift = HsvShift::at(time);

    let texture = &mut self.texture;
    let program = &mut self.program;
    let quad = &self.quad;
    let render_st = &RenderState::default().set_blending(Blending {
      equation: Equation::Additive,
      src: Factor::SrcAlpha,
      dst: Factor::SrcAlphaComplement,
    });

    let render = context
      .new_pipeline_gate()
      .pipeline(
        &back_buffer,
        &PipelineState::default(),
        |pipeline, mut shd_gate| {
          let bound_tex = pipeline.bind_texture(texture)?;

          shd_gate.shade(program, |mut iface, uni, mut rdr_gate| {
            iface.set(&uni.tex, bound_tex.binding());
            iface.set(&uni.model, model.into());
            iface.set(&uni.view, view.into());
            iface.set(&uni.projection, projection.into());
            iface.set(&uni.color, QUAD_COLOR);
            iface.set(&uni.hue, shift.hue);
            iface.set(&uni.saturation, shift.saturation);
            iface.set(&uni.value, shift.value);

            rdr_gate.render(render_st, |mut tess_gate| tess_gate.render(quad))
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
