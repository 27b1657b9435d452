//! Several objects sharing a single tessellation, each drawn with its own model matrix and tint.
//!
//! The cube vertices carry a grayscale color going from black at the bottom to white at the top
//! and map the whole texture on every face; the fragment shader multiplies the texel, the vertex
//! color and the per-object tint.

use crate::{
  color::Palette,
  scene::{Scene, SceneObject, Transform},
  shared::{
    faceted_cube_indices, grayscale_cube, load_texture, ColoredVertex, RGBTexture, Semantics,
  },
  Exercise, Features, InputAction, LoopFeedback, PlatformServices, Settings, StepError,
};
use cgmath::{perspective, Deg, Matrix4, SquareMatrix as _, Vector3};
use luminance::UniformInterface;
use luminance_front::{
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

const VS: &str = include_str!("tinted-vs.glsl");
const FS: &str = include_str!("tinted-fs.glsl");

pub const TEXTURE: &str = "crate.jpg";

/// Degrees per second, on every axis.
pub const SPIN_SPEED: f32 = 50.;

const FOVY: f32 = 45.;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.;

#[derive(UniformInterface)]
struct ShaderInterface {
  tex: Uniform<TextureBinding<Dim2, NormUnsigned>>,
  model: Uniform<[[f32; 4]; 4]>,
  view: Uniform<[[f32; 4]; 4]>,
  projection: Uniform<[[f32; 4]; 4]>,
  tint: Uniform<[f32; 3]>,
}

/// The three cubes of the exercise.
pub fn default_scene() -> Scene {
  let mut scene = Scene::new(SPIN_SPEED);

  scene.add(SceneObject::new(
    "left",
    Transform::at(Vector3::new(-3., 1., -10.)),
    Palette::White,
  ));
  scene.add(SceneObject::new(
    "center",
    Transform::at(Vector3::new(0., 0., -10.)),
    Palette::Magenta,
  ));
  scene.add(SceneObject::new(
    "right",
    Transform::at(Vector3::new(3., -1., -10.)),
    Palette::Magenta,
  ));

  scene
}

pub struct LocalExercise {
  texture: RGBTexture,
  program: Program<Semantics, (), ShaderInterface>,
  cube: Tess<ColoredVertex, u32>,
  scene: Scene,
  last_time: Option<f32>,
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

    let cube = context
      .new_tess()
      .set_vertices(grayscale_cube())
      .set_indices(faceted_cube_indices())
      .set_mode(Mode::Triangle)
      .build()?;

    Ok(LocalExercise {
      texture,
      program,
      cube,
      scene: default_scene(),
      last_time: None,
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

    let dt = self.last_time.map_or(0., |last| time - last);
    self.last_time = Some(time);
    self.scene.update(dt);

    let [width, height] = back_buffer.size();
    let aspect_ratio = width as f32 / height.max(1) as f32;
    let projection = perspective(Deg(FOVY), aspect_ratio, Z_NEAR, Z_FAR);
    let view = Matrix4::<f32>::identity();

    let texture = &mut self.texture;
    let program = &mut self.program;
    let cube = &self.cube;
    let objects = self.scene.objects();

    let render = context
      .new_pipeline_gate()
      .pipeline(
        &back_buffer,
        &PipelineState::default(),
        |pipeline, mut shd_gate| {
          let bound_tex = pipeline.bind_texture(texture)?;

          shd_gate.shade(program, |mut iface, uni, mut rdr_gate| {
            iface.set(&uni.tex, bound_tex.binding());
            iface.set(&uni.view, view.into());
            iface.set(&uni.projection, projection.into());

            objects.iter().try_for_each(|object| {
              iface.set(&uni.model, object.transform.trs().into());
              iface.set(&uni.tint, object.tint.into());

              rdr_gate.render(&RenderState::default(), |mut tess_gate| {
                tess_gate.render(cube)
              })
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

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_scene_has_three_cubes() {
    let scene = default_scene();
    assert_eq!(scene.len(), 3);

    let tints: Vec<_> = scene.objects().iter().map(|o| o.tint).collect();
    assert_eq!(
      tints,
      vec![
        Palette::White.rgb(),
        Palette::Magenta.rgb(),
        Palette::Magenta.rgb()
      ]
    );

    let right = scene.get("right").map(|o| o.transform.position);
    assert_eq!(right, Some(Vector3::new(3., -1., -10.)));
  }

  #[test]
  fn cubes_are_textured() {
    assert_eq!(LocalExercise::features().textures(), [TEXTURE]);
  }
}
