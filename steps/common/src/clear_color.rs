//! The very first step: no geometry at all, only a back buffer cleared with a color that pulses
//! between black and red over time.

use crate::{
  color::{hex_to_rgb, sin_pos, Rgb},
  Exercise, InputAction, LoopFeedback, PlatformServices, Settings, StepError,
};
use luminance_front::{
  context::GraphicsContext, framebuffer::Framebuffer, pipeline::PipelineState, texture::Dim2,
  Backend,
};

const PULSE_HEX: &str = "FF0000";

/// Clear color at `time` seconds.
pub fn pulse_color(base: Rgb, time: f32) -> [f32; 4] {
  let k = sin_pos(time);
  [base.r * k, base.g * k, base.b * k, 1.]
}

pub struct LocalExercise {
  base: Rgb,
}

impl Exercise for LocalExercise {
  fn bootstrap(
    _: &mut impl PlatformServices,
    _: &Settings,
    _: &mut impl GraphicsContext<Backend = Backend>,
  ) -> Result<Self, StepError> {
    let mut base = Rgb::default();
    hex_to_rgb(PULSE_HEX, &mut base);

    Ok(LocalExercise { base })
  }

  fn render_frame(
    self,
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

    let clear_color = pulse_color(self.base, time);
    let render = context
      .new_pipeline_gate()
      .pipeline(
        &back_buffer,
        &PipelineState::default().set_clear_color(clear_color),
        |_, _| Ok(()),
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
