//! Per-frame model, view and projection matrices for the shape viewer.
//!
//! Two camera modes exist. In [`CameraMode::Automatic`], the shape sways left and right, spins
//! about the (1, 1, 1) axis and the field of view breathes between 45° and 90°, all driven by the
//! elapsed time. In [`CameraMode::Manual`], accumulated input axes translate and rotate the shape
//! and the zoom modifier narrows the field of view. Nothing is cached: the matrices are
//! recomputed every frame.

use crate::color::{mix, sin_pos};
use cgmath::{perspective, Deg, InnerSpace as _, Matrix4, Vector3};

/// Narrowest field of view, in degrees.
pub const FOVY_MIN: f32 = 45.;

/// Widest field of view, in degrees.
pub const FOVY_MAX: f32 = 90.;

/// Distance from the camera to the shape’s plane of movement, along Z.
pub const SHAPE_DEPTH: f32 = 3.;

/// How far the camera is pulled back along Z.
pub const CAMERA_DISTANCE: f32 = 10.;

pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.;

// degrees per second about the (1, 1, 1) axis in automatic mode
const AUTO_SPIN_SPEED: f32 = 45.;
// time scale of the horizontal sway in automatic mode
const AUTO_SWAY_RATE: f32 = 0.5;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CameraMode {
  Automatic,
  Manual,
}

impl CameraMode {
  pub fn toggle(self) -> Self {
    match self {
      CameraMode::Automatic => CameraMode::Manual,
      CameraMode::Manual => CameraMode::Automatic,
    }
  }
}

impl Default for CameraMode {
  fn default() -> Self {
    CameraMode::Automatic
  }
}

/// Input accumulated for the manual camera.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ManualInput {
  /// Horizontal and vertical translation offsets.
  pub translation: [f32; 2],
  /// Yaw and pitch offsets.
  pub rotation: [f32; 2],
  /// Whether the zoom modifier is held.
  pub zoom: bool,
}

impl ManualInput {
  /// Add one frame worth of movement axes.
  pub fn translate(&mut self, x: f32, y: f32) {
    self.translation[0] += x;
    self.translation[1] += y;
  }

  /// Add one frame worth of rotation axes.
  pub fn rotate(&mut self, x: f32, y: f32) {
    self.rotation[0] += x;
    self.rotation[1] += y;
  }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transforms {
  pub model: Matrix4<f32>,
  pub view: Matrix4<f32>,
  pub projection: Matrix4<f32>,
}

/// Computes [`Transforms`] from time, camera mode and input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformUpdater {
  move_speed: f32,
  rotation_speed: f32,
  aspect_ratio: f32,
}

impl TransformUpdater {
  pub fn new(move_speed: f32, rotation_speed: f32, aspect_ratio: f32) -> Self {
    TransformUpdater {
      move_speed,
      rotation_speed,
      aspect_ratio,
    }
  }

  pub fn aspect_ratio(&self) -> f32 {
    self.aspect_ratio
  }

  /// Track the viewport size; a degenerate size keeps the previous ratio.
  pub fn resize(&mut self, width: u32, height: u32) {
    if width > 0 && height > 0 {
      self.aspect_ratio = width as f32 / height as f32;
    }
  }

  pub fn update(&self, elapsed: f32, mode: CameraMode, input: &ManualInput) -> Transforms {
    let (translation, rotation) = match mode {
      CameraMode::Automatic => {
        let x = mix(-1., 1., sin_pos(elapsed * AUTO_SWAY_RATE));
        let axis = Vector3::new(1., 1., 1.).normalize();

        (
          Vector3::new(x, 0., SHAPE_DEPTH),
          Matrix4::from_axis_angle(axis, Deg(elapsed * AUTO_SPIN_SPEED)),
        )
      }

      CameraMode::Manual => {
        let [tx, ty] = input.translation;
        let [yaw, pitch] = input.rotation;
        let rot_y = Matrix4::from_angle_y(Deg(yaw * self.rotation_speed));
        let rot_x = Matrix4::from_angle_x(Deg(pitch * self.rotation_speed));

        (
          Vector3::new(tx * self.move_speed, ty * self.move_speed, SHAPE_DEPTH),
          rot_y * rot_x,
        )
      }
    };

    let model = Matrix4::from_translation(translation) * rotation * Matrix4::from_scale(1.);
    let view = Matrix4::from_translation(Vector3::new(0., 0., -CAMERA_DISTANCE));
    let fovy = field_of_view(elapsed, mode, input);
    let projection = perspective(Deg(fovy), self.aspect_ratio, Z_NEAR, Z_FAR);

    Transforms {
      model,
      view,
      projection,
    }
  }
}

/// Vertical field of view, in degrees.
pub fn field_of_view(elapsed: f32, mode: CameraMode, input: &ManualInput) -> f32 {
  match mode {
    CameraMode::Automatic => mix(FOVY_MIN, FOVY_MAX, sin_pos(elapsed)),
    CameraMode::Manual if input.zoom => FOVY_MIN,
    CameraMode::Manual => FOVY_MAX,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cgmath::{SquareMatrix as _, Vector4};

  fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-5, "{} != {}", a, b);
  }

  #[test]
  fn automatic_fovy_stays_in_range() {
    let input = ManualInput::default();

    for i in 0..10_000 {
      let t = i as f32 * 0.013;
      let fovy = field_of_view(t, CameraMode::Automatic, &input);
      assert!((FOVY_MIN..=FOVY_MAX).contains(&fovy), "t={} fovy={}", t, fovy);
    }
  }

  #[test]
  fn manual_fovy_snaps() {
    let mut input = ManualInput::default();
    assert_eq!(field_of_view(12.3, CameraMode::Manual, &input), 90.);

    input.zoom = true;
    assert_eq!(field_of_view(12.3, CameraMode::Manual, &input), 45.);
  }

  #[test]
  fn toggling_twice_is_identity() {
    for mode in [CameraMode::Automatic, CameraMode::Manual] {
      assert_eq!(mode.toggle().toggle(), mode);
      assert_ne!(mode.toggle(), mode);
    }
  }

  #[test]
  fn automatic_sway_starts_centered() {
    let updater = TransformUpdater::new(0.1, 1., 16. / 9.);
    let t = updater.update(0., CameraMode::Automatic, &ManualInput::default());

    // no rotation at t = 0, sin_pos(0) = 0.5 puts the shape at x = 0
    let origin = t.model * Vector4::new(0., 0., 0., 1.);
    assert_close(origin.x, 0.);
    assert_close(origin.y, 0.);
    assert_close(origin.z, SHAPE_DEPTH);
  }

  #[test]
  fn manual_translation_scales_with_speed() {
    let updater = TransformUpdater::new(0.1, 1., 1.);
    let mut input = ManualInput::default();
    input.translate(5., -2.);
    input.translate(5., 0.);

    let t = updater.update(100., CameraMode::Manual, &input);
    let origin = t.model * Vector4::new(0., 0., 0., 1.);
    assert_close(origin.x, 1.);
    assert_close(origin.y, -0.2);
    assert_close(origin.z, SHAPE_DEPTH);
  }

  #[test]
  fn manual_rotation_is_yaw_then_pitch() {
    let updater = TransformUpdater::new(0.1, 1., 1.);
    let mut input = ManualInput::default();
    input.rotate(90., 0.);

    // a 90° yaw sends +X to -Z
    let t = updater.update(0., CameraMode::Manual, &input);
    let x = t.model * Vector4::new(1., 0., 0., 0.);
    assert_close(x.x, 0.);
    assert_close(x.z, -1.);
  }

  #[test]
  fn view_pulls_camera_back() {
    let updater = TransformUpdater::new(0.1, 1., 1.);
    let t = updater.update(0., CameraMode::Manual, &ManualInput::default());
    let p = t.view * Vector4::new(0., 0., 0., 1.);
    assert_close(p.z, -CAMERA_DISTANCE);
    assert!(t.view.invert().is_some());
  }

  #[test]
  fn projection_follows_the_viewport() {
    let mut updater = TransformUpdater::new(0.1, 1., 1.);
    updater.resize(1600, 900);
    assert_close(updater.aspect_ratio(), 16. / 9.);

    updater.resize(0, 900);
    assert_close(updater.aspect_ratio(), 16. / 9.);

    let input = ManualInput::default();
    let t = updater.update(0., CameraMode::Manual, &input);
    let expected = perspective(Deg(90.), 16. / 9., Z_NEAR, Z_FAR);
    assert_eq!(t.projection, expected);
  }
}
