//! A flat scene graph: named objects, each with its own translation / rotation / scale.

use crate::color::Rgb;
use cgmath::{Deg, Matrix4, Vector3};

/// Position, Euler rotation (degrees) and scale of an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
  pub position: Vector3<f32>,
  pub rotation: Vector3<f32>,
  pub scale: Vector3<f32>,
}

impl Default for Transform {
  fn default() -> Self {
    Transform {
      position: Vector3::new(0., 0., 0.),
      rotation: Vector3::new(0., 0., 0.),
      scale: Vector3::new(1., 1., 1.),
    }
  }
}

impl Transform {
  pub fn at(position: Vector3<f32>) -> Self {
    Transform {
      position,
      ..Transform::default()
    }
  }

  /// Model matrix: scale first, then rotate about X, Y and Z, then translate.
  pub fn trs(&self) -> Matrix4<f32> {
    let r = Matrix4::from_angle_z(Deg(self.rotation.z))
      * Matrix4::from_angle_y(Deg(self.rotation.y))
      * Matrix4::from_angle_x(Deg(self.rotation.x));
    let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);

    Matrix4::from_translation(self.position) * r * s
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
  pub name: String,
  pub transform: Transform,
  pub tint: Rgb,
}

impl SceneObject {
  pub fn new(name: impl Into<String>, transform: Transform, tint: impl Into<Rgb>) -> Self {
    SceneObject {
      name: name.into(),
      transform,
      tint: tint.into(),
    }
  }
}

/// Objects spinning at the same rate on all three axes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
  objects: Vec<SceneObject>,
  spin: f32,
}

impl Scene {
  /// `spin` is in degrees per second.
  pub fn new(spin: f32) -> Self {
    Scene {
      objects: Vec::new(),
      spin,
    }
  }

  pub fn add(&mut self, object: SceneObject) {
    self.objects.push(object);
  }

  pub fn len(&self) -> usize {
    self.objects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.is_empty()
  }

  pub fn objects(&self) -> &[SceneObject] {
    &self.objects
  }

  pub fn get(&self, name: &str) -> Option<&SceneObject> {
    self.objects.iter().find(|o| o.name == name)
  }

  /// Advance the scene by `dt` seconds.
  pub fn update(&mut self, dt: f32) {
    let step = self.spin * dt;

    for object in &mut self.objects {
      object.transform.rotation += Vector3::new(step, step, step);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::color::Palette;
  use cgmath::{SquareMatrix as _, Vector4};

  #[test]
  fn default_transform_is_identity() {
    assert_eq!(Transform::default().trs(), Matrix4::identity());
  }

  #[test]
  fn trs_scales_before_translating() {
    let transform = Transform {
      position: Vector3::new(0., 0., -10.),
      rotation: Vector3::new(0., 0., 0.),
      scale: Vector3::new(1., 2., 0.5),
    };

    let p = transform.trs() * Vector4::new(1., 1., 1., 1.);
    assert_eq!(p, Vector4::new(1., 2., -9.5, 1.));
  }

  #[test]
  fn update_spins_every_object() {
    let mut scene = Scene::new(50.);
    scene.add(SceneObject::new(
      "a",
      Transform::at(Vector3::new(-3., 1., -10.)),
      Palette::White,
    ));
    scene.add(SceneObject::new(
      "b",
      Transform::at(Vector3::new(0., 0., -10.)),
      Palette::Magenta,
    ));

    scene.update(0.5);
    scene.update(0.5);

    for object in scene.objects() {
      assert_eq!(object.transform.rotation, Vector3::new(50., 50., 50.));
    }

    assert_eq!(scene.get("b").map(|o| o.tint), Some(Palette::Magenta.rgb()));
    assert!(scene.get("c").is_none());
  }
}
