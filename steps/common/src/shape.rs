//! Static table of named meshes.
//!
//! Shapes are plain vertex positions and triangle indices. The same data can be rasterized as
//! filled triangles, as a wireframe or as points; [`Shape::indices_for`] computes the index list
//! matching a [`RasterMode`].

use crate::RasterMode;
use std::borrow::Cow;

/// A named mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
  pub name: &'static str,
  pub vertices: &'static [[f32; 3]],
  pub indices: &'static [u32],
}

impl Shape {
  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty() || self.indices.is_empty()
  }

  /// First index referencing a vertex that doesn’t exist, if any.
  pub fn out_of_range_index(&self) -> Option<u32> {
    let count = self.vertices.len();
    self.indices.iter().copied().find(|&i| i as usize >= count)
  }

  /// Index list to upload for a given rasterization mode.
  ///
  /// - [`RasterMode::Fill`]: the triangle list as is.
  /// - [`RasterMode::Wireframe`]: a line list with the three edges of every triangle.
  /// - [`RasterMode::Point`]: every vertex, once.
  pub fn indices_for(&self, mode: RasterMode) -> Cow<'static, [u32]> {
    match mode {
      RasterMode::Fill => Cow::Borrowed(self.indices),
      RasterMode::Wireframe => Cow::Owned(self.edge_indices()),
      RasterMode::Point => Cow::Owned((0..self.vertices.len() as u32).collect()),
    }
  }

  fn edge_indices(&self) -> Vec<u32> {
    self
      .indices
      .chunks_exact(3)
      .flat_map(|tri| [tri[0], tri[1], tri[1], tri[2], tri[2], tri[0]])
      .collect()
  }
}

/// A fixed, non-empty set of shapes selected by index.
///
/// Indices wrap around in both directions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeRegistry {
  shapes: &'static [Shape],
}

impl ShapeRegistry {
  /// Create a registry; `None` if `shapes` is empty.
  pub const fn new(shapes: &'static [Shape]) -> Option<Self> {
    if shapes.is_empty() {
      None
    } else {
      Some(ShapeRegistry { shapes })
    }
  }

  /// The triangle, rectangle, cube and pyramid, in that order.
  pub fn builtin() -> Self {
    ShapeRegistry {
      shapes: &BUILTIN_SHAPES,
    }
  }

  pub fn len(&self) -> usize {
    self.shapes.len()
  }

  pub fn is_empty(&self) -> bool {
    false
  }

  /// Shape at `index`, taken modulo the number of shapes.
  pub fn get(&self, index: usize) -> &'static Shape {
    let shapes = self.shapes;
    &shapes[index % shapes.len()]
  }

  /// Find a shape by name.
  pub fn find(&self, name: &str) -> Option<(usize, &'static Shape)> {
    let shapes = self.shapes;
    shapes.iter().enumerate().find(|(_, s)| s.name == name)
  }

  pub fn next_index(&self, index: usize) -> usize {
    (index % self.len() + 1) % self.len()
  }

  pub fn previous_index(&self, index: usize) -> usize {
    let count = self.len();
    (index % count + count - 1) % count
  }

  pub fn iter(&self) -> impl Iterator<Item = &'static Shape> {
    let shapes = self.shapes;
    shapes.iter()
  }
}

impl Default for ShapeRegistry {
  fn default() -> Self {
    Self::builtin()
  }
}

#[rustfmt::skip]
const TRIANGLE_VERTICES: [[f32; 3]; 3] = [
  [0., 0., 0.], // bottom left
  [1., 0., 0.], // bottom right
  [0., 1., 0.], // top
];

const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

#[rustfmt::skip]
const RECTANGLE_VERTICES: [[f32; 3]; 4] = [
  [-0.5, -0.5, 0.], // bottom left
  [ 0.5, -0.5, 0.], // bottom right
  [ 0.5,  0.5, 0.], // top right
  [-0.5,  0.5, 0.], // top left
];

#[rustfmt::skip]
const RECTANGLE_INDICES: [u32; 6] = [
  0, 1, 2,
  2, 3, 0,
];

#[rustfmt::skip]
const CUBE_VERTICES: [[f32; 3]; 8] = [
  // near
  [-0.5, -0.5,  0.5],
  [ 0.5, -0.5,  0.5],
  [ 0.5,  0.5,  0.5],
  [-0.5,  0.5,  0.5],
  // far
  [-0.5, -0.5, -0.5],
  [ 0.5, -0.5, -0.5],
  [ 0.5,  0.5, -0.5],
  [-0.5,  0.5, -0.5],
];

#[rustfmt::skip]
const CUBE_INDICES: [u32; 36] = [
  0, 1, 2,  2, 3, 0,
  4, 5, 1,  1, 0, 4,
  7, 6, 5,  5, 4, 7,
  3, 2, 6,  6, 7, 3,
  1, 5, 6,  6, 2, 1,
  4, 0, 3,  3, 7, 4,
];

#[rustfmt::skip]
const PYRAMID_VERTICES: [[f32; 3]; 5] = [
  [-0.5, -0.5,  0.5], // base, near left
  [ 0.5, -0.5,  0.5], // base, near right
  [-0.5, -0.5, -0.5], // base, far left
  [ 0.5, -0.5, -0.5], // base, far right
  [ 0.,   0.5,  0. ], // apex
];

#[rustfmt::skip]
const PYRAMID_INDICES: [u32; 18] = [
  0, 1, 2,  2, 3, 0, // base
  0, 1, 4,
  1, 2, 4,
  2, 3, 4,
  3, 0, 4,
];

const BUILTIN_SHAPES: [Shape; 4] = [
  Shape {
    name: "triangle",
    vertices: &TRIANGLE_VERTICES,
    indices: &TRIANGLE_INDICES,
  },
  Shape {
    name: "rectangle",
    vertices: &RECTANGLE_VERTICES,
    indices: &RECTANGLE_INDICES,
  },
  Shape {
    name: "cube",
    vertices: &CUBE_VERTICES,
    indices: &CUBE_INDICES,
  },
  Shape {
    name: "pyramid",
    vertices: &PYRAMID_VERTICES,
    indices: &PYRAMID_INDICES,
  },
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_shapes_are_well_formed() {
    let registry = ShapeRegistry::builtin();
    assert_eq!(registry.len(), 4);
    assert!(!registry.is_empty());

    for shape in registry.iter() {
      assert_eq!(shape.indices.len() % 3, 0, "{}", shape.name);
      assert_eq!(shape.out_of_range_index(), None, "{}", shape.name);
    }

    assert_eq!(registry.get(2).name, "cube");
    assert_eq!(registry.get(2).triangle_count(), 12);
    assert_eq!(registry.get(3).triangle_count(), 6);
  }

  #[test]
  fn get_is_cyclic_and_pure() {
    let registry = ShapeRegistry::builtin();

    for i in 0..20 {
      assert_eq!(registry.get(i), registry.get(i % registry.len()));
      assert_eq!(registry.get(i), registry.get(i));
    }
  }

  #[test]
  fn next_cycles_back_to_start() {
    let registry = ShapeRegistry::builtin();

    for start in 0..registry.len() {
      let mut i = start;
      for _ in 0..registry.len() {
        i = registry.next_index(i);
      }
      assert_eq!(i, start);
    }

    assert_eq!(registry.next_index(3), 0);
  }

  #[test]
  fn previous_wraps_without_underflow() {
    let registry = ShapeRegistry::builtin();
    assert_eq!(registry.previous_index(0), 3);
    assert_eq!(registry.previous_index(1), 0);

    let mut i = 0;
    for _ in 0..registry.len() {
      i = registry.previous_index(i);
    }
    assert_eq!(i, 0);
  }

  #[test]
  fn empty_registry_is_rejected() {
    static NONE: [Shape; 0] = [];
    assert!(ShapeRegistry::new(&NONE).is_none());
  }

  #[test]
  fn find_by_name() {
    let registry = ShapeRegistry::builtin();
    assert_eq!(registry.find("pyramid").map(|(i, _)| i), Some(3));
    assert!(registry.find("dodecahedron").is_none());
  }

  #[test]
  fn detects_out_of_range_indices() {
    static BROKEN: Shape = Shape {
      name: "broken",
      vertices: &[[0., 0., 0.], [1., 0., 0.]],
      indices: &[0, 1, 2],
    };

    assert_eq!(BROKEN.out_of_range_index(), Some(2));
  }

  #[test]
  fn wireframe_and_point_indices() {
    let triangle = ShapeRegistry::builtin().get(0);

    assert_eq!(&*triangle.indices_for(RasterMode::Fill), &[0, 1, 2]);
    assert_eq!(
      &*triangle.indices_for(RasterMode::Wireframe),
      &[0, 1, 1, 2, 2, 0]
    );
    assert_eq!(&*triangle.indices_for(RasterMode::Point), &[0, 1, 2]);

    let cube = ShapeRegistry::builtin().get(2);
    assert_eq!(cube.indices_for(RasterMode::Wireframe).len(), 12 * 6);
    assert_eq!(cube.indices_for(RasterMode::Point).len(), 8);
  }
}
