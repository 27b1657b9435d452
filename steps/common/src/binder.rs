//! Upload a [`Shape`] to the GPU.
//!
//! The binder owns at most one tessellation at a time. Binding a new shape drops the previous
//! tessellation, releasing its vertex and index buffers, and the draw element count is recomputed
//! from the byte size of the uploaded index buffer.

use crate::{shape::Shape, shared::ShapeVertex, RasterMode};
use luminance_front::{
  context::GraphicsContext,
  tess::{Mode, Tess, TessError},
  Backend,
};
use std::{error::Error, fmt, mem};

/// Width, in bytes, of one index record.
pub const INDEX_WIDTH: usize = mem::size_of::<u32>();

/// Number of elements to draw out of an index buffer of `index_bytes` bytes.
pub fn element_count(index_bytes: usize) -> usize {
  index_bytes / INDEX_WIDTH
}

/// Primitive assembled by the GPU for a given rasterization mode.
pub fn tess_mode(raster: RasterMode) -> Mode {
  match raster {
    RasterMode::Fill => Mode::Triangle,
    RasterMode::Wireframe => Mode::Line,
    RasterMode::Point => Mode::Point,
  }
}

#[non_exhaustive]
#[derive(Debug)]
pub enum BindError {
  /// An index references a vertex past the end of the vertex list.
  IndexOutOfRange {
    shape: &'static str,
    index: u32,
    vertex_count: usize,
  },

  /// The tessellation could not be built.
  Tess(TessError),
}

impl fmt::Display for BindError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      BindError::IndexOutOfRange {
        shape,
        index,
        vertex_count,
      } => write!(
        f,
        "shape {} references vertex {} but only has {} vertices",
        shape, index, vertex_count
      ),
      BindError::Tess(ref e) => write!(f, "cannot build tessellation: {}", e),
    }
  }
}

impl Error for BindError {}

impl From<TessError> for BindError {
  fn from(e: TessError) -> Self {
    BindError::Tess(e)
  }
}

/// Vertices and indices to upload for `shape` rasterized with `raster`.
///
/// Returns `None` when there is nothing to draw.
pub fn upload_data(
  shape: &Shape,
  raster: RasterMode,
) -> Result<Option<(Vec<ShapeVertex>, Vec<u32>)>, BindError> {
  if let Some(index) = shape.out_of_range_index() {
    return Err(BindError::IndexOutOfRange {
      shape: shape.name,
      index,
      vertex_count: shape.vertex_count(),
    });
  }

  if shape.is_empty() {
    return Ok(None);
  }

  let vertices = shape
    .vertices
    .iter()
    .copied()
    .map(ShapeVertex::from)
    .collect();
  let indices = shape.indices_for(raster).into_owned();

  Ok(Some((vertices, indices)))
}

/// The single set of GPU buffers currently bound.
pub struct ShapeBinder {
  tess: Option<Tess<ShapeVertex, u32>>,
  element_count: usize,
  bound: Option<(&'static str, RasterMode)>,
}

impl ShapeBinder {
  pub fn new() -> Self {
    ShapeBinder {
      tess: None,
      element_count: 0,
      bound: None,
    }
  }

  /// Upload `shape` for the given rasterization mode, replacing whatever was bound before.
  ///
  /// An empty shape leaves nothing bound; drawing is then a no-op. On error, the previous
  /// tessellation is already gone and nothing is bound either.
  pub fn bind(
    &mut self,
    context: &mut impl GraphicsContext<Backend = Backend>,
    shape: &Shape,
    raster: RasterMode,
  ) -> Result<(), BindError> {
    self.tess = None;
    self.element_count = 0;
    self.bound = None;

    let data = upload_data(shape, raster)?;
    self.bound = Some((shape.name, raster));

    let (vertices, indices) = match data {
      Some(data) => data,
      None => return Ok(()),
    };
    let index_bytes = indices.len() * INDEX_WIDTH;

    let tess = context
      .new_tess()
      .set_vertices(vertices)
      .set_indices(indices)
      .set_mode(tess_mode(raster))
      .build()?;

    self.tess = Some(tess);
    self.element_count = element_count(index_bytes);

    Ok(())
  }

  /// Currently bound tessellation, if any.
  pub fn tess(&self) -> Option<&Tess<ShapeVertex, u32>> {
    self.tess.as_ref()
  }

  /// Number of indices the next draw call will read.
  pub fn element_count(&self) -> usize {
    self.element_count
  }

  /// Name and rasterization mode of the last shape bound.
  pub fn bound(&self) -> Option<(&'static str, RasterMode)> {
    self.bound
  }
}

impl Default for ShapeBinder {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::shape::ShapeRegistry;

  #[test]
  fn element_count_is_bytes_over_index_width() {
    assert_eq!(INDEX_WIDTH, 4);
    assert_eq!(element_count(0), 0);
    assert_eq!(element_count(36 * 4), 36);
  }

  #[test]
  fn element_count_matches_each_raster_mode() {
    let cube = ShapeRegistry::builtin().get(2);

    let count = |mode| element_count(cube.indices_for(mode).len() * INDEX_WIDTH);
    assert_eq!(count(RasterMode::Fill), 36);
    assert_eq!(count(RasterMode::Wireframe), 72);
    assert_eq!(count(RasterMode::Point), 8);
  }

  #[test]
  fn raster_modes_pick_primitives() {
    assert!(matches!(tess_mode(RasterMode::Fill), Mode::Triangle));
    assert!(matches!(tess_mode(RasterMode::Wireframe), Mode::Line));
    assert!(matches!(tess_mode(RasterMode::Point), Mode::Point));
  }

  #[test]
  fn empty_shapes_upload_nothing() {
    let no_vertices = Shape {
      name: "nothing",
      vertices: &[],
      indices: &[],
    };
    assert!(matches!(upload_data(&no_vertices, RasterMode::Fill), Ok(None)));

    let no_indices = Shape {
      name: "loose points",
      vertices: &[[0., 0., 0.], [1., 0., 0.]],
      indices: &[],
    };
    assert!(matches!(upload_data(&no_indices, RasterMode::Wireframe), Ok(None)));
  }

  #[test]
  fn out_of_range_indices_are_rejected() {
    let broken = Shape {
      name: "broken",
      vertices: &[[0., 0., 0.], [1., 0., 0.], [0., 1., 0.]],
      indices: &[0, 1, 3],
    };

    match upload_data(&broken, RasterMode::Fill) {
      Err(BindError::IndexOutOfRange {
        shape,
        index,
        vertex_count,
      }) => {
        assert_eq!(shape, "broken");
        assert_eq!(index, 3);
        assert_eq!(vertex_count, 3);
      }
      _ => panic!("index 3 must be rejected"),
    }
  }

  #[test]
  fn upload_data_follows_the_raster_mode() {
    let triangle = ShapeRegistry::builtin().get(0);

    let (vertices, indices) = match upload_data(triangle, RasterMode::Point) {
      Ok(Some(data)) => data,
      _ => panic!("the triangle has data to upload"),
    };
    assert_eq!(vertices.len(), triangle.vertex_count());
    assert_eq!(vertices[0], ShapeVertex::from(triangle.vertices[0]));
    assert_eq!(indices, triangle.indices_for(RasterMode::Point).into_owned());
  }

  #[test]
  fn fresh_binder_draws_nothing() {
    let binder = ShapeBinder::new();
    assert!(binder.tess().is_none());
    assert_eq!(binder.element_count(), 0);
    assert_eq!(binder.bound(), None);
  }
}
