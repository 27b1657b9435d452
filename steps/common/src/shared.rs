use crate::{PlatformServices, StepError};
use luminance::{Semantics, Vertex};
use luminance_front::{
  context::GraphicsContext,
  pixel::NormRGB8UI,
  texture::{Dim2, GenMipmaps, MagFilter, MinFilter, Sampler, Texture},
  Backend,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Semantics)]
pub enum Semantics {
  // reference vertex positions with the position variable in vertex shaders
  #[sem(name = "position", repr = "[f32; 3]", wrapper = "VertexPosition")]
  Position,
  // reference vertex colors with the color variable in vertex shaders
  #[sem(name = "color", repr = "[f32; 3]", wrapper = "VertexColor")]
  Color,
  // texture coordinates
  #[sem(name = "uv", repr = "[f32; 2]", wrapper = "VertexUv")]
  Uv,
}

// A single attribute: three contiguous floats, stride of one record, offset 0.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Vertex)]
#[vertex(sem = "Semantics")]
pub struct ShapeVertex {
  pub pos: VertexPosition,
}

impl From<[f32; 3]> for ShapeVertex {
  fn from(p: [f32; 3]) -> Self {
    ShapeVertex::new(VertexPosition::new(p))
  }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Vertex)]
#[vertex(sem = "Semantics")]
pub struct ColoredVertex {
  pub pos: VertexPosition,
  pub rgb: VertexColor,
  pub uv: VertexUv,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Vertex)]
#[vertex(sem = "Semantics")]
pub struct TexturedVertex {
  pub pos: VertexPosition,
  pub uv: VertexUv,
}

/// Texture corners, counter-clockwise from the bottom left, matching the vertex order of every
/// quad below.
pub const QUAD_UVS: [[f32; 2]; 4] = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]];

#[rustfmt::skip]
pub const QUAD: [[f32; 3]; 4] = [
  [-1., -1., 0.], [ 1., -1., 0.], [ 1.,  1., 0.], [-1.,  1., 0.],
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// [`QUAD`] with the whole texture stretched on it.
pub fn textured_quad() -> Vec<TexturedVertex> {
  QUAD
    .iter()
    .zip(QUAD_UVS.iter())
    .map(|(&p, &uv)| TexturedVertex::new(VertexPosition::new(p), VertexUv::new(uv)))
    .collect()
}

// Cube with one set of four vertices per face, so that every face can be shaded on its own.
#[rustfmt::skip]
pub const FACETED_CUBE: [[f32; 3]; 24] = [
  // near
  [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
  // far
  [ 0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5],
  // left
  [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
  // right
  [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
  // bottom
  [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
  // top
  [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
];

/// Two triangles per face of [`FACETED_CUBE`].
pub fn faceted_cube_indices() -> Vec<u32> {
  (0..6u32)
    .flat_map(|face| {
      let b = face * 4;
      [b, b + 1, b + 2, b + 2, b + 3, b]
    })
    .collect()
}

/// Vertices of [`FACETED_CUBE`] shaded in grayscale by height: black at the bottom, white at the
/// top. Every face maps the whole texture.
pub fn grayscale_cube() -> Vec<ColoredVertex> {
  FACETED_CUBE
    .iter()
    .zip(QUAD_UVS.iter().cycle())
    .map(|(&p, &uv)| {
      ColoredVertex::new(
        VertexPosition::new(p),
        VertexColor::new(height_gray(p)),
        VertexUv::new(uv),
      )
    })
    .collect()
}

// points of the unit cube range from -0.5 to 0.5
fn height_gray([_, y, _]: [f32; 3]) -> [f32; 3] {
  let intensity = y + 0.5;
  [intensity, intensity, intensity]
}

/// RGB texture.
pub type RGBTexture = Texture<Dim2, NormRGB8UI>;

/// Bilinear filtering both ways.
pub fn linear_sampler() -> Sampler {
  Sampler {
    min_filter: MinFilter::Linear,
    mag_filter: MagFilter::Linear,
    ..Sampler::default()
  }
}

/// Size and raw RGB texels of the texture `name`.
pub fn fetch_texels(
  platform: &mut impl PlatformServices,
  name: &str,
) -> Result<([u32; 2], Vec<u8>), StepError> {
  let img = platform.fetch_texture(name).map_err(StepError::fetch)?;
  let (width, height) = img.dimensions();

  Ok(([width, height], img.as_raw().clone()))
}

pub fn load_texture(
  context: &mut impl GraphicsContext<Backend = Backend>,
  platform: &mut impl PlatformServices,
  name: &str,
) -> Result<RGBTexture, StepError> {
  let (size, texels) = fetch_texels(platform, name)?;
  log::info!("loaded texture {} ({}×{})", name, size[0], size[1]);

  // no mipmaps: the texture is only ever sampled with linear filtering
  let texture: RGBTexture =
    context.new_texture_raw(size, 0, linear_sampler(), GenMipmaps::No, &texels)?;

  Ok(texture)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::{collections::HashMap, error::Error, fmt};

  #[test]
  fn faceted_cube_indices_stay_in_range() {
    let indices = faceted_cube_indices();
    assert_eq!(indices.len(), 36);
    assert!(indices.iter().all(|&i| (i as usize) < FACETED_CUBE.len()));
  }

  struct Textures(HashMap<String, image::RgbImage>);

  #[derive(Debug)]
  struct Missing(String);

  impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
      write!(f, "missing {}", self.0)
    }
  }

  impl Error for Missing {}

  impl PlatformServices for Textures {
    type FetchError = Missing;

    fn fetch_texture(&mut self, name: impl AsRef<str>) -> Result<&image::RgbImage, Missing> {
      let name = name.as_ref();
      self.0.get(name).ok_or_else(|| Missing(name.to_owned()))
    }
  }

  #[test]
  fn fetched_texels_are_tightly_packed_rgb() {
    let mut img = image::RgbImage::new(3, 2);
    img.put_pixel(2, 1, image::Rgb([255, 128, 0]));

    let mut platform = Textures(vec![("crate.jpg".to_owned(), img)].into_iter().collect());
    let (size, texels) = fetch_texels(&mut platform, "crate.jpg").unwrap();

    assert_eq!(size, [3, 2]);
    assert_eq!(texels.len(), 3 * 2 * 3);
    assert_eq!(&texels[15..], &[255, 128, 0]);
  }

  #[test]
  fn missing_textures_are_fetch_errors() {
    let mut platform = Textures(HashMap::new());

    match fetch_texels(&mut platform, "crate.jpg") {
      Err(e @ StepError::Fetch(_)) => {
        assert_eq!(e.to_string(), "cannot fetch resource: missing crate.jpg")
      }
      other => panic!("unexpected result: {:?}", other.map(|(size, _)| size)),
    }
  }

  #[test]
  fn textures_are_filtered_linearly() {
    let sampler = linear_sampler();
    assert!(matches!(sampler.min_filter, MinFilter::Linear));
    assert!(matches!(sampler.mag_filter, MagFilter::Linear));
  }

  #[test]
  fn every_face_maps_the_whole_texture() {
    let cube = grayscale_cube();

    for face in cube.chunks(4) {
      let uvs: Vec<[f32; 2]> = face.iter().map(|v| *v.uv).collect();
      assert_eq!(uvs, QUAD_UVS.to_vec());
    }

    let quad = textured_quad();
    assert_eq!(quad.len(), 4);
    assert_eq!(*quad[2].pos, [1., 1., 0.]);
    assert_eq!(*quad[2].uv, [1., 1.]);
    assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < quad.len()));
  }

  #[test]
  fn grayscale_follows_height() {
    assert_eq!(height_gray([0.5, -0.5, 0.5]), [0., 0., 0.]);
    assert_eq!(height_gray([-0.5, 0.5, 0.5]), [1., 1., 1.]);

    let cube = grayscale_cube();
    assert_eq!(cube.len(), FACETED_CUBE.len());
    assert_eq!(
      cube[0],
      ColoredVertex::new(
        VertexPosition::new(FACETED_CUBE[0]),
        VertexColor::new([0.; 3]),
        VertexUv::new([0., 0.])
      )
    );
  }
}
