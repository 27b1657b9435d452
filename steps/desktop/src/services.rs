//! Platform services implementation.

use gl_steps::{Features, PlatformServices};
use image::ImageError;
use std::{
  collections::HashMap,
  error::Error,
  fmt,
  path::{Path, PathBuf},
};

/// Desktop implementation of the [`PlatformServices`] API.
///
/// Textures are read from disk once, when the services are created.
#[derive(Debug)]
pub struct DesktopPlatformServices {
  textures: HashMap<String, image::RgbImage>,
}

impl DesktopPlatformServices {
  /// Load every texture `features` asks for from the `texture_root` directory.
  pub fn load(texture_root: &Path, features: &Features) -> Result<Self, DesktopFetchError> {
    let textures = features
      .textures()
      .iter()
      .map(|name| {
        let path = texture_root.join(name);
        log::debug!("loading texture {}", path.display());

        // images are stored top row first, OpenGL textures bottom row first
        image::open(&path)
          .map(|img| (name.clone(), img.flipv().to_rgb8()))
          .map_err(|source| DesktopFetchError::ImageError { path, source })
      })
      .collect::<Result<HashMap<_, _>, DesktopFetchError>>()?;

    Ok(Self { textures })
  }
}

#[derive(Debug)]
pub enum DesktopFetchError {
  UnknownTexture(String),
  ImageError { path: PathBuf, source: ImageError },
}

impl fmt::Display for DesktopFetchError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DesktopFetchError::UnknownTexture(ref name) => write!(f, "unknown texture to load: {}", name),
      DesktopFetchError::ImageError { ref path, ref source } => {
        write!(f, "cannot fetch texture {}: {}", path.display(), source)
      }
    }
  }
}

impl Error for DesktopFetchError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      DesktopFetchError::UnknownTexture(_) => None,
      DesktopFetchError::ImageError { source, .. } => Some(source),
    }
  }
}

impl PlatformServices for DesktopPlatformServices {
  type FetchError = DesktopFetchError;

  fn fetch_texture(&mut self, name: impl AsRef<str>) -> Result<&image::RgbImage, Self::FetchError> {
    let name = name.as_ref();
    self
      .textures
      .get(name)
      .ok_or_else(|| DesktopFetchError::UnknownTexture(name.to_owned()))
  }
}
