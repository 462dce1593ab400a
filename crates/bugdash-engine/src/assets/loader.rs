use std::path::{Path, PathBuf};

use crate::render::Image;

use super::{AssetError, AssetId};

/// Turns one asset identifier into a decoded image.
///
/// Called from loader threads, one call per identifier, so implementations
/// must be thread-safe. Closures with the matching signature are loaders too.
pub trait AssetLoader: Send + Sync + 'static {
    fn load(&self, id: &AssetId) -> Result<Image, AssetError>;
}

impl<F> AssetLoader for F
where
    F: Fn(&AssetId) -> Result<Image, AssetError> + Send + Sync + 'static,
{
    fn load(&self, id: &AssetId) -> Result<Image, AssetError> {
        self(id)
    }
}

/// Loads images from files below a root directory.
///
/// The identifier is used as a path relative to the root; the format is
/// sniffed from the file contents (PNG, JPEG and BMP are enabled).
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &AssetId) -> PathBuf {
        self.root.join(id.as_str())
    }
}

impl AssetLoader for FileLoader {
    fn load(&self, id: &AssetId) -> Result<Image, AssetError> {
        let path = self.path_for(id);
        let bytes = std::fs::read(&path).map_err(|e| AssetError::Io {
            id: id.clone(),
            message: format!("{}: {e}", path.display()),
        })?;

        let decoded = image::load_from_memory(&bytes).map_err(|e| AssetError::Decode {
            id: id.clone(),
            message: e.to_string(),
        })?;

        log::trace!("decoded `{id}` ({}x{})", decoded.width(), decoded.height());
        Ok(Image::from_rgba_image(decoded.to_rgba8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Rgba8;

    #[test]
    fn decodes_png_below_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("images")).unwrap();
        image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]))
            .save(dir.path().join("images/tile.png"))
            .unwrap();

        let loader = FileLoader::new(dir.path());
        let img = loader.load(&AssetId::new("images/tile.png")).unwrap();

        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.pixel(2, 1), Some(Rgba8::rgb(1, 2, 3)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileLoader::new(dir.path())
            .load(&AssetId::new("images/nope.png"))
            .unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert_eq!(err.id().as_str(), "images/nope.png");
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("junk.png"), b"definitely not a png").unwrap();
        let err = FileLoader::new(dir.path())
            .load(&AssetId::new("junk.png"))
            .unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn closures_are_loaders() {
        let loader = |id: &AssetId| -> Result<Image, AssetError> {
            if id.as_str() == "ok" {
                Ok(Image::filled(1, 1, Rgba8::WHITE))
            } else {
                Err(AssetError::NotLoaded(id.clone()))
            }
        };
        assert!(loader.load(&AssetId::new("ok")).is_ok());
        assert!(loader.load(&AssetId::new("other")).is_err());
    }
}
