//! The user's selected file and its loading state.

use super::{decode_image, resize_to_fit, DecodeError, DecodedImage, FilterType};

/// A single file yielded by the file picker or camera capture control.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// MIME type reported by the picker (e.g. `image/jpeg`).
    pub mime_type: String,
    /// Original file name.
    pub file_name: String,
}

impl SelectedFile {
    /// Wrap picked file contents.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Whether the file may be a raster image. Some camera captures arrive
    /// with no MIME type at all; those are left to the byte sniffing decoder.
    pub fn may_be_image(&self) -> bool {
        self.mime_type.is_empty() || self.mime_type.starts_with("image/")
    }
}

/// The originally selected raster, owned by the crop session.
///
/// A source starts out pending: the file is known but its pixels are not.
/// Once [`SourceImage::load`] succeeds the decoded pixels never change.
#[derive(Debug, Clone)]
pub struct SourceImage {
    file: SelectedFile,
    decoded: Option<DecodedImage>,
}

impl SourceImage {
    /// A source whose pixels have not been decoded yet.
    pub fn pending(file: SelectedFile) -> Self {
        Self {
            file,
            decoded: None,
        }
    }

    /// A source built from pixels that are already decoded.
    pub fn from_decoded(file: SelectedFile, image: DecodedImage) -> Self {
        Self {
            file,
            decoded: Some(image),
        }
    }

    /// Decode the selected file, bounding its longest edge by `max_edge`.
    ///
    /// Loading an already loaded source is a no-op. On failure the source
    /// stays pending.
    pub fn load(&mut self, max_edge: u32) -> Result<(), DecodeError> {
        if self.decoded.is_some() {
            return Ok(());
        }

        let decoded = decode_image(&self.file.bytes)?;
        let bounded = if max_edge > 0 {
            resize_to_fit(&decoded, max_edge, FilterType::Lanczos3)?
        } else {
            decoded
        };

        self.decoded = Some(bounded);
        Ok(())
    }

    /// True once pixels are available and both dimensions are non-zero.
    pub fn is_ready(&self) -> bool {
        self.decoded.as_ref().is_some_and(|img| !img.is_empty())
    }

    /// Loaded pixels, if any.
    pub fn decoded(&self) -> Option<&DecodedImage> {
        self.decoded.as_ref()
    }

    /// Width and height, available only once loaded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.decoded.as_ref().map(|img| (img.width, img.height))
    }

    /// The file this source was selected from.
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }
}
