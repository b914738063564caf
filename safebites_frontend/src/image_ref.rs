use std::fmt;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

/// Filename used when the picker gives us nothing better (data URIs, bare roots).
pub const DEFAULT_FILE_NAME: &str = "photo.jpg";
pub const DEFAULT_SUBTYPE: &str = "jpeg";
/// Extensions offered by the picker and recognised when inferring a content type.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "heic", "heif", "tif", "tiff",
];

#[derive(Debug, Error)]
pub enum ImageRefError {
    #[error("empty image reference")]
    Empty,
    #[error("data URI is missing its base64 payload")]
    MissingPayload,
    #[error("data URI payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("permission denied reading {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An image selected by the user, either on disk or inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    File(FileImageRef),
    DataUri(DataUriImageRef),
}

impl ImageRef {
    /// Interprets whatever the picker (or the command line) handed us.
    pub fn parse(raw: &str) -> Result<Self, ImageRefError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ImageRefError::Empty);
        }
        if raw.starts_with("data:") {
            return DataUriImageRef::parse(raw).map(ImageRef::DataUri);
        }
        Ok(ImageRef::File(FileImageRef::from_uri(raw)))
    }

    pub fn file_name(&self) -> String {
        match self {
            ImageRef::File(file) => file.file_name(),
            ImageRef::DataUri(_) => DEFAULT_FILE_NAME.to_string(),
        }
    }

    pub fn content_type(&self) -> String {
        match self {
            ImageRef::File(file) => file.content_type(),
            ImageRef::DataUri(data) => data.content_type(),
        }
    }

    /// Materialises the bytes for the multipart body. File references are read here.
    pub fn to_upload(&self) -> Result<UploadImage, ImageRefError> {
        match self {
            ImageRef::File(file) => Ok(UploadImage {
                bytes: file.read()?,
                file_name: file.file_name(),
                content_type: file.content_type(),
            }),
            ImageRef::DataUri(data) => Ok(UploadImage {
                bytes: data.bytes().to_vec(),
                file_name: DEFAULT_FILE_NAME.to_string(),
                content_type: data.content_type(),
            }),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::File(file) => write!(f, "{}", file.path().display()),
            ImageRef::DataUri(data) => write!(
                f,
                "data:image/{};base64,… ({} bytes)",
                data.subtype(),
                data.bytes().len()
            ),
        }
    }
}

impl From<PathBuf> for ImageRef {
    fn from(path: PathBuf) -> Self {
        ImageRef::File(FileImageRef::new(path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileImageRef {
    path: PathBuf,
}

impl FileImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Accepts plain paths as well as `file://` URIs.
    pub fn from_uri(uri: &str) -> Self {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string()
    }

    pub fn content_type(&self) -> String {
        let subtype = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(subtype_for_extension)
            .unwrap_or(DEFAULT_SUBTYPE);
        format!("image/{subtype}")
    }

    fn read(&self) -> Result<Vec<u8>, ImageRefError> {
        std::fs::read(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::PermissionDenied => ImageRefError::PermissionDenied(self.path.clone()),
            _ => ImageRefError::Unreadable {
                path: self.path.clone(),
                source,
            },
        })
    }

    /// Opens the file without reading it, so the picker can reject it early.
    pub fn check_readable(&self) -> Result<(), ImageRefError> {
        std::fs::File::open(&self.path)
            .map(|_| ())
            .map_err(|source| match source.kind() {
                io::ErrorKind::PermissionDenied => {
                    ImageRefError::PermissionDenied(self.path.clone())
                }
                _ => ImageRefError::Unreadable {
                    path: self.path.clone(),
                    source,
                },
            })
    }
}

fn subtype_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("jpeg"),
        "png" => Some("png"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        "bmp" => Some("bmp"),
        "heic" => Some("heic"),
        "heif" => Some("heif"),
        "tif" | "tiff" => Some("tiff"),
        _ => None,
    }
}

/// `data:image/<subtype>;base64,<payload>`, decoded once at parse time.
#[derive(Clone, PartialEq, Eq)]
pub struct DataUriImageRef {
    subtype: String,
    payload: String,
    bytes: Vec<u8>,
}

impl fmt::Debug for DataUriImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataUriImageRef")
            .field("subtype", &self.subtype)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl DataUriImageRef {
    pub fn parse(uri: &str) -> Result<Self, ImageRefError> {
        let (header, payload) = uri
            .split_once(',')
            .ok_or(ImageRefError::MissingPayload)?;
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(ImageRefError::MissingPayload);
        }
        let bytes = BASE64.decode(payload)?;
        Ok(Self {
            subtype: parse_subtype(header).unwrap_or(DEFAULT_SUBTYPE).to_string(),
            payload: payload.to_string(),
            bytes,
        })
    }

    /// Builds a data URI from raw bytes, as a camera or clipboard source would.
    pub fn from_bytes(subtype: &str, bytes: Vec<u8>) -> Self {
        let subtype = Some(subtype.trim())
            .filter(|subtype| is_valid_subtype(subtype))
            .unwrap_or(DEFAULT_SUBTYPE);
        Self {
            subtype: subtype.to_ascii_lowercase(),
            payload: BASE64.encode(&bytes),
            bytes,
        }
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn content_type(&self) -> String {
        format!("image/{}", self.subtype)
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_uri(&self) -> String {
        format!("data:image/{};base64,{}", self.subtype, self.payload)
    }
}

// `data:image/png;base64` -> `png`
fn parse_subtype(header: &str) -> Option<&str> {
    let media = header.strip_prefix("data:")?;
    let media = media.split(';').next()?;
    let subtype = media.strip_prefix("image/")?.trim();
    is_valid_subtype(subtype).then_some(subtype)
}

fn is_valid_subtype(subtype: &str) -> bool {
    !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// One multipart field worth of image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl UploadImage {
    /// Pixel dimensions if the bytes carry a format the decoder understands.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        image::ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}
