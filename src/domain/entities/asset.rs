use std::path::Path;

use actix_multipart::form::{bytes::Bytes as MpBytes, MultipartForm};
use rand::{Rng, distributions::Uniform};
use serde::Serialize;

/// Fixed object key of the resume so its public URL never changes.
pub const RESUME_PATH: &str = "resume.pdf";
pub const PROJECT_IMAGE_PREFIX: &str = "projects";

const RANDOM_NAME_LENGTH: usize = 11;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The two kinds of binary asset the admin can upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    ProjectImage,
    Resume,
}

impl AssetKind {
    /// Whether an upload may replace an existing object at the same path.
    pub fn upsert(&self) -> bool {
        matches!(self, AssetKind::Resume)
    }

    /// Object key for a newly selected file.
    ///
    /// Project images get a random name with the original extension kept;
    /// the resume always lands on [`RESUME_PATH`].
    pub fn destination(&self, original_name: &str) -> String {
        match self {
            AssetKind::Resume => RESUME_PATH.to_string(),
            AssetKind::ProjectImage => {
                let name = random_name(&mut rand::thread_rng());
                match file_extension(original_name) {
                    Some(ext) => format!("{PROJECT_IMAGE_PREFIX}/{name}.{ext}"),
                    None => format!("{PROJECT_IMAGE_PREFIX}/{name}"),
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::ProjectImage => "image",
            AssetKind::Resume => "resume",
        }
    }
}

/// A stored object and the public URL it is served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedAsset {
    pub path: String,
    pub public_url: String,
}

/// A file picked by the admin, read fully into memory.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl From<MpBytes> for SelectedFile {
    fn from(upload: MpBytes) -> Self {
        SelectedFile {
            file_name: upload.file_name.unwrap_or_default(),
            content_type: upload.content_type.map(|mime| mime.to_string()).unwrap_or_default(),
            bytes: upload.data.to_vec(),
        }
    }
}

/// Multipart body of the image and resume upload endpoints.
#[derive(Debug, MultipartForm)]
pub struct AssetUpload {
    #[multipart(rename = "file", limit = "10MB")]
    pub file: MpBytes,
}

pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_lowercase())
}

fn random_name<R: Rng>(rng: &mut R) -> String {
    let dist = Uniform::from(0..BASE36.len());
    (0..RANDOM_NAME_LENGTH)
        .map(|_| BASE36[rng.sample(dist)] as char)
        .collect()
}
