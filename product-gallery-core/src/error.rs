use std::fmt;

#[derive(Debug)]
pub enum GalleryError {
    Network(reqwest::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
    Config(String),
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryError::Network(e) => write!(f, "Network error: {}", e),
            GalleryError::Json(e) => write!(f, "JSON parsing error: {}", e),
            GalleryError::Io(e) => write!(f, "IO error: {}", e),
            GalleryError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for GalleryError {}

impl From<reqwest::Error> for GalleryError {
    fn from(err: reqwest::Error) -> Self {
        GalleryError::Network(err)
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::Json(err)
    }
}

impl From<std::io::Error> for GalleryError {
    fn from(err: std::io::Error) -> Self {
        GalleryError::Io(err)
    }
}
