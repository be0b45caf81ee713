/// Raw icon image as served by the upstream host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaviconAsset {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl FaviconAsset {
    pub fn new(bytes: Vec<u8>, content_type: String) -> Self {
        Self {
            bytes,
            content_type,
        }
    }
}
