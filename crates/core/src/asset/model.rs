use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Logo,
    Cover,
}

impl ImageKind {
    pub const ALL: [ImageKind; 2] = [ImageKind::Logo, ImageKind::Cover];

    /// File name looked up in the assets directory
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Logo => "logo.jpeg",
            Self::Cover => "cover.jpeg",
        }
    }
}

/// Image stored as base64 data for an organisation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub id: String,
    pub organisation_id: String,
    pub kind: ImageKind,
    pub content_type: String,
    pub data: String,
}
