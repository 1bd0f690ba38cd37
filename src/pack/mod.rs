use std::io::Read;

use serde::{Deserialize, Serialize};

pub use archive::{assemble, Mcpack};
pub use error::PackError;

pub mod archive;
pub mod error;
pub mod id;
pub mod manifest;
pub mod skins;
pub mod texts;

/// Extension of the archive consumed by the game client.
pub const MCPACK_EXTENSION: &str = "mcpack";

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub lang: String,
    pub text: String,
}

/// Anything that has an id and a set of localized display names.
pub trait Translatable {
    fn id(&self) -> &str;

    fn translations(&self) -> &[Translation];
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub id: String,
    pub name: String,
    pub translations: Vec<Translation>,
}

impl Translatable for Pack {
    fn id(&self) -> &str {
        &self.id
    }

    fn translations(&self) -> &[Translation] {
        &self.translations
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    pub id: String,
    pub translations: Vec<Translation>,
    /// Base64 encoded png.
    pub image: String,
}

impl Skin {
    /// Path of the skin's texture inside the archive.
    pub fn texture(&self) -> String {
        format!("{}.png", self.id)
    }
}

impl Translatable for Skin {
    fn id(&self) -> &str {
        &self.id
    }

    fn translations(&self) -> &[Translation] {
        &self.translations
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "skinpack")]
    pub pack: Pack,
    pub skins: Vec<Skin>,
}

impl Request {
    pub fn from_json(json: &str) -> Result<Self, PackError> {
        serde_json::from_str(json).map_err(PackError::MalformedInput)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PackError> {
        serde_json::from_reader(reader).map_err(PackError::MalformedInput)
    }

    pub fn assemble(&self) -> Result<Mcpack, PackError> {
        assemble(&self.pack, &self.skins)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub name: String,
    /// Base64 encoded archive.
    pub content: String,
}

impl From<&Mcpack> for Response {
    fn from(pack: &Mcpack) -> Self {
        Response {
            name: pack.name.clone(),
            content: pack.to_base64(),
        }
    }
}
