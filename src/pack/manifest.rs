use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pack::{id, Pack};

pub const MANIFEST_PATH: &str = "manifest.json";
pub const FORMAT_VERSION: u32 = 2;
pub const PACK_VERSION: [u32; 3] = [1, 0, 0];
pub const MODULE_TYPE: &str = "skin_pack";

/// Top level descriptor of the pack. Field order is kept as the game client writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    pub header: ManifestHeader,
    pub modules: Vec<ManifestModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub name: String,
    pub version: [u32; 3],
    pub uuid: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestModule {
    pub version: [u32; 3],
    pub r#type: String,
    pub uuid: Uuid,
}

impl Manifest {
    pub fn new(pack: &Pack) -> Self {
        Manifest {
            format_version: FORMAT_VERSION,
            header: ManifestHeader {
                name: pack.name.clone(),
                version: PACK_VERSION,
                uuid: id::generate(),
            },
            modules: vec![ManifestModule {
                version: PACK_VERSION,
                r#type: MODULE_TYPE.to_string(),
                uuid: id::generate(),
            }],
        }
    }
}
