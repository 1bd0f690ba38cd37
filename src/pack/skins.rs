use serde::{Deserialize, Serialize};

use crate::pack::{Pack, Skin};

pub const SKINS_PATH: &str = "skins.json";

/// Every skin is registered once per body model, in this order.
pub const GEOMETRY_TYPES: [&str; 2] = [
    "geometry.humanoid.custom",
    "geometry.humanoid.customSlim",
];

pub const SKIN_TYPE: &str = "free";

/// Index of all skins in the pack.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SkinList {
    pub serialize_name: String,
    pub localization_name: String,
    pub skins: Vec<SkinEntry>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SkinEntry {
    pub localization_name: String,
    pub geometry: String,
    pub texture: String,
    pub r#type: String,
}

impl SkinList {
    pub fn new(pack: &Pack) -> Self {
        SkinList {
            serialize_name: pack.name.clone(),
            localization_name: pack.id.clone(),
            skins: Vec::new(),
        }
    }

    /// Appends one entry per geometry type for the skin.
    pub fn add(&mut self, skin: &Skin) {
        for geometry in GEOMETRY_TYPES {
            self.skins.push(SkinEntry {
                localization_name: skin.id.clone(),
                geometry: geometry.to_string(),
                texture: skin.texture(),
                r#type: SKIN_TYPE.to_string(),
            });
        }
    }
}
