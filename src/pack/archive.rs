use std::io::Cursor;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::{DecodeError, Engine as _};
use indexmap::IndexMap;
use tracing::{debug, info, warn};
use zip::ZipWriter;

use crate::io_ext::ZipWriterExt;
use crate::pack::manifest::{Manifest, MANIFEST_PATH};
use crate::pack::skins::{SkinList, SKINS_PATH};
use crate::pack::texts::Texts;
use crate::pack::{Pack, PackError, Skin, MCPACK_EXTENSION};

/// A finished skin pack archive.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Mcpack {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Mcpack {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Standard alphabet, but leftover bits in the last symbol are ignored.
const IMAGE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decodes an image payload. Line breaks and other whitespace are skipped.
pub fn decode_image(image: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: Vec<u8> = image.bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    IMAGE_ENGINE.decode(compact)
}

pub fn file_name(pack: &Pack) -> String {
    format!("{}.{}", pack.id, MCPACK_EXTENSION)
}

/// Builds the `.mcpack` archive for the pack. Nothing is returned unless every entry was written.
pub fn assemble(pack: &Pack, skins: &[Skin]) -> Result<Mcpack, PackError> {
    info!("Assembling skin pack {} with {} skins", pack.id, skins.len());
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let manifest = Manifest::new(pack);
    zip.write_json_entry(MANIFEST_PATH, &manifest)?;

    let mut skin_list = SkinList::new(pack);
    let mut texts = Texts::new(pack);
    // a repeated skin id keeps its first position and its last image
    let mut images: IndexMap<String, Vec<u8>> = IndexMap::new();

    for skin in skins {
        let image = decode_image(&skin.image).map_err(|source| PackError::Decode {
            skin: skin.id.clone(),
            source,
        })?;
        if images.insert(skin.texture(), image).is_some() {
            warn!("Duplicate skin id: {}, replacing its image", skin.id);
        }

        skin_list.add(skin);
        texts.add(skin);
    }

    for (path, image) in &images {
        debug!("Adding skin image: {} ({} bytes)", path, image.len());
        zip.write_entry(path, image)?;
    }

    zip.write_json_entry(SKINS_PATH, &skin_list)?;

    debug!("Languages: {}", texts.langs().collect::<Vec<_>>().join(", "));
    for (path, body) in texts.render() {
        debug!("Adding texts: {}", path);
        zip.write_entry(&path, body.as_bytes())?;
    }

    let bytes = zip.finish()?.into_inner();
    info!("Assembled {} ({} bytes)", file_name(pack), bytes.len());

    Ok(Mcpack {
        name: file_name(pack),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use serde_json::Value;
    use uuid::Uuid;
    use zip::{CompressionMethod, ZipArchive};

    use crate::pack::Translation;

    use super::*;

    // Not a real png, the archive does not care.
    const IMAGE: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

    fn tr(lang: &str, text: &str) -> Translation {
        Translation {
            lang: lang.to_string(),
            text: text.to_string(),
        }
    }

    fn pack() -> Pack {
        Pack {
            id: "p1".to_string(),
            name: "Pack One".to_string(),
            translations: vec![tr("en_US", "Pack One")],
        }
    }

    fn skin(id: &str, translations: Vec<Translation>) -> Skin {
        Skin {
            id: id.to_string(),
            translations,
            image: STANDARD.encode(IMAGE),
        }
    }

    fn open(pack: &Mcpack) -> ZipArchive<Cursor<Vec<u8>>> {
        ZipArchive::new(Cursor::new(pack.bytes.clone())).unwrap()
    }

    fn read(zip: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
        let mut entry = zip.by_name(name).unwrap();
        let mut out = Vec::new();
        entry.read_to_end(&mut out).unwrap();
        out
    }

    fn read_string(zip: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        String::from_utf8(read(zip, name)).unwrap()
    }

    #[test]
    fn archive_layout() {
        let skins = [skin("steve", vec![tr("en_US", "Steve"), tr("ja_JP", "スティーブ")])];
        let mcpack = assemble(&pack(), &skins).unwrap();
        assert_eq!(mcpack.name, "p1.mcpack");

        let mut zip = open(&mcpack);
        let names: Vec<&str> = zip.file_names().collect();
        assert_eq!(names.len(), 5);
        for name in ["manifest.json", "steve.png", "skins.json", "texts/en_US.lang", "texts/ja_JP.lang"] {
            assert!(names.contains(&name), "missing {}", name);
        }
        for i in 0..zip.len() {
            assert_eq!(zip.by_index(i).unwrap().compression(), CompressionMethod::Deflated);
        }

        assert_eq!(read_string(&mut zip, "texts/en_US.lang"), "skinpack.p1=Pack One\nskin.p1.steve=Steve");
        assert_eq!(read_string(&mut zip, "texts/ja_JP.lang"), "skin.p1.steve=スティーブ");
    }

    #[test]
    fn manifest_round_trip() {
        let mcpack = assemble(&pack(), &[]).unwrap();
        let mut zip = open(&mcpack);
        let manifest = read_string(&mut zip, "manifest.json");
        assert!(manifest.starts_with("{\n    \"format_version\": 2,"));

        let value: Value = serde_json::from_str(&manifest).unwrap();
        let header = Uuid::parse_str(value["header"]["uuid"].as_str().unwrap()).unwrap();
        let module = Uuid::parse_str(value["modules"][0]["uuid"].as_str().unwrap()).unwrap();
        assert_ne!(header, module);

        let manifest: Manifest = serde_json::from_str(&manifest).unwrap();
        assert_eq!(manifest.format_version, 2);
        assert_eq!(manifest.header.name, "Pack One");
        assert_eq!(manifest.header.uuid, header);
        assert_eq!(manifest.modules[0].r#type, "skin_pack");
        assert_eq!(manifest.modules[0].uuid, module);
    }

    #[test]
    fn images_are_stored_verbatim() {
        let mut other = skin("alex", vec![]);
        other.image = STANDARD.encode(b"another image");
        let mcpack = assemble(&pack(), &[skin("steve", vec![]), other]).unwrap();

        let mut zip = open(&mcpack);
        assert_eq!(read(&mut zip, "steve.png"), IMAGE);
        assert_eq!(read(&mut zip, "alex.png"), b"another image");
    }

    #[test]
    fn skins_index() {
        let mcpack = assemble(&pack(), &[skin("steve", vec![]), skin("alex", vec![])]).unwrap();
        let mut zip = open(&mcpack);
        let index: SkinList = serde_json::from_slice(&read(&mut zip, "skins.json")).unwrap();

        assert_eq!(index.serialize_name, "Pack One");
        assert_eq!(index.localization_name, "p1");
        let order: Vec<(&str, &str)> = index
            .skins
            .iter()
            .map(|e| (e.localization_name.as_str(), e.geometry.as_str()))
            .collect();
        assert_eq!(
            order,
            [
                ("steve", "geometry.humanoid.custom"),
                ("steve", "geometry.humanoid.customSlim"),
                ("alex", "geometry.humanoid.custom"),
                ("alex", "geometry.humanoid.customSlim"),
            ]
        );
    }

    #[test]
    fn empty_pack() {
        let mcpack = assemble(&pack(), &[]).unwrap();
        let mut zip = open(&mcpack);
        assert_eq!(zip.len(), 3);

        let index: Value = serde_json::from_slice(&read(&mut zip, "skins.json")).unwrap();
        assert_eq!(index["skins"], serde_json::json!([]));
        assert_eq!(read_string(&mut zip, "texts/en_US.lang"), "skinpack.p1=Pack One");
    }

    #[test]
    fn invalid_image_fails() {
        let mut broken = skin("broken", vec![]);
        broken.image = "this is not base64!".to_string();
        let err = assemble(&pack(), &[skin("steve", vec![]), broken]).unwrap_err();

        assert!(matches!(err, PackError::Decode { ref skin, .. } if skin == "broken"));
        assert!(err.is_client_error());
    }

    #[test]
    fn duplicate_skin_ids_keep_last_image() {
        let mut first = skin("steve", vec![tr("en_US", "Steve")]);
        first.image = STANDARD.encode(b"a");
        let mut second = skin("steve", vec![tr("en_US", "Steve 2")]);
        second.image = STANDARD.encode(b"b");
        let mcpack = assemble(&pack(), &[first, second]).unwrap();

        let mut zip = open(&mcpack);
        assert_eq!(zip.file_names().filter(|n| *n == "steve.png").count(), 1);
        assert_eq!(read(&mut zip, "steve.png"), b"b");
        assert_eq!(read_string(&mut zip, "texts/en_US.lang"), "skinpack.p1=Pack One\nskin.p1.steve=Steve 2");

        let index: SkinList = serde_json::from_slice(&read(&mut zip, "skins.json")).unwrap();
        assert_eq!(index.skins.len(), 4);
    }

    #[test]
    fn decodes_wrapped_payloads() {
        let data: Vec<u8> = (0..100u8).collect();
        let encoded = STANDARD.encode(&data);
        let wrapped = encoded.as_bytes()
            .chunks(76)
            .map(|line| std::str::from_utf8(line).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(wrapped.contains('\n'));

        let mut steve = skin("steve", vec![]);
        steve.image = format!("{}\r\n", wrapped);
        let mcpack = assemble(&pack(), &[steve]).unwrap();
        assert_eq!(read(&mut open(&mcpack), "steve.png"), data);
    }

    #[test]
    fn ignores_trailing_bits() {
        assert_eq!(decode_image("QR==").unwrap(), b"A");
        assert_eq!(decode_image("QQ==").unwrap(), b"A");
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        assert!(decode_image("%%%").is_err());

        let mut broken = skin("broken", vec![]);
        broken.image = "%%%".to_string();
        let err = assemble(&pack(), &[broken]).unwrap_err();
        assert!(matches!(err, PackError::Decode { .. }));
    }

    #[test]
    fn name_depends_only_on_pack_id() {
        assert_eq!(assemble(&pack(), &[]).unwrap().name, "p1.mcpack");
        assert_eq!(assemble(&pack(), &[skin("steve", vec![])]).unwrap().name, "p1.mcpack");
    }

    #[test]
    fn only_manifest_differs_between_runs() {
        let skins = [skin("steve", vec![tr("en_US", "Steve"), tr("ja_JP", "スティーブ")])];
        let mut a = open(&assemble(&pack(), &skins).unwrap());
        let mut b = open(&assemble(&pack(), &skins).unwrap());

        assert_ne!(read(&mut a, "manifest.json"), read(&mut b, "manifest.json"));
        for name in ["skins.json", "steve.png", "texts/en_US.lang", "texts/ja_JP.lang"] {
            assert_eq!(read(&mut a, name), read(&mut b, name), "{} differs", name);
        }
    }

    #[test]
    fn base64_round_trip() {
        let mcpack = assemble(&pack(), &[]).unwrap();
        assert_eq!(STANDARD.decode(mcpack.to_base64()).unwrap(), mcpack.bytes);
    }
}
