use indexmap::IndexMap;

use crate::pack::{Pack, Skin, Translatable};

pub const TEXTS_DIR: &str = "texts";
pub const LANG_EXTENSION: &str = "lang";

const PACK_KEY_PREFIX: &str = "skinpack";
const SKIN_KEY_PREFIX: &str = "skin";

/// Localized names of the pack and its skins, one flat key/value table per language.
///
/// ```text
/// skinpack.<pack id>=<pack name>
/// skin.<pack id>.<skin id>=<skin name>
/// ```
///
/// Languages and keys keep the order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texts {
    pack_id: String,
    langs: IndexMap<String, IndexMap<String, String>>,
}

impl Texts {
    pub fn new(pack: &Pack) -> Self {
        let mut texts = Texts {
            pack_id: pack.id.clone(),
            langs: IndexMap::new(),
        };
        texts.fold(pack, PACK_KEY_PREFIX);
        texts
    }

    pub fn add(&mut self, skin: &Skin) {
        let prefix = format!("{}.{}", SKIN_KEY_PREFIX, self.pack_id);
        self.fold(skin, &prefix);
    }

    /// Duplicate keys are overwritten in place.
    fn fold<T: Translatable>(&mut self, item: &T, prefix: &str) {
        for translation in item.translations() {
            self.langs
                .entry(translation.lang.clone())
                .or_default()
                .insert(format!("{}.{}", prefix, item.id()), translation.text.clone());
        }
    }

    pub fn langs(&self) -> impl Iterator<Item = &str> {
        self.langs.keys().map(String::as_str)
    }

    /// Renders every language table as `(archive path, file body)`.
    pub fn render(&self) -> Vec<(String, String)> {
        self.langs
            .iter()
            .map(|(lang, entries)| (lang_path(lang), render_lang(entries)))
            .collect()
    }
}

pub fn lang_path(lang: &str) -> String {
    format!("{}/{}.{}", TEXTS_DIR, lang, LANG_EXTENSION)
}

fn render_lang(entries: &IndexMap<String, String>) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}
