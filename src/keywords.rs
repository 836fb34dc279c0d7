use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_KEYWORDS_FILE: &str = "data/phishing_keywords.json";

/// Built-in category weights. Categories missing from this table weigh 1.
const CATEGORY_WEIGHTS: &[(&str, u32)] = &[
    ("urgentes", 2),
    ("amenazas", 3),
    ("dinero", 2),
    ("personales", 3),
    ("sospechosas", 1),
];

const DEFAULT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "urgentes",
        &[
            "urgente",
            "inmediatamente",
            "ahora mismo",
            "expire hoy",
            "última oportunidad",
            "tiempo limitado",
            "actúa ahora",
            "vence pronto",
            "solo por hoy",
            "oferta limitada",
        ],
    ),
    (
        "amenazas",
        &[
            "suspender",
            "bloquear",
            "cerrar cuenta",
            "eliminar",
            "cancelar",
            "desactivar",
            "penalización",
            "multa",
            "consecuencias legales",
            "demanda",
            "investigación",
        ],
    ),
    (
        "dinero",
        &[
            "premio",
            "ganador",
            "millones",
            "transferencia",
            "banco",
            "dinero gratis",
            "inversión garantizada",
            "lotería",
            "herencia",
            "reembolso",
            "compensación",
            "beneficio",
        ],
    ),
    (
        "personales",
        &[
            "verificar",
            "actualizar datos",
            "confirmar",
            "validar",
            "información personal",
            "datos bancarios",
            "contraseña",
            "número de cuenta",
            "tarjeta de crédito",
            "pin",
            "cvv",
        ],
    ),
    (
        "sospechosas",
        &[
            "hacer clic aquí",
            "enlace",
            "descarga inmediata",
            "adjunto importante",
            "no responder",
            "reenviar",
            "confidencial",
            "secreto",
            "oportunidad única",
        ],
    ),
];

pub fn default_weight(category: &str) -> u32 {
    CATEGORY_WEIGHTS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, weight)| *weight)
        .unwrap_or(1)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
    pub weight: u32,
}

impl KeywordCategory {
    /// Weight is clamped to at least 1.
    pub fn new(name: impl Into<String>, keywords: Vec<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            keywords,
            weight: weight.max(1),
        }
    }

    fn contains_ignore_case(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.keywords.iter().any(|k| k.to_lowercase() == needle)
    }
}

/// Ordered category records. Iteration order is insertion order, which is
/// also the order matches are reported in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordStore {
    categories: Vec<KeywordCategory>,
}

impl KeywordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let categories = DEFAULT_KEYWORDS
            .iter()
            .map(|(name, words)| {
                KeywordCategory::new(
                    *name,
                    words.iter().map(|w| w.to_string()).collect(),
                    default_weight(name),
                )
            })
            .collect();

        Self { categories }
    }

    /// Builds a store from (category, keywords) pairs, taking weights from
    /// the built-in table. A repeated category identifier merges into the
    /// first occurrence.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut store = Self::new();
        for (name, keywords) in pairs {
            match store.category_mut(&name) {
                Some(existing) => existing.keywords.extend(keywords),
                None => {
                    let weight = default_weight(&name);
                    store
                        .categories
                        .push(KeywordCategory::new(name, keywords, weight));
                }
            }
        }
        store
    }

    pub fn categories(&self) -> &[KeywordCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&KeywordCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    fn category_mut(&mut self, name: &str) -> Option<&mut KeywordCategory> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    pub fn keywords_by_category(&self, name: &str) -> &[String] {
        self.category(name)
            .map(|c| c.keywords.as_slice())
            .unwrap_or(&[])
    }

    pub fn weight(&self, name: &str) -> u32 {
        self.category(name).map(|c| c.weight).unwrap_or(1)
    }

    /// Adds the lowercased keyword, creating the category if needed.
    /// Returns false when the keyword is already present.
    pub fn add(&mut self, category: &str, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();

        if self.category(category).is_none() {
            self.categories.push(KeywordCategory::new(
                category,
                Vec::new(),
                default_weight(category),
            ));
        }

        match self.category_mut(category) {
            Some(existing) if !existing.contains_ignore_case(&keyword) => {
                existing.keywords.push(keyword);
                true
            }
            _ => false,
        }
    }

    /// Removes the lowercased keyword. Returns false when the category or
    /// keyword is absent.
    pub fn remove(&mut self, category: &str, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        let Some(existing) = self.category_mut(category) else {
            return false;
        };

        match existing.keywords.iter().position(|k| *k == keyword) {
            Some(index) => {
                existing.keywords.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }

    fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.categories
            .iter()
            .map(|c| (c.name.clone(), serde_json::json!(c.keywords)))
            .collect()
    }
}

/// JSON file holding `{category: [keyword, ...]}`.
#[derive(Debug, Clone)]
pub struct KeywordRepository {
    path: PathBuf,
}

impl Default for KeywordRepository {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS_FILE)
    }
}

impl KeywordRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<KeywordStore, PersistenceError> {
        if !self.path.exists() {
            return Err(PersistenceError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
            .map_err(|source| PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let mut pairs = Vec::with_capacity(map.len());
        for (name, value) in map {
            let keywords: Vec<String> =
                serde_json::from_value(value).map_err(|source| PersistenceError::Corrupt {
                    path: self.path.clone(),
                    source,
                })?;
            pairs.push((name, keywords));
        }

        let store = KeywordStore::from_pairs(pairs);
        log::info!(
            "Loaded {} keywords in {} categories from {}",
            store.keyword_count(),
            store.categories().len(),
            self.path.display()
        );
        Ok(store)
    }

    /// Loads the persisted store, falling back to the built-in defaults.
    /// A missing file is expected; an unreadable or corrupt one is logged
    /// as a warning.
    pub fn load_or_default(&self) -> KeywordStore {
        match self.load() {
            Ok(store) => store,
            Err(e) if e.is_not_found() => {
                log::info!(
                    "No keyword file at {}, using built-in defaults",
                    self.path.display()
                );
                KeywordStore::with_defaults()
            }
            Err(e) => {
                log::warn!("Failed to load keywords, using built-in defaults: {e}");
                KeywordStore::with_defaults()
            }
        }
    }

    pub fn save(&self, store: &KeywordStore) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&store.to_json_map())
            .map_err(PersistenceError::Serialize)?;

        fs::write(&self.path, content).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!("Saved keywords to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories_and_weights() {
        let store = KeywordStore::with_defaults();
        let summary: Vec<(&str, usize, u32)> = store
            .categories()
            .iter()
            .map(|c| (c.name.as_str(), c.keywords.len(), c.weight))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("urgentes", 10, 2),
                ("amenazas", 11, 3),
                ("dinero", 12, 2),
                ("personales", 11, 3),
                ("sospechosas", 9, 1),
            ]
        );
        assert_eq!(store.keyword_count(), 53);
    }

    #[test]
    fn test_unknown_category_lookups() {
        let store = KeywordStore::with_defaults();
        assert_eq!(store.weight("inexistente"), 1);
        assert!(store.keywords_by_category("inexistente").is_empty());
        assert!(store.keywords_by_category("dinero").contains(&"premio".to_string()));
    }

    #[test]
    fn test_add_is_case_insensitive_and_creates_category() {
        let mut store = KeywordStore::with_defaults();

        assert!(!store.add("urgentes", "URGENTE"));
        assert!(store.add("urgentes", "Plazo Final"));
        assert_eq!(store.keywords_by_category("urgentes").last().unwrap(), "plazo final");

        assert!(store.add("nuevas", "Regalo"));
        let created = store.category("nuevas").unwrap();
        assert_eq!(created.weight, 1);
        assert_eq!(created.keywords, vec!["regalo".to_string()]);
        assert_eq!(store.categories().last().unwrap().name, "nuevas");
    }

    #[test]
    fn test_remove() {
        let mut store = KeywordStore::with_defaults();
        assert!(store.remove("personales", "PIN"));
        assert!(!store.remove("personales", "pin"));
        assert!(!store.remove("inexistente", "pin"));
        assert_eq!(store.keywords_by_category("personales").len(), 10);
    }

    #[test]
    fn test_weight_never_below_one() {
        let category = KeywordCategory::new("cero", vec![], 0);
        assert_eq!(category.weight, 1);
    }

    #[test]
    fn test_from_pairs_merges_duplicates() {
        let store = KeywordStore::from_pairs(vec![
            ("amenazas".to_string(), vec!["multa".to_string()]),
            ("extra".to_string(), vec!["x".to_string()]),
            ("amenazas".to_string(), vec!["demanda".to_string()]),
        ]);
        assert_eq!(store.categories().len(), 2);
        assert_eq!(store.weight("amenazas"), 3);
        assert_eq!(store.keywords_by_category("amenazas"), ["multa", "demanda"]);
    }

    #[test]
    fn test_save_and_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let repository = KeywordRepository::new(dir.path().join("nested/keywords.json"));

        let mut store = KeywordStore::with_defaults();
        store.add("zeta", "último");
        repository.save(&store).unwrap();

        let content = fs::read_to_string(repository.path()).unwrap();
        assert!(content.contains("último"));

        let loaded = repository.load().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repository = KeywordRepository::new(dir.path().join("absent.json"));

        assert!(repository.load().unwrap_err().is_not_found());
        assert_eq!(repository.load_or_default(), KeywordStore::with_defaults());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.json");
        fs::write(&path, "{\"urgentes\": 42}").unwrap();
        let repository = KeywordRepository::new(&path);

        let err = repository.load().unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));
        assert_eq!(repository.load_or_default(), KeywordStore::with_defaults());
    }
}
