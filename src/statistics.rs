use crate::keywords::KeywordStore;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Per-category keyword counts in store order, plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordStatistics {
    pub categories: Vec<CategoryCount>,
    pub total: usize,
}

impl KeywordStatistics {
    pub fn from_store(store: &KeywordStore) -> Self {
        let categories: Vec<CategoryCount> = store
            .categories()
            .iter()
            .map(|c| CategoryCount {
                category: c.name.clone(),
                count: c.keywords.len(),
            })
            .collect();
        let total = categories.iter().map(|c| c.count).sum();

        Self { categories, total }
    }
}

// Flattened as {category: count, ..., "total": n}
impl Serialize for KeywordStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len() + 1))?;
        for entry in &self.categories {
            map.serialize_entry(&entry.category, &entry.count)?;
        }
        map.serialize_entry("total", &self.total)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_equals_sum_of_counts() {
        let mut store = KeywordStore::with_defaults();
        store.add("extra", "uno");
        store.add("extra", "dos");

        let stats = KeywordStatistics::from_store(&store);
        let sum: usize = stats.categories.iter().map(|c| c.count).sum();

        assert_eq!(stats.total, sum);
        assert_eq!(stats.total, 55);
        assert_eq!(
            stats.categories.last(),
            Some(&CategoryCount {
                category: "extra".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn test_serialized_shape() {
        let stats = KeywordStatistics::from_store(&KeywordStore::with_defaults());
        let json = serde_json::to_string(&stats).unwrap();

        assert_eq!(
            json,
            r#"{"urgentes":10,"amenazas":11,"dinero":12,"personales":11,"sospechosas":9,"total":53}"#
        );
    }

    #[test]
    fn test_empty_store() {
        let stats = KeywordStatistics::from_store(&KeywordStore::new());
        assert!(stats.categories.is_empty());
        assert_eq!(stats.total, 0);
    }
}
