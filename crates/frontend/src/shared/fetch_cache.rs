//! Явный кэш выборок вместо неявного кэша fetch-слоя.
//!
//! Ключ — (сущность, id записи, набор relations). Страницы кладут сюда
//! результаты GET-запросов и читают их при повторном открытии; любая
//! мутация (create/update/delete) явно инвалидирует все ключи сущности.

use std::collections::HashMap;

use leptos::prelude::*;
use serde::{de::DeserializeOwned, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    entity: String,
    id: Option<String>,
    relations: Vec<String>,
}

impl CacheKey {
    /// Ключ списка сущности
    pub fn list(entity: &str, relations: &[&str]) -> Self {
        Self::build(entity, None, relations)
    }

    /// Ключ отдельной записи
    pub fn record(entity: &str, id: &str, relations: &[&str]) -> Self {
        Self::build(entity, Some(id.to_string()), relations)
    }

    fn build(entity: &str, id: Option<String>, relations: &[&str]) -> Self {
        let mut relations: Vec<String> = relations.iter().map(|r| r.to_string()).collect();
        relations.sort();
        relations.dedup();
        Self {
            entity: entity.to_string(),
            id,
            relations,
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }
}

/// Хранилище без реактивности, значения — сериализованный JSON
#[derive(Clone, Debug, Default)]
pub struct CacheStore {
    entries: HashMap<CacheKey, String>,
}

impl CacheStore {
    pub fn put(&mut self, key: CacheKey, json: String) {
        self.entries.insert(key, json);
    }

    pub fn get(&self, key: &CacheKey) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Снять все ключи сущности: и списки, и записи, с любыми relations
    pub fn invalidate_entity(&mut self, entity: &str) {
        self.entries.retain(|key, _| key.entity != entity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Сервис кэша, раздается через context в корне приложения
#[derive(Clone, Copy)]
pub struct FetchCache {
    store: RwSignal<CacheStore>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self {
            store: RwSignal::new(CacheStore::default()),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        self.store
            .with_untracked(|s| s.get(key).and_then(|json| serde_json::from_str(json).ok()))
    }

    pub fn put<T: Serialize>(&self, key: CacheKey, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            self.store.update_untracked(|s| s.put(key, json));
        }
    }

    pub fn invalidate_entity(&self, entity: &str) {
        self.store.update_untracked(|s| s.invalidate_entity(entity));
    }
}

impl Default for FetchCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Хук доступа к кэшу
pub fn use_fetch_cache() -> FetchCache {
    use_context::<FetchCache>().expect("FetchCache not found in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relations_order_does_not_change_the_key() {
        let a = CacheKey::list("rental_agreement", &["tool", "user"]);
        let b = CacheKey::list("rental_agreement", &["user", "tool", "user"]);
        assert_eq!(a, b);
    }

    #[test]
    fn record_and_list_keys_are_distinct() {
        let list = CacheKey::list("tool", &[]);
        let record = CacheKey::record("tool", "42", &[]);
        assert_ne!(list, record);
    }

    #[test]
    fn invalidation_removes_all_entity_keys() {
        let mut store = CacheStore::default();
        store.put(CacheKey::list("tool", &[]), "[]".to_string());
        store.put(CacheKey::record("tool", "1", &["company"]), "{}".to_string());
        store.put(CacheKey::list("company", &[]), "[]".to_string());

        store.invalidate_entity("tool");

        assert_eq!(store.len(), 1);
        assert!(store.get(&CacheKey::list("company", &[])).is_some());
        assert!(store.get(&CacheKey::list("tool", &[])).is_none());
    }
}
