use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Результат валидации: ошибки по полям плюс агрегатный признак валидности.
/// Пустой отчет означает, что запись прошла все проверки.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationReport {
    errors: BTreeMap<String, String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить ошибку поля. Первая ошибка по полю сохраняется,
    /// последующие игнорируются.
    pub fn add(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Ошибка конкретного поля, если есть
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Свернуть отчет в Result для серверных сервисов
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut report = ValidationReport::new();
        report.add("email", "первая");
        report.add("email", "вторая");
        assert_eq!(report.error("email"), Some("первая"));
        assert_eq!(report.len(), 1);
        assert!(!report.is_valid());
    }
}
