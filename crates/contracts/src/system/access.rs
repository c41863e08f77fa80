//! Модель доступа: роли, операции и таблица прав.
//!
//! `has_access` возвращает чистый bool: false означает "скрыть/отключить
//! элемент UI" либо 403 на сервере, но никогда не ошибку. Для рендера
//! страниц набор видимых действий считается один раз за проход рендера
//! через `visible_actions` и передается по дереву компонентов явно.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// CRUD-операция над сущностью
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessOperation {
    Create,
    Read,
    Update,
    Delete,
}

impl AccessOperation {
    pub const ALL: [AccessOperation; 4] = [
        AccessOperation::Create,
        AccessOperation::Read,
        AccessOperation::Update,
        AccessOperation::Delete,
    ];
}

/// Роль системного пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Полный доступ ко всем сущностям
    Admin,
    /// Ведёт инструменты и договоры, справочники только читает
    Manager,
    /// Только чтение
    Viewer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "viewer" => Ok(UserRole::Viewer),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Проверка права роли на операцию над сущностью.
///
/// Имя сущности каноническое ("tool", "rental_agreement", ...), как после
/// `convert_route_to_entity`. Неизвестная сущность не даёт прав никому,
/// кроме администратора.
pub fn has_access(role: UserRole, entity: &str, operation: AccessOperation) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::Manager => match entity {
            "tool" | "rental_agreement" => true,
            "company" | "user" => operation == AccessOperation::Read,
            _ => false,
        },
        UserRole::Viewer => matches!(entity, "tool" | "rental_agreement" | "company" | "user")
            && operation == AccessOperation::Read,
    }
}

/// Набор действий, доступных роли над сущностью.
///
/// Считается один раз за проход рендера и передаётся компонентам явно,
/// вместо точечных вызовов has_access по месту.
pub fn visible_actions(role: UserRole, entity: &str) -> BTreeSet<AccessOperation> {
    AccessOperation::ALL
        .into_iter()
        .filter(|op| has_access(role, entity, *op))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_everything() {
        for entity in ["company", "user", "tool", "rental_agreement", "unknown"] {
            for op in AccessOperation::ALL {
                assert!(has_access(UserRole::Admin, entity, op));
            }
        }
    }

    #[test]
    fn manager_reads_directories_but_edits_rentals() {
        assert!(has_access(
            UserRole::Manager,
            "rental_agreement",
            AccessOperation::Delete
        ));
        assert!(has_access(UserRole::Manager, "tool", AccessOperation::Create));
        assert!(has_access(UserRole::Manager, "company", AccessOperation::Read));
        assert!(!has_access(
            UserRole::Manager,
            "company",
            AccessOperation::Update
        ));
        assert!(!has_access(UserRole::Manager, "user", AccessOperation::Delete));
        assert!(!has_access(UserRole::Manager, "unknown", AccessOperation::Read));
    }

    #[test]
    fn viewer_is_read_only() {
        for entity in ["company", "user", "tool", "rental_agreement"] {
            assert!(has_access(UserRole::Viewer, entity, AccessOperation::Read));
            assert!(!has_access(UserRole::Viewer, entity, AccessOperation::Create));
            assert!(!has_access(UserRole::Viewer, entity, AccessOperation::Update));
            assert!(!has_access(UserRole::Viewer, entity, AccessOperation::Delete));
        }
    }

    #[test]
    fn visible_actions_mirrors_has_access() {
        let actions = visible_actions(UserRole::Manager, "company");
        assert_eq!(actions.len(), 1);
        assert!(actions.contains(&AccessOperation::Read));

        let actions = visible_actions(UserRole::Admin, "tool");
        assert_eq!(actions.len(), 4);

        for op in AccessOperation::ALL {
            assert_eq!(
                visible_actions(UserRole::Viewer, "tool").contains(&op),
                has_access(UserRole::Viewer, "tool", op)
            );
        }
    }
}
