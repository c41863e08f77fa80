//! Соответствие сегментов URL каноническим именам сущностей.
//!
//! Используется серверным middleware контроля доступа: входящий сегмент
//! пути (`/api/<segment>/...`) переводится в имя сущности, по которому
//! ищутся права.

/// Таблица: сегмент маршрута (множественное число) -> имя сущности
const ROUTE_TO_ENTITY: &[(&str, &str)] = &[
    ("companies", "company"),
    ("rental-agreements", "rental_agreement"),
    ("tools", "tool"),
    ("users", "user"),
];

/// Перевести сегмент маршрута в каноническое имя сущности.
///
/// Тотальная чистая функция: для сегментов вне таблицы возвращает
/// вход без изменений (identity fallback), ошибок не бывает.
pub fn convert_route_to_entity(route: &str) -> String {
    ROUTE_TO_ENTITY
        .iter()
        .find(|(segment, _)| *segment == route)
        .map(|(_, entity)| entity.to_string())
        .unwrap_or_else(|| route.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_segments_translate() {
        assert_eq!(convert_route_to_entity("companies"), "company");
        assert_eq!(
            convert_route_to_entity("rental-agreements"),
            "rental_agreement"
        );
        assert_eq!(convert_route_to_entity("tools"), "tool");
        assert_eq!(convert_route_to_entity("users"), "user");
    }

    #[test]
    fn unmapped_segments_pass_through_unchanged() {
        for input in ["", "unknown", "tool", "rental_agreement", "Companies"] {
            assert_eq!(convert_route_to_entity(input), input);
        }
    }

    #[test]
    fn table_agrees_with_aggregate_statics() {
        use crate::domain::a001_company::aggregate::Company;
        use crate::domain::a002_app_user::aggregate::AppUser;
        use crate::domain::a003_tool::aggregate::Tool;
        use crate::domain::a004_rental_agreement::aggregate::RentalAgreement;
        use crate::domain::common::AggregateRoot;

        fn check<A: AggregateRoot>() {
            assert_eq!(
                convert_route_to_entity(A::route_segment()),
                A::entity_name()
            );
        }

        check::<Company>();
        check::<AppUser>();
        check::<Tool>();
        check::<RentalAgreement>();
    }
}
