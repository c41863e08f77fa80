/// Трейт для корня агрегата
///
/// Связывает агрегат с его идентификатором и каноническими именами:
/// `entity_name` используется таблицей прав и ключами кэша выборок,
/// `route_segment` — сегментом `/api/<segment>` и маршрутами страниц.
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id;

    /// Получить ID записи
    fn id(&self) -> Self::Id;

    /// Каноническое имя сущности (например, "rental_agreement")
    fn entity_name() -> &'static str;

    /// Сегмент URL-маршрута списка (например, "rental-agreements")
    fn route_segment() -> &'static str;
}
