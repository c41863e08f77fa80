//! Общие контракты между frontend и backend: агрегаты, DTO, валидация,
//! модель доступа и системные типы аутентификации.

pub mod domain;
pub mod shared;
pub mod system;
