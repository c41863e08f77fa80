//! Видимость основных блоков страниц во время загрузки.
//!
//! Страница списка показывает индикатор вместо таблицы, пока выборка
//! не завершена; форма редактирования скрыта, пока запись грузится, и
//! не показывается вовсе, если загрузка завершилась ошибкой.

/// Таблица списка видима только когда выборка завершена
pub fn table_visible(is_loading: bool) -> bool {
    !is_loading
}

/// Форма и кнопки сохранения видимы после успешной загрузки записи
pub fn form_visible(is_loading: bool, load_failed: bool) -> bool {
    !is_loading && !load_failed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_swaps_for_indicator_while_loading() {
        assert!(!table_visible(true));
        assert!(table_visible(false));
    }

    #[test]
    fn form_is_hidden_while_record_loads() {
        assert!(!form_visible(true, false));
        assert!(form_visible(false, false));
    }

    #[test]
    fn form_stays_hidden_after_load_failure() {
        assert!(!form_visible(false, true));
        assert!(!form_visible(true, true));
    }
}
