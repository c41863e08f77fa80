//! Маршрутизация по pathname без табличного шелла: адрес страницы
//! однозначно определяет список или форму сущности, кнопки
//! назад/вперёд браузера работают через popstate.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;

/// Страница приложения, разобранная из pathname
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    CompanyList,
    CompanyDetails(Option<String>),
    AppUserList,
    AppUserDetails(Option<String>),
    ToolList,
    ToolDetails(Option<String>),
    RentalAgreementList,
    RentalAgreementDetails(Option<String>),
    NotFound,
}

/// Разбор pathname. Сегмент "new" на месте id означает форму создания.
pub fn parse_path(path: &str) -> Page {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => Page::RentalAgreementList,
        ["companies"] => Page::CompanyList,
        ["companies", id] => Page::CompanyDetails(id_segment(id)),
        ["users"] => Page::AppUserList,
        ["users", id] => Page::AppUserDetails(id_segment(id)),
        ["tools"] => Page::ToolList,
        ["tools", id] => Page::ToolDetails(id_segment(id)),
        ["rental-agreements"] => Page::RentalAgreementList,
        ["rental-agreements", id] => Page::RentalAgreementDetails(id_segment(id)),
        _ => Page::NotFound,
    }
}

fn id_segment(segment: &str) -> Option<String> {
    if segment == "new" {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Сервис маршрутизации, раздается через context в корне приложения
#[derive(Clone, Copy)]
pub struct RouteService {
    pub path: RwSignal<String>,
}

impl RouteService {
    pub fn new() -> Self {
        let path = RwSignal::new(
            window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_string()),
        );

        // Назад/вперёд браузера
        if let Some(win) = window() {
            let on_popstate = Closure::<dyn FnMut()>::new(move || {
                if let Some(w) = window() {
                    if let Ok(p) = w.location().pathname() {
                        path.set(p);
                    }
                }
            });
            let _ = win
                .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
            on_popstate.forget();
        }

        Self { path }
    }

    pub fn navigate(&self, to: &str) {
        if let Some(w) = window() {
            if let Ok(history) = w.history() {
                let _ =
                    history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(to));
            }
        }
        self.path.set(to.to_string());
    }
}

impl Default for RouteService {
    fn default() -> Self {
        Self::new()
    }
}

/// Хук доступа к сервису маршрутизации
pub fn use_router() -> RouteService {
    use_context::<RouteService>().expect("RouteService not found in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_falls_back_to_agreements() {
        assert_eq!(parse_path("/"), Page::RentalAgreementList);
    }

    #[test]
    fn list_and_details_paths() {
        assert_eq!(parse_path("/tools"), Page::ToolList);
        assert_eq!(
            parse_path("/tools/42"),
            Page::ToolDetails(Some("42".to_string()))
        );
        assert_eq!(parse_path("/tools/new"), Page::ToolDetails(None));
        assert_eq!(
            parse_path("/rental-agreements/abc"),
            Page::RentalAgreementDetails(Some("abc".to_string()))
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(parse_path("/nomenclature"), Page::NotFound);
        assert_eq!(parse_path("/tools/1/extra"), Page::NotFound);
    }
}
