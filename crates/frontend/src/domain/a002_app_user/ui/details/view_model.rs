use contracts::domain::a001_company::aggregate::Company;
use contracts::domain::a002_app_user::aggregate::{AppUser, AppUserDto};
use contracts::domain::a004_rental_agreement::aggregate::RentalAgreement;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;
use uuid::Uuid;

use crate::shared::api_utils;
use crate::shared::components::entity_select::SelectOption;
use crate::shared::fetch_cache::{CacheKey, FetchCache};

/// ViewModel формы бизнес-пользователя
#[derive(Clone)]
pub struct AppUserDetailsViewModel {
    pub form: RwSignal<AppUserDto>,
    pub errors: RwSignal<ValidationReport>,
    pub form_error: RwSignal<Option<String>>,
    pub is_loading: RwSignal<bool>,
    /// Запись не загрузилась: форма не показывается вовсе
    pub load_failed: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
    pub company_options: RwSignal<Vec<SelectOption>>,
    cache: FetchCache,
}

fn validate_form(dto: &AppUserDto) -> ValidationReport {
    let mut report = ValidationReport::new();
    if dto.email.trim().is_empty() {
        report.add("email", "Email обязателен для заполнения");
    } else if !dto.email.contains('@') {
        report.add("email", "Некорректный email");
    }
    if let Some(company_id) = &dto.company_id {
        if Uuid::parse_str(company_id).is_err() {
            report.add("company_id", "Некорректный идентификатор компании");
        }
    }
    report
}

impl AppUserDetailsViewModel {
    pub fn new(cache: FetchCache) -> Self {
        Self {
            form: RwSignal::new(AppUserDto::default()),
            errors: RwSignal::new(ValidationReport::new()),
            form_error: RwSignal::new(None),
            is_loading: RwSignal::new(false),
            load_failed: RwSignal::new(false),
            is_saving: RwSignal::new(false),
            company_options: RwSignal::new(Vec::new()),
            cache,
        }
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + '_ {
        move || self.form.get().id.is_some()
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(existing_id) = id else {
            return;
        };
        let form = self.form;
        let form_error = self.form_error;
        let is_loading = self.is_loading;
        let load_failed = self.load_failed;
        is_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api_utils::get_json::<AppUser>(&format!("/api/users/{}", existing_id)).await {
                Ok(aggregate) => {
                    form.set(AppUserDto {
                        id: Some(aggregate.base.id.as_string()),
                        email: aggregate.email,
                        first_name: aggregate.first_name,
                        last_name: aggregate.last_name,
                        company_id: aggregate.company_id,
                        updated_at: Some(aggregate.base.metadata.updated_at),
                    });
                }
                Err(e) => {
                    form_error.set(Some(format!("Ошибка загрузки: {}", e)));
                    load_failed.set(true);
                }
            }
            is_loading.set(false);
        });
    }

    /// Загрузка справочника компаний для селекта ссылки
    pub fn load_reference_options(&self) {
        let company_options = self.company_options;
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(companies) = api_utils::get_json::<Vec<Company>>("/api/companies").await {
                company_options.set(
                    companies
                        .into_iter()
                        .map(|c| SelectOption {
                            id: c.to_string_id(),
                            label: c.name,
                        })
                        .collect(),
                );
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        if self.is_saving.get() {
            return;
        }

        let current = self.form.get();

        let report = validate_form(&current);
        if !report.is_valid() {
            self.errors.set(report);
            return;
        }
        self.errors.set(ValidationReport::new());
        self.form_error.set(None);
        self.is_saving.set(true);

        let cache = self.cache;
        let form = self.form;
        let form_error = self.form_error;
        let is_saving = self.is_saving;
        wasm_bindgen_futures::spawn_local(async move {
            let result = match &current.id {
                Some(id) => {
                    api_utils::put_json::<_, AppUser>(&format!("/api/users/{}", id), &current)
                        .await
                        .map(|updated| Some((id.clone(), updated)))
                }
                None => api_utils::post_json::<_, serde_json::Value>("/api/users", &current)
                    .await
                    .map(|_| None),
            };
            match result {
                Ok(updated) => {
                    // Пользователи развёрнуты внутри договоров аренды
                    cache.invalidate_entity(AppUser::entity_name());
                    cache.invalidate_entity(RentalAgreement::entity_name());
                    if let Some((id, record)) = updated {
                        cache.put(CacheKey::record(AppUser::entity_name(), &id, &[]), &record);
                    }
                    // Форма возвращается к пустому состоянию
                    form.set(AppUserDto::default());
                    is_saving.set(false);
                    on_saved.run(())
                }
                Err(e) => {
                    form_error.set(Some(e));
                    is_saving.set(false);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_without_at_sign_is_rejected() {
        let dto = AppUserDto {
            email: "ivanov.example.com".to_string(),
            ..Default::default()
        };
        let report = validate_form(&dto);
        assert!(report.error("email").is_some());
    }

    #[test]
    fn valid_form_passes() {
        let dto = AppUserDto {
            email: "ivanov@example.com".to_string(),
            company_id: Some(Uuid::new_v4().to_string()),
            ..Default::default()
        };
        assert!(validate_form(&dto).is_valid());
    }
}
