use super::model;
use contracts::domain::a003_tool::aggregate::{Tool, ToolDto};
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;
use uuid::Uuid;

use crate::shared::components::entity_select::SelectOption;
use crate::shared::fetch_cache::{CacheKey, FetchCache};

/// ViewModel формы инструмента. Валидация запускается только на submit.
#[derive(Clone)]
pub struct ToolDetailsViewModel {
    pub form: RwSignal<ToolDto>,
    pub errors: RwSignal<ValidationReport>,
    pub form_error: RwSignal<Option<String>>,
    pub is_loading: RwSignal<bool>,
    /// Запись не загрузилась: форма не показывается вовсе
    pub load_failed: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
    pub company_options: RwSignal<Vec<SelectOption>>,
    cache: FetchCache,
}

fn validate_form(dto: &ToolDto) -> ValidationReport {
    let mut report = ValidationReport::new();
    if dto.name.trim().is_empty() {
        report.add("name", "Наименование обязательно для заполнения");
    }
    if dto.status.trim().is_empty() {
        report.add("status", "Статус обязателен для заполнения");
    }
    if let Some(company_id) = &dto.company_id {
        if Uuid::parse_str(company_id).is_err() {
            report.add("company_id", "Некорректный идентификатор компании");
        }
    }
    report
}

impl ToolDetailsViewModel {
    pub fn new(cache: FetchCache) -> Self {
        Self {
            form: RwSignal::new(ToolDto::default()),
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

    /// Load form data from server if ID is provided
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
            match model::fetch_by_id(&existing_id).await {
                Ok(aggregate) => {
                    form.set(ToolDto {
                        id: Some(aggregate.base.id.as_string()),
                        name: aggregate.name,
                        status: aggregate.status,
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
            if let Ok(companies) = model::fetch_company_options().await {
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

    /// Save form data to server
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
                Some(id) => model::update(id, &current)
                    .await
                    .map(|updated| Some((id.clone(), updated))),
                None => model::create(&current).await.map(|_| None),
            };
            match result {
                Ok(updated) => {
                    cache.invalidate_entity(Tool::entity_name());
                    if let Some((id, record)) = updated {
                        cache.put(CacheKey::record(Tool::entity_name(), &id, &[]), &record);
                    }
                    // Форма возвращается к пустому состоянию
                    form.set(ToolDto::default());
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
    fn empty_form_reports_name_and_status() {
        let report = validate_form(&ToolDto::default());
        assert!(!report.is_valid());
        assert!(report.error("name").is_some());
        assert!(report.error("status").is_some());
    }

    #[test]
    fn malformed_company_reference_is_rejected() {
        let dto = ToolDto {
            name: "Перфоратор".to_string(),
            status: "available".to_string(),
            company_id: Some("not-a-uuid".to_string()),
            ..Default::default()
        };
        let report = validate_form(&dto);
        assert!(report.error("company_id").is_some());
        assert!(report.error("name").is_none());
    }
}
