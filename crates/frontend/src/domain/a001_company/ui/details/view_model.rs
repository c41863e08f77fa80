use contracts::domain::a001_company::aggregate::{Company, CompanyDto};
use contracts::domain::a003_tool::aggregate::Tool;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::shared::api_utils;
use crate::shared::fetch_cache::{CacheKey, FetchCache};

/// ViewModel формы компании. Форма маленькая, API-вызовы прямо здесь.
#[derive(Clone)]
pub struct CompanyDetailsViewModel {
    pub form: RwSignal<CompanyDto>,
    pub errors: RwSignal<ValidationReport>,
    pub form_error: RwSignal<Option<String>>,
    pub is_loading: RwSignal<bool>,
    /// Запись не загрузилась: форма не показывается вовсе
    pub load_failed: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
    cache: FetchCache,
}

impl CompanyDetailsViewModel {
    pub fn new(cache: FetchCache) -> Self {
        Self {
            form: RwSignal::new(CompanyDto::default()),
            errors: RwSignal::new(ValidationReport::new()),
            form_error: RwSignal::new(None),
            is_loading: RwSignal::new(false),
            load_failed: RwSignal::new(false),
            is_saving: RwSignal::new(false),
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
            match api_utils::get_json::<Company>(&format!("/api/companies/{}", existing_id)).await
            {
                Ok(aggregate) => {
                    form.set(CompanyDto {
                        id: Some(aggregate.base.id.as_string()),
                        name: aggregate.name,
                        description: aggregate.description,
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

    pub fn save_command(&self, on_saved: Callback<()>) {
        if self.is_saving.get() {
            return;
        }

        let current = self.form.get();

        let mut report = ValidationReport::new();
        if current.name.trim().is_empty() {
            report.add("name", "Наименование обязательно для заполнения");
        }
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
                    api_utils::put_json::<_, Company>(&format!("/api/companies/{}", id), &current)
                        .await
                        .map(|updated| Some((id.clone(), updated)))
                }
                None => api_utils::post_json::<_, serde_json::Value>("/api/companies", &current)
                    .await
                    .map(|_| None),
            };
            match result {
                Ok(updated) => {
                    // Компании развёрнуты внутри инструментов
                    cache.invalidate_entity(Company::entity_name());
                    cache.invalidate_entity(Tool::entity_name());
                    if let Some((id, record)) = updated {
                        cache.put(CacheKey::record(Company::entity_name(), &id, &[]), &record);
                    }
                    // Форма возвращается к пустому состоянию
                    form.set(CompanyDto::default());
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
