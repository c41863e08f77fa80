use super::model;
use contracts::domain::a003_tool::aggregate::Tool;
use contracts::domain::a004_rental_agreement::aggregate::{RentalAgreement, RentalAgreementDto};
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::shared::components::entity_select::SelectOption;
use crate::shared::fetch_cache::{CacheKey, FetchCache};

/// ViewModel формы договора аренды.
///
/// Валидация запускается только на submit: ввод в поля ошибки не
/// пересчитывает, отчет очищается при следующем submit.
#[derive(Clone)]
pub struct RentalAgreementDetailsViewModel {
    pub form: RwSignal<RentalAgreementDto>,
    /// Пополевые ошибки последнего submit
    pub errors: RwSignal<ValidationReport>,
    /// Ошибка сервера, показывается баннером над формой
    pub form_error: RwSignal<Option<String>>,
    pub is_loading: RwSignal<bool>,
    /// Запись не загрузилась: форма не показывается вовсе
    pub load_failed: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
    pub tool_options: RwSignal<Vec<SelectOption>>,
    pub user_options: RwSignal<Vec<SelectOption>>,
    cache: FetchCache,
}

impl RentalAgreementDetailsViewModel {
    pub fn new(cache: FetchCache) -> Self {
        Self {
            form: RwSignal::new(RentalAgreementDto::default()),
            errors: RwSignal::new(ValidationReport::new()),
            form_error: RwSignal::new(None),
            is_loading: RwSignal::new(false),
            load_failed: RwSignal::new(false),
            is_saving: RwSignal::new(false),
            tool_options: RwSignal::new(Vec::new()),
            user_options: RwSignal::new(Vec::new()),
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
                    form.set(RentalAgreementDto {
                        id: Some(aggregate.base.id.as_string()),
                        start_date: Some(aggregate.start_date),
                        end_date: Some(aggregate.end_date),
                        tool_id: aggregate.tool_id,
                        user_id: aggregate.user_id,
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

    /// Загрузка справочников для селектов ссылок
    pub fn load_reference_options(&self) {
        let tool_options = self.tool_options;
        let user_options = self.user_options;
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(tools) = model::fetch_tool_options().await {
                tool_options.set(
                    tools
                        .into_iter()
                        .map(|t| SelectOption {
                            id: t.to_string_id(),
                            label: t.name,
                        })
                        .collect(),
                );
            }
            if let Ok(users) = model::fetch_user_options().await {
                user_options.set(
                    users
                        .into_iter()
                        .map(|u| SelectOption {
                            id: u.to_string_id(),
                            label: u.email,
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

        // Submit-only валидация: схема DTO, первая ошибка по полю
        let report = current.validate();
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
                    // Списки договоров и счётчики инструментов устарели
                    cache.invalidate_entity(RentalAgreement::entity_name());
                    cache.invalidate_entity(Tool::entity_name());
                    if let Some((id, record)) = updated {
                        // Обновлённая запись сразу доступна без повторного GET
                        cache.put(
                            CacheKey::record(RentalAgreement::entity_name(), &id, &[]),
                            &record,
                        );
                    }
                    // Форма возвращается к пустому состоянию
                    form.set(RentalAgreementDto::default());
                    is_saving.set(false);
                    on_saved.run(())
                }
                Err(e) => {
                    // Форма остаётся заполненной, значения не сбрасываются
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
    fn blank_dto_is_create_mode() {
        // Сброс формы после сохранения возвращает её в режим создания
        let dto = RentalAgreementDto::default();
        assert!(dto.id.is_none());
        assert!(dto.start_date.is_none());
        assert!(dto.end_date.is_none());
    }
}
