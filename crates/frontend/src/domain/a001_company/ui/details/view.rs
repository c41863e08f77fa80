use super::view_model::CompanyDetailsViewModel;
use crate::shared::fetch_cache::use_fetch_cache;
use crate::shared::page_state::form_visible;
use leptos::prelude::*;

#[component]
pub fn CompanyDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = CompanyDetailsViewModel::new(use_fetch_cache());
    vm.load_if_needed(id);

    let vm_clone = vm.clone();

    view! {
        <div class="details-container company-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode()() { "Редактирование компании" } else { "Новая компания" }
                    }
                </h3>
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.form_error.get().map(|e| view! { <div class="error">{e}</div> })
            }
            {
                let vm = vm_clone.clone();
                move || vm.is_loading.get().then(|| view! { <div class="loading">{"Загрузка..."}</div> })
            }

            {
                let vm = vm_clone.clone();
                move || form_visible(vm.is_loading.get(), vm.load_failed.get()).then(|| {
                    let vm = vm.clone();
                    view! {
                        <div class="details-form">
                            <div class="form-group">
                                <label for="name">{"Наименование"}</label>
                                <input
                                    type="text"
                                    id="name"
                                    prop:value={
                                        let vm = vm.clone();
                                        move || vm.form.get().name
                                    }
                                    on:input={
                                        let vm = vm.clone();
                                        move |ev| {
                                            let value = event_target_value(&ev);
                                            vm.form.update(|f| f.name = value);
                                        }
                                    }
                                />
                                {
                                    let vm = vm.clone();
                                    move || vm.errors.get().error("name").map(|e| view! {
                                        <div class="field-error">{e.to_string()}</div>
                                    })
                                }
                            </div>

                            <div class="form-group">
                                <label for="description">{"Описание"}</label>
                                <textarea
                                    id="description"
                                    prop:value={
                                        let vm = vm.clone();
                                        move || vm.form.get().description.unwrap_or_default()
                                    }
                                    on:input={
                                        let vm = vm.clone();
                                        move |ev| {
                                            let value = event_target_value(&ev);
                                            vm.form.update(|f| {
                                                f.description = if value.trim().is_empty() {
                                                    None
                                                } else {
                                                    Some(value)
                                                };
                                            });
                                        }
                                    }
                                ></textarea>
                            </div>
                        </div>

                        <div class="details-actions">
                            <button
                                class="btn btn-primary"
                                on:click={
                                    let vm = vm.clone();
                                    move |_| vm.save_command(on_saved)
                                }
                                disabled={
                                    let vm = vm.clone();
                                    move || vm.is_saving.get()
                                }
                            >
                                {
                                    let vm = vm.clone();
                                    move || {
                                        if vm.is_saving.get() {
                                            "Сохранение..."
                                        } else if vm.is_edit_mode()() {
                                            "Сохранить"
                                        } else {
                                            "Создать"
                                        }
                                    }
                                }
                            </button>
                            <button
                                class="btn btn-secondary"
                                on:click=move |_| on_cancel.run(())
                            >
                                {"Отмена"}
                            </button>
                        </div>
                    }
                })
            }
        </div>
    }
}
