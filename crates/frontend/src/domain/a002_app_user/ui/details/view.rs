use super::view_model::AppUserDetailsViewModel;
use crate::shared::components::entity_select::EntitySelect;
use crate::shared::fetch_cache::use_fetch_cache;
use crate::shared::page_state::form_visible;
use leptos::prelude::*;

#[component]
pub fn AppUserDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = AppUserDetailsViewModel::new(use_fetch_cache());
    vm.load_if_needed(id);
    vm.load_reference_options();

    let vm_clone = vm.clone();

    view! {
        <div class="details-container app-user-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode()() { "Редактирование пользователя" } else { "Новый пользователь" }
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
                                <label for="email">{"Email"}</label>
                                <input
                                    type="email"
                                    id="email"
                                    prop:value={
                                        let vm = vm.clone();
                                        move || vm.form.get().email
                                    }
                                    on:input={
                                        let vm = vm.clone();
                                        move |ev| {
                                            let value = event_target_value(&ev);
                                            vm.form.update(|f| f.email = value);
                                        }
                                    }
                                />
                                {
                                    let vm = vm.clone();
                                    move || vm.errors.get().error("email").map(|e| view! {
                                        <div class="field-error">{e.to_string()}</div>
                                    })
                                }
                            </div>

                            <div class="form-group">
                                <label for="first_name">{"Имя"}</label>
                                <input
                                    type="text"
                                    id="first_name"
                                    prop:value={
                                        let vm = vm.clone();
                                        move || vm.form.get().first_name.unwrap_or_default()
                                    }
                                    on:input={
                                        let vm = vm.clone();
                                        move |ev| {
                                            let value = event_target_value(&ev);
                                            vm.form.update(|f| {
                                                f.first_name = if value.trim().is_empty() {
                                                    None
                                                } else {
                                                    Some(value)
                                                };
                                            });
                                        }
                                    }
                                />
                            </div>

                            <div class="form-group">
                                <label for="last_name">{"Фамилия"}</label>
                                <input
                                    type="text"
                                    id="last_name"
                                    prop:value={
                                        let vm = vm.clone();
                                        move || vm.form.get().last_name.unwrap_or_default()
                                    }
                                    on:input={
                                        let vm = vm.clone();
                                        move |ev| {
                                            let value = event_target_value(&ev);
                                            vm.form.update(|f| {
                                                f.last_name = if value.trim().is_empty() {
                                                    None
                                                } else {
                                                    Some(value)
                                                };
                                            });
                                        }
                                    }
                                />
                            </div>

                            <EntitySelect
                                id="company_id"
                                label="Компания"
                                options={
                                    let vm = vm.clone();
                                    Signal::derive(move || vm.company_options.get())
                                }
                                value={
                                    let vm = vm.clone();
                                    Signal::derive(move || vm.form.get().company_id)
                                }
                                on_change={
                                    let vm = vm.clone();
                                    Callback::new(move |selected| vm.form.update(|f| f.company_id = selected))
                                }
                                error={
                                    let vm = vm.clone();
                                    Signal::derive(move || vm.errors.get().error("company_id").map(|e| e.to_string()))
                                }
                            />
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
