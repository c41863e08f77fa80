use super::view_model::RentalAgreementDetailsViewModel;
use crate::shared::components::entity_select::EntitySelect;
use crate::shared::date_utils::{from_input_date, to_input_date};
use crate::shared::fetch_cache::use_fetch_cache;
use crate::shared::page_state::form_visible;
use leptos::prelude::*;

#[component]
pub fn RentalAgreementDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = RentalAgreementDetailsViewModel::new(use_fetch_cache());
    vm.load_if_needed(id);
    vm.load_reference_options();

    // Clone vm for multiple closures
    let vm_clone = vm.clone();

    view! {
        <div class="details-container rental-agreement-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode()() { "Редактирование договора аренды" } else { "Новый договор аренды" }
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
                                <label for="start_date">{"Дата начала"}</label>
                                <input
                                    type="date"
                                    id="start_date"
                                    prop:value={
                                        let vm = vm.clone();
                                        move || to_input_date(vm.form.get().start_date)
                                    }
                                    on:input={
                                        let vm = vm.clone();
                                        move |ev| {
                                            let parsed = from_input_date(&event_target_value(&ev));
                                            vm.form.update(|f| f.start_date = parsed);
                                        }
                                    }
                                />
                                {
                                    let vm = vm.clone();
                                    move || vm.errors.get().error("start_date").map(|e| view! {
                                        <div class="field-error">{e.to_string()}</div>
                                    })
                                }
                            </div>

                            <div class="form-group">
                                <label for="end_date">{"Дата окончания"}</label>
                                <input
                                    type="date"
                                    id="end_date"
                                    prop:value={
                                        let vm = vm.clone();
                                        move || to_input_date(vm.form.get().end_date)
                                    }
                                    on:input={
                                        let vm = vm.clone();
                                        move |ev| {
                                            let parsed = from_input_date(&event_target_value(&ev));
                                            vm.form.update(|f| f.end_date = parsed);
                                        }
                                    }
                                />
                                {
                                    let vm = vm.clone();
                                    move || vm.errors.get().error("end_date").map(|e| view! {
                                        <div class="field-error">{e.to_string()}</div>
                                    })
                                }
                            </div>

                            <EntitySelect
                                id="tool_id"
                                label="Инструмент"
                                options={
                                    let vm = vm.clone();
                                    Signal::derive(move || vm.tool_options.get())
                                }
                                value={
                                    let vm = vm.clone();
                                    Signal::derive(move || vm.form.get().tool_id)
                                }
                                on_change={
                                    let vm = vm.clone();
                                    Callback::new(move |selected| vm.form.update(|f| f.tool_id = selected))
                                }
                                error={
                                    let vm = vm.clone();
                                    Signal::derive(move || vm.errors.get().error("tool_id").map(|e| e.to_string()))
                                }
                            />

                            <EntitySelect
                                id="user_id"
                                label="Пользователь"
                                options={
                                    let vm = vm.clone();
                                    Signal::derive(move || vm.user_options.get())
                                }
                                value={
                                    let vm = vm.clone();
                                    Signal::derive(move || vm.form.get().user_id)
                                }
                                on_change={
                                    let vm = vm.clone();
                                    Callback::new(move |selected| vm.form.update(|f| f.user_id = selected))
                                }
                                error={
                                    let vm = vm.clone();
                                    Signal::derive(move || vm.errors.get().error("user_id").map(|e| e.to_string()))
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
