use contracts::domain::a001_company::aggregate::Company;
use contracts::domain::a003_tool::aggregate::Tool;
use contracts::domain::common::AggregateRoot;
use contracts::system::access::AccessOperation;
use leptos::prelude::*;

use crate::routes::router::use_router;
use crate::shared::api_utils;
use crate::shared::fetch_cache::{use_fetch_cache, CacheKey};
use crate::shared::page_state::table_visible;
use crate::system::auth::context::use_visible_actions;

#[component]
#[allow(non_snake_case)]
pub fn CompanyList() -> impl IntoView {
    let cache = use_fetch_cache();
    let actions = use_visible_actions(Company::entity_name());

    let (items, set_items) = signal::<Vec<Company>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (is_loading, set_is_loading) = signal(false);

    let fetch = move |force: bool| {
        let key = CacheKey::list(Company::entity_name(), &[]);
        if !force {
            if let Some(cached) = cache.get::<Vec<Company>>(&key) {
                set_items.set(cached);
                return;
            }
        }
        set_is_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api_utils::get_json::<Vec<Company>>("/api/companies").await {
                Ok(v) => {
                    cache.put(CacheKey::list(Company::entity_name(), &[]), &v);
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_is_loading.set(false);
        });
    };

    let router = use_router();
    let open_details = move |id: String| router.navigate(&format!("/companies/{}", id));
    let handle_create_new = move || router.navigate("/companies/new");

    let delete_row = move |id: String| {
        let confirmed = web_sys::window()
            .map(|win| win.confirm_with_message("Удалить компанию?").unwrap_or(false))
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        wasm_bindgen_futures::spawn_local(async move {
            match api_utils::delete(&format!("/api/companies/{}", id)).await {
                Ok(()) => {
                    // Компании развёрнуты внутри инструментов, их кэш тоже устарел
                    cache.invalidate_entity(Company::entity_name());
                    cache.invalidate_entity(Tool::entity_name());
                    fetch(true);
                }
                Err(e) => set_error.set(Some(format!("Ошибка удаления: {}", e))),
            }
        });
    };

    fetch(false);

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Компании"}</h1>
                </div>
                <div class="header__actions">
                    <Show when=move || actions.get().contains(&AccessOperation::Create)>
                        <button class="button button--primary" on:click=move |_| handle_create_new()>
                            {"Новая компания"}
                        </button>
                    </Show>
                    <button class="button button--secondary" on:click=move |_| fetch(true)>
                        {"Обновить"}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show
                when=move || table_visible(is_loading.get())
                fallback=|| view! { <div class="loading">{"Загрузка..."}</div> }
            >
                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">{"Наименование"}</th>
                                <th class="table__header-cell">{"Описание"}</th>
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let can_read = actions.get().contains(&AccessOperation::Read);
                                let can_update = actions.get().contains(&AccessOperation::Update);
                                let can_delete = actions.get().contains(&AccessOperation::Delete);
                                items.get().into_iter().map(|company| {
                                    let id = company.to_string_id();
                                    let id_for_click = id.clone();
                                    let id_for_edit = id.clone();
                                    let id_for_delete = id;
                                    let description =
                                        company.description.clone().unwrap_or_default();
                                    view! {
                                        <tr
                                            class="table__row"
                                            on:click=move |_| {
                                                if can_read {
                                                    open_details(id_for_click.clone());
                                                }
                                            }
                                        >
                                            <td class="table__cell">{company.name.clone()}</td>
                                            <td class="table__cell">{description}</td>
                                            <td class="table__cell table__cell--actions">
                                                {can_update.then(|| view! {
                                                    <button
                                                        class="button button--small"
                                                        on:click=move |ev| {
                                                            ev.stop_propagation();
                                                            open_details(id_for_edit.clone());
                                                        }
                                                    >
                                                        {"Изменить"}
                                                    </button>
                                                })}
                                                {can_delete.then(|| view! {
                                                    <button
                                                        class="button button--small button--danger"
                                                        on:click=move |ev| {
                                                            ev.stop_propagation();
                                                            delete_row(id_for_delete.clone());
                                                        }
                                                    >
                                                        {"Удалить"}
                                                    </button>
                                                })}
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}
