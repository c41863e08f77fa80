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

#[derive(Clone, Debug)]
pub struct ToolRow {
    pub id: String,
    pub name: String,
    pub status: String,
    pub company_name: String,
    pub agreement_count: String,
}

impl From<Tool> for ToolRow {
    fn from(t: Tool) -> Self {
        Self {
            id: t.to_string_id(),
            name: t.name,
            status: t.status,
            company_name: t
                .company
                .map(|c| c.name)
                .unwrap_or_else(|| "-".to_string()),
            agreement_count: t
                .rental_agreement_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "0".to_string()),
        }
    }
}

const RELATIONS: [&str; 2] = ["company", "rental_agreement_count"];

#[component]
#[allow(non_snake_case)]
pub fn ToolList() -> impl IntoView {
    let cache = use_fetch_cache();
    let actions = use_visible_actions(Tool::entity_name());
    let company_actions = use_visible_actions(Company::entity_name());

    let (items, set_items) = signal::<Vec<ToolRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (is_loading, set_is_loading) = signal(false);

    let fetch = move |force: bool| {
        let key = CacheKey::list(Tool::entity_name(), &RELATIONS);
        if !force {
            if let Some(cached) = cache.get::<Vec<Tool>>(&key) {
                set_items.set(cached.into_iter().map(Into::into).collect());
                return;
            }
        }
        set_is_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api_utils::get_json::<Vec<Tool>>(
                "/api/tools?relations=company,rental_agreement_count",
            )
            .await
            {
                Ok(v) => {
                    cache.put(CacheKey::list(Tool::entity_name(), &RELATIONS), &v);
                    set_items.set(v.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_is_loading.set(false);
        });
    };

    let router = use_router();
    let open_details = move |id: String| router.navigate(&format!("/tools/{}", id));
    let handle_create_new = move || router.navigate("/tools/new");

    let delete_row = move |id: String| {
        let confirmed = web_sys::window()
            .map(|win| win.confirm_with_message("Удалить инструмент?").unwrap_or(false))
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        wasm_bindgen_futures::spawn_local(async move {
            match api_utils::delete(&format!("/api/tools/{}", id)).await {
                Ok(()) => {
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
                    <h1 class="header__title">{"Инструменты"}</h1>
                </div>
                <div class="header__actions">
                    <Show when=move || actions.get().contains(&AccessOperation::Create)>
                        <button class="button button--primary" on:click=move |_| handle_create_new()>
                            {"Новый инструмент"}
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
                                <th class="table__header-cell">{"Статус"}</th>
                                <Show when=move || company_actions.get().contains(&AccessOperation::Read)>
                                    <th class="table__header-cell">{"Компания"}</th>
                                </Show>
                                <th class="table__header-cell">{"Договоров"}</th>
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let can_read = actions.get().contains(&AccessOperation::Read);
                                let can_update = actions.get().contains(&AccessOperation::Update);
                                let can_delete = actions.get().contains(&AccessOperation::Delete);
                                let show_company =
                                    company_actions.get().contains(&AccessOperation::Read);
                                items.get().into_iter().map(|row| {
                                    let id_for_click = row.id.clone();
                                    let id_for_edit = row.id.clone();
                                    let id_for_delete = row.id.clone();
                                    view! {
                                        <tr
                                            class="table__row"
                                            on:click=move |_| {
                                                if can_read {
                                                    open_details(id_for_click.clone());
                                                }
                                            }
                                        >
                                            <td class="table__cell">{row.name}</td>
                                            <td class="table__cell">{row.status}</td>
                                            {show_company.then(|| view! {
                                                <td class="table__cell">{row.company_name.clone()}</td>
                                            })}
                                            <td class="table__cell">{row.agreement_count}</td>
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
