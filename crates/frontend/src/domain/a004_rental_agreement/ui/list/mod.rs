use contracts::domain::a002_app_user::aggregate::AppUser;
use contracts::domain::a003_tool::aggregate::Tool;
use contracts::domain::a004_rental_agreement::aggregate::{
    RentalAgreement, RentalAgreementQuery,
};
use contracts::domain::common::AggregateRoot;
use contracts::system::access::AccessOperation;
use leptos::prelude::*;

use crate::routes::router::use_router;
use crate::shared::api_utils;
use crate::shared::date_utils::format_date;
use crate::shared::fetch_cache::{use_fetch_cache, CacheKey};
use crate::shared::page_state::table_visible;
use crate::system::auth::context::use_visible_actions;

#[derive(Clone, Debug)]
pub struct RentalAgreementRow {
    pub id: String,
    pub start_date: String,
    pub end_date: String,
    pub tool_name: String,
    pub user_email: String,
}

impl From<RentalAgreement> for RentalAgreementRow {
    fn from(a: RentalAgreement) -> Self {
        Self {
            id: a.to_string_id(),
            start_date: format_date(&a.start_date.to_rfc3339()),
            end_date: format_date(&a.end_date.to_rfc3339()),
            tool_name: a.tool.map(|t| t.name).unwrap_or_else(|| "-".to_string()),
            user_email: a.user.map(|u| u.email).unwrap_or_else(|| "-".to_string()),
        }
    }
}

const RELATIONS: [&str; 2] = ["tool", "user"];

#[component]
#[allow(non_snake_case)]
pub fn RentalAgreementList() -> impl IntoView {
    let cache = use_fetch_cache();
    // Доступные операции считаются один раз на проход рендера,
    // дальше страница только читает готовые наборы
    let actions = use_visible_actions(RentalAgreement::entity_name());
    let tool_actions = use_visible_actions(Tool::entity_name());
    let user_actions = use_visible_actions(AppUser::entity_name());

    let (items, set_items) = signal::<Vec<RentalAgreementRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (is_loading, set_is_loading) = signal(false);

    let fetch = move |force: bool| {
        // Фильтр из строки запроса (?tool_id=...&user_id=...); выборка
        // с фильтром в кэш не попадает
        let filter: RentalAgreementQuery = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .map(|s| serde_qs::from_str(s.trim_start_matches('?')).unwrap_or_default())
            .unwrap_or_default();
        let has_filter =
            filter.id.is_some() || filter.tool_id.is_some() || filter.user_id.is_some();

        let key = CacheKey::list(RentalAgreement::entity_name(), &RELATIONS);
        if !force && !has_filter {
            if let Some(cached) = cache.get::<Vec<RentalAgreement>>(&key) {
                set_items.set(cached.into_iter().map(Into::into).collect());
                return;
            }
        }
        let path = if has_filter {
            format!(
                "/api/rental-agreements?relations=tool,user&{}",
                serde_qs::to_string(&filter).unwrap_or_default()
            )
        } else {
            "/api/rental-agreements?relations=tool,user".to_string()
        };
        set_is_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api_utils::get_json::<Vec<RentalAgreement>>(&path).await {
                Ok(v) => {
                    if !has_filter {
                        cache.put(
                            CacheKey::list(RentalAgreement::entity_name(), &RELATIONS),
                            &v,
                        );
                    }
                    set_items.set(v.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_is_loading.set(false);
        });
    };

    let router = use_router();
    let open_details = move |id: String| {
        router.navigate(&format!("/rental-agreements/{}", id));
    };
    let handle_create_new = move || router.navigate("/rental-agreements/new");

    let delete_row = move |id: String| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message("Удалить договор аренды?")
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        wasm_bindgen_futures::spawn_local(async move {
            match api_utils::delete(&format!("/api/rental-agreements/{}", id)).await {
                Ok(()) => {
                    // Мутация: сбрасываем списки договоров и счётчики инструментов
                    cache.invalidate_entity(RentalAgreement::entity_name());
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
                    <h1 class="header__title">{"Договоры аренды"}</h1>
                </div>
                <div class="header__actions">
                    <Show when=move || actions.get().contains(&AccessOperation::Create)>
                        <button class="button button--primary" on:click=move |_| handle_create_new()>
                            {"Новый договор"}
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
                                <th class="table__header-cell">{"Дата начала"}</th>
                                <th class="table__header-cell">{"Дата окончания"}</th>
                                <Show when=move || tool_actions.get().contains(&AccessOperation::Read)>
                                    <th class="table__header-cell">{"Инструмент"}</th>
                                </Show>
                                <Show when=move || user_actions.get().contains(&AccessOperation::Read)>
                                    <th class="table__header-cell">{"Пользователь"}</th>
                                </Show>
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let can_read = actions.get().contains(&AccessOperation::Read);
                                let can_update = actions.get().contains(&AccessOperation::Update);
                                let can_delete = actions.get().contains(&AccessOperation::Delete);
                                let show_tool = tool_actions.get().contains(&AccessOperation::Read);
                                let show_user = user_actions.get().contains(&AccessOperation::Read);
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
                                            <td class="table__cell">{row.start_date}</td>
                                            <td class="table__cell">{row.end_date}</td>
                                            {show_tool.then(|| view! {
                                                <td class="table__cell">{row.tool_name.clone()}</td>
                                            })}
                                            {show_user.then(|| view! {
                                                <td class="table__cell">{row.user_email.clone()}</td>
                                            })}
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
