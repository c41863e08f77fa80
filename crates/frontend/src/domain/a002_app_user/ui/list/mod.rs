use contracts::domain::a002_app_user::aggregate::AppUser;
use contracts::domain::a004_rental_agreement::aggregate::RentalAgreement;
use contracts::domain::common::AggregateRoot;
use contracts::system::access::AccessOperation;
use leptos::prelude::*;

use crate::routes::router::use_router;
use crate::shared::api_utils;
use crate::shared::fetch_cache::{use_fetch_cache, CacheKey};
use crate::shared::page_state::table_visible;
use crate::system::auth::context::use_visible_actions;

#[derive(Clone, Debug)]
pub struct AppUserRow {
    pub id: String,
    pub email: String,
    pub full_name: String,
}

impl From<AppUser> for AppUserRow {
    fn from(u: AppUser) -> Self {
        let full_name = [u.last_name.as_deref(), u.first_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            id: u.to_string_id(),
            email: u.email,
            full_name,
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn AppUserList() -> impl IntoView {
    let cache = use_fetch_cache();
    let actions = use_visible_actions(AppUser::entity_name());

    let (items, set_items) = signal::<Vec<AppUserRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (is_loading, set_is_loading) = signal(false);

    let fetch = move |force: bool| {
        let key = CacheKey::list(AppUser::entity_name(), &[]);
        if !force {
            if let Some(cached) = cache.get::<Vec<AppUser>>(&key) {
                set_items.set(cached.into_iter().map(Into::into).collect());
                return;
            }
        }
        set_is_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api_utils::get_json::<Vec<AppUser>>("/api/users").await {
                Ok(v) => {
                    cache.put(CacheKey::list(AppUser::entity_name(), &[]), &v);
                    set_items.set(v.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_is_loading.set(false);
        });
    };

    let router = use_router();
    let open_details = move |id: String| router.navigate(&format!("/users/{}", id));
    let handle_create_new = move || router.navigate("/users/new");

    let delete_row = move |id: String| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message("Удалить пользователя?")
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        wasm_bindgen_futures::spawn_local(async move {
            match api_utils::delete(&format!("/api/users/{}", id)).await {
                Ok(()) => {
                    // Пользователи развёрнуты внутри договоров аренды
                    cache.invalidate_entity(AppUser::entity_name());
                    cache.invalidate_entity(RentalAgreement::entity_name());
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
                    <h1 class="header__title">{"Пользователи"}</h1>
                </div>
                <div class="header__actions">
                    <Show when=move || actions.get().contains(&AccessOperation::Create)>
                        <button class="button button--primary" on:click=move |_| handle_create_new()>
                            {"Новый пользователь"}
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
                                <th class="table__header-cell">{"Email"}</th>
                                <th class="table__header-cell">{"ФИО"}</th>
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let can_read = actions.get().contains(&AccessOperation::Read);
                                let can_update = actions.get().contains(&AccessOperation::Update);
                                let can_delete = actions.get().contains(&AccessOperation::Delete);
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
                                            <td class="table__cell">{row.email}</td>
                                            <td class="table__cell">{row.full_name}</td>
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_last_and_first() {
        let user = AppUser::new_for_insert(
            "ivanov@example.com".to_string(),
            Some("Иван".to_string()),
            Some("Иванов".to_string()),
            None,
        );
        let row: AppUserRow = user.into();
        assert_eq!(row.full_name, "Иванов Иван");
    }

    #[test]
    fn full_name_is_empty_without_names() {
        let user = AppUser::new_for_insert("x@example.com".to_string(), None, None, None);
        let row: AppUserRow = user.into();
        assert_eq!(row.full_name, "");
    }
}
