use std::collections::BTreeSet;

use contracts::system::access::{visible_actions, AccessOperation};
use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());

    // Try to restore session from localStorage on mount
    create_effect(move |_| {
        spawn_local(async move {
            if let Some(access_token) = storage::get_access_token() {
                // Validate token by fetching current user
                match api::get_current_user(&access_token).await {
                    Ok(user_info) => {
                        set_auth_state.set(AuthState {
                            access_token: Some(access_token),
                            user_info: Some(user_info),
                        });
                    }
                    Err(_) => {
                        // Token invalid, try refresh
                        if let Some(refresh_token) = storage::get_refresh_token() {
                            match api::refresh_token(refresh_token).await {
                                Ok(response) => {
                                    storage::save_access_token(&response.access_token);

                                    if let Ok(user_info) =
                                        api::get_current_user(&response.access_token).await
                                    {
                                        set_auth_state.set(AuthState {
                                            access_token: Some(response.access_token),
                                            user_info: Some(user_info),
                                        });
                                    }
                                }
                                Err(_) => {
                                    storage::clear_tokens();
                                }
                            }
                        } else {
                            storage::clear_tokens();
                        }
                    }
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Набор операций, доступных текущей роли по сущности. Считается один раз
/// на проход рендера; страницы читают готовый набор вместо точечных
/// проверок доступа вокруг каждой кнопки.
pub fn use_visible_actions(entity: &'static str) -> Memo<BTreeSet<AccessOperation>> {
    let (auth_state, _) = use_auth();
    Memo::new(move |_| {
        auth_state
            .get()
            .user_info
            .as_ref()
            .map(|u| visible_actions(u.role, entity))
            .unwrap_or_default()
    })
}

/// Helper: Perform logout
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        let _ = api::logout(refresh_token).await;
    }

    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
