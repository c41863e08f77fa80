use crate::routes::routes::AppRoutes;
use crate::shared::fetch_cache::FetchCache;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Единый кэш выборок на всё приложение: ключ (сущность, id, relations),
    // инвалидация выполняется явно после мутаций.
    provide_context(FetchCache::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
