use contracts::domain::a001_company::aggregate::Company;
use contracts::domain::a002_app_user::aggregate::AppUser;
use contracts::domain::a003_tool::aggregate::Tool;
use contracts::domain::a004_rental_agreement::aggregate::RentalAgreement;
use contracts::domain::common::AggregateRoot;
use contracts::system::access::AccessOperation;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_company::ui::details::CompanyDetails;
use crate::domain::a001_company::ui::list::CompanyList;
use crate::domain::a002_app_user::ui::details::AppUserDetails;
use crate::domain::a002_app_user::ui::list::AppUserList;
use crate::domain::a003_tool::ui::details::ToolDetails;
use crate::domain::a003_tool::ui::list::ToolList;
use crate::domain::a004_rental_agreement::ui::details::RentalAgreementDetails;
use crate::domain::a004_rental_agreement::ui::list::RentalAgreementList;
use crate::routes::router::{parse_path, use_router, Page, RouteService};
use crate::system::auth::context::{do_logout, use_auth, use_visible_actions};
use crate::system::pages::login::LoginPage;

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();
    provide_context(RouteService::new());

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="shell">
            <NavBar />
            <main class="shell__content">
                {move || match parse_path(&router.path.get()) {
                    Page::CompanyList => view! { <CompanyList /> }.into_any(),
                    Page::CompanyDetails(id) => view! { <CompanyDetailsPage id=id /> }.into_any(),
                    Page::AppUserList => view! { <AppUserList /> }.into_any(),
                    Page::AppUserDetails(id) => view! { <AppUserDetailsPage id=id /> }.into_any(),
                    Page::ToolList => view! { <ToolList /> }.into_any(),
                    Page::ToolDetails(id) => view! { <ToolDetailsPage id=id /> }.into_any(),
                    Page::RentalAgreementList => view! { <RentalAgreementList /> }.into_any(),
                    Page::RentalAgreementDetails(id) => {
                        view! { <RentalAgreementDetailsPage id=id /> }.into_any()
                    }
                    Page::NotFound => {
                        view! { <div class="not-found">{"Страница не найдена"}</div> }.into_any()
                    }
                }}
            </main>
        </div>
    }
}

/// Навигация: пункт виден только если роль может читать сущность
#[component]
fn NavBar() -> impl IntoView {
    let router = use_router();
    let (auth_state, set_auth_state) = use_auth();
    let company_actions = use_visible_actions(Company::entity_name());
    let user_actions = use_visible_actions(AppUser::entity_name());
    let tool_actions = use_visible_actions(Tool::entity_name());
    let agreement_actions = use_visible_actions(RentalAgreement::entity_name());

    let nav_link = move |href: &'static str, title: &'static str| {
        view! {
            <a
                class="nav__link"
                href=href
                on:click=move |ev| {
                    ev.prevent_default();
                    router.navigate(href);
                }
            >
                {title}
            </a>
        }
    };

    let logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    view! {
        <nav class="nav">
            <span class="nav__brand">{"Аренда инструмента"}</span>
            <Show when=move || agreement_actions.get().contains(&AccessOperation::Read)>
                {nav_link("/rental-agreements", "Договоры аренды")}
            </Show>
            <Show when=move || tool_actions.get().contains(&AccessOperation::Read)>
                {nav_link("/tools", "Инструменты")}
            </Show>
            <Show when=move || company_actions.get().contains(&AccessOperation::Read)>
                {nav_link("/companies", "Компании")}
            </Show>
            <Show when=move || user_actions.get().contains(&AccessOperation::Read)>
                {nav_link("/users", "Пользователи")}
            </Show>
            <span class="nav__spacer"></span>
            <span class="nav__user">
                {move || {
                    auth_state
                        .get()
                        .user_info
                        .map(|u| u.username)
                        .unwrap_or_default()
                }}
            </span>
            <button class="nav__logout" on:click=logout>
                {"Выйти"}
            </button>
        </nav>
    }
}

#[component]
fn CompanyDetailsPage(id: Option<String>) -> impl IntoView {
    let router = use_router();
    let on_saved = Callback::new(move |_| router.navigate("/companies"));
    let on_cancel = Callback::new(move |_| router.navigate("/companies"));

    view! { <CompanyDetails id=id on_saved=on_saved on_cancel=on_cancel /> }
}

#[component]
fn AppUserDetailsPage(id: Option<String>) -> impl IntoView {
    let router = use_router();
    let on_saved = Callback::new(move |_| router.navigate("/users"));
    let on_cancel = Callback::new(move |_| router.navigate("/users"));

    view! { <AppUserDetails id=id on_saved=on_saved on_cancel=on_cancel /> }
}

#[component]
fn ToolDetailsPage(id: Option<String>) -> impl IntoView {
    let router = use_router();
    let on_saved = Callback::new(move |_| router.navigate("/tools"));
    let on_cancel = Callback::new(move |_| router.navigate("/tools"));

    view! { <ToolDetails id=id on_saved=on_saved on_cancel=on_cancel /> }
}

#[component]
fn RentalAgreementDetailsPage(id: Option<String>) -> impl IntoView {
    let router = use_router();
    let on_saved = Callback::new(move |_| router.navigate("/rental-agreements"));
    let on_cancel = Callback::new(move |_| router.navigate("/rental-agreements"));

    view! { <RentalAgreementDetails id=id on_saved=on_saved on_cancel=on_cancel /> }
}
