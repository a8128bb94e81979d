use leptos::prelude::*;

use crate::auth::logout;
use crate::config::use_config;
use crate::store::use_store;
use crate::web::router::{Link, use_navigate};

/// 已登录页面顶部的导航栏
#[component]
pub fn Navbar() -> impl IntoView {
    let store = use_store();
    let navigate = use_navigate();
    let brand = use_config().brand_name;

    let name = move || store.with(|s| s.user().map(|u| u.name.clone()).unwrap_or_default());
    let email = move || store.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default());
    let is_admin = move || store.with(|s| s.user().is_some_and(|u| u.is_admin()));

    let on_logout = move |_| {
        logout(&store);
        navigate("/");
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm sticky top-0 z-40 px-4 md:px-8">
            <div class="flex-1 gap-6">
                <Link to="/dashboard" class="btn btn-ghost text-xl font-bold">
                    <span class="w-8 h-8 bg-primary text-primary-content rounded-lg flex items-center justify-center">"⚡"</span>
                    {brand}
                </Link>
                <div class="hidden md:flex items-center gap-1">
                    <Link to="/dashboard" class="btn btn-ghost btn-sm">"Overview"</Link>
                    <Link to="/pricing" class="btn btn-ghost btn-sm">"Plans"</Link>
                    <Link to="/billing-history" class="btn btn-ghost btn-sm">"Billing"</Link>
                    <Link to="/payouts" class="btn btn-ghost btn-sm">"Payouts"</Link>
                    <Show when=is_admin>
                        <Link to="/admin/payouts" class="btn btn-ghost btn-sm text-secondary">"Admin"</Link>
                    </Show>
                </div>
            </div>
            <div class="flex-none gap-3">
                <div class="hidden sm:flex flex-col items-end">
                    <span class="text-sm font-bold">{name}</span>
                    <span class="text-xs text-base-content/60">{email}</span>
                </div>
                <button on:click=on_logout class="btn btn-ghost btn-circle" title="Logout">
                    <svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M17 16l4-4m0 0l-4-4m4 4H7m6 4v1a3 3 0 01-3 3H6a3 3 0 01-3-3V7a3 3 0 013-3h4a3 3 0 013 3v1" /></svg>
                </button>
            </div>
        </div>
    }
}
