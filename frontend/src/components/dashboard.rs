use leptos::prelude::*;
use leptos::task::spawn_local;
use paydesk_shared::date::format_optional_date;
use paydesk_shared::display::format_inr;
use paydesk_shared::store::subscription as subscription_actions;

use crate::api::use_api;
use crate::components::banner::StatusBanner;
use crate::components::navbar::Navbar;
use crate::store::use_store;
use crate::web::router::{Link, use_navigate};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_store();
    let api = use_api();
    let navigate = use_navigate();

    // 初始加载
    Effect::new(move |_| {
        let api = api.clone();
        spawn_local(async move {
            let _ = subscription_actions::fetch_current(&api, &store).await;
        });
    });

    let first_name = move || {
        store.with(|s| s.user().map(|u| u.first_name().to_string()).unwrap_or_default())
    };
    let email = move || store.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default());
    let role = move || {
        store.with(|s| {
            s.user()
                .and_then(|u| u.role.clone())
                .unwrap_or_else(|| "User".to_string())
        })
    };
    let current = move || store.with(|s| s.subscription.current.clone());
    let has_subscription = move || store.with(|s| s.subscription.current.is_some());
    let error_msg = Signal::derive(move || {
        store.with(|s| s.subscription.flags.error_message().map(str::to_string))
    });

    let plan_name = move || {
        current()
            .and_then(|sub| sub.plan.map(|p| p.name))
            .unwrap_or_else(|| "No Active Plan".to_string())
    };
    let plan_description = move || {
        current()
            .and_then(|sub| sub.plan.and_then(|p| p.description))
            .unwrap_or_else(|| "You are not currently subscribed to any plan.".to_string())
    };
    let renews_on = move || format_optional_date(current().and_then(|sub| sub.end_date));
    let amount = move || {
        current()
            .and_then(|sub| sub.plan)
            .map(|p| format!("{} / {}", format_inr(p.price), p.billing_cycle))
            .unwrap_or_default()
    };
    let status = move || {
        current()
            .map(|sub| sub.status.as_str().to_string())
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <main class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
                <div>
                    <h1 class="text-3xl font-black">"Welcome back, " {first_name} "! 👋"</h1>
                    <p class="text-base-content/60 mt-2">"Manage your subscription and billing details below."</p>
                </div>

                <StatusBanner message=error_msg />

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-8">
                    <div class="lg:col-span-2 space-y-8">
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <div class="flex flex-col md:flex-row md:items-center justify-between gap-6">
                                    <div>
                                        <span class="badge badge-primary badge-outline font-bold uppercase mb-3">"Current Plan"</span>
                                        <h2 class="text-4xl font-black">{plan_name}</h2>
                                        <p class="text-base-content/60 mt-2">{plan_description}</p>
                                    </div>
                                    <Show
                                        when=has_subscription
                                        fallback=move || view! {
                                            <button class="btn btn-primary btn-lg" on:click=move |_| navigate("/pricing")>
                                                "UPGRADE NOW →"
                                            </button>
                                        }
                                    >
                                        <div class="stat bg-success/10 rounded-box w-auto">
                                            <div class="stat-title text-success">"Status"</div>
                                            <div class="stat-value text-success text-lg uppercase">{status}</div>
                                        </div>
                                    </Show>
                                </div>

                                <Show when=has_subscription>
                                    <div class="divider"></div>
                                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                                        <div>
                                            <p class="text-xs font-black uppercase text-base-content/50">"Renews on"</p>
                                            <p class="font-bold">{renews_on}</p>
                                        </div>
                                        <div>
                                            <p class="text-xs font-black uppercase text-base-content/50">"Amount"</p>
                                            <p class="font-bold">{amount}</p>
                                        </div>
                                    </div>
                                </Show>
                            </div>
                        </div>

                        <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                            <Link to="/billing-history" class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                                <div class="card-body">
                                    <h3 class="font-bold">"Billing History"</h3>
                                    <p class="text-sm text-base-content/60">"View all your past transactions and invoices."</p>
                                </div>
                            </Link>
                            <Link to="/pricing" class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                                <div class="card-body">
                                    <h3 class="font-bold">"Upgrade Plan"</h3>
                                    <p class="text-sm text-base-content/60">"Get more features and increase your limits."</p>
                                </div>
                            </Link>
                            <Link to="/payouts" class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                                <div class="card-body">
                                    <h3 class="font-bold">"Payout Settings"</h3>
                                    <p class="text-sm text-base-content/60">"Manage your bank details for automated payouts."</p>
                                </div>
                            </Link>
                        </div>
                    </div>

                    <div class="space-y-8">
                        <div class="card bg-neutral text-neutral-content shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title">"Need help? 🚀"</h3>
                                <p class="text-sm opacity-70">
                                    "Our support team is available 24/7 to help you with any subscription or billing queries."
                                </p>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h3 class="card-title">"Account Details"</h3>
                                <div class="flex justify-between">
                                    <span class="text-sm font-bold uppercase text-base-content/50">"Email"</span>
                                    <span class="text-sm font-bold">{email}</span>
                                </div>
                                <div class="flex justify-between">
                                    <span class="text-sm font-bold uppercase text-base-content/50">"Role"</span>
                                    <span class="text-sm font-bold uppercase">{role}</span>
                                </div>
                            </div>
                        </div>
                    </div>
                </div>
            </main>
        </div>
    }
}
