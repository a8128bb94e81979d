use leptos::prelude::*;
use leptos::task::spawn_local;
use paydesk_shared::Plan;
use paydesk_shared::cache::StalenessPolicy;
use paydesk_shared::display::{format_inr, pricing_cycle};
use paydesk_shared::route::AppRoute;
use paydesk_shared::store::plans as plan_actions;

use crate::api::use_api;
use crate::components::banner::{PageSpinner, StatusBanner};
use crate::components::navbar::Navbar;
use crate::store::use_store;
use crate::web::router::{Link, use_navigate};

#[component]
pub fn PricingPage() -> impl IntoView {
    let store = use_store();
    let api = use_api();

    // 每次进入页面都重新获取
    Effect::new(move |_| {
        let api = api.clone();
        spawn_local(async move {
            let _ = plan_actions::ensure_plans(&api, &store, StalenessPolicy::Always).await;
        });
    });

    let is_authenticated = move || store.with(|s| s.is_authenticated());
    let plans_loading = move || store.with(|s| s.plans.flags.is_loading && s.plans.plans.is_empty());
    let error_msg = Signal::derive(move || {
        store.with(|s| {
            s.plans
                .flags
                .error_message()
                .or_else(|| s.subscription.flags.error_message())
                .map(str::to_string)
        })
    });
    let plans = move || store.with(|s| s.plans.plans.clone());

    view! {
        <Show when=is_authenticated>
            <Navbar />
        </Show>
        <Show when=move || !plans_loading() fallback=|| view! { <PageSpinner /> }>
            <div class="min-h-screen bg-base-200 py-16 px-4">
                <div class="max-w-7xl mx-auto">
                    <div class="text-center mb-12">
                        <h2 class="text-primary font-bold tracking-wide uppercase text-sm mb-3">"Simple Pricing"</h2>
                        <h1 class="text-4xl md:text-5xl font-extrabold mb-6">"Choose the right plan for you"</h1>
                        <p class="text-xl text-base-content/70 max-w-2xl mx-auto">
                            "Scale your business with our flexible subscription options. No hidden fees."
                        </p>
                    </div>

                    <div class="max-w-2xl mx-auto mb-8">
                        <StatusBanner message=error_msg />
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">
                        <For
                            each=plans
                            key=|plan| plan.id.clone()
                            children=move |plan| view! { <PlanCard plan=plan /> }
                        />
                    </div>

                    <Show when=move || !is_authenticated()>
                        <p class="text-center mt-12 text-base-content/70">
                            "Already subscribed? "
                            <Link to="/login" class="link link-primary">"Sign in"</Link>
                        </p>
                    </Show>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn PlanCard(plan: Plan) -> impl IntoView {
    let store = use_store();
    let navigate = use_navigate();

    let popular = plan.is_popular();
    let sub_loading = move || store.with(|s| s.subscription.flags.is_loading);
    let target = AppRoute::Checkout {
        plan_id: plan.id.clone(),
    }
    .to_path();

    let card_class = if popular {
        "card bg-base-100 border-2 border-primary shadow-2xl md:scale-105"
    } else {
        "card bg-base-100 shadow-xl"
    };
    let button_class = if popular {
        "btn btn-primary w-full"
    } else {
        "btn btn-neutral w-full"
    };

    view! {
        <div class=card_class>
            <div class="card-body">
                <Show when=move || popular>
                    <span class="badge badge-primary absolute -top-3 right-4 font-bold uppercase">"⚡ Popular"</span>
                </Show>
                <h3 class="card-title text-2xl">{plan.name.clone()}</h3>
                <p class="text-base-content/60 text-sm h-10 line-clamp-2">
                    {plan.description.clone().unwrap_or_default()}
                </p>
                <div class="flex items-baseline my-4">
                    <span class="text-4xl font-extrabold">{format_inr(plan.price)}</span>
                    <span class="text-base-content/60 ml-1">{pricing_cycle(&plan)}</span>
                </div>
                <button
                    class=button_class
                    disabled=sub_loading
                    on:click=move |_| navigate(&target)
                >
                    {move || if sub_loading() {
                        view! { <span class="loading loading-spinner"></span> }.into_any()
                    } else {
                        "Get Started".into_any()
                    }}
                </button>
                <p class="text-sm font-bold uppercase tracking-wider mt-6">"What's included:"</p>
                <ul class="space-y-3 mt-2">
                    {plan
                        .features
                        .iter()
                        .map(|feature| view! {
                            <li class="flex items-start gap-3">
                                <span class="text-success font-bold">"✓"</span>
                                <span class="text-sm text-base-content/80">{feature.clone()}</span>
                            </li>
                        })
                        .collect_view()}
                </ul>
                <div class="divider my-2"></div>
                <p class="text-xs text-base-content/60">"🛡 Secure checkout via Razorpay"</p>
            </div>
        </div>
    }
}
