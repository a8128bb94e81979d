//! 结账页
//!
//! 页面只负责收集网关选择与展示阶段，完整流程由共享库的 `run_checkout` 驱动。

use leptos::prelude::*;
use leptos::task::spawn_local;
use paydesk_shared::cache::StalenessPolicy;
use paydesk_shared::checkout::{
    CheckoutOutcome, CheckoutPhase, CheckoutRequest, Prefill, run_checkout,
};
use paydesk_shared::display::{checkout_cycle, checkout_features, format_inr};
use paydesk_shared::store::subscription::ACTIVATED_MESSAGE;
use paydesk_shared::store::{StoreHandle, plans as plan_actions, subscription as subscription_actions};
use paydesk_shared::{PaymentGateway, Plan};

use crate::api::use_api;
use crate::components::banner::{PageSpinner, StatusBanner, use_toasts};
use crate::components::navbar::Navbar;
use crate::config::use_config;
use crate::store::use_store;
use crate::web::razorpay::{RazorpayWidget, ensure_script};
use crate::web::router::{Link, use_navigate};

/// 可选网关：(网关, 说明)
const GATEWAYS: [(PaymentGateway, &str); 2] = [
    (PaymentGateway::Razorpay, "Cards · Netbanking · UPI"),
    (PaymentGateway::Paynpro, "Global payments gateway"),
];

#[component]
pub fn CheckoutPage(plan_id: String) -> impl IntoView {
    let store = use_store();
    let api = use_api();
    let config = use_config();
    let widget = RazorpayWidget::new(&config);

    // 计划列表为空时才加载；同时预加载支付控件脚本
    Effect::new({
        let api = api.clone();
        let script_src = widget.script_src().to_string();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                let _ = plan_actions::ensure_plans(&api, &store, StalenessPolicy::IfEmpty).await;
            });
            let script_src = script_src.clone();
            spawn_local(async move {
                if let Err(e) = ensure_script(&script_src).await {
                    log_warn!("[Checkout] {}", e);
                }
            });
        }
    });

    on_cleanup(move || subscription_actions::reset(&store));

    let plan = {
        let plan_id = plan_id.clone();
        Memo::new(move |_| store.with(|s| s.plans.find(&plan_id).cloned()))
    };
    let plans_settled = move || store.with(|s| s.plans.loaded_at.is_some() || s.plans.flags.is_error);

    view! {
        <Navbar />
        {move || match plan.get() {
            Some(plan) => view! {
                <CheckoutForm plan=plan widget=widget.clone() />
            }
            .into_any(),
            None if plans_settled() => view! {
                <div class="hero min-h-[60vh]">
                    <div class="hero-content text-center flex-col">
                        <h2 class="text-2xl font-bold">"Plan not found"</h2>
                        <Link to="/pricing" class="btn btn-primary">"Back to plans"</Link>
                    </div>
                </div>
            }
            .into_any(),
            None => view! { <PageSpinner /> }.into_any(),
        }}
    }
}

#[component]
fn CheckoutForm(plan: Plan, widget: RazorpayWidget) -> impl IntoView {
    let store = use_store();
    let api = use_api();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let gateway = RwSignal::new(PaymentGateway::Razorpay);
    let phase = RwSignal::new(CheckoutPhase::default());
    let error_msg = RwSignal::new(Option::<String>::None);

    let busy = move || {
        phase.with(CheckoutPhase::is_busy) || store.with(|s| s.subscription.flags.is_loading)
    };

    let plan_id = plan.id.clone();
    let on_pay = move |_| {
        let prefill = store
            .with_state(|s| {
                s.user().map(|u| Prefill {
                    name: u.name.clone(),
                    email: u.email.clone(),
                })
            })
            .unwrap_or_default();
        let selected = gateway.get_untracked();
        let plan_id = plan_id.clone();
        let api = api.clone();
        let widget = widget.clone();
        error_msg.set(None);

        spawn_local(async move {
            let request = CheckoutRequest {
                plan_id: &plan_id,
                gateway: selected,
                prefill,
            };
            let outcome = run_checkout(&api, &store, &widget, request, |p| {
                log_info!("[Checkout] {}", p);
                phase.set(p);
            })
            .await;

            match outcome {
                CheckoutOutcome::Completed => {
                    toasts.success(ACTIVATED_MESSAGE);
                    navigate("/dashboard");
                }
                CheckoutOutcome::GatewayUnavailable(message) => toasts.error(message),
                CheckoutOutcome::Dismissed => {}
                other => error_msg.set(other.message().map(str::to_string)),
            }
        });
    };

    let features = checkout_features(&plan).to_vec();
    let summary = format!("{} · {}", plan.name, checkout_cycle(&plan));
    let price = format_inr(plan.price);
    let pay_label = format!("Pay {}", price);

    view! {
        <div class="min-h-screen bg-base-200 py-10 px-4">
            <div class="max-w-5xl mx-auto">
                <Link to="/pricing" class="btn btn-ghost btn-sm mb-6">"← Back to plans"</Link>
                <h1 class="text-3xl font-bold">"Complete your order"</h1>
                <p class="text-base-content/70 mt-1 mb-8">"Review your plan and choose a payment method."</p>

                <div class="grid grid-cols-1 lg:grid-cols-5 gap-8">
                    <div class="lg:col-span-3 space-y-6">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h2 class="card-title text-2xl">{plan.name.clone()}</h2>
                                <p class="text-base-content/60">{plan.description.clone().unwrap_or_default()}</p>
                                <div class="flex items-baseline gap-2 mt-2">
                                    <span class="text-3xl font-extrabold">{price.clone()}</span>
                                    <span class="text-base-content/60">{checkout_cycle(&plan)}</span>
                                </div>
                                <ul class="mt-4 space-y-2">
                                    {features
                                        .into_iter()
                                        .map(|feature| view! {
                                            <li class="flex items-center gap-2 text-sm">
                                                <span class="text-success font-bold">"✓"</span>
                                                {feature}
                                            </li>
                                        })
                                        .collect_view()}
                                </ul>
                            </div>
                        </div>

                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h3 class="card-title">"Payment method"</h3>
                                {GATEWAYS
                                    .into_iter()
                                    .map(|(option, hint)| view! {
                                        <label class=move || if gateway.get() == option {
                                            "flex items-center gap-4 p-4 rounded-box border-2 border-primary bg-primary/5 cursor-pointer"
                                        } else {
                                            "flex items-center gap-4 p-4 rounded-box border border-base-300 cursor-pointer"
                                        }>
                                            <input
                                                type="radio"
                                                name="gateway"
                                                class="radio radio-primary"
                                                value=option.as_str()
                                                prop:checked=move || gateway.get() == option
                                                on:change=move |ev| gateway.set(PaymentGateway::from_form_value(&event_target_value(&ev)))
                                            />
                                            <div>
                                                <p class="font-bold">{option.label()}</p>
                                                <p class="text-xs text-base-content/60">{hint}</p>
                                            </div>
                                        </label>
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    </div>

                    <div class="lg:col-span-2">
                        <div class="card bg-base-100 shadow sticky top-24">
                            <div class="card-body">
                                <h3 class="text-sm font-bold uppercase tracking-wider text-base-content/60">"Order total"</h3>
                                <div class="flex justify-between items-center">
                                    <span>{summary}</span>
                                    <span class="text-2xl font-extrabold">{price.clone()}</span>
                                </div>
                                <StatusBanner message=error_msg />
                                <button class="btn btn-primary w-full mt-4" disabled=busy on:click=on_pay>
                                    {move || if busy() {
                                        view! { <span class="loading loading-spinner"></span> }.into_any()
                                    } else {
                                        pay_label.clone().into_any()
                                    }}
                                </button>
                                <p class="text-xs text-center text-base-content/50 mt-2">
                                    "By continuing you agree to our Terms of Service"
                                </p>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
