use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use paydesk_shared::date::format_optional_date;
use paydesk_shared::display::{format_inr, payout_status_class};
use paydesk_shared::forms::{BankDetailsForm, IFSC_LENGTH};
use paydesk_shared::store::{StoreHandle, payout as payout_actions};

use crate::api::use_api;
use crate::components::banner::{StatusBanner, use_auto_clear};
use crate::components::navbar::Navbar;
use crate::store::use_store;

/// 保存成功提示的停留时间
const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(3);

#[component]
pub fn PayoutSettingsPage() -> impl IntoView {
    let store = use_store();
    let api = use_api();

    let form = RwSignal::new(store.with_state(|s| BankDetailsForm::from_user(s.user())));

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                let _ = payout_actions::fetch_history(&api, &store).await;
            });
        }
    });

    // 成功后 3 秒清除提示
    let succeeded = Memo::new(move |_| store.with(|s| s.payout.flags.is_success));
    use_auto_clear(succeeded, SUCCESS_RESET_DELAY, move || payout_actions::reset(&store));

    on_cleanup(move || payout_actions::reset(&store));

    let is_loading = move || store.with(|s| s.payout.flags.is_loading);
    let error_msg = Signal::derive(move || {
        store.with(|s| s.payout.flags.error_message().map(str::to_string))
    });
    let success_msg = Signal::derive(move || {
        store.with(|s| s.payout.flags.success_message().map(str::to_string))
    });
    let ifsc_hint = move || form.with(BankDetailsForm::ifsc_hint);
    let history = move || store.with(|s| s.payout.payouts.clone());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = form.with_untracked(BankDetailsForm::to_request);
        let api = api.clone();
        spawn_local(async move {
            let _ = payout_actions::update_bank_details(&api, &store, request).await;
        });
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <main class="max-w-5xl mx-auto p-4 md:p-8 space-y-8">
                <div>
                    <h1 class="text-3xl font-black">"Payout Settings"</h1>
                    <p class="text-base-content/60 mt-2">"Manage your bank details for automated payouts."</p>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                    <div class="space-y-6">
                        <div class="card bg-primary text-primary-content shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title">"Secure Transfers"</h3>
                                <p class="text-sm opacity-80">
                                    "Your bank details are encrypted and used only for processing subscription-related payouts."
                                </p>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h3 class="font-bold">"Requirements"</h3>
                                <ul class="text-sm space-y-2 text-base-content/70">
                                    <li>"✓ Account must be active"</li>
                                    <li>{format!("✓ IFSC code should be {} characters", IFSC_LENGTH)}</li>
                                    <li>"✓ Correct Beneficiary Name"</li>
                                </ul>
                            </div>
                        </div>
                    </div>

                    <div class="md:col-span-2">
                        <div class="card bg-base-100 shadow-xl">
                            <form class="card-body space-y-2" on:submit=on_submit>
                                <BankField
                                    label="Beneficiary Name"
                                    placeholder="Name as per bank records"
                                    value=Signal::derive(move || form.with(|f| f.beneficiary_name.clone()))
                                    on_input=Callback::new(move |v: String| form.update(|f| f.beneficiary_name = v))
                                />
                                <BankField
                                    label="Account Number"
                                    placeholder="Enter bank account number"
                                    value=Signal::derive(move || form.with(|f| f.account_no.clone()))
                                    on_input=Callback::new(move |v: String| form.update(|f| f.account_no = v))
                                />
                                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                    <div>
                                        <BankField
                                            label="IFSC Code"
                                            placeholder="SBIN00XXXX"
                                            value=Signal::derive(move || form.with(|f| f.ifsc.clone()))
                                            on_input=Callback::new(move |v: String| form.update(|f| f.ifsc = v.to_uppercase()))
                                        />
                                        {move || ifsc_hint().map(|hint| view! {
                                            <p class="text-xs text-warning mt-1">{hint}</p>
                                        })}
                                    </div>
                                    <BankField
                                        label="Bank Name"
                                        placeholder="State Bank of India"
                                        value=Signal::derive(move || form.with(|f| f.bank_name.clone()))
                                        on_input=Callback::new(move |v: String| form.update(|f| f.bank_name = v))
                                    />
                                </div>

                                <StatusBanner message=success_msg success=true />
                                <StatusBanner message=error_msg />

                                <button type="submit" class="btn btn-primary w-full mt-4" disabled=is_loading>
                                    {move || if is_loading() { "SAVING..." } else { "SAVE BANK DETAILS" }}
                                </button>
                            </form>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Recent Payouts"</h3>
                        <Show
                            when=move || store.with(|s| !s.payout.payouts.is_empty())
                            fallback=|| view! { <p class="text-sm text-base-content/50">"No payouts yet."</p> }
                        >
                            <div class="overflow-x-auto">
                                <table class="table table-sm">
                                    <thead>
                                        <tr>
                                            <th>"Reference"</th>
                                            <th>"Amount"</th>
                                            <th>"Status"</th>
                                            <th>"Date"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For
                                            each=history
                                            key=|p| p.id.clone()
                                            children=|p| {
                                                let badge = format!("px-2 py-1 rounded-full text-xs font-bold {}", payout_status_class(p.status));
                                                view! {
                                                    <tr>
                                                        <td class="font-mono text-xs">{p.payout_ref.clone().unwrap_or_else(|| p.id.clone())}</td>
                                                        <td class="font-bold">{format_inr(p.amount)}</td>
                                                        <td><span class=badge>{p.status.as_str()}</span></td>
                                                        <td>{format_optional_date(p.created_at)}</td>
                                                    </tr>
                                                }
                                            }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        </Show>
                    </div>
                </div>
            </main>
        </div>
    }
}

#[component]
fn BankField(
    label: &'static str,
    placeholder: &'static str,
    value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text font-bold">{label}</span>
            </label>
            <input
                type="text"
                class="input input-bordered"
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| on_input.run(event_target_value(&ev))
                required
            />
        </div>
    }
}
