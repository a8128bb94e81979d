use leptos::prelude::*;
use leptos::task::spawn_local;
use paydesk_shared::forms::{PASSWORD_MISMATCH, SignupForm};
use paydesk_shared::store::auth as auth_actions;

use crate::api::use_api;
use crate::components::banner::{StatusBanner, use_toasts};
use crate::store::use_store;
use crate::web::router::{Link, use_navigate};

#[component]
pub fn SignupPage() -> impl IntoView {
    let store = use_store();
    let api = use_api();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let form = RwSignal::new(SignupForm::default());

    let is_loading = move || store.with(|s| s.auth.flags.is_loading);
    let mismatch = move || form.with(SignupForm::password_mismatch);
    let error_msg = Signal::derive(move || {
        store.with(|s| s.auth.flags.error_message().map(str::to_string))
    });

    on_cleanup(move || auth_actions::reset(&store));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.with_untracked(SignupForm::to_request) {
            Ok(request) => request,
            Err(reason) => {
                toasts.error(reason);
                return;
            }
        };

        let api = api.clone();
        spawn_local(async move {
            if auth_actions::register(&api, &store, request).await.is_ok() {
                navigate("/dashboard");
            }
        });
    };

    let input_class = move || {
        if mismatch() {
            "input input-bordered input-error"
        } else {
            "input input-bordered"
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create Account"</h1>
                    <p class="text-base-content/70 mt-2">"Start managing your subscriptions today"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <StatusBanner message=error_msg on_dismiss=Callback::new(move |_: ()| auth_actions::reset(&store)) />

                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Full Name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                placeholder="John Doe"
                                on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.name.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email Address"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.email.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.password.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="confirm_password">
                                <span class="label-text">"Confirm Password"</span>
                            </label>
                            <input
                                id="confirm_password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.confirm_password.clone())
                                class=input_class
                                required
                            />
                            <Show when=mismatch>
                                <label class="label">
                                    <span class="label-text-alt text-error">{PASSWORD_MISMATCH}</span>
                                </label>
                            </Show>
                        </div>
                        <div class="form-control mt-6">
                            <button
                                type="submit"
                                class="btn btn-primary"
                                disabled=move || !form.with(|f| f.can_submit(is_loading()))
                            >
                                {move || if is_loading() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>

                        <div class="divider"></div>
                        <p class="text-sm text-center text-base-content/70">
                            "Already have an account? "
                            <Link to="/login" class="link link-primary font-bold">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
