use leptos::prelude::*;

use crate::config::use_config;
use crate::web::router::Link;

#[component]
pub fn LandingPage() -> impl IntoView {
    let brand = use_config().brand_name;

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-xl">
                    <h1 class="text-5xl font-bold">{brand}</h1>
                    <p class="py-6 text-xl text-base-content/70">"Professional Subscription Solutions"</p>
                    <div class="flex justify-center gap-4">
                        <Link to="/login" class="btn btn-primary">"Login"</Link>
                        <Link to="/signup" class="btn btn-outline btn-primary">"Signup"</Link>
                        <Link to="/pricing" class="btn btn-ghost">"View plans"</Link>
                    </div>
                </div>
            </div>
        </div>
    }
}
