//! App Root Component
//!
//! Single-page dashboard: header, actions, funnel and insight panels.

use leptos::*;

use signal_noise::insights::SystemClock;
use signal_noise::render::{TAGLINE, TITLE};
use signal_noise::store::{boot, generate, seed, ShellConfig};

use crate::api::{get_api_base, GlooClient};
use crate::components::{CohortSelector, FunnelChart, InsightCards};
use crate::state::{provide_ui_store, use_ui_store};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let store = provide_ui_store();
    let api = GlooClient::new(get_api_base());

    // Demo login and first fetch
    {
        let api = api.clone();
        spawn_local(async move {
            boot(&api, &store, &ShellConfig::default()).await;
        });
    }

    let visible = create_memo(move |_| store.with(|state| state.visible_insights()));

    view! {
        <div class="min-h-screen bg-gray-900 text-white">
            <main class="container mx-auto px-4 py-8 space-y-8">
                <header>
                    <h1 class="text-3xl font-bold">{TITLE}</h1>
                    <p class="text-gray-400 mt-1">{TAGLINE}</p>
                </header>

                <Actions api=api />

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Funnel"</h2>
                    <FunnelChart />
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Insights"</h2>
                    <InsightCards insights=visible />
                </section>
            </main>
        </div>
    }
}

/// Action bar: generate, replay demo data, cohort filter and status
#[component]
fn Actions(api: GlooClient) -> impl IntoView {
    let store = use_ui_store();

    let api_for_generate = api.clone();
    let on_generate = move |_| {
        let api = api_for_generate.clone();
        spawn_local(async move {
            if let Err(e) = generate(&api, &SystemClock, &store, &ShellConfig::default()).await {
                web_sys::console::error_1(&e.to_string().into());
            }
        });
    };

    let on_seed = move |_| {
        let api = api.clone();
        spawn_local(async move {
            if let Err(e) = seed(&api, &store).await {
                web_sys::console::error_1(&e.to_string().into());
            }
        });
    };

    let cohort = Signal::derive(move || store.with(|state| state.cohort()));
    let status = move || store.with(|state| state.status().to_string());

    let button = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";

    view! {
        <div class="flex flex-wrap items-center gap-4">
            <button
                on:click=on_generate
                class=format!("{} bg-primary-600 text-white hover:bg-primary-500", button)
            >
                "Generate Insights"
            </button>
            <button
                on:click=on_seed
                class=format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", button)
            >
                "Replay Demo Data"
            </button>

            <CohortSelector
                value=cohort
                on_change=move |cohort| store.select_cohort(cohort)
            />

            <span class="text-sm text-gray-400">{status}</span>
        </div>
    }
}
