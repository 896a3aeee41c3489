//! Cohort Selector Component

use leptos::*;

use signal_noise::insights::Cohort;

/// Drop-down over all cohorts; filtering happens in the store
#[component]
pub fn CohortSelector(
    #[prop(into)] value: Signal<Cohort>,
    on_change: impl Fn(Cohort) + 'static,
) -> impl IntoView {
    let on_select = move |ev: ev::Event| {
        match event_target_value(&ev).parse::<Cohort>() {
            Ok(cohort) => on_change(cohort),
            Err(e) => web_sys::console::warn_1(&e.to_string().into()),
        }
    };

    view! {
        <select
            on:change=on_select
            class="bg-gray-700 text-gray-200 rounded-lg px-3 py-2 text-sm"
        >
            {Cohort::ALL
                .into_iter()
                .map(|cohort| view! {
                    <option
                        value=cohort.as_str()
                        selected=move || value.get() == cohort
                    >
                        {cohort.label()}
                    </option>
                })
                .collect::<Vec<_>>()}
        </select>
    }
}
