//! Insight Cards Component

use leptos::*;

use signal_noise::render::{card_views, InsightCardView};
use signal_noise::insights::Insight;

/// One card per visible insight, in backend order
#[component]
pub fn InsightCards(#[prop(into)] insights: Signal<Vec<Insight>>) -> impl IntoView {
    view! {
        <div class="space-y-4">
            {move || {
                let cards = card_views(&insights.get());
                if cards.is_empty() {
                    view! {
                        <p class="text-gray-400 text-sm">"No insights to show."</p>
                    }.into_view()
                } else {
                    cards
                        .into_iter()
                        .map(|card| view! { <InsightCard card=card /> })
                        .collect_view()
                }
            }}
        </div>
    }
}

#[component]
fn InsightCard(card: InsightCardView) -> impl IntoView {
    view! {
        <div class="bg-gray-700 rounded-lg p-4">
            <div class="flex items-center justify-between">
                <h3 class="font-semibold text-gray-100">{card.title}</h3>
                <span class="text-sm text-primary-400">
                    {format!("Confidence {}", card.confidence)}
                </span>
            </div>
            <p class="text-gray-300 mt-2">{card.explanation}</p>
            <pre class="bg-gray-800 rounded mt-3 p-3 text-xs text-gray-400 overflow-x-auto">
                {card.payload}
            </pre>
        </div>
    }
}
