//! Signal > Noise Dashboard
//!
//! Behavioral intelligence dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Automatic demo login and insight fetch on load
//! - Generate insights for the trailing week
//! - Replay demo data
//! - Client-side cohort filter
//! - Static product funnel
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. State transitions and view models come from the
//! `signal-noise` core crate; this crate supplies the browser HTTP client
//! and the components.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
