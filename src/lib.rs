//! Relationship and artifact graph dashboards, as a Leptos client-side app.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
pub mod config;
pub mod graph;
pub mod layout;
pub mod model;
mod pages;
pub mod pipeline;
pub mod present;

// Top-Level pages
use crate::pages::artifacts::ArtifactViewer;
use crate::pages::not_found::NotFound;
use crate::pages::relationships::RelationshipViewer;

/// Initialize logging and panic hooks for the WASM target.
///
/// Debug builds log at `Debug`, release builds at `Info`.
pub fn init_logging() {
	let level = if cfg!(debug_assertions) {
		Level::Debug
	} else {
		Level::Info
	};
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("Logging initialized at {level}");
}

/// Routes `/` to the relationship viewer and `/artifacts` to the artifact viewer.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Relationship Viewer" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="viewer">
				<A href="/">"Relationships"</A>
				" | "
				<A href="/artifacts">"Artifacts"</A>
			</nav>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=RelationshipViewer />
				<Route path=path!("/artifacts") view=ArtifactViewer />
			</Routes>
		</Router>
	}
}
