use leptos::prelude::*;

/// 404 - Not Found
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="viewer">
			<h1>"Page not found"</h1>
			<p>
				<a href="/">"Relationship Viewer"</a>
				" | "
				<a href="/artifacts">"Artifact Viewer"</a>
			</p>
		</div>
	}
}
