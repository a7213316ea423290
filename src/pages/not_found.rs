use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<main style="padding: 24px; font-family: system-ui, sans-serif;">
			<h1>"Page not found"</h1>
			<A href="/">"Back to the dependency graph"</A>
		</main>
	}
}
