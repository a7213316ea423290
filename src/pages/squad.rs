use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

/// Landing page for a squad reached from the graph.
#[component]
pub fn SquadPage() -> impl IntoView {
	let params = use_params_map();
	let squad_id = move || params.read().get("id").unwrap_or_default();

	view! {
		<main style="padding: 24px; font-family: system-ui, sans-serif;">
			<h1>{move || format!("Squad {}", squad_id())}</h1>
			<A href="/">"Back to the dependency graph"</A>
		</main>
	}
}
