use leptos::prelude::*;

use crate::components::dependency_graph::DependencyGraphView;

/// Landing page: the dependency map of every squad in the directory.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<main style="max-width: 1100px; margin: 0 auto; padding: 24px; font-family: system-ui, sans-serif;">
			<h1 style="margin-bottom: 4px;">"Squad Dependencies"</h1>
			<p style="margin-top: 0; color: #718096;">
				"Drag squads to rearrange the map. Click one to open its page."
			</p>
			<DependencyGraphView />
		</main>
	}
}
