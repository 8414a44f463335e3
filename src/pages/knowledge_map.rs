use leptos::prelude::*;

use crate::components::knowledge_map::{KnowledgeMapCanvas, LayoutConfig};

/// Knowledge map page: the tag graph filling the viewport.
#[component]
pub fn KnowledgeMapPage() -> impl IntoView {
	// a fresh seed per visit so the starting jitter differs between loads
	let config = LayoutConfig {
		seed: js_sys::Date::now() as u64,
		..Default::default()
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph" style="position: relative; width: 100vw; height: 100vh;">
				<KnowledgeMapCanvas config=config />
				<div class="graph-overlay">
					<h1>"Knowledge map"</h1>
					<p class="subtitle">"Click a tag to open its notes. Drag tags to rearrange. Scroll to zoom."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
