use leptos::prelude::*;
use quarknotes_knowledge_map::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(|| {
		view! { <App /> }
	})
}
