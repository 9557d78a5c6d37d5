use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use super::directory::sample_directory;
use super::not_found::NotFound;
use crate::components::network_graph::{NetworkGraphCanvas, NetworkStats};

/// One contact at the center of their direct relationships.
#[component]
pub fn ContactNetwork() -> impl IntoView {
	let params = use_params_map();
	let directory = StoredValue::new(sample_directory());
	let contact_id = move || params.with(|p| p.get("id").unwrap_or_default());

	let ego = Memo::new(move |_| {
		let id = contact_id();
		directory.with_value(|d| d.neighborhood(&id))
	});
	let graph_data = Signal::derive(move || ego.get().unwrap_or_default());
	let focal = Signal::derive(move || Some(contact_id()));
	let stats = Memo::new(move |_| {
		let id = contact_id();
		directory.with_value(|d| NetworkStats::for_contact(d, &id))
	});
	let name = move || ego.with(|g| g.as_ref().and_then(|g| g.focal()).map(|n| n.name.clone()));

	view! {
		<Show when=move || ego.with(Option::is_some) fallback=|| view! { <NotFound /> }>
			<div class="network-page">
				<A href="/">"← All contacts"</A>
				<h1>{name}</h1>
				<NetworkGraphCanvas data=graph_data focal=focal />
				<dl class="network-stats">
					<dt>"Knows"</dt>
					<dd>{move || stats.get().people_they_know}</dd>
					<dt>"Known by"</dt>
					<dd>{move || stats.get().people_who_know_them}</dd>
					<dt>"Referrers"</dt>
					<dd>{move || stats.get().referrers}</dd>
					<dt>"Total connections"</dt>
					<dd>{move || stats.get().total_connections}</dd>
				</dl>
			</div>
		</Show>
	}
}
