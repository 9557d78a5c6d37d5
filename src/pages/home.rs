use leptos::prelude::*;
use leptos_router::components::A;

use super::directory::sample_directory;
use crate::components::network_graph::{GraphData, NetworkGraphCanvas};

/// Link target and label for every contact, in directory order.
fn contact_links(data: &GraphData) -> Vec<(String, String)> {
	data.nodes
		.iter()
		.map(|node| (format!("/contacts/{}", node.id), node.name.clone()))
		.collect()
}

/// All contacts and how they relate.
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(sample_directory);
	let contacts = move || {
		graph_data
			.with(contact_links)
			.into_iter()
			.map(|(href, name)| {
				view! {
					<li>
						<A href=href>{name}</A>
					</li>
				}
			})
			.collect_view()
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

			<div class="network-page">
				<h1>"Your Network"</h1>
				<p class="subtitle">"Hover to highlight, click for details. Drag to pan, scroll to zoom."</p>
				<NetworkGraphCanvas data=graph_data />
				<h2>"Contacts"</h2>
				<ul class="contact-list">{contacts}</ul>
			</div>
		</ErrorBoundary>
	}
}
