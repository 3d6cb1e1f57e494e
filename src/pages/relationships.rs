use std::collections::BTreeSet;
use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, error};

use crate::components::{LayoutSelect, MultiSelect};
use crate::config::{DataSources, TypePalette};
use crate::graph::{RelationSnapshot, Selection};
use crate::layout::LayoutAlgorithm;
use crate::pipeline::{load_relation_snapshot, render_relationships};

/// Participants, relation types and relationships pickers over a raster graph.
#[component]
pub fn RelationshipViewer() -> impl IntoView {
	let sources = DataSources::default();
	let snapshot = LocalResource::new(move || {
		let sources = sources.clone();
		async move { load_relation_snapshot(&sources).await.map(Arc::new) }
	});

	view! {
		<div class="viewer">
			<h1>"Relationship Viewer"</h1>
			<Transition fallback=|| view! { <p>"Loading tables..."</p> }>
				<ErrorBoundary fallback=|errors| {
					view! {
						<p>"Could not load the relationship tables:"</p>
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
					{move || {
						snapshot
							.get()
							.map(|loaded| {
								loaded
									.map(|snapshot| view! { <RelationshipControls snapshot=snapshot /> })
							})
					}}
				</ErrorBoundary>
			</Transition>
		</div>
	}
}

#[component]
fn RelationshipControls(snapshot: Arc<RelationSnapshot>) -> impl IntoView {
	let all_labels = snapshot.labels().to_vec();
	let participants = RwSignal::new(snapshot.entity_names().into_iter().collect::<BTreeSet<_>>());
	let relation_types = RwSignal::new(BTreeSet::<String>::new());
	let relationships = RwSignal::new(all_labels.iter().cloned().collect::<BTreeSet<_>>());
	let relationship_options = RwSignal::new(all_labels);
	let layout = RwSignal::new(LayoutAlgorithm::Shell);
	let runs = RwSignal::new(0u32);

	// picking relation types narrows the relationships on offer
	let index = snapshot.type_index().clone();
	Effect::watch(
		move || relation_types.get(),
		move |groups: &BTreeSet<String>, _, _| {
			let labels = index.labels_for(groups);
			let value = if groups.is_empty() {
				BTreeSet::new()
			} else {
				labels.iter().cloned().collect()
			};
			debug!("relation types {:?} offer {} labels", groups, labels.len());
			relationship_options.set(labels);
			relationships.set(value);
		},
		false,
	);

	let participant_options = Signal::stored(snapshot.entity_names());
	let type_options = Signal::stored(snapshot.relation_types().to_vec());
	let palette = TypePalette::default();

	// nothing is drawn until the first Run; afterwards every change redraws
	let image = Memo::new(move |_| {
		if runs.get() == 0 {
			return None;
		}
		let selection = Selection {
			entities: participants.get(),
			relationships: relationships.get(),
		};
		Some(render_relationships(&snapshot, &selection, layout.get(), &palette))
	});

	let last_good = RwSignal::new(None::<String>);
	Effect::new(move |_| match image.get() {
		Some(Ok(src)) => last_good.set(Some(src)),
		Some(Err(e)) => error!("render failed: {e}"),
		None => {}
	});

	view! {
		<div class="controls">
			<MultiSelect label="Select Participants:" options=participant_options selected=participants />
			<MultiSelect label="Select type of relation:" options=type_options selected=relation_types />
			<MultiSelect
				label="Select Relationships:"
				options=relationship_options
				selected=relationships
			/>
			<LayoutSelect selected=layout />
		</div>
		<button class="run-btn" on:click=move |_| runs.update(|n| *n += 1)>
			"Run"
		</button>
		{move || {
			image
				.get()
				.and_then(|r| r.err())
				.map(|e| view! { <p class="error">{e.to_string()}</p> })
		}}
		{move || {
			last_good.get().map(|src| view! { <img class="network-graph" src=src /> })
		}}
	}
}
