use std::collections::BTreeSet;
use std::sync::Arc;

use leptos::prelude::*;
use log::{error, info};

use crate::components::figure_canvas::FigureCanvas;
use crate::components::{LayoutSelect, MultiSelect};
use crate::config::DataSources;
use crate::graph::ArtifactGraph;
use crate::layout::LayoutAlgorithm;
use crate::pipeline::{artifact_figure, load_artifact_graph};
use crate::present::Figure;

/// Heroes and their artifacts as an interactive figure.
///
/// Every Run re-reads and re-joins both tables; the pickers keep their values
/// across runs.
#[component]
pub fn ArtifactViewer() -> impl IntoView {
	let sources = DataSources::default();
	let runs = RwSignal::new(0u32);
	let data = LocalResource::new({
		let sources = sources.clone();
		move || {
			let run = runs.get();
			let sources = sources.clone();
			async move {
				info!("loading artifact tables (run {run})");
				load_artifact_graph(&sources).await.map(Arc::new)
			}
		}
	});

	let nodes = RwSignal::new(BTreeSet::<String>::new());
	let artifacts = RwSignal::new(BTreeSet::<String>::new());
	let node_options = RwSignal::new(Vec::<String>::new());
	let artifact_options = RwSignal::new(Vec::<String>::new());
	let layout = RwSignal::new(LayoutAlgorithm::Spring);
	let seeded = StoredValue::new(false);

	// offer what the latest tables contain; select everything on first load
	Effect::new(move |_| {
		let Some(Ok(graph)) = data.get() else {
			return;
		};
		let names: Vec<String> = graph.graph().nodes.iter().map(|n| n.name.clone()).collect();
		let ids = graph.artifact_ids();
		if !seeded.get_value() {
			nodes.set(names.iter().cloned().collect());
			artifacts.set(ids.iter().cloned().collect());
			seeded.set_value(true);
		}
		node_options.set(names);
		artifact_options.set(ids);
	});

	view! {
		<div class="viewer">
			<h1>"Artifact Viewer"</h1>
			<div class="controls">
				<MultiSelect label="Select Nodes:" options=node_options selected=nodes />
				<MultiSelect label="Select Artifacts:" options=artifact_options selected=artifacts />
				<LayoutSelect selected=layout />
			</div>
			<button class="run-btn" on:click=move |_| runs.update(|n| *n += 1)>
				"Run"
			</button>
			<Transition fallback=|| view! { <p>"Loading tables..."</p> }>
				<ErrorBoundary fallback=|errors| {
					view! {
						<p>"Could not load the artifact tables:"</p>
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
						data.get()
							.map(|loaded| {
								loaded
									.map(|graph| {
										view! {
											<ArtifactFigure
												data=graph
												nodes=nodes
												artifacts=artifacts
												layout=layout
												sources=sources.clone()
											/>
										}
									})
							})
					}}
				</ErrorBoundary>
			</Transition>
		</div>
	}
}

#[component]
fn ArtifactFigure(
	data: Arc<ArtifactGraph>,
	nodes: RwSignal<BTreeSet<String>>,
	artifacts: RwSignal<BTreeSet<String>>,
	layout: RwSignal<LayoutAlgorithm>,
	sources: DataSources,
) -> impl IntoView {
	let figure = Memo::new(move |_| {
		artifact_figure(&data, &nodes.get(), &artifacts.get(), layout.get())
	});

	// a failed figure keeps the previous one on screen
	let last_good = RwSignal::new(Figure::default());
	Effect::new(move |_| match figure.get() {
		Ok(f) => last_good.set(f),
		Err(e) => error!("figure failed: {e}"),
	});

	view! {
		{move || figure.get().err().map(|e| view! { <p class="error">{e.to_string()}</p> })}
		<div class="network-graph">
			<FigureCanvas figure=last_good sources=sources />
		</div>
	}
}
