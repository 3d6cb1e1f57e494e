use std::collections::BTreeSet;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlOptionElement, HtmlSelectElement};

use crate::layout::LayoutAlgorithm;

fn selected_values(select: &HtmlSelectElement) -> BTreeSet<String> {
	let options = select.selected_options();
	(0..options.length())
		.filter_map(|i| options.item(i))
		.filter_map(|el| el.dyn_into::<HtmlOptionElement>().ok())
		.map(|opt| opt.value())
		.collect()
}

/// A labelled `<select multiple>` bound to a set of values.
#[component]
pub fn MultiSelect(
	#[prop(into)] label: String,
	#[prop(into)] options: Signal<Vec<String>>,
	selected: RwSignal<BTreeSet<String>>,
) -> impl IntoView {
	let on_change = move |ev: leptos::ev::Event| {
		let select: HtmlSelectElement = event_target(&ev);
		selected.set(selected_values(&select));
	};

	view! {
		<div class="control">
			<label>{label}</label>
			<select multiple on:change=on_change>
				<For
					each=move || options.get()
					key=|value| value.clone()
					children=move |value| {
						let is_selected = {
							let value = value.clone();
							move || selected.with(|s| s.contains(&value))
						};
						let text = value.clone();
						view! {
							<option value=value prop:selected=is_selected>
								{text}
							</option>
						}
					}
				/>
			</select>
		</div>
	}
}

/// Picker for the layout algorithm.
#[component]
pub fn LayoutSelect(selected: RwSignal<LayoutAlgorithm>) -> impl IntoView {
	let on_change = move |ev: leptos::ev::Event| {
		selected.set(LayoutAlgorithm::parse_or_default(&event_target_value(&ev)));
	};

	view! {
		<div class="control">
			<label>"Layout:"</label>
			<select on:change=on_change>
				{LayoutAlgorithm::ALL
					.into_iter()
					.map(|algorithm| {
						view! {
							<option
								value=algorithm.as_str()
								prop:selected=move || selected.get() == algorithm
							>
								{algorithm.as_str()}
							</option>
						}
					})
					.collect_view()}
			</select>
		</div>
	}
}
