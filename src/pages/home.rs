use leptos::prelude::*;

use crate::components::family_tree::{
	FamilyTreeCanvas, SelectedNodeInfo, ViewMode, family_data,
};

/// Default Home Page: the fullscreen family tree with its control and
/// details panels.
#[component]
pub fn Home() -> impl IntoView {
	let data = Signal::derive(family_data);
	let view_mode = RwSignal::new(ViewMode::Tree);
	let reset_requests = RwSignal::new(0u32);
	let selected = RwSignal::new(None::<SelectedNodeInfo>);
	let zoom_level = RwSignal::new(1.0f64);
	let show_info = RwSignal::new(true);

	let on_reset = move |_| reset_requests.update(|n| *n += 1);
	let on_toggle = move |_| {
		view_mode.update(|m| *m = m.toggled());
		selected.set(None);
	};
	let on_info = move |_| show_info.update(|v| *v = !*v);

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

			<div class="fullscreen-graph">
				<FamilyTreeCanvas
					data=data
					mode=view_mode
					reset_requests=reset_requests
					selected=selected
					zoom_level=zoom_level
					fullscreen=true
				/>
				<div class="graph-overlay">
					<h1>"Family Tree"</h1>
					<p class="subtitle">
						"Scroll to zoom, drag to pan, click on nodes to focus"
					</p>
					<div class="controls">
						<button on:click=on_reset>"Reset View"</button>
						<button on:click=on_toggle>
							{move || format!("Switch to {} View", view_mode.get().toggled().label())}
						</button>
						<button on:click=on_info>
							{move || if show_info.get() { "Hide Info" } else { "Show Info" }}
						</button>
						<span class="zoom-indicator">
							{move || format!("Zoom: {:.1}x", zoom_level.get())}
						</span>
					</div>
				</div>
				<Show when=move || show_info.get()>
					<div class="info-panel">
						<h3>"Family Details"</h3>
						{move || match selected.get() {
							Some(info) => {
								let show_children = info.depth < 2;
								view! {
									<div class="info-body">
										<p class="info-label">"Name"</p>
										<p class="info-value">{info.name.clone()}</p>
										<p class="info-label">"Generation"</p>
										<p class="info-value">{info.level_label}</p>
										<Show when=move || show_children>
											<p class="info-label">"Children"</p>
											<p class="info-value">{info.child_count}</p>
										</Show>
										<p class="info-hint">
											"Click on a family member to center the view on them."
										</p>
									</div>
								}
									.into_any()
							}
							None => view! {
								<p class="info-hint">
									"Hover over a family member to see their details."
								</p>
							}
								.into_any(),
						}}
						<div class="legend">
							<h4>"Legend"</h4>
							<div class="legend-entry">
								<span class="legend-swatch swatch-root"></span>
								<span>"Root"</span>
							</div>
							<div class="legend-entry">
								<span class="legend-swatch swatch-gen1"></span>
								<span>"Uncles & Aunts"</span>
							</div>
							<div class="legend-entry">
								<span class="legend-swatch swatch-leaf"></span>
								<span>"Children"</span>
							</div>
						</div>
					</div>
				</Show>
			</div>
		</ErrorBoundary>
	}
}
