use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{FigureState, HoverTarget};

const TOOLTIP_PAD: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layer {
	Edges,
	Nodes,
	Overlays,
	Tooltip,
}

/// Bottom to top. Thumbnails sit above the small degree markers.
const PAINT_ORDER: [Layer; 4] = [Layer::Edges, Layer::Nodes, Layer::Overlays, Layer::Tooltip];

pub fn render(state: &FigureState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("white");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	for layer in PAINT_ORDER {
		match layer {
			Layer::Edges => draw_edges(state, ctx),
			Layer::Nodes => draw_nodes(state, ctx),
			Layer::Overlays => draw_overlays(state, ctx),
			Layer::Tooltip => draw_tooltip(state, ctx),
		}
	}
}

fn draw_edges(state: &FigureState, ctx: &CanvasRenderingContext2d) {
	for (i, edge) in state.figure.edges.iter().enumerate() {
		let hovered = state.hover.target == Some(HoverTarget::Edge(i));
		let (x0, y0) = state.to_screen(edge.from);
		let (x1, y1) = state.to_screen(edge.to);
		ctx.set_stroke_style_str(&edge.color);
		ctx.set_line_width(if hovered { 4.0 } else { 2.0 });
		ctx.begin_path();
		ctx.move_to(x0, y0);
		ctx.line_to(x1, y1);
		ctx.stroke();
	}
}

fn draw_overlays(state: &FigureState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	for overlay in &state.figure.overlays {
		let Some(img) = state.images.get(&overlay.key) else {
			continue;
		};
		// still loading, or the thumbnail does not exist
		if !img.complete() || img.natural_width() == 0 {
			continue;
		}
		let (x, y) = state.to_screen(overlay.at);
		let size = overlay.size * k;
		let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
			img,
			x - size / 2.0,
			y - size / 2.0,
			size,
			size,
		);
	}
}

fn draw_nodes(state: &FigureState, ctx: &CanvasRenderingContext2d) {
	let nodes = &state.figure.nodes;
	for (i, &p) in nodes.points.iter().enumerate() {
		let (x, y) = state.to_screen(p);
		ctx.begin_path();
		let _ = ctx.arc(x, y, nodes.marker_size, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&nodes.colors[i]);
		ctx.fill();
		ctx.set_line_width(if state.hover.target == Some(HoverTarget::Node(i)) {
			3.0
		} else {
			1.0
		});
		ctx.set_stroke_style_str("#444");
		ctx.stroke();
	}
}

fn draw_tooltip(state: &FigureState, ctx: &CanvasRenderingContext2d) {
	let Some(text) = state.hover_text() else {
		return;
	};
	ctx.set_font("12px sans-serif");
	let width = ctx
		.measure_text(text)
		.map(|m| m.width())
		.unwrap_or(text.len() as f64 * 7.0);
	let (w, h) = (width + 2.0 * TOOLTIP_PAD, 12.0 + 2.0 * TOOLTIP_PAD);
	let x = (state.hover.x + 12.0).min(state.width - w);
	let y = (state.hover.y + 12.0).min(state.height - h);

	ctx.set_fill_style_str("rgba(30, 30, 30, 0.85)");
	ctx.fill_rect(x, y, w, h);
	ctx.set_fill_style_str("white");
	ctx.set_text_baseline("top");
	ctx.set_text_align("left");
	let _ = ctx.fill_text(text, x + TOOLTIP_PAD, y + TOOLTIP_PAD);
}
