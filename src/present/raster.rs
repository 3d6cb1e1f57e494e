use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{EdgeSprite, RasterScene};
use crate::model::RenderError;

const ARROW_SIZE: f64 = 12.0;
const NODE_ALPHA: f64 = 0.6;

fn canvas_err(e: JsValue) -> RenderError {
	RenderError::Canvas(format!("{:?}", e))
}

/// Paint `scene` on an offscreen canvas and return it as a PNG data URL.
pub fn paint_to_data_url(scene: &RasterScene) -> Result<String, RenderError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| RenderError::Canvas("no document".into()))?;
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")
		.map_err(canvas_err)?
		.dyn_into()
		.map_err(|_| RenderError::Canvas("not a canvas".into()))?;
	canvas.set_width(scene.width as u32);
	canvas.set_height(scene.height as u32);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.map_err(canvas_err)?
		.ok_or_else(|| RenderError::Canvas("no 2d context".into()))?
		.dyn_into()
		.map_err(|_| RenderError::Canvas("not a 2d context".into()))?;

	ctx.set_fill_style_str("white");
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

	for edge in &scene.edges {
		draw_edge(&ctx, edge, scene.node_radius);
	}
	draw_nodes(&ctx, scene)?;
	for edge in &scene.edges {
		ctx.set_fill_style_str(&edge.color);
		ctx.set_font("10px sans-serif");
		ctx.set_text_align("center");
		ctx.fill_text(&edge.label, edge.label_at.0, edge.label_at.1)
			.map_err(canvas_err)?;
	}

	canvas.to_data_url_with_type("image/png").map_err(canvas_err)
}

fn draw_edge(ctx: &CanvasRenderingContext2d, edge: &EdgeSprite, node_radius: f64) {
	let ((x0, y0), (x1, y1), (cx, cy)) = (edge.from, edge.to, edge.control);

	// stop at the rim of the target disc, along the curve's end tangent
	let (tx, ty) = (x1 - cx, y1 - cy);
	let len = (tx * tx + ty * ty).sqrt().max(f64::EPSILON);
	let (ux, uy) = (tx / len, ty / len);
	let (tip_x, tip_y) = (x1 - ux * node_radius, y1 - uy * node_radius);

	ctx.set_global_alpha(NODE_ALPHA);
	ctx.set_stroke_style_str(&edge.color);
	ctx.set_line_width(2.0);
	ctx.begin_path();
	ctx.move_to(x0, y0);
	ctx.quadratic_curve_to(cx, cy, tip_x, tip_y);
	ctx.stroke();

	let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.set_fill_style_str(&edge.color);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(ctx: &CanvasRenderingContext2d, scene: &RasterScene) -> Result<(), RenderError> {
	for node in &scene.nodes {
		ctx.set_global_alpha(NODE_ALPHA);
		ctx.begin_path();
		ctx.arc(node.x, node.y, scene.node_radius, 0.0, 2.0 * PI)
			.map_err(canvas_err)?;
		ctx.set_fill_style_str(&node.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		ctx.set_fill_style_str("black");
		ctx.set_font("10px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		ctx.fill_text(&node.name, node.x, node.y).map_err(canvas_err)?;
	}
	Ok(())
}
