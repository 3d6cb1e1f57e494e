use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::FigureState;
use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, DataSources};
use crate::present::Figure;

/// Shared between the frame loop and the unmount cleanup.
#[derive(Clone, Debug, Default)]
struct FrameLoop {
	stopped: Arc<AtomicBool>,
	frame: Arc<AtomicI32>,
}

impl FrameLoop {
	fn is_running(&self) -> bool {
		!self.stopped.load(Ordering::Relaxed)
	}

	fn record(&self, id: i32) {
		self.frame.store(id, Ordering::Relaxed);
	}

	/// Mark the loop stopped. Returns the pending frame the first time only.
	fn stop(&self) -> Option<i32> {
		if self.stopped.swap(true, Ordering::Relaxed) {
			None
		} else {
			Some(self.frame.load(Ordering::Relaxed))
		}
	}
}

fn local_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive canvas for a [`Figure`]: drag to pan, scroll to zoom, hover for details.
#[component]
pub fn FigureCanvas(
	#[prop(into)] figure: Signal<Figure>,
	#[prop(optional)] sources: DataSources,
	#[prop(default = CANVAS_WIDTH)] width: f64,
	#[prop(default = CANVAS_HEIGHT)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<FigureState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	let frames = FrameLoop::default();
	on_cleanup({
		let frames = frames.clone();
		move || {
			if let (Some(id), Some(window)) = (frames.stop(), web_sys::window()) {
				let _ = window.cancel_animation_frame(id);
				debug!("figure canvas: frame loop stopped");
			}
		}
	});

	Effect::new(move |_| {
		let figure = figure.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		debug!(
			"figure canvas: {} nodes, {} edges",
			figure.nodes.points.len(),
			figure.edges.len()
		);
		*state_init.borrow_mut() = Some(FigureState::new(figure, &sources, width, height));

		// one frame loop per canvas; later figures only swap the state
		if animate_init.borrow().is_some() {
			return;
		}
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};

		// the loop holds itself weakly so unmounting frees it
		let (state_anim, animate_inner) = (state_init.clone(), Rc::downgrade(&animate_init));
		let frames_anim = frames.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !frames_anim.is_running() {
				return;
			}
			if let Some(ref s) = *state_anim.borrow() {
				render::render(s, &ctx);
			}
			let Some(animate) = animate_inner.upgrade() else {
				return;
			};
			if let (Some(cb), Some(window)) = (&*animate.borrow(), web_sys::window()) {
				if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
					frames_anim.record(id);
				}
			}
		}));
		if let (Some(cb), Some(window)) = (&*animate_init.borrow(), web_sys::window()) {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frames.record(id);
			}
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pan.active = true;
			s.pan.start_x = x;
			s.pan.start_y = y;
			s.pan.transform_start_x = s.transform.x;
			s.pan.transform_start_y = s.transform.y;
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			} else {
				s.set_hover(x, y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pan.active = false;
			s.clear_hover();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="figure-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn frame_loop_stops_once() {
		let frames = FrameLoop::default();
		let handle = frames.clone();
		assert!(frames.is_running());
		handle.record(7);
		assert_eq!(frames.stop(), Some(7));
		assert!(!handle.is_running());
		assert_eq!(handle.stop(), None);
	}
}
