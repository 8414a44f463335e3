use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, ResizeObserver, WheelEvent,
};

use super::layout::LayoutConfig;
use super::loader::{self, KNOWLEDGE_MAP_ENDPOINT};
use super::navigation;
use super::render;
use super::state::{Command, GraphEvent, GraphView};

const FRAME_DT: f64 = 0.016;

type SharedView = Rc<RefCell<Option<GraphView>>>;

/// Position of `ev` relative to the canvas' top-left corner.
fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Knowledge map of note tags, filling its parent element.
///
/// Loads the graph from `endpoint` once mounted, falling back to a canned
/// map when the request fails. Nodes can be dragged, the background panned
/// and the wheel zooms; clicking a tag opens the note gallery filtered on it.
#[component]
pub fn KnowledgeMapCanvas(
	#[prop(into, default = KNOWLEDGE_MAP_ENDPOINT.to_string())] endpoint: String,
	#[prop(optional)] config: LayoutConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedView = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let observer: Rc<RefCell<Option<ResizeObserver>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(container) = canvas.parent_element() else {
			warn!("knowledge map canvas has no container, not building the map");
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("no 2d context for the knowledge map");
			return;
		};

		let (w, h) = (container.client_width() as f64, container.client_height() as f64);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		*state_init.borrow_mut() = Some(GraphView::new(w, h, config.clone()));

		let (state_resize, canvas_resize, container_resize) =
			(state_init.clone(), canvas.clone(), container.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = (
				container_resize.client_width() as f64,
				container_resize.client_height() as f64,
			);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.handle(GraphEvent::Resize { width: nw, height: nh });
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			match ResizeObserver::new(cb.as_ref().unchecked_ref()) {
				Ok(ro) => {
					ro.observe(&container);
					*observer.borrow_mut() = Some(ro);
				}
				Err(e) => warn!("resize observer unavailable: {:?}", e),
			}
		}

		let (state_load, endpoint) = (state_init.clone(), endpoint.clone());
		spawn_local(async move {
			let data = loader::load_or_fallback(&endpoint).await;
			if let Some(ref mut s) = *state_load.borrow_mut() {
				s.handle(GraphEvent::DataLoaded(data));
			}
		});

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.handle(GraphEvent::Tick { dt: FRAME_DT });
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(window)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(window)) = (&*animate_init.borrow(), web_sys::window()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let cursor = match *state_mm.borrow_mut() {
			Some(ref mut s) => {
				s.pointer_move(x, y);
				s.cursor()
			}
			None => return,
		};
		if let Some(canvas) = canvas_ref.get() {
			let canvas: HtmlCanvasElement = canvas.into();
			let _ = HtmlElement::style(&canvas).set_property("cursor", cursor);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let command = state_mu.borrow_mut().as_mut().and_then(|s| s.pointer_up());
		if let Some(Command::Navigate(url)) = command {
			navigation::navigate(&url);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="knowledge-map"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; width: 100%; height: 100%; cursor: grab;"
		/>
	}
}
