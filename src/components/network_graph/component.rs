use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::layout::{LayoutOptions, LayoutStrategy};
use super::render;
use super::state::{BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, GraphOptions, NetworkGraphState};
use super::style::GraphStyle;
use super::types::{GraphData, GraphNode};

type SharedState = Rc<RefCell<Option<NetworkGraphState>>>;
type Listener<T> = Rc<RefCell<Option<Closure<T>>>>;

fn update(state: &SharedState, f: impl FnOnce(&mut NetworkGraphState)) {
	if let Some(ref mut s) = *state.borrow_mut() {
		f(s);
	}
}

/// Pushes the engine's selection into the signal the details panel reads.
fn sync_selection(state: &NetworkGraphState, selected: RwSignal<Option<GraphNode>>) {
	let current = state.selected_node().cloned();
	if selected.with_untracked(|s| *s != current) {
		selected.set(current);
	}
}

/// Maps a client-space point into canvas pixels, given the canvas's on-page
/// box `(left, top, width, height)` and its backing size.
fn client_to_surface(
	client: (f64, f64),
	rect: (f64, f64, f64, f64),
	size: (f64, f64),
) -> (f64, f64) {
	let (left, top, width, height) = rect;
	let (kx, ky) = if width > 0.0 && height > 0.0 {
		(size.0 / width, size.1 / height)
	} else {
		(1.0, 1.0)
	};
	((client.0 - left) * kx, (client.1 - top) * ky)
}

/// Pointer position in canvas pixels.
fn surface_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	client_to_surface(
		(ev.client_x() as f64, ev.client_y() as f64),
		(rect.left(), rect.top(), rect.width(), rect.height()),
		(canvas.width() as f64, canvas.height() as f64),
	)
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn listen(window: &Window, event: &str, listener: &Listener<dyn FnMut(MouseEvent)>) {
	if let Some(ref cb) = *listener.borrow() {
		if window
			.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
			.is_err()
		{
			warn!("could not listen for window {event}");
		}
	}
}

fn unlisten<T: ?Sized>(window: &Window, event: &str, listener: &Listener<T>) {
	if let Some(ref cb) = *listener.borrow() {
		let _ = window.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
	}
}

/// Everything the canvas keeps alive outside the reactive graph.
struct Handles {
	state: SharedState,
	animate: Listener<dyn FnMut()>,
	frame: Rc<Cell<Option<i32>>>,
	resize_cb: Listener<dyn FnMut()>,
	drag_move: Listener<dyn FnMut(MouseEvent)>,
	drag_end: Listener<dyn FnMut(MouseEvent)>,
}

impl Handles {
	/// Cancels the pending frame, detaches window listeners and drops the
	/// closures and engine state.
	fn stop(&self) {
		if let Some(window) = web_sys::window() {
			if let Some(id) = self.frame.take() {
				let _ = window.cancel_animation_frame(id);
			}
			unlisten(&window, "resize", &self.resize_cb);
			unlisten(&window, "mousemove", &self.drag_move);
			unlisten(&window, "mouseup", &self.drag_end);
		}
		self.animate.borrow_mut().take();
		self.resize_cb.borrow_mut().take();
		self.drag_move.borrow_mut().take();
		self.drag_end.borrow_mut().take();
		self.state.borrow_mut().take();
		debug!("network graph stopped");
	}
}

/// Contact network on a canvas, with zoom controls, legend, a details panel
/// for the selected contact and a summary line.
///
/// With a `focal` contact id, or a node tagged focal in `data`, the graph
/// uses the single-contact ring layout; otherwise the force-directed one.
#[component]
pub fn NetworkGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional, into)] focal: MaybeProp<String>,
	#[prop(default = true)] interactive: bool,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Listener<dyn FnMut()> = Rc::new(RefCell::new(None));
	let resize_cb: Listener<dyn FnMut()> = Rc::new(RefCell::new(None));
	let drag_move: Listener<dyn FnMut(MouseEvent)> = Rc::new(RefCell::new(None));
	let drag_end: Listener<dyn FnMut(MouseEvent)> = Rc::new(RefCell::new(None));
	let frame = Rc::new(Cell::new(None::<i32>));

	let handles = StoredValue::new_local(Handles {
		state: state.clone(),
		animate: animate.clone(),
		frame: frame.clone(),
		resize_cb: resize_cb.clone(),
		drag_move: drag_move.clone(),
		drag_end: drag_end.clone(),
	});
	on_cleanup(move || {
		handles.try_with_value(Handles::stop);
	});

	let selected = RwSignal::new(None::<GraphNode>);
	let style = Memo::new(move |_| {
		let focal = focal.get();
		data.with(|d| GraphStyle::for_strategy(&LayoutStrategy::resolve(d, focal.as_deref())))
	});

	// Window-level so a drag keeps panning outside the canvas.
	let state_dm = state.clone();
	*drag_move.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = surface_point(&canvas, &ev);
		update(&state_dm, |s| s.drag_to(x, y));
	}));
	let (state_de, drag_move_de, drag_end_de) = (state.clone(), drag_move.clone(), drag_end.clone());
	*drag_end.borrow_mut() = Some(Closure::new(move |_: MouseEvent| {
		update(&state_de, |s| s.pointer_up());
		if let Some(window) = web_sys::window() {
			unlisten(&window, "mousemove", &drag_move_de);
			unlisten(&window, "mouseup", &drag_end_de);
		}
	}));

	let (state_init, animate_init, resize_cb_init, frame_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), frame.clone());
	Effect::new(move |_| {
		let graph = data.get();
		let focal_id = focal.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		if let Some(ref mut s) = *state_init.borrow_mut() {
			s.set_data(graph, focal_id);
			sync_selection(s, selected);
			return;
		}

		let Some(window) = web_sys::window() else {
			warn!("no window; network graph not started");
			return;
		};
		let (default_w, default_h) = style.get_untracked().default_size;
		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((default_w, default_h))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.filter(|w| *w > 0.0)
						.unwrap_or(default_w)
				}),
				height.unwrap_or(default_h),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(mut ctx) = context_2d(&canvas) else {
			warn!("2d canvas context unavailable; network graph not started");
			return;
		};
		let options = GraphOptions {
			interactive,
			focal: focal_id,
			layout: LayoutOptions {
				seed: js_sys::Date::now() as u64,
				..LayoutOptions::default()
			},
		};
		*state_init.borrow_mut() = Some(NetworkGraphState::new(graph, options, w, h));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				update(&state_resize, |s| s.resize(nw, nh));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// Holds itself weakly so dropping it on cleanup ends the loop.
		let (state_anim, animate_inner, frame_anim) = (
			state_init.clone(),
			Rc::downgrade(&animate_init),
			frame_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			frame_anim.set(None);
			update(&state_anim, |s| {
				if s.needs_redraw {
					render::render(s, &mut ctx);
					s.needs_redraw = false;
				}
			});
			let Some(animate) = animate_inner.upgrade() else {
				return;
			};
			if let (Some(window), Some(cb)) = (web_sys::window(), &*animate.borrow()) {
				frame_anim.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			frame_init.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = surface_point(&canvas, &ev);
		let mut started = false;
		update(&state_md, |s| started = s.pointer_down(x, y));
		if !started {
			return;
		}
		if let Some(window) = web_sys::window() {
			listen(&window, "mousemove", &drag_move);
			listen(&window, "mouseup", &drag_end);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = surface_point(&canvas, &ev);
		update(&state_mm, |s| s.pointer_move(x, y));
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = surface_point(&canvas, &ev);
		update(&state_click, |s| {
			s.click(x, y);
			sync_selection(s, selected);
		});
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| update(&state_ml, |s| s.pointer_leave());

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		if !interactive {
			return;
		}
		ev.prevent_default();
		update(&state_wh, |s| s.wheel(ev.delta_y()));
	};

	let state_zi = state.clone();
	let on_zoom_in = move |_: MouseEvent| update(&state_zi, |s| s.zoom_by(BUTTON_ZOOM_IN));
	let state_zo = state.clone();
	let on_zoom_out = move |_: MouseEvent| update(&state_zo, |s| s.zoom_by(BUTTON_ZOOM_OUT));
	let state_reset = state.clone();
	let on_reset = move |_: MouseEvent| {
		update(&state_reset, |s| {
			s.reset();
			sync_selection(s, selected);
		})
	};

	// View closures must be Send, so the details panel reaches the engine
	// through a local arena handle.
	let state_close = StoredValue::new_local(state.clone());
	let details = move || {
		selected.get().map(|node| {
			view! {
				<div class="network-graph-details">
					<h3>{node.name}</h3>
					{node.email.map(|email| view! { <p>"Email: " {email}</p> })}
					{node.company.map(|company| view! { <p>"Company: " {company}</p> })}
					<button on:click=move |_| {
						state_close
							.with_value(|st| {
								update(
									st,
									|s| {
										s.clear_selection();
										sync_selection(s, selected);
									},
								)
							})
					}>"Close"</button>
				</div>
			}
		})
	};

	let legend = move || {
		style
			.get()
			.legend
			.iter()
			.map(|&(color, label)| {
				view! {
					<div class="legend-item">
						<span class="legend-swatch" style=format!("background: {color};")></span>
						<span>{label}</span>
					</div>
				}
			})
			.collect_view()
	};

	let cursor = if interactive { "display: block; cursor: grab;" } else { "display: block;" };
	let stats = move || {
		data.with(|d| (!d.is_empty()).then(|| style.with(|s| s.stats_line(d.nodes.len(), d.edges.len()))))
	};

	view! {
		<div class="network-graph">
			<div class="network-graph-surface">
				<canvas
					node_ref=canvas_ref
					class="network-graph-canvas"
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:click=on_click
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
					style=cursor
				/>
				<div class="network-graph-controls">
					<button on:click=on_zoom_in disabled={!interactive} title="Zoom in">"+"</button>
					<button on:click=on_zoom_out disabled={!interactive} title="Zoom out">"−"</button>
					<button on:click=on_reset disabled={!interactive} title="Reset view">"Reset"</button>
				</div>
				<div class="network-graph-legend">
					<div class="legend-title">"Legend"</div>
					{legend}
				</div>
			</div>
			{details}
			<p class="network-graph-stats">{stats}</p>
		</div>
	}
}
