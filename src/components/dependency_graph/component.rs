use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use log::debug;

use crate::api::{ApiClient, SquadId};
use crate::config::{AppConfig, squad_route};

use super::filter::{ModeFilter, filter_graph};
use super::frame_loop::FrameLoop;
use super::loader::{EMPTY_MESSAGE, LoadState, Screen, load_dataset};
use super::render::{ArrowMarkers, HoverCard, Legend, NodeGlyph, NodeTooltip};
use super::simulation::{Point, SimulationConfig};
use super::state::{ClientRect, GraphViewState, NODE_RADIUS, ViewBox};
use super::style::{EdgeStyle, edge_endpoints};

const DIMMED_OPACITY: &str = "0.15";

/// Interactive squad dependency graph: fetches the directory, filters it by
/// interaction mode and squad name, and animates a force layout in SVG.
///
/// Nodes can be dragged; clicking one navigates to its squad page.
#[component]
pub fn DependencyGraphView() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let load_state = RwSignal::new(LoadState::Loading);
	let mode = RwSignal::new(ModeFilter::All);
	let search = RwSignal::new(String::new());

	spawn_local(async move {
		let client = ApiClient::new(config);
		let loaded = load_dataset(&client).await;
		// The signal is gone if the view was torn down mid-request.
		if load_state.try_set(loaded).is_some() {
			debug!("dependency graph unmounted before its data arrived");
		}
	});

	let screen = Memo::new(move |_| load_state.with(Screen::of));
	let graph = Memo::new(move |_| {
		let mode = mode.get();
		search.with(|search| {
			load_state.with(|state| {
				state
					.dataset()
					.map(|dataset| filter_graph(dataset, mode, search))
					.unwrap_or_default()
			})
		})
	});

	let sim_config = SimulationConfig::default();
	let view_box = ViewBox::from_config(&sim_config);
	let session = StoredValue::new_local(None::<GraphViewState>);
	let frame_loop = StoredValue::new_local(None::<FrameLoop>);
	let frame = RwSignal::new(Vec::<Point>::new());
	let hover = RwSignal::new(None::<HoverCard>);
	let navigate = StoredValue::new_local(use_navigate());

	// Every new filtered graph replaces the layout wholesale: the old loop is
	// cancelled before the new simulation exists.
	Effect::new(move |_| {
		let data = graph.get();
		frame_loop.update_value(|current| {
			current.take();
		});
		session.update_value(|current| {
			if let Some(old) = current.as_mut() {
				old.stop();
			}
		});
		hover.set(None);

		let squads = data.nodes.len();
		let state = GraphViewState::new(data, sim_config.clone());
		frame.set(state.positions());
		session.set_value(Some(state));

		let started = js_sys::Date::now();
		let mut announced = false;
		let driver = FrameLoop::new(move || {
			let next = session
				.try_update_value(|state| state.as_mut().and_then(GraphViewState::advance))
				.flatten();
			match next {
				Some(positions) => frame.try_set(positions).is_none(),
				None => {
					if !announced {
						announced = true;
						debug!(
							"layout of {squads} squads came to rest after {:.0} ms",
							js_sys::Date::now() - started
						);
					}
					false
				}
			}
		});
		driver.wake();
		frame_loop.set_value(Some(driver));
	});

	on_cleanup(move || {
		frame_loop.try_update_value(|current| {
			current.take();
		});
		session.try_update_value(|current| {
			if let Some(state) = current.as_mut() {
				state.stop();
			}
		});
	});

	let svg_ref = NodeRef::<leptos::svg::Svg>::new();
	let pointer = move |ev: &MouseEvent| -> Option<Point> {
		let svg = svg_ref.get()?;
		let rect = svg.get_bounding_client_rect();
		view_box.client_to_view(
			ClientRect {
				left: rect.left(),
				top: rect.top(),
				width: rect.width(),
				height: rect.height(),
			},
			ev.client_x() as f64,
			ev.client_y() as f64,
		)
	};
	let wake = move || {
		frame_loop.with_value(|current| {
			if let Some(driver) = current {
				driver.wake();
			}
		});
	};

	let on_pointer_move = move |ev: MouseEvent| {
		let Some(at) = pointer(&ev) else {
			return;
		};
		session.update_value(|state| {
			if let Some(state) = state.as_mut() {
				state.drag_to(at);
			}
		});
	};
	let on_pointer_release = move |_: MouseEvent| {
		let released = session
			.try_update_value(|state| state.as_mut().is_some_and(GraphViewState::end_drag))
			.unwrap_or(false);
		if released {
			wake();
		}
	};

	let links = move || {
		graph.with(|data| {
			let index = data.index_of();
			data.links
				.iter()
				.filter_map(|link| {
					let (source, target) = (*index.get(&link.source)?, *index.get(&link.target)?);
					let link = link.clone();
					let style = EdgeStyle::for_raw(link.interaction.as_deref());
					let path = move || {
						frame.with(|positions| {
							let (from, to) = (positions.get(source)?, positions.get(target)?);
							let (start, end) = edge_endpoints(*from, *to, NODE_RADIUS)?;
							Some(format!(
								"M{:.2},{:.2}L{:.2},{:.2}",
								start.x, start.y, end.x, end.y
							))
						})
						.unwrap_or_default()
					};
					let opacity = move || {
						hover.with(|card| match card {
							Some(card) if !link.touches(card.id) => DIMMED_OPACITY,
							_ => "0.9",
						})
					};
					Some(view! {
						<path
							d=path
							fill="none"
							stroke=style.color
							stroke-width="2"
							stroke-dasharray=style.dash_attr()
							stroke-opacity=opacity
							marker-end=style.marker_url()
						/>
					})
				})
				.collect_view()
		})
	};

	let nodes = move || {
		graph.with(|data| {
			data.nodes
				.iter()
				.enumerate()
				.map(|(index, node)| {
					let id: SquadId = node.id;
					let transform = move || {
						frame.with(|positions| {
							positions
								.get(index)
								.map(|at| format!("translate({:.2},{:.2})", at.x, at.y))
								.unwrap_or_default()
						})
					};
					let opacity = move || {
						hover.with(|card| match card {
							Some(card) if !card.highlights(id) => "0.3",
							_ => "1",
						})
					};
					let on_press = move |ev: MouseEvent| {
						ev.prevent_default();
						let Some(at) = pointer(&ev) else {
							return;
						};
						let grabbed = session
							.try_update_value(|state| {
								state.as_mut().is_some_and(|state| state.begin_drag(id, at))
							})
							.unwrap_or(false);
						if grabbed {
							wake();
						}
					};
					let on_enter = move |ev: MouseEvent| {
						let card = graph.with_untracked(|data| {
							data.node(id).map(|node| HoverCard {
								id,
								name: node.name.clone(),
								degree: data.degree(id),
								neighbors: data.neighbors(id),
								x: ev.page_x() as f64,
								y: ev.page_y() as f64,
							})
						});
						hover.set(card);
					};
					let on_click = move |_: MouseEvent| {
						let follow = session
							.try_update_value(|state| {
								state.as_mut().is_some_and(GraphViewState::take_click)
							})
							.unwrap_or(false);
						if follow {
							navigate.with_value(|navigate| {
								navigate(&squad_route(id), NavigateOptions::default())
							});
						}
					};

					view! {
						<g
							transform=transform
							opacity=opacity
							style="cursor: pointer;"
							on:mousedown=on_press
							on:mouseenter=on_enter
							on:mouseleave=move |_| hover.set(None)
							on:click=on_click
						>
							<NodeGlyph name=node.name.clone() group=node.group />
						</g>
					}
				})
				.collect_view()
		})
	};

	let summary = move || {
		graph.with(|data| format!("{} squads · {} dependencies", data.nodes.len(), data.links.len()))
	};

	view! {
		<section style="display: flex; flex-direction: column; gap: 12px;">
			{move || match screen.get() {
				Screen::Loading => {
					view! { <p style="color: #4a5568;">"Loading dependency graph..."</p> }
						.into_any()
				}
				Screen::Failed(message) => {
					view! { <p style="color: #e53e3e; font-weight: bold;">{message}</p> }.into_any()
				}
				Screen::Empty => view! { <p style="color: #4a5568;">{EMPTY_MESSAGE}</p> }.into_any(),
				Screen::Graph => {
					view! {
						<div style="display: flex; flex-wrap: wrap; align-items: center; gap: 12px;">
							<select
								prop:value=move || mode.get().as_value()
								on:change=move |ev| {
									mode.set(ModeFilter::from_value(&event_target_value(&ev)))
								}
							>
								{ModeFilter::options()
									.map(|(filter, label)| {
										view! { <option value=filter.as_value()>{label}</option> }
									})
									.collect_view()}
							</select>
							<input
								type="search"
								placeholder="Search squads..."
								prop:value=move || search.get()
								on:input=move |ev| search.set(event_target_value(&ev))
							/>
							<span style="font-size: 13px; color: #718096;">{summary}</span>
						</div>
						<svg
							node_ref=svg_ref
							viewBox=view_box.attr()
							preserveAspectRatio="xMidYMid meet"
							style="width: 100%; height: 600px; border: 1px solid #e2e8f0; border-radius: 8px; background: #fafafa; user-select: none;"
							on:mousemove=on_pointer_move
							on:mouseup=on_pointer_release
							on:mouseleave=on_pointer_release
						>
							<ArrowMarkers />
							<g>{links}</g>
							<g>{nodes}</g>
						</svg>
						<Legend />
					}
						.into_any()
				}
			}}
			{move || hover.get().map(|card| view! { <NodeTooltip card=card /> })}
		</section>
	}
}
