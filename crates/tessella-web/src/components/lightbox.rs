//! Lightbox overlay, frame and navigation controls.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdChevronLeft, LdChevronRight};
use tessella_core::lightbox::NavigationState;
use tessella_core::{ArrowHint, Bullet, InputRouter, MediaCatalog, SwipeTracker};
use wasm_bindgen::JsCast;
use web_time::Instant;

use crate::components::MediaView;
use crate::handle::LightboxHandle;
use crate::surface::FRAME_CHROME;

/// Props for the [`Lightbox`] component.
#[derive(Props, Clone)]
pub struct LightboxProps {
    handle: LightboxHandle,
    catalog: Rc<MediaCatalog>,
}

impl PartialEq for LightboxProps {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle && Rc::ptr_eq(&self.catalog, &other.catalog)
    }
}

/// Full-page overlay with the framed item on top. Renders nothing while
/// the lightbox is closed.
#[component]
pub fn Lightbox(props: LightboxProps) -> Element {
    let mut handle = props.handle;
    let mut router = use_signal(|| InputRouter::new(handle.controller.peek().gestures_enabled()));
    let mut swipe = use_signal(SwipeTracker::default);

    let controller = handle.controller.read();
    let Some(overlay_layer) = controller.visual().overlay_layer else {
        return rsx! {};
    };
    let tween = *handle.tween.read();
    let progress = tween
        .filter(|tween| Some(tween.step) == controller.visual().transition)
        .map_or(0.0, |tween| tween.progress);
    let shown = controller.visual().at_progress(progress);
    let nav = controller.navigation().copied();
    let bullets = controller.bullets();
    drop(controller);

    let arrow = *handle.arrow.read();

    let on_frame_click = move |evt: MouseEvent| {
        let Some(frame) = handle.controller.peek().visual().frame else {
            return;
        };
        let command = router.peek().route_click(
            evt.page_coordinates().x,
            &frame,
            FRAME_CHROME,
            clicked_link(&evt),
        );
        if let Some(command) = command {
            handle.navigate(command.target());
        }
    };

    let on_frame_hover = move |evt: MouseEvent| {
        let hint = {
            let controller = handle.controller.peek();
            let (Some(frame), Some(nav)) = (controller.visual().frame, controller.navigation())
            else {
                return;
            };
            router
                .peek()
                .route_hover(evt.page_coordinates().x, &frame, FRAME_CHROME, nav)
        };
        if *handle.arrow.peek() != hint {
            handle.arrow.set(hint);
        }
    };

    let on_touch_start = move |evt: TouchEvent| {
        if !*handle.gestures.peek() {
            return;
        }
        if let Some(point) = evt.data().touches_changed().first() {
            let at = point.page_coordinates();
            swipe.write().touch_start(at.x, at.y);
        }
    };

    let on_touch_end = move |evt: TouchEvent| {
        if !*handle.gestures.peek() {
            return;
        }
        let Some(point) = evt.data().touches_changed().into_iter().next() else {
            swipe.write().cancel();
            return;
        };
        let at = point.page_coordinates();
        let Some(direction) = swipe.write().touch_end(at.x, at.y) else {
            return;
        };
        if let Some(command) = router.write().route_swipe(direction, Instant::now()) {
            handle.navigate(command.target());
        }
    };

    rsx! {
        div {
            class: "tessella-overlay",
            style: "z-index: {overlay_layer}; opacity: {shown.overlay_opacity};",
            onclick: move |_| handle.close(),
            // Swipes count anywhere on the page, not just over the frame.
            ontouchstart: on_touch_start,
            ontouchend: on_touch_end,
            ontouchcancel: move |_| swipe.write().cancel(),
        }

        if let (Some(frame), Some(frame_layer)) = (shown.frame, shown.frame_layer) {
            div {
                class: "tessella-frame",
                style: "z-index: {frame_layer}; left: {frame.left}px; top: {frame.top}px; width: {frame.width}px; height: {frame.height}px;",
                onclick: on_frame_click,
                onmousemove: on_frame_hover,
                onmouseleave: move |_| handle.arrow.set(ArrowHint::Hidden),
                ontouchstart: on_touch_start,
                ontouchend: on_touch_end,
                ontouchcancel: move |_| swipe.write().cancel(),

                if let Some(index) = shown.content {
                    MediaView {
                        key: "{index}",
                        handle: handle,
                        catalog: Rc::clone(&props.catalog),
                        index: index,
                        opacity: shown.content_opacity,

                        if let Some(nav) = nav {
                            {render_navigation(&nav, &bullets, handle, router)}
                        }
                    }
                }

                {render_arrow(arrow)}
            }
        }
    }
}

/// Position label plus one bullet per item (when enabled).
fn render_navigation(
    nav: &NavigationState,
    bullets: &[Bullet],
    handle: LightboxHandle,
    router: Signal<InputRouter>,
) -> Element {
    rsx! {
        div { class: "tessella-nav",
            span { class: "tessella-position", "{nav.position_label()}" }

            if !bullets.is_empty() {
                span { class: "tessella-bullets",
                    for bullet in bullets.iter().copied() {
                        span {
                            key: "{bullet.index}",
                            class: if bullet.selected { "tessella-bullet tessella-bullet-selected" } else { "tessella-bullet" },
                            aria_label: "Show item {bullet.index + 1}",
                            onclick: move |evt: MouseEvent| {
                                evt.stop_propagation();
                                handle.navigate(router.peek().route_bullet(bullet.index).target());
                            },
                        }
                    }
                }
            }
        }
    }
}

fn render_arrow(arrow: ArrowHint) -> Element {
    match arrow {
        ArrowHint::Hidden => rsx! {},
        ArrowHint::Previous => rsx! {
            span { class: "tessella-arrow tessella-arrow-previous",
                Icon { width: 32, height: 32, icon: LdChevronLeft }
            }
        },
        ArrowHint::Next => rsx! {
            span { class: "tessella-arrow tessella-arrow-next",
                Icon { width: 32, height: 32, icon: LdChevronRight }
            }
        },
    }
}

/// Whether the click landed on (or inside) a link, which should follow
/// the link rather than navigate.
fn clicked_link(evt: &MouseEvent) -> bool {
    evt.data()
        .downcast::<web_sys::MouseEvent>()
        .and_then(|raw| raw.target())
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest("a").ok().flatten())
        .is_some()
}
