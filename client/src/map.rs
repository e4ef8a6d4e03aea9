use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use silvarion_shared::RegionRegistry;

use crate::fog::FogOverlay;
use crate::labels;
use crate::state::MapState;

/// Click closures held for the lifetime of the page. Re-initializing replaces
/// the whole set, detaching the old handlers first, so stale closures never
/// accumulate.
struct RegionBinding {
    element: Element,
    handler: Closure<dyn Fn()>,
}

thread_local! {
    static REGION_BINDINGS: RefCell<Vec<RegionBinding>> = const { RefCell::new(Vec::new()) };
}

/// Owns the settled truth and keeps region fills, labels, fog and the legend
/// signals in lockstep with it.
pub struct MapController {
    document: Document,
    registry: RegionRegistry,
    state: MapState,
    fog: FogOverlay,
    settled_view: RwSignal<BTreeSet<String>>,
    saved_view: RwSignal<bool>,
}

impl MapController {
    /// Restores persisted state, renders labels, and wires region clicks
    /// against the host page. Returns the handle the reveal/reset actions are
    /// dispatched through.
    pub fn init(
        document: Document,
        registry: RegionRegistry,
        state: MapState,
        settled_view: RwSignal<BTreeSet<String>>,
        saved_view: RwSignal<bool>,
    ) -> Rc<Self> {
        let fog = FogOverlay::new(document.clone());
        let controller = Rc::new(Self {
            document,
            registry,
            state,
            fog,
            settled_view,
            saved_view,
        });
        bootstrap(&controller);
        controller
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    fn install_label(&self, element: &Element, region_id: &str, layer: &Element) {
        let Some(region) = self.registry.get(region_id) else {
            web_sys::console::warn_1(
                &format!("No configuration found for region: {region_id}").into(),
            );
            return;
        };
        // Re-initialization would otherwise stack a second copy of the label.
        if let Some(stale) = self
            .document
            .get_element_by_id(&format!("label-g-{region_id}"))
        {
            stale.remove();
        }
        let Some((center_x, center_y)) = region_center(element) else {
            web_sys::console::warn_1(
                &format!("Could not measure region {region_id}; label skipped").into(),
            );
            return;
        };
        let anchor = labels::resolve_anchor(region, center_x, center_y);
        match labels::build_label(&self.document, region_id, region, anchor) {
            Ok(group) => {
                layer.append_child(&group).ok();
            }
            Err(err) => {
                web_sys::console::warn_1(
                    &format!("Failed to build label for region {region_id}: {err:?}").into(),
                );
            }
        }
    }

    /// Region fill, `settled` class, label `active` class and fog always move
    /// together; this is the only place any of them change.
    fn apply_region_visuals(&self, region_id: &str, settled: bool) {
        if let Some(element) = self.document.get_element_by_id(region_id) {
            let classes = element.class_list();
            let class_result = if settled {
                classes.add_1("settled")
            } else {
                classes.remove_1("settled")
            };
            class_result.ok();

            if let Some(styled) = element.dyn_ref::<web_sys::SvgElement>() {
                if settled {
                    // Regions missing from the registry keep default styling.
                    if let Some(region) = self.registry.get(region_id) {
                        styled.style().set_property("fill", region.color).ok();
                    }
                } else {
                    styled.style().remove_property("fill").ok();
                }
            }
        }
        labels::set_active(&self.document, region_id, settled);
        self.fog.sync_from_settled(region_id, settled);
    }

    fn on_region_click(&self, region_id: &str) {
        match self.state.toggle(region_id) {
            Ok(settled) => {
                self.apply_region_visuals(region_id, settled);
                self.publish();
            }
            Err(err) => {
                web_sys::console::error_1(
                    &format!("Failed to persist state for region {region_id}: {err}").into(),
                );
            }
        }
    }

    /// Settles a region visually without persisting it. Ids with no rendered
    /// element are a no-op.
    pub fn reveal_region(&self, region_id: &str) {
        if self.document.get_element_by_id(region_id).is_none() {
            return;
        }
        self.state.reveal(region_id);
        self.apply_region_visuals(region_id, true);
        self.publish();
    }

    /// Returns every region to hidden and wipes persisted progress.
    pub fn reset_all(&self) {
        let region_ids = known_region_ids(
            &self.registry,
            rendered_region_ids(&rendered_regions(&self.document)),
        );
        for region_id in &region_ids {
            self.apply_region_visuals(region_id, false);
        }
        self.state.reset(region_ids.iter().map(String::as_str));
        self.publish();
    }

    fn publish(&self) {
        self.settled_view.set(self.state.settled_ids());
        self.saved_view.set(self.state.has_saved_progress());
    }
}

/// Wires the controller against the host page's SVG: restores saved progress,
/// builds the label layer, and attaches one click handler per `.region`
/// element. Running it again replaces the previous wiring cleanly.
fn bootstrap(controller: &Rc<MapController>) {
    let rendered = rendered_regions(&controller.document);
    // Restore must cover rendered regions outside the registry too: they
    // toggle and persist like any other, so their flags read back on load.
    let restore_ids = known_region_ids(
        &controller.registry,
        rendered_region_ids(&rendered),
    );
    if let Err(err) = controller
        .state
        .restore(restore_ids.iter().map(String::as_str))
    {
        web_sys::console::error_1(&format!("Failed to restore saved progress: {err}").into());
    }

    let label_layer = controller
        .document
        .query_selector(".overlay-svg-text")
        .ok()
        .flatten();
    if label_layer.is_none() {
        web_sys::console::error_1(&"Text overlay layer not found; labels disabled".into());
    }

    REGION_BINDINGS.with(|slot| {
        for binding in slot.borrow_mut().drain(..) {
            binding
                .element
                .remove_event_listener_with_callback(
                    "click",
                    binding.handler.as_ref().unchecked_ref(),
                )
                .ok();
        }
    });

    let mut bindings = Vec::new();
    for element in rendered {
        let region_id = element.id();
        if region_id.is_empty() {
            web_sys::console::warn_1(&"Region element without an id; skipped".into());
            continue;
        }

        if let Some(layer) = &label_layer {
            controller.install_label(&element, &region_id, layer);
        }
        controller.apply_region_visuals(&region_id, controller.state.is_settled(&region_id));

        let handler = {
            let controller = Rc::clone(controller);
            let region_id = region_id.clone();
            Closure::<dyn Fn()>::new(move || controller.on_region_click(&region_id))
        };
        if element
            .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            bindings.push(RegionBinding { element, handler });
        }
    }

    REGION_BINDINGS.with(|slot| {
        *slot.borrow_mut() = bindings;
    });

    controller.publish();
}

fn region_center(element: &Element) -> Option<(f64, f64)> {
    let graphics = element.dyn_ref::<web_sys::SvgGraphicsElement>()?;
    let bbox = graphics.get_b_box().ok()?;
    let center_x = f64::from(bbox.x()) + f64::from(bbox.width()) / 2.0;
    let center_y = f64::from(bbox.y()) + f64::from(bbox.height()) / 2.0;
    Some((center_x, center_y))
}

fn rendered_regions(document: &Document) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(".region") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index)?.dyn_into::<Element>().ok())
        .collect()
}

fn rendered_region_ids(elements: &[Element]) -> impl Iterator<Item = String> + '_ {
    elements
        .iter()
        .map(Element::id)
        .filter(|region_id| !region_id.is_empty())
}

/// Every id the map tracks: the registry plus whatever the host page renders.
/// Restore and reset both work over this union, so a rendered region with no
/// registry entry keeps its persisted flag across reloads.
fn known_region_ids(
    registry: &RegionRegistry,
    rendered: impl IntoIterator<Item = String>,
) -> BTreeSet<String> {
    let mut region_ids: BTreeSet<String> = registry.ids().map(str::to_string).collect();
    region_ids.extend(rendered);
    region_ids
}

#[cfg(test)]
mod tests {
    use silvarion_shared::RegionRegistry;

    use super::known_region_ids;

    #[test]
    fn known_ids_union_the_registry_with_unregistered_rendered_regions() {
        let registry = RegionRegistry::kingdom();
        let region_ids =
            known_region_ids(&registry, ["reg3".to_string(), "ostrov_x".to_string()]);
        assert_eq!(region_ids.len(), registry.len() + 1);
        assert!(region_ids.contains("ostrov_x"));
        for region_id in registry.ids() {
            assert!(region_ids.contains(region_id), "missing {region_id}");
        }
    }

    #[test]
    fn known_ids_skip_nothing_when_the_page_renders_nothing() {
        let registry = RegionRegistry::kingdom();
        let region_ids = known_region_ids(&registry, std::iter::empty());
        assert_eq!(region_ids.len(), registry.len());
    }
}
