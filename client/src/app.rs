use leptos::prelude::*;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use silvarion_shared::{AppConfig, RegionConfig, RegionRegistry};

use crate::discovery;
use crate::map::MapController;
use crate::state::MapState;
use crate::storage::ProgressStore;

/// Newtype wrappers to give the legend signals distinct types for Leptos
/// context. (`SavedProgress` would otherwise collide with any other
/// `RwSignal<bool>` provided later.)
#[derive(Clone, Copy)]
pub(crate) struct SettledRegions(pub RwSignal<BTreeSet<String>>);
#[derive(Clone, Copy)]
pub(crate) struct SavedProgress(pub RwSignal<bool>);

thread_local! {
    static MAP_BINDING: RefCell<Option<Rc<MapController>>> = const { RefCell::new(None) };
}

fn with_controller(f: impl FnOnce(&MapController)) {
    MAP_BINDING.with(|slot| {
        if let Some(controller) = slot.borrow().as_ref() {
            f(controller);
        }
    });
}

/// Root application component. Renders the legend and, once mounted, wires
/// the map controller against the host page's inline SVG.
#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::kingdom();
    let registry = RegionRegistry::kingdom();

    let settled: RwSignal<BTreeSet<String>> = RwSignal::new(BTreeSet::new());
    let saved: RwSignal<bool> = RwSignal::new(false);

    provide_context(SettledRegions(settled));
    provide_context(SavedProgress(saved));

    // Boot against the host document on mount. The controller publishes the
    // restored state into the legend signals before this effect returns.
    Effect::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        document.set_title(config.map_title);

        let store = match ProgressStore::browser(config.storage_prefix) {
            Some(store) => store,
            None => {
                web_sys::console::error_1(
                    &"localStorage unavailable; progress lasts only until reload".into(),
                );
                ProgressStore::in_memory(config.storage_prefix)
            }
        };

        let controller =
            MapController::init(document, registry, MapState::new(store), settled, saved);
        if let Some(schedule) = config.schedule {
            discovery::start(&controller, &schedule);
        }

        MAP_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(controller);
        });
    });

    let on_save = move |_| {
        if let Some(window) = web_sys::window() {
            window.alert_with_message(config.save_message).ok();
        }
    };

    // A dismissed or failed confirm dialog leaves everything untouched.
    let on_reset = move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        if window
            .confirm_with_message(config.reset_confirm_message)
            .unwrap_or(false)
        {
            with_controller(|controller| controller.reset_all());
        }
    };

    view! {
        <aside class="legend">
            <header class="legend-header">
                <h1 class="legend-title">{config.map_title}</h1>
                <p class="legend-subtitle">{config.map_subtitle}</p>
                <SavedBadge />
            </header>
            <ul class="legend-regions">
                {registry
                    .iter()
                    .map(|(region_id, region)| view! { <LegendRow region_id region /> })
                    .collect_view()}
            </ul>
            <footer class="legend-actions">
                <button class="legend-button" data-action="save" on:click=on_save>
                    "Uložit postup"
                </button>
                <button class="legend-button" data-action="reset" on:click=on_reset>
                    "Začít znovu"
                </button>
            </footer>
        </aside>
    }
}

/// "Saved progress found" note, shown while any persisted key exists.
#[component]
fn SavedBadge() -> impl IntoView {
    let SavedProgress(saved) = expect_context();

    view! {
        {move || {
            saved.get().then(|| view! {
                <span class="legend-saved-badge">"Nalezen uložený postup"</span>
            })
        }}
    }
}

/// One legend entry: color swatch, name, and the note describing the region's
/// color on the physical map. Gets a check mark once the region is settled.
#[component]
fn LegendRow(region_id: &'static str, region: &'static RegionConfig) -> impl IntoView {
    let SettledRegions(settled) = expect_context();
    let discovered = Memo::new(move |_| settled.with(|ids| ids.contains(region_id)));

    view! {
        <li
            class="legend-region"
            class:discovered=move || discovered.get()
            data-region=region_id
        >
            <span class="legend-swatch" style:background-color=region.color />
            <span class="legend-name">{region.name}</span>
            <span class="legend-color">{region.description}</span>
            {move || {
                discovered
                    .get()
                    .then(|| view! { <span class="legend-check">{"\u{2713}"}</span> })
            }}
        </li>
    }
}
