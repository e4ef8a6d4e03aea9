use wasm_bindgen::JsCast;
use web_sys::Document;

/// Cloud-overlay control. A region's fog may be several stacked layers; they
/// always toggle together as one unit.
pub struct FogOverlay {
    document: Document,
}

impl FogOverlay {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Idempotent. Unknown region ids match no layers and are a no-op.
    pub fn set_visible(&self, region_id: &str, visible: bool) {
        if region_id.is_empty() {
            return;
        }
        let selector = format!(".overlay-fog .fog-cloud[data-region=\"{region_id}\"]");
        let Ok(clouds) = self.document.query_selector_all(&selector) else {
            return;
        };
        for index in 0..clouds.length() {
            let Some(cloud) = clouds
                .item(index)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let classes = cloud.class_list();
            let result = if visible {
                classes.remove_1("hidden")
            } else {
                classes.add_1("hidden")
            };
            result.ok();
        }
    }

    /// Fog shows exactly while a region is unsettled.
    pub fn sync_from_settled(&self, region_id: &str, settled: bool) {
        self.set_visible(region_id, !settled);
    }
}
