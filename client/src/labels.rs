use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use silvarion_shared::{RegionConfig, split_display_name};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Auto-centered anchors get the text baseline nudged below the centroid so a
/// possible second line sits visually centered.
const CENTER_Y_NUDGE: f64 = 10.0;
/// Two-line labels raise the primary line by the same amount.
const SPLIT_PRIMARY_RAISE: f64 = 10.0;
const SPLIT_LINE_HEIGHT: &str = "1.2em";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
}

/// Configured coordinates win; each axis falls back to the rendered centroid
/// independently.
pub fn resolve_anchor(region: &RegionConfig, center_x: f64, center_y: f64) -> LabelAnchor {
    LabelAnchor {
        x: region.label_x.unwrap_or(center_x),
        y: region.label_y.unwrap_or(center_y + CENTER_Y_NUDGE),
    }
}

/// Builds the `label-g-<id>` group for a region: a `label-text` element with
/// the uppercased name, split onto two lines by the shared heuristic. The
/// caller appends the group to the text overlay layer.
pub fn build_label(
    document: &Document,
    region_id: &str,
    region: &RegionConfig,
    anchor: LabelAnchor,
) -> Result<Element, JsValue> {
    let group = document.create_element_ns(Some(SVG_NS), "g")?;
    group.set_attribute("class", "label-group")?;
    group.set_attribute("id", &format!("label-g-{region_id}"))?;

    let text = document.create_element_ns(Some(SVG_NS), "text")?;
    text.set_attribute("class", "label-text")?;
    text.set_attribute("x", &anchor.x.to_string())?;

    let lines = split_display_name(region.name);
    match lines.secondary {
        Some(secondary) => {
            text.set_attribute("y", &(anchor.y - SPLIT_PRIMARY_RAISE).to_string())?;
            text.set_text_content(Some(&lines.primary));

            let tspan = document.create_element_ns(Some(SVG_NS), "tspan")?;
            tspan.set_attribute("x", &anchor.x.to_string())?;
            tspan.set_attribute("dy", SPLIT_LINE_HEIGHT)?;
            tspan.set_text_content(Some(&secondary));
            text.append_child(&tspan)?;
        }
        None => {
            text.set_attribute("y", &anchor.y.to_string())?;
            text.set_text_content(Some(&lines.primary));
        }
    }

    group.append_child(&text)?;
    Ok(group)
}

/// Toggles the `active` class on a region's label group. Missing labels
/// (skipped at bootstrap) are a no-op.
pub fn set_active(document: &Document, region_id: &str, active: bool) {
    let Some(group) = document.get_element_by_id(&format!("label-g-{region_id}")) else {
        return;
    };
    let classes = group.class_list();
    let result = if active {
        classes.add_1("active")
    } else {
        classes.remove_1("active")
    };
    result.ok();
}

#[cfg(test)]
mod tests {
    use silvarion_shared::RegionConfig;

    use super::resolve_anchor;

    const fn region(label_x: Option<f64>, label_y: Option<f64>) -> RegionConfig {
        RegionConfig {
            name: "Testov",
            color: "#123456",
            description: "Modrá",
            label_x,
            label_y,
            label_max_width: 120.0,
        }
    }

    #[test]
    fn configured_coordinates_win_over_the_centroid() {
        let anchor = resolve_anchor(&region(Some(1370.0), Some(270.0)), 10.0, 20.0);
        assert_eq!((anchor.x, anchor.y), (1370.0, 270.0));
    }

    #[test]
    fn centroid_fallback_nudges_y_down() {
        let anchor = resolve_anchor(&region(None, None), 640.0, 360.0);
        assert_eq!((anchor.x, anchor.y), (640.0, 370.0));
    }

    #[test]
    fn axes_fall_back_independently() {
        let anchor = resolve_anchor(&region(Some(900.0), None), 50.0, 60.0);
        assert_eq!((anchor.x, anchor.y), (900.0, 70.0));

        let anchor = resolve_anchor(&region(None, Some(480.0)), 50.0, 60.0);
        assert_eq!((anchor.x, anchor.y), (50.0, 480.0));
    }
}
