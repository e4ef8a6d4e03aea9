/// Static per-region data: display name, settled fill color, the color note
/// shown in the legend, and optional label placement overrides.
///
/// `label_x`/`label_y` default to the region's rendered centroid when unset.
/// `label_max_width` is sized for the map artwork; the line-split heuristic in
/// [`crate::label`] does not consume it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionConfig {
    pub name: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub label_x: Option<f64>,
    pub label_y: Option<f64>,
    pub label_max_width: f64,
}

/// Read-only registry of every region on the map, plus the fixed order the
/// scripted discovery sequence reveals them in.
#[derive(Debug, Clone, Copy)]
pub struct RegionRegistry {
    entries: &'static [(&'static str, RegionConfig)],
    discovery_order: &'static [&'static str],
}

impl RegionRegistry {
    /// The deployed Silvarion kingdom map.
    pub const fn kingdom() -> Self {
        Self {
            entries: KINGDOM_REGIONS,
            discovery_order: KINGDOM_DISCOVERY_ORDER,
        }
    }

    pub fn get(&self, region_id: &str) -> Option<&'static RegionConfig> {
        self.entries
            .iter()
            .find(|(id, _)| *id == region_id)
            .map(|(_, region)| region)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static RegionConfig)> {
        self.entries.iter().map(|(id, region)| (*id, region))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every registry id exactly once, in reveal precedence order.
    pub fn discovery_order(&self) -> &'static [&'static str] {
        self.discovery_order
    }
}

const KINGDOM_DISCOVERY_ORDER: &[&str] = &[
    "reg1", "reg2", "reg8", "reg7", "reg3", "reg4", "reg10", "reg12", "reg5", "reg6", "reg13",
    "reg9", "reg14", "reg11", "reg15",
];

const KINGDOM_REGIONS: &[(&str, RegionConfig)] = &[
    (
        "reg1",
        RegionConfig {
            name: "Listoví",
            color: "#849570",
            description: "Šedá/Bílá",
            label_x: Some(260.0),
            label_y: None,
            label_max_width: 120.0,
        },
    ),
    (
        "reg2",
        RegionConfig {
            name: "Šeroles",
            color: "#98aa94",
            description: "Modrošedá",
            label_x: None,
            label_y: Some(480.0),
            label_max_width: 120.0,
        },
    ),
    (
        "reg3",
        RegionConfig {
            name: "Kamenné věže",
            color: "#a1acae",
            description: "Tmavá šedá",
            label_x: None,
            label_y: None,
            label_max_width: 120.0,
        },
    ),
    (
        "reg4",
        RegionConfig {
            name: "Jeskyně ozvěn",
            color: "#e0b5a7",
            description: "Žlutá",
            label_x: None,
            label_y: None,
            label_max_width: 120.0,
        },
    ),
    (
        "reg5",
        RegionConfig {
            name: "Čirná zátoka",
            color: "#fff3c9",
            description: "Světle zelená",
            label_x: None,
            label_y: None,
            label_max_width: 120.0,
        },
    ),
    (
        "reg6",
        RegionConfig {
            name: "Křišťálový Dvůr",
            color: "#f9dadf",
            description: "Fialová",
            label_x: Some(1030.0),
            label_y: None,
            label_max_width: 120.0,
        },
    ),
    (
        "reg7",
        RegionConfig {
            name: "Šeptající údolí",
            color: "#e1b5a8",
            description: "Hnědá",
            label_x: None,
            label_y: Some(740.0),
            label_max_width: 120.0,
        },
    ),
    (
        "reg8",
        RegionConfig {
            name: "Skalopád",
            color: "#bf9976",
            description: "Tmavě hnědá",
            label_x: None,
            label_y: Some(620.0),
            label_max_width: 120.0,
        },
    ),
    (
        "reg9",
        RegionConfig {
            name: "Stříbrohvozd",
            color: "#a8ccb3",
            description: "Tmavě zelená",
            label_x: Some(1370.0),
            label_y: Some(270.0),
            label_max_width: 120.0,
        },
    ),
    (
        "reg10",
        RegionConfig {
            name: "Zelené údolí",
            color: "#afc895",
            description: "Mátová",
            label_x: None,
            label_y: None,
            label_max_width: 120.0,
        },
    ),
    (
        "reg11",
        RegionConfig {
            name: "Sněhostep",
            color: "#8bbcd3ff",
            description: "Světle modrá",
            label_x: None,
            label_y: None,
            label_max_width: 120.0,
        },
    ),
    (
        "reg12",
        RegionConfig {
            name: "Svitobrod",
            color: "#e2959f",
            description: "Olivová",
            label_x: Some(900.0),
            label_y: None,
            label_max_width: 120.0,
        },
    ),
    (
        "reg13",
        RegionConfig {
            name: "Nekonečné planiny",
            color: "#f3d281",
            description: "Tmavě modrá",
            label_x: None,
            label_y: None,
            label_max_width: 120.0,
        },
    ),
    (
        "reg14",
        RegionConfig {
            name: "Jiskerné štíty",
            color: "#c4c0d9",
            description: "Tyrkysová",
            label_x: None,
            label_y: None,
            label_max_width: 120.0,
        },
    ),
    (
        "reg15",
        RegionConfig {
            name: "Nivaglen",
            color: "#ee9381",
            description: "Zelená",
            label_x: None,
            label_y: None,
            label_max_width: 120.0,
        },
    ),
];

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::RegionRegistry;

    #[test]
    fn discovery_order_is_a_permutation_of_the_registry() {
        let registry = RegionRegistry::kingdom();
        assert!(!registry.is_empty());
        let order = registry.discovery_order();
        assert_eq!(order.len(), registry.len());

        let unique: BTreeSet<&str> = order.iter().copied().collect();
        assert_eq!(unique.len(), order.len(), "duplicate id in discovery order");
        for region_id in order {
            assert!(
                registry.get(region_id).is_some(),
                "unknown region in discovery order: {region_id}"
            );
        }
    }

    #[test]
    fn colors_are_hex_encoded() {
        for (region_id, region) in RegionRegistry::kingdom().iter() {
            assert!(region.color.starts_with('#'), "{region_id}: {}", region.color);
            let digits = &region.color[1..];
            assert!(
                digits.len() == 6 || digits.len() == 8,
                "{region_id}: {}",
                region.color
            );
            assert!(
                digits.chars().all(|c| c.is_ascii_hexdigit()),
                "{region_id}: {}",
                region.color
            );
        }
    }

    #[test]
    fn lookup_finds_known_regions_only() {
        let registry = RegionRegistry::kingdom();
        assert_eq!(registry.get("reg3").map(|r| r.name), Some("Kamenné věže"));
        assert!(registry.get("reg99").is_none());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn label_overrides_survive_in_the_table() {
        let registry = RegionRegistry::kingdom();

        let both_axes = registry.get("reg9").unwrap();
        assert_eq!(both_axes.label_x, Some(1370.0));
        assert_eq!(both_axes.label_y, Some(270.0));

        let x_only = registry.get("reg1").unwrap();
        assert_eq!(x_only.label_x, Some(260.0));
        assert_eq!(x_only.label_y, None);

        let y_only = registry.get("reg8").unwrap();
        assert_eq!(y_only.label_x, None);
        assert_eq!(y_only.label_y, Some(620.0));
    }
}
