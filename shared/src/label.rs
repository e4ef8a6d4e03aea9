/// A display name prepared for its map label: uppercased, possibly split onto
/// a second line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLines {
    pub primary: String,
    pub secondary: Option<String>,
}

const SPLIT_THRESHOLD_CHARS: usize = 10;

/// Uppercases the name and splits it on the first space when the result runs
/// past ten characters: first word on the primary line, everything else on the
/// second. A fixed heuristic, not measured text wrapping; the map artwork is
/// tuned against exactly this rule.
pub fn split_display_name(name: &str) -> LabelLines {
    let display = name.to_uppercase();
    if display.chars().count() > SPLIT_THRESHOLD_CHARS
        && let Some((first, rest)) = display.split_once(' ')
    {
        return LabelLines {
            primary: first.to_string(),
            secondary: Some(rest.to_string()),
        };
    }
    LabelLines {
        primary: display,
        secondary: None,
    }
}
