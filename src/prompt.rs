use crate::types::GameState;

/// Model every prediction runs against.
pub const MODEL_ID: &str = "@cf/meta/llama-3.1-8b-instruct";

/// Returned as the playcall when the model answers without any text.
pub const FALLBACK_PLAYCALL: &str = "No response generated.";

/// Weather slider stops, indexed by `GameState::weather`.
pub const WEATHER_OPTIONS: [&str; 5] = [
    "Fair",
    "Light Rain",
    "Medium/Heavy Rain",
    "Light Snow",
    "Heavy Snow",
];

const UNKNOWN_WEATHER: &str = "Unknown";
const MISSING: &str = "unknown";
const NO_CONTEXT: &str = "none";

pub fn weather_label(index: Option<i64>) -> &'static str {
    index
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| WEATHER_OPTIONS.get(i).copied())
        .unwrap_or(UNKNOWN_WEATHER)
}

/// `m:ss`, minutes unpadded. A missing part counts as zero.
pub fn format_clock(minutes: Option<i64>, seconds: Option<i64>) -> String {
    format!("{}:{:02}", minutes.unwrap_or(0), seconds.unwrap_or(0))
}

fn show(v: Option<i64>) -> String {
    v.map_or_else(|| MISSING.to_string(), |n| n.to_string())
}

/// Linearize a game situation into the coordinator prompt.
///
/// Pure and total: absent fields become placeholder text, and free text is
/// inserted as-is.
pub fn build_prompt(gs: &GameState) -> String {
    let weather = weather_label(gs.weather);
    let clock = format_clock(gs.time_minutes, gs.time_seconds);
    let context = gs.additional_info.as_deref().unwrap_or(NO_CONTEXT);

    format!(
        "You are an expert football offensive coordinator. You prefer an aggressive approach, and employ many personnel varieties.

Current situation:
- Down: {down}
- Distance to 1st down: {distance} yards
- Field position (yard line): {yard_line}
- Quarter: {quarter}
- Time remaining in quarter: {clock}
- Score: Us {ours} - Them {theirs}
- Weather: {weather}
- Additional context: {context}

Recommend exactly ONE playcall (formation + play type + direction).
Explain briefly with both analytical (data-driven) and intuitive reasoning.
When you explain, you have to show how every piece of information drives your decision.
Keep it concise and practical for an in-game decision.",
        down = show(gs.down),
        distance = show(gs.distance),
        yard_line = show(gs.yard_line),
        quarter = show(gs.quarter),
        ours = show(gs.our_score),
        theirs = show(gs.their_score),
    )
}
