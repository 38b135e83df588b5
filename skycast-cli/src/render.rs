//! Plain-text rendering for the result panel and user-facing notices.

use skycast_core::{DayNightMode, RenderPayload};

fn banner(mode: DayNightMode) -> &'static str {
    match mode {
        DayNightMode::Day => "\u{2600} Daytime",
        DayNightMode::Night => "\u{263E} Night-time",
        DayNightMode::Neutral => "",
    }
}

pub fn result_panel(payload: &RenderPayload) {
    let banner = banner(payload.day_night);
    if !banner.is_empty() {
        println!("{banner}");
    }
    println!("{}", payload.location_label);
    println!("  Local time   {}", payload.display_time);
    println!("  Temperature  {}", payload.temperature_label);
    println!("  Clouds       {}", payload.cloud_label);
    println!("  Condition    {}", payload.condition_label);
}

pub fn alert(message: &str) {
    eprintln!("\u{26A0} {message}");
}

pub fn no_matches_notice(query: &str) {
    println!("No places matched {query:?}. Try another name.");
}
