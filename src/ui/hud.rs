//! Plain-text HUD for the console binary.

use std::fmt::Write;

use crate::shared::*;

/// Render the farm as text: a status block, then the grid one row per line.
///
/// Cell legend: `..` untouched, `==` tilled, `~~` tilled and watered,
/// seed glyph while growing, crop glyph once ripe, `xx` withered. A `*`
/// after a planted cell means it was watered today.
pub fn render_farm(snapshot: &FarmSnapshot, registry: &CropRegistry) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Day {} | {:?} | {}",
        snapshot.day, snapshot.report.weather, snapshot.report.message
    );
    let _ = writeln!(
        out,
        "Money: {}  Energy: {}/{}  Water: {}/{}  Tool: {}",
        crate::economy::gold::format_gold(snapshot.money),
        snapshot.display_energy,
        snapshot.max_energy,
        snapshot.water_level,
        snapshot.max_water,
        tool_label(snapshot.selected_tool, registry)
    );

    for row in snapshot.plots.chunks(GRID_WIDTH) {
        let cells: Vec<String> = row
            .iter()
            .map(|plot| format!("{:>2}:{}", plot.id, cell(plot, registry)))
            .collect();
        let _ = writeln!(out, "{}", cells.join("  "));
    }

    if snapshot.sleeping {
        let _ = writeln!(out, "Zzz... waiting for the morning report.");
    }
    if let Some(message) = &snapshot.notification {
        let _ = writeln!(out, ">> {}", message);
    }
    out
}

fn cell(plot: &Plot, registry: &CropRegistry) -> String {
    match &plot.status {
        PlotStatus::Empty => "..".to_string(),
        PlotStatus::Tilled { watered: false } => "==".to_string(),
        PlotStatus::Tilled { watered: true } => "~~".to_string(),
        PlotStatus::Planted(crop) if crop.is_withered => "xx".to_string(),
        PlotStatus::Planted(crop) => {
            let glyph = registry
                .get(crop.crop)
                .map(|def| {
                    if crop.growth_stage >= def.growth_days {
                        def.crop_glyph
                    } else {
                        def.seed_glyph
                    }
                })
                .unwrap_or('?');
            let wet = if crop.is_watered { '*' } else { ' ' };
            format!("{}{}", glyph, wet)
        }
    }
}

fn tool_label(tool: Option<ToolKind>, registry: &CropRegistry) -> String {
    match tool {
        None => "none".to_string(),
        Some(ToolKind::Hoe) => "hoe".to_string(),
        Some(ToolKind::WateringCan) => "watering can".to_string(),
        Some(ToolKind::Basket) => "basket".to_string(),
        Some(ToolKind::Seed(seed)) => registry
            .get(seed)
            .map(|def| format!("{} seeds ({}g)", def.name, def.seed_cost))
            .unwrap_or_else(|| format!("{:?} seeds", seed)),
    }
}
