use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            handle_tool_selection
                .in_set(FarmSet::Input)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

pub const HELP: &str = "\
Commands:
  hoe | water | basket          pick a tool
  carrot | corn | pumpkin       pick a seed bag
  click <id> | <id>             use the tool on plot 0-24
  refill                        fill the watering can at the well
  sleep                         end the day
  reset                         start a fresh farm
  show                          print the farm
  help                          this text
  quit                          leave the valley";

/// One line of console input, decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Select(ToolKind),
    Click(PlotId),
    Refill,
    Sleep,
    Reset,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<PlayerCommand, String> {
    let lowered = line.trim().to_lowercase();
    let mut words = lowered.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".to_string());
    };

    let command = match head {
        "hoe" | "till" => PlayerCommand::Select(ToolKind::Hoe),
        "water" | "can" => PlayerCommand::Select(ToolKind::WateringCan),
        "basket" | "harvest" => PlayerCommand::Select(ToolKind::Basket),
        "carrot" => PlayerCommand::Select(ToolKind::Seed(SeedKind::Carrot)),
        "corn" => PlayerCommand::Select(ToolKind::Seed(SeedKind::Corn)),
        "pumpkin" => PlayerCommand::Select(ToolKind::Seed(SeedKind::Pumpkin)),
        "click" => {
            let id = words
                .next()
                .ok_or_else(|| "click needs a plot id".to_string())?;
            PlayerCommand::Click(parse_plot(id)?)
        }
        "refill" | "well" => PlayerCommand::Refill,
        "sleep" => PlayerCommand::Sleep,
        "reset" => PlayerCommand::Reset,
        "show" | "look" => PlayerCommand::Show,
        "help" | "?" => PlayerCommand::Help,
        "quit" | "exit" => PlayerCommand::Quit,
        other if other.chars().all(|c| c.is_ascii_digit()) => {
            PlayerCommand::Click(parse_plot(other)?)
        }
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected '{}' after '{}'", extra, head));
    }
    Ok(command)
}

fn parse_plot(text: &str) -> Result<PlotId, String> {
    text.parse::<PlotId>()
        .map_err(|e| format!("bad plot id '{}': {}", text, e))
}

/// Forward a command into the app as the matching input event.
/// `Show`, `Help` and `Quit` belong to the caller and send nothing.
pub fn send_command(world: &mut World, command: PlayerCommand) {
    match command {
        PlayerCommand::Select(tool) => {
            world.send_event(SelectToolEvent { tool });
        }
        PlayerCommand::Click(plot) => {
            world.send_event(PlotClickEvent { plot });
        }
        PlayerCommand::Refill => {
            world.send_event(RefillWaterEvent);
        }
        PlayerCommand::Sleep => {
            world.send_event(SleepRequestEvent);
        }
        PlayerCommand::Reset => {
            world.send_event(ResetSessionEvent);
        }
        PlayerCommand::Show | PlayerCommand::Help | PlayerCommand::Quit => {}
    }
}

/// Picking a tool is pure UI state and is allowed at any time.
fn handle_tool_selection(
    mut select_events: EventReader<SelectToolEvent>,
    mut selected: ResMut<SelectedTool>,
) {
    for event in select_events.read() {
        if selected.0 != Some(event.tool) {
            debug!("[Input] Selected {:?}", event.tool);
        }
        selected.0 = Some(event.tool);
    }
}
