use std::io::{self, BufRead, Write};
use std::path::Path;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use valley_farm::input::{parse_command, send_command, PlayerCommand, HELP};
use valley_farm::narrative::{AlmanacSource, Narrator};
use valley_farm::session::{is_sleeping, snapshot, ValleyPlugin};
use valley_farm::shared::*;
use valley_farm::ui::hud::render_farm;

/// Frames to spend waiting on a morning report before giving up on the prompt.
const MAX_NIGHT_FRAMES: usize = 100_000;

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, LogPlugin::default()));

    let rules = match std::env::args().nth(1) {
        Some(path) => FarmRules::load_or_default(Path::new(&path)),
        None => FarmRules::default(),
    };
    let narrator = match rules.rng_seed {
        Some(seed) => Narrator::new(AlmanacSource::seeded(seed)),
        None => Narrator::new(AlmanacSource::from_entropy()),
    };

    app.insert_resource(rules)
        .insert_resource(narrator)
        .add_plugins(ValleyPlugin);

    // Loading -> Playing.
    app.update();
    app.update();

    println!("{}", HELP);
    print_farm(&app);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            PlayerCommand::Quit => break,
            PlayerCommand::Help => println!("{}", HELP),
            PlayerCommand::Show => print_farm(&app),
            other => {
                send_command(app.world_mut(), other);
                app.update();
                settle(&mut app);
                print_farm(&app);
            }
        }
    }

    println!("Goodbye from the valley.");
}

/// Keep ticking until the morning report has landed.
fn settle(app: &mut App) {
    let mut frames = 0;
    while is_sleeping(app.world()) && frames < MAX_NIGHT_FRAMES {
        app.update();
        std::thread::yield_now();
        frames += 1;
    }
}

fn print_farm(app: &App) {
    let world = app.world();
    let (Some(snap), Some(registry)) = (snapshot(world), world.get_resource::<CropRegistry>())
    else {
        return;
    };
    println!("{}", render_farm(&snap, registry));
}
