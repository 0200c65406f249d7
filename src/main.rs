use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use vitality::audio::ChannelId;
use vitality::core::world::{ActionIntent, Simulation, Snapshot};
use vitality::data::profiles::{load_profile_catalog, ProfileCatalog};

const FRAME_DELTA: f32 = 1.0 / 60.0;

fn main() {
    println!("Initializing Vitality Sandbox...");
    let data_path = parse_data_path(env::args().collect());
    let catalog = match load_profile_catalog(&data_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!(
                "Failed to load actor profiles from {}: {}",
                data_path.display(),
                err
            );
            ProfileCatalog::demo()
        }
    };

    let mut sim = Simulation::new();
    for profile in &catalog.profiles {
        let id = sim.spawn_actor(profile);
        println!("  spawned {} as actor {}", profile.name, id);
    }

    let mut next_channel = 1u32;

    println!("Commands: status | damage <id> <amount> | heal <id> <amount> | regen <id> on|off | decay <id> on|off | bind <id> | kill <id> | tick [n] | quit");
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "quit" | "exit" => break,
            "status" => print_status(&sim.snapshot()),
            "damage" => match parse_id_amount(&parts) {
                Some((actor_id, amount)) => {
                    run(&mut sim, ActionIntent::Damage { actor_id, amount })
                }
                None => println!("Usage: damage <id> <amount>"),
            },
            "heal" => match parse_id_amount(&parts) {
                Some((actor_id, amount)) => run(&mut sim, ActionIntent::Heal { actor_id, amount }),
                None => println!("Usage: heal <id> <amount>"),
            },
            "regen" => match parse_id_flag(&parts) {
                Some((actor_id, enabled)) => {
                    run(&mut sim, ActionIntent::SetRegeneration { actor_id, enabled })
                }
                None => println!("Usage: regen <id> on|off"),
            },
            "decay" => match parse_id_flag(&parts) {
                Some((actor_id, enabled)) => {
                    run(&mut sim, ActionIntent::SetDecay { actor_id, enabled })
                }
                None => println!("Usage: decay <id> on|off"),
            },
            "bind" => match parts.get(1).and_then(|raw| raw.parse().ok()) {
                Some(actor_id) => {
                    let health_channel = ChannelId(next_channel);
                    let shield_channel = ChannelId(next_channel + 1);
                    let stamina_channel = ChannelId(next_channel + 2);
                    next_channel += 3;
                    run(
                        &mut sim,
                        ActionIntent::BindAudio {
                            actor_id,
                            health_channel,
                            shield_channel,
                            stamina_channel,
                        },
                    );
                    println!(
                        "  bound channels {}..{} to actor {}",
                        health_channel.0, stamina_channel.0, actor_id
                    );
                }
                None => println!("Usage: bind <id>"),
            },
            "kill" => match parts.get(1).and_then(|raw| raw.parse().ok()) {
                Some(actor_id) => run(&mut sim, ActionIntent::Kill { actor_id }),
                None => println!("Usage: kill <id>"),
            },
            "tick" => {
                let count: u64 = parts
                    .get(1)
                    .and_then(|raw| raw.parse().ok())
                    .unwrap_or(1);
                for _ in 0..count {
                    let snapshot = sim.tick(FRAME_DELTA, vec![ActionIntent::Wait]);
                    print_events(&snapshot);
                }
            }
            other => println!("Unknown command: {}", other),
        }
    }
    println!("Goodbye.");
}

fn run(sim: &mut Simulation, intent: ActionIntent) {
    let snapshot = sim.tick(FRAME_DELTA, vec![intent]);
    print_events(&snapshot);
}

fn print_status(snapshot: &Snapshot) {
    println!("Tick {}", snapshot.tick);
    let mut actors = snapshot.actors.clone();
    actors.sort_by_key(|actor| actor.id);
    for actor in actors {
        println!(
            "  {} {} [{:?}] {:.1}/{:.1} {}{}",
            actor.id,
            actor.name,
            actor.kind,
            actor.health.0,
            actor.health.1,
            if actor.alive { "alive" } else { "dead" },
            if actor.regenerating { " (regen armed)" } else { "" },
        );
    }
}

fn print_events(snapshot: &Snapshot) {
    for event in &snapshot.damage_events {
        println!(
            "  damage: actor {} now at {:.1}",
            event.actor_id, event.remaining
        );
    }
    for event in &snapshot.death_events {
        println!("  death: actor {} -> {:?}", event.actor_id, event.action);
    }
    for cue in &snapshot.cue_requests {
        println!(
            "  cue: actor {} plays {} on channel {}",
            cue.actor_id, cue.sound.0, cue.channel.0
        );
    }
    for warning in &snapshot.warnings {
        println!("  warn: {}", warning);
    }
}

fn parse_id_amount(parts: &[&str]) -> Option<(u32, f32)> {
    let actor_id = parts.get(1)?.parse().ok()?;
    let amount = parts.get(2)?.parse().ok()?;
    Some((actor_id, amount))
}

fn parse_id_flag(parts: &[&str]) -> Option<(u32, bool)> {
    let actor_id = parts.get(1)?.parse().ok()?;
    match *parts.get(2)? {
        "on" => Some((actor_id, true)),
        "off" => Some((actor_id, false)),
        _ => None,
    }
}

fn parse_data_path(args: Vec<String>) -> PathBuf {
    let mut path = PathBuf::from("./assets/data/actors.json");
    let mut iter = args.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--data" {
            if let Some(value) = iter.next() {
                path = PathBuf::from(value);
            }
        }
    }
    path
}
