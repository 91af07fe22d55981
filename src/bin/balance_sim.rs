//! Monte Carlo balance harness CLI (spec §6). Drives the combat core
//! through many seeded duels and reports outcome statistics; everything
//! here is a thin consumer of `combat_core` — no combat logic lives in
//! this binary.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use combat_core::external::{CombatantRoster, EntityManager};
use combat_core::model::{build_combatant, CreatureDefinition, EntityId, Faction, GridPos};
use combat_core::rng::LcgRng;
use combat_core::scheduler::{TurnOrder, STANDARD_ACTION_DELAY};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "balance_sim", about = "Seeded Monte Carlo combat balance harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Console,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Run N seeded duels between two creature definitions and report win rates.
    Duel {
        a: PathBuf,
        b: PathBuf,
        #[arg(long, default_value_t = 1000)]
        iterations: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        output: OutputFormat,
        #[arg(long, default_value_t = 200)]
        max_turns: u32,
    },
    /// Run a group encounter scenario. Spawning/loot composition is out
    /// of the combat core's scope; this validates arguments only.
    Group {
        scenario: PathBuf,
        #[arg(long, default_value_t = 1000)]
        iterations: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Sweep a named stat across a range of values against a fixed opponent.
    Variation {
        scenario: PathBuf,
        #[arg(long)]
        stat: String,
        #[arg(long, default_value_t = 1000)]
        iterations: u32,
    },
    /// Like `variation`, but the base creature is provided as inline JSON.
    VariationInline {
        #[arg(long)]
        inline: String,
        #[arg(long)]
        stat: String,
        #[arg(long, default_value_t = 1000)]
        iterations: u32,
    },
    /// Cross every creature in a roster against every other.
    Matrix {
        roster: PathBuf,
        #[arg(long, default_value_t = 200)]
        iterations: u32,
    },
    /// List creature definitions available in a directory.
    List { directory: PathBuf },
    /// Print the derived stats for a single creature definition.
    Info { creature: PathBuf },
}

fn load_creature(path: &PathBuf) -> Result<CreatureDefinition> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let def = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
        _ => serde_json::from_str(&text)?,
    };
    Ok(def)
}

/// Runs one duel to completion (or `max_turns`), each combatant attacking
/// with its first attack on its turn. Returns the winning faction, or
/// `None` on a max-turns draw.
fn run_duel(a: &CreatureDefinition, b: &CreatureDefinition, seed: u64, max_turns: u32) -> (Option<Faction>, u32) {
    let mut roster = CombatantRoster::new();
    roster.add(build_combatant(EntityId(1), a, Faction::Player, GridPos::new(0, 0)).expect("valid creature a"));
    roster.add(build_combatant(EntityId(2), b, Faction::Hostile, GridPos::new(1, 0)).expect("valid creature b"));

    let mut rng = LcgRng::seed_from_u64(seed);
    let mut turns = 0u32;

    loop {
        if turns >= max_turns {
            return (None, turns);
        }

        let ids = roster.all_ids();
        let mut combatants: Vec<_> = ids.iter().filter_map(|id| roster.remove(*id)).collect();
        let next_idx = {
            let mut order = TurnOrder::new(&mut combatants, STANDARD_ACTION_DELAY);
            order.next(&mut rng)
        };
        let acted = next_idx.is_some();
        for c in combatants {
            roster.add(c);
        }
        if !acted {
            break;
        }
        turns += 1;

        let attacker_id = EntityId(if turns % 2 == 1 { 1 } else { 2 });
        let target_id = EntityId(if turns % 2 == 1 { 2 } else { 1 });
        let attack = roster.get(attacker_id).and_then(|c| c.attacks.first().cloned());
        if let (Some(attacker), Some(attack)) = (roster.get(attacker_id), attack) {
            let attacker = attacker.clone();
            if let Some(target) = roster.get(target_id) {
                let outcome = combat_core::combat::resolve_attack(&attacker, target, &attack, &mut rng);
                if outcome.hit {
                    if let Some(target_mut) = roster.get_mut(target_id) {
                        combat_core::combat::apply_typed_damage(target_mut, outcome.raw_damage, attack.damage_type);
                    }
                }
            }
        }

        let living_factions: std::collections::HashSet<_> = roster.living().map(|c| c.faction).collect();
        if living_factions.len() <= 1 {
            return (living_factions.into_iter().next(), turns);
        }
    }

    let living_factions: std::collections::HashSet<_> = roster.living().map(|c| c.faction).collect();
    (living_factions.into_iter().next(), turns)
}

fn cmd_duel(a: PathBuf, b: PathBuf, iterations: u32, seed: u64, output: OutputFormat, max_turns: u32) -> Result<()> {
    let def_a = load_creature(&a)?;
    let def_b = load_creature(&b)?;

    let mut a_wins = 0u32;
    let mut b_wins = 0u32;
    let mut draws = 0u32;
    let mut total_turns = 0u64;

    for i in 0..iterations {
        let (winner, turns) = run_duel(&def_a, &def_b, seed.wrapping_add(i as u64), max_turns);
        total_turns += turns as u64;
        match winner {
            Some(Faction::Player) => a_wins += 1,
            Some(Faction::Hostile) => b_wins += 1,
            _ => draws += 1,
        }
    }

    let mean_turns = total_turns as f64 / iterations.max(1) as f64;

    match output {
        OutputFormat::Console => {
            println!("{} vs {} over {} iterations (seed {})", def_a.name, def_b.name, iterations, seed);
            println!("  {} wins: {} ({:.1}%)", def_a.name, a_wins, 100.0 * a_wins as f64 / iterations as f64);
            println!("  {} wins: {} ({:.1}%)", def_b.name, b_wins, 100.0 * b_wins as f64 / iterations as f64);
            println!("  draws: {}", draws);
            println!("  mean duration: {:.1} turns", mean_turns);
        }
        OutputFormat::Json => {
            println!(
                "{{\"a_wins\":{a_wins},\"b_wins\":{b_wins},\"draws\":{draws},\"mean_turns\":{mean_turns:.2}}}"
            );
        }
        OutputFormat::Csv => {
            println!("a_wins,b_wins,draws,mean_turns");
            println!("{a_wins},{b_wins},{draws},{mean_turns:.2}");
        }
    }

    Ok(())
}

fn cmd_list(directory: PathBuf) -> Result<()> {
    let mut found = false;
    for entry in std::fs::read_dir(&directory).with_context(|| format!("reading {}", directory.display()))? {
        let entry = entry?;
        let path = entry.path();
        let ext_ok = matches!(path.extension().and_then(|e| e.to_str()), Some("json") | Some("yaml") | Some("yml"));
        if !ext_ok {
            continue;
        }
        if let Ok(def) = load_creature(&path) {
            println!("{:<20} {}", def.id, def.name);
            found = true;
        }
    }
    if !found {
        log::warn!("no creature definitions found in {}", directory.display());
    }
    Ok(())
}

fn cmd_info(creature: PathBuf) -> Result<()> {
    let def = load_creature(&creature)?;
    println!("id: {}", def.id);
    println!("name: {}", def.name);
    println!("stats: STR {} AGI {} END {} WIL {}", def.strength, def.agility, def.endurance, def.will);
    println!("speed: {}", def.speed);
    println!("base health: {}", def.base_health);
    println!("archetype (unequipped): inferred from a built combatant, not the raw definition");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Duel { a, b, iterations, seed, output, max_turns } => cmd_duel(a, b, iterations, seed, output, max_turns),
        Commands::Group { scenario, .. } => {
            bail!("group encounters are not wired in this core: spawning/loot composition is out of scope (scenario: {})", scenario.display());
        }
        Commands::Variation { scenario, .. } => {
            bail!("stat sweeps are not wired in this core yet (scenario: {})", scenario.display());
        }
        Commands::VariationInline { inline, .. } => {
            bail!("inline stat sweeps are not wired in this core yet ({} bytes of inline JSON received)", inline.len());
        }
        Commands::Matrix { roster, .. } => {
            bail!("matrix runs are not wired in this core yet (roster: {})", roster.display());
        }
        Commands::List { directory } => cmd_list(directory),
        Commands::Info { creature } => cmd_info(creature),
    }
}

