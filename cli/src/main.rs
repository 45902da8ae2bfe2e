use clap::{Parser, Subcommand, ValueEnum};
use encoding_rs::Encoding;
use encounter_engine::api::{design_encounter_with_catalog, DesignOutcome, EncounterDesign, EncounterRequest};
use encounter_engine::content::{parse_catalog, parse_search_config, ContentFormat};
use encounter_engine::narrative::NarrativePrompt;
use encounter_engine::party::{validate_level, validate_size};
use encounter_engine::{
    budget_thresholds, calculate_adjusted_xp, calculate_xp_budget, determine_difficulty,
    encounter_multiplier, evaluate_composition, Catalog, CompositionEntry, Difficulty,
    PartyProfile,
};
use std::{fs, path::Path, path::PathBuf};
use tracing::{warn, Level};

#[derive(Copy, Clone, ValueEnum)]
enum Diff {
    Easy,
    Medium,
    Hard,
    Deadly,
}

#[derive(Subcommand)]
enum Cmd {
    /// XP budget for a party at a difficulty, plus all four thresholds
    Budget {
        /// Character level (1-20)
        #[arg(long)]
        level: i64,
        /// Number of characters (1-10)
        #[arg(long)]
        size: i64,
        #[arg(long, value_enum, default_value_t = Diff::Medium)]
        difficulty: Diff,
    },
    /// Encounter multiplier for a monster count against a party size
    Multiplier {
        #[arg(long)]
        monsters: u32,
        /// Party size (1-10)
        #[arg(long)]
        size: i64,
    },
    /// Adjusted XP for a composition such as `1x2 4x1/4` (COUNTxCR)
    Adjusted {
        /// Party size (1-10)
        #[arg(long)]
        size: i64,
        #[arg(required = true)]
        monsters: Vec<String>,
    },
    /// Full report for a hand-built composition against a party's budget
    Evaluate {
        #[arg(long)]
        level: i64,
        #[arg(long)]
        size: i64,
        #[arg(long, value_enum, default_value_t = Diff::Medium)]
        difficulty: Diff,
        #[arg(required = true)]
        monsters: Vec<String>,
    },
    /// Classify an adjusted XP value for a party
    Classify {
        #[arg(long)]
        xp: u32,
        #[arg(long)]
        level: i64,
        #[arg(long)]
        size: i64,
    },
    /// List monsters suitable for a party level and difficulty
    Monsters {
        #[arg(long)]
        level: i64,
        #[arg(long, value_enum, default_value_t = Diff::Medium)]
        difficulty: Diff,
        /// Custom catalog (YAML or JSON list of monsters)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Budget, filter and search: ranked encounter variants
    Design {
        #[command(flatten)]
        req: RequestArgs,
        /// Print the design as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the narrative prompt for the best variant
    Prompt {
        #[command(flatten)]
        req: RequestArgs,
    },
    /// Dump the built-in monster catalog as JSON
    CatalogDump {
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
}

#[derive(clap::Args)]
struct RequestArgs {
    #[arg(long)]
    level: i64,
    #[arg(long)]
    size: i64,
    #[arg(long, value_enum, default_value_t = Diff::Medium)]
    difficulty: Diff,
    #[arg(long)]
    environment: Option<String>,
    #[arg(long)]
    context: Option<String>,
    /// Custom catalog (YAML or JSON list of monsters)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Search config (YAML or JSON): acceptance_threshold, max_variants
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "encounter")]
#[command(about = "D&D 5e encounter balancing CLI")]
struct Cli {
    /// -v for debug, -vv for trace output on stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_difficulty(d: Diff) -> Difficulty {
    match d {
        Diff::Easy => Difficulty::Easy,
        Diff::Medium => Difficulty::Medium,
        Diff::Hard => Difficulty::Hard,
        Diff::Deadly => Difficulty::Deadly,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(p) => {
            let text = read_text_auto(p)?;
            parse_catalog(&text, ContentFormat::from_path(p))
        }
        None => Ok(Catalog::builtin().clone()),
    }
}

/// `COUNTxCR` or a bare CR (count 1), e.g. `4x1/4`, `2`.
fn parse_monster_spec(s: &str) -> anyhow::Result<CompositionEntry> {
    let (count, cr) = match s.split_once(['x', 'X']) {
        Some((n, cr)) => (n.trim().parse::<u32>()?, cr.trim()),
        None => (1, s.trim()),
    };
    if cr.parse::<encounter_engine::ChallengeRating>().is_err() {
        warn!(cr, "unknown challenge rating counts as 0 XP");
    }
    Ok(CompositionEntry::from_label(cr, count))
}

fn parse_composition(specs: &[String]) -> anyhow::Result<Vec<CompositionEntry>> {
    specs.iter().map(|s| parse_monster_spec(s)).collect()
}

fn run_design(args: &RequestArgs) -> anyhow::Result<EncounterDesign> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let config = match args.config.as_deref() {
        Some(p) => Some(parse_search_config(&read_text_auto(p)?, ContentFormat::from_path(p))?),
        None => None,
    };
    let req = EncounterRequest {
        party_level: args.level,
        party_size: args.size,
        difficulty: to_difficulty(args.difficulty),
        environment: args.environment.clone(),
        context: args.context.clone(),
        config,
    };
    Ok(design_encounter_with_catalog(req, &catalog)?)
}

fn print_design(design: &EncounterDesign) {
    for line in &design.log {
        println!("{}", line);
    }
    println!();
    match design.outcome {
        DesignOutcome::VariantsFound => {
            for (i, v) in design.variants.iter().enumerate() {
                println!(
                    "#{} {:<40} raw={:<6} adjusted={:<6} {:<7} score={:.3}",
                    i + 1,
                    v.summary(),
                    v.total_xp,
                    v.adjusted_xp,
                    v.actual_difficulty,
                    v.match_score
                );
            }
        }
        DesignOutcome::NoSuitableMonsters | DesignOutcome::NoAcceptableComposition => {
            println!("no automatic match found - adjust parameters or build manually");
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Cmd::Budget {
            level,
            size,
            difficulty,
        } => {
            let d = to_difficulty(difficulty);
            let budget = calculate_xp_budget(level, size, d)?;
            let t = budget_thresholds(level, size)?;
            println!("{} budget: {} XP", d, budget);
            println!(
                "thresholds: easy={} medium={} hard={} deadly={}",
                t.easy, t.medium, t.hard, t.deadly
            );
        }
        Cmd::Multiplier { monsters, size } => {
            let size = validate_size(size)?;
            if monsters == 0 {
                anyhow::bail!("monster count must be at least 1");
            }
            println!("x{}", encounter_multiplier(monsters, size));
        }
        Cmd::Adjusted { size, monsters } => {
            let composition = parse_composition(&monsters)?;
            println!("{}", calculate_adjusted_xp(&composition, size)?);
        }
        Cmd::Evaluate {
            level,
            size,
            difficulty,
            monsters,
        } => {
            let party = PartyProfile::new(level, size)?;
            let composition = parse_composition(&monsters)?;
            let target = calculate_xp_budget(level, size, to_difficulty(difficulty))?;
            let r = evaluate_composition(&composition, &party, target)?;
            println!(
                "monsters={} raw={} multiplier=x{} adjusted={} => {} ({:.0}%) target={} score={:.3}",
                r.monster_count,
                r.total_xp,
                r.multiplier,
                r.adjusted_xp,
                r.rating.difficulty,
                r.rating.percentage,
                target,
                r.match_score
            );
        }
        Cmd::Classify { xp, level, size } => {
            let r = determine_difficulty(xp, level, size)?;
            println!("{} ({:.0}%)", r.difficulty, r.percentage);
        }
        Cmd::Monsters {
            level,
            difficulty,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let level = validate_level(level)?;
            for m in catalog.suitable(level, to_difficulty(difficulty)) {
                println!(
                    "{:<24} CR {:<4} {:>6} XP  {}",
                    m.name,
                    m.challenge_rating,
                    m.xp(),
                    m.creature_type
                );
            }
        }
        Cmd::Design { req, json } => {
            let design = run_design(&req)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&design)?);
            } else {
                print_design(&design);
            }
        }
        Cmd::Prompt { req } => {
            let design = run_design(&req)?;
            match design.top() {
                Some(v) => {
                    let prompt = NarrativePrompt::for_variant(
                        v,
                        &design.party,
                        design.environment.as_deref(),
                        design.context.as_deref(),
                    );
                    print!("{}", prompt.render());
                }
                None => println!("no automatic match found - adjust parameters or build manually"),
            }
        }
        Cmd::CatalogDump { pretty } => {
            let monsters = Catalog::builtin().to_vec();
            if pretty {
                println!("{}", serde_json::to_string_pretty(&monsters)?);
            } else {
                println!("{}", serde_json::to_string(&monsters)?);
            }
        }
    }
    Ok(())
}
