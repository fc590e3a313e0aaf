//! DTL Shot Tracker CLI
//!
//! Score a round shot by shot, browse history, and compare equipment from
//! the command line. State lives in per-user JSON files under the data
//! directory.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use dtl_core::{
    aggregate_by_equipment, filter_rounds, rank_by_average, sort_rounds, summarize, Ammunition,
    Choke, Club, EquipmentRepository, EquipmentSlot, Gun, JsonFileStore, RoundFilter,
    RoundSession, RoundSetup, SortKey, SortOrder,
};

mod render;

#[derive(Parser)]
#[command(name = "dtl_cli")]
#[command(about = "Score and track Down-The-Line rounds", long_about = None)]
struct Cli {
    /// Directory holding round and equipment files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// User the rounds belong to
    #[arg(long, default_value = "default")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new round
    Start {
        /// Gun identifier
        #[arg(long)]
        gun: Option<String>,

        /// Over-barrel choke identifier
        #[arg(long)]
        over_choke: Option<String>,

        /// Under-barrel choke identifier
        #[arg(long)]
        under_choke: Option<String>,

        /// Ammunition identifier
        #[arg(long)]
        ammo: Option<String>,

        /// Venue name
        #[arg(long)]
        club: Option<String>,

        /// Weather / conditions note
        #[arg(long)]
        weather: Option<String>,

        /// Pre-fill each slot that has exactly one equipment record
        #[arg(long, default_value = "false")]
        quick: bool,
    },

    /// Record one press on a target (cycles 3 → 2 → 0 → unset)
    Shot {
        /// Target number, 1-25 in station order
        target: usize,

        /// Presses to apply
        #[arg(long, default_value = "1")]
        presses: usize,
    },

    /// Show the round in progress
    Status,

    /// Complete the round and append it to history
    Finish,

    /// Discard the round in progress without saving
    Abandon,

    /// List completed rounds
    History {
        /// Earliest date, YYYY-MM-DD inclusive
        #[arg(long)]
        from: Option<String>,

        /// Latest date, YYYY-MM-DD inclusive
        #[arg(long)]
        to: Option<String>,

        /// Gun identifier
        #[arg(long)]
        gun: Option<String>,

        /// Choke identifier, matched against either barrel
        #[arg(long)]
        choke: Option<String>,

        /// Ammunition identifier
        #[arg(long)]
        ammo: Option<String>,

        /// Venue substring, case-insensitive
        #[arg(long)]
        club: Option<String>,

        /// Lowest total score to include
        #[arg(long)]
        min_score: Option<u8>,

        /// Highest total score to include
        #[arg(long)]
        max_score: Option<u8>,

        /// Sort key
        #[arg(long, value_enum, default_value = "date")]
        sort: SortField,

        /// Sort descending
        #[arg(long, default_value = "false")]
        desc: bool,
    },

    /// Summary statistics over completed rounds
    Stats,

    /// Compare average scores per equipment record
    Compare {
        /// Equipment slot to group by
        #[arg(long, value_enum, default_value = "gun")]
        slot: SlotField,
    },

    /// List equipment records
    Equipment,

    /// Add an equipment record
    Add {
        /// Record type
        #[arg(value_enum)]
        kind: EquipmentKind,

        /// Display name
        #[arg(long)]
        name: String,

        /// Manufacturer
        #[arg(long)]
        manufacturer: Option<String>,

        /// Gun model
        #[arg(long)]
        model: Option<String>,

        /// Choke constriction (e.g. "half", "full")
        #[arg(long)]
        constriction: Option<String>,

        /// Shot size (e.g. "7.5")
        #[arg(long)]
        shot_size: Option<String>,

        /// Club city
        #[arg(long)]
        city: Option<String>,

        /// Club state or region
        #[arg(long)]
        state: Option<String>,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Print completed rounds as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Sort key for `history`
#[derive(Clone, Copy, ValueEnum)]
enum SortField {
    Date,
    Score,
    HitRate,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Date => SortKey::Date,
            SortField::Score => SortKey::TotalScore,
            SortField::HitRate => SortKey::HitRate,
        }
    }
}

/// Equipment slot for `compare`
#[derive(Clone, Copy, ValueEnum)]
enum SlotField {
    Gun,
    OverChoke,
    UnderChoke,
    Ammo,
}

impl From<SlotField> for EquipmentSlot {
    fn from(field: SlotField) -> Self {
        match field {
            SlotField::Gun => EquipmentSlot::Gun,
            SlotField::OverChoke => EquipmentSlot::OverChoke,
            SlotField::UnderChoke => EquipmentSlot::UnderChoke,
            SlotField::Ammo => EquipmentSlot::Ammunition,
        }
    }
}

/// Record type for `add`
#[derive(Clone, Copy, ValueEnum)]
enum EquipmentKind {
    Gun,
    Choke,
    Ammo,
    Club,
}

impl EquipmentKind {
    fn label(self) -> &'static str {
        match self {
            EquipmentKind::Gun => "gun",
            EquipmentKind::Choke => "choke",
            EquipmentKind::Ammo => "ammunition",
            EquipmentKind::Club => "club",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = JsonFileStore::new(&cli.data_dir);
    let mut session = RoundSession::new(store, cli.user);

    match cli.command {
        Commands::Start { gun, over_choke, under_choke, ammo, club, weather, quick } => {
            let mut setup = if quick {
                let equipment = session.store().load_equipment(session.user_id())?;
                RoundSetup::quick_start(session.user_id(), &equipment)
            } else {
                RoundSetup::new(session.user_id())
            };
            apply_setup_flags(&mut setup, gun, over_choke, under_choke, ammo, club, weather);

            if session.resume()? {
                println!("⚠️ Replacing the round already in progress");
            }
            let round = session.start(setup)?;
            println!("🎯 Round started ({})", round.date.format("%Y-%m-%d"));
            render::print_grid(round);
        }

        Commands::Shot { target, presses } => {
            if !session.resume()? {
                bail!("no round in progress; run `dtl_cli start` first");
            }
            let index = target.checked_sub(1).context("target numbers start at 1")?;
            for _ in 0..presses {
                session.record_shot(index)?;
            }
            if let Some(round) = session.current() {
                render::print_grid(round);
            }
        }

        Commands::Status => {
            if session.resume()? {
                if let Some(round) = session.current() {
                    println!("🎯 Round in progress ({})", round.date.format("%Y-%m-%d %H:%M"));
                    render::print_grid(round);
                }
            } else {
                println!("No round in progress.");
            }
        }

        Commands::Finish => {
            if !session.resume()? {
                bail!("no round in progress");
            }
            let done = session.finish()?;
            println!("✅ Round saved");
            render::print_grid(&done);
        }

        Commands::Abandon => {
            let had = session.resume()?;
            session.abandon()?;
            if had {
                println!("🗑️ Round discarded");
            } else {
                println!("No round in progress.");
            }
        }

        Commands::History {
            from,
            to,
            gun,
            choke,
            ammo,
            club,
            min_score,
            max_score,
            sort,
            desc,
        } => {
            let filter = RoundFilter {
                date_from: from.as_deref().map(parse_day).transpose()?,
                date_to: to.as_deref().map(parse_day_end).transpose()?,
                gun_id: gun,
                choke_id: choke,
                ammunition_id: ammo,
                club,
                min_score,
                max_score,
            };
            let order = if desc { SortOrder::Desc } else { SortOrder::Asc };

            let rounds = session.history()?;
            let rounds = filter_rounds(&rounds, &filter);
            let rounds = sort_rounds(&rounds, sort.into(), order);
            if rounds.is_empty() {
                println!("No rounds match.");
                return Ok(());
            }

            let equipment = session.store().load_equipment(session.user_id())?;
            for round in &rounds {
                println!("   {}", render::history_line(round, &equipment));
            }
            println!("\n{} round(s)", rounds.len());
        }

        Commands::Stats => {
            let rounds = session.history()?;
            match summarize(&rounds) {
                Some(summary) => render::print_summary(&summary),
                None => println!("No completed rounds yet."),
            }
        }

        Commands::Compare { slot } => {
            let rounds = session.history()?;
            if rounds.is_empty() {
                println!("No completed rounds yet.");
                return Ok(());
            }

            let slot = EquipmentSlot::from(slot);
            let ranked = rank_by_average(aggregate_by_equipment(&rounds, slot));
            let equipment = session.store().load_equipment(session.user_id())?;
            render::print_comparison(&ranked, slot, &equipment);
        }

        Commands::Equipment => {
            let equipment = session.store().load_equipment(session.user_id())?;
            if equipment.is_empty() {
                println!("No equipment on file. Add records with `dtl_cli add`.");
            } else {
                render::print_equipment(&equipment);
            }
        }

        Commands::Add {
            kind,
            name,
            manufacturer,
            model,
            constriction,
            shot_size,
            city,
            state,
            notes,
        } => {
            let user = session.user_id().to_string();
            let mut equipment = session.store().load_equipment(&user)?;
            let id = Uuid::new_v4().to_string();

            match kind {
                EquipmentKind::Gun => {
                    let mut gun = Gun::new(&id, &name);
                    gun.manufacturer = manufacturer.unwrap_or_default();
                    gun.model = model.unwrap_or_default();
                    gun.notes = notes.unwrap_or_default();
                    equipment.guns.push(gun);
                }
                EquipmentKind::Choke => {
                    let mut choke = Choke::new(&id, &name);
                    choke.manufacturer = manufacturer.unwrap_or_default();
                    choke.constriction = constriction.unwrap_or_default();
                    choke.notes = notes.unwrap_or_default();
                    equipment.chokes.push(choke);
                }
                EquipmentKind::Ammo => {
                    let mut ammo = Ammunition::new(&id, &name);
                    ammo.manufacturer = manufacturer.unwrap_or_default();
                    ammo.shot_size = shot_size.unwrap_or_default();
                    ammo.notes = notes.unwrap_or_default();
                    equipment.ammunition.push(ammo);
                }
                EquipmentKind::Club => {
                    let mut club = Club::new(&id, &name);
                    club.city = city.unwrap_or_default();
                    club.state = state.unwrap_or_default();
                    club.notes = notes.unwrap_or_default();
                    equipment.clubs.push(club);
                }
            }

            session.store_mut().save_equipment(&user, &equipment)?;
            println!("🔧 Added {} '{}' ({})", kind.label(), name, id);
        }

        Commands::Export { out } => {
            let rounds = session.history()?;
            let json = serde_json::to_string_pretty(&rounds)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &json)?;
                    println!("📄 Exported {} round(s) to {}", rounds.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

/// Explicit flags win over whatever quick-start picked.
fn apply_setup_flags(
    setup: &mut RoundSetup,
    gun: Option<String>,
    over_choke: Option<String>,
    under_choke: Option<String>,
    ammo: Option<String>,
    club: Option<String>,
    weather: Option<String>,
) {
    if let Some(gun) = gun {
        setup.gun_id = gun;
    }
    if let Some(choke) = over_choke {
        setup.over_choke_id = choke;
    }
    if let Some(choke) = under_choke {
        setup.under_choke_id = choke;
    }
    if let Some(ammo) = ammo {
        setup.ammunition_id = ammo;
    }
    if let Some(club) = club {
        setup.club = club;
    }
    if let Some(weather) = weather {
        setup.weather = weather;
    }
}

/// Midnight starting the given day.
fn parse_day(value: &str) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))?;
    Ok(day.and_time(NaiveTime::MIN).and_utc())
}

/// Last second of the given day, so an inclusive --to covers the whole day.
fn parse_day_end(value: &str) -> Result<DateTime<Utc>> {
    Ok(parse_day(value)? + Duration::days(1) - Duration::seconds(1))
}
