use anyhow::Context as _;
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use flavorwheel::config::{default_wheel, read_wheel};
use flavorwheel::geometry::{Point, WheelGeometry};
use flavorwheel::journal::{COLLECTION_TYPES, MemoryJournal, SortKey, TeaQuery};
use flavorwheel::wheel::{self, Interaction, Label, RadialSelector, Selection, WheelTheme};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flavorwheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct WheelArgs {
    /// Side of the square drawing surface, in pixels
    #[arg(short, long, default_value_t = 300.0)]
    size: f64,

    /// Wheel layout file (TOML). Uses the built-in tea wheel when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the wheel to a PNG file
    Render {
        #[command(flatten)]
        wheel: WheelArgs,

        /// Selected label (repeatable)
        #[arg(long = "select")]
        selected: Vec<String>,

        /// Label to draw as hovered
        #[arg(long)]
        hover: Option<String>,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the label under a surface coordinate
    Pick {
        x: f64,
        y: f64,

        #[command(flatten)]
        wheel: WheelArgs,
    },
    /// Click a surface coordinate and print the resulting selection
    Click {
        x: f64,
        y: f64,

        #[command(flatten)]
        wheel: WheelArgs,

        /// Currently selected label (repeatable)
        #[arg(long = "select")]
        selected: Vec<String>,
    },
    /// List the sample tea collection
    Teas {
        /// Matches tea name or origin, case-insensitive
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only teas of this type
        #[arg(
            short = 't',
            long = "type",
            value_parser = PossibleValuesParser::new(COLLECTION_TYPES.iter().copied())
        )]
        tea_type: Option<String>,

        #[arg(long, default_value_t = SortKey::Name)]
        sort: SortKey,
    },
    /// Print statistics over the sample brewing history
    Stats,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            wheel,
            selected,
            hover,
            output,
        } => {
            let selected: Selection = selected.into_iter().collect();
            render(&wheel, &selected, hover, output)
        }
        Commands::Pick { x, y, wheel } => {
            let selector = load_selector(&wheel)?;
            if let Some(segment) = selector.segment_at(Point::new(x, y)) {
                log::debug!("{} ring, sector {}", segment.ring(), segment.sector());
                println!("{}", selector.config.label(segment));
            }
            Ok(())
        }
        Commands::Click {
            x,
            y,
            wheel,
            selected,
        } => {
            let selector = load_selector(&wheel)?;
            let selected: Selection = selected.into_iter().collect();
            let next = selector
                .click(Point::new(x, y), &selected)
                .unwrap_or(selected);
            for label in &next {
                println!("{}", label);
            }
            Ok(())
        }
        Commands::Teas {
            search,
            tea_type,
            sort,
        } => list_teas(TeaQuery {
            search,
            tea_type,
            sort,
        }),
        Commands::Stats => print_stats(),
    }
}

fn load_selector(args: &WheelArgs) -> anyhow::Result<RadialSelector> {
    let config = match &args.config {
        Some(path) => read_wheel(path)
            .with_context(|| format!("Failed to load wheel from {}", path.display()))?,
        None => default_wheel()?,
    };
    Ok(RadialSelector::new(config, WheelGeometry::square(args.size)))
}

fn render(
    args: &WheelArgs,
    selected: &Selection,
    hover: Option<String>,
    output: PathBuf,
) -> anyhow::Result<()> {
    let mut selector = load_selector(args)?;
    if let Some(label) = hover {
        selector.interaction = Interaction::Hovering(Label::new(label));
    }

    let side = args.size.round() as i32;
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, side, side)?;
    {
        let cr = cairo::Context::new(&surface)?;
        wheel::draw(&cr, &selector, selected, &WheelTheme::default())?;
    }

    let mut file = fs_err::File::create(&output)?;
    surface.write_to_png(&mut file)?;
    log::info!("Wrote {}", output.display());
    Ok(())
}

fn list_teas(query: TeaQuery) -> anyhow::Result<()> {
    let journal = MemoryJournal::with_sample()?;
    let teas = journal.query(&query);

    if teas.is_empty() {
        println!("No teas match.");
        return Ok(());
    }

    for tea in teas {
        let year = tea.year.map(|y| y.to_string()).unwrap_or_default();
        let price = tea.price.map(|p| format!("¥{p:.0}")).unwrap_or_default();
        let flavors: Vec<&str> = tea.flavor_profile.iter().map(|l| l.as_str()).collect();
        println!(
            "{:>3}  {}  [{}]  {} {}  ★{:.1}  {} brews  {}  {}",
            tea.id,
            tea.name,
            tea.tea_type,
            tea.origin,
            year,
            tea.rating,
            tea.brew_count,
            price,
            flavors.join(" ")
        );
    }
    Ok(())
}

fn print_stats() -> anyhow::Result<()> {
    let stats = MemoryJournal::with_sample()?.stats();
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    println!("Sessions:            {}", stats.total_sessions);
    println!(
        "Average rating:      {}",
        or_dash(stats.average_rating.map(|r| format!("{r:.1}")))
    );
    println!(
        "Favorite water temp: {}",
        or_dash(stats.favorite_temperature.map(|t| format!("{t}°C")))
    );
    println!(
        "Average rounds:      {}",
        or_dash(stats.average_rounds.map(|r| format!("{r:.1}")))
    );
    println!(
        "Most brewed:         {}",
        or_dash(stats.most_brewed.map(|n| n.to_string()))
    );
    println!(
        "Best rated:          {}",
        or_dash(stats.best_rated.map(|n| n.to_string()))
    );
    Ok(())
}
