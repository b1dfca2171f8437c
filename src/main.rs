use galsim::{bench_force_curve, bench_insert, GalaxyStore, SimConfig};

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// YAML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file of star positions to bulk-ingest
    #[arg(long)]
    ingest: Option<PathBuf>,

    /// Tree index to aggregate, evaluate and dump
    #[arg(short, long, default_value_t = 1)]
    tree: i64,

    /// Override the configured opening angle
    #[arg(long)]
    theta: Option<f64>,

    /// Print the forest dump of the tree when done
    #[arg(long)]
    forest: bool,

    /// Run the built-in insertion/force benchmarks and exit
    #[arg(long)]
    bench: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// load here to keep main clean
fn load_config(path: &Option<PathBuf>) -> Result<SimConfig> {
    match path {
        Some(p) => {
            let file = File::open(p)?;
            let reader = BufReader::new(file);
            Ok(serde_yaml::from_reader(reader)?)
        }
        None => Ok(SimConfig::default()),
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    TermLogger::init(
        log_level(args.verbose),
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    if args.bench {
        bench_insert();
        bench_force_curve();
        return Ok(());
    }

    let cfg = load_config(&args.config)?;
    let theta = args.theta.unwrap_or(cfg.force.theta);

    let mut store = GalaxyStore::connect(&cfg)?;
    store.init_stars_table()?;
    store.init_nodes_table()?;

    if let Some(csv) = &args.ingest {
        let n = store.insert_list(csv)?;
        info!("{n} stars ingested");
    }

    if store.root_of(args.tree).is_ok() {
        store.update_total_mass(args.tree)?;
        store.update_center_of_mass(args.tree)?;

        // One force sweep with writeback; advancing the system in time is
        // the caller's business, not the store's.
        for id in store.list_star_ids_for_tree(args.tree) {
            let star = store.get_star(id)?;
            let force = store.calc_force(args.tree, &star, theta)?;
            store.update_star_force(id, force)?;
        }

        if args.forest {
            println!("{}", store.render_forest(args.tree));
        }
    } else {
        info!("tree {} holds no stars yet, nothing to do", args.tree);
    }

    store.close();
    Ok(())
}
