mod dump;
mod info;
mod list;
mod partitions;

use clap::Parser;
use vfat::io::std::FileIO;

#[derive(Debug, clap::Args)]
struct List {
    /// First cluster of the directory to list, default to root directory
    #[clap(short, long, default_value_t = 0)]
    cluster: u32,
}

#[derive(Debug, clap::Args)]
struct Dump {
    /// Absolute sector number on the device
    sector: u32,
    /// Number of sectors to dump
    #[clap(short = 'n', long, default_value_t = 1)]
    count: usize,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Print MBR partition table
    Partitions,
    /// Print boot sector and geometry of selected partition
    Info,
    /// List file and directory in specified cluster
    #[clap(name = "ls")]
    List(List),
    /// Hex dump raw sectors
    Dump(Dump),
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    quiet: bool,
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// block device or disk image with MBR partition table
    #[clap(short, long)]
    device: String,
    /// MBR partition index, 0 ~ 3
    #[clap(short, long, default_value_t = 0)]
    partition: usize,
    #[clap(subcommand)]
    action: Action,
}

fn main() {
    let args = Args::parse();
    let level = match (args.quiet, args.verbosity) {
        (true, _) => log::LevelFilter::Off,
        (_, 0) => log::LevelFilter::Info,
        (_, 1) => log::LevelFilter::Debug,
        (_, _) => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).target(env_logger::Target::Stdout).init();

    let io = match FileIO::open(&args.device) {
        Ok(io) => io,
        Err(error) => {
            eprintln!("Open {} failed: {}", args.device, error);
            std::process::exit(1);
        }
    };
    let result = match args.action {
        Action::Partitions => partitions::partitions(io),
        Action::Info => info::info(io, args.partition),
        Action::List(list) => list::list(io, args.partition, list.cluster),
        Action::Dump(dump) => dump::dump(io, dump.sector, dump.count),
    };
    if let Some(error) = result.err() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
