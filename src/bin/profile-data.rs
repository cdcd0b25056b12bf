//! A binary for querying a store dump from the command line.
//!
//! ```shell
//! cargo run --release --bin=profile-data --features=binaries -- \
//!     matrix dump.tsv.gz --profile brca_mrna --gene ERBB2 --sample S1 --sample S2
//!
//! cargo run --release --bin=profile-data --features=binaries -- \
//!     counts dump.tsv.gz KRAS --start 12 --end 13 --per-study
//! ```

use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use clap_verbosity_flag::Verbosity;
use nonempty::NonEmpty;
use omics::coordinate::position::Number;
use profiledata::export::request;
use profiledata::export::Assembler;
use profiledata::mutation::AlterationCount;
use profiledata::mutation::MutationCountAccessor;
use profiledata::mutation::PositionRange;
use profiledata::mutation::Query;
use profiledata::store::memory;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// The study column value for an aggregated count.
const ALL_STUDIES: &str = "ALL";

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Queries genetic profiles and mutation counts from a store dump.
#[derive(Parser)]
struct Args {
    /// The command to run.
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: Verbosity,
}

/// A command.
#[derive(Subcommand)]
enum Command {
    /// Exports a tab-delimited profile data matrix.
    Matrix {
        /// The store dump (optionally gzipped).
        dump: PathBuf,

        /// The stable id of a genetic profile (may be repeated).
        #[arg(short, long = "profile", required = true)]
        profiles: Vec<String>,

        /// A gene symbol, Entrez id or microRNA id (may be repeated).
        #[arg(short, long = "gene")]
        genes: Vec<String>,

        /// A sample id (may be repeated).
        #[arg(short, long = "sample")]
        samples: Vec<String>,

        /// A whitespace-delimited list of sample ids.
        #[arg(long)]
        sample_list: Option<String>,

        /// Whether to leave out the `# DATA_TYPE` and
        /// `# COLOR_GRADIENT_SETTINGS` lines.
        #[arg(long, default_value_t = false)]
        suppress_header: bool,
    },

    /// Counts the samples with a mutation in a gene.
    Counts {
        /// The store dump (optionally gzipped).
        dump: PathBuf,

        /// The gene symbol.
        gene: String,

        /// The first position to consider (requires `--end`).
        #[arg(long, requires = "end")]
        start: Option<Number>,

        /// The last position to consider (requires `--start`).
        #[arg(long, requires = "start")]
        end: Option<Number>,

        /// A study to restrict the counts to (may be repeated).
        #[arg(long = "study")]
        studies: Vec<String>,

        /// Whether to report one count per study.
        #[arg(long, default_value_t = false)]
        per_study: bool,
    },
}

fn load(dump: &Path) -> Result<memory::Store> {
    info!("loading store from {}", dump.display());

    memory::Builder
        .try_build_from_path(dump)
        .with_context(|| format!("loading store from {}", dump.display()))
}

fn matrix(
    dump: PathBuf,
    profiles: Vec<String>,
    genes: Vec<String>,
    samples: Vec<String>,
    sample_list: Option<String>,
    suppress_header: bool,
) -> Result<()> {
    let store = load(&dump)?;

    let mut builder = request::Builder::default()
        .profile_ids(profiles)
        .genes(genes)
        .samples(samples)
        .suppress_header(suppress_header);

    if let Some(list) = sample_list {
        builder = builder.whitespace_delimited_samples(&list);
    }

    let request = builder.try_build().context("building the export request")?;
    let export = Assembler::new(&store, &store, &store)
        .assemble(&request)
        .context("assembling the export")?;

    for warning in export.warnings().iter() {
        warn!("{warning}");
    }

    print!("{}", export.raw());
    Ok(())
}

fn counts(
    dump: PathBuf,
    gene: String,
    start: Option<Number>,
    end: Option<Number>,
    studies: Vec<String>,
    per_study: bool,
) -> Result<()> {
    let store = load(&dump)?;

    let mut query = Query::try_new(gene).context("building the query")?;

    match (start, end) {
        (Some(start), Some(end)) => {
            query = query.range(PositionRange::try_new(start, end).context("building the range")?)
        }
        (None, None) => {}
        _ => bail!("`--start` and `--end` must be provided together"),
    }

    if let Some(studies) = NonEmpty::from_vec(studies) {
        query = query.studies(studies);
    }

    info!("counting mutations for {query}");

    let results = match per_study {
        true => store
            .counts_per_study(&query)
            .context("counting mutations per study")?,
        false => vec![store.counts(&query).context("counting mutations")?],
    };

    println!("STUDY_ID\tCOUNT");
    for result in &results {
        print_count(result);
    }

    Ok(())
}

fn print_count(count: &AlterationCount) {
    println!(
        "{}\t{}",
        count.study_id().unwrap_or(ALL_STUDIES),
        count.count()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .with_writer(std::io::stderr)
            .init(),
    };

    match args.command {
        Command::Matrix {
            dump,
            profiles,
            genes,
            samples,
            sample_list,
            suppress_header,
        } => matrix(dump, profiles, genes, samples, sample_list, suppress_header),
        Command::Counts {
            dump,
            gene,
            start,
            end,
            studies,
            per_study,
        } => counts(dump, gene, start, end, studies, per_study),
    }
}
