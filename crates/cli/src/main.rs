//! Trace-driven simulator CLI.
//!
//! This binary provides a single entry point for the three simulators. It offers:
//! 1. **ooo:** Replays a pipeline trace through the out-of-order core.
//! 2. **inorder:** Replays a pipeline trace through the in-order superscalar core.
//! 3. **memsys:** Replays one or two memory traces through the cache hierarchy.
//!
//! Settings come from the built-in defaults, then an optional JSON file, then
//! the command line flags. The statistics report goes to stdout; diagnostics
//! go to stderr through `tracing`.

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tracesim_core::config::{
    BranchPredictorPolicy, Config, DramPolicy, MemSysMode, ReplacementPolicy, SchedPolicy,
};
use tracesim_core::sim::{open_mem_trace, open_trace};
use tracesim_core::stats::{InOrderReport, OooReport};
use tracesim_core::{
    CmpSimulator, InOrderPipeline, MemorySystem, OooPipeline, Result, SimError, Simulator,
};

#[derive(Parser, Debug)]
#[command(
    name = "tracesim",
    author,
    version,
    about = "Trace-driven cycle-level microarchitecture simulators",
    long_about = "Replay instruction or memory traces through an out-of-order pipeline, an in-order superscalar pipeline or a multi-core cache hierarchy.\n\nExamples:\n  tracesim ooo gcc.ptr --pipewidth 4 --schedpolicy 1\n  tracesim inorder gcc.ptr --pipewidth 2 --enablememfwd --enableexefwd --bpredpolicy 2\n  tracesim memsys --mode 4 --L2repl 3 mcf.mtr bzip2.mtr"
)]
struct Cli {
    /// JSON configuration file applied before the command line flags.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Out-of-order pipeline with a reorder buffer and execution queue.
    Ooo {
        /// Pipeline trace file.
        trace: PathBuf,

        #[command(flatten)]
        opts: OooOpts,
    },

    /// In-order superscalar pipeline with forwarding and branch prediction.
    Inorder {
        /// Pipeline trace file.
        trace: PathBuf,

        #[command(flatten)]
        opts: InOrderOpts,
    },

    /// Cache hierarchy and DRAM driven by one or two memory traces.
    Memsys {
        /// Memory trace files, one per core.
        #[arg(required = true, num_args = 1..=2)]
        traces: Vec<PathBuf>,

        #[command(flatten)]
        opts: MemSysOpts,
    },
}

#[derive(Args, Debug)]
struct OooOpts {
    /// Lanes per stage (1 to 8).
    #[arg(long)]
    pipewidth: Option<usize>,

    /// Scheduler: 0 in-order, 1 out-of-order.
    #[arg(long)]
    schedpolicy: Option<u32>,

    /// Load execution latency in cycles.
    #[arg(long)]
    loadlatency: Option<u64>,
}

#[derive(Args, Debug)]
struct InOrderOpts {
    /// Lanes per stage (1 to 8).
    #[arg(long)]
    pipewidth: Option<usize>,

    /// Forward results from the memory access stage.
    #[arg(long)]
    enablememfwd: bool,

    /// Forward results from the execute stage.
    #[arg(long)]
    enableexefwd: bool,

    /// Branch predictor: 0 perfect, 1 always taken, 2 gshare.
    #[arg(long)]
    bpredpolicy: Option<u32>,
}

#[derive(Args, Debug)]
struct MemSysOpts {
    /// Hierarchy: 1 D-cache only, 2 L1+L2+fixed DRAM, 3 L1+L2+DRAM timing, 4 dual core.
    #[arg(long)]
    mode: Option<u32>,

    /// Cache line size in bytes.
    #[arg(long)]
    linesize: Option<u64>,

    /// L1 replacement: 0 LRU, 1 random.
    #[arg(long)]
    repl: Option<u32>,

    /// L1 data cache size in KiB.
    #[arg(long = "DsizeKB")]
    dsize_kb: Option<u64>,

    /// L1 data cache associativity.
    #[arg(long = "Dassoc")]
    dassoc: Option<u64>,

    /// L2 size in KiB.
    #[arg(long = "L2sizeKB")]
    l2_size_kb: Option<u64>,

    /// Shared L2 replacement: 0 LRU, 1 random, 2 SWP, 3 DWP.
    #[arg(long = "L2repl")]
    l2_repl: Option<u32>,

    /// Ways of the shared L2 reserved for core 0 under SWP.
    #[arg(long = "SWP_core0ways")]
    swp_core0_ways: Option<u64>,

    /// DRAM row buffer policy: 0 open page, 1 close page.
    #[arg(long)]
    dram_policy: Option<u32>,
}

impl OooOpts {
    fn apply(&self, config: &mut Config) -> Result<()> {
        let ooo = &mut config.ooo;
        if let Some(w) = self.pipewidth {
            ooo.width = w;
        }
        if let Some(p) = self.schedpolicy {
            ooo.sched_policy = SchedPolicy::from_index(p)?;
        }
        if let Some(l) = self.loadlatency {
            ooo.load_latency = l;
        }
        Ok(())
    }
}

impl InOrderOpts {
    fn apply(&self, config: &mut Config) -> Result<()> {
        let inorder = &mut config.inorder;
        if let Some(w) = self.pipewidth {
            inorder.width = w;
        }
        inorder.enable_mem_fwd |= self.enablememfwd;
        inorder.enable_exe_fwd |= self.enableexefwd;
        if let Some(p) = self.bpredpolicy {
            inorder.bpred_policy = BranchPredictorPolicy::from_index(p)?;
        }
        Ok(())
    }
}

impl MemSysOpts {
    fn apply(&self, config: &mut Config) -> Result<()> {
        let memsys = &mut config.memsys;
        if let Some(m) = self.mode {
            memsys.mode = MemSysMode::from_index(m)?;
        }
        if let Some(l) = self.linesize {
            memsys.line_size = l;
        }
        if let Some(r) = self.repl {
            memsys.repl = ReplacementPolicy::from_index(r)?;
        }
        if let Some(kb) = self.dsize_kb {
            memsys.dcache_size = kb * 1024;
        }
        if let Some(a) = self.dassoc {
            memsys.dcache_assoc = a;
        }
        if let Some(kb) = self.l2_size_kb {
            memsys.l2_size = kb * 1024;
        }
        if let Some(r) = self.l2_repl {
            memsys.l2_repl = ReplacementPolicy::from_index(r)?;
        }
        if let Some(w) = self.swp_core0_ways {
            memsys.swp_core0_ways = w;
        }
        if let Some(p) = self.dram_policy {
            memsys.dram_policy = DramPolicy::from_index(p)?;
        }
        Ok(())
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads the JSON file when one is given, otherwise the defaults.
fn base_config(path: Option<&Path>) -> Result<Config> {
    path.map_or_else(|| Ok(Config::default()), Config::from_path)
}

fn run_ooo(config: &Config, trace: &Path) -> Result<()> {
    let engine = OooPipeline::new(&config.ooo, open_trace(trace)?)?;
    let mut sim = Simulator::new(engine, &config.watchdog);
    let cycles = sim.run()?;
    info!(cycles, "out-of-order run finished");
    let report = OooReport {
        stats: sim.engine.stats().clone(),
    };
    println!("{report}");
    Ok(())
}

fn run_inorder(config: &Config, trace: &Path) -> Result<()> {
    let engine = InOrderPipeline::new(&config.inorder, open_trace(trace)?)?;
    let mut sim = Simulator::new(engine, &config.watchdog);
    let cycles = sim.run()?;
    info!(cycles, "in-order run finished");
    let report = InOrderReport {
        stats: sim.engine.stats().clone(),
        branches: sim.engine.branch_stats().copied(),
    };
    println!("{report}");
    Ok(())
}

fn run_memsys(config: &Config, traces: &[PathBuf]) -> Result<()> {
    let memsys = MemorySystem::new(&config.memsys, traces.len())?;
    let sources = traces
        .iter()
        .map(|t| open_mem_trace(t))
        .collect::<Result<Vec<_>>>()?;
    let mut sim = CmpSimulator::new(memsys, sources, config.watchdog.progress_interval)?;
    let cycles = sim.run()?;
    info!(cycles, "memory-system run finished");
    println!("{}", sim.report());
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = base_config(cli.config.as_deref())?;
    match &cli.command {
        Commands::Ooo { trace, opts } => {
            opts.apply(&mut config)?;
            config.validate()?;
            run_ooo(&config, trace)
        }
        Commands::Inorder { trace, opts } => {
            opts.apply(&mut config)?;
            config.validate()?;
            run_inorder(&config, trace)
        }
        Commands::Memsys { traces, opts } => {
            opts.apply(&mut config)?;
            config.validate()?;
            run_memsys(&config, traces)
        }
    }
}

/// Exit status for a failed run: 2 for bad settings, 1 for everything else.
const fn exit_code(err: &SimError) -> i32 {
    if matches!(err, SimError::Config(_)) {
        2
    } else {
        1
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(exit_code(&e));
    }
}
