mod error;
use error::*;
use std::{fs::{read, read_to_string, write}, io::{self, ErrorKind}, path::{Path, PathBuf}};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{fmt, EnvFilter};
use mlc::{fileio, optimize, Graph, Grid, Options, Runtime};

#[derive(Parser)]
#[command(name = "mlc")]
#[command(about = "Compile MarioLANG grids into state machines and C", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Write <stem>.c, <stem>.dot and <stem>.mlg next to the grid
	Build {
		file: PathBuf,
		/// Directory for the outputs (defaults to the grid's directory)
		#[arg(long)]
		out_dir: Option<PathBuf>,
		/// Skip straight-line fusion
		#[arg(long)]
		no_fuse: bool,
		/// Skip event coalescing
		#[arg(long)]
		no_coalesce: bool,
		/// Cells in the generated program's tape
		#[arg(long, default_value_t = 1024)]
		tape: usize,
		/// Events shown per diagram node
		#[arg(long, default_value_t = 30)]
		label_events: usize,
	},
	/// Interpret a grid, or a .mlg artifact, against stdin and stdout
	Run {
		file: PathBuf,
		#[arg(long, value_enum, default_value_t = Mode::Direct)]
		mode: Mode,
	},
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
	/// Step the actor over the grid
	Direct,
	/// Walk the unoptimized state graph
	Raw,
	/// Walk the graph after fusion
	Fused,
	/// Walk the graph after fusion and coalescing
	Optimized,
}

fn init_logging() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,mlc=info"));
	fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(io::stderr)
		.init();
}

fn main() {
	init_logging();
	let cli = Cli::parse();
	let result = match cli.command {
		Command::Build { file, out_dir, no_fuse, no_coalesce, tape, label_events } => {
			let options = Options {
				fuse: !no_fuse,
				coalesce: !no_coalesce,
				tape_len: tape,
				label_events,
			};
			build(&file, out_dir, &options)
		}
		Command::Run { file, mode } => run(&file, mode),
	};
	if let Err(e) = result {
		eprintln!("{} {}", "error:".red().bold(), e);
		std::process::exit(1);
	}
}

fn build(file: &Path, out_dir: Option<PathBuf>, options: &Options) -> CLIResult {
	let source = read_source(file)?;
	let compilation = mlc::compile(&source, options)?;

	let stem = file.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| "ml".into());
	let dir = out_dir.unwrap_or_else(|| file.parent().map(Path::to_path_buf).unwrap_or_default());
	write_output(&dir.join(format!("{}.c", stem)), compilation.program.as_bytes())?;
	write_output(&dir.join(format!("{}.dot", stem)), compilation.diagram.as_bytes())?;
	write_output(&dir.join(format!("{}.mlg", stem)), &fileio::ser(&compilation.graph)?)?;

	let stats = compilation.stats;
	println!("Found {} states ({} end states)", stats.states.to_string().bold(), stats.end_states);
	println!("Kept {} states after optimizing", compilation.graph.len().to_string().bold());
	println!("{} in {} steps", "Done".green(), stats.steps);
	Ok(())
}

fn run(file: &Path, mode: Mode) -> CLIResult {
	let stdin = io::stdin();
	let mut runtime = Runtime::new(stdin.lock(), io::stdout().lock());

	if file.extension().map_or(false, |ext| ext == "mlg") {
		let bytes = read(file).map_err(|e| io_error(file, e))?;
		let graph = fileio::de(&bytes)?;
		runtime.exec_graph(&graph)?;
		return Ok(());
	}

	let grid = Grid::parse(&read_source(file)?);
	if mode == Mode::Direct {
		runtime.exec_grid(&grid)?;
		return Ok(());
	}
	let (raw, _) = Graph::build(&grid)?;
	let graph = match mode {
		Mode::Fused => optimize(&raw, &Options { coalesce: false, ..Default::default() }),
		Mode::Optimized => optimize(&raw, &Options::default()),
		_ => raw,
	};
	runtime.exec_graph(&graph)?;
	Ok(())
}

fn read_source(file: &Path) -> CLIResult<String> {
	read_to_string(file).map_err(|e| io_error(file, e))
}

fn write_output(file: &Path, contents: &[u8]) -> CLIResult {
	write(file, contents).map_err(|e| io_error(file, e))
}

fn io_error(file: &Path, e: io::Error) -> CLIError {
	match e.kind() {
		ErrorKind::NotFound => CLIError::NotFound(file.display().to_string()),
		_ => CLIError::ExternalError("io::Error".into(), e.to_string()),
	}
}
