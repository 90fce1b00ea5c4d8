use clap::{Parser, Subcommand, ValueEnum};
use jl_app::{AppError, AppResult, RowStatus, SimulationResult, VLP_COLUMNS, VlpRow};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "jl-cli")]
#[command(about = "JetLift CLI - jet pump IPR/VLP simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a well case file
    Validate {
        /// Path to the case YAML (or JSON) file
        case_path: PathBuf,
    },
    /// Run the IPR/VLP sweep for a case
    Run {
        /// Path to the case YAML (or JSON) file
        case_path: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Run {
            case_path,
            format,
            output,
        } => cmd_run(&case_path, format, output.as_deref()),
    }
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = jl_app::load_case(case_path)?;
    let (inputs, range) = jl_app::validate_case(&case)?;
    println!("✓ Case is valid");
    println!(
        "  IPR: {:?}, q_max {:.1} STB/D",
        inputs.ipr.kind(),
        inputs.ipr.q_max()
    );
    println!("  Area ratio: {:.3}", inputs.pump.geometry.area_ratio());
    println!("  Sweep: {} points", range.points);
    for note in &inputs.notes {
        println!("  ⚠ {}", note);
    }
    Ok(())
}

fn cmd_run(case_path: &Path, format: OutputFormat, output: Option<&Path>) -> AppResult<()> {
    let case = jl_app::load_case(case_path)?;
    let start = Instant::now();
    let result = jl_app::run_case(&case)?;
    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "run complete");

    let text = match format {
        OutputFormat::Table => render_table(&result),
        OutputFormat::Json => serde_json::to_string_pretty(&result.report())?,
        OutputFormat::Csv => render_csv(&result),
    };

    if let Some(path) = output {
        std::fs::write(path, text).map_err(|e| AppError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        println!(
            "✓ Wrote {} VLP rows and {} IPR points to {}",
            result.vlp.len(),
            result.ipr.len(),
            path.display()
        );
    } else {
        print!("{}", text);
    }

    Ok(())
}

fn status_cell(row: &VlpRow) -> String {
    match &row.status {
        RowStatus::Converged => "ok".to_string(),
        RowStatus::Unconverged {
            iterations,
            residual_psi,
        } => format!("unconverged ({iterations} it, {residual_psi:.2} psi)"),
        RowStatus::Failed { message } => format!("failed: {message}"),
    }
}

fn render_table(result: &SimulationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Case: {}", result.case_name);
    if let Some(well) = &result.well_name {
        let _ = writeln!(out, "Well: {}", well);
    }
    if let Some(pump) = &result.pump_name {
        let _ = writeln!(out, "Pump: {}", pump);
    }
    let _ = writeln!(out, "Area ratio: {:.3}", result.area_ratio);
    for note in &result.notes {
        let _ = writeln!(out, "⚠ {}", note);
    }

    let _ = writeln!(out, "\nVLP");
    for name in VLP_COLUMNS {
        let _ = write!(out, "{:>24}", name);
    }
    let _ = writeln!(out, "  Status");
    for row in &result.vlp {
        match row.values() {
            Some(values) => {
                for v in values {
                    let _ = write!(out, "{:>24.2}", v);
                }
            }
            None => {
                let _ = write!(out, "{:>24}{:>24.2}", "-", row.pwf);
                for _ in 2..VLP_COLUMNS.len() {
                    let _ = write!(out, "{:>24}", "-");
                }
            }
        }
        let _ = writeln!(out, "  {}", status_cell(row));
        for w in &row.warnings {
            let _ = writeln!(out, "    ⚠ {}", w);
        }
    }

    let _ = writeln!(out, "\nIPR");
    let _ = writeln!(out, "{:>16}{:>16}", "Pressure (psi)", "Rate (STB/D)");
    for p in &result.ipr {
        let _ = writeln!(out, "{:>16.1}{:>16.2}", p.pressure_psi, p.rate_stb_d);
    }
    out
}

fn render_csv(result: &SimulationResult) -> String {
    let mut csv = VLP_COLUMNS.join(",");
    csv.push_str(",Status,Warnings\n");
    for row in &result.vlp {
        let cells: Vec<String> = match row.values() {
            Some(values) => values.iter().map(|v| v.to_string()).collect(),
            None => {
                let mut cells = vec![String::new(); VLP_COLUMNS.len()];
                cells[1] = row.pwf.to_string();
                cells
            }
        };
        let warnings: Vec<String> = row.warnings.iter().map(ToString::to_string).collect();
        csv.push_str(&format!(
            "{},{},\"{}\"\n",
            cells.join(","),
            row.status.label(),
            warnings.join("; ")
        ));
    }
    csv
}
