use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rf_core::units::{as_rpm, rad_per_s};
use rf_project::Project;
use rf_sim::{SimOptions, SimRecord, run_rig};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Project error: {0}")]
    Project(#[from] rf_project::ProjectError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] rf_sim::SimError),

    #[error("Motor not found: {0}")]
    MotorNotFound(u32),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "rf-cli")]
#[command(about = "RotorFlow CLI - multirotor motor model bench", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and motor configuration
    Validate {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// List motors in a project
    Motors {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// Run the bench rig
    Run {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Tick period in seconds (overrides the project)
        #[arg(long)]
        dt: Option<f64>,
        /// End time in seconds (overrides the project)
        #[arg(long)]
        t_end: Option<f64>,
        /// Only export this motor number
        #[arg(long)]
        motor: Option<u32>,
        /// Output CSV file path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the full record as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Motors { project_path } => cmd_motors(&project_path),
        Commands::Run {
            project_path,
            dt,
            t_end,
            motor,
            output,
            json,
        } => cmd_run(&project_path, dt, t_end, motor, output.as_deref(), json),
    }
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    // Loading validates: missing joint, link or direction is reported here.
    let project = rf_project::load(project_path)?;
    println!("✓ Project is valid ({} motors)", project.motors.len());
    Ok(())
}

fn cmd_motors(project_path: &Path) -> CliResult<()> {
    let project = rf_project::load(project_path)?;

    if project.motors.is_empty() {
        println!("No motors found in project");
        return Ok(());
    }

    println!("Motors in project '{}':", project.name);
    for motor in &project.motors {
        let direction = motor
            .turning_direction
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  [{}] joint={} link={} dir={} k_f={:.3e} k_m={:.3e} tau_up={:.4}s tau_down={:.4}s max={:.0} rad/s ({:.0} rpm)",
            motor.motor_number,
            motor.joint_name.as_deref().unwrap_or("?"),
            motor.link_name.as_deref().unwrap_or("?"),
            direction,
            motor.params.motor_constant,
            motor.params.moment_constant,
            motor.params.time_constant_up_s,
            motor.params.time_constant_down_s,
            motor.params.max_rot_velocity,
            as_rpm(rad_per_s(motor.params.max_rot_velocity)),
        );
    }
    Ok(())
}

fn cmd_run(
    project_path: &Path,
    dt: Option<f64>,
    t_end: Option<f64>,
    motor: Option<u32>,
    output: Option<&Path>,
    json: bool,
) -> CliResult<()> {
    let project = rf_project::load(project_path)?;
    if let Some(n) = motor
        && project.motor(n).is_none()
    {
        return Err(CliError::MotorNotFound(n));
    }

    let mut opts = SimOptions::from_def(&project.sim);
    if let Some(dt) = dt {
        opts.dt = dt;
    }
    if let Some(t_end) = t_end {
        opts.t_end = t_end;
    }

    println!("Running rig for project: {}", project.name);
    println!("  dt = {:.4} s, t_end = {:.3} s", opts.dt, opts.t_end);
    tracing::info!(path = %project_path.display(), "loaded project");

    let started = Instant::now();
    let record = run_rig(&project, &opts)?;
    println!(
        "✓ {} ticks in {:.3}s wall time",
        record.steps,
        started.elapsed().as_secs_f64()
    );
    print_summary(&project, &record);

    let body = if json {
        serde_json::to_string_pretty(&record)?
    } else {
        to_csv(&record, motor)
    };

    if let Some(path) = output {
        std::fs::write(path, body)?;
        println!("✓ Exported {} time points to {}", record.t.len(), path.display());
    } else if json || motor.is_some() {
        print!("{}", body);
    }

    Ok(())
}

fn print_summary(project: &Project, record: &SimRecord) {
    let Some(last) = record.last() else {
        println!("  No ticks recorded");
        return;
    };

    println!("\nFinal state:");
    for sample in last {
        println!(
            "  motor {}: ref={:.2} rad/s ({:.0} rpm)  thrust={:.4} N  yaw torque={:+.5} N·m",
            sample.motor_number,
            sample.reference_speed,
            as_rpm(rad_per_s(sample.reference_speed)),
            sample.thrust_n,
            sample.reaction_torque_nm,
        );
    }
    let total_thrust: f64 = last.iter().map(|s| s.thrust_n).sum();
    let total_yaw: f64 = last.iter().map(|s| s.reaction_torque_nm).sum();
    println!("  total: thrust={:.4} N  yaw torque={:+.5} N·m", total_thrust, total_yaw);

    if record.aliasing_ticks.is_empty() {
        return;
    }
    println!("\nAliasing warnings:");
    for (motor, ticks) in &record.aliasing_ticks {
        let slowdown = project
            .motor(*motor)
            .map(|m| m.params.rotor_velocity_slowdown_sim)
            .unwrap_or_default();
        println!(
            "  motor {}: {} of {} ticks (slowdown {})",
            motor, ticks, record.steps, slowdown
        );
    }
}

fn to_csv(record: &SimRecord, motor: Option<u32>) -> String {
    let mut csv = String::from(
        "time_s,motor,command,reference_speed,real_speed,joint_velocity_command,thrust_n,reaction_torque_nm,drag_x,drag_y,drag_z,rolling_x,rolling_y,rolling_z,aliasing\n",
    );
    for (t, row) in record.t.iter().zip(&record.samples) {
        for s in row {
            if motor.is_some_and(|n| n != s.motor_number) {
                continue;
            }
            let _ = writeln!(
                csv,
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
                t,
                s.motor_number,
                s.command,
                s.reference_speed,
                s.real_speed,
                s.joint_velocity_command,
                s.thrust_n,
                s.reaction_torque_nm,
                s.drag_n[0],
                s.drag_n[1],
                s.drag_n[2],
                s.rolling_moment_nm[0],
                s.rolling_moment_nm[1],
                s.rolling_moment_nm[2],
                s.aliasing as u8,
            );
        }
    }
    csv
}
