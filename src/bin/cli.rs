//! GynAI CLI
//!
//! Command-line access to the GynAI building blocks:
//! - Validate credentials, optionally against the backend
//! - BMI and waist-hip ratio
//! - Search the doctor directory
//! - Run a risk prediction from a JSON request
//! - Convert tracker data between JSON and the CSV export format
//! - Generate a config file

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use gynai::client::{Backend, BackendClient};
use gynai::config::{generate_default_config, Config};
use gynai::doctors::{AvailabilityFilter, Directory, DirectoryStats, DoctorFilter, GeoPoint};
use gynai::prediction::{Assessment, PredictionRequest};
use gynai::tracker::{export_csv, import_csv, TrackerError, TrackerStore, TrackingEntry};
use gynai::validation::{bmi, validate_login, waist_hip_ratio};

#[derive(Parser)]
#[command(name = "gynai")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Symptom tracking, doctor search and PCOS risk assessment tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate login credentials
    CheckLogin {
        /// Email address or username
        identifier: String,
        /// Password
        password: String,
        /// Also sign in against the backend
        #[arg(long)]
        remote: bool,
    },

    /// Compute BMI
    Bmi {
        /// Weight in kg
        #[arg(short, long)]
        weight: f64,
        /// Height in cm
        #[arg(short = 'H', long)]
        height: f64,
    },

    /// Compute waist-hip ratio
    Ratio {
        #[arg(short, long)]
        waist: f64,
        #[arg(long)]
        hip: f64,
    },

    /// Search the doctor directory
    Doctors {
        /// Text matched against name, specialty and clinic
        #[arg(short, long)]
        search: Option<String>,
        /// Exact specialty
        #[arg(long)]
        specialty: Option<String>,
        /// Availability label, e.g. "Available Now"
        #[arg(short, long)]
        availability: Option<String>,
        /// Sort by distance from LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        near: Option<GeoPoint>,
        /// Directory file (default: from config)
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Run a risk prediction from a JSON request file
    Predict {
        /// Request file, as posted to /predict
        input: PathBuf,
        /// Also print recommendations
        #[arg(short, long)]
        recommendations: bool,
    },

    /// Export tracker entries (JSON) to the CSV download format
    Export {
        /// JSON array of tracking entries
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a CSV export back into tracker entries (JSON)
    Import {
        /// CSV file produced by the tracker export
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only report what would be imported
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(p) => Config::load_with_env(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(Config::load_default()),
    }
}

fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckLogin {
            identifier,
            password,
            remote,
        } => {
            let credentials = match validate_login(&identifier, &password) {
                Ok(c) => c,
                Err(errors) => {
                    for e in errors.iter() {
                        eprintln!("{}: {}", e.field, e.message);
                    }
                    bail!("credentials are not valid");
                }
            };
            println!("Credentials are well-formed");

            if remote {
                let config = load_config(cli.config.as_ref())?;
                let client = BackendClient::new(&config.backend)?;
                let user = client
                    .login(&credentials.identifier, &credentials.password)
                    .await
                    .with_context(|| format!("signing in at {}", client.base_url()))?;
                println!("Signed in as {} <{}>", user.username, user.email);
            }
        }

        Commands::Bmi { weight, height } => match bmi(weight, height) {
            Some(value) => println!("BMI: {:.1}", value),
            None => bail!("weight and height must be positive"),
        },

        Commands::Ratio { waist, hip } => match waist_hip_ratio(waist, hip) {
            Some(value) => println!("Waist-hip ratio: {:.2}", value),
            None => bail!("waist and hip must be positive"),
        },

        Commands::Doctors {
            search,
            specialty,
            availability,
            near,
            database,
        } => {
            let path = match database {
                Some(p) => p,
                None => load_config(cli.config.as_ref())?.directory.database_path,
            };
            let directory = Directory::load(&path)
                .with_context(|| format!("loading directory {}", path.display()))?;

            let mut filter = DoctorFilter::new()
                .search(search.unwrap_or_default())
                .specialty(specialty.unwrap_or_default())
                .availability(AvailabilityFilter::from_label(
                    availability.as_deref().unwrap_or_default(),
                ));
            if let Some(point) = near {
                filter = filter.near(point);
            }

            let matches = directory.search(&filter);
            let stats = DirectoryStats::from_matches(&matches);

            println!(
                "{:<4} {:<24} {:<20} {:<10} {:>6} {:>10}",
                "ID", "Name", "Specialty", "Status", "Rating", "Distance"
            );
            println!("{}", "-".repeat(80));
            for m in &matches {
                let distance = m
                    .distance_km
                    .map(|d| format!("{:.2} km", d))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<4} {:<24} {:<20} {:<10} {:>6.1} {:>10}",
                    m.doctor.id,
                    m.doctor.name,
                    m.doctor.specialty,
                    m.doctor.availability,
                    m.doctor.rating,
                    distance
                );
            }
            println!(
                "\n{} found, {} available now, average rating {:.1}",
                stats.total, stats.available_now, stats.average_rating
            );
        }

        Commands::Predict {
            input,
            recommendations,
        } => {
            let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
            let request: PredictionRequest = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", input.display()))?;

            let config = load_config(cli.config.as_ref())?;
            let client = BackendClient::new(&config.backend)?;
            let result = client
                .predict(&request)
                .await
                .with_context(|| format!("calling {}/predict", client.prediction_url()))?;

            let assessment = Assessment::new(request, result);
            let risk = assessment.risk();
            println!("{}", risk.headline());
            println!("{}", risk.description());
            println!("Confidence: {}%", assessment.result.confidence_percent());

            let factors = assessment.risk_factors();
            if factors.is_empty() {
                println!("\nNo major risk factors identified");
            } else {
                println!("\nRisk factors:");
                for f in &factors {
                    println!("  - {} ({} impact)", f.factor, f.impact.label());
                }
            }

            if recommendations {
                let recs = assessment.recommendations();
                for (heading, items) in [
                    ("Diet", &recs.diet),
                    ("Exercise", &recs.exercise),
                    ("Lifestyle", &recs.lifestyle),
                ] {
                    println!("\n{}:", heading);
                    for r in items {
                        println!("  - {}: {}", r.title, r.desc);
                    }
                }
            }
        }

        Commands::Export { input, output } => {
            let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
            let entries: Vec<TrackingEntry> = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", input.display()))?;

            let mut store = TrackerStore::new();
            for entry in entries {
                store.upsert(entry);
            }

            match export_csv(store.all(), Local::now().date_naive()) {
                Ok(export) => {
                    let target = output.unwrap_or_else(|| PathBuf::from(&export.filename));
                    write_output(Some(&target), &export.content)?;
                    println!("Exported {} entries", export.rows);
                }
                Err(TrackerError::NothingToExport) => bail!("No data to export yet"),
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Import {
            input,
            output,
            dry_run,
        } => {
            let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
            let report = import_csv(BufReader::new(file))?;

            eprintln!(
                "Processed {} rows: {} imported, {} failed",
                report.rows_processed,
                report.entries.len(),
                report.rows_failed
            );
            for e in &report.errors {
                eprintln!("  {}", e);
            }

            if !dry_run {
                let mut store = TrackerStore::new();
                report.apply(&mut store);
                let entries: Vec<&TrackingEntry> = store.all().collect();
                write_output(output.as_ref(), &serde_json::to_string_pretty(&entries)?)?;
            }
        }

        Commands::Config { output } => {
            write_output(output.as_ref(), &generate_default_config())?;
        }
    }

    Ok(())
}
