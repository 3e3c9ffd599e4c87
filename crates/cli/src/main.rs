use clap::{Parser, Subcommand};
use gastroplan_core::{
    constants::DEFAULT_DATA_DIR, CoreConfig, Gender, IntakeField, IntakeStep, IntakeWorkflow,
    JsonFileRepository, LabCategory, PatientRecord, PatientRepository, ScanCategory,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "gastroplan")]
#[command(about = "Gastroplan surgery planning record CLI")]
struct Cli {
    /// Directory for patient data storage
    #[arg(long, env = "GASTROPLAN_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients (seed records first, then stored records)
    List,
    /// Show one patient record by id
    Show {
        /// Patient record identifier
        id: String,
    },
    /// Run a one-shot intake and persist the resulting record
    Intake {
        /// Patient full name
        #[arg(long)]
        name: Option<String>,
        /// Date of birth (YYYY-MM-DD, accepted as-is)
        #[arg(long)]
        date_of_birth: Option<String>,
        /// Gender (male/female, anything else records as Other)
        #[arg(long)]
        gender: Option<String>,
        /// Weight history narrative
        #[arg(long)]
        weight_history: Option<String>,
        /// Comorbidities narrative
        #[arg(long)]
        comorbidities: Option<String>,
        /// Surgical history narrative
        #[arg(long)]
        surgical_history: Option<String>,
        /// Medications narrative
        #[arg(long)]
        medications: Option<String>,
        /// Psychosocial history narrative
        #[arg(long)]
        psychosocial_history: Option<String>,
        /// Uploaded scan, as "<category>=<filename>" (repeatable)
        #[arg(long = "scan")]
        scans: Vec<String>,
        /// Lab result, as "<category>=<result>" (repeatable)
        #[arg(long = "lab")]
        labs: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Arc::new(CoreConfig::new(cli.data_dir));
    let repository = JsonFileRepository::new(cfg);

    match cli.command {
        Some(Commands::List) => {
            for record in repository.list_all() {
                println!(
                    "{}  {:<24} {}  age {:>3}  scans {}  sims {}  [{}]",
                    record.id,
                    record.name,
                    record.medical_record_number,
                    record.age,
                    record.scan_count,
                    record.simulation_count,
                    record.status
                );
            }
        }
        Some(Commands::Show { id }) => match repository.get_by_id(&id) {
            Some(record) => print_record(&record),
            None => println!("No patient found with id {id}"),
        },
        Some(Commands::Intake {
            name,
            date_of_birth,
            gender,
            weight_history,
            comorbidities,
            surgical_history,
            medications,
            psychosocial_history,
            scans,
            labs,
        }) => {
            let mut workflow = IntakeWorkflow::new();

            let form = workflow.form_mut();
            form.update_field(IntakeField::FullName, name.unwrap_or_default());
            form.update_field(IntakeField::DateOfBirth, date_of_birth.unwrap_or_default());
            form.set_gender(Gender::parse_permissive(&gender.unwrap_or_default()));
            form.update_field(IntakeField::WeightHistory, weight_history.unwrap_or_default());
            form.update_field(IntakeField::Comorbidities, comorbidities.unwrap_or_default());
            form.update_field(
                IntakeField::SurgicalHistory,
                surgical_history.unwrap_or_default(),
            );
            form.update_field(IntakeField::Medications, medications.unwrap_or_default());
            form.update_field(
                IntakeField::PsychosocialHistory,
                psychosocial_history.unwrap_or_default(),
            );

            workflow.go_next();
            for entry in scans {
                let (category_name, reference_name) = split_pair(&entry);
                match ScanCategory::from_display_name(category_name) {
                    Some(category) => workflow.form_mut().set_scan_uploaded(category, reference_name),
                    None => eprintln!("Skipping unknown scan category: {category_name}"),
                }
            }

            workflow.jump_to_step(IntakeStep::Labs);
            for entry in labs {
                let (category_name, result) = split_pair(&entry);
                match LabCategory::from_display_name(category_name) {
                    Some(category) => workflow.form_mut().update_lab_result(category, result),
                    None => eprintln!("Skipping unknown lab category: {category_name}"),
                }
            }

            match workflow.submit(&repository) {
                Ok(record) => {
                    println!("Created patient record {}", record.id);
                    print_record(&record);
                }
                Err(e) => eprintln!("Error submitting intake: {e}"),
            }
        }
        None => {
            println!("Use 'gastroplan --help' for commands");
        }
    }

    Ok(())
}

/// Split a "key=value" argument; a missing '=' leaves the value empty.
fn split_pair(entry: &str) -> (&str, &str) {
    match entry.split_once('=') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => (entry.trim(), ""),
    }
}

fn print_record(record: &PatientRecord) {
    println!("ID:      {}", record.id);
    println!("Name:    {}", record.name);
    println!("MRN:     {}", record.medical_record_number);
    println!("Age:     {}", record.age);
    println!("Gender:  {}", record.gender);
    println!("Status:  {}", record.status);
    println!("Last activity: {}", record.last_activity);
    println!(
        "Scans: {} uploaded, simulations: {}",
        record.scan_count, record.simulation_count
    );
    for (category, entry) in &record.scan_checklist {
        let mark = if entry.uploaded { "x" } else { " " };
        if entry.reference_name.is_empty() {
            println!("  [{mark}] {category}");
        } else {
            println!("  [{mark}] {category} ({})", entry.reference_name);
        }
    }
    for (category, result) in &record.lab_checklist {
        if result.is_empty() {
            println!("  {category}: -");
        } else {
            println!("  {category}: {result}");
        }
    }
}
