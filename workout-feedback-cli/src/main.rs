//src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::stdout;
use tracing::info;

use workout_feedback_lib::{
    collect_form_data, format_number, Advice, CopyOutcome, ExerciseEntry, FeedbackForm,
    FeedbackService, FormState, Movement, Report, RowList, SystemClipboard,
};

fn main() -> Result<()> {
    // --- Check for completion generation request FIRST ---
    let cli_args = cli::parse_args(); // Parse arguments once

    // Logs go to stderr so stdout carries only the report
    let log_level = if cli_args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command(); // Get the command structure
        let bin_name = cmd.get_name().to_string(); // Get the binary name

        info!("Generating completion script for {}...", shell);
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout()); // Print script to stdout
        return Ok(()); // Exit after generating script
    }

    // Initialize the service (loads or creates the config)
    let service = FeedbackService::initialize().context("Failed to initialize feedback service")?;
    let header_color = service.config.header_color();

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } => {
            // This case is handled above, but keep it exhaustive
            unreachable!("Completion generation should have exited already");
        }
        cli::Commands::Generate {
            file,
            date,
            rpe,
            energy,
            sleep,
            sleep_duration,
            soreness,
            other,
            rows,
            copy,
            show_entries,
        } => {
            let mut form = match file {
                Some(ref path) => service.load_submission(path)?,
                None => service.new_form(),
            };

            // Flags win over the file
            let fresh = service.new_form();
            form.date = date.or(form.date).or(fresh.date);
            form.rpe = rpe.or(form.rpe);
            form.energy = energy.or(form.energy);
            form.sleep = sleep.or(form.sleep);
            form.sleep_duration = sleep_duration.or(form.sleep_duration);
            form.muscle_soreness = soreness.or(form.muscle_soreness);
            form.other_factors = other.or(form.other_factors);
            if !rows.is_empty() {
                form.rows = RowList::from_rows(rows);
            }

            if show_entries {
                print_entry_table(&collect_form_data(&form).items, header_color);
            }

            let report = service.generate(&form);
            print!("{report}");

            if copy {
                copy_to_clipboard(&service, &report);
            }
        }
        cli::Commands::Advice {
            rpe,
            energy,
            sleep,
            soreness,
        } => {
            let form = FeedbackForm {
                rpe,
                energy,
                sleep,
                muscle_soreness: soreness,
                ..Default::default()
            };
            print_advice_table(&form, header_color);
        }
        cli::Commands::Movements => print_movement_table(header_color),
        cli::Commands::Template => {
            let template = FormState {
                date: Some(String::new()),
                ..service.new_form()
            };
            print!(
                "{}",
                template
                    .to_toml()
                    .context("Failed to render submission template")?
            );
        }
        cli::Commands::ConfigPath => {
            println!("Config file is located at: {:?}", service.get_config_path());
        }
    }

    Ok(())
}

/// Copies the report, telling the user on stderr how it went.
fn copy_to_clipboard(service: &FeedbackService, report: &Report) {
    if cfg!(target_os = "linux") {
        // The process owns the clipboard contents until another program copies
        eprintln!("Holding the report on the clipboard until something else is copied...");
    }
    let mut clipboard = SystemClipboard::for_short_lived_process();
    match service.copy(&mut clipboard, report) {
        CopyOutcome::Copied => eprintln!("已复制"),
        CopyOutcome::ManualSelection => {
            eprintln!("Clipboard unavailable. Select the report text above to copy it manually.");
        }
    }
}

fn number_cell(value: Option<f64>) -> Cell {
    Cell::new(value.map_or("-".to_string(), format_number))
}

/// Prints collected exercise entries in a formatted table.
fn print_entry_table(entries: &[ExerciseEntry], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(header_color),
            Cell::new("Movement").fg(header_color),
            Cell::new("Sets").fg(header_color),
            Cell::new("Reps").fg(header_color),
            Cell::new("Weight (kg)").fg(header_color),
        ]);

    for (idx, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&entry.movement),
            number_cell(entry.sets),
            number_cell(entry.reps),
            number_cell(entry.weight),
        ]);
    }
    eprintln!("{table}"); // stderr, so piping the report stays clean
}

fn print_advice_table(form: &FeedbackForm, header_color: Color) {
    let advice = Advice::for_form(form);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Metric").fg(header_color),
            Cell::new("Input").fg(header_color),
            Cell::new("Advice").fg(header_color),
        ]);

    let rows = [
        ("RPE", form.rpe.as_deref(), advice.rpe),
        ("Energy", form.energy.as_deref(), advice.energy),
        ("Sleep", form.sleep.as_deref(), advice.sleep),
        ("Soreness", form.muscle_soreness.as_deref(), advice.muscle_soreness),
    ];
    for (metric, input, text) in rows {
        table.add_row(vec![
            Cell::new(metric),
            Cell::new(input.unwrap_or("-")),
            Cell::new(text),
        ]);
    }
    println!("{table}");
}

/// Prints the selector's movement catalogue.
fn print_movement_table(header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(header_color),
            Cell::new("Movement").fg(header_color),
            Cell::new("Key").fg(header_color),
        ]);

    for (idx, movement) in Movement::all().into_iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(movement),
            Cell::new(format!("{movement:?}")),
        ]);
    }
    println!("{table}");
}
