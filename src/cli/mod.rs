use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::application::FleetService;
use crate::storage::SnapshotStore;

/// Flotilla - Boat Fleet Expense Ledger
#[derive(Parser)]
#[command(name = "flotilla")]
#[command(about = "A local-first boat fleet expense ledger for the command line")]
#[command(version)]
pub struct Cli {
    /// CSV file to seed the fleet from (skips any saved snapshot)
    pub csv: Option<String>,

    /// Snapshot file path
    #[arg(short, long, default_value = "fleet.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let store = SnapshotStore::new(&self.database);

        let mut service = match &self.csv {
            Some(path) => {
                let mut service = FleetService::with_empty(store);
                match service.load_csv_path(path) {
                    Ok(result) => {
                        println!("Fleet data loaded from CSV file.");
                        if self.verbose {
                            for err in &result.errors {
                                eprintln!("[Import] line {}: {}", err.line, err.error);
                            }
                        }
                        if result.skipped > 0 {
                            eprintln!("Skipped {} malformed record(s).", result.skipped);
                        }
                    }
                    Err(err) => {
                        eprintln!("ERROR: Failed to load fleet data from CSV file: {}", err);
                    }
                }
                service
            }
            None => {
                let (service, restored) = FleetService::restore(store);
                if restored {
                    println!("Fleet data loaded from database.");
                } else {
                    println!("No existing fleet data found. Starting fresh.");
                }
                service
            }
        };

        let stdin = io::stdin();
        run_menu(&mut service, &mut stdin.lock())?;

        match service.save() {
            Ok(()) => println!("Fleet data saved to database."),
            Err(err) => eprintln!("ERROR: Failed to save fleet data: {}", err),
        }
        println!("Exiting the Fleet Management System");
        Ok(())
    }
}

/// Dispatch on the uppercased first character of each reply until the user
/// exits or input runs out.
fn run_menu(service: &mut FleetService, input: &mut impl BufRead) -> Result<()> {
    loop {
        let Some(reply) = prompt("\n(P)rint, (A)dd, (R)emove, (E)xpense, e(X)it : ", input)?
        else {
            break;
        };
        let Some(choice) = reply.trim().chars().next() else {
            continue;
        };

        match choice.to_ascii_uppercase() {
            'P' => println!("{}", service.report()),
            'A' => {
                if !add_boat(service, input)? {
                    break;
                }
            }
            'R' => {
                if !remove_boat(service, input)? {
                    break;
                }
            }
            'E' => {
                if !manage_expense(service, input)? {
                    break;
                }
            }
            'X' => break,
            _ => println!("Invalid menu option, try again."),
        }
    }
    Ok(())
}

/// Returns false when input ran out mid-dialog.
fn add_boat(service: &mut FleetService, input: &mut impl BufRead) -> Result<bool> {
    let Some(line) = prompt("Please enter the new boat CSV data: ", input)? else {
        return Ok(false);
    };

    match service.add_record(&line) {
        Ok(()) => println!("Boat added successfully."),
        Err(err) => println!("Failed to add boat: {}", err),
    }
    Ok(true)
}

fn remove_boat(service: &mut FleetService, input: &mut impl BufRead) -> Result<bool> {
    let Some(name) = prompt("Which boat do you want to remove? : ", input)? else {
        return Ok(false);
    };

    match service.remove_boat(name.trim()) {
        Ok(()) => println!("Boat removed successfully."),
        Err(err) => println!("{}", err),
    }
    Ok(true)
}

fn manage_expense(service: &mut FleetService, input: &mut impl BufRead) -> Result<bool> {
    let Some(name) = prompt("Which boat do you want to spend on? : ", input)? else {
        return Ok(false);
    };
    let name = name.trim().to_string();

    // Reject unknown boats before asking for an amount
    if !service.exists(&name) {
        println!("Cannot find boat {}.", name);
        return Ok(true);
    }

    let Some(amount_str) = prompt("How much do you want to spend?      : ", input)? else {
        return Ok(false);
    };
    let amount: f64 = match amount_str.trim().parse() {
        Ok(amount) => amount,
        Err(_) => {
            println!("Invalid amount '{}', expense not recorded.", amount_str.trim());
            return Ok(true);
        }
    };

    match service.add_expense(&name, amount) {
        Ok(new_total) => println!("Expense authorized, ${:.2} spent.", new_total),
        Err(err) => println!("{}", err),
    }
    Ok(true)
}

/// Prompt on stdout and read one reply line. `None` on end of input.
fn prompt(text: &str, input: &mut impl BufRead) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
