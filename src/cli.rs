use crate::{
    adapters::csv::CsvFileSink,
    config::{AddressDefaults, Config},
    gateways,
};
use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};
use geoconsensus_core::{
    entities::*,
    gateways::sink::ResultSink as _,
    usecases::{geocode_address, geocode_addresses},
};
use std::{fs, path::PathBuf};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode a single address and print the answers
    Locate {
        /// Street address, e.g. "CLL 131A 9"
        address: String,
        #[command(flatten)]
        location: Location,
        /// Append the result to this CSV file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Geocode all addresses of a file (one per line)
    Batch {
        /// Lines that are empty or start with '#' are skipped
        input: PathBuf,
        /// CSV file [default: from the configuration]
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        #[command(flatten)]
        location: Location,
    },
}

/// Overrides the configured address defaults.
#[derive(Debug, Default, clap::Args)]
struct Location {
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    country: Option<String>,
}

impl Location {
    fn complete(&self, defaults: &AddressDefaults, street: &str) -> Address {
        Address {
            street: Some(street.to_string()),
            city: self.city.clone().or_else(|| defaults.city.clone()),
            country: self.country.clone().or_else(|| defaults.country.clone()),
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let cfg = Config::try_load_from_file_or_default(args.config.as_deref())?;

    let registry = gateways::geocoding_registry(&cfg.geocoding)?;
    let aggregator = registry.into_aggregator(cfg.geocoding.providers.clone())?;
    let metric = cfg.geocoding.metric;

    match args.command {
        Command::Locate {
            address,
            location,
            output,
        } => {
            let street = non_blank_street(&address)?;
            let query = location
                .complete(&cfg.address, street)
                .to_forward_query_string();
            let record = geocode_address(&aggregator, metric, &query);
            print_record(&record);
            if let Some(path) = output {
                let mut sink = CsvFileSink::new(path, aggregator.providers().clone());
                sink.append(&record)
                    .with_context(|| format!("Unable to write {}", sink.path().display()))?;
            }
        }
        Command::Batch {
            input,
            output,
            location,
        } => {
            let content = fs::read_to_string(&input)
                .with_context(|| format!("Unable to read {}", input.display()))?;
            let queries = addresses(&content).map(|street| {
                location
                    .complete(&cfg.address, street)
                    .to_forward_query_string()
            });
            let output = output.unwrap_or_else(|| cfg.output.file.clone());
            log::info!("Write results to {}", output.display());
            let mut sink = CsvFileSink::new(output, aggregator.providers().clone());
            let summary = geocode_addresses(&aggregator, metric, queries, &mut sink)?;
            println!(
                "Processed {} address(es), {} with less than two coordinates",
                summary.processed, summary.unresolved
            );
        }
    }
    Ok(())
}

// Without a street only the city would be located
fn non_blank_street(address: &str) -> Result<&str> {
    let street = address.trim();
    if street.is_empty() {
        bail!("The address must not be empty");
    }
    Ok(street)
}

fn addresses(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn print_record(record: &GeocodeRecord) {
    println!("{}", record.address);
    for (provider, coordinate) in record.result.iter() {
        match coordinate.point() {
            Some(pt) => println!("  {:<10} {pt}", provider.as_str()),
            None => println!("  {:<10} -", provider.as_str()),
        }
    }
    println!("  {:<10} {}", "max error", record.max_error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn skip_comments_and_blank_lines() {
        let content = "# street addresses\nCLL 131A 9\n\n   \n  KR 7 # 32-16  \n#AV 68\n";
        let lines: Vec<_> = addresses(content).collect();
        assert_eq!(vec!["CLL 131A 9", "KR 7 # 32-16"], lines);
    }

    #[test]
    fn reject_blank_street() {
        assert!(non_blank_street("").is_err());
        assert!(non_blank_street(" \t ").is_err());
        assert_eq!("CLL 131A 9", non_blank_street(" CLL 131A 9 ").unwrap());
    }

    #[test]
    fn complete_address_with_defaults() {
        let defaults = AddressDefaults {
            city: Some("Bogota".into()),
            country: Some("Colombia".into()),
        };
        let location = Location::default();
        assert_eq!(
            "CLL 131A 9,Bogota,Colombia",
            location
                .complete(&defaults, "CLL 131A 9")
                .to_forward_query_string()
        );
        let location = Location {
            city: Some("Medellin".into()),
            country: None,
        };
        assert_eq!(
            "CL 10,Medellin,Colombia",
            location.complete(&defaults, "CL 10").to_forward_query_string()
        );
        // An empty override drops the default
        let location = Location {
            city: Some(String::new()),
            country: None,
        };
        assert_eq!(
            "CL 10,Colombia",
            location.complete(&defaults, "CL 10").to_forward_query_string()
        );
    }

    #[test]
    fn parse_batch_command() {
        let args = Args::try_parse_from([
            "geoconsensus",
            "batch",
            "addresses.txt",
            "--output",
            "out.csv",
            "--config",
            "my.toml",
        ])
        .unwrap();
        assert_eq!(Some(PathBuf::from("my.toml")), args.config);
        match args.command {
            Command::Batch { input, output, .. } => {
                assert_eq!(PathBuf::from("addresses.txt"), input);
                assert_eq!(Some(PathBuf::from("out.csv")), output);
            }
            Command::Locate { .. } => panic!("unexpected command"),
        }
    }

    #[test]
    fn parse_locate_command() {
        let args =
            Args::try_parse_from(["geoconsensus", "locate", "CLL 131A 9", "--city", "Cali"])
                .unwrap();
        match args.command {
            Command::Locate {
                address, location, ..
            } => {
                assert_eq!("CLL 131A 9", address);
                assert_eq!(Some("Cali"), location.city.as_deref());
            }
            Command::Batch { .. } => panic!("unexpected command"),
        }
    }
}
