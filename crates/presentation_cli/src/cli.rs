//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "weatherdesk")]
#[command(author, version, about = "Weather for the WeatherDesk office locations", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "WEATHERDESK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the available locations
    Locations {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch and show the weather for a location
    Show {
        /// Location id or name, e.g. `7` or `berlin`
        location: String,

        /// Print the store snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether the weather service is reachable
    Health,

    /// Print the effective configuration as TOML
    Config,
}

/// Log filter for a given number of `-v` flags
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
        let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
        Cli::try_parse_from(os_args)
    }

    #[test]
    fn parses_locations() {
        let cli = parse_args(&["weatherdesk", "locations"]).unwrap();
        assert!(matches!(cli.command, Commands::Locations { json: false }));
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_locations_json() {
        let cli = parse_args(&["weatherdesk", "locations", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Locations { json: true }));
    }

    #[test]
    fn parses_show_with_name() {
        let cli = parse_args(&["weatherdesk", "show", "Munich"]).unwrap();
        match cli.command {
            Commands::Show { location, json } => {
                assert_eq!(location, "Munich");
                assert!(!json);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_show_with_id_and_json() {
        let cli = parse_args(&["weatherdesk", "show", "7", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Show { ref location, json: true } if location == "7"));
    }

    #[test]
    fn show_requires_location() {
        assert!(parse_args(&["weatherdesk", "show"]).is_err());
    }

    #[test]
    fn parses_health_and_config() {
        assert!(matches!(
            parse_args(&["weatherdesk", "health"]).unwrap().command,
            Commands::Health
        ));
        assert!(matches!(
            parse_args(&["weatherdesk", "config"]).unwrap().command,
            Commands::Config
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse_args(&["weatherdesk", "show", "berlin", "-vv", "--config", "desk.toml"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("desk.toml")));
    }

    #[test]
    fn unknown_command_fails() {
        assert!(parse_args(&["weatherdesk", "forecast"]).is_err());
    }

    #[test]
    fn missing_command_fails() {
        assert!(parse_args(&["weatherdesk"]).is_err());
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(0), None);
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(3), Some("trace"));
        assert_eq!(log_filter_from_verbosity(10), Some("trace"));
    }

    #[test]
    fn command_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
