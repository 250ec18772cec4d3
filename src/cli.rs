//! Command line front end.
//!
//! Each subcommand is a thin wrapper over [`crate::processing`]. Output is
//! returned as a string so `main` only has to print it.

use crate::config::Config;
use crate::models::{Ipv4Block, Ipv4Value};
use crate::output::{render, NamedValues, OutputFormat};
use crate::processing::{
    apply_field_edit, derived_values_of, int_to_ip, ip_to_int, is_valid_address, is_valid_cidr,
    is_valid_prefix, mask_to_prefix, network_details, prefix_to_mask, Field,
};
use crate::report::{read_report, report_rows};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "cidrmate", version, about = "IPv4 CIDR calculator")]
pub struct Cli {
    /// Output format: text, csv or json (overrides CIDRMATE_FORMAT)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every derived value for one or more CIDRs
    Show {
        /// CIDRs such as 192.168.1.0/24, defaults to CIDRMATE_DEFAULT_CIDR
        cidrs: Vec<String>,
    },
    /// Network, broadcast and host range for an address and prefix length
    Details {
        ip: String,
        #[arg(allow_hyphen_values = true)]
        prefix: i64,
    },
    /// Subnet mask for a prefix length
    Mask {
        #[arg(allow_hyphen_values = true)]
        prefix: i64,
    },
    /// Prefix length for a subnet mask
    Prefix { mask: String },
    /// Unsigned integer value of an address
    Int { ip: String },
    /// Address for an integer, reduced modulo 2^32
    Ip {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Report whether a value is a valid address, prefix or CIDR
    Check { value: String },
    /// Replace one field (cidr, ip, int, prefix, mask) of a CIDR
    Edit {
        cidr: String,
        field: Field,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Derived values for every entry of a JSON report file
    Report { file: String },
}

/// Initialise log4rs from `log_config`, or log warnings to stderr if it is missing.
pub fn init_logging(log_config: &str) -> Result<(), Box<dyn Error>> {
    if Path::new(log_config).exists() {
        log4rs::init_file(log_config, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {log_config}: {e}"))?;
    } else {
        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new("{h({l})} {t} - {m}{n}")))
            .build();
        let config = LogConfig::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
        log4rs::init_config(config)?;
        log::debug!("No {log_config}, logging warnings to stderr");
    }
    Ok(())
}

/// Run the parsed command and return what should be printed.
pub fn execute(cli: &Cli, config: &Config) -> Result<String, Box<dyn Error>> {
    let format = cli.format.unwrap_or(config.format);
    let default_command = Command::Show { cidrs: vec![] };
    let command = cli.command.as_ref().unwrap_or(&default_command);
    log::debug!("execute({command:?}) format={format}");

    match command {
        Command::Show { cidrs } => {
            let cidrs = if cidrs.is_empty() {
                vec![config.default_cidr.clone()]
            } else {
                cidrs.clone()
            };
            let rows = cidrs
                .iter()
                .map(String::as_str)
                .map(named_values)
                .collect::<Result<Vec<_>, _>>()?;
            render(format, &rows)
        }
        Command::Details { ip, prefix } => {
            let details = network_details(ip, *prefix)
                .ok_or_else(|| invalid("address/prefix", &format!("{ip} {prefix}")))?;
            match format {
                OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&details)?)),
                _ => {
                    let block = Ipv4Block::new(Ipv4Value::parse(ip), *prefix);
                    let values = derived_values_of(&block)
                        .ok_or_else(|| invalid("CIDR", &block.to_string()))?;
                    render(
                        format,
                        &[NamedValues {
                            name: block.to_string(),
                            values,
                        }],
                    )
                }
            }
        }
        Command::Mask { prefix } => prefix_to_mask(*prefix)
            .map(|mask| format!("{mask}\n"))
            .ok_or_else(|| invalid("prefix", &prefix.to_string())),
        Command::Prefix { mask } => mask_to_prefix(mask)
            .map(|prefix| format!("{prefix}\n"))
            .ok_or_else(|| invalid("subnet mask", mask)),
        Command::Int { ip } => ip_to_int(ip)
            .map(|n| format!("{n}\n"))
            .ok_or_else(|| invalid("IP address", ip)),
        Command::Ip { value } => Ipv4Value::from_integer_str(value)
            .to_integer()
            .map(|n| format!("{}\n", int_to_ip(n)))
            .ok_or_else(|| invalid("integer", value)),
        Command::Check { value } => Ok(check(value)),
        Command::Edit { cidr, field, value } => apply_field_edit(cidr, *field, value)
            .map(|cidr| format!("{cidr}\n"))
            .ok_or_else(|| invalid(&format!("{field} edit"), value)),
        Command::Report { file } => {
            let entries = read_report(file)?;
            log::info!("Report {file}: {} entries", entries.len());
            render(format, &report_rows(&entries)?)
        }
    }
}

fn named_values(cidr: &str) -> Result<NamedValues, Box<dyn Error>> {
    let block = Ipv4Block::parse(cidr);
    let values = derived_values_of(&block).ok_or_else(|| invalid("CIDR", cidr))?;
    Ok(NamedValues {
        name: cidr.trim().to_string(),
        values,
    })
}

fn invalid(what: &str, value: &str) -> Box<dyn Error> {
    log::warn!("Invalid {what}: {value:?}");
    format!("Invalid {what}: {value}").into()
}

fn check(value: &str) -> String {
    let mark = |ok: bool| if ok { "yes".green() } else { "no".red() };
    format!(
        "address: {}\nprefix:  {}\ncidr:    {}\n",
        mark(is_valid_address(value)),
        mark(is_valid_prefix(value)),
        mark(is_valid_cidr(value)),
    )
}
