pub mod audit;
pub mod interfaces;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use dhcpscout_common::config::{DEFAULT_SCAN_TIMEOUT, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "dhcpscout", version)]
#[command(about = "Finds rogue DHCP servers on the local network segment.")]
#[command(
    after_help = "The authorized server file is CSV without a header: name,ipv4_address\n\
                  The redlist is written as: ipv4_address,mac_address"
)]
pub struct CommandLine {
    /// CSV file of authorized DHCP servers (name,ipv4_address)
    #[arg(
        short = 'i',
        long,
        value_name = "FILE",
        required_unless_present = "list_interfaces"
    )]
    pub input: Option<PathBuf>,

    /// File the redlist of possible rogue servers is written to
    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        required_unless_present = "list_interfaces"
    )]
    pub output: Option<PathBuf>,

    /// Network interface the discovery probe is sent from
    #[arg(
        short = 'I',
        long,
        value_name = "NAME",
        env = "DHCPSCOUT_INTERFACE",
        required_unless_present = "list_interfaces"
    )]
    pub interface: Option<String>,

    /// Seconds to listen for offers
    #[arg(
        short,
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_SCAN_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Less output, repeat to hide everything but warnings and results
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Show debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    #[arg(long)]
    pub no_banner: bool,

    /// Do not watch the keyboard for 'q' during the scan
    #[arg(long)]
    pub disable_input: bool,

    /// List interfaces usable with --interface and exit
    #[arg(long)]
    pub list_interfaces: bool,
}

/// Everything an audit needs, once `--list-interfaces` is ruled out.
pub struct AuditArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub cfg: ScanConfig,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn audit_args(&self) -> Option<AuditArgs> {
        let (input, output, interface) = (
            self.input.clone()?,
            self.output.clone()?,
            self.interface.clone()?,
        );

        let mut cfg = ScanConfig::new(interface).with_timeout(Duration::from_secs(self.timeout));
        cfg.quiet = self.quiet;
        cfg.no_banner = self.no_banner;
        cfg.disable_input = self.disable_input;

        Some(AuditArgs { input, output, cfg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<CommandLine, clap::Error> {
        CommandLine::try_parse_from(std::iter::once("dhcpscout").chain(args.iter().copied()))
    }

    #[test]
    fn full_audit_arguments_are_accepted() {
        let cli = parse(&["-i", "auth.csv", "-o", "red.csv", "-I", "eth0"]).unwrap();
        let args = cli.audit_args().unwrap();

        assert_eq!(args.input, PathBuf::from("auth.csv"));
        assert_eq!(args.output, PathBuf::from("red.csv"));
        assert_eq!(args.cfg.interface, "eth0");
        assert_eq!(args.cfg.timeout, DEFAULT_SCAN_TIMEOUT);
    }

    #[test]
    fn missing_output_is_a_usage_error() {
        let err = parse(&["-i", "auth.csv", "-I", "eth0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = parse(&["-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn list_interfaces_needs_nothing_else() {
        let cli = parse(&["--list-interfaces"]).unwrap();
        assert!(cli.list_interfaces);
        assert!(cli.audit_args().is_none());
    }

    #[test]
    fn timeout_is_configurable_but_not_zero() {
        let cli = parse(&["-i", "a", "-o", "b", "-I", "eth0", "-t", "3"]).unwrap();
        assert_eq!(cli.audit_args().unwrap().cfg.timeout, Duration::from_secs(3));

        let err = parse(&["-i", "a", "-o", "b", "-I", "eth0", "-t", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn quiet_counts_repetitions() {
        let cli = parse(&["-i", "a", "-o", "b", "-I", "eth0", "-qq"]).unwrap();
        assert_eq!(cli.audit_args().unwrap().cfg.quiet, 2);
    }
}
