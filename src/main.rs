use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::process;

use camfinder::{
    config::ScanConfig,
    output::{OutputConfig, OutputFormat, OutputManager},
    scanner::{neighbors::read_arp_table, CameraScanner, DeviceReport},
    utils::{parse_ports, Logger},
    NetworkObservation,
};

fn build_cli() -> Command {
    Command::new("camfinder")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find and fingerprint IP cameras and CCTV systems on the local network")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: text, json or csv")
                .global(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the report to FILE instead of stdout")
                .global(true),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("scan")
                .about("Scan hosts for camera endpoints")
                .arg(
                    Arg::new("target")
                        .value_name("TARGET")
                        .help("IP, CIDR or hostname to scan (default: local /24)")
                        .index(1),
                )
                .arg(
                    Arg::new("ports")
                        .short('p')
                        .long("ports")
                        .value_name("PORTS")
                        .help("Ports to probe: camera, web, rtsp, extended or a list like 80,554,8000-8010"),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("MS")
                        .help("Connect timeout in milliseconds")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("banner-timeout")
                        .long("banner-timeout")
                        .value_name("MS")
                        .help("Banner read timeout in milliseconds")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("concurrency")
                        .short('c')
                        .long("concurrency")
                        .value_name("N")
                        .help("Hosts probed at once")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help("Load settings from a TOML file instead of ~/.camfinder.toml"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Report every open port, not only cameras")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-progress")
                        .long("no-progress")
                        .help("Hide the progress bar")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify a banner without touching the network")
                .arg(
                    Arg::new("ip")
                        .long("ip")
                        .value_name("IP")
                        .help("Address the banner came from")
                        .required(true),
                )
                .arg(
                    Arg::new("port")
                        .long("port")
                        .value_name("PORT")
                        .help("Port the banner came from")
                        .required(true)
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(
                    Arg::new("banner")
                        .long("banner")
                        .value_name("TEXT")
                        .help("Banner or page text (default: empty)")
                        .conflicts_with("banner-file"),
                )
                .arg(
                    Arg::new("banner-file")
                        .long("banner-file")
                        .value_name("FILE")
                        .help("Read the banner from FILE"),
                ),
        )
        .subcommand(Command::new("neighbors").about("List ARP neighbours with their estimated location"))
}

fn output_manager(matches: &ArgMatches, default_format: OutputFormat) -> anyhow::Result<OutputManager> {
    let format = match matches.get_one::<String>("format") {
        Some(format) => format.parse::<OutputFormat>().map_err(anyhow::Error::msg)?,
        None => default_format,
    };

    Ok(OutputManager::new(OutputConfig {
        format,
        file: matches.get_one::<String>("output").cloned(),
        colored: !matches.get_flag("no-color"),
    }))
}

async fn run_scan(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ScanConfig::from_toml_file(path)?,
        None => ScanConfig::load_default_config(),
    };

    if let Some(target) = matches.get_one::<String>("target") {
        config.target = Some(target.clone());
    }
    if let Some(ports) = matches.get_one::<String>("ports") {
        config.ports = parse_ports(ports)?;
    }
    if let Some(&timeout) = matches.get_one::<u64>("timeout") {
        config.timeout = timeout;
    }
    if let Some(&banner_timeout) = matches.get_one::<u64>("banner-timeout") {
        config.banner_timeout = banner_timeout;
    }
    if let Some(&concurrency) = matches.get_one::<usize>("concurrency") {
        config.concurrency = concurrency;
    }
    if matches.get_flag("all") {
        config.include_non_camera = true;
    }

    let output = output_manager(matches, config.output_format)?;
    let show_progress = !matches.get_flag("no-progress") && matches.get_one::<String>("output").is_none();

    let mut scanner = CameraScanner::new(config)?;
    if show_progress {
        let progress = ProgressBar::new(0);
        progress.set_style(ProgressStyle::with_template(
            "{spinner:.cyan} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} hosts",
        )?);
        scanner = scanner.with_progress(progress);
    }

    let report = scanner.scan().await?;
    output.write_report(&report)?;

    Ok(())
}

fn run_classify(matches: &ArgMatches) -> anyhow::Result<()> {
    let ip = matches
        .get_one::<String>("ip")
        .cloned()
        .unwrap_or_default();
    let port = matches.get_one::<u16>("port").copied().unwrap_or_default();

    let banner = match matches.get_one::<String>("banner-file") {
        Some(path) => std::fs::read_to_string(path)?,
        None => matches.get_one::<String>("banner").cloned().unwrap_or_default(),
    };

    let device = DeviceReport::from_observation(NetworkObservation::new(ip, port, banner), 0);
    output_manager(matches, OutputFormat::Text)?.write_classification(&device)?;

    Ok(())
}

async fn run_neighbors(matches: &ArgMatches) -> anyhow::Result<()> {
    let neighbors = read_arp_table().await?;
    output_manager(matches, OutputFormat::Text)?.write_neighbors(&neighbors)?;
    Ok(())
}

async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("scan", sub)) => run_scan(sub).await,
        Some(("classify", sub)) => run_classify(sub),
        Some(("neighbors", sub)) => run_neighbors(sub).await,
        _ => Ok(()),
    }
}

fn error_line(error: &anyhow::Error) -> String {
    format!("{} {}", "[!]".bright_red(), error)
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    Logger::init(Logger::level_from_verbosity(matches.get_count("verbose")));

    if let Err(e) = run(&matches).await {
        eprintln!("{}", error_line(&e));
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_scan_arguments() {
        let matches = build_cli()
            .try_get_matches_from(["camfinder", "scan", "192.168.1.0/24", "-p", "rtsp", "-f", "json"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        assert_eq!(name, "scan");
        assert_eq!(sub.get_one::<String>("target").unwrap(), "192.168.1.0/24");
        assert_eq!(sub.get_one::<String>("ports").unwrap(), "rtsp");
        assert_eq!(sub.get_one::<String>("format").unwrap(), "json");
    }

    #[tokio::test]
    async fn test_bad_target_reports_one_error_line() {
        let matches = build_cli()
            .try_get_matches_from(["camfinder", "scan", "10.0.0.0/33", "-p", "80", "--no-progress"])
            .unwrap();

        let error = run(&matches).await.unwrap_err();
        let line = error_line(&error);

        assert_eq!(line.lines().count(), 1);
        assert!(line.contains("[!]"));
        assert!(line.contains("Invalid target: IPv4 prefix length cannot exceed 32"));
    }

    #[test]
    fn test_classify_requires_port() {
        assert!(build_cli()
            .try_get_matches_from(["camfinder", "classify", "--ip", "10.0.0.1"])
            .is_err());
    }
}
