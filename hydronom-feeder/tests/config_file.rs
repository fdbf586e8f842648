//! TOML file loading and flag layering.

use clap::Parser;
use hydronom_feeder::cli::Args;
use hydronom_feeder::clock::SimulatedClock;
use hydronom_feeder::feeder::Feeder;
use hydronom_feeder::sink::MemorySink;
use hydronom_feeder::{FeederConfig, FeederError, VehicleType};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_then_flags() {
    let file = write_config(
        r#"
[endpoint]
url = "http://file-host:5000/api/telemetry"
timeout_ms = 750

[vehicle]
id = "hydronom-sub-01"
type = "sub"

[simulation]
hz = 2.0
leak_after_s = 45.0
"#,
    );
    let path = file.path().to_str().unwrap();

    let args = Args::try_parse_from(["hydronom-feeder", "--config", path, "--hz", "10"]).unwrap();
    let config = args.resolve().unwrap();

    assert_eq!(config.endpoint.url, "http://file-host:5000/api/telemetry");
    assert_eq!(config.endpoint.timeout_ms, 750);
    assert_eq!(config.vehicle.id, "hydronom-sub-01");
    assert_eq!(config.vehicle.vehicle_type, VehicleType::Sub);
    assert_eq!(config.simulation.hz, 10.0);
    assert_eq!(config.simulation.leak_after_s, Some(45.0));
    assert_eq!(config.simulation.start_soc_pct, 90.0);
}

#[test]
fn test_missing_file_is_io_error() {
    let args = Args::try_parse_from([
        "hydronom-feeder",
        "--config",
        "/nonexistent/hydronom-feeder.toml",
    ])
    .unwrap();
    assert!(matches!(args.resolve(), Err(FeederError::Io(_))));
}

#[test]
fn test_malformed_file_is_config_error() {
    let file = write_config("[simulation]\nhz = \"fast\"\n");
    let result = FeederConfig::load(file.path());
    assert!(matches!(result, Err(FeederError::Config(_))));
}

#[test]
fn test_out_of_range_flags_fail_at_startup() {
    for flags in [
        ["--leak-after", "1e20"],
        ["--hz", "1e-30"],
        ["--heading", "NaN"],
        ["--heading", "inf"],
    ] {
        let args = Args::try_parse_from(["hydronom-feeder", flags[0], flags[1]]).unwrap();
        let config = args.resolve().unwrap();
        let result = Feeder::new(config, MemorySink::new(), SimulatedClock::new());
        assert!(
            matches!(result, Err(FeederError::Config(_))),
            "{} {} should be rejected",
            flags[0],
            flags[1]
        );
    }
}

#[test]
fn test_thruster_values_from_file_are_checked() {
    let file = write_config("[vehicle]\nleft_pwm = 2000000000\nright_pwm = 2000000000\n");
    let config = FeederConfig::load(file.path()).unwrap();
    assert!(matches!(config.validate(), Err(FeederError::Config(_))));
}
