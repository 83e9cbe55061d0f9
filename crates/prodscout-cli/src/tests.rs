use prodscout_core::{ConfigError, ProductCategory, ProductDetails, Provider};
use rust_decimal::Decimal;

use super::*;

#[test]
fn parses_extract_command() {
    let cli = Cli::try_parse_from(["prodscout", "extract", "https://amzn.to/abc"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Extract { ref url, json: false, .. } if url == "https://amzn.to/abc"
    ));
}

#[test]
fn parses_extract_json_flag() {
    let cli = Cli::try_parse_from(["prodscout", "extract", "--json", "https://temu.com/x"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Extract { json: true, .. }));
}

#[test]
fn parses_classify_command() {
    let cli = Cli::try_parse_from(["prodscout", "classify", "https://www.shein.com/p"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Classify { .. }));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["prodscout"]).is_err());
}

#[test]
fn extract_requires_a_url() {
    assert!(Cli::try_parse_from(["prodscout", "extract"]).is_err());
}

#[test]
fn summary_flags_every_sentinel() {
    let details = ProductDetails::new(Provider::Temu, None, None, None, None);
    let summary = extract::render_summary(&details);
    assert!(summary.contains("name:        Product of Temu (needs manual entry)"));
    assert!(summary.contains("price:       0 (needs manual entry)"));
    assert!(summary.contains("description: (needs manual entry)"));
    assert_eq!(summary.matches("needs manual entry").count(), 4);
}

#[test]
fn summary_of_complete_details_has_no_flags() {
    let details = ProductDetails::new(
        Provider::Amazon,
        Some("Insulated Travel Mug".to_string()),
        Some("Keeps coffee hot.".to_string()),
        Some(Decimal::new(2499, 2)),
        Some("https://m.media-amazon.com/images/I/mug.jpg".to_string()),
    );
    let summary = extract::render_summary(&details);
    assert!(summary.contains("provider:    Amazon"));
    assert!(summary.contains("price:       24.99\n"));
    assert!(!summary.contains("needs manual entry"));
}

#[test]
fn parses_extract_category() {
    let cli = Cli::try_parse_from([
        "prodscout",
        "extract",
        "--category",
        "home_decor",
        "https://www.amazon.com/dp/B000TEST",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Extract {
            category: Some(ProductCategory::HomeDecor),
            ..
        }
    ));
}

#[test]
fn rejects_unknown_category() {
    let result = Cli::try_parse_from([
        "prodscout",
        "extract",
        "--category",
        "groceries",
        "https://www.amazon.com/dp/B000TEST",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_extract_without_category() {
    let cli = Cli::try_parse_from(["prodscout", "extract", "https://temu.com/x"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Extract { category: None, .. }
    ));
}

#[tokio::test]
async fn classify_runs_without_valid_config() {
    let cli = Cli::try_parse_from(["prodscout", "classify", "https://www.shein.com/p"])
        .expect("expected valid cli args");
    let config = Err(ConfigError::InvalidEnvVar {
        var: "PRODSCOUT_ENV".to_string(),
        reason: "expected development, test, or production; got \"staging\"".to_string(),
    });
    assert!(run(cli.command, config).await.is_ok());
}

#[tokio::test]
async fn extract_reports_invalid_config() {
    let cli = Cli::try_parse_from(["prodscout", "extract", "https://www.shein.com/p"])
        .expect("expected valid cli args");
    let config = Err(ConfigError::InvalidEnvVar {
        var: "PRODSCOUT_ENV".to_string(),
        reason: "unknown".to_string(),
    });
    let err = run(cli.command, config).await.unwrap_err();
    assert!(err.to_string().contains("PRODSCOUT_ENV"), "{err}");
}

#[test]
fn help_is_available_before_config_is_read() {
    let err = Cli::try_parse_from(["prodscout", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}
