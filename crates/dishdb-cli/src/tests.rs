use super::*;
use crate::enrich::EnrichArgs;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["dishdb-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["dishdb-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn parses_db_count_command() {
    let cli = Cli::try_parse_from(["dishdb-cli", "db", "count"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Count
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["dishdb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn discover_defaults_defer_to_crawl_config() {
    let cli = Cli::try_parse_from(["dishdb-cli", "discover"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Discover {
            depth: None,
            max_results: None,
            min_confidence: 60,
            no_enrich: false,
        })
    ));
}

#[test]
fn discover_with_overrides() {
    let cli = Cli::try_parse_from([
        "dishdb-cli",
        "discover",
        "--depth",
        "1",
        "--max-results",
        "40",
        "--min-confidence",
        "80",
        "--no-enrich",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Discover {
            depth: Some(1),
            max_results: Some(40),
            min_confidence: 80,
            no_enrich: true,
        })
    ));
}

#[test]
fn import_is_a_dry_run_by_default() {
    let cli = Cli::try_parse_from(["dishdb-cli", "import"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Import {
            min_confidence: 70,
            limit: 50,
            depth: None,
            apply: false,
        })
    ));
}

#[test]
fn import_apply_with_limit() {
    let cli = Cli::try_parse_from(["dishdb-cli", "import", "--limit", "10", "--apply"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Import {
            limit: 10,
            apply: true,
            ..
        })
    ));
}

#[test]
fn confidence_above_u8_is_rejected() {
    let result = Cli::try_parse_from(["dishdb-cli", "import", "--min-confidence", "300"]);
    assert!(result.is_err());
}

#[test]
fn enrich_nutrition_defaults() {
    let cli = Cli::try_parse_from(["dishdb-cli", "enrich", "nutrition"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Enrich {
            command: EnrichCommands::Nutrition(EnrichArgs {
                id: None,
                batch_size: 10,
                apply: false,
            })
        })
    ));
}

#[test]
fn enrich_wiki_for_single_entry() {
    let id = "6f1c1f5e-8a40-4c43-9a3e-0c2b8f0a9d11";
    let cli = Cli::try_parse_from(["dishdb-cli", "enrich", "wiki", "--id", id, "--apply"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Enrich {
            command: EnrichCommands::Wiki(EnrichArgs {
                id: Some(ref parsed),
                apply: true,
                ..
            })
        }) if parsed.to_string() == id
    ));
}

#[test]
fn enrich_rejects_malformed_id() {
    let result = Cli::try_parse_from(["dishdb-cli", "enrich", "wiki", "--id", "jollof"]);
    assert!(result.is_err());
}

#[test]
fn recipes_takes_query_and_number() {
    let cli = Cli::try_parse_from(["dishdb-cli", "recipes", "egusi soup", "--number", "3"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Recipes { ref query, number: 3 }) if query == "egusi soup"
    ));
}
