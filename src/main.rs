use clap::{crate_version, App as ClapApp, Arg};
use triage_tui::app::App;
use triage_tui::board::BoardKind;
use triage_tui::config::Config;
use triage_tui::error::AppResult;

#[tokio::main]
async fn main() -> AppResult<()> {
    let matches = ClapApp::new("triage-tui")
        .version(crate_version!())
        .about("A terminal user interface for educational-platform triage boards")
        .arg(
            Arg::with_name("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("board")
                .long("board")
                .value_name("KEY")
                .help("Open a specific board (moderation, support, improvement)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("offline")
                .long("offline")
                .help("Run on generated boards without a Console API"),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config-dir"))?;

    if matches.is_present("offline") {
        config.api_base_url = None;
    }
    if let Some(key) = matches.value_of("board") {
        if let Some(kind) = BoardKind::from_key(key) {
            config.default_board = kind;
        } else {
            eprintln!("Unknown board '{}'; using '{}'.", key, config.default_board.key());
        }
    }

    App::start(config).await
}
