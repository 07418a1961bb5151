//! CLI module for vpncheck-rs
//!
//! This module handles command line argument parsing and drives the flows.

use crate::config::AppConfig;
use crate::display::{formatter, Viewport};
use crate::error::Result;
use crate::flow::messages::LOADING;
use crate::flow::App;
use crate::geo::RequestOutcome;
use crate::menu::{MenuEvent, NavMenu, ESCAPE_KEY};
use crate::utils::path;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::{self, BufRead, Read, Write};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "vpncheck")]
#[command(version, about = "Show your public IP and its location, or look up any IPv4 address")]
#[command(long_about = "vpncheck reports the public IP address you are seen with and where it is\n\
    located, which is handy to confirm a VPN is active. It can also look up\n\
    arbitrary IPv4 addresses and render the location as a Leaflet map page.\n\n\
    Examples:\n  \
    $ vpncheck\n  \
    $ vpncheck 8.8.8.8 1.1.1.1\n  \
    $ cat ips.txt | vpncheck --json\n  \
    $ vpncheck --map-dir ~/maps 8.8.8.8\n  \
    $ vpncheck --interactive")]
pub struct Cli {
    /// IPv4 addresses to look up (read from stdin when piped, own address otherwise)
    #[arg(value_name = "IP")]
    pub queries: Vec<String>,

    /// Output JSON
    #[arg(short, long)]
    pub json: bool,

    /// Write Leaflet map pages into this directory
    #[arg(short, long, value_name = "DIR")]
    pub map_dir: Option<String>,

    /// Timeout in seconds for every request
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Interactive mode
    #[arg(short, long)]
    pub interactive: bool,

    /// Show detailed information
    #[arg(short, long)]
    pub verbose: bool,
}

const INTERACTIVE_HELP: &str = "commands:\n  \
    check            look up your own address\n  \
    lookup <ip>      look up an address (a bare address works too)\n  \
    menu             toggle the navigation menu\n  \
    link             follow a menu link\n  \
    overlay          click the menu background\n  \
    content          click inside the menu\n  \
    esc              press Escape\n  \
    quit             leave";

impl Cli {
    /// Run the CLI; returns false when any flow ended in a failure
    pub async fn run(&self, mut config: AppConfig) -> Result<bool> {
        // Apply CLI options to config
        if self.json {
            config.output.json = true;
        }
        if let Some(dir) = &self.map_dir {
            config.map.output_dir = Some(path::expand_tilde(dir));
        }
        if let Some(secs) = self.timeout {
            config.service.timeout_secs = secs;
        }

        let app = App::new(&config)?;

        if self.interactive {
            return self.run_interactive(&app, &config).await;
        }

        if !self.queries.is_empty() {
            return self.lookup_all(&app, &config, self.queries.iter().map(String::as_str)).await;
        }

        if atty::isnt(atty::Stream::Stdin) {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            let lines = buffer.lines().filter(|line| !line.trim().is_empty());
            return self.lookup_all(&app, &config, lines).await;
        }

        let outcome = with_spinner(&config, app.check_self()).await;
        print_panel(&app, &config, Viewport::SelfCheck, &outcome)?;
        Ok(outcome.is_success())
    }

    async fn lookup_all<'a>(
        &self,
        app: &App,
        config: &AppConfig,
        inputs: impl Iterator<Item = &'a str>,
    ) -> Result<bool> {
        let mut all_ok = true;
        for input in inputs {
            let outcome = with_spinner(config, app.lookup(input)).await;
            print_panel(app, config, Viewport::Lookup, &outcome)?;
            all_ok &= outcome.is_success();
        }
        Ok(all_ok)
    }

    async fn run_interactive(&self, app: &App, config: &AppConfig) -> Result<bool> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut menu = NavMenu::new();
        let mut all_ok = true;

        println!("vpncheck interactive mode (type help for commands, quit or Ctrl+D to leave)");

        for line in stdin.lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            let (command, argument) = match trimmed.split_once(char::is_whitespace) {
                Some((command, rest)) => (command, rest.trim()),
                None => (trimmed, ""),
            };

            let menu_event = match command {
                "" => continue,
                "quit" | "exit" => break,
                "help" => {
                    println!("{}", INTERACTIVE_HELP);
                    continue;
                }
                "check" => {
                    let outcome = with_spinner(config, app.check_self()).await;
                    print_panel(app, config, Viewport::SelfCheck, &outcome)?;
                    all_ok &= outcome.is_success();
                    None
                }
                "lookup" => {
                    let outcome = with_spinner(config, app.lookup(argument)).await;
                    print_panel(app, config, Viewport::Lookup, &outcome)?;
                    all_ok &= outcome.is_success();
                    None
                }
                "menu" => Some(MenuEvent::ToggleClick),
                "link" => Some(MenuEvent::LinkClick),
                "overlay" => Some(MenuEvent::OverlayClick { on_overlay: true }),
                "content" => Some(MenuEvent::OverlayClick { on_overlay: false }),
                "esc" => Some(MenuEvent::KeyDown(ESCAPE_KEY.to_string())),
                _ => {
                    let outcome = with_spinner(config, app.lookup(trimmed)).await;
                    print_panel(app, config, Viewport::Lookup, &outcome)?;
                    all_ok &= outcome.is_success();
                    None
                }
            };

            if let Some(event) = menu_event {
                menu.handle(&event);
                let view = menu.view();
                if config.output.json {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                } else {
                    println!(
                        "menu {} (aria-expanded={}, scroll {})",
                        if menu.is_open() { "open" } else { "closed" },
                        view.aria_expanded,
                        if view.body_scroll_locked { "locked" } else { "enabled" }
                    );
                }
            }
            stdout.flush()?;
        }

        Ok(all_ok)
    }
}

/// Await a flow while showing the loading text as a spinner
async fn with_spinner<F: Future<Output = RequestOutcome>>(config: &AppConfig, flow: F) -> RequestOutcome {
    if config.output.json || atty::isnt(atty::Stream::Stderr) {
        return flow.await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(LOADING.ip);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = flow.await;
    spinner.finish_and_clear();
    outcome
}

fn print_panel(app: &App, config: &AppConfig, viewport: Viewport, outcome: &RequestOutcome) -> Result<()> {
    let panel = app.panel(viewport);
    let maps = app.live_maps(viewport);

    if config.output.json {
        println!("{}", formatter::format_json(viewport, &panel, outcome, &maps)?);
    } else {
        println!(
            "{}",
            formatter::format_text(viewport, &panel, outcome, config.output.enable_colors)
        );
        if outcome.is_success() {
            if let (Some(dir), Some(_)) = (&config.map.output_dir, maps.last()) {
                println!("  Map:      {}", dir.join(format!("{}.html", viewport.map_element())).display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_must_be_positive() {
        assert!(Cli::try_parse_from(["vpncheck", "--timeout", "0"]).is_err());

        let cli = Cli::try_parse_from(["vpncheck", "--timeout", "5", "8.8.8.8"]).unwrap();
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.queries, vec!["8.8.8.8".to_string()]);
    }
}
