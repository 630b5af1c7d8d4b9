//! Interactive dashboard loop.

use std::future::Future;

use dashboard_core::{Dashboard, Geolocator, HISTORY_CAPACITY};
use inquire::{InquireError, Text};

use crate::render;

const HELP: &str = "Enter a city · :1-:5 recent search · :theme toggle · :quit exit";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Search(String),
    History(usize),
    ToggleTheme,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();

    let Some(command) = line.strip_prefix(':') else {
        return if line == "?" { Input::Help } else { Input::Search(line.to_string()) };
    };

    match command {
        "q" | "quit" | "exit" => Input::Quit,
        "t" | "theme" => Input::ToggleTheme,
        "h" | "help" => Input::Help,
        other => match other.parse::<usize>() {
            Ok(n) if (1..=HISTORY_CAPACITY).contains(&n) => Input::History(n - 1),
            _ => Input::Unknown(line.to_string()),
        },
    }
}

pub async fn run(dashboard: &Dashboard, geo: &dyn Geolocator) -> anyhow::Result<()> {
    follow(dashboard, dashboard.start(geo)).await;

    loop {
        let current = dashboard.snapshot().query_text;
        let Some(line) = prompt(current).await? else {
            break;
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Help => println!("{HELP}"),
            Input::ToggleTheme => {
                dashboard.toggle_theme();
                print!("{}", render::render(&dashboard.snapshot()));
            }
            Input::History(index) => {
                if !follow(dashboard, dashboard.search_history(index)).await {
                    println!("No recent search #{}", index + 1);
                }
            }
            Input::Search(text) => {
                dashboard.set_query_text(text);
                follow(dashboard, dashboard.submit()).await;
            }
            Input::Unknown(command) => println!("Unknown command {command}. {HELP}"),
        }
    }

    Ok(())
}

/// Drive `action` while showing the loading indicator, then print the settled state.
async fn follow<T>(dashboard: &Dashboard, action: impl Future<Output = T>) -> T {
    let mut rx = dashboard.subscribe();
    tokio::pin!(action);

    let mut announced = false;
    let output = loop {
        tokio::select! {
            output = &mut action => break output,
            Ok(()) = rx.changed() => {
                if !announced && rx.borrow_and_update().loading {
                    println!("{}", render::LOADING);
                    announced = true;
                }
            }
        }
    };

    print!("{}", render::render(&dashboard.snapshot()));
    output
}

/// Read one line; `None` when the user cancels with Esc or Ctrl-C.
async fn prompt(initial: String) -> anyhow::Result<Option<String>> {
    tokio::task::spawn_blocking(move || -> anyhow::Result<Option<String>> {
        match Text::new("City:").with_initial_value(&initial).with_help_message(HELP).prompt() {
            Ok(line) => Ok(Some(line)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_search() {
        assert_eq!(parse_input("  New York "), Input::Search("New York".into()));
        assert_eq!(parse_input(""), Input::Search(String::new()));
    }

    #[test]
    fn history_shortcuts_are_one_based() {
        assert_eq!(parse_input(":1"), Input::History(0));
        assert_eq!(parse_input(":5"), Input::History(4));
        assert_eq!(parse_input(":6"), Input::Unknown(":6".into()));
        assert_eq!(parse_input(":0"), Input::Unknown(":0".into()));
    }

    #[test]
    fn commands() {
        assert_eq!(parse_input(":quit"), Input::Quit);
        assert_eq!(parse_input(":q"), Input::Quit);
        assert_eq!(parse_input(":theme"), Input::ToggleTheme);
        assert_eq!(parse_input("?"), Input::Help);
        assert_eq!(parse_input(":bogus"), Input::Unknown(":bogus".into()));
    }
}
