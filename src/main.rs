use std::io::BufRead;

use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use pwd_checkup::logger;
use pwd_checkup::{App, BreachDelivery, CheckupConfig, CheckupError, Event, PASSWORD_GUIDE};
use secrecy::SecretString;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(
    name = "pwd-checkup",
    version,
    about = "Password strength, breach lookup and website reachability checks"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a password and look it up in known breaches
    CheckPassword {
        /// Read the password from the first line of stdin instead of prompting
        #[arg(long)]
        stdin: bool,
    },
    /// Check whether a website answers
    CheckWebsite { url: String },
    /// Print a strong random password
    Generate,
    /// Print password management advice
    Guide,
    /// Interactive menu (default)
    Menu,
}

const MENU_CHECK_PASSWORD: &str = "🔐 Check password";
const MENU_RECOMMEND: &str = "🔑 Recommend strong password";
const MENU_CHECK_WEBSITE: &str = "🌐 Check website";
const MENU_GUIDE: &str = "📘 Password guide";
const MENU_REFRESH: &str = "🔄 Refresh results";
const MENU_QUIT: &str = "🚪 Quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::debug!("CLI args: {:?}", cli);

    let config = match CheckupConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("❌ {}: {}", e.title(), e);
            std::process::exit(1);
        }
    };

    let (mut app, mut rx) = App::new(&config)?;

    match cli.command.unwrap_or(Command::Menu) {
        Command::CheckPassword { stdin } => {
            let password = if stdin { read_stdin_line()? } else { prompt_password()? };
            let result = run_password_check(&mut app, &mut rx, password).await;
            exit_on_missing_input(result)?;
        }
        Command::CheckWebsite { url } => {
            let result = run_website_check(&mut app, url).await;
            exit_on_missing_input(result)?;
        }
        Command::Generate => {
            app.dispatch(Event::RecommendPassword).await?;
            print_recommended(&app);
        }
        Command::Guide => print!("{PASSWORD_GUIDE}"),
        Command::Menu => run_menu(&mut app, &mut rx).await?,
    }

    Ok(())
}

async fn run_menu(
    app: &mut App,
    rx: &mut mpsc::Receiver<BreachDelivery>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🛡️  pwd-checkup: password & website checker");

    // Password panel lines already printed.
    let mut shown = 0;

    loop {
        // Breach lookups run in the background; show whatever has landed.
        app.drain(rx);
        let panel = &app.state().password_panel;
        if panel.len() > shown {
            print_lines(&panel[shown..]);
            println!();
            shown = panel.len();
        }

        let mut options = vec![
            MENU_CHECK_PASSWORD,
            MENU_RECOMMEND,
            MENU_CHECK_WEBSITE,
            MENU_GUIDE,
        ];
        if app.pending_request().is_some() {
            options.push(MENU_REFRESH);
        }
        options.push(MENU_QUIT);

        let choice = match Select::new("Choose a tool:", options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let result = match choice {
            MENU_CHECK_PASSWORD => match prompt_password() {
                Ok(password) => {
                    let result = app.dispatch(Event::CheckPassword(password)).await;
                    let panel = &app.state().password_panel;
                    print_lines(panel);
                    shown = panel.len();
                    if result.is_ok() {
                        println!("⏳ Checking known breaches in the background...");
                    }
                    result
                }
                Err(InquireError::OperationCanceled) => continue,
                Err(e) => return Err(e.into()),
            },
            MENU_RECOMMEND => {
                app.dispatch(Event::RecommendPassword).await?;
                print_recommended(app);
                Ok(())
            }
            MENU_CHECK_WEBSITE => match Text::new("Enter website URL:").prompt() {
                Ok(url) => run_website_check(app, url).await,
                Err(InquireError::OperationCanceled) => continue,
                Err(e) => return Err(e.into()),
            },
            MENU_GUIDE => {
                print!("{PASSWORD_GUIDE}");
                Ok(())
            }
            MENU_REFRESH => continue,
            _ => break,
        };

        match result {
            Ok(()) => {}
            Err(e @ CheckupError::MissingInput { .. }) => {
                eprintln!("⚠️  {}: {}", e.title(), e);
            }
            Err(e) => return Err(e.into()),
        }
        println!();
    }

    Ok(())
}

/// One-shot check: waits for the breach result before returning.
async fn run_password_check(
    app: &mut App,
    rx: &mut mpsc::Receiver<BreachDelivery>,
    password: SecretString,
) -> pwd_checkup::Result<()> {
    app.dispatch(Event::CheckPassword(password)).await?;
    print_lines(&app.state().password_panel);

    let shown = app.state().password_panel.len();
    app.settle(rx).await?;
    print_lines(&app.state().password_panel[shown..]);
    Ok(())
}

async fn run_website_check(app: &mut App, url: String) -> pwd_checkup::Result<()> {
    app.dispatch(Event::CheckWebsite(url)).await?;
    print_lines(&app.state().website_panel);
    Ok(())
}

/// Missing input exits with 2; configuration and startup errors use 1.
fn exit_on_missing_input(result: pwd_checkup::Result<()>) -> pwd_checkup::Result<()> {
    match result {
        Err(e @ CheckupError::MissingInput { .. }) => {
            eprintln!("⚠️  {}: {}", e.title(), e);
            std::process::exit(2);
        }
        other => other,
    }
}

fn prompt_password() -> Result<SecretString, InquireError> {
    let password = Password::new("Enter password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_display_toggle_enabled()
        .with_help_message("Ctrl+R to show/hide the password")
        .without_confirmation()
        .prompt()?;
    Ok(SecretString::new(password.into()))
}

fn read_stdin_line() -> std::io::Result<SecretString> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
    Ok(SecretString::new(trimmed.into()))
}

fn print_recommended(app: &App) {
    if let Some(label) = app.state().recommended_label() {
        println!("{label}");
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
