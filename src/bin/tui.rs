use anyhow::{Result, bail};
use mindconnect::client::ApiClient;
use mindconnect::context::{SharedContext, StandardContext};
use mindconnect::model::LoginKind;
use mindconnect::session::SessionStore;
use mindconnect::tui;
use mindconnect::views::auth::LoginForm;
use rpassword::prompt_password;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    // Handle help flag
    if args
        .first()
        .is_some_and(|a| a == "--help" || a == "-h" || a == "help")
    {
        print_help();
        return Ok(());
    }

    let mut root = None;
    if let Some(pos) = args.iter().position(|a| a == "--root") {
        if pos + 1 >= args.len() {
            bail!("--root needs a directory");
        }
        root = Some(PathBuf::from(args.remove(pos + 1)));
        args.remove(pos);
    }
    let ctx: SharedContext = Arc::new(StandardContext::new(root));

    match args.first().map(String::as_str) {
        // CLI Command: mindconnect whoami
        Some("whoami") => {
            let session = SessionStore::load(ctx);
            match session.identity() {
                Some(identity) => println!(
                    "{} <{}> ({})",
                    identity.account.display_name(),
                    identity.account.email(),
                    identity.role
                ),
                None => println!("Not signed in."),
            }
            Ok(())
        }

        // CLI Command: mindconnect logout
        Some("logout") => {
            let mut session = SessionStore::load(ctx);
            session.logout()?;
            println!("Signed out.");
            Ok(())
        }

        // CLI Command: mindconnect login <email> [--therapist]
        Some("login") => {
            let Some(email) = args.get(1).cloned() else {
                bail!("usage: mindconnect login <email> [--therapist]");
            };
            let user_type = if args.iter().any(|a| a == "--therapist") {
                LoginKind::Therapist
            } else {
                LoginKind::User
            };
            let cfg = tui::load_or_onboard(&ctx).await?;
            tui::init_logging(&ctx, cfg.log_filter());

            let password = prompt_password("Password: ")?;
            let api = ApiClient::from_config(&cfg)?;
            let form = LoginForm {
                email,
                password,
                kind: user_type,
            };
            let credentials = match form.validate() {
                Ok(c) => c,
                Err(e) => bail!("{}", e.user_message()),
            };
            let payload = match api.auth().login(&credentials).await {
                Ok(p) => p,
                Err(e) => bail!("Login failed: {}", e.user_message()),
            };
            let mut session = SessionStore::load(ctx);
            let identity = session.login(payload)?;
            println!(
                "Signed in as {} ({}).",
                identity.account.display_name(),
                identity.role
            );
            Ok(())
        }

        Some(other) => {
            eprintln!("Unknown command: {}\n", other);
            print_help();
            std::process::exit(2);
        }

        // Normal TUI startup
        None => tui::run(ctx).await,
    }
}

fn print_help() {
    println!(
        "MindConnect v{} - Journals, therapy sessions and therapists from your terminal",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    mindconnect                                 Start interactive TUI");
    println!("    mindconnect login <email> [--therapist]     Sign in and store the session");
    println!("    mindconnect whoami                          Show the stored session");
    println!("    mindconnect logout                          Forget the stored session");
    println!("    mindconnect --help                          Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --root <dir>      Keep config, session and logs under <dir>");
    println!();
    println!("KEYBINDINGS:");
    println!("    Press '?' inside the app for full interactive help");
    println!("    1-9               Jump to a menu entry");
    println!("    j/k               Move the cursor");
    println!("    r                 Reload the current screen");
    println!("    O                 Sign out");
    println!("    q / Ctrl-C        Quit");
    println!();
    println!("CONFIGURATION:");
    println!("    api_url, request_timeout_secs, default_login_kind, recent_items, log_level");
    println!("    are read from config.toml. It is created on first start.");
}
