use clap::Parser;
use colored::*;
use std::process;
use std::sync::Arc;

use fetchdogs::api::{DogApi, HttpDogApi};
use fetchdogs::app::App;
use fetchdogs::cli::Args;
use fetchdogs::config::{Config, JsonConfig};
use fetchdogs::session::{AuthSession, FilesystemSessionStore, SessionStore};
use fetchdogs::shell::{LoginPrefill, Shell};
use fetchdogs::ui::{debug, display_breeds, display_notices};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Handle --config-init option
    if args.config_init {
        match JsonConfig::init_user_config() {
            Ok(path) => {
                println!("{}", format!("Wrote {}", path.display()).green());
                return Ok(());
            }
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red(), e);
                process::exit(1);
            }
        }
    }

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    debug(config.verbose, format!("API: {}", config.api_base_url));

    let api: Arc<dyn DogApi> = match HttpDogApi::new(
        &config.api_base_url,
        config.timeout(),
        config.verbose,
    ) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    let store: Box<dyn SessionStore> = match &config.state_dir {
        Some(dir) => Box::new(FilesystemSessionStore::with_dir(dir)),
        None => match FilesystemSessionStore::new() {
            Ok(store) => Box::new(store),
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                process::exit(1);
            }
        },
    };

    let mut session = AuthSession::open(store, api.as_ref(), config.verbose);
    let authenticated = session.check_session(api.as_ref()).await;

    if args.status {
        if authenticated {
            println!("{}", "Logged in.".green());
        } else {
            println!("{}", "Not logged in.".yellow());
        }
        return Ok(());
    }

    if args.logout {
        session.logout(api.as_ref()).await;
        println!("{}", "Logged out.".green());
        return Ok(());
    }

    let mut app = App::new(Arc::clone(&api), session, config.app_settings());

    if args.list_breeds {
        if !authenticated {
            eprintln!("{} Not logged in. Run `dogs` to log in first.", "Error:".red());
            process::exit(1);
        }
        app.load_breeds().await;
        display_notices(&app.notices_mut().take_unseen());
        display_breeds(app.breeds(), None);
        return Ok(());
    }

    let prefill = LoginPrefill {
        name: args.name.clone(),
        email: args.email.clone(),
    };

    if let Err(e) = Shell::new(app).run(prefill).await {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }

    Ok(())
}
