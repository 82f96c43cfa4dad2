use anyhow::Result;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use saasflow::accounts::registration::{submit_registration, RegistrationForm, SimulatedGateway};
use saasflow::billing::BillingInterval;
use saasflow::config::Config;
use saasflow::fixtures::Fixtures;
use saasflow::shell::{SearchField, SidebarState};
use saasflow::views::{render_route, DashboardContext, RenderOptions, Route};

const USAGE: &str = "usage: saasflow [ROUTE] [ARGS...] [--collapsed]

  saasflow /dashboard
  saasflow /admin/users <search>
  saasflow /pricing yearly
  saasflow /register <name> <email> <password>";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    match &config.source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut sidebar = SidebarState::new();
    if let Some(pos) = args.iter().position(|a| a == "--collapsed") {
        args.remove(pos);
        sidebar.toggle();
    }

    let route = match args.first() {
        Some(path) => Route::parse(path)?,
        None => Route::Overview,
    };
    let rest = args.get(1..).unwrap_or_default();

    let data = Fixtures::load(config.fixtures_path.as_deref()).await?;
    let ctx = DashboardContext::new(&data, &config)?;
    info!("Rendering {} for {}", route.path(), ctx.current_user.email);

    if route == Route::Register {
        return register(&config, rest).await;
    }

    let mut search = SearchField::default();
    search.set(rest.join(" "));

    let options = RenderOptions {
        search,
        interval: match rest.first().map(String::as_str) {
            Some("yearly") | Some("annual") => Some(BillingInterval::Yearly),
            _ => None,
        },
        sidebar,
    };

    print!("{}", render_route(&ctx, route, &options)?);
    Ok(())
}

async fn register(config: &Config, args: &[String]) -> Result<()> {
    let [name, email, password] = args else {
        eprintln!("{}", USAGE);
        anyhow::bail!("/register expects <name> <email> <password>");
    };

    let form = RegistrationForm {
        name: name.clone(),
        email: email.clone(),
        password: password.clone(),
        accept_terms: true,
    };

    let gateway = SimulatedGateway::new(config.submit_delay());
    println!("Creating account...");

    // Ctrl+C tears the form down mid-submit
    let cancel = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let outcome = submit_registration(&gateway, &form, cancel).await?;
    println!("Welcome aboard, {}! Continue at {}", outcome.email, outcome.redirect_to);
    Ok(())
}
