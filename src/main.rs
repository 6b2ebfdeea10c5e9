use clap::{Args, Parser, Subcommand};
use eventpass::access::types::{DaySet, PassType, Role, UserAttributes};
use eventpass::access::{Identity, Resolution};
use eventpass::errors::AppError;
use eventpass::{settings, web};
use miette::Result;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "eventpass",
    version,
    about = "Role and pass-type access policy engine for event apps"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Print the permissions, navigation and data scope for one identity
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
struct ResolveArgs {
    #[arg(long)]
    role: String,
    /// Pass type, only meaningful for attendees
    #[arg(long)]
    pass: Option<String>,
    #[arg(long)]
    venue: Option<String>,
    #[arg(long)]
    edition: Option<i32>,
    #[arg(long)]
    multi_venue: bool,
    #[arg(long)]
    user_id: Option<String>,
    /// Extra day restriction, e.g. --days 1,2
    #[arg(long, value_delimiter = ',')]
    days: Vec<u8>,
}

impl ResolveArgs {
    fn identity(&self) -> Result<Identity, AppError> {
        let days = if self.days.is_empty() {
            None
        } else {
            Some(DaySet::new(&self.days)?)
        };
        let attributes = UserAttributes {
            user_id: self.user_id.clone(),
            venue: self.venue.clone(),
            edition: self.edition,
            multi_venue: self.multi_venue,
            days,
        };
        Ok(Identity::new(
            Role::parse(&self.role),
            self.pass.as_deref().map(PassType::parse),
            attributes,
        ))
    }
}

fn resolve_to_json(args: &ResolveArgs) -> Result<String, AppError> {
    let identity = args.identity()?;
    let resolution = Resolution::for_identity(&identity);
    Ok(serde_json::to_string_pretty(&resolution)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let settings = settings::Settings::load(&cli.config)?;
            tracing::info!(?settings, "Loaded configuration");
            web::serve(settings).await?;
        }
        Command::Resolve(args) => {
            println!("{}", resolve_to_json(&args)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn test_default_command_is_serve() {
        let cli = parse(&["eventpass"]);
        assert_eq!(cli.config, "config.toml");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_resolve_command_json() {
        let cli = parse(&[
            "eventpass", "resolve", "--role", "attendee", "--pass", "combo", "--venue", "north",
            "--days", "1,2",
        ]);
        let Some(Command::Resolve(args)) = cli.command else {
            panic!("expected resolve command");
        };
        let out: serde_json::Value = serde_json::from_str(&resolve_to_json(&args).unwrap()).unwrap();
        assert_eq!(out["permissions"]["canFavorite"], true);
        assert_eq!(out["scope"]["venue"], "north");
        assert_eq!(out["scope"]["days"], serde_json::json!([1, 2]));
        assert_eq!(out["navigation"][0]["route"], "/agenda");
    }

    #[test]
    fn test_resolve_rejects_bad_day() {
        let cli = parse(&["eventpass", "resolve", "--role", "speaker", "--days", "5"]);
        let Some(Command::Resolve(args)) = cli.command else {
            panic!("expected resolve command");
        };
        assert!(matches!(resolve_to_json(&args), Err(AppError::Access(_))));
    }
}
