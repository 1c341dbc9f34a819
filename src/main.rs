use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use log::error;
use std::process::ExitCode;

use heimdall_db::config::{AppEnvironment, TargetConfig, DEFAULT_DATABASE, DEFAULT_MONGODB_URI};
use heimdall_db::db::{connect_with_retry, MongoDb};
use heimdall_db::fixtures::{BcryptHasher, FixtureLoader, ResetAuthorization};
use heimdall_db::logging;
use heimdall_db::schema::{catalog, SchemaDefiner};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "heimdall-db", version, about = "Index definitions and development fixtures for Heimdall")]
struct Cli {
    #[arg(long, global = true, env = "MONGODB_URI", default_value = DEFAULT_MONGODB_URI)]
    uri: String,

    #[arg(long, global = true, env = "MONGODB_DATABASE", default_value = DEFAULT_DATABASE)]
    database: String,

    /// Extra connection attempts before giving up.
    #[arg(long, global = true, env = "MONGODB_CONNECT_RETRIES", default_value_t = 0)]
    connect_retries: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the declared index catalog as JSON.
    Plan,
    /// Create the declared indexes and print what the store has.
    Indexes {
        /// Print the inventory as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Delete every document in the blog collections.
    Reset(ResetArgs),
    /// Reset, then load the development dataset.
    Seed(SeedArgs),
    /// Create indexes, then seed.
    Setup(SeedArgs),
}

#[derive(Debug, Args)]
struct ResetArgs {
    /// Name of the target database, repeated to confirm the wipe.
    #[arg(long, value_name = "DATABASE")]
    confirm: String,
}

#[derive(Debug, Args)]
struct SeedArgs {
    #[command(flatten)]
    reset: ResetArgs,

    /// Store real bcrypt hashes so the fixture accounts can log in.
    #[arg(long)]
    hash_passwords: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), BoxError> {
    let target = TargetConfig::new(cli.uri, cli.database).with_connect_retries(cli.connect_retries);

    match cli.command {
        Command::Plan => {
            println!("{}", serde_json::to_string_pretty(&catalog())?);
        }
        Command::Indexes { json } => {
            let db = connect(&target).await?;
            apply_indexes(&db, json).await?;
        }
        Command::Reset(args) => {
            let authorization = authorize(&target, &args)?;
            let db = connect(&target).await?;
            println!("🧹 Clearing {}...", db.name());
            let report = FixtureLoader::new(&db).reset(&authorization).await?;
            print!("{}", report);
            println!("✅ Removed {} documents", report.total());
        }
        Command::Seed(args) => {
            let authorization = authorize(&target, &args.reset)?;
            let db = connect(&target).await?;
            seed(&db, &authorization, args.hash_passwords).await?;
        }
        Command::Setup(args) => {
            let authorization = authorize(&target, &args.reset)?;
            let db = connect(&target).await?;
            apply_indexes(&db, false).await?;
            seed(&db, &authorization, args.hash_passwords).await?;
        }
    }

    Ok(())
}

fn authorize(target: &TargetConfig, args: &ResetArgs) -> Result<ResetAuthorization, BoxError> {
    let environment = AppEnvironment::current()?;
    println!("🔧 Environment: {}", environment);
    Ok(ResetAuthorization::confirm(&target.database, &args.confirm, environment)?)
}

async fn connect(target: &TargetConfig) -> Result<MongoDb, BoxError> {
    println!("🔌 Connecting to MongoDB...");
    let db = connect_with_retry(target).await?;
    println!("✅ Connected to {}", db.name());
    Ok(db)
}

async fn apply_indexes(db: &MongoDb, json: bool) -> Result<(), BoxError> {
    println!("📇 Creating indexes...");
    let inventory = SchemaDefiner::new(db).apply().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
    } else {
        print!("{}", inventory);
    }
    println!("✅ Indexes in place");
    Ok(())
}

async fn seed(db: &MongoDb, authorization: &ResetAuthorization, hash_passwords: bool) -> Result<(), BoxError> {
    println!("🌱 Loading fixtures into {}...", db.name());
    let loader = FixtureLoader::new(db);
    let loader = if hash_passwords {
        loader.with_hasher(BcryptHasher::default())
    } else {
        loader
    };

    let report = loader.load(authorization).await?;
    println!("{}", report);
    println!("✅ Fixtures loaded");
    if !hash_passwords {
        println!("💡 Passwords hold a placeholder hash; pass --hash-passwords to log in as admin/admin123 or author/author123");
    }
    Ok(())
}
