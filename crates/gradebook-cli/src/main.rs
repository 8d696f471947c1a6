use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use gradebook_cli::seeder::{self, SeedResult};
use gradebook_config::DatabaseConfig;
use gradebook_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "gradebook-cli")]
#[command(about = "Gradebook CLI - Database tools for Gradebook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database with fake students
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "50")]
        students: usize,
    },
    /// Delete every student
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> SeedResult<()> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config).await?;

    match command {
        Commands::Seed { students } => handle_seed(&pool, students).await,
        Commands::Clear { yes } => handle_clear(&pool, yes).await,
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
            Ok(())
        }
    }
}

async fn handle_seed(pool: &PgPool, students: usize) -> SeedResult<()> {
    run_migrations(pool).await?;
    let inserted = seeder::seed_students(pool, students).await?;
    println!("✅ Seeded {} students", inserted);
    Ok(())
}

async fn handle_clear(pool: &PgPool, yes: bool) -> SeedResult<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Delete all students?")
            .default(false)
            .interact()?;

    if !confirmed {
        println!("Aborted");
        return Ok(());
    }

    let deleted = seeder::clear_students(pool).await?;
    println!("✅ Cleared {} students", deleted);
    Ok(())
}
