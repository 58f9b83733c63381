//! Seed the database with Gemini-generated users and contact requests.
//!
//! Configuration comes from the environment (see [`synthseed::config`]);
//! flags override the `SEED_*` counts.

use std::collections::BTreeSet;

use clap::Args;
use tracing::{info, warn};

use synthseed::db::{self, MySqlStore};
use synthseed::gemini::GeminiClient;
use synthseed::{GeminiGenerator, SaveSummary, SeedPlan, Seeder, SeederConfig};

use super::CommandError;

/// Flags for `synthseed seed`.
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Users to generate (overrides `SEED_USERS`)
    #[arg(long)]
    pub users: Option<usize>,

    /// Contact requests to generate (overrides `SEED_CONTACT_REQUESTS`)
    #[arg(long)]
    pub contact_requests: Option<usize>,

    /// Records requested per API call (overrides `SEED_BATCH_SIZE`)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Delete existing users and contact requests first
    #[arg(long)]
    pub clear_existing: bool,

    /// Do not apply pending migrations before seeding
    #[arg(long)]
    pub skip_migrations: bool,
}

impl SeedArgs {
    /// Apply flag overrides on top of the configured plan.
    fn plan(&self, base: SeedPlan) -> SeedPlan {
        SeedPlan {
            users: self.users.unwrap_or(base.users),
            contact_requests: self.contact_requests.unwrap_or(base.contact_requests),
            batch_size: self.batch_size.unwrap_or(base.batch_size),
        }
    }
}

/// Run a full seeding pass.
///
/// # Errors
///
/// Returns an error if configuration is missing, the database or Gemini is
/// unreachable, or the run aborts.
pub async fn run(args: SeedArgs) -> Result<(), CommandError> {
    let config = SeederConfig::from_env()?;
    let plan = args.plan(config.plan);

    let pool = db::create_pool(&config.database).await?;
    info!(host = %config.database.host, database = %config.database.database, "Connected to database");

    if args.skip_migrations {
        warn!("Skipping migrations");
    } else {
        db::run_migrations(&pool).await?;
        info!("Migrations applied");
    }

    let store = MySqlStore::new(pool);
    let known_emails = if args.clear_existing {
        let (users, contact_requests) = store.clear().await?;
        info!(users, contact_requests, "Cleared existing records");
        BTreeSet::new()
    } else {
        let emails = store.user_emails().await?;
        info!(existing = emails.len(), "Loaded existing user emails");
        emails
    };

    let client = GeminiClient::new(&config.gemini)?;
    info!(model = client.model(), "Gemini client ready");

    info!(
        users = plan.users,
        contact_requests = plan.contact_requests,
        batch_size = plan.batch_size,
        "Starting seeding process"
    );
    let seeder = Seeder::new(GeminiGenerator::new(client), store, plan)
        .with_known_emails(known_emails);
    let report = seeder.run().await?;

    info!("Seeding complete!");
    log_summary("Users", &report.users, report.user_batches);
    log_summary(
        "Contact requests",
        &report.contact_requests,
        report.contact_request_batches,
    );

    Ok(())
}

fn log_summary(label: &str, summary: &SaveSummary, batches: usize) {
    info!("{label}:");
    info!("  Batches requested: {batches}");
    info!("  Generated: {}", summary.attempted);
    info!("  Saved: {}", summary.saved);
    info!("  Rejected by validation: {}", summary.rejected);
    info!("  Skipped as duplicates: {}", summary.conflicts);
}
