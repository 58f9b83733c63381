//! The generate-then-persist seeding loop.

use std::collections::BTreeSet;

use tracing::{info, instrument, warn};

use crate::db::RecordStore;
use crate::error::SeedError;
use crate::generation::RecordGenerator;
use crate::persist::{SaveSummary, save_contact_requests, save_users};

/// Consecutive empty batches tolerated before a run is aborted.
pub const MAX_EMPTY_BATCHES: u32 = 3;

/// How many records to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    /// Users to request in total.
    pub users: usize,
    /// Contact requests to request in total.
    pub contact_requests: usize,
    /// Records requested per generator call.
    pub batch_size: usize,
}

impl SeedPlan {
    pub const DEFAULT_USERS: usize = 500;
    pub const DEFAULT_CONTACT_REQUESTS: usize = 0;
    pub const DEFAULT_BATCH_SIZE: usize = 50;
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            users: Self::DEFAULT_USERS,
            contact_requests: Self::DEFAULT_CONTACT_REQUESTS,
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: SaveSummary,
    pub contact_requests: SaveSummary,
    /// Generator calls made for users.
    pub user_batches: usize,
    /// Generator calls made for contact requests.
    pub contact_request_batches: usize,
}

/// Drives a [`RecordGenerator`] into a [`RecordStore`].
///
/// The remaining count drops by the number of records each batch
/// *returned*, so records lost to validation are not replaced.
pub struct Seeder<G, S> {
    generator: G,
    store: S,
    plan: SeedPlan,
    known_emails: BTreeSet<String>,
}

impl<G: RecordGenerator, S: RecordStore> Seeder<G, S> {
    /// Create a seeder for `plan`.
    #[must_use]
    pub const fn new(generator: G, store: S, plan: SeedPlan) -> Self {
        Self {
            generator,
            store,
            plan,
            known_emails: BTreeSet::new(),
        }
    }

    /// Emails the generator should avoid from the first batch on.
    #[must_use]
    pub fn with_known_emails(mut self, emails: BTreeSet<String>) -> Self {
        self.known_emails = emails;
        self
    }

    /// The generator records are requested from.
    #[must_use]
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// The store records are written to.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Run the user loop, then the contact request loop.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Generation` if a batch cannot be generated or
    /// parsed, `SeedError::Repository` on a store failure other than a
    /// unique-key conflict, and `SeedError::Stalled` after
    /// [`MAX_EMPTY_BATCHES`] empty batches in a row.
    #[instrument(skip(self), fields(users = self.plan.users, contact_requests = self.plan.contact_requests))]
    pub async fn run(&self) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();
        self.seed_users(&mut report).await?;
        self.seed_contact_requests(&mut report).await?;

        info!(
            users_saved = report.users.saved,
            contact_requests_saved = report.contact_requests.saved,
            "Seeding complete"
        );
        Ok(report)
    }

    async fn seed_users(&self, report: &mut SeedReport) -> Result<(), SeedError> {
        let batch_size = self.plan.batch_size.max(1);
        let mut remaining = self.plan.users;
        let mut used_emails = self.known_emails.clone();
        let mut stall = StallGuard::new("user");

        while remaining > 0 {
            let batch = self
                .generator
                .generate_users(batch_size, &used_emails)
                .await?;
            report.user_batches += 1;
            used_emails = batch.used_emails;

            let returned = batch.users.len();
            stall.observe(returned, remaining)?;

            report.users += save_users(&self.store, batch.users).await?;
            remaining = remaining.saturating_sub(returned);
            info!(returned, remaining, "User batch done");
        }
        Ok(())
    }

    async fn seed_contact_requests(&self, report: &mut SeedReport) -> Result<(), SeedError> {
        let batch_size = self.plan.batch_size.max(1);
        let mut remaining = self.plan.contact_requests;
        let mut stall = StallGuard::new("contact request");

        while remaining > 0 {
            let requests = self
                .generator
                .generate_contact_requests(batch_size)
                .await?;
            report.contact_request_batches += 1;

            let returned = requests.len();
            stall.observe(returned, remaining)?;

            report.contact_requests += save_contact_requests(&self.store, requests).await?;
            remaining = remaining.saturating_sub(returned);
            info!(returned, remaining, "Contact request batch done");
        }
        Ok(())
    }
}

/// Counts consecutive empty batches.
struct StallGuard {
    kind: &'static str,
    empty: u32,
}

impl StallGuard {
    const fn new(kind: &'static str) -> Self {
        Self { kind, empty: 0 }
    }

    fn observe(&mut self, returned: usize, remaining: usize) -> Result<(), SeedError> {
        if returned > 0 {
            self.empty = 0;
            return Ok(());
        }

        self.empty += 1;
        warn!(kind = self.kind, empty = self.empty, "Generator returned an empty batch");
        if self.empty >= MAX_EMPTY_BATCHES {
            return Err(SeedError::Stalled {
                kind: self.kind,
                batches: self.empty,
                remaining,
            });
        }
        Ok(())
    }
}
