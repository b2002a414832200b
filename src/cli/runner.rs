//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, PagingArgs, TeamArgs};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::pagination::Cursor;
use crate::stats::{insert_seed_data, PlayerStats, SeedOutcome};
use crate::storage;
use crate::types::Record;
use std::io::Write;

/// Which paged listing to run
#[derive(Debug, Clone, Copy)]
enum Listing {
    Limited,
    ByGoals(u32),
    ByGoalsSorted(u32),
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Resolve store configuration: file, then environment, then flags
    pub fn store_config(&self) -> Result<StoreConfig> {
        let config = match &self.cli.config {
            Some(path) => StoreConfig::from_file(path)?,
            None => StoreConfig::default(),
        };
        let mut config = config.with_env()?;

        if let Some(backend) = self.cli.backend {
            config.backend = backend;
        }
        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint = Some(endpoint.clone());
        }
        if let Some(region) = &self.cli.region {
            config.region.clone_from(region);
        }
        if let Some(table) = &self.cli.table {
            config.table_name.clone_from(table);
        }
        if let Some(index) = &self.cli.index {
            config.index_name.clone_from(index);
        }
        config.validate()?;
        Ok(config)
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.store_config()?;
        tracing::debug!(?config, "Resolved store configuration");
        let stats = PlayerStats::new(storage::connect(&config).await);
        self.run_with(&stats).await
    }

    /// Run the CLI command against an existing service
    pub async fn run_with(&self, stats: &PlayerStats) -> Result<()> {
        match &self.cli.command {
            Commands::Seed => self.seed(stats).await,
            Commands::Get {
                team,
                first_name,
                last_name,
            } => self.get(stats, team, first_name, last_name).await,
            Commands::List { team } => {
                let records = stats.list_players(&team.country, &team.team).await?;
                print_records(&records)
            }
            Commands::ListAll { team } => {
                let records = stats.list_all_players(&team.country, &team.team).await?;
                print_records(&records)
            }
            Commands::ListLimited { team, paging } => {
                self.paged(stats, team, Listing::Limited, paging).await
            }
            Commands::ByGoals {
                team,
                threshold,
                paging,
            } => {
                self.paged(stats, team, Listing::ByGoals(*threshold), paging)
                    .await
            }
            Commands::ByGoalsSorted {
                team,
                threshold,
                paging,
            } => {
                self.paged(stats, team, Listing::ByGoalsSorted(*threshold), paging)
                    .await
            }
            Commands::Demo => self.demo(stats).await,
        }
    }

    async fn seed(&self, stats: &PlayerStats) -> Result<()> {
        match insert_seed_data(stats).await? {
            SeedOutcome::AlreadyPopulated => {
                eprintln!("Not inserting seed data as stats table already contains items");
            }
            SeedOutcome::Inserted(count) => eprintln!("Loaded stats table with {count} seed records"),
        }
        Ok(())
    }

    async fn get(
        &self,
        stats: &PlayerStats,
        team: &TeamArgs,
        first_name: &str,
        last_name: &str,
    ) -> Result<()> {
        match stats
            .get_player_stats(&team.country, &team.team, first_name, last_name)
            .await?
        {
            Some(record) => print_records(std::slice::from_ref(&record)),
            None => {
                eprintln!("No stats for {first_name} {last_name} ({}, {})", team.team, team.country);
                Ok(())
            }
        }
    }

    async fn fetch_page(
        &self,
        stats: &PlayerStats,
        team: &TeamArgs,
        listing: Listing,
        cursor: &Cursor,
    ) -> Result<(Vec<Record>, Cursor)> {
        let (country, national_team) = (team.country.as_str(), team.team.as_str());
        match listing {
            Listing::Limited => {
                stats
                    .list_limited_players(country, national_team, cursor)
                    .await
            }
            Listing::ByGoals(threshold) => {
                stats
                    .list_players_by_goals_threshold(country, national_team, threshold, cursor)
                    .await
            }
            Listing::ByGoalsSorted(threshold) => {
                stats
                    .list_players_by_goals_threshold_sorted(
                        country,
                        national_team,
                        threshold,
                        cursor,
                    )
                    .await
            }
        }
    }

    async fn paged(
        &self,
        stats: &PlayerStats,
        team: &TeamArgs,
        listing: Listing,
        paging: &PagingArgs,
    ) -> Result<()> {
        let mut cursor = match &paging.cursor {
            Some(token) => Cursor::from_token(token)?,
            None => Cursor::new(paging.page_size).descending(paging.descending),
        };

        let mut page_number = 0;
        loop {
            let (records, next) = self.fetch_page(stats, team, listing, &cursor).await?;
            page_number += 1;
            eprintln!("Page Number : {page_number}");
            print_records(&records)?;
            cursor = next;
            if !paging.all || !cursor.has_resume_key() {
                break;
            }
        }

        if cursor.has_resume_key() {
            eprintln!("Next cursor : {}", cursor.to_token()?);
        }
        Ok(())
    }

    async fn demo(&self, stats: &PlayerStats) -> Result<()> {
        self.seed(stats).await?;

        let portugal = TeamArgs {
            country: "Portugal".to_string(),
            team: "MNT".to_string(),
        };
        let usa = TeamArgs {
            country: "USA".to_string(),
            team: "WNT".to_string(),
        };
        let paging = |page_size, descending| PagingArgs {
            page_size,
            descending,
            cursor: None,
            all: true,
        };

        eprintln!("getting single player stats");
        self.get(stats, &portugal, "Cristiano", "Ronaldo").await?;

        eprintln!("listing player stats");
        print_records(&stats.list_players(&portugal.country, &portugal.team).await?)?;

        eprintln!("listing player stats while handling internal pagination");
        print_records(&stats.list_all_players(&usa.country, &usa.team).await?)?;

        eprintln!("listing limited number player stats");
        self.paged(stats, &usa, Listing::Limited, &paging(4, false))
            .await?;

        eprintln!("listing limited number player stats and apply goals scored filter");
        self.paged(stats, &portugal, Listing::ByGoals(10), &paging(2, false))
            .await?;

        eprintln!("listing player stats with goals filter in descending order of goals scored");
        self.paged(stats, &usa, Listing::ByGoalsSorted(10), &paging(1, true))
            .await
    }
}

/// Print records as JSON lines on stdout
fn print_records(records: &[Record]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in records {
        writeln!(out, "{}", serde_json::to_string(record)?)?;
    }
    Ok(())
}
