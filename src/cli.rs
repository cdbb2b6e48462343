use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracker_core::Database;

#[derive(Parser, Debug)]
#[command(name = "tracker")]
#[command(about = "Project, task and note tracking server")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server options used when no subcommand is given
    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Check the database and print a report
    Check(DatabaseArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port for HTTP API
    #[arg(short, long, env = "PORT", default_value = "8000")]
    pub port: u16,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// SQLite database file (defaults to the platform data directory)
    #[arg(long, env = "TRACKER_DATABASE")]
    pub database: Option<PathBuf>,
}

impl DatabaseArgs {
    /// Opens the configured database and applies the schema.
    pub fn open(&self) -> tracker_core::Result<Database> {
        let db = match &self.database {
            Some(path) => Database::open(path)?,
            None => Database::open_default()?,
        };
        db.migrate()?;
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flags_without_subcommand_configure_serve() {
        let cli = Cli::try_parse_from(["tracker", "--host", "0.0.0.0", "--port", "9000"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.serve.host, "0.0.0.0");
        assert_eq!(cli.serve.port, 9000);
    }

    #[test]
    fn check_takes_a_database_path() {
        let cli = Cli::try_parse_from(["tracker", "check", "--database", "/tmp/t.db"]).unwrap();

        match cli.command {
            Some(Commands::Check(args)) => assert_eq!(args.database, Some(PathBuf::from("/tmp/t.db"))),
            other => panic!("expected check, got {:?}", other),
        }
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Cli::try_parse_from(["tracker", "serve", "--port", "http"]).is_err());
    }

    #[test]
    fn open_migrates_the_database() {
        let dir = TempDir::new().unwrap();
        let args = DatabaseArgs {
            database: Some(dir.path().join("tracker.db")),
        };

        let db = args.open().unwrap();
        assert_eq!(db.self_check().collections.len(), 3);
    }
}
