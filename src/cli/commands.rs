use crate::config::DatabaseSettings;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "userbase")]
#[command(author, version, about = "A small GraphQL API for managing users")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .userbase.yml by default)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (overrides config)
    #[arg(long, global = true)]
    pub log_file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new userbase project in the current directory
    Init {
        /// Database file, relative to the project root
        #[arg(long, default_value_t = DatabaseSettings::default().path)]
        database: String,

        /// Port the server listens on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create or upgrade the database schema
    Migrate,

    /// Start the GraphQL HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Deployment environment; GraphiQL is only mounted in development
        #[arg(long, value_enum, env = "USERBASE_ENV")]
        environment: Option<EnvironmentArg>,
    },

    /// Execute a GraphQL query and print the JSON response
    Query {
        /// Query document; wrapped in `query { }` unless it already is one
        query: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },

    /// Execute a GraphQL mutation and print the JSON response
    Mutate {
        /// Mutation body; wrapped in `mutation { }` unless it already is one
        mutation: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },

    /// Print the schema in SDL form
    Schema {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EnvironmentArg {
    Development,
    Production,
}

impl From<EnvironmentArg> for crate::config::Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Development => crate::config::Environment::Development,
            EnvironmentArg::Production => crate::config::Environment::Production,
        }
    }
}
