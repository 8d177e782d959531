use crate::item_spec::ItemSpec;
use crate::types::{LogLevel, OutputFormat, SortOrder};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use futflare_types::PageLimit;

#[derive(Parser)]
#[command(name = "futflare")]
#[command(about = "Compose, seal and browse time capsules", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (default: $FUTFLARE_CONFIG or the user config dir)")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Server base URL, overrides the config file")]
    pub server: Option<String>,

    #[arg(long, global = true, help = "Bearer token, overrides the config file")]
    pub token: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create and browse capsules")]
    Capsule {
        #[command(subcommand)]
        command: CapsuleCommand,
    },

    #[command(about = "Inspect or initialize the configuration file")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum CapsuleCommand {
    #[command(about = "List one page of your capsules")]
    List {
        #[arg(long, help = "Start from a shared listing link or query string")]
        link: Option<String>,

        #[arg(long)]
        sort: Option<SortOrder>,

        #[arg(long, help = "Page size: 5, 10 or 20")]
        limit: Option<PageLimit>,

        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<u32>,
    },

    #[command(about = "Show a single capsule")]
    Show {
        #[arg(help = "Capsule id")]
        id: String,
    },

    #[command(about = "Compose a capsule, upload its media and submit it")]
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(long, help = "Open date as YYYY-MM-DD (default: today)")]
        open_at: Option<NaiveDate>,

        #[arg(long = "participant", value_name = "EMAIL", help = "Invite a participant (repeatable, up to 10)")]
        participants: Vec<String>,

        #[arg(
            long = "item",
            value_name = "SPEC",
            help = "Content item, in order: message:TEXT, image:PATH[|CAPTION[|ALT]] or video:PATH[|CAPTION]"
        )]
        items: Vec<ItemSpec>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the effective configuration (token redacted)")]
    Show,

    #[command(about = "Write a default configuration file")]
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}
