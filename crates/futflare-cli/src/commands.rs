use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use futflare_runtime::{Config, Futflare, init_tracing, resolve_config_path};
use is_terminal::IsTerminal;

use crate::args::{CapsuleCommand, Cli, Commands, ConfigCommand};
use crate::handlers;
use crate::ports::{ConsoleNavigator, ConsoleNotifier};
use crate::types::OutputFormat;

/// Settings shared by every handler.
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub format: OutputFormat,
    pub color: bool,
}

impl Context {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = resolve_config_path(cli.config.as_deref())?;
        let mut config = Config::load_from(&config_path)?.with_env_overrides();

        if let Some(server) = &cli.server {
            config.server.url = server.clone();
        }
        if let Some(token) = &cli.token {
            config.auth.token = Some(token.clone());
        }
        if let Some(level) = cli.log_level {
            config.logging.level = level.to_string();
        }

        let color = cli.format == OutputFormat::Plain && std::io::stdout().is_terminal();

        Ok(Self {
            config,
            config_path,
            format: cli.format,
            color,
        })
    }

    pub fn client(&self) -> Result<Futflare> {
        let client = Futflare::builder()
            .config(&self.config)
            .notifier(Arc::new(ConsoleNotifier::new(self.format, self.color)))
            .navigator(Arc::new(ConsoleNavigator::new(self.format)))
            .build()?;
        Ok(client)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;
    init_tracing(&ctx.config.logging);

    match cli.command {
        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&ctx),
            ConfigCommand::Init { force } => handlers::config::init(&ctx, force),
        },

        Commands::Capsule { command } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;

            match command {
                CapsuleCommand::List {
                    link,
                    sort,
                    limit,
                    search,
                    page,
                } => runtime.block_on(handlers::capsule_list::handle(
                    &ctx,
                    handlers::capsule_list::ListArgs {
                        link,
                        sort,
                        limit,
                        search,
                        page,
                    },
                )),
                CapsuleCommand::Show { id } => {
                    runtime.block_on(handlers::capsule_show::handle(&ctx, &id))
                }
                CapsuleCommand::Create {
                    title,
                    description,
                    open_at,
                    participants,
                    items,
                } => runtime.block_on(handlers::capsule_create::handle(
                    &ctx,
                    handlers::capsule_create::CreateArgs {
                        title,
                        description,
                        open_at,
                        participants,
                        items,
                    },
                )),
            }
        }
    }
}
