use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "tripreporter", about = "Trip Reporter account API server")]
pub struct Cli {
    /// Development mode: verbose human-readable logs and the dev front-end origin.
    #[arg(long)]
    pub dev: bool,

    /// Docker mode: reach Postgres and Redis through the DOCKER_* hostnames.
    #[arg(long)]
    pub docker: bool,
}
