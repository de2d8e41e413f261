use clap::Subcommand;
use gigbook::config::Config;
use gigbook::{FolderSubstrate, RecordStore};

mod earnings;
mod gigs;
mod orders;
mod payments;
mod profile;
mod register;
mod seed;
mod whoami;

pub type Store = RecordStore<FolderSubstrate>;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Profile(profile::Profile),
    #[command(about = "Manage gigs")]
    Gigs {
        #[command(subcommand)]
        subcommand: gigs::Gigs,
    },
    Orders(orders::Orders),
    Earnings(earnings::Earnings),
    Payments(payments::Payments),
    Seed(seed::Seed),
    Whoami(whoami::Whoami),
    Register(register::Register),
}

impl Commands {
    pub async fn run(&self, config: &Config, store: &mut Store) -> anyhow::Result<()> {
        match self {
            Commands::Profile(profile) => profile.run(store),
            Commands::Gigs { subcommand } => subcommand.run(store),
            Commands::Orders(orders) => orders.run(store),
            Commands::Earnings(earnings) => earnings.run(store),
            Commands::Payments(payments) => payments.run(store),
            Commands::Seed(seed) => seed.run(store),
            Commands::Whoami(whoami) => whoami.run(store),
            Commands::Register(register) => register.run(config, store).await,
        }
    }
}
