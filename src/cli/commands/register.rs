use anyhow::Context;
use gigbook::config::Config;
use gigbook::records::Role;
use gigbook::registration::{self, Registration};
use gigbook::remote::HttpAccountService;

use super::Store;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "register", about = "Create an account on the hosted service")]
pub struct Register {
    #[clap(long, help = "buyer or seller")]
    role: Role,
    #[clap(long)]
    first_name: String,
    #[clap(long)]
    last_name: String,
    #[clap(long)]
    email: String,
    #[clap(long, env = "GIGBOOK_PASSWORD", hide_env_values = true)]
    password: String,
    #[clap(long)]
    country: String,
}

impl Register {
    pub async fn run(&self, config: &Config, store: &mut Store) -> anyhow::Result<()> {
        let remote = config
            .remote()?
            .context("No remote service configured, set GIGBOOK_REMOTE_URL and GIGBOOK_REMOTE_KEY")?;
        let mut service = HttpAccountService::new(&remote)?;

        let form = Registration {
            role: self.role,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            country: self.country.clone(),
        };
        let user = registration::register(&mut service, store, &form).await?;
        println!("Registered {} as {}", user.id, self.role);
        Ok(())
    }
}
