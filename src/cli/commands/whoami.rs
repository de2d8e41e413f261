use super::Store;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "whoami", about = "Print the local identity and role")]
pub struct Whoami {}

impl Whoami {
    pub fn run(&self, store: &mut Store) -> anyhow::Result<()> {
        let id = store.ensure_user_id()?;
        let role = store
            .role()
            .map_or_else(|| "no role".to_owned(), |r| r.to_string());
        println!("{id} ({role})");
        Ok(())
    }
}
