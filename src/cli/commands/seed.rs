use super::Store;

#[derive(Clone, Debug, clap::Args)]
#[clap(
    name = "seed",
    about = "Fill empty billing, payment and order slots with example rows"
)]
pub struct Seed {}

impl Seed {
    pub fn run(&self, store: &mut Store) -> anyhow::Result<()> {
        let seeded = store.seed_examples()?;
        if seeded.is_empty() {
            println!("Nothing to seed.");
        }
        for slot in seeded {
            println!("Seeded {slot}");
        }
        Ok(())
    }
}
