use clap::Subcommand;
use gigbook::views::GigsView;

use super::Store;

#[derive(Subcommand, Debug)]
pub enum Gigs {
    #[command(about = "List gigs")]
    List {
        #[clap(long, help = "Only gigs of this seller id")]
        seller: Option<String>,
    },
    #[command(about = "Delete a gig by id")]
    Delete { id: String },
}

impl Gigs {
    pub fn run(&self, store: &mut Store) -> anyhow::Result<()> {
        match self {
            Gigs::List { seller } => {
                let gigs = store.gigs();
                let view = match seller {
                    Some(seller) => GigsView::for_seller(&gigs, seller),
                    None => GigsView::all(&gigs),
                };
                if view.listings.is_empty() {
                    println!("No gigs.");
                }
                for listing in view.listings {
                    let price = listing
                        .starting_price
                        .map_or_else(|| "-".to_owned(), |p| format!("from {p}"));
                    let tiers: Vec<_> =
                        listing.tiers.iter().map(|t| t.to_string()).collect();
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        listing.id,
                        listing.title,
                        listing.category,
                        price,
                        tiers.join("/")
                    );
                }
            }
            Gigs::Delete { id } => {
                if store.delete_gig(id)? {
                    println!("Deleted gig {id}");
                } else {
                    println!("No gig with id {id}");
                }
            }
        }
        Ok(())
    }
}
