use crate::records::{Gig, PackageName};

#[derive(Debug, Clone, PartialEq)]
pub struct GigListing {
    pub id: String,
    pub title: String,
    pub category: String,
    pub starting_price: Option<f64>,
    pub tiers: Vec<PackageName>,
}

impl From<&Gig> for GigListing {
    fn from(gig: &Gig) -> Self {
        let mut tiers: Vec<_> = gig.packages.iter().map(|p| p.name).collect();
        tiers.sort();
        Self {
            id: gig.id.clone(),
            title: gig.title.clone(),
            category: gig.category.clone(),
            starting_price: gig.starting_price(),
            tiers,
        }
    }
}

/// A seller's gigs in stored order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GigsView {
    pub listings: Vec<GigListing>,
}

impl GigsView {
    pub fn for_seller(gigs: &[Gig], seller_id: &str) -> Self {
        Self {
            listings: gigs
                .iter()
                .filter(|gig| gig.seller_id == seller_id)
                .map(GigListing::from)
                .collect(),
        }
    }

    pub fn all(gigs: &[Gig]) -> Self {
        Self {
            listings: gigs.iter().map(GigListing::from).collect(),
        }
    }
}
