use gigbook::records::OrderCategory;
use gigbook::views::OrdersView;

use super::Store;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "orders", about = "List the seller's orders of one category")]
pub struct Orders {
    #[clap(
        long,
        default_value_t = OrderCategory::Priority,
        help = "Priority, Late, Delivered, Completed or Cancelled"
    )]
    category: OrderCategory,
}

impl Orders {
    pub fn run(&self, store: &mut Store) -> anyhow::Result<()> {
        let orders = store.orders()?;
        let view = OrdersView::for_role(store.role(), &orders, self.category)?;

        let tabs: Vec<_> = view
            .counts
            .iter()
            .map(|(category, n)| format!("{category} ({n})"))
            .collect();
        println!("{}", tabs.join(" | "));

        for order in &view.orders {
            let due = order
                .due_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| order.due_on.clone());
            println!(
                "{}\t{}\t{}\tdue {}\t{}",
                order.id, order.buyer, order.gig, due, order.status
            );
        }
        Ok(())
    }
}
