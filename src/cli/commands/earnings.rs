use std::path::PathBuf;

use gigbook::views::{DateRange, EarningsView, STATEMENT_FILE_NAME};

use super::Store;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "earnings", about = "Show billing history and totals")]
pub struct Earnings {
    #[clap(long, help = "First day, YYYY-MM-DD")]
    from: Option<String>,
    #[clap(long, help = "Last day, YYYY-MM-DD")]
    to: Option<String>,
    #[clap(
        long,
        num_args = 0..=1,
        default_missing_value = STATEMENT_FILE_NAME,
        help = "Write the rows in view as a statement file"
    )]
    export: Option<PathBuf>,
}

impl Earnings {
    pub fn run(&self, store: &mut Store) -> anyhow::Result<()> {
        let range = DateRange::parse(self.from.as_deref(), self.to.as_deref())?;
        let billing = store.billing()?;
        let view = EarningsView::compute(&billing, range);

        for row in &view.rows {
            println!(
                "{}\t{}\t{}\t{}\t{} {}",
                row.date, row.document, row.service, row.order, row.currency, row.total
            );
        }
        println!("Total: {} ({} rows)", view.total, view.rows.len());

        if let Some(path) = &self.export {
            view.write_statement(path)?;
            println!("Statement written to {}", path.display());
        }
        Ok(())
    }
}
