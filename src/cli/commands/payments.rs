use gigbook::records::PaymentMethod;

use super::Store;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "payments", about = "List or add payout methods")]
pub struct Payments {
    #[clap(long, requires = "account", help = "Provider of a method to add")]
    provider: Option<String>,
    #[clap(long, requires = "provider", help = "Account of a method to add")]
    account: Option<String>,
}

impl Payments {
    pub fn run(&self, store: &mut Store) -> anyhow::Result<()> {
        let mut methods = store.payment_methods()?;

        if let (Some(provider), Some(account)) = (&self.provider, &self.account) {
            methods.push(PaymentMethod::new(provider.as_str(), account.as_str()));
            store.save_payment_methods(&methods)?;
        }

        if methods.is_empty() {
            println!("No payment methods.");
        }
        for method in &methods {
            println!("{}\t{}", method.provider, method.account);
        }
        Ok(())
    }
}
