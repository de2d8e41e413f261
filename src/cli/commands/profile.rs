use super::Store;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "profile", about = "Show the current user profile")]
pub struct Profile {
    #[clap(long, action = clap::ArgAction::SetTrue, help = "Print the raw JSON")]
    json: bool,
}

impl Profile {
    pub fn run(&self, store: &mut Store) -> anyhow::Result<()> {
        let Some(profile) = store.profile() else {
            println!("No profile yet.");
            return Ok(());
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&profile)?);
            return Ok(());
        }

        println!("{} <{}>", profile.full_name, profile.email);
        if let Some(country) = &profile.country {
            println!("Country:   {country}");
        }
        if let Some(phone) = &profile.phone {
            println!("Phone:     {phone}");
        }
        if !profile.skills.is_empty() {
            println!("Skills:    {}", profile.skills.join(", "));
        }
        if !profile.languages.is_empty() {
            println!("Languages: {}", profile.languages.join(", "));
        }
        for cert in &profile.certifications {
            println!("Certified: {} ({}, {})", cert.name, cert.by, cert.year);
        }
        for edu in &profile.education {
            println!("Studied:   {} at {} ({})", edu.degree, edu.college, edu.year);
        }
        Ok(())
    }
}
