use clap::Subcommand;
use mindstudy_core::{Database, UserRecord};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile
    Show,
    /// Complete onboarding with name and email
    Set { name: String, email: String },
    /// Forget the stored profile
    Clear,
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    match action {
        ProfileAction::Show => match db.load_user()? {
            Some(user) => println!("{} <{}>", user.name, user.email),
            None => println!("no profile yet -- run `mindstudy profile set <name> <email>`"),
        },
        ProfileAction::Set { name, email } => {
            db.save_user(&UserRecord { name: name.clone(), email })?;
            println!("welcome, {name}!");
        }
        ProfileAction::Clear => {
            if db.clear_user()? {
                println!("profile cleared");
            } else {
                println!("no profile to clear");
            }
        }
    }
    Ok(())
}
