use super::CreateUserArgs;
use crate::{
    pkg::{internal::auth::User, server::state::AppState},
    prelude::Result,
};

pub async fn apply(args: CreateUserArgs) -> Result<()> {
    let state = AppState::new().await?;
    let user = User::create(&state, &args.email, &args.name, &args.password).await?;
    println!("Reviewer account ready: {} <{}>", user.full_name, user.email);
    Ok(())
}
