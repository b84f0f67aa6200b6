use anyhow::Result;
use blackboard_core::BlackboardStore;

use super::utils::{password_or_prompt, print_outcome};

pub async fn register(
    store: &BlackboardStore,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = password_or_prompt(password)?;
    let response = store.register(username, &password).await;
    print_outcome("register", response.success, response.message.as_deref());
    Ok(())
}

pub async fn login(
    store: &mut BlackboardStore,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = password_or_prompt(password)?;
    let response = store.login(username, &password).await;
    print_outcome("login", response.success, response.message.as_deref());
    if response.success {
        println!("Lv{}", store.session().level);
    }
    Ok(())
}

pub fn logout(store: &mut BlackboardStore) {
    store.logout();
    print_outcome("logout", true, Some("Session cleared"));
}

pub async fn ping(store: &BlackboardStore) {
    let online = store.check_connection().await;
    let message = if online { "Online" } else { "Offline" };
    print_outcome("ping", online, Some(message));
}
