use anyhow::Result;
use blackboard_core::{BlackboardStore, StackAction, StackOutcome};
use colored::Colorize;

use super::utils::text_or_stdin;

pub fn show(store: &BlackboardStore, context: &str) {
    println!("{}", header(store, context));
    println!("{}", store.display_content(context));
}

pub fn write(store: &mut BlackboardStore, context: &str, text: Vec<String>) -> Result<()> {
    let text = text_or_stdin(text)?;
    store.update_content(context, text);
    println!("{}", header(store, context));
    Ok(())
}

pub fn push(store: &mut BlackboardStore, context: &str) {
    let outcome = store.push(context);
    report(store, context, &outcome);
}

pub fn pull(store: &mut BlackboardStore, context: &str) {
    let outcome = store.pull(context);
    report(store, context, &outcome);
}

pub fn status(store: &BlackboardStore, context: &str) {
    let session = store.session();
    let user = match session.active_username() {
        Some(name) => format!("{} (Lv{})", name, session.level),
        None => "guest".to_string(),
    };

    println!("user: {}", user);
    for ctx in store.contexts() {
        let marker = if ctx == context { "*" } else { " " };
        println!("{} {:<8} {}", marker, ctx, store.stack_status(ctx));
    }
    if !store.contexts().contains(&context) {
        println!("* {:<8} {}", context, store.stack_status(context));
    }
}

pub fn clear(store: &mut BlackboardStore, context: &str) {
    store.clear(context);
    println!("{} cleared", context.bold());
}

pub fn wipe(store: &mut BlackboardStore) {
    store.clear_all();
    println!("{} context(s) cleared", store.contexts().len());
}

fn header(store: &BlackboardStore, context: &str) -> String {
    let state = store.state(context);
    let slot = if state.is_viewing_draft() {
        "draft".to_string()
    } else {
        format!("history {}", state.view_index)
    };
    format!("-- {} [{}] {} --", context, store.stack_status(context), slot)
        .dimmed()
        .to_string()
}

fn report(store: &BlackboardStore, context: &str, outcome: &StackOutcome) {
    let label = outcome.action.as_str();
    let action = if outcome.action.is_rejected() {
        label.yellow()
    } else if outcome.action == StackAction::New {
        label.green()
    } else {
        label.cyan()
    };
    println!("{} {}", action.bold(), header(store, context));
    if let Some(content) = outcome.content.as_deref().filter(|c| !c.is_empty()) {
        println!("{}", content);
    }
}
