use blackboard_core::BlackboardStore;

use super::utils::print_outcome;

/// Contexts a sync command applies to.
fn targets(store: &BlackboardStore, context: &str, all: bool) -> Vec<String> {
    if all {
        store.contexts().into_iter().map(str::to_string).collect()
    } else {
        vec![context.to_string()]
    }
}

pub async fn commit(store: &BlackboardStore, context: &str, all: bool) {
    for ctx in targets(store, context, all) {
        let result = store.commit(&ctx).await;
        print_outcome(&format!("commit {}", ctx), result.success, result.message.as_deref());
    }
}

pub async fn checkout(store: &mut BlackboardStore, context: &str, all: bool) {
    for ctx in targets(store, context, all) {
        let result = store.checkout(&ctx).await;
        let message = if result.success {
            Some(format!("{} restored ({})", ctx, store.stack_status(&ctx)))
        } else {
            result.message.clone()
        };
        print_outcome(&format!("checkout {}", ctx), result.success, message.as_deref());
        if let Some(content) = result.content.filter(|c| !c.is_empty()) {
            println!("{}", content);
        }
    }
}
