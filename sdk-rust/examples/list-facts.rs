use dotenvy::dotenv;
use facts_sdk::{Category, CategoryFilter, FactQuery, FactStore};

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let store = common::get_store();

    let facts = store
        .list(&FactQuery::for_filter(CategoryFilter::Only(Category::Science)))
        .await
        .unwrap();

    for fact in &facts {
        let disputed = if fact.is_disputed() { " [disputed]" } else { "" };
        println!("#{} {}{disputed} ({})", fact.id, fact.text, fact.source);
    }
}
