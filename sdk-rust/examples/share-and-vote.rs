use dotenvy::dotenv;
use facts_sdk::{FactStore, NewFact, VoteKind};

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let store = common::get_store();

    let draft = NewFact::validate(
        "The Eiffel Tower can be 15 cm taller during summer.",
        "https://www.toureiffel.paris/en",
        "science",
    )
    .unwrap();

    let fact = store.insert(&draft).await.unwrap();
    println!("{fact:#?}");

    let fact = store
        .set_votes(fact.id, VoteKind::Mindblowing, fact.votes_mindblowing + 1)
        .await
        .unwrap();
    println!("{fact:#?}");
}
