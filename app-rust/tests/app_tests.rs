use facts_app::{
    view::{self, ViewOptions},
    FactsApp, FetchOutcome, SubmitOutcome, VoteOutcome,
};
use facts_sdk::{
    facts_test::{MockFactStore, MockResult, StoreCall},
    Category, CategoryFilter, Fact, FactId, FactQuery, NewFact, StoreError, ValidationError,
    VoteKind,
};
use std::sync::Arc;

fn fact(id: i64, text: &str, category: Category) -> Fact {
    Fact::new(id, text, "https://example.com", category)
}

fn store_error() -> StoreError {
    StoreError::Invariant("mock", "permission denied for table facts".to_string())
}

fn setup() -> (Arc<MockFactStore>, Arc<FactsApp>) {
    let store = Arc::new(MockFactStore::new());
    let app = Arc::new(FactsApp::new(store.clone()));
    (store, app)
}

async fn loaded_app(facts: Vec<Fact>) -> (Arc<MockFactStore>, Arc<FactsApp>) {
    let (store, app) = setup();
    store.enqueue_list(facts);
    assert!(matches!(app.refresh().await, FetchOutcome::Loaded(_)));
    store.reset();
    (store, app)
}

async fn wait_for_calls(store: &MockFactStore, count: usize) {
    while store.tracked_calls().len() < count {
        tokio::task::yield_now().await;
    }
}

fn fill_form(app: &FactsApp, text: &str, source: &str, category: &str) {
    assert!(app.set_text(text));
    assert!(app.set_source(source));
    assert!(app.set_form_category(category));
}

#[tokio::test]
async fn initial_load_lists_every_category() {
    let (store, app) = setup();
    assert!(app.state().is_loading);

    let facts = vec![
        fact(2, "Octopuses have three hearts", Category::Science).with_votes(9, 0, 0),
        fact(1, "Rome was not built in a day", Category::History).with_votes(3, 0, 0),
    ];
    store.enqueue_list(facts.clone());

    assert_eq!(app.refresh().await, FetchOutcome::Loaded(2));

    let state = app.state();
    assert_eq!(state.facts, facts);
    assert!(!state.is_loading);
    assert_eq!(state.current_category, CategoryFilter::All);
    assert_eq!(
        store.tracked_calls(),
        vec![StoreCall::List(FactQuery {
            category: None,
            order_by: VoteKind::Interesting,
            ascending: false,
            limit: 1000,
        })]
    );
}

#[tokio::test]
async fn selecting_a_category_filters_and_all_removes_the_filter() {
    let (store, app) = setup();

    for category in Category::ALL {
        store.enqueue_list(vec![fact(1, "one", category), fact(2, "two", category)]);
        assert_eq!(
            app.set_category(CategoryFilter::Only(category)).await,
            FetchOutcome::Loaded(2)
        );

        let state = app.state();
        assert_eq!(state.current_category, CategoryFilter::Only(category));
        assert!(state
            .facts
            .iter()
            .all(|f| f.category() == Some(category)));
        assert_eq!(
            store.tracked_calls().last(),
            Some(&StoreCall::List(FactQuery::for_filter(CategoryFilter::Only(
                category
            ))))
        );
    }

    store.enqueue_list(vec![
        fact(1, "one", Category::News),
        fact(2, "two", Category::Health),
    ]);
    assert_eq!(
        app.set_category(CategoryFilter::All).await,
        FetchOutcome::Loaded(2)
    );
    match store.tracked_calls().last() {
        Some(StoreCall::List(query)) => assert_eq!(query.category, None),
        other => panic!("unexpected call: {other:?}"),
    }
    assert_eq!(store.tracked_calls().len(), Category::ALL.len() + 1);
}

#[tokio::test]
async fn failed_fetch_empties_the_list_and_clears_loading() {
    let (store, app) = loaded_app(vec![fact(1, "one", Category::Science)]).await;
    store.enqueue_list(MockResult::error(store_error()));

    assert_eq!(
        app.set_category(CategoryFilter::Only(Category::Finance)).await,
        FetchOutcome::Failed
    );

    let state = app.state();
    assert!(state.facts.is_empty());
    assert!(!state.is_loading);
    assert_eq!(store.tracked_calls().len(), 1);
    assert!(view::render(&state, ViewOptions::default()).contains("No facts found"));
}

#[tokio::test]
async fn loading_flag_covers_the_call() {
    let (store, app) = setup();
    let responder = store.defer_list();

    let pending = tokio::spawn({
        let app = app.clone();
        async move { app.refresh().await }
    });
    wait_for_calls(&store, 1).await;
    assert!(app.state().is_loading);

    responder.respond(Ok(vec![fact(1, "one", Category::Society)]));
    assert_eq!(pending.await.unwrap(), FetchOutcome::Loaded(1));
    assert!(!app.state().is_loading);
}

#[tokio::test]
async fn stale_list_response_does_not_overwrite_newer_one() {
    let (store, app) = setup();
    let science = store.defer_list();
    let news = store.defer_list();

    let first = tokio::spawn({
        let app = app.clone();
        async move { app.set_category(CategoryFilter::Only(Category::Science)).await }
    });
    wait_for_calls(&store, 1).await;
    let second = tokio::spawn({
        let app = app.clone();
        async move { app.set_category(CategoryFilter::Only(Category::News)).await }
    });
    wait_for_calls(&store, 2).await;

    news.respond(Ok(vec![fact(2, "news", Category::News)]));
    assert_eq!(second.await.unwrap(), FetchOutcome::Loaded(1));

    science.respond(Ok(vec![fact(1, "science", Category::Science)]));
    assert_eq!(first.await.unwrap(), FetchOutcome::Stale);

    let state = app.state();
    assert_eq!(state.current_category, CategoryFilter::Only(Category::News));
    assert_eq!(state.facts, vec![fact(2, "news", Category::News)]);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn invalid_drafts_are_never_sent() {
    let existing = vec![fact(1, "one", Category::Science)];
    let (store, app) = loaded_app(existing.clone()).await;

    let too_long = "a".repeat(201);
    let cases = [
        (
            too_long.as_str(),
            "https://example.com",
            "science",
            ValidationError::TextTooLong { len: 201, max: 200 },
        ),
        (
            "Bees can fly",
            "not-a-url",
            "science",
            ValidationError::InvalidSource("not-a-url".to_string()),
        ),
        (
            "Bees can fly",
            "https://example.com",
            "",
            ValidationError::EmptyCategory,
        ),
        ("", "https://example.com", "science", ValidationError::EmptyText),
    ];

    for (text, source, category, expected) in cases {
        fill_form(&app, text, source, category);
        assert_eq!(app.submit().await, SubmitOutcome::Skipped(expected));

        let state = app.state();
        assert_eq!(state.facts, existing);
        assert_eq!(state.form.text, text);
        assert_eq!(state.form.source, source);
        assert_eq!(state.form.category, category);
        assert!(!state.form.is_uploading);
    }

    assert!(store.tracked_calls().is_empty());
}

#[tokio::test]
async fn valid_draft_is_prepended_and_fields_cleared() {
    let existing = vec![fact(1, "one", Category::Science)];
    let (store, app) = loaded_app(existing.clone()).await;
    let created = fact(42, "Bees can fly", Category::Science);
    store.enqueue_insert(created.clone());

    fill_form(&app, "Bees can fly", "https://example.com", "science");
    assert_eq!(app.submit().await, SubmitOutcome::Created(FactId(42)));

    let state = app.state();
    assert_eq!(state.facts, vec![created, existing[0].clone()]);
    assert_eq!(state.form.text, "");
    assert_eq!(state.form.source, "");
    assert_eq!(state.form.category, "");
    assert!(!state.form.is_uploading);
    assert_eq!(
        store.tracked_calls(),
        vec![StoreCall::Insert(NewFact::new(
            "Bees can fly",
            "https://example.com",
            Category::Science
        ))]
    );
}

#[tokio::test]
async fn failed_insert_keeps_list_and_still_clears_fields() {
    let existing = vec![fact(1, "one", Category::Science)];
    let (store, app) = loaded_app(existing.clone()).await;
    store.enqueue_insert(MockResult::error(store_error()));

    fill_form(&app, "Bees can fly", "https://example.com", "science");
    assert_eq!(app.submit().await, SubmitOutcome::Failed);

    let state = app.state();
    assert_eq!(state.facts, existing);
    assert_eq!(state.form.text, "");
    assert!(!state.form.is_uploading);
}

#[tokio::test]
async fn uploading_disables_the_form() {
    let (store, app) = loaded_app(Vec::new()).await;
    let responder = store.defer_insert();

    fill_form(&app, "Bees can fly", "https://example.com", "science");
    let pending = tokio::spawn({
        let app = app.clone();
        async move { app.submit().await }
    });
    wait_for_calls(&store, 1).await;

    assert!(app.state().form.is_uploading);
    assert!(!app.set_text("something else"));
    assert_eq!(app.state().form.text, "Bees can fly");
    assert_eq!(app.submit().await, SubmitOutcome::Busy);

    responder.respond(Ok(fact(5, "Bees can fly", Category::Science)));
    assert_eq!(pending.await.unwrap(), SubmitOutcome::Created(FactId(5)));
    assert!(app.set_text("next"));
    assert_eq!(store.tracked_calls().len(), 1);
}

#[tokio::test]
async fn vote_increments_exactly_one_counter() {
    let listed = fact(7, "Bees can fly", Category::Science).with_votes(3, 2, 1);

    for (kind, expected) in [
        (VoteKind::Interesting, (4, 2, 1)),
        (VoteKind::Mindblowing, (3, 3, 1)),
        (VoteKind::False, (3, 2, 2)),
    ] {
        let (store, app) = loaded_app(vec![listed.clone()]).await;
        let updated = listed.clone().with_votes(expected.0, expected.1, expected.2);
        store.enqueue_set_votes(updated.clone());

        assert_eq!(
            app.vote(FactId(7), kind).await,
            VoteOutcome::Updated(updated.votes(kind))
        );
        assert_eq!(
            store.tracked_calls(),
            vec![StoreCall::SetVotes {
                id: FactId(7),
                kind,
                value: listed.votes(kind) + 1,
            }]
        );

        let shown = app.state().facts[0].clone();
        assert_eq!(shown, updated);
        for other in VoteKind::ALL.into_iter().filter(|k| *k != kind) {
            assert_eq!(shown.votes(other), listed.votes(other));
        }
    }
}

#[tokio::test]
async fn vote_waits_for_the_store_before_showing_the_count() {
    let listed = fact(7, "Bees can fly", Category::Science).with_votes(3, 0, 0);
    let other = fact(8, "Water is wet", Category::Science);
    let (store, app) = loaded_app(vec![listed.clone(), other.clone()]).await;
    let responder = store.defer_set_votes();

    let pending = tokio::spawn({
        let app = app.clone();
        async move { app.vote(FactId(7), VoteKind::Interesting).await }
    });
    wait_for_calls(&store, 1).await;

    let state = app.state();
    assert!(state.is_updating(FactId(7)));
    assert_eq!(state.facts[0].votes_interesting, 3);
    assert_eq!(
        app.vote(FactId(7), VoteKind::False).await,
        VoteOutcome::Busy
    );

    store.enqueue_set_votes(other.clone().with_votes(0, 1, 0));
    assert_eq!(
        app.vote(FactId(8), VoteKind::Mindblowing).await,
        VoteOutcome::Updated(1)
    );

    responder.respond(Ok(listed.clone().with_votes(4, 0, 0)));
    assert_eq!(pending.await.unwrap(), VoteOutcome::Updated(4));

    let state = app.state();
    assert!(state.updating.is_empty());
    assert_eq!(state.facts[0].votes_interesting, 4);
    assert_eq!(state.facts[1].votes_mindblowing, 1);
}

#[tokio::test]
async fn failed_vote_leaves_the_list_unchanged() {
    let listed = fact(7, "Bees can fly", Category::Science).with_votes(3, 0, 0);
    let (store, app) = loaded_app(vec![listed.clone()]).await;
    store.enqueue_set_votes(MockResult::error(store_error()));

    assert_eq!(
        app.vote(FactId(7), VoteKind::Interesting).await,
        VoteOutcome::Failed
    );

    let state = app.state();
    assert_eq!(state.facts, vec![listed]);
    assert!(!state.is_updating(FactId(7)));
}

#[tokio::test]
async fn vote_on_unlisted_fact_is_skipped() {
    let (store, app) = loaded_app(vec![fact(1, "one", Category::News)]).await;

    assert_eq!(
        app.vote(FactId(99), VoteKind::Interesting).await,
        VoteOutcome::NotFound
    );
    assert!(store.tracked_calls().is_empty());
}

#[tokio::test]
async fn form_visibility_toggles() {
    let (_store, app) = setup();
    assert!(!app.state().show_form);
    assert!(app.toggle_form());
    assert!(app.state().show_form);
    assert!(!app.toggle_form());
}

#[tokio::test]
async fn rendered_list_marks_disputed_facts() {
    let (_store, app) = loaded_app(vec![
        fact(1, "Disputed claim", Category::News).with_votes(1, 0, 3),
        fact(2, "Solid claim", Category::News).with_votes(5, 0, 3),
    ])
    .await;

    let out = view::render(&app.state(), ViewOptions::default());
    let disputed_line = out.lines().find(|l| l.contains("Disputed claim")).unwrap();
    let solid_line = out.lines().find(|l| l.contains("Solid claim")).unwrap();
    assert!(disputed_line.contains("DISPUTED"));
    assert!(!solid_line.contains("DISPUTED"));
    assert!(out.contains("There are 2 facts in the database."));
}
