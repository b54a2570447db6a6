//! Integration tests for the Diesel social adapters against embedded
//! PostgreSQL.
//!
//! Each test clones a migrated template into its own temporary database and
//! drives the adapters through the domain services, so the SQL constraints
//! (unique edges, cascading deletes, post ordering) are exercised for real.
//!
//! Async calls run on a runtime owned by the test context; the fixture stays
//! synchronous because the cluster bootstrap blocks.

use std::sync::Arc;

use futures_util::FutureExt as _;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use social_backend::domain::ports::{
    SocialGraphCommand, SocialGraphQuery, SocialUnitOfWork, UserRepository,
};
use social_backend::domain::{
    Age, Error, ErrorCode, NewUser, PostText, SocialAccessService, User, UserId, UserName,
};
use social_backend::outbound::persistence::{
    DbPool, DieselSocialUnitOfWork, DieselUserRepository, PoolConfig,
};
use tokio::runtime::Runtime;

mod support;

use support::{handle_cluster_setup_failure, provision_template_database, shared_cluster};

struct TestContext {
    runtime: Runtime,
    users: DieselUserRepository,
    unit_of_work: Arc<DieselSocialUnitOfWork>,
    social: SocialAccessService<DieselSocialUnitOfWork>,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn user(&self, name: &str, age: i64) -> User {
        let profile = NewUser {
            name: UserName::new(name).expect("valid name"),
            age: Age::new(age).expect("valid age"),
        };
        self.runtime
            .block_on(self.users.create(&profile))
            .expect("user stored")
    }

    fn post(&self, owner: UserId, text: &str) {
        self.runtime
            .block_on(
                self.social
                    .create_post(owner, PostText::new(text).expect("valid text")),
            )
            .expect("post stored");
    }

    fn follower_count(&self, target: UserId) -> usize {
        self.runtime
            .block_on(self.social.list_followers(target))
            .expect("followers listed")
            .followers_count
    }

    fn stored_post_count(&self, owner: UserId) -> usize {
        self.runtime
            .block_on(self.unit_of_work.run(move |store| {
                async move { Ok(store.posts_by_owner(owner).await?.len()) }.boxed()
            }))
            .expect("posts read")
    }
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_template_database(cluster)?;

    let config = PoolConfig::new(database.url().to_string())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    let unit_of_work = Arc::new(DieselSocialUnitOfWork::new(pool.clone()));
    Ok(TestContext {
        runtime,
        users: DieselUserRepository::new(pool),
        social: SocialAccessService::new(Arc::clone(&unit_of_work)),
        unit_of_work,
        _database: database,
    })
}

#[fixture]
fn diesel_world() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn repeated_follow_keeps_a_single_edge(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: repeated_follow_keeps_a_single_edge skipped");
        return;
    };
    let ada = ctx.user("Ada", 21);
    let bea = ctx.user("Bea", 33);

    for _ in 0..2 {
        ctx.runtime
            .block_on(ctx.social.follow_user(ada.id(), bea.id()))
            .expect("follow succeeds");
    }

    assert_eq!(ctx.follower_count(ada.id()), 1);
}

#[rstest]
fn concurrent_follows_store_one_edge(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_follows_store_one_edge skipped");
        return;
    };
    let ada = ctx.user("Ada", 21);
    let bea = ctx.user("Bea", 33);

    let (first, second) = ctx.runtime.block_on(async {
        tokio::join!(
            ctx.social.follow_user(ada.id(), bea.id()),
            ctx.social.follow_user(ada.id(), bea.id()),
        )
    });

    first.expect("first follow succeeds");
    second.expect("second follow succeeds");
    assert_eq!(ctx.follower_count(ada.id()), 1);
}

#[rstest]
fn posts_are_returned_newest_first(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: posts_are_returned_newest_first skipped");
        return;
    };
    let ada = ctx.user("Ada", 21);
    let bea = ctx.user("Bea", 33);
    ctx.runtime
        .block_on(ctx.social.follow_user(ada.id(), bea.id()))
        .expect("follow succeeds");
    for text in ["first", "second", "third"] {
        ctx.post(ada.id(), text);
    }

    let posts = ctx
        .runtime
        .block_on(ctx.social.list_visible_posts(ada.id(), Some(bea.id())))
        .expect("follower sees posts");

    let texts: Vec<&str> = posts.iter().map(|post| post.text.as_str()).collect();
    assert_eq!(texts, vec!["third", "second", "first"]);
    assert!(posts.windows(2).all(|pair| pair[0].created_at >= pair[1].created_at));
}

#[rstest]
fn followers_listing_projects_edge_and_profile(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: followers_listing_projects_edge_and_profile skipped");
        return;
    };
    let ada = ctx.user("Ada", 21);
    let bea = ctx.user("Bea", 33);
    let cy = ctx.user("Cy", 50);
    for follower in [bea.id(), cy.id()] {
        ctx.runtime
            .block_on(ctx.social.follow_user(ada.id(), follower))
            .expect("follow succeeds");
    }

    let overview = ctx
        .runtime
        .block_on(ctx.social.list_followers(ada.id()))
        .expect("followers listed");

    assert_eq!(overview.followers_count, 2);
    let rows: Vec<(UserId, &str)> = overview
        .content
        .iter()
        .map(|row| (row.user_id, row.name.as_str()))
        .collect();
    assert_eq!(rows, vec![(bea.id(), "Bea"), (cy.id(), "Cy")]);
    assert!(overview.content[0].follow_id < overview.content[1].follow_id);
}

#[rstest]
fn deleting_a_user_cascades_to_edges_and_posts(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_user_cascades_to_edges_and_posts skipped");
        return;
    };
    let ada = ctx.user("Ada", 21);
    let bea = ctx.user("Bea", 33);
    ctx.runtime
        .block_on(ctx.social.follow_user(ada.id(), bea.id()))
        .expect("bea follows ada");
    ctx.runtime
        .block_on(ctx.social.follow_user(bea.id(), ada.id()))
        .expect("ada follows bea");
    ctx.post(bea.id(), "soon gone");

    let removed = ctx
        .runtime
        .block_on(ctx.users.delete(bea.id()))
        .expect("delete succeeds");

    assert!(removed);
    assert_eq!(ctx.follower_count(ada.id()), 0);
    assert_eq!(ctx.stored_post_count(bea.id()), 0);
    let err: Error = ctx
        .runtime
        .block_on(ctx.social.follow_user(ada.id(), bea.id()))
        .expect_err("deleted follower cannot follow");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
