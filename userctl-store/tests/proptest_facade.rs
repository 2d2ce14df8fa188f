use std::collections::HashSet;

use futures::FutureExt;
use proptest::prelude::*;
use userctl_store::{MemoryUserStore, StoreError, User, UserRepositoryFacade};

// Strategy: distinct emails paired with arbitrary non-blank names
fn arb_users() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::hash_set("[a-z0-9]{1,12}@[a-z]{1,8}\\.com", 0..20).prop_flat_map(|emails| {
        let emails: Vec<String> = emails.into_iter().collect();
        let n = emails.len();
        (
            prop::collection::vec("[A-Za-z][A-Za-z ]{0,30}", n),
            Just(emails),
        )
            .prop_map(|(names, emails)| names.into_iter().zip(emails).collect())
    })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    /// Property: created users echo their input and receive fresh ids;
    /// listing returns exactly the created set; close runs once.
    #[test]
    fn prop_create_then_list_is_exact(pairs in arb_users()) {
        let store = MemoryUserStore::new();
        let facade = UserRepositoryFacade::open(Box::new(store.clone()));
        let input = pairs.clone();

        let (created, listed) = runtime().block_on(facade.scoped(|users| {
            async move {
                let mut created = Vec::with_capacity(input.len());
                for (name, email) in &input {
                    created.push(users.create_user(name, email).await?);
                }
                let listed = users.list_users().await?;
                Ok::<_, StoreError>((created, listed))
            }
            .boxed()
        })).unwrap();

        for (user, (name, email)) in created.iter().zip(&pairs) {
            prop_assert_eq!(&user.name, name);
            prop_assert_eq!(&user.email, email);
        }

        let ids: HashSet<i32> = created.iter().map(|u| u.id).collect();
        prop_assert_eq!(ids.len(), created.len());

        let created_set: HashSet<User> = created.into_iter().collect();
        let listed_set: HashSet<User> = listed.iter().cloned().collect();
        prop_assert_eq!(listed.len(), listed_set.len());
        prop_assert_eq!(created_set, listed_set);
        prop_assert_eq!(store.disconnect_count(), 1);
    }

    /// Property: a duplicate email never adds a record, and close still runs once.
    #[test]
    fn prop_duplicate_email_rejected(name_a in "[A-Z][a-z]{0,10}", name_b in "[A-Z][a-z]{0,10}") {
        let store = MemoryUserStore::new();
        let facade = UserRepositoryFacade::open(Box::new(store.clone()));

        let outcome = runtime().block_on(facade.scoped(|users| {
            async move {
                let first = users.create_user(&name_a, "dup@email.com").await?;
                let second = users.create_user(&name_b, "dup@email.com").await;
                Ok::<_, StoreError>((first, second, users.list_users().await?))
            }
            .boxed()
        }));

        let (first, second, listed) = outcome.unwrap();
        prop_assert!(
            second.as_ref().is_err_and(StoreError::is_conflict),
            "expected conflict, got {:?}",
            second
        );
        prop_assert_eq!(listed, vec![first]);
        prop_assert_eq!(store.disconnect_count(), 1);
    }
}
