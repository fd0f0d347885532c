//! # Posting Flows
//!
//! Deposit-backed and whitelisted posting, including the posting cadence.
//!
//! ```text
//! t = 0        post + validatepost + 5.0000 TLOS   -> accepted, deposit #1
//! t = 9m59s    same shape                          -> post_too_soon
//! t = 10m      same shape                          -> accepted, deposit #2
//! ```

#[cfg(test)]
mod tests {
    use crate::harness::{asset, content, name, Harness, GENESIS};
    use dm_01_manager::{action_names, ManagerApi, UpsertWhitelistArgs, UserArgs};
    use shared_types::ErrorKind;
    use std::time::Duration;

    // =============================================================================
    // DEPOSIT PATH
    // =============================================================================

    #[tokio::test]
    async fn test_deposit_post_escrows_funds_and_stores_content() {
        let h = Harness::new();
        let alice = name("alice");
        h.fund(&[&alice]);

        let receipt = h.push(h.deposit_post(&alice)).await.unwrap();

        assert_eq!(receipt.actions, 3);
        assert_eq!(receipt.inline_actions, 0);
        assert_eq!(receipt.executed_at, GENESIS);
        assert_eq!(h.balance(&alice), asset("95.0000 TLOS"));
        assert_eq!(h.balance(&h.manager()), asset("5.0000 TLOS"));

        let deposits = h.deployment.manager.deposits_of(&alice);
        assert_eq!(deposits.len(), 1);
        assert_eq!(deposits[0].created_at, GENESIS);
        assert_eq!(deposits[0].quantity, asset("5.0000 TLOS"));

        let stored = h.deployment.content.by_user(&alice);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].record, content(&alice));
        assert_eq!(stored[0].accepted_at, GENESIS);

        let cadence = h.deployment.manager.cadence_of(&alice).unwrap();
        assert_eq!(cadence.last_action, GENESIS);
    }

    #[tokio::test]
    async fn test_posting_cadence_worked_scenario() {
        let h = Harness::new();
        let alice = name("alice");
        h.fund(&[&alice]);

        h.push(h.deposit_post(&alice)).await.unwrap();

        h.advance(Duration::from_secs(9 * 60 + 59));
        let err = h.push(h.deposit_post(&alice)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooEarly);
        assert_eq!(err.code(), "post_too_soon");
        assert_eq!(h.deposits(&alice), 1);
        assert_eq!(h.posts_by(&alice), 1);
        assert_eq!(h.balance(&alice), asset("95.0000 TLOS"));

        h.advance(Duration::from_secs(1));
        h.push(h.deposit_post(&alice)).await.unwrap();
        assert_eq!(h.deposits(&alice), 2);
        assert_eq!(h.posts_by(&alice), 2);
        assert_eq!(h.balance(&alice), asset("90.0000 TLOS"));
        assert_eq!(
            h.deployment.manager.cadence_of(&alice).unwrap().last_action,
            h.now()
        );
    }

    #[tokio::test]
    async fn test_users_have_independent_cadence() {
        let h = Harness::new();
        let (alice, bob) = (name("alice"), name("bob"));
        h.fund(&[&alice, &bob]);

        h.push(h.deposit_post(&alice)).await.unwrap();
        h.push(h.deposit_post(&bob)).await.unwrap();

        assert_eq!(h.deployment.content.len(), 2);
        assert_eq!(h.balance(&h.manager()), asset("10.0000 TLOS"));
    }

    #[tokio::test]
    async fn test_unfunded_user_cannot_post() {
        let h = Harness::new();
        let carol = name("carol");

        let err = h.push(h.deposit_post(&carol)).await.unwrap_err();

        assert_eq!(err.code(), "insufficient_balance");
        assert_eq!(h.deposits(&carol), 0);
        assert_eq!(h.posts_by(&carol), 0);
        assert!(h.deployment.manager.cadence_of(&carol).is_none());
    }

    #[tokio::test]
    async fn test_invalid_content_rolls_back_deposit() {
        let h = Harness::new();
        let alice = name("alice");
        h.fund(&[&alice]);

        let mut record = content(&alice);
        record.title = "short".to_string();
        let tx = h.post(dm_host::Transaction::default(), &record);
        let tx = h.validate(tx, &alice);
        let tx = h.transfer(tx, &h.deposit_transfer(&alice));

        let err = h.push(tx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldInvalid);
        assert_eq!(err.code(), "title_length");
        assert_eq!(h.balance(&alice), asset("100.0000 TLOS"));
        assert!(h.deployment.manager.cadence_of(&alice).is_none());
    }

    // =============================================================================
    // WHITELIST PATH
    // =============================================================================

    async fn whitelist(h: &Harness, user: &str) {
        h.push(h.admin_call(
            action_names::UPSERT_WHITELIST,
            &UpsertWhitelistArgs {
                user: name(user),
                display_name: format!("{user} (trusted uploader)"),
            },
        ))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_whitelisted_post_takes_no_deposit() {
        let h = Harness::new();
        let bob = name("bob");
        h.fund(&[&bob]);
        whitelist(&h, "bob").await;

        let receipt = h.push(h.exempt_post(&bob)).await.unwrap();

        assert_eq!(receipt.actions, 2);
        assert_eq!(h.balance(&bob), asset("100.0000 TLOS"));
        assert_eq!(h.deposits(&bob), 0);
        assert_eq!(h.posts_by(&bob), 1);
        assert!(h.deployment.manager.cadence_of(&bob).is_some());
    }

    #[tokio::test]
    async fn test_whitelisted_user_still_bound_by_cadence() {
        let h = Harness::new();
        let bob = name("bob");
        whitelist(&h, "bob").await;

        h.push(h.exempt_post(&bob)).await.unwrap();
        let err = h.push(h.exempt_post(&bob)).await.unwrap_err();
        assert_eq!(err.code(), "post_too_soon");

        h.advance(Duration::from_secs(600));
        h.push(h.exempt_post(&bob)).await.unwrap();
        assert_eq!(h.posts_by(&bob), 2);
    }

    #[tokio::test]
    async fn test_upsert_whitelist_updates_display_name() {
        let h = Harness::new();
        whitelist(&h, "bob").await;
        h.push(h.admin_call(
            action_names::UPSERT_WHITELIST,
            &UpsertWhitelistArgs {
                user: name("bob"),
                display_name: "Bob".to_string(),
            },
        ))
        .await
        .unwrap();

        let entry = h.deployment.manager.whitelist_entry(&name("bob")).unwrap();
        assert_eq!(entry.display_name, "Bob");
    }

    #[tokio::test]
    async fn test_erased_whitelist_entry_requires_deposit_again() {
        let h = Harness::new();
        let bob = name("bob");
        h.fund(&[&bob]);
        whitelist(&h, "bob").await;

        h.push(h.admin_call(action_names::ERASE_WHITELIST, &UserArgs { user: bob.clone() }))
            .await
            .unwrap();
        assert!(!h.deployment.manager.is_whitelisted(&bob));

        let err = h.push(h.exempt_post(&bob)).await.unwrap_err();
        assert_eq!(err.code(), "missing_deposit");

        h.push(h.deposit_post(&bob)).await.unwrap();
        assert_eq!(h.deposits(&bob), 1);
    }

    #[tokio::test]
    async fn test_erase_missing_whitelist_entry_fails() {
        let h = Harness::new();
        let err = h
            .push(h.admin_call(action_names::ERASE_WHITELIST, &UserArgs { user: name("nobody") }))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.code(), "whitelist_entry_not_found");
    }
}
