//! # Authority Exploits
//!
//! Acting for another account, draining escrow, and blocked users routing
//! around the blacklist.

#[cfg(test)]
mod tests {
    use crate::harness::{asset, content, name, Harness, GENESIS};
    use dm_01_manager::{
        action_names, ManagerApi, RefundArgs, SeizeDepositArgs, UpsertBlacklistArgs,
        UpsertWhitelistArgs, UserArgs,
    };
    use dm_host::Transaction;
    use shared_types::{ErrorKind, Name, TransferArgs};
    use std::time::Duration;

    async fn blacklist(h: &Harness, user: &Name) {
        h.push(h.admin_call(
            action_names::UPSERT_BLACKLIST,
            &UpsertBlacklistArgs {
                user: user.clone(),
                time: h.now(),
            },
        ))
        .await
        .unwrap();
    }

    async fn whitelist(h: &Harness, user: &Name) {
        h.push(h.admin_call(
            action_names::UPSERT_WHITELIST,
            &UpsertWhitelistArgs {
                user: user.clone(),
                display_name: String::new(),
            },
        ))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_post_as_another_user_rejected() {
        let h = Harness::new();
        let (alice, mallory) = (name("alice"), name("mallory"));
        h.fund(&[&mallory]);

        // Content claims alice, mallory signs and pays.
        let tx = h.action(
            Transaction::default(),
            h.config.posts.account.clone(),
            "post",
            vec![mallory.clone()],
            &content(&alice),
        );
        let tx = h.validate(tx, &mallory);
        let tx = h.transfer(tx, &h.deposit_transfer(&mallory));

        let err = h.push(tx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(h.deployment.content.len(), 0);
        assert_eq!(h.balance(&mallory), asset("100.0000 TLOS"));
    }

    #[tokio::test]
    async fn test_validatepost_for_another_user_rejected() {
        let h = Harness::new();
        let (alice, mallory) = (name("alice"), name("mallory"));
        h.fund(&[&alice]);

        let tx = h.post(Transaction::default(), &content(&alice));
        let tx = h.action(
            tx,
            h.manager(),
            action_names::VALIDATE_POST,
            vec![mallory.clone()],
            &UserArgs { user: alice.clone() },
        );
        let tx = h.transfer(tx, &h.deposit_transfer(&alice));

        let err = h.push(tx).await.unwrap_err();
        assert_eq!(err.code(), "missing_authority");
        assert_eq!(h.deposits(&alice), 0);
    }

    #[tokio::test]
    async fn test_refund_of_foreign_deposit_rejected() {
        let h = Harness::new();
        let (alice, mallory) = (name("alice"), name("mallory"));
        h.fund(&[&alice]);
        h.push(h.deposit_post(&alice)).await.unwrap();
        h.advance(Duration::from_secs(48 * 3600));

        let err = h
            .push(h.manager_call(
                action_names::REFUND,
                &mallory,
                &RefundArgs {
                    user: alice.clone(),
                    deposit_time: GENESIS,
                },
            ))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "missing_authority");
        assert_eq!(h.deposits(&alice), 1);
        assert_eq!(h.balance(&mallory), asset("0.0000 TLOS"));
    }

    #[tokio::test]
    async fn test_escrow_cannot_be_drained_directly() {
        let h = Harness::new();
        let (alice, mallory) = (name("alice"), name("mallory"));
        h.fund(&[&alice]);
        h.push(h.deposit_post(&alice)).await.unwrap();

        let drain = TransferArgs {
            from: h.manager(),
            to: mallory.clone(),
            quantity: asset("5.0000 TLOS"),
            memo: String::new(),
        };
        let tx = h.action(
            Transaction::default(),
            h.config.manager.token_account.clone(),
            "transfer",
            vec![mallory.clone()],
            &drain,
        );

        let err = h.push(tx).await.unwrap_err();
        assert_eq!(err.code(), "missing_authority");
        assert_eq!(h.balance(&h.manager()), asset("5.0000 TLOS"));
    }

    #[tokio::test]
    async fn test_users_cannot_run_admin_actions() {
        let h = Harness::new();
        let mallory = name("mallory");
        let attempts = [
            h.manager_call(
                action_names::UPSERT_WHITELIST,
                &mallory,
                &UpsertWhitelistArgs {
                    user: mallory.clone(),
                    display_name: "totally legit".to_string(),
                },
            ),
            h.manager_call(
                action_names::ERASE_BLACKLIST,
                &mallory,
                &UserArgs {
                    user: mallory.clone(),
                },
            ),
            h.manager_call(
                action_names::SEIZE_DEPOSIT,
                &mallory,
                &SeizeDepositArgs {
                    user: name("alice"),
                    time: GENESIS,
                    reason: String::new(),
                },
            ),
        ];
        for tx in attempts {
            let err = h.push(tx).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unauthorized);
        }
        assert!(!h.deployment.manager.is_whitelisted(&mallory));
    }

    #[tokio::test]
    async fn test_blacklist_wins_over_whitelist() {
        let h = Harness::new();
        let mallory = name("mallory");
        h.fund(&[&mallory]);
        whitelist(&h, &mallory).await;
        blacklist(&h, &mallory).await;

        for tx in [h.exempt_post(&mallory), h.deposit_post(&mallory)] {
            let err = h.push(tx).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Forbidden);
            assert_eq!(err.code(), "blacklisted");
        }
        assert_eq!(h.posts_by(&mallory), 0);
        assert!(h.deployment.manager.cadence_of(&mallory).is_none());
    }

    #[tokio::test]
    async fn test_failed_admin_batch_leaves_no_partial_state() {
        let h = Harness::new();
        let carol = name("carol");
        let admin = h.config.manager.admin.clone();

        let tx = h.admin_call(
            action_names::UPSERT_WHITELIST,
            &UpsertWhitelistArgs {
                user: carol.clone(),
                display_name: "Carol".to_string(),
            },
        );
        let tx = h.action(
            tx,
            h.manager(),
            action_names::ERASE_BLACKLIST,
            vec![admin],
            &UserArgs { user: carol.clone() },
        );

        let err = h.push(tx).await.unwrap_err();
        assert_eq!(err.code(), "blacklist_entry_not_found");
        assert!(!h.deployment.manager.is_whitelisted(&carol));
    }
}
