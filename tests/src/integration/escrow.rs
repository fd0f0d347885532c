//! # Escrow Flows
//!
//! Refunds through inline token transfers, administrative seizure and
//! cadence record cleanup.

#[cfg(test)]
mod tests {
    use crate::harness::{asset, name, Harness, GENESIS};
    use dm_01_manager::{
        action_names, ManagerApi, RefundArgs, SeizeDepositArgs, UpsertBlacklistArgs, UserArgs,
    };
    use shared_types::{ErrorKind, Name, Timestamp};
    use std::time::Duration;

    const REFUND_DELAY: Duration = Duration::from_secs(48 * 3600);

    fn refund_args(user: &Name, deposit_time: Timestamp) -> RefundArgs {
        RefundArgs {
            user: user.clone(),
            deposit_time,
        }
    }

    async fn posted(h: &Harness, user: &Name) {
        h.fund(&[user]);
        h.push(h.deposit_post(user)).await.unwrap();
    }

    // =============================================================================
    // REFUND
    // =============================================================================

    #[tokio::test]
    async fn test_refund_after_lock_returns_deposit() {
        let h = Harness::new();
        let alice = name("alice");
        posted(&h, &alice).await;

        h.advance(REFUND_DELAY);
        let receipt = h
            .push(h.manager_call(action_names::REFUND, &alice, &refund_args(&alice, GENESIS)))
            .await
            .unwrap();

        assert_eq!(receipt.inline_actions, 1);
        assert_eq!(h.balance(&alice), asset("100.0000 TLOS"));
        assert_eq!(h.balance(&h.manager()), asset("0.0000 TLOS"));
        assert_eq!(h.deposits(&alice), 0);
        // Content stays published after the refund.
        assert_eq!(h.posts_by(&alice), 1);
    }

    #[tokio::test]
    async fn test_refund_before_lock_rejected() {
        let h = Harness::new();
        let alice = name("alice");
        posted(&h, &alice).await;

        h.advance(REFUND_DELAY - Duration::from_secs(1));
        let err = h
            .push(h.manager_call(action_names::REFUND, &alice, &refund_args(&alice, GENESIS)))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TooEarly);
        assert_eq!(err.code(), "refund_locked");
        assert_eq!(h.deposits(&alice), 1);
        assert_eq!(h.balance(&alice), asset("95.0000 TLOS"));
    }

    #[tokio::test]
    async fn test_refund_twice_fails() {
        let h = Harness::new();
        let alice = name("alice");
        posted(&h, &alice).await;
        h.advance(REFUND_DELAY);

        let refund = || h.manager_call(action_names::REFUND, &alice, &refund_args(&alice, GENESIS));
        h.push(refund()).await.unwrap();
        let err = h.push(refund()).await.unwrap_err();

        assert_eq!(err.code(), "deposit_not_found");
        assert_eq!(h.balance(&alice), asset("100.0000 TLOS"));
    }

    #[tokio::test]
    async fn test_refund_targets_one_deposit() {
        let h = Harness::new();
        let alice = name("alice");
        posted(&h, &alice).await;
        h.advance(Duration::from_secs(600));
        let second = h.now();
        h.push(h.deposit_post(&alice)).await.unwrap();

        h.advance(REFUND_DELAY);
        h.push(h.manager_call(action_names::REFUND, &alice, &refund_args(&alice, GENESIS)))
            .await
            .unwrap();

        let remaining = h.deployment.manager.deposits_of(&alice);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].created_at, second);
        assert_eq!(h.balance(&alice), asset("95.0000 TLOS"));
    }

    #[tokio::test]
    async fn test_blacklisted_user_cannot_refund() {
        let h = Harness::new();
        let alice = name("alice");
        posted(&h, &alice).await;

        h.push(h.admin_call(
            action_names::UPSERT_BLACKLIST,
            &UpsertBlacklistArgs {
                user: alice.clone(),
                time: h.now(),
            },
        ))
        .await
        .unwrap();
        h.advance(REFUND_DELAY);

        let err = h
            .push(h.manager_call(action_names::REFUND, &alice, &refund_args(&alice, GENESIS)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(h.deposits(&alice), 1);

        h.push(h.admin_call(action_names::ERASE_BLACKLIST, &UserArgs { user: alice.clone() }))
            .await
            .unwrap();
        h.push(h.manager_call(action_names::REFUND, &alice, &refund_args(&alice, GENESIS)))
            .await
            .unwrap();
        assert_eq!(h.deposits(&alice), 0);
    }

    // =============================================================================
    // SEIZURE
    // =============================================================================

    #[tokio::test]
    async fn test_seized_deposit_stays_with_manager() {
        let h = Harness::new();
        let alice = name("alice");
        posted(&h, &alice).await;

        h.push(h.admin_call(
            action_names::SEIZE_DEPOSIT,
            &SeizeDepositArgs {
                user: alice.clone(),
                time: GENESIS,
                reason: "copyright notice".to_string(),
            },
        ))
        .await
        .unwrap();

        assert_eq!(h.deposits(&alice), 0);
        assert_eq!(h.balance(&h.manager()), asset("5.0000 TLOS"));

        h.advance(REFUND_DELAY);
        let err = h
            .push(h.manager_call(action_names::REFUND, &alice, &refund_args(&alice, GENESIS)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "deposit_not_found");
    }

    #[tokio::test]
    async fn test_seize_unknown_deposit_fails() {
        let h = Harness::new();
        let err = h
            .push(h.admin_call(
                action_names::SEIZE_DEPOSIT,
                &SeizeDepositArgs {
                    user: name("alice"),
                    time: GENESIS,
                    reason: String::new(),
                },
            ))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    // =============================================================================
    // CLOSEUSER
    // =============================================================================

    #[tokio::test]
    async fn test_closeuser_after_delay_resets_cadence() {
        let h = Harness::new();
        let alice = name("alice");
        posted(&h, &alice).await;
        let close = || h.manager_call(action_names::CLOSE_USER, &alice, &UserArgs { user: alice.clone() });

        let err = h.push(close()).await.unwrap_err();
        assert_eq!(err.code(), "close_too_soon");

        h.advance(Duration::from_secs(600));
        h.push(close()).await.unwrap();
        assert!(h.deployment.manager.cadence_of(&alice).is_none());

        let err = h.push(close()).await.unwrap_err();
        assert_eq!(err.code(), "user_info_not_found");

        // The deposit is unaffected and the next post opens a fresh record.
        assert_eq!(h.deposits(&alice), 1);
        h.push(h.deposit_post(&alice)).await.unwrap();
        assert_eq!(
            h.deployment.manager.cadence_of(&alice).unwrap().last_action,
            h.now()
        );
    }
}
