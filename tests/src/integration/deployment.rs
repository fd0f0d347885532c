//! # Deployment
//!
//! Config-driven wiring and the metrics the host exports.

#[cfg(test)]
mod tests {
    use crate::harness::{asset, name, Harness};
    use dm_01_manager::ManagerApi;
    use dm_host::{ConfigError, HostConfig};
    use dm_telemetry::{
        gather_metrics, init_telemetry, TelemetryConfig, TRANSACTIONS_ABORTED, TRANSACTIONS_APPLIED,
    };
    use std::io::Write;
    use std::time::Duration;

    const CUSTOM: &str = r#"
        [accounts]
        manager = "escrow"
        admin = "moderator"
        posts = "board"
        token = "coin"

        [deposit]
        quantity = "1.50 USD"

        [timing]
        post_min_delay_secs = 60
        refund_delay_secs = 3600
    "#;

    #[tokio::test]
    async fn test_custom_deployment_posts_and_refunds() {
        let h = Harness::with_config(HostConfig::parse(CUSTOM).unwrap());
        let alice = name("alice");
        h.deployment
            .token
            .issue(&alice, &asset("10.00 USD"))
            .unwrap();

        h.push(h.deposit_post(&alice)).await.unwrap();
        assert_eq!(h.balance(&alice), asset("8.50 USD"));
        assert_eq!(h.balance(&name("escrow")), asset("1.50 USD"));

        h.advance(Duration::from_secs(60));
        h.push(h.deposit_post(&alice)).await.unwrap();
        assert_eq!(h.deposits(&alice), 2);

        h.advance(Duration::from_secs(3600));
        let first = h.deployment.manager.deposits_of(&alice)[0].created_at;
        h.push(h.manager_call(
            dm_01_manager::action_names::REFUND,
            &alice,
            &dm_01_manager::RefundArgs {
                user: alice.clone(),
                deposit_time: first,
            },
        ))
        .await
        .unwrap();
        assert_eq!(h.balance(&alice), asset("8.50 USD"));
    }

    #[tokio::test]
    async fn test_custom_admin_holds_list_authority() {
        let h = Harness::with_config(HostConfig::parse(CUSTOM).unwrap());
        let args = dm_01_manager::UpsertWhitelistArgs {
            user: name("bob"),
            display_name: "Bob".to_string(),
        };

        let err = h
            .push(h.manager_call(dm_01_manager::action_names::UPSERT_WHITELIST, &name("escrow"), &args))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "missing_authority");

        h.push(h.admin_call(dm_01_manager::action_names::UPSERT_WHITELIST, &args))
            .await
            .unwrap();
        assert!(h.deployment.manager.is_whitelisted(&name("bob")));
    }

    #[tokio::test]
    async fn test_default_deposit_rejected_by_custom_deployment() {
        let h = Harness::with_config(HostConfig::parse(CUSTOM).unwrap());
        let alice = name("alice");
        h.deployment
            .token
            .issue(&alice, &asset("10.00 USD"))
            .unwrap();

        let mut transfer = h.deposit_transfer(&alice);
        transfer.quantity = asset("5.0000 TLOS");
        let tx = h.post(dm_host::Transaction::default(), &crate::harness::content(&alice));
        let tx = h.validate(tx, &alice);
        let err = h.push(h.transfer(tx, &transfer)).await.unwrap_err();
        assert_eq!(err.code(), "wrong_amount");
    }

    #[test]
    fn test_config_file_round_trip_into_harness() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CUSTOM.as_bytes()).unwrap();

        let config = HostConfig::load(file.path()).unwrap();
        let h = Harness::with_config(config);
        assert!(h.deployment.ledger.has_program(&name("board")));
        assert!(h.deployment.ledger.has_program(&name("coin")));
        assert!(!h.deployment.ledger.has_program(&name("dmcy.posts")));
    }

    #[test]
    fn test_invalid_config_refused() {
        let err = HostConfig::parse("[deposit]\nquantity = \"0.00 USD\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_shape_leaving_unchecked_slots_refused() {
        let gapped = format!(
            "{CUSTOM}\n[shape]\nsubmit_index = 0\nvalidate_index = 1\npayment_index = 3\n"
        );
        let err = HostConfig::parse(&gapped).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("payment=3"));
    }

    #[tokio::test]
    async fn test_metrics_track_commits_and_aborts() {
        let h = Harness::new();
        let alice = name("alice");
        h.fund(&[&alice]);
        let applied = TRANSACTIONS_APPLIED.get();
        let too_early = TRANSACTIONS_ABORTED.with_label_values(&["too_early"]).get();

        h.push(h.deposit_post(&alice)).await.unwrap();
        h.push(h.deposit_post(&alice)).await.unwrap_err();

        assert!(TRANSACTIONS_APPLIED.get() >= applied + 1.0);
        assert!(TRANSACTIONS_ABORTED.with_label_values(&["too_early"]).get() >= too_early + 1.0);

        let text = gather_metrics().unwrap();
        assert!(text.contains("dm_host_transactions_applied_total"));
        assert!(text.contains("dm_host_actions_executed_total"));
    }

    #[test]
    fn test_telemetry_init_alongside_host() {
        let config = TelemetryConfig::default();
        assert!(init_telemetry(&config).is_ok());
        assert!(init_telemetry(&config).is_ok());
        let h = Harness::new();
        assert!(h.deployment.ledger.has_program(&h.manager()));
    }
}
