use std::sync::Arc;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use futures::executor::block_on;
use mock_wallet::{Failure, MockWallet, StatusLog, ACCOUNT};
use nfa_client::call::CallKind;
use nfa_client::config::{DeploymentConfig, DeploymentConfigBuilder, SEPOLIA_CHAIN_ID};
use nfa_client::contracts::{IMorToken, INfaProvider};
use nfa_client::error::Error;
use nfa_client::state::{ConnectionState, DraftField, NfaDraft};
use nfa_client::status::{ActionKind, Status, StatusBoard, StatusReporter};
use nfa_client::wallet::Wallet;
use nfa_client::NfaClient;
use proptest::prelude::*;
use tokio::sync::Notify;


fn foo_draft() -> NfaDraft {
    NfaDraft::new("Foo", "FOO")
}

/// Client that went through a successful connect, with the status log emptied
async fn connected_client(
    wallet: MockWallet,
    config: DeploymentConfig,
    log: &StatusLog,
) -> NfaClient<MockWallet, impl StatusReporter> {
    let client = NfaClient::new(wallet, config, log.reporter());
    client.connect().await.unwrap();
    log.clear();
    client
}

mod connect {
    use super::*;

    #[tokio::test]
    async fn yields_first_account_and_switches_network() {
        let other = Address::repeat_byte(0x01);
        let log = StatusLog::default();
        let client = NfaClient::new(
            MockWallet::new(vec![ACCOUNT, other]),
            DeploymentConfig::default(),
            log.reporter(),
        );

        assert_eq!(client.connect().await.unwrap(), ACCOUNT);
        assert_eq!(
            client.state().connection,
            ConnectionState::Connected {
                account: ACCOUNT,
                on_target_network: true
            }
        );
        assert_eq!(client.wallet().switched(), vec![SEPOLIA_CHAIN_ID]);
        assert_eq!(log.entries(), vec![Status::WalletConnected(ACCOUNT)]);
        assert_eq!(
            log.messages(),
            vec![format!("Wallet connected: {}", ACCOUNT)]
        );
    }

    #[tokio::test]
    async fn network_switch_failure_is_not_fatal() {
        let log = StatusLog::default();
        let client = NfaClient::new(
            MockWallet::with_account().failing_switch(),
            DeploymentConfig::default(),
            log.reporter(),
        );

        assert_eq!(client.connect().await.unwrap(), ACCOUNT);
        assert_eq!(
            client.state().connection,
            ConnectionState::Connected {
                account: ACCOUNT,
                on_target_network: false
            }
        );

        let messages = log.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].starts_with("Error: Failed to switch to chain 0xaa36a7"));

        // Actions still go through on the wallet's current network
        client.submit_faucet_request().await.unwrap();
        assert_eq!(client.wallet().sent_kinds(), vec![CallKind::Faucet]);
    }

    #[tokio::test]
    async fn missing_wallet_is_unavailable() {
        let board = StatusBoard::new();
        let client = NfaClient::new(None::<MockWallet>, DeploymentConfig::default(), board);

        assert!(matches!(
            client.connect().await,
            Err(Error::WalletUnavailable(_))
        ));
        assert!(!client.state().connection.is_connected());

        let status = client.state().status;
        assert!(status.as_ref().is_some_and(Status::is_failure));
        assert!(status
            .unwrap()
            .to_string()
            .starts_with("Error: Wallet is not available"));
    }

    #[tokio::test]
    async fn user_rejection_keeps_disconnected() {
        let log = StatusLog::default();
        let client = NfaClient::new(
            MockWallet::with_account().failing_accounts(Failure::Rejected),
            DeploymentConfig::default(),
            log.reporter(),
        );

        assert!(matches!(client.connect().await, Err(Error::UserRejected(_))));
        assert_eq!(client.state().connection, ConnectionState::Disconnected);
        assert!(client.wallet().switched().is_empty());
        assert_eq!(log.entries().len(), 1);
        assert!(log.entries()[0].is_failure());
    }

    #[tokio::test]
    async fn wallet_error_is_not_unavailability() {
        let log = StatusLog::default();
        let client = NfaClient::new(
            MockWallet::with_account().failing_accounts(Failure::Failed),
            DeploymentConfig::default(),
            log.reporter(),
        );

        assert!(matches!(
            client.connect().await,
            Err(Error::AccountRequestFailed(_))
        ));
        assert!(!client.state().connection.is_connected());
        assert_eq!(
            log.messages(),
            vec!["Error: Account request failed: account access failed".to_string()]
        );
    }

    #[tokio::test]
    async fn no_authorized_account() {
        let log = StatusLog::default();
        let client = NfaClient::new(
            MockWallet::new(Vec::new()),
            DeploymentConfig::default(),
            log.reporter(),
        );

        assert!(matches!(client.connect().await, Err(Error::NoAccounts)));
        assert!(!client.state().connection.is_connected());
    }
}

mod preconditions {
    use super::*;

    #[tokio::test]
    async fn actions_require_a_connection() {
        let log = StatusLog::default();
        let client = NfaClient::new(
            MockWallet::with_account(),
            DeploymentConfig::default(),
            log.reporter(),
        );

        assert!(matches!(
            client.submit_create_nfa(&foo_draft()).await,
            Err(Error::NotConnected)
        ));
        assert!(matches!(
            client.submit_faucet_request().await,
            Err(Error::NotConnected)
        ));
        assert!(matches!(
            client.submit_create_nfa_with_payment(&foo_draft()).await,
            Err(Error::NotConnected)
        ));

        assert_eq!(client.wallet().total_calls(), 0);
        assert_eq!(
            log.messages(),
            vec!["Error: Connect wallet first!".to_string(); 3]
        );
    }

    #[tokio::test]
    async fn connection_is_checked_before_the_draft() {
        let log = StatusLog::default();
        let client = NfaClient::new(
            MockWallet::with_account(),
            DeploymentConfig::default(),
            log.reporter(),
        );

        assert!(matches!(
            client.submit_create_nfa(&NfaDraft::default()).await,
            Err(Error::NotConnected)
        ));
    }

    #[tokio::test]
    async fn empty_symbol_is_rejected() {
        let log = StatusLog::default();
        let client =
            connected_client(MockWallet::with_account(), DeploymentConfig::default(), &log).await;

        assert!(matches!(
            client.submit_create_nfa(&NfaDraft::new("Foo", "")).await,
            Err(Error::InvalidDraft {
                missing: DraftField::Symbol
            })
        ));
        assert!(client.wallet().sent().is_empty());
        assert_eq!(
            log.messages(),
            vec!["Error: Please enter name and symbol.".to_string()]
        );
    }

    proptest! {
        #[test]
        fn incomplete_drafts_never_reach_the_wallet(
            text in "\\PC{0,12}",
            name_missing in any::<bool>(),
            with_payment in any::<bool>(),
        ) {
            let draft = if name_missing {
                NfaDraft::new("", text)
            } else {
                NfaDraft::new(text, "")
            };

            let log = StatusLog::default();
            let client = block_on(connected_client(
                MockWallet::with_account(),
                DeploymentConfig::default(),
                &log,
            ));

            let result = block_on(async {
                if with_payment {
                    client.submit_create_nfa_with_payment(&draft).await
                } else {
                    client.submit_create_nfa(&draft).await
                }
            });

            prop_assert!(matches!(result, Err(Error::InvalidDraft { .. })), "unexpected result: {:?}", result);
            prop_assert!(client.wallet().sent().is_empty());
        }
    }
}

mod create_nfa {
    use super::*;

    #[tokio::test]
    async fn submitted_then_created() {
        let log = StatusLog::default();
        let client =
            connected_client(MockWallet::with_account(), DeploymentConfig::default(), &log).await;

        let tx_hash = client.submit_create_nfa(&foo_draft()).await.unwrap();

        assert_eq!(
            log.entries(),
            vec![
                Status::Submitted {
                    kind: CallKind::CreateNfa,
                    tx_hash
                },
                Status::Succeeded(ActionKind::CreateNfa),
            ]
        );
        assert_eq!(log.messages()[1], "NFA created successfully!");
        assert_eq!(
            client.state().status,
            Some(Status::Succeeded(ActionKind::CreateNfa))
        );

        let sent = client.wallet().sent();
        assert_eq!(sent.len(), 1);
        let (from, call, _) = &sent[0];
        assert_eq!(*from, ACCOUNT);
        assert_eq!(call.to, client.config().nfa_factory);
        let decoded = INfaProvider::createNFACall::abi_decode(&call.input, true).unwrap();
        assert_eq!((decoded.name.as_str(), decoded.symbol.as_str()), ("Foo", "FOO"));
    }

    #[tokio::test]
    async fn reverted_transaction_reports_error() {
        let log = StatusLog::default();
        let client = connected_client(
            MockWallet::with_account().reverting(CallKind::CreateNfa),
            DeploymentConfig::default(),
            &log,
        )
        .await;

        let result = client.submit_create_nfa(&foo_draft()).await;

        assert!(matches!(result, Err(Error::ConfirmationFailed { .. })));
        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0], Status::Submitted { .. }));
        assert!(entries[1].is_failure());
        assert!(log.messages()[1].contains("execution reverted"));
    }

    #[tokio::test]
    async fn rejected_signature_reports_error_only() {
        let log = StatusLog::default();
        let client = connected_client(
            MockWallet::with_account().failing_send(CallKind::CreateNfa, Failure::Rejected),
            DeploymentConfig::default(),
            &log,
        )
        .await;

        assert!(matches!(
            client.submit_create_nfa(&foo_draft()).await,
            Err(Error::UserRejected(_))
        ));
        assert_eq!(log.entries().len(), 1);
        assert!(log.entries()[0].is_failure());
    }
}

mod faucet {
    use super::*;

    #[tokio::test]
    async fn tokens_received() {
        let log = StatusLog::default();
        let client =
            connected_client(MockWallet::with_account(), DeploymentConfig::default(), &log).await;

        let tx_hash = client.submit_faucet_request().await.unwrap();

        assert_eq!(
            log.messages(),
            vec![
                format!("Faucet transaction sent: {}", tx_hash),
                "MOR tokens received!".to_string(),
            ]
        );
        let (_, call, _) = &client.wallet().sent()[0];
        assert_eq!(call.to, client.config().payment_token);
        assert_eq!(call.input.as_ref(), IMorToken::faucetCall::SELECTOR.as_slice());
    }

    #[tokio::test]
    async fn every_request_is_a_new_transaction() {
        let log = StatusLog::default();
        let client =
            connected_client(MockWallet::with_account(), DeploymentConfig::default(), &log).await;

        let first = client.submit_faucet_request().await.unwrap();
        let second = client.submit_faucet_request().await.unwrap();

        assert_ne!(first, second);
        assert_eq!(
            client.wallet().sent_kinds(),
            vec![CallKind::Faucet, CallKind::Faucet]
        );
    }

    #[tokio::test]
    async fn submission_failure() {
        let log = StatusLog::default();
        let client = connected_client(
            MockWallet::with_account().failing_send(CallKind::Faucet, Failure::Failed),
            DeploymentConfig::default(),
            &log,
        )
        .await;

        assert!(matches!(
            client.submit_faucet_request().await,
            Err(Error::SubmissionFailed(_))
        ));
        assert_eq!(
            log.messages(),
            vec!["Error: Transaction submission failed: transaction signature failed".to_string()]
        );
    }
}

mod create_nfa_with_payment {
    use super::*;

    #[tokio::test]
    async fn approves_then_creates() {
        let config = DeploymentConfigBuilder::default()
            .approval_amount(U256::from(10u64).pow(U256::from(18u64)))
            .build()
            .unwrap();
        let log = StatusLog::default();
        let client = connected_client(MockWallet::with_account(), config.clone(), &log).await;

        let tx_hash = client
            .submit_create_nfa_with_payment(&foo_draft())
            .await
            .unwrap();

        assert_eq!(
            client.wallet().sent_kinds(),
            vec![CallKind::Approve, CallKind::CreateNfaWithPayment]
        );

        let sent = client.wallet().sent();
        let (_, approve, approve_hash) = &sent[0];
        let (_, create, create_hash) = &sent[1];
        assert_eq!(*create_hash, tx_hash);

        assert_eq!(approve.to, config.payment_token);
        let approve = IMorToken::approveCall::abi_decode(&approve.input, true).unwrap();
        assert_eq!(approve.spender, config.nfa_factory);
        assert_eq!(approve.amount, config.approval_amount);

        assert_eq!(create.to, config.nfa_factory);
        let create = INfaProvider::createNFAWithPaymentCall::abi_decode(&create.input, true).unwrap();
        assert_eq!(create.token, config.payment_token);
        assert_eq!(create.name, "Foo");
        assert_eq!(create.symbol, "FOO");

        assert_eq!(
            log.messages(),
            vec![
                format!("Approval transaction sent: {}", approve_hash),
                format!("Transaction sent: {}", create_hash),
                "NFA created with MOR payment!".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn rejected_approval_stops_before_create() {
        let log = StatusLog::default();
        let client = connected_client(
            MockWallet::with_account().failing_send(CallKind::Approve, Failure::Rejected),
            DeploymentConfig::default(),
            &log,
        )
        .await;

        assert!(matches!(
            client.submit_create_nfa_with_payment(&foo_draft()).await,
            Err(Error::UserRejected(_))
        ));
        assert!(client.wallet().sent().is_empty());
        assert_eq!(log.entries().len(), 1);
        assert!(log.entries()[0].is_failure());
    }

    #[tokio::test]
    async fn reverted_approval_stops_before_create() {
        let log = StatusLog::default();
        let client = connected_client(
            MockWallet::with_account().reverting(CallKind::Approve),
            DeploymentConfig::default(),
            &log,
        )
        .await;

        assert!(matches!(
            client.submit_create_nfa_with_payment(&foo_draft()).await,
            Err(Error::ConfirmationFailed { .. })
        ));
        assert_eq!(client.wallet().sent_kinds(), vec![CallKind::Approve]);

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert!(matches!(
            entries[0],
            Status::Submitted {
                kind: CallKind::Approve,
                ..
            }
        ));
        assert!(entries[1].is_failure());
    }

    #[tokio::test]
    async fn failed_create_after_approval() {
        let log = StatusLog::default();
        let client = connected_client(
            MockWallet::with_account().reverting(CallKind::CreateNfaWithPayment),
            DeploymentConfig::default(),
            &log,
        )
        .await;

        assert!(client
            .submit_create_nfa_with_payment(&foo_draft())
            .await
            .is_err());
        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert!(entries[2].is_failure());
        assert!(!entries
            .iter()
            .any(|status| matches!(status, Status::Succeeded(_))));
    }
}

mod single_flight {
    use super::*;

    #[tokio::test]
    async fn second_action_while_pending_is_rejected() {
        let gate = Arc::new(Notify::new());
        let log = StatusLog::default();
        let client = connected_client(
            MockWallet::with_account().gated(gate.clone()),
            DeploymentConfig::default(),
            &log,
        )
        .await;
        let submitted = client.wallet().submitted.clone();

        let first = client.submit_faucet_request();
        let second = async {
            submitted.notified().await;
            let pending_status = log.entries();
            let result = client.submit_create_nfa(&foo_draft()).await;
            assert_eq!(log.entries(), pending_status);
            assert!(client.connect().await.is_err());
            gate.notify_one();
            result
        };

        let (first, second) = tokio::join!(first, second);

        assert!(first.is_ok());
        assert!(matches!(second, Err(Error::ActionInProgress)));
        assert_eq!(client.wallet().sent_kinds(), vec![CallKind::Faucet]);
        assert_eq!(
            log.entries().last(),
            Some(&Status::Succeeded(ActionKind::RequestFaucet))
        );

        // The slot is free again once the first action is done
        gate.notify_one();
        assert!(client.submit_faucet_request().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn confirmation_wait_can_time_out() {
        let config = DeploymentConfigBuilder::default()
            .confirmation_timeout_secs(Some(30))
            .build()
            .unwrap();
        let log = StatusLog::default();
        let client = connected_client(
            MockWallet::with_account().gated(Arc::new(Notify::new())),
            config,
            &log,
        )
        .await;

        let result = client.submit_faucet_request().await;

        let tx_hash = client.wallet().sent()[0].2;
        assert!(matches!(result, Err(Error::ConfirmationTimeout(hash)) if hash == tx_hash));
        assert!(log.entries()[1].is_failure());
    }
}

mod status_board {
    use super::*;

    #[tokio::test]
    async fn display_layer_sees_latest_status() {
        let board = StatusBoard::new();
        let mut display = board.subscribe();
        let client = NfaClient::new(MockWallet::with_account(), DeploymentConfig::default(), board);

        client.connect().await.unwrap();
        client.submit_faucet_request().await.unwrap();

        display.changed().await.unwrap();
        assert_eq!(
            display.borrow_and_update().as_ref().map(ToString::to_string),
            Some("MOR tokens received!".to_string())
        );
        assert_eq!(client.reporter().current(), client.state().status);
    }

    #[tokio::test]
    async fn wallet_trait_is_usable_through_option() {
        let wallet = Some(MockWallet::with_account());

        assert_eq!(wallet.request_accounts().await.unwrap(), vec![ACCOUNT]);
    }
}
