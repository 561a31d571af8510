//! Membership integration tests
//!
//! Online and offline adds and removals, the one-team-per-player rule,
//! member listing and the LuckPerms mirror.

use std::sync::Arc;

use fluffyteams_common::Error;
use fluffyteams_permissions::mock::{GroupChange, MockPermissionsService};
use fluffyteams_permissions::DisabledPermissionsService;
use fluffyteams_teams::{OfflineAddOutcome, UNKNOWN_PLAYER};

use crate::common::TestApp;

mod test_add_member {
    use super::*;

    #[tokio::test]
    async fn test_add_online_player() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        let alice = app.server.join("Alice");

        let member = app.controller().add_member("red", &alice).await.unwrap();

        assert_eq!(member.player_uuid, alice.uuid);
        let team = app.controller().get_member_team(alice.uuid).await.unwrap();
        assert_eq!(team.unwrap().name, "red");
        assert_eq!(
            app.server.console_commands(),
            vec![format!("lp user {} parent add red", alice.uuid)]
        );
    }

    #[tokio::test]
    async fn test_add_to_unknown_team() {
        let app = TestApp::new().await.unwrap();
        let alice = app.server.join("Alice");

        let err = app.controller().add_member("ghost", &alice).await.unwrap_err();

        assert_eq!(err.to_string(), "Team ghost not found");
        assert!(app.server.console_commands().is_empty());
    }

    #[tokio::test]
    async fn test_player_can_only_be_in_one_team() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        app.create_team("blue").await.unwrap();
        let alice = app.server.join("Alice");
        app.controller().add_member("red", &alice).await.unwrap();

        let err = app.controller().add_member("blue", &alice).await.unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(err.to_string(), "Player Alice is already in a team");
        let team = app.controller().get_member_team(alice.uuid).await.unwrap();
        assert_eq!(team.unwrap().name, "red");
    }

    #[tokio::test]
    async fn test_add_offline_player_resolved_by_identity() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        let uuid = app.identity.register("Notch");

        let outcome = app
            .controller()
            .add_offline_member("red", "notch")
            .await
            .unwrap();

        match outcome {
            OfflineAddOutcome::Added {
                member,
                has_connected_before,
            } => {
                assert_eq!(member.player_uuid, uuid);
                assert!(!has_connected_before);
            }
            other => panic!("Expected Added, got {:?}", other),
        }
        assert_eq!(app.identity.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_add_offline_player_who_played_before() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        let alice = app.server.join("Alice");
        app.server.quit(alice.uuid);
        app.identity.register_with_uuid(alice.uuid, "Alice");

        let outcome = app
            .controller()
            .add_offline_member("red", "Alice")
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            OfflineAddOutcome::Added {
                has_connected_before: true,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_add_offline_unknown_account() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();

        let outcome = app
            .controller()
            .add_offline_member("red", "Nobody")
            .await
            .unwrap();

        assert_eq!(outcome, OfflineAddOutcome::UnknownAccount);
        assert!(app.controller().list_members("red").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_identity_outage_is_not_found() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        app.identity.register("Notch");
        app.identity.set_unavailable(true);

        let outcome = app
            .controller()
            .add_offline_member("red", "Notch")
            .await
            .unwrap();

        assert_eq!(outcome, OfflineAddOutcome::UnknownAccount);
    }

    #[tokio::test]
    async fn test_add_offline_checks_team_before_lookup() {
        let app = TestApp::new().await.unwrap();
        app.identity.register("Notch");

        let err = app
            .controller()
            .add_offline_member("ghost", "Notch")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Team ghost not found");
        assert_eq!(app.identity.lookup_count(), 0);
    }
}

mod test_remove_member {
    use super::*;

    #[tokio::test]
    async fn test_remove_online_player() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        let alice = app.server.join("Alice");
        app.controller().add_member("red", &alice).await.unwrap();

        let team = app.controller().remove_member(&alice).await.unwrap();

        assert_eq!(team.name, "red");
        assert!(app.controller().get_member(alice.uuid).await.unwrap().is_none());
        assert_eq!(
            app.server.console_commands().last().unwrap(),
            &format!("lp user {} parent remove red", alice.uuid)
        );
    }

    #[tokio::test]
    async fn test_remove_player_without_team() {
        let app = TestApp::new().await.unwrap();
        let alice = app.server.join("Alice");

        let err = app.controller().remove_member(&alice).await.unwrap_err();

        assert_eq!(err.to_string(), "Player Alice not found in any team");
    }

    #[tokio::test]
    async fn test_remove_offline_player_resolved_by_identity() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        let uuid = app.identity.register("Notch");
        app.controller()
            .add_offline_member("red", "Notch")
            .await
            .unwrap();

        let team = app.controller().remove_offline_member("Notch").await.unwrap();

        assert_eq!(team.unwrap().name, "red");
        assert!(app.controller().get_member(uuid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_offline_falls_back_to_server_records() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        let alice = app.server.join("Alice");
        app.controller().add_member("red", &alice).await.unwrap();
        app.server.quit(alice.uuid);
        app.identity.set_unavailable(true);

        let team = app.controller().remove_offline_member("Alice").await.unwrap();

        assert_eq!(team.unwrap().name, "red");
        assert!(app.controller().get_member(alice.uuid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_offline_unknown_or_teamless() {
        let app = TestApp::new().await.unwrap();
        app.identity.register("Notch");

        assert!(app
            .controller()
            .remove_offline_member("Nobody")
            .await
            .unwrap()
            .is_none());
        assert!(app
            .controller()
            .remove_offline_member("Notch")
            .await
            .unwrap()
            .is_none());
    }
}

mod test_list_members {
    use super::*;

    #[tokio::test]
    async fn test_list_members_resolves_names() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        let alice = app.server.join("Alice");
        app.controller().add_member("red", &alice).await.unwrap();
        app.identity.register("Notch");
        app.controller()
            .add_offline_member("red", "Notch")
            .await
            .unwrap();

        let members = app.controller().list_members("red").await.unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].username, "Alice");
        assert!(members[0].has_connected_before);
        assert!(members[0].online);
        assert_eq!(members[1].username, "Notch");
        assert!(!members[1].has_connected_before);
        assert!(!members[1].online);
    }

    #[tokio::test]
    async fn test_unresolvable_member_shows_placeholder() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        app.identity.register("Notch");
        app.controller()
            .add_offline_member("red", "Notch")
            .await
            .unwrap();
        app.identity.set_unavailable(true);

        let members = app.controller().list_members("red").await.unwrap();

        assert_eq!(members[0].username, UNKNOWN_PLAYER);
    }

    #[tokio::test]
    async fn test_list_members_of_unknown_team() {
        let app = TestApp::new().await.unwrap();

        let err = app.controller().list_members("ghost").await.unwrap_err();

        assert_eq!(err.to_string(), "Team ghost not found");
    }
}

mod test_permissions_mirror {
    use super::*;

    #[tokio::test]
    async fn test_mirror_receives_group_changes() {
        let permissions = MockPermissionsService::new();
        let app = TestApp::with_permissions(Arc::new(permissions.clone()))
            .await
            .unwrap();
        app.create_team("red").await.unwrap();
        let alice = app.server.join("Alice");

        app.controller().add_member("red", &alice).await.unwrap();
        app.controller().remove_member(&alice).await.unwrap();

        assert_eq!(
            permissions.changes(),
            vec![
                GroupChange::Added {
                    player: alice.uuid,
                    group: "red".to_string()
                },
                GroupChange::Removed {
                    player: alice.uuid,
                    group: "red".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_disabled_mirror_dispatches_nothing() {
        let app = TestApp::with_permissions(Arc::new(DisabledPermissionsService))
            .await
            .unwrap();
        app.create_team("red").await.unwrap();
        let alice = app.server.join("Alice");

        app.controller().add_member("red", &alice).await.unwrap();

        assert!(app.server.console_commands().is_empty());
        assert!(app.controller().get_member(alice.uuid).await.unwrap().is_some());
    }
}
