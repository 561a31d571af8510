//! Spawn integration tests
//!
//! Setting spawns, teleporting teams, the `*` wildcard and per-server
//! spawn storage.

use fluffyteams_common::Error;
use fluffyteams_host::{GameServer, Location};

use crate::common::{test_config, TestApp, TEST_SERVER_NAME};

fn arena() -> Location {
    Location::new("world", 100.5, 72.0, -20.5, 180.0, 10.0)
}

mod test_set_spawn {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get_spawn() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();

        let updated = app.controller().set_spawn("red", &arena()).await.unwrap();

        assert_eq!(updated, 1);
        let spawn = app.controller().get_spawn("red").await.unwrap().unwrap();
        assert_eq!(spawn.server, TEST_SERVER_NAME);
        assert_eq!(spawn.location(), arena());
        assert_eq!(
            app.controller().get_spawn_location("red").await.unwrap(),
            Some(arena())
        );
    }

    #[tokio::test]
    async fn test_set_spawn_twice_moves_existing_spawn() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        app.controller().set_spawn("red", &arena()).await.unwrap();
        let first = app.controller().get_spawn("red").await.unwrap().unwrap();

        let moved = Location::new("world", 1.0, 2.0, 3.0, 4.0, 5.0);
        app.controller().set_spawn("red", &moved).await.unwrap();

        let second = app.controller().get_spawn("red").await.unwrap().unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.location(), moved);
    }

    #[tokio::test]
    async fn test_set_spawn_unknown_world() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();

        let err = app
            .controller()
            .set_spawn("red", &Location::new("world_nether", 0.0, 0.0, 0.0, 0.0, 0.0))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(err.to_string(), "World world_nether not found");
    }

    #[tokio::test]
    async fn test_set_spawn_unknown_team() {
        let app = TestApp::new().await.unwrap();

        let err = app.controller().set_spawn("ghost", &arena()).await.unwrap_err();

        assert_eq!(err.to_string(), "Team ghost not found");
    }

    #[tokio::test]
    async fn test_wildcard_sets_every_team() {
        let app = TestApp::new().await.unwrap();
        for name in ["red", "blue", "green"] {
            app.create_team(name).await.unwrap();
        }

        let updated = app.controller().set_spawn("*", &arena()).await.unwrap();

        assert_eq!(updated, 3);
        for name in ["red", "blue", "green"] {
            assert_eq!(
                app.controller().get_spawn_location(name).await.unwrap(),
                Some(arena())
            );
        }
    }

    #[tokio::test]
    async fn test_get_spawn_of_unknown_team() {
        let app = TestApp::new().await.unwrap();

        let err = app.controller().get_spawn("ghost").await.unwrap_err();

        assert_eq!(err.to_string(), "Team ghost not found");
    }
}

mod test_spawn_team {
    use super::*;

    #[tokio::test]
    async fn test_spawn_teleports_online_members_only() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        let alice = app.server.join("Alice");
        let bob = app.server.join("Bob");
        app.controller().add_member("red", &alice).await.unwrap();
        app.controller().add_member("red", &bob).await.unwrap();
        app.server.quit(bob.uuid);
        app.controller().set_spawn("red", &arena()).await.unwrap();

        let teleported = app.controller().spawn("red").await.unwrap();

        assert_eq!(teleported, 1);
        assert_eq!(app.server.teleports(), vec![(alice.uuid, arena())]);
    }

    #[tokio::test]
    async fn test_spawn_without_spawn_point() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();

        let err = app.controller().spawn("red").await.unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(err.to_string(), "Team red has no spawn on this server");
    }

    #[tokio::test]
    async fn test_wildcard_spawn_skips_teams_without_spawn() {
        let app = TestApp::new().await.unwrap();
        app.create_team("red").await.unwrap();
        app.create_team("blue").await.unwrap();
        let alice = app.server.join("Alice");
        let bob = app.server.join("Bob");
        app.controller().add_member("red", &alice).await.unwrap();
        app.controller().add_member("blue", &bob).await.unwrap();
        app.controller().set_spawn("red", &arena()).await.unwrap();

        let teleported = app.controller().spawn("*").await.unwrap();

        assert_eq!(teleported, 1);
        assert_eq!(app.server.teleports(), vec![(alice.uuid, arena())]);
    }

    #[tokio::test]
    async fn test_spawn_moves_player_into_spawn_world() {
        let app = TestApp::new().await.unwrap();
        app.server.add_world("event");
        app.create_team("red").await.unwrap();
        let alice = app.server.join("Alice");
        app.controller().add_member("red", &alice).await.unwrap();
        let event = Location::new("event", 0.0, 80.0, 0.0, 0.0, 0.0);
        app.controller().set_spawn("red", &event).await.unwrap();

        let teleported = app.controller().spawn("red").await.unwrap();

        assert_eq!(teleported, 1);
        assert_eq!(app.server.player_location(alice.uuid), Some(event));
    }
}

mod test_spawns_per_server {
    use super::*;

    #[tokio::test]
    async fn test_spawns_are_keyed_by_server_name() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("shared.db").display());

        let mut lobby_config = test_config();
        lobby_config.database_url = url.clone();
        lobby_config.server_name = "lobby".to_string();
        let lobby = TestApp::with_config(lobby_config).await.unwrap();

        let mut arena_config = test_config();
        arena_config.database_url = url;
        arena_config.server_name = "arena".to_string();
        let arena_server = TestApp::with_config(arena_config).await.unwrap();

        lobby.create_team("red").await.unwrap();
        lobby.controller().set_spawn("red", &arena()).await.unwrap();

        assert!(lobby.controller().get_spawn("red").await.unwrap().is_some());
        assert!(arena_server
            .controller()
            .get_spawn("red")
            .await
            .unwrap()
            .is_none());

        let other = Location::new("world", -5.0, 64.0, -5.0, 0.0, 0.0);
        arena_server.controller().set_spawn("red", &other).await.unwrap();
        assert_eq!(
            lobby.controller().get_spawn_location("red").await.unwrap(),
            Some(arena())
        );
        assert_eq!(
            arena_server
                .controller()
                .get_spawn_location("red")
                .await
                .unwrap(),
            Some(other)
        );
    }
}
