//! Identity end-to-end tests
//!
//! Runs the plugin against the real Mojang client pointed at a wiremock
//! server, checking that offline adds and member listings use the profile
//! API and survive it being slow or down.

#![allow(dead_code)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use fluffyteams_app::FluffyTeams;
use fluffyteams_host::mock::MockGameServer;
use fluffyteams_host::GameServer;
use fluffyteams_identity::mojang::MojangClient;
use fluffyteams_identity::IdentityConfig;
use fluffyteams_permissions::DisabledPermissionsService;
use fluffyteams_teams::Sender;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{args, test_config};

const NOTCH_ID: &str = "069a79f444e94726a5befca90e38aaf5";

async fn plugin_with_mojang(mock: &MockServer, timeout: Duration) -> FluffyTeams {
    let identity = MojangClient::new(IdentityConfig {
        provider: "mojang".to_string(),
        profiles_base_url: mock.uri(),
        session_base_url: mock.uri(),
        timeout,
    })
    .unwrap();
    let server: Arc<dyn GameServer> = Arc::new(MockGameServer::new());

    FluffyTeams::with_services(
        server,
        test_config(),
        Arc::new(identity),
        Arc::new(DisabledPermissionsService),
    )
    .await
    .unwrap()
}

#[test_log::test(tokio::test)]
async fn test_offline_add_and_listing_use_profile_api() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/profiles/minecraft/Notch"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": NOTCH_ID, "name": "Notch" })),
        )
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/session/minecraft/profile/{}", NOTCH_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": NOTCH_ID, "name": "Notch" })),
        )
        .mount(&mock)
        .await;

    let plugin = plugin_with_mojang(&mock, Duration::from_secs(5)).await;
    plugin.on_command(&Sender::Console, &args("create red Red")).await;

    let reply = plugin.on_command(&Sender::Console, &args("add red Notch")).await;
    assert_eq!(reply[0], "\u{a7}aPlayer Notch added to team red!");

    let member = plugin
        .controller()
        .get_member(Uuid::parse_str(NOTCH_ID).unwrap())
        .await
        .unwrap();
    assert!(member.is_some());

    let listing = plugin.on_command(&Sender::Console, &args("list red")).await;
    assert_eq!(listing[1], "\u{a7}f- Notch \u{a7}7(never connected)");
}

#[tokio::test]
async fn test_missing_account_is_reported() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/profiles/minecraft/Nobody"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock)
        .await;

    let plugin = plugin_with_mojang(&mock, Duration::from_secs(5)).await;
    plugin.on_command(&Sender::Console, &args("create red Red")).await;

    let reply = plugin.on_command(&Sender::Console, &args("add red Nobody")).await;
    assert_eq!(
        reply[0],
        "\u{a7}cCouldn't find a valid Minecraft account with name: Nobody"
    );
}

#[tokio::test]
async fn test_slow_profile_api_times_out_as_not_found() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/profiles/minecraft/Notch"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": NOTCH_ID, "name": "Notch" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock)
        .await;

    let plugin = plugin_with_mojang(&mock, Duration::from_secs(1)).await;
    plugin.on_command(&Sender::Console, &args("create red Red")).await;

    let reply = plugin.on_command(&Sender::Console, &args("add red Notch")).await;
    assert_eq!(
        reply[0],
        "\u{a7}cCouldn't find a valid Minecraft account with name: Notch"
    );
}

#[tokio::test]
async fn test_unresolvable_member_listed_as_unknown() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/profiles/minecraft/Notch"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": NOTCH_ID, "name": "Notch" })),
        )
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/session/minecraft/profile/{}", NOTCH_ID)))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&mock)
        .await;

    let plugin = plugin_with_mojang(&mock, Duration::from_secs(5)).await;
    plugin.on_command(&Sender::Console, &args("create red Red")).await;
    plugin.on_command(&Sender::Console, &args("add red Notch")).await;

    let listing = plugin.on_command(&Sender::Console, &args("list red")).await;
    assert_eq!(
        listing,
        vec![
            "\u{a7}eMembers of red:".to_string(),
            "\u{a7}f- Unknown Player \u{a7}7(never connected)".to_string(),
        ]
    );
}
