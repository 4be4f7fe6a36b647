use drugnet::config::Settings;
use drugnet::domain::model::FilterCriteria;
use drugnet::{ApiClient, DrugNetError, Route, Router, ViewInput};
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> ApiClient {
    let settings = Settings::default().with_overrides(Some(server.base_url()), Some(5), None);
    ApiClient::from_config(&settings).unwrap()
}

#[tokio::test]
async fn test_home_route_end_to_end() {
    let server = MockServer::start();
    let stats_mock = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"status": "online", "nodes": 2931}));
    });

    let rendered = Router::new()
        .navigate(&client_for(&server), "/")
        .await
        .unwrap();

    stats_mock.assert();
    assert_eq!(rendered.route, Route::Home);
    assert!(rendered.text.contains("Drugs in graph: 2931"));
}

#[tokio::test]
async fn test_path_route_posts_exact_body() {
    let server = MockServer::start();
    let path_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/analysis/path")
            .json_body(json!({"start_drug": "Accutane", "end_drug": "doxycycline"}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "path": [
                    {"name": "Accutane", "step": 1, "similarity_to_next": 0.7, "reason": "Condición: 'Acne'"},
                    {"name": "doxycycline", "step": 2}
                ],
                "total_similarity": 0.7,
                "steps": 2
            }));
    });

    let rendered = Router::new()
        .navigate(&client_for(&server), "/path?start=Accutane&end=doxycycline")
        .await
        .unwrap();

    path_mock.assert();
    assert!(rendered.text.contains(" 1. [ Accutane ] ---> [ doxycycline ]"));
    assert_eq!(rendered.payload["total_similarity"], 0.7);
}

#[tokio::test]
async fn test_details_route_searches_then_fetches() {
    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/drugs/search")
            .query_param("query", "tylenol pm");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!(["Tylenol-PM"]));
    });
    let details_mock = server.mock(|when, then| {
        when.method(GET).path("/drugs/Tylenol-PM");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "drug_name": "Tylenol-PM",
                "medical_condition": "Insomnia",
                "rx_otc": "OTC",
                "side_effects": null
            }));
    });

    let input = ViewInput::Details {
        query: "tylenol pm".to_string(),
    };
    let rendered = Router::new()
        .render(&client_for(&server), &input)
        .await
        .unwrap();

    search_mock.assert();
    details_mock.assert();
    assert!(rendered.text.starts_with("--- Tylenol-PM ---"));
    assert!(rendered.text.contains(" Access (Rx/OTC): OTC"));
    assert!(rendered.text.contains(" Side effects: N/A"));
}

#[tokio::test]
async fn test_filter_route_sends_only_given_criteria() {
    let server = MockServer::start();
    let filter_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/drugs/filter")
            .json_body(json!({"pregnancy_category": "X", "rx_otc": "Rx"}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([
                {"drug_name": "Accutane", "medical_condition": "Acne", "rx_otc": "Rx", "pregnancy_category": "X", "csa": "N"}
            ]));
    });

    let input = ViewInput::Filter {
        criteria: FilterCriteria {
            pregnancy_category: Some("X".to_string()),
            rx_otc: Some("Rx".to_string()),
            ..Default::default()
        },
    };
    let rendered = Router::new()
        .render(&client_for(&server), &input)
        .await
        .unwrap();

    filter_mock.assert();
    assert!(rendered.text.contains("Accutane\tAcne\tRx\tX\tN"));
}

#[tokio::test]
async fn test_filter_route_strips_blank_criteria() {
    let server = MockServer::start();
    let filter_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/drugs/filter")
            .json_body(json!({"csa": "N"}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([]));
    });

    let input = ViewInput::Filter {
        criteria: FilterCriteria {
            condition: Some("   ".to_string()),
            rx_otc: Some(String::new()),
            csa: Some("N".to_string()),
            ..Default::default()
        },
    };
    let rendered = Router::new()
        .render(&client_for(&server), &input)
        .await
        .unwrap();

    filter_mock.assert();
    assert_eq!(rendered.text, "No drugs found.");
}

#[tokio::test]
async fn test_alternatives_not_found_surfaces_detail() {
    let server = MockServer::start();
    let alternatives_mock = server.mock(|when, then| {
        when.method(GET).path("/analysis/alternatives/Unobtainium");
        then.status(404)
            .header("Content-Type", "application/json")
            .json_body(json!({"detail": "Medicamento no encontrado"}));
    });

    let err = Router::new()
        .navigate(&client_for(&server), "/alternatives?name=Unobtainium")
        .await
        .unwrap_err();

    alternatives_mock.assert();
    match err {
        DrugNetError::Http { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "Medicamento no encontrado");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_input_sends_no_request() {
    let server = MockServer::start();
    let any_mock = server.mock(|when, then| {
        when.path_contains("/");
        then.status(200);
    });

    let err = Router::new()
        .navigate(&client_for(&server), "/path?start=Aspirin&end=aspirin")
        .await
        .unwrap_err();

    assert!(matches!(err, DrugNetError::InvalidInput { .. }));
    any_mock.assert_hits(0);
}
