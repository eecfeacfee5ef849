//! Shared fixtures: a wiremock stand-in for the search service.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn vertigo_json() -> serde_json::Value {
    json!({
        "id": 17,
        "title": "Vertigo",
        "year": 1958,
        "locations": "Golden Gate Bridge",
        "geo_lat": 37.8199,
        "geo_lng": -122.4783
    })
}

pub async fn start_search_service() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/location"))
        .and(query_param("title", "Vertigo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([vertigo_json()])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/location"))
        .and(query_param("title", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            vertigo_json(),
            {
                "title": "Bullitt",
                "year": 1968,
                "locations": "Taylor Street",
                "geo_lat": 37.7990,
                "geo_lng": -122.4130
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie"))
        .and(query_param("title", "Ver"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "title": "Vertigo" },
            { "title": "Vertical Limit" }
        ])))
        .mount(&server)
        .await;

    server
}
