//! OpenWeather client behaviour against a mock HTTP server.

use dashboard_core::{ConditionCategory, FetchError, OpenWeatherProvider, Query, WeatherProvider};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paris_current() -> serde_json::Value {
    json!({
        "cod": 200,
        "name": "Paris",
        "sys": { "country": "FR" },
        "main": { "temp": 18.4, "humidity": 60 },
        "wind": { "speed": 3.2 },
        "weather": [{ "main": "Clouds", "description": "broken clouds" }]
    })
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("TEST_KEY".to_string(), &server.uri())
}

#[tokio::test]
async fn current_by_name_sends_metric_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_current()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = provider(&server).current(&Query::name("Paris")).await.unwrap();

    assert_eq!(snapshot.location_name, "Paris");
    assert_eq!(snapshot.country, "FR");
    assert_eq!(snapshot.temperature_c, 18.4);
    assert_eq!(snapshot.humidity_pct, 60);
    assert_eq!(snapshot.wind_speed_mps, 3.2);
    assert_eq!(snapshot.condition, ConditionCategory::Clouds);
}

#[tokio::test]
async fn current_by_coordinates_sends_lat_lon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_current()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = provider(&server).current(&Query::coordinates(48.85, 2.35)).await.unwrap();
    assert_eq!(snapshot.location_name, "Paris");
}

#[tokio::test]
async fn unknown_city_is_a_domain_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let err = provider(&server).current(&Query::name("Xyzzyplace")).await.unwrap_err();

    match err {
        FetchError::Domain { message } => assert_eq!(message, "city not found"),
        other => panic!("expected domain error, got {other:?}"),
    }
}

#[tokio::test]
async fn garbage_body_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).current(&Query::name("Paris")).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let provider = OpenWeatherProvider::with_base_url("KEY".to_string(), "http://127.0.0.1:9");

    let err = provider.current(&Query::name("Paris")).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn forecast_readings_keep_feed_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cod": "200",
            "list": [
                {
                    "dt_txt": "2024-05-06 09:00:00",
                    "main": { "temp": 11.0, "humidity": 70 },
                    "weather": [{ "main": "Rain", "description": "light rain" }]
                },
                {
                    "dt_txt": "2024-05-06 12:00:00",
                    "main": { "temp": 14.5, "humidity": 65 },
                    "weather": [{ "main": "Clear", "description": "clear sky" }]
                }
            ]
        })))
        .mount(&server)
        .await;

    let readings = provider(&server).forecast(&Query::name("Paris")).await.unwrap();

    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].timestamp, "2024-05-06 09:00:00");
    assert_eq!(readings[0].condition, ConditionCategory::Rain);
    assert_eq!(readings[1].temperature_c, 14.5);
    assert_eq!(readings[1].description, "clear sky");
}
