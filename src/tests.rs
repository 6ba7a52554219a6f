#[cfg(test)]
mod integration_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::config::{CatalogConfig, Config, DefaultLocation, EstimatorConfig, ServerConfig};
    use crate::routes::forecast_routes::api_routes;
    use crate::services::catalog::RooftopCatalog;
    use crate::services::estimator::MockEstimator;
    use crate::shared_state::{AppState, SharedState};

    /// Test app with a deterministic catalog and a zero-delay estimator.
    /// Also hands back the state so tests can poke at the session directly.
    fn setup_test_app() -> (TestServer, AppState) {
        let config = Config {
            server: ServerConfig { port: 0 },
            estimator: EstimatorConfig { delay_ms: 0, seed: 20240917 },
            catalog: CatalogConfig { seed: 42, size: 50 },
            default_location: DefaultLocation {
                latitude: 7.0731,
                longitude: 125.6128,
                label: "Davao City, Philippines".to_string(),
            },
        };
        let catalog = RooftopCatalog::generate(config.catalog.seed, config.catalog.size);
        let estimator = Arc::new(MockEstimator::new(config.estimator.seed, Duration::ZERO));
        let state = AppState::new(catalog, estimator);
        let app = Router::new().nest(
            "/api",
            api_routes(SharedState { state: state.clone(), config }),
        );
        (TestServer::new(app).unwrap(), state)
    }

    fn setup_test_server() -> TestServer {
        setup_test_app().0
    }

    #[tokio::test]
    async fn test_health() {
        let server = setup_test_server();
        let response = server.get("/api/health").await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["rooftops_loaded"], 50);
        assert_eq!(body["estimation_pending"], false);
    }

    #[tokio::test]
    async fn test_location_unset_then_manual_entry() {
        let server = setup_test_server();

        let response = server.get("/api/session/location").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server
            .put("/api/session/location")
            .json(&json!({"latitude": "7.0731", "longitude": "125.6128"}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["address"], "7.073100, 125.612800");

        let response = server.get("/api/session/location").await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["coordinate"]["latitude"], 7.0731);
    }

    #[tokio::test]
    async fn test_manual_entry_rejects_bad_input() {
        let server = setup_test_server();

        for (lat, lon) in [("seven", "125.6"), ("91", "0"), ("0", "-200"), ("NaN", "0")] {
            let response = server
                .put("/api/session/location")
                .json(&json!({"latitude": lat, "longitude": lon}))
                .await;
            response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        }

        // rejected input leaves the session location unset
        let response = server.get("/api/session/location").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_geolocation_fallback() {
        let server = setup_test_server();

        // empty report = capability failed or denied
        let response = server
            .post("/api/session/location/geolocate")
            .json(&json!({}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["address"], "Davao City, Philippines");
        assert_eq!(body["coordinate"]["latitude"], 7.0731);
        assert_eq!(body["coordinate"]["longitude"], 125.6128);
    }

    #[tokio::test]
    async fn test_geolocation_fix_overwrites_manual_entry() {
        let server = setup_test_server();

        server
            .put("/api/session/location")
            .json(&json!({"latitude": "10.0", "longitude": "120.0"}))
            .await
            .assert_status(StatusCode::OK);

        let response = server
            .post("/api/session/location/geolocate")
            .json(&json!({"latitude": 14.5995, "longitude": 120.9842}))
            .await;
        response.assert_status(StatusCode::OK);

        let body: Value = server.get("/api/session/location").await.json();
        assert_eq!(body["coordinate"]["latitude"], 14.5995);
        assert_eq!(body["address"], "14.599500, 120.984200");
    }

    #[tokio::test]
    async fn test_map_click_recenters() {
        let server = setup_test_server();
        let response = server
            .post("/api/session/location/map-click")
            .json(&json!({"lat": 7.1052, "lng": 125.5321}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["address"], "7.105200, 125.532100");
        assert_eq!(body["recenter"]["zoom"], 16);
        assert_eq!(body["recenter"]["lat"], 7.1052);

        let response = server
            .post("/api/session/location/map-click")
            .json(&json!({"lat": 95.0, "lng": 0.0}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_predict_requires_location() {
        let server = setup_test_server();
        let response = server.post("/api/session/predict").await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_predict_is_noop_while_pending() {
        let (server, state) = setup_test_app();

        server
            .post("/api/session/location/map-click")
            .json(&json!({"lat": 7.0731, "lng": 125.6128}))
            .await
            .assert_status(StatusCode::OK);

        // claim the single estimation slot, as an in-flight request would
        assert!(state.begin_estimation());
        let response = server.post("/api/session/predict").await;
        response.assert_status(StatusCode::CONFLICT);
        assert!(state.prediction().is_none());

        state.finish_estimation();
        let response = server.post("/api/session/predict").await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_predict_flow() {
        let server = setup_test_server();

        server
            .post("/api/session/location/map-click")
            .json(&json!({"lat": 7.0731, "lng": 125.6128}))
            .await
            .assert_status(StatusCode::OK);

        let response = server.get("/api/session/prediction").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server.post("/api/session/predict").await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();

        let potential = body["prediction"]["solar_potential"].as_f64().unwrap();
        assert!((5.2..6.0).contains(&potential));
        // the anchored range only produces the top two tiers
        let label = body["rating"]["label"].as_str().unwrap();
        assert!(label == "Excellent" || label == "Very Good");
        let percent = body["potential_percent"].as_f64().unwrap();
        assert!((potential / 7.0 * 100.0 - percent).abs() < 1e-9);

        // read-back returns the same estimation
        let readback: Value = server.get("/api/session/prediction").await.json();
        assert_eq!(
            readback["prediction"]["estimation_id"],
            body["prediction"]["estimation_id"]
        );

        // a second estimation supersedes the first
        let second: Value = server.post("/api/session/predict").await.json();
        assert_ne!(
            second["prediction"]["estimation_id"],
            body["prediction"]["estimation_id"]
        );
    }

    #[tokio::test]
    async fn test_model_metrics() {
        let server = setup_test_server();
        let body: Value = server.get("/api/analytics/metrics").await.json();
        let comparisons = body.as_array().unwrap();
        assert_eq!(comparisons.len(), 3);

        let rmse = &comparisons[0];
        assert_eq!(rmse["title"], "Root Mean Square Error");
        assert!((rmse["improvement_percent"].as_f64().unwrap() - 18.50).abs() < 0.01);
        assert_eq!(rmse["is_improvement"], true);

        let r2 = &comparisons[2];
        assert_eq!(r2["lower_is_better"], false);
        assert!((r2["improvement_percent"].as_f64().unwrap() - 8.26).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_feature_importance_ranking() {
        let server = setup_test_server();
        let body: Value = server.get("/api/analytics/features").await.json();
        let features = body.as_array().unwrap();
        assert_eq!(features.len(), 8);
        assert_eq!(features[0]["name"], "Clear Sky Ratio");
        assert_eq!(features[0]["rank"], 1);
        assert_eq!(features[7]["rank"], 8);
    }

    #[tokio::test]
    async fn test_rooftop_search_and_sort() {
        let server = setup_test_server();

        let body: Value = server
            .get("/api/rooftops")
            .add_query_param("search", "poblacion")
            .await
            .json();
        let rooftops = body.as_array().unwrap();
        assert!(!rooftops.is_empty());
        for r in rooftops {
            assert_eq!(r["barangay"], "Poblacion");
        }

        let body: Value = server
            .get("/api/rooftops")
            .add_query_param("sort_by", "area")
            .await
            .json();
        let rooftops = body.as_array().unwrap();
        assert_eq!(rooftops.len(), 50);
        let areas: Vec<f64> = rooftops.iter().map(|r| r["area"].as_f64().unwrap()).collect();
        for pair in areas.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[tokio::test]
    async fn test_rooftop_detail_projection() {
        let server = setup_test_server();
        let response = server.get("/api/rooftops/RT-0001").await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();

        let ghi = body["rooftop"]["predicted_ghi"].as_f64().unwrap();
        let area = body["rooftop"]["area"].as_f64().unwrap();
        let energy = body["projection"]["energy_mwh"].as_f64().unwrap();
        let co2 = body["projection"]["co2_tons"].as_f64().unwrap();
        assert!((energy - ghi * area * 365.0 / 1000.0).abs() < 1e-9);
        assert!((co2 - energy * 0.7).abs() < 1e-9);

        let response = server.get("/api/rooftops/RT-9999").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
