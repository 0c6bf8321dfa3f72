//! Contract suite for the public Objects REST API.
//!
//! The scenarios exercise `GET`, `POST`, `PUT`, `PATCH` and `DELETE` on
//! `/objects` and `/objects/{id}` through the probe harness.

pub mod scenarios;
pub mod settings;

use probe_application::Suite;
use probe_application::ports::HttpClient;
use probe_domain::TestOutcome;

pub use settings::{Settings, SettingsError};

/// Runs the eleven Objects API scenarios in order and returns their outcomes.
///
/// Each outcome is also recorded in the suite's report collector.
pub async fn run_objects_suite<C: HttpClient>(suite: &Suite<'_, C>) -> Vec<TestOutcome> {
    vec![
        suite
            .run_scenario("GET /objects returns the object list", scenarios::list_objects::<C>)
            .await,
        suite
            .run_scenario("GET unknown id returns 404", scenarios::get_unknown_object::<C>)
            .await,
        suite
            .run_scenario("created object can be fetched by id", scenarios::create_then_get::<C>)
            .await,
        suite
            .run_scenario("POST returns the submitted data", scenarios::create_returns_data::<C>)
            .await,
        suite
            .run_scenario("POST without body returns 400", scenarios::create_without_body::<C>)
            .await,
        suite
            .run_scenario("PUT updates an existing object", scenarios::update_object::<C>)
            .await,
        suite
            .run_scenario("PUT unknown id returns 404", scenarios::update_unknown_object::<C>)
            .await,
        suite
            .run_scenario("PATCH renames an object and GET sees it", scenarios::patch_then_get::<C>)
            .await,
        suite
            .run_scenario("PATCH unknown id returns 404", scenarios::patch_unknown_object::<C>)
            .await,
        suite
            .run_scenario("deleted object returns 404", scenarios::delete_then_get::<C>)
            .await,
        suite
            .run_scenario("DELETE unknown id returns 404", scenarios::delete_unknown_object::<C>)
            .await,
    ]
}
